use docqa_core::{AppViewModel, ErrorKind, IngestionState, QueryState};

pub const PROMPT: &str = "docqa> ";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("== Document Question & Answering Chat ==".to_string());
    lines.push(format!(
        "Document: {}",
        view.document_name.as_deref().unwrap_or("(none selected)")
    ));
    lines.push(row(
        button(view.upload_label, view.can_upload),
        ingestion_label(view.ingestion),
    ));
    if let Some(status) = &view.status_message {
        lines.push(format!("  {status}"));
    }

    if view.query_input_enabled {
        lines.push(format!("Question: {}", view.query_text));
    } else {
        lines.push("Question: (upload a document to ask questions)".to_string());
    }
    lines.push(row(button(view.ask_label, view.can_ask), query_label(view.query)));
    if let Some(answer) = &view.answer {
        lines.push("Answer:".to_string());
        lines.extend(answer.lines().map(|line| format!("  {line}")));
    }
    lines
}

/// A blocking notice; the caller holds further input until the user presses Enter.
pub fn render_notice(kind: ErrorKind) -> Vec<String> {
    vec![
        format!("!! {kind}"),
        "!! (press Enter to dismiss)".to_string(),
    ]
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

fn row(button: String, state: &str) -> String {
    if state.is_empty() {
        button
    } else {
        format!("{button} {state}")
    }
}

fn ingestion_label(state: IngestionState) -> &'static str {
    match state {
        IngestionState::NotStarted => "",
        IngestionState::InProgress => "in progress",
        IngestionState::Succeeded => "uploaded",
        IngestionState::Failed => "failed",
    }
}

fn query_label(state: QueryState) -> &'static str {
    match state {
        QueryState::Idle => "",
        QueryState::InProgress => "waiting for answer",
        QueryState::Succeeded => "answered",
        QueryState::Failed => "failed",
    }
}
