use docqa_core::{
    update, AppState, Effect, ErrorKind, IngestionState, Msg, QueryState, SelectedDocument,
    ASK_LABEL, ASK_LABEL_BUSY, UPLOAD_LABEL, UPLOAD_LABEL_BUSY,
};

fn init_logging() {
    docqa_logging::initialize_for_tests();
}

fn ready_state() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::DocumentSelected(Some(SelectedDocument::new("notes.txt", b"hello".to_vec()))),
    );
    let (state, effects) = update(state, Msg::UploadClicked);
    let request_id = match &effects[..] {
        [Effect::UploadDocument { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::IngestionFinished {
            request_id,
            result: Ok("notes.txt embedded and stored.".to_string()),
        },
    );
    assert!(state.document_ready());
    state
}

fn ask(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryTextChanged(text.to_string()));
    update(state, Msg::AskClicked)
}

fn query_request_id(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::SubmitQuery { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn ask_before_ingestion_is_rejected_for_any_text() {
    init_logging();
    for text in ["What is this?", "", "   "] {
        let (state, effects) = ask(AppState::new(), text);
        assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::DocumentNotReady)]);
        assert_eq!(state.query(), QueryState::Idle);
    }
}

#[test]
fn ask_during_ingestion_and_after_failure_is_rejected() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DocumentSelected(Some(SelectedDocument::new("a.pdf", vec![1, 2, 3]))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    assert_eq!(state.ingestion(), IngestionState::InProgress);

    let (state, effects) = ask(state, "Why?");
    assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::DocumentNotReady)]);

    let (state, _) = update(
        state,
        Msg::IngestionFinished {
            request_id: 1,
            result: Err("timeout".to_string()),
        },
    );
    let (_, effects) = ask(state, "Why?");
    assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::DocumentNotReady)]);
}

#[test]
fn whitespace_query_is_rejected_without_request() {
    init_logging();
    let state = ready_state();

    let (state, effects) = ask(state, "   ");

    assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::EmptyQuery)]);
    assert_eq!(state.query(), QueryState::Idle);
}

#[test]
fn successful_query_sets_answer() {
    init_logging();
    let (state, effects) = ask(ready_state(), "  What is the answer?  ");
    assert_eq!(state.query(), QueryState::InProgress);
    assert_eq!(
        effects,
        vec![Effect::SubmitQuery {
            request_id: 2,
            query: "  What is the answer?  ".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        Msg::QueryFinished {
            request_id: 2,
            result: Ok("42".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.query(), QueryState::Succeeded);
    assert_eq!(state.answer(), Some("42"));
}

#[test]
fn failed_query_keeps_previous_answer() {
    init_logging();
    let (state, effects) = ask(ready_state(), "first?");
    let (state, _) = update(
        state,
        Msg::QueryFinished {
            request_id: query_request_id(&effects),
            result: Ok("first answer".to_string()),
        },
    );

    let (state, effects) = ask(state, "second?");
    // In-flight query does not clear the previous answer.
    assert_eq!(state.answer(), Some("first answer"));

    let (state, effects) = update(
        state,
        Msg::QueryFinished {
            request_id: query_request_id(&effects),
            result: Err("http status 500".to_string()),
        },
    );

    assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::QueryFailed)]);
    assert_eq!(state.query(), QueryState::Failed);
    assert_eq!(state.answer(), Some("first answer"));

    // Failed is not terminal.
    let (state, effects) = ask(state, "third?");
    assert_eq!(state.query(), QueryState::InProgress);
    assert_eq!(effects.len(), 1);
}

#[test]
fn new_answer_overwrites_old_one() {
    init_logging();
    let (state, effects) = ask(ready_state(), "one?");
    let (state, _) = update(
        state,
        Msg::QueryFinished {
            request_id: query_request_id(&effects),
            result: Ok("one".to_string()),
        },
    );
    let (state, effects) = ask(state, "two?");
    let (state, _) = update(
        state,
        Msg::QueryFinished {
            request_id: query_request_id(&effects),
            result: Ok("two".to_string()),
        },
    );

    assert_eq!(state.answer(), Some("two"));
}

#[test]
fn second_ask_while_in_flight_is_rejected() {
    init_logging();
    let (state, _) = ask(ready_state(), "first?");
    let before = state.clone();

    let (state, effects) = update(state, Msg::AskClicked);

    assert_eq!(effects, vec![Effect::ShowNotice(ErrorKind::RequestInProgress)]);
    assert_eq!(state, before);
}

#[test]
fn stale_query_completion_is_ignored() {
    init_logging();
    let (state, effects) = ask(ready_state(), "first?");
    let request_id = query_request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::QueryFinished {
            request_id: request_id - 1,
            result: Ok("wrong".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.query(), QueryState::InProgress);
    assert_eq!(state.answer(), None);
}

#[test]
fn view_reflects_busy_labels_and_gates() {
    init_logging();
    let view = AppState::new().view();
    assert!(view.can_upload);
    assert!(!view.can_ask);
    assert!(!view.query_input_enabled);
    assert_eq!(view.upload_label, UPLOAD_LABEL);

    let (state, _) = update(
        AppState::new(),
        Msg::DocumentSelected(Some(SelectedDocument::new("a.txt", b"x".to_vec()))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let view = state.view();
    assert!(!view.can_upload);
    assert_eq!(view.upload_label, UPLOAD_LABEL_BUSY);
    assert_eq!(view.document_name.as_deref(), Some("a.txt"));

    let (state, _) = ask(ready_state(), "why?");
    let view = state.view();
    assert!(view.query_input_enabled);
    assert!(!view.can_ask);
    assert_eq!(view.ask_label, ASK_LABEL_BUSY);
    assert_eq!(view.query_text, "why?");

    let view = ready_state().view();
    assert!(view.can_ask);
    assert_eq!(view.ask_label, ASK_LABEL);
    assert_eq!(
        view.status_message.as_deref(),
        Some("notes.txt embedded and stored.")
    );
}

#[test]
fn notice_text_matches_user_messages() {
    assert_eq!(ErrorKind::NoDocumentSelected.to_string(), "Please select a file!");
    assert_eq!(ErrorKind::UploadFailed.to_string(), "Upload failed");
    assert_eq!(
        ErrorKind::DocumentNotReady.to_string(),
        "Please upload a document first."
    );
    assert_eq!(ErrorKind::EmptyQuery.to_string(), "Please enter a question");
    assert_eq!(ErrorKind::QueryFailed.to_string(), "Failed to get response");
}
