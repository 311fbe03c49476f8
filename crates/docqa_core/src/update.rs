use crate::{AppState, Effect, ErrorKind, IngestionState, Msg, QueryState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentSelected(document) => {
            state.select_document(document);
            Vec::new()
        }
        Msg::QueryTextChanged(text) => {
            state.set_query_text(text);
            Vec::new()
        }
        Msg::UploadClicked => {
            let Some(document) = state.document().cloned() else {
                return (state, vec![Effect::ShowNotice(ErrorKind::NoDocumentSelected)]);
            };
            if state.ingestion() == IngestionState::InProgress {
                return (state, vec![Effect::ShowNotice(ErrorKind::RequestInProgress)]);
            }
            let request_id = state.begin_upload();
            vec![Effect::UploadDocument {
                request_id,
                document,
            }]
        }
        Msg::AskClicked => {
            // Guard order matters: readiness first, then the text, then re-entrancy.
            if !state.document_ready() {
                return (state, vec![Effect::ShowNotice(ErrorKind::DocumentNotReady)]);
            }
            if state.query_text().trim().is_empty() {
                return (state, vec![Effect::ShowNotice(ErrorKind::EmptyQuery)]);
            }
            if state.query() == QueryState::InProgress {
                return (state, vec![Effect::ShowNotice(ErrorKind::RequestInProgress)]);
            }
            let query = state.query_text().to_owned();
            let request_id = state.begin_query();
            vec![Effect::SubmitQuery { request_id, query }]
        }
        Msg::IngestionFinished { request_id, result } => match state.finish_upload(request_id, result) {
            Some(false) => vec![Effect::ShowNotice(ErrorKind::UploadFailed)],
            Some(true) | None => Vec::new(),
        },
        Msg::QueryFinished { request_id, result } => match state.finish_query(request_id, result) {
            Some(false) => vec![Effect::ShowNotice(ErrorKind::QueryFailed)],
            Some(true) | None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
