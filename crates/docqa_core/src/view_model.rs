use crate::{AppState, IngestionState, QueryState};

pub const UPLOAD_LABEL: &str = "Upload Document";
pub const UPLOAD_LABEL_BUSY: &str = "Uploading...";
pub const ASK_LABEL: &str = "Ask";
pub const ASK_LABEL_BUSY: &str = "Thinking...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub document_name: Option<String>,
    pub ingestion: IngestionState,
    pub status_message: Option<String>,
    pub query_text: String,
    pub query: QueryState,
    pub answer: Option<String>,
    /// Upload trigger is enabled.
    pub can_upload: bool,
    /// Question box accepts input.
    pub query_input_enabled: bool,
    /// Ask trigger is enabled.
    pub can_ask: bool,
    pub upload_label: &'static str,
    pub ask_label: &'static str,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let uploading = state.ingestion() == IngestionState::InProgress;
        let asking = state.query() == QueryState::InProgress;
        let ready = state.document_ready();
        Self {
            document_name: state.document().map(|doc| doc.file_name().to_owned()),
            ingestion: state.ingestion(),
            status_message: state.status_message().map(ToOwned::to_owned),
            query_text: state.query_text().to_owned(),
            query: state.query(),
            answer: state.answer().map(ToOwned::to_owned),
            can_upload: !uploading,
            query_input_enabled: ready,
            can_ask: ready && !asking,
            upload_label: if uploading {
                UPLOAD_LABEL_BUSY
            } else {
                UPLOAD_LABEL
            },
            ask_label: if asking { ASK_LABEL_BUSY } else { ASK_LABEL },
        }
    }
}
