use crate::{RequestId, SelectedDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file, or cleared the picker (`None`).
    DocumentSelected(Option<SelectedDocument>),
    /// User edited the question box.
    QueryTextChanged(String),
    /// User clicked Upload Document.
    UploadClicked,
    /// User clicked Ask.
    AskClicked,
    /// Engine completion for an ingestion request. `Ok` carries the service message.
    IngestionFinished {
        request_id: RequestId,
        result: Result<String, String>,
    },
    /// Engine completion for a query request. `Ok` carries the answer text.
    QueryFinished {
        request_id: RequestId,
        result: Result<String, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
