use crate::{ErrorKind, RequestId, SelectedDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the document to the ingestion endpoint.
    UploadDocument {
        request_id: RequestId,
        document: SelectedDocument,
    },
    /// Send the question to the query endpoint.
    SubmitQuery { request_id: RequestId, query: String },
    /// Show a blocking, dismissible notice to the user.
    ShowNotice(ErrorKind),
}
