/// User-facing failures. `Display` is the notice text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Please select a file!")]
    NoDocumentSelected,
    #[error("Upload failed")]
    UploadFailed,
    #[error("Please upload a document first.")]
    DocumentNotReady,
    #[error("Please enter a question")]
    EmptyQuery,
    #[error("Failed to get response")]
    QueryFailed,
    #[error("A request is already in progress")]
    RequestInProgress,
}
