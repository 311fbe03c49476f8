//! DocQA engine: HTTP access to the document service and effect execution.
mod client;
mod decode;
mod document;
mod engine;
mod types;

pub use client::{DocQaService, ReqwestService, ServiceSettings, DEFAULT_BASE_URL};
pub use decode::{decode_answer_response, decode_error_detail, decode_ingest_response};
pub use document::{load_document, matches_accept_hint, DocumentError, DocumentFile, ACCEPTED_EXTENSIONS};
pub use engine::{EngineError, EngineHandle};
pub use types::{Answer, EngineEvent, FailureKind, IngestReceipt, RequestId, ServiceError};
