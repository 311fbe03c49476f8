use std::fmt;
use std::sync::Arc;

use crate::view_model::AppViewModel;

pub type RequestId = u64;

/// A user-chosen file: raw payload plus the name it is uploaded under.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    file_name: String,
    bytes: Arc<[u8]>,
}

impl SelectedDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The payload as a shared handle, for handing to another thread without copying.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl fmt::Debug for SelectedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedDocument")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestionState {
    #[default]
    NotStarted,
    InProgress,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    document: Option<SelectedDocument>,
    ingestion: IngestionState,
    status_message: Option<String>,
    query_text: String,
    query: QueryState,
    answer: Option<String>,
    in_flight_upload: Option<RequestId>,
    in_flight_query: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The single gate between the two machines: querying needs a successful ingestion.
    pub fn document_ready(&self) -> bool {
        self.ingestion == IngestionState::Succeeded
    }

    pub fn document(&self) -> Option<&SelectedDocument> {
        self.document.as_ref()
    }

    pub fn ingestion(&self) -> IngestionState {
        self.ingestion
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn query(&self) -> QueryState {
        self.query
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub(crate) fn select_document(&mut self, document: Option<SelectedDocument>) {
        self.document = document;
        self.dirty = true;
    }

    pub(crate) fn set_query_text(&mut self, text: String) {
        if self.query_text != text {
            self.query_text = text;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.ingestion = IngestionState::InProgress;
        self.in_flight_upload = Some(request_id);
        self.dirty = true;
        request_id
    }

    pub(crate) fn begin_query(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.query = QueryState::InProgress;
        self.in_flight_query = Some(request_id);
        self.dirty = true;
        request_id
    }

    /// Settles the in-flight upload and returns whether it succeeded. Returns
    /// `None`, leaving state untouched, when `request_id` is not the upload in flight.
    pub(crate) fn finish_upload(
        &mut self,
        request_id: RequestId,
        result: Result<String, String>,
    ) -> Option<bool> {
        if self.in_flight_upload != Some(request_id) {
            return None;
        }
        self.in_flight_upload = None;
        self.dirty = true;
        match result {
            Ok(message) => {
                self.ingestion = IngestionState::Succeeded;
                self.status_message = Some(message);
                Some(true)
            }
            Err(_) => {
                self.ingestion = IngestionState::Failed;
                Some(false)
            }
        }
    }

    /// Settles the in-flight query; same contract as [`AppState::finish_upload`].
    pub(crate) fn finish_query(
        &mut self,
        request_id: RequestId,
        result: Result<String, String>,
    ) -> Option<bool> {
        if self.in_flight_query != Some(request_id) {
            return None;
        }
        self.in_flight_query = None;
        self.dirty = true;
        match result {
            Ok(answer) => {
                self.query = QueryState::Succeeded;
                self.answer = Some(answer);
                Some(true)
            }
            Err(_) => {
                self.query = QueryState::Failed;
                Some(false)
            }
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }
}
