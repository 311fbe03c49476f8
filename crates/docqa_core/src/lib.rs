//! DocQA core: pure interaction state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::ErrorKind;
pub use msg::Msg;
pub use state::{AppState, IngestionState, QueryState, RequestId, SelectedDocument};
pub use update::update;
pub use view_model::{AppViewModel, ASK_LABEL, ASK_LABEL_BUSY, UPLOAD_LABEL, UPLOAD_LABEL_BUSY};
