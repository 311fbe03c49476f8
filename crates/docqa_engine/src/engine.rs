use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_warn};
use thiserror::Error;

use crate::client::{DocQaService, ReqwestService, ServiceSettings};
use crate::{EngineEvent, RequestId, ServiceError};

enum EngineCommand {
    Ingest {
        request_id: RequestId,
        file_name: String,
        bytes: Arc<[u8]>,
    },
    Ask {
        request_id: RequestId,
        query: String,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to configure service client: {0}")]
    Service(#[from] ServiceError),
}

/// Runs service requests on a background tokio runtime. Commands go in through
/// [`EngineHandle::ingest`]/[`EngineHandle::ask`]; completions come back as
/// [`EngineEvent`]s in the order they finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let service = ReqwestService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn DocQaService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
            docqa_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn ingest(&self, request_id: RequestId, file_name: impl Into<String>, bytes: Arc<[u8]>) {
        self.send(EngineCommand::Ingest {
            request_id,
            file_name: file_name.into(),
            bytes,
        });
    }

    pub fn ask(&self, request_id: RequestId, query: impl Into<String>) {
        self.send(EngineCommand::Ask {
            request_id,
            query: query.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            docqa_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    service: &dyn DocQaService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Ingest {
            request_id,
            file_name,
            bytes,
        } => {
            let result = service.ingest(&file_name, &bytes).await;
            if let Err(err) = &result {
                docqa_warn!("Ingestion request {} failed: {}", request_id, err);
            }
            EngineEvent::IngestionCompleted { request_id, result }
        }
        EngineCommand::Ask { request_id, query } => {
            let result = service.ask(&query).await;
            if let Err(err) = &result {
                docqa_warn!("Query request {} failed: {}", request_id, err);
            }
            EngineEvent::QueryCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}
