use docqa_core::{Effect, ErrorKind, Msg};
use docqa_engine::{EngineEvent, EngineHandle};
use docqa_logging::docqa_info;

/// Executes core effects against the engine and turns engine completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Dispatches requests and returns the notices the front end has to show.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<ErrorKind> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::UploadDocument {
                    request_id,
                    document,
                } => {
                    docqa_info!(
                        "UploadDocument request_id={} file_name={} bytes={}",
                        request_id,
                        document.file_name(),
                        document.bytes().len()
                    );
                    self.engine
                        .ingest(request_id, document.file_name(), document.shared_bytes());
                }
                Effect::SubmitQuery { request_id, query } => {
                    docqa_info!(
                        "SubmitQuery request_id={} query={}",
                        request_id,
                        docqa_logging::redact(&query)
                    );
                    self.engine.ask(request_id, query);
                }
                Effect::ShowNotice(kind) => {
                    docqa_info!("Notice {:?}", kind);
                    notices.push(kind);
                }
            }
        }
        notices
    }

    /// Drains finished requests without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IngestionCompleted { request_id, result } => Msg::IngestionFinished {
            request_id,
            result: result
                .map(|receipt| receipt.message)
                .map_err(|err| err.to_string()),
        },
        EngineEvent::QueryCompleted { request_id, result } => Msg::QueryFinished {
            request_id,
            result: result
                .map(|answer| answer.text)
                .map_err(|err| err.to_string()),
        },
    }
}
