use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use docqa_core::{update, AppState, IngestionState, Msg, QueryState, SelectedDocument};
use docqa_engine::{load_document, matches_accept_hint, EngineHandle, ServiceSettings, ACCEPTED_EXTENSIONS};
use docqa_logging::{docqa_info, docqa_warn};

use super::commands::{parse_command, Command, HELP};
use super::effects::EffectRunner;
use super::render::{render, render_notice, PROMPT};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Input {
    Line(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app(settings: ServiceSettings) -> anyhow::Result<()> {
    docqa_info!("Starting docqa against {}", settings.base_url);
    let engine = EngineHandle::new(settings)?;

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    // Stdin blocks, so it gets its own reader thread; all state stays on this one.
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });

    let mut app = App::new(EffectRunner::new(engine), io::stdout());
    app.start()?;

    let mut input_closed = false;
    loop {
        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => {
                if app.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => input_closed = true,
            Err(RecvTimeoutError::Timeout) => {}
        }
        app.poll_engine()?;
        // Piped input: let requests already sent finish before exiting.
        if input_closed && !app.has_pending_requests() {
            break;
        }
    }

    docqa_info!("docqa exiting");
    Ok(())
}

struct App<W: Write> {
    state: AppState,
    effects: EffectRunner,
    out: W,
    awaiting_dismiss: bool,
}

impl<W: Write> App<W> {
    fn new(effects: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            effects,
            out,
            awaiting_dismiss: false,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        self.print_lines(HELP.iter().map(|line| line.to_string()))?;
        self.print_lines(render(&self.state.view()))?;
        self.prompt()
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if self.awaiting_dismiss {
            self.awaiting_dismiss = false;
            self.prompt()?;
            return Ok(Flow::Continue);
        }

        match parse_command(line) {
            Command::Open(None) => self.dispatch([Msg::DocumentSelected(None)])?,
            Command::Open(Some(path)) => match load_document(&path) {
                Ok(file) => {
                    if !matches_accept_hint(&file.file_name) {
                        docqa_warn!(
                            "{} is not one of {:?}; uploading anyway",
                            file.file_name,
                            ACCEPTED_EXTENSIONS
                        );
                    }
                    let document = SelectedDocument::new(file.file_name, file.bytes);
                    self.dispatch([Msg::DocumentSelected(Some(document))])?;
                }
                Err(err) => {
                    docqa_warn!("Open failed: {}", err);
                    self.print_lines([format!("Could not open document: {err}")])?;
                }
            },
            Command::Upload => self.dispatch([Msg::UploadClicked])?,
            Command::Question(text) => self.dispatch([Msg::QueryTextChanged(text)])?,
            Command::Ask(Some(text)) => {
                self.dispatch([Msg::QueryTextChanged(text), Msg::AskClicked])?
            }
            Command::Ask(None) => self.dispatch([Msg::AskClicked])?,
            Command::Status => self.print_lines(render(&self.state.view()))?,
            Command::Help => self.print_lines(HELP.iter().map(|line| line.to_string()))?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Unknown(word) => {
                self.print_lines([format!("Unknown command `{word}`; type `help`.")])?
            }
        }

        if !self.awaiting_dismiss {
            self.prompt()?;
        }
        Ok(Flow::Continue)
    }

    fn poll_engine(&mut self) -> io::Result<()> {
        let msgs = self.effects.poll();
        if msgs.is_empty() {
            return Ok(());
        }
        self.dispatch(msgs)?;
        if !self.awaiting_dismiss {
            self.prompt()?;
        }
        Ok(())
    }

    fn has_pending_requests(&self) -> bool {
        self.state.ingestion() == IngestionState::InProgress
            || self.state.query() == QueryState::InProgress
    }

    /// Applies messages in order, runs their effects, then renders once.
    fn dispatch(&mut self, msgs: impl IntoIterator<Item = Msg>) -> io::Result<()> {
        let mut notices = Vec::new();
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            notices.extend(self.effects.run(effects));
        }

        if self.state.consume_dirty() {
            self.print_lines(render(&self.state.view()))?;
        }
        for kind in notices {
            self.print_lines(render_notice(kind))?;
            self.awaiting_dismiss = true;
        }
        Ok(())
    }

    fn print_lines(&mut self, lines: impl IntoIterator<Item = String>) -> io::Result<()> {
        writeln!(self.out)?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}
