use std::path::PathBuf;

pub const HELP: &[&str] = &[
    "Commands:",
    "  open <path>       select a document (plain `open` clears the selection)",
    "  upload            upload the selected document",
    "  question <text>   set the question",
    "  ask [text]        ask the current question, or set and ask <text>",
    "  status            show the current state",
    "  help              show this help",
    "  quit              exit",
];

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Option<PathBuf>),
    Upload,
    Question(String),
    Ask(Option<String>),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_ascii_lowercase().as_str() {
        "open" => Command::Open(argument.map(PathBuf::from)),
        "upload" => Command::Upload,
        "question" | "q" => Command::Question(rest.to_string()),
        "ask" => Command::Ask(argument),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}
