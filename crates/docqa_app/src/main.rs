mod platform;

use std::time::Duration;

use clap::Parser;
use docqa_engine::{ServiceSettings, DEFAULT_BASE_URL};

use platform::logging::{self, LogDestination};

/// Upload a document to the DocQA service and ask questions about it.
#[derive(Parser, Debug)]
#[command(name = "docqa")]
struct Args {
    /// Base address of the ingestion/query service.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Give up on a request after this many seconds. Waits indefinitely when unset.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);

    let settings = ServiceSettings {
        base_url: args.base_url,
        request_timeout: args.timeout_secs.map(Duration::from_secs),
        ..ServiceSettings::default()
    };
    platform::run_app(settings)
}
