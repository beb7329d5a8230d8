use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;

use message_tracker::config::TrackerConfig;
use message_tracker::replay::replay;
use message_tracker::{MessageRecord, MessageTracker};

#[derive(Parser, Debug)]
#[command(name = "msgtrack", about = "Replay JSON tracker commands against a bounded message tracker")]
struct Args {
    /// Maximum number of messages retained. Overrides the config file.
    #[arg(long)]
    capacity: Option<usize>,
    /// TOML file with tracker settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Command file, one JSON command per line. Reads stdin when omitted.
    input: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("msgtrack error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> io::Result<()> {
    let mut config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    log::info!("msgtrack: tracking up to {} messages", config.capacity);

    let mut tracker: MessageTracker<MessageRecord> = config.build();
    let stdout = io::stdout();
    let output = stdout.lock();

    let handled = match &args.input {
        Some(path) => replay(&mut tracker, BufReader::new(File::open(path)?), output)?,
        None => replay(&mut tracker, io::stdin().lock(), output)?,
    };
    log::info!("msgtrack: {} commands, {} messages retained", handled, tracker.len());
    Ok(())
}
