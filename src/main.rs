use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use medimod::core::config;
use medimod::core::upload;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "medimod", about = "Summarize, store, and discuss medical records")]
struct Args {
    /// Summary service base URL (overrides config and MEDIMOD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Text file to preload into the upload form
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to medimod.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("medimod.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{}; falling back to defaults", e);
        config::MedimodConfig::default()
    });
    let resolved = config::resolve(&file_config, args.api_url.as_deref());
    info!(
        "MediMod starting up against {} (gateway {})",
        resolved.api_base_url, resolved.gateway_url
    );

    let initial_text = match args.file {
        Some(path) => match upload::read_text_file(&path, resolved.max_file_bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                error!("{}", e);
                eprintln!("medimod: {e}");
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
            }
        },
        None => None,
    };

    medimod::tui::run(resolved, initial_text)
}
