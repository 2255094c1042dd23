use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use dialer::core::config::{self, CliOverrides};
use dialer::voice::build_provider;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "dialer", about = "Place and review AI voice calls from the terminal")]
struct Args {
    /// Assistant that handles the call (overrides config and VAPI_ASSISTANT_ID)
    #[arg(long)]
    assistant_id: Option<String>,

    /// Caller phone number id (overrides config and VAPI_PHONE_NUMBER_ID)
    #[arg(long)]
    phone_number_id: Option<String>,

    /// Place one call to NUMBER without the TUI, then exit
    #[arg(long, value_name = "NUMBER")]
    dial: Option<String>,

    /// Don't fetch call history at startup
    #[arg(long)]
    no_history: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to dialer.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("dialer.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let cli = CliOverrides {
        assistant_id: args.assistant_id.as_deref(),
        phone_number_id: args.phone_number_id.as_deref(),
        no_history: args.no_history,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("Dialer starting up with config: {:?}", resolved);

    let provider = match build_provider(&resolved) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(number) = args.dial.as_deref() {
        return dialer::headless::run(&resolved, provider, number).await;
    }

    match dialer::tui::run(resolved, provider) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("TUI error: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
