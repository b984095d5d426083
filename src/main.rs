use clap::Parser;
use safar::api::Purpose;
use safar::core::config::{self, CliOverrides};
use safar::core::state::Screen;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "safar", about = "Bus tickets and vehicle hire in your terminal")]
struct Args {
    /// Backend base URL (overrides config and SAFAR_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Screen to open first
    #[arg(short, long, value_enum)]
    screen: Option<Screen>,

    /// Which vehicles the hire screen lists
    #[arg(short, long, value_enum)]
    purpose: Option<Purpose>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to safar.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("safar.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::SafarConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        screen: args.screen,
        purpose: args.purpose,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Safar starting up (screen={:?}, purpose={:?}, signed_in={})",
        resolved.start_screen,
        resolved.vehicle_purpose,
        resolved.session.is_authenticated()
    );

    safar::tui::run(resolved)
}
