use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use spa_host::config::{HostEnvironment, ResolveOptions};
use spa_host::lifecycle;

#[derive(Parser)]
#[command(name = "spa-host")]
#[command(about = "Host for a single-page application", long_about = None)]
struct Cli {
    /// JSON settings file.
    #[arg(short, long, default_value = "appsettings.json")]
    settings: PathBuf,

    /// Hosting environment; `Development` enables developer telemetry.
    #[arg(short, long, env = "SPAHOST_ENVIRONMENT", default_value = "Production")]
    environment: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = ResolveOptions {
        settings_path: cli.settings,
        environment: HostEnvironment::new(cli.environment),
    };

    match lifecycle::start(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("spa-host: {e}");
            ExitCode::FAILURE
        }
    }
}
