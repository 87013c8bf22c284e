use clap::Parser;
use sunpower_poller::poller;
use sunpower_poller::utils::config_loader;
use sunpower_poller::utils::constants::DEFAULT_CONFIG_PATH;
use sunpower_poller::utils::logging;
use anyhow::Result;
use sunpower_poller::utils::logging::LogLevel;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args
    // -------------------------------

    let args = Args::parse();

    // -------------------------------
    // 2. Load YAML config (fatal before any network call)
    // -------------------------------

    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 3. Poll once, print the reading on stdout
    // -------------------------------

    let production = poller::run(&service_config)
        .await
        .inspect_err(|err| error!("poll failed: {}", err))?;
    info!(production, "poll done");
    println!("{}", production);

    Ok(())
}
