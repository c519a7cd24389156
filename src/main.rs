use colored::Colorize;
use log::{error, info};

use upload_smoke::api::{self, ApiClient};
use upload_smoke::utils::SmokeConfig;

// Always exits normally: the printed report is the result, not the exit status.
#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        println!("{} {:#}", "Smoke test could not start:".red(), e);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = SmokeConfig::from_env()?;
    info!(
        "base_url={} scenario={:?} timeout={:?} verify_listing={}",
        config.base_url, config.scenario, config.timeout, config.verify_listing
    );
    let submission = config.submission()?;
    let client = ApiClient::new(&config.base_url, config.timeout)?;

    let outcome = api::run_upload_smoke_test(&client, &config.credentials, &submission, config.verify_listing).await;
    outcome.print_summary();
    Ok(())
}
