use anyhow::Context;

use fp_pipeline::{LogNotifier, Workflow};
use fp_types::{AlertConfig, PipelineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = config_from_env()?;
    let workflow = Workflow::new(LogNotifier);
    let report = workflow.run(config).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn config_from_env() -> anyhow::Result<PipelineConfig> {
    let data_path = std::env::var("FACTORYPULSE_DATA_PATH")
        .context("FACTORYPULSE_DATA_PATH not set")?;
    let monthly_target: f64 = std::env::var("FACTORYPULSE_MONTHLY_TARGET")
        .context("FACTORYPULSE_MONTHLY_TARGET not set")?
        .parse()
        .context("FACTORYPULSE_MONTHLY_TARGET is not a number")?;
    let forecast_days: u32 = std::env::var("FACTORYPULSE_FORECAST_DAYS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .context("FACTORYPULSE_FORECAST_DAYS is not an integer")?;

    let alert = AlertConfig {
        sender: std::env::var("FACTORYPULSE_ALERT_SENDER")
            .unwrap_or_else(|_| "factorypulse@localhost".to_string()),
        sender_secret: std::env::var("FACTORYPULSE_ALERT_SECRET").unwrap_or_default(),
        recipient: std::env::var("FACTORYPULSE_ALERT_RECIPIENT")
            .unwrap_or_else(|_| "ops@localhost".to_string()),
    };

    Ok(PipelineConfig {
        data_path: data_path.into(),
        monthly_target,
        forecast_days,
        alert,
    })
}
