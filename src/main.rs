use anyhow::Context;
use gametracker_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load GameTracker settings")?;
    gametracker_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = %settings.environment,
        backend = ?settings.database.backend,
        database = %settings.database.name,
        "gametracker bootstrap starting"
    );

    gametracker_app::run(settings).await
}
