use anyhow::Context;
use playground_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load playground settings")?;
    playground_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "playground-app bootstrap starting"
    );

    playground_app::run(settings).await
}
