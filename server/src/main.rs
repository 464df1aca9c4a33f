use anyhow::Context;
use recipe_lab_server::{api, app, config::Settings, db, telemetry, AppState};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    // A missing .env file is fine
    dotenvy::dotenv().ok();
    telemetry::init_telemetry();

    let settings = Settings::from_env().context("invalid configuration")?;
    let pool = db::create_pool(
        &settings.db.url,
        settings.db.pool_size,
        settings.db.echo,
    )
    .context("failed to set up the database")?;

    let address = settings.bind_address();
    let router = app(AppState::new(pool, settings));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
