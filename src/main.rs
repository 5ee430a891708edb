use anyhow::Context;
use newsletter_api::{app::App, config::get_configuration, telemetry::get_subscriber};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().expect("Failed to read configuration.");

    get_subscriber(&config.log_level, std::io::stderr).init();

    let db = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(config.database.connect_options())
        .await
        .context("Could not connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Could not migrate the database")?;

    let app = App::with(config).await;

    tracing::info!(port = app.port(), "starting server");
    app.serve(db).await.context("The server should be running")?;

    Ok(())
}
