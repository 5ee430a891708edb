use newsletter_api::{
    app::App,
    config::{get_configuration, DatabaseSettings},
    telemetry::get_subscriber,
};
use once_cell::sync::Lazy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "newsletter_api=trace,sqlx=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

pub struct TestApp {
    pub addr: String,
    pub db_pool: SqlitePool,
}

impl TestApp {
    pub async fn list_newsletters(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/newsletters", &self.addr))
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_newsletter(&self, form: &[(&str, &str)]) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/newsletters", &self.addr))
            .form(form)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get_newsletter(&self, id: i64) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/newsletters/{}", &self.addr, id))
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn patch_newsletter(&self, id: i64, form: &[(&str, &str)]) -> reqwest::Response {
        reqwest::Client::new()
            .patch(format!("{}/newsletters/{}", &self.addr, id))
            .form(form)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn delete_newsletter(&self, id: i64) -> reqwest::Response {
        reqwest::Client::new()
            .delete(format!("{}/newsletters/{}", &self.addr, id))
            .send()
            .await
            .expect("The request should succeed.")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    // A throwaway database file per test, so tests cannot see each other's rows.
    config.database.database_path = std::env::temp_dir()
        .join(format!("{}.db", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    config.database.create_if_missing = true;

    let connection_pool = configure_database(&config.database).await;
    let app = App::with(config).await;

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port()),
        db_pool: connection_pool.clone(),
    };

    let _ = tokio::spawn(async move {
        app.serve(connection_pool)
            .await
            .expect("The server should be running")
    });

    test_app
}

async fn configure_database(config: &DatabaseSettings) -> SqlitePool {
    let connection_pool = SqlitePoolOptions::new()
        .connect_with(config.connect_options())
        .await
        .expect("A sqlite connection pool should be created.");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("The migrations should run without error.");

    connection_pool
}

pub fn get_client() -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
