use std::{io, net::IpAddr};

use axum::{http::Request, Router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;

mod error;
mod health;
mod home;
mod newsletter;

#[derive(Clone)]
pub struct AppState {
    db: SqlitePool,
}

fn app_router() -> Router<AppState> {
    health::router()
        .merge(home::router())
        .merge(newsletter::router())
}

pub struct App {
    listener: TcpListener,
}

impl App {
    pub async fn with(config: Settings) -> Self {
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .expect("The listener should be able to bind the address.");

        Self { listener }
    }

    pub fn host(&self) -> IpAddr {
        self.listener.local_addr().unwrap().ip()
    }

    pub fn port(&self) -> u16 {
        self.listener.local_addr().unwrap().port()
    }

    pub async fn serve(self, db: SqlitePool) -> Result<(), io::Error> {
        let app = app_router().with_state(AppState { db }).layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "request",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    %id,
                )
            }),
        );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
