use axum::{routing::get, Router};

use super::AppState;

pub mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/newsletters", get(route::list).post(route::create))
        .route(
            "/newsletters/:id",
            get(route::get).patch(route::update).delete(route::delete),
        )
}
