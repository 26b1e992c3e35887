use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::{agendamentos, auth, medicos, pacientes, root, users};
use crate::state::AppState;

pub(crate) fn axum_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root::index))
        .route("/auth/token", post(auth::login))
        .nest("/users", users::router())
        .nest("/pacientes", pacientes::router())
        .nest("/medicos", medicos::router())
        .nest("/agendamentos", agendamentos::router())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}
