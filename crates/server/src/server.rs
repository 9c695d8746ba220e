use std::{sync::Arc, time::Instant};

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};

use crate::{budgets, categories, health, state, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, "request");
    }
    response
}

/// All routes, mounted under `/api/v1`.
pub fn router(engine: Arc<Engine>) -> Router {
    let api = Router::new()
        .route("/health", get(health::get))
        .route("/state", get(state::get).put(state::replace))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get)
                .patch(categories::update)
                .delete(categories::delete),
        )
        .route("/budgets", get(budgets::list).put(budgets::upsert))
        .route("/budgets/{id}", axum::routing::delete(budgets::delete))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .patch(transactions::update)
                .delete(transactions::delete),
        );

    Router::new()
        .nest("/api/v1", api)
        .layer(middleware::from_fn(log_request))
        .with_state(ServerState { engine })
}

/// Binds `addr` and serves the API until the process stops.
pub async fn run(engine: Engine, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(engine))).await
}
