use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use std::sync::Arc;

use crate::{alerts, budgets, dashboard, goals, report_pdf, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Zone used for calendar-month metrics and report timestamps.
    pub timezone: Tz,
}

impl ServerState {
    pub fn new(engine: Engine, timezone: Tz) -> Self {
        Self {
            engine: Arc::new(engine),
            timezone,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Resolve Basic credentials to a user and attach it to the request.
async fn auth(
    State(state): State<ServerState>,
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if credentials.username().is_empty() || credentials.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .authenticate(credentials.username(), credentials.password())
        .await
        .map_err(|err| {
            tracing::error!("authentication lookup failed: {err}");
            StatusCode::UNAUTHORIZED
        })?;

    let Some(user) = user else {
        tracing::debug!(user = credentials.username(), "rejected credentials");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            patch(transactions::update).delete(transactions::remove),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/budgets/recompute", post(budgets::recompute))
        .route(
            "/budgets/{id}",
            patch(budgets::update).delete(budgets::remove),
        )
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}", patch(goals::update).delete(goals::remove))
        .route("/alerts", get(alerts::list))
        .route("/alerts/{id}/read", post(alerts::mark_read))
        .route("/alerts/{id}", axum::routing::delete(alerts::clear))
        .route("/summary", get(dashboard::summary))
        .route("/trends", get(dashboard::trends))
        .route("/report", get(report_pdf::download))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, timezone: Tz, address: &str) {
    let listener = match tokio::net::TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, timezone, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine, timezone))).await
}

pub fn spawn_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, timezone, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
