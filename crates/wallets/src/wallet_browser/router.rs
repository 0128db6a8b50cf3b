use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
};

use crate::wallet_browser::{handlers, state::BrowserWalletState};

/// Header carrying the per-server session token.
pub(crate) const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

pub(crate) fn build_router(state: Arc<BrowserWalletState>) -> Router {
    let api = Router::new()
        .route("/contract-call/request", get(handlers::get_next_contract_call_request))
        .route(
            "/contract-call/response",
            axum::routing::post(handlers::post_contract_call_response),
        )
        .route(
            "/connection",
            get(handlers::get_connection_info).post(handlers::post_connection_update),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session_token))
        .with_state(state.clone());

    Router::new().route("/", get(handlers::serve_index)).nest("/api", api).with_state(state)
}

async fn require_session_token(
    State(state): State<Arc<BrowserWalletState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = state.session_token();
    let ok = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected.as_str());

    if !ok {
        debug!(path = %req.uri().path(), "rejected request without a valid session token");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
