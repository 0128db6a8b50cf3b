use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse},
};

use crate::wallet_browser::{
    app::contents,
    state::BrowserWalletState,
    types::{BrowserApiResponse, BrowserContractCall, Connection, ContractCallResponse},
};

pub(crate) async fn serve_index(
    State(state): State<Arc<BrowserWalletState>>,
) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    let page = contents::INDEX_HTML
        .replace(contents::TOKEN_PLACEHOLDER, &state.session_token())
        .replace(contents::NETWORK_PLACEHOLDER, state.network().as_str());
    (headers, Html(page))
}

pub(crate) async fn get_next_contract_call_request(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<BrowserContractCall>> {
    match state.read_next_contract_call_request() {
        Some(call) => Json(BrowserApiResponse::ok(call)),
        None => Json(BrowserApiResponse::error("No pending contract call")),
    }
}

pub(crate) async fn post_contract_call_response(
    State(state): State<Arc<BrowserWalletState>>,
    Json(body): Json<ContractCallResponse>,
) -> Json<BrowserApiResponse> {
    // Ensure that the response corresponds to a pending request.
    if !state.has_contract_call_request(&body.id) {
        return Json(BrowserApiResponse::error("Unknown contract call id"));
    }

    debug!(id = %body.id, txid = ?body.txid, error = ?body.error, "contract call response");
    state.add_contract_call_response(body);
    Json(BrowserApiResponse::ok(()))
}

pub(crate) async fn get_connection_info(
    State(state): State<Arc<BrowserWalletState>>,
) -> Json<BrowserApiResponse<Option<Connection>>> {
    Json(BrowserApiResponse::ok(state.get_connection()))
}

pub(crate) async fn post_connection_update(
    State(state): State<Arc<BrowserWalletState>>,
    Json(connection): Json<Option<Connection>>,
) -> Json<BrowserApiResponse> {
    match &connection {
        Some(conn) => info!(address = %conn.address, network = %conn.network, "wallet connected"),
        None => info!("wallet disconnected"),
    }
    state.set_connection(connection);
    Json(BrowserApiResponse::ok(()))
}
