use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, info};

use blackbox_core::registry::{MAX_RESULTS, ServerListResponse, search};
use blackbox_core::session::SessionRequest;

use super::state::{RecordSource, SharedRecords, SharedSessions};
use super::{ApiError, ServerConfig, ServerState, log_requests};

async fn list_servers(
    State(records): State<SharedRecords>,
) -> Result<Json<ServerListResponse>, ApiError> {
    let records = records
        .load()
        .await
        .map_err(|e| ApiError::ProcessingFailed(format!("{e:#}")))?;
    let results = search(&records, MAX_RESULTS);
    debug!("Serving {} of {} registry records", results.len(), records.len());
    Ok(Json(ServerListResponse::single_page(results)))
}

async fn create_session(
    State(sessions): State<SharedSessions>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if !body.is_empty() {
        match serde_json::from_slice::<SessionRequest>(&body) {
            Ok(request) => debug!(
                "Session requested for {} servers",
                request.mcp_server_ids.len()
            ),
            Err(e) => debug!("Ignoring unreadable session request body: {}", e),
        }
    }

    let session = sessions.create();
    let location =
        HeaderValue::from_str(&session.url).map_err(|e| ApiError::SessionFailed(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(session),
    )
        .into_response())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router = Router::new()
        .route("/servers", get(list_servers).post(list_servers))
        .route("/user", get(create_session).post(create_session))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, records: RecordSource) -> Result<()> {
    let address = config.bind_address();
    let app = make_app(ServerState::new(config, records));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    Ok(axum::serve(listener, app).await?)
}
