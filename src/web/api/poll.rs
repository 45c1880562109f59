use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::poll::{ControlCommand, ControlResponse, DataResponse, StatusResponse};
use crate::web::state::PollState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ControlQuery {
    /// One of `start`, `stop` or `reset`
    #[serde(default)]
    pub command: String,
}

#[utoipa::path(
    get,
    path = "/gmat-data",
    tag = "poll",
    responses(
        (status = 200, description = "Next synthetic orbit, or a paused notice", body = DataResponse)
    )
)]
pub async fn gmat_data(State(state): State<PollState>) -> impl IntoResponse {
    let data = state.session.lock().await.get_data();
    ([(header::CACHE_CONTROL, "no-cache")], Json(data))
}

#[utoipa::path(
    get,
    path = "/control",
    tag = "poll",
    params(ControlQuery),
    responses(
        (status = 200, description = "Command result; unknown commands report status `error`", body = ControlResponse)
    )
)]
pub async fn control(
    State(state): State<PollState>,
    Query(query): Query<ControlQuery>,
) -> Json<ControlResponse> {
    let command = ControlCommand::from(query.command.as_str());
    let response = state.session.lock().await.control(&command);
    if !response.is_error() {
        log::info!("Control command {:?}: {}", command, response.message);
    }
    Json(response)
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "poll",
    responses(
        (status = 200, description = "Simulation state", body = StatusResponse)
    )
)]
pub async fn status(State(state): State<PollState>) -> Json<StatusResponse> {
    Json(state.session.lock().await.status())
}
