use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::orbit::OrbitalElements;
use crate::poll::{
    ControlResponse, ControlStatus, DataResponse, OrbitKind, OrbitSnapshot, PausedPayload,
    StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::poll::gmat_data,
        super::api::poll::control,
        super::api::poll::status,
    ),
    components(
        schemas(
            DataResponse,
            OrbitSnapshot,
            PausedPayload,
            OrbitalElements,
            OrbitKind,
            ControlResponse,
            ControlStatus,
            StatusResponse,
            ErrorResponse,
        )
    ),
    info(
        title = "GMAT Bridge Poll API",
        description = "Synthetic orbital elements for the visualization client",
        version = "0.1.0"
    ),
    tags(
        (name = "poll", description = "Simulation data and control")
    )
)]
pub struct ApiDoc;
