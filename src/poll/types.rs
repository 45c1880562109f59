use serde::Serialize;
use utoipa::ToSchema;

use super::generator::OrbitKind;
use crate::orbit::OrbitalElements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Reset,
    Unknown(String),
}

impl From<&str> for ControlCommand {
    fn from(value: &str) -> Self {
        match value {
            "start" => ControlCommand::Start,
            "stop" => ControlCommand::Stop,
            "reset" => ControlCommand::Reset,
            other => ControlCommand::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    Started,
    Stopped,
    Reset,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ControlResponse {
    pub status: ControlStatus,
    pub message: String,
}

impl ControlResponse {
    pub fn new(status: ControlStatus, message: &str) -> Self {
        ControlResponse {
            status,
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ControlStatus::Error
    }
}

/// Synthetic orbit served while the simulation is active
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrbitSnapshot {
    #[serde(flatten)]
    pub elements: OrbitalElements,
    pub orbit_type: OrbitKind,
    /// Height of the semi-major axis above the surface (km)
    pub altitude: f64,
    pub period_hours: f64,
    pub counter: u64,
    /// Server time, seconds since the Unix epoch
    pub timestamp: f64,
    pub simulation_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PausedPayload {
    pub simulation_active: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DataResponse {
    Paused(PausedPayload),
    Active(OrbitSnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusResponse {
    pub simulation_active: bool,
    pub counter: u64,
    pub clients_served: u64,
    pub server_time: f64,
}
