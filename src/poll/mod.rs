mod generator;
mod session;
mod types;

pub use generator::{OrbitGenerator, OrbitKind};
pub use session::PollSession;
pub use types::{
    ControlCommand, ControlResponse, ControlStatus, DataResponse, OrbitSnapshot, PausedPayload,
    StatusResponse,
};
