use chrono::Utc;

use super::generator::OrbitGenerator;
use super::types::{
    ControlCommand, ControlResponse, ControlStatus, DataResponse, PausedPayload, StatusResponse,
};

/// Server-scoped simulation state behind the poll endpoints.
///
/// `counter` advances by one per data request while active and only goes
/// back to zero on `reset`. Callers serialize access (one request at a time).
#[derive(Debug, Clone)]
pub struct PollSession {
    counter: u64,
    active: bool,
    generator: OrbitGenerator,
}

impl PollSession {
    pub fn new(generator: OrbitGenerator) -> Self {
        Self {
            counter: 0,
            active: true,
            generator,
        }
    }

    pub fn get_data(&mut self) -> DataResponse {
        if !self.active {
            return DataResponse::Paused(PausedPayload {
                simulation_active: false,
                message: "GMAT simulation is paused".to_string(),
            });
        }

        self.counter += 1;
        if OrbitGenerator::phase(self.counter) != OrbitGenerator::phase(self.counter - 1)
            || self.counter == 1
        {
            log::info!(
                "Counter {}: serving {}",
                self.counter,
                self.generator.kind(self.counter)
            );
        }
        DataResponse::Active(self.generator.snapshot(self.counter, unix_seconds()))
    }

    pub fn control(&mut self, command: &ControlCommand) -> ControlResponse {
        match command {
            ControlCommand::Start => {
                self.active = true;
                ControlResponse::new(ControlStatus::Started, "GMAT simulation started")
            }
            ControlCommand::Stop => {
                self.active = false;
                ControlResponse::new(ControlStatus::Stopped, "GMAT simulation stopped")
            }
            ControlCommand::Reset => {
                self.counter = 0;
                ControlResponse::new(ControlStatus::Reset, "Counter reset")
            }
            ControlCommand::Unknown(name) => {
                log::warn!("Unknown control command {:?}", name);
                ControlResponse::new(ControlStatus::Error, "Unknown command")
            }
        }
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            simulation_active: self.active,
            counter: self.counter,
            clients_served: self.counter,
            server_time: unix_seconds(),
        }
    }
}

fn unix_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}
