use std::sync::Arc;
use tokio::sync::Mutex;

use crate::poll::PollSession;
use crate::stream::StreamBridge;

use super::config::Config;

#[derive(Clone)]
pub struct PollState {
    /// Held for the whole request so counter updates never interleave.
    pub session: Arc<Mutex<PollSession>>,
}

impl PollState {
    pub fn new(config: &Config) -> Self {
        PollState {
            session: Arc::new(Mutex::new(PollSession::new(config.generator()))),
        }
    }
}

#[derive(Clone)]
pub struct StreamState {
    pub bridge: StreamBridge,
}
