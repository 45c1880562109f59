use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use uuid::Uuid;

use super::error::StreamError;
use super::frame::Frame;
use super::registry::{SubscriberGuard, Subscribers};
use crate::orbit::ElementConverter;
use crate::trajectory::{Trajectory, TrajectorySource};

#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    /// Pause after each data frame
    pub frame_interval: Duration,
    /// Encoded frames buffered per subscriber before the session waits
    pub channel_capacity: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(50),
            channel_capacity: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed { frames: usize },
    Disconnected,
    Errored(String),
}

/// Receiving end of one subscriber's stream.
#[derive(Debug)]
pub struct Subscription {
    pub id: Uuid,
    /// Encoded frames in trajectory order. Dropping it ends the session.
    pub frames: mpsc::Receiver<String>,
    pub task: JoinHandle<SessionOutcome>,
}

type Latest = Arc<Mutex<Option<Arc<Trajectory>>>>;

/// Streams trajectories to any number of independent subscribers. Every
/// session loads its own trajectory from the source when it starts.
#[derive(Debug, Clone)]
pub struct StreamBridge {
    source: Arc<dyn TrajectorySource>,
    latest: Latest,
    converter: ElementConverter,
    settings: StreamSettings,
    subscribers: Subscribers,
}

impl StreamBridge {
    pub fn new(
        source: Arc<dyn TrajectorySource>,
        converter: ElementConverter,
        settings: StreamSettings,
    ) -> Self {
        Self {
            source,
            latest: Latest::default(),
            converter,
            settings,
            subscribers: Subscribers::default(),
        }
    }

    /// Most recently loaded trajectory, loading one if no session has yet.
    pub fn trajectory(&self) -> Arc<Trajectory> {
        if let Some(trajectory) = lock(&self.latest).as_ref() {
            return Arc::clone(trajectory);
        }
        reload(self.source.as_ref(), &self.latest)
    }

    pub fn active_subscribers(&self) -> usize {
        self.subscribers.len()
    }

    /// Registers a subscriber and spawns its session on the current runtime.
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        let guard = self.subscribers.register(id);
        let (tx, rx) = mpsc::channel(self.settings.channel_capacity.max(1));

        let session = StreamSession {
            id,
            source: Arc::clone(&self.source),
            latest: Arc::clone(&self.latest),
            converter: self.converter,
            frame_interval: self.settings.frame_interval,
            frames: tx,
            _guard: guard,
        };
        let task = tokio::spawn(session.run());

        Subscription {
            id,
            frames: rx,
            task,
        }
    }
}

fn lock(latest: &Latest) -> std::sync::MutexGuard<'_, Option<Arc<Trajectory>>> {
    latest.lock().unwrap_or_else(|e| e.into_inner())
}

fn reload(source: &dyn TrajectorySource, latest: &Latest) -> Arc<Trajectory> {
    let trajectory = Arc::new(source.load());
    *lock(latest) = Some(Arc::clone(&trajectory));
    trajectory
}

struct StreamSession {
    id: Uuid,
    source: Arc<dyn TrajectorySource>,
    latest: Latest,
    converter: ElementConverter,
    frame_interval: Duration,
    frames: mpsc::Sender<String>,
    _guard: SubscriberGuard,
}

impl StreamSession {
    async fn run(self) -> SessionOutcome {
        let trajectory = reload(self.source.as_ref(), &self.latest);
        let result = self.stream_trajectory(&trajectory).await;
        self.finish(result).await
    }

    async fn stream_trajectory(&self, trajectory: &Trajectory) -> Result<usize, StreamError> {
        let total_points = trajectory.len();
        if trajectory.is_empty() {
            log::warn!("Trajectory {} has no samples", trajectory.origin());
        }
        log::info!(
            "Sending {} data points to subscriber {}",
            total_points,
            self.id
        );

        let mut sent = 0;
        for (index, state) in trajectory.states().iter().enumerate() {
            let Some(elements) = self.converter.convert_state(state) else {
                log::debug!("Skipping unconvertible sample {} for {}", index, self.id);
                continue;
            };

            self.deliver(&Frame::Data {
                elements,
                timestamp: index,
                cartesian: state.to_array(),
                total_points,
            })
            .await?;
            sent += 1;

            sleep(self.frame_interval).await;
        }

        self.deliver(&Frame::complete(total_points)).await?;
        Ok(sent)
    }

    async fn finish(&self, result: Result<usize, StreamError>) -> SessionOutcome {
        match result {
            Ok(frames) => {
                log::info!("Subscriber {} completed ({} frames)", self.id, frames);
                SessionOutcome::Completed { frames }
            }
            Err(StreamError::Disconnected) => {
                log::info!("Subscriber {} disconnected", self.id);
                SessionOutcome::Disconnected
            }
            Err(e) => {
                let message = e.to_string();
                log::error!("Stream to subscriber {} failed: {}", self.id, message);
                if let Err(e) = self.deliver(&Frame::error(message.as_str())).await {
                    log::debug!("Error frame to {} not delivered: {}", self.id, e);
                }
                SessionOutcome::Errored(message)
            }
        }
    }

    async fn deliver(&self, frame: &Frame) -> Result<(), StreamError> {
        let text = frame.encode()?;
        self.frames
            .send(text)
            .await
            .map_err(|_| StreamError::Disconnected)
    }
}
