mod bridge;
mod error;
mod frame;
mod registry;

pub use bridge::{StreamBridge, StreamSettings, Subscription};
pub use error::StreamError;
pub use frame::Frame;
