use serde::Serialize;

use crate::orbit::OrbitalElements;
use crate::stream::StreamError;

/// One message on a subscriber stream, sent as a single JSON text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    #[serde(rename = "gmat_data")]
    Data {
        elements: OrbitalElements,
        /// Index of the sample in the trajectory
        timestamp: usize,
        cartesian: [f64; 6],
        total_points: usize,
    },
    Complete {
        message: String,
    },
    Error {
        message: String,
    },
}

impl Frame {
    pub fn complete(total_points: usize) -> Self {
        Frame::Complete {
            message: format!("Processed {} data points", total_points),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Frame::Error {
            message: message.into(),
        }
    }

    pub fn encode(&self) -> Result<String, StreamError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::ElementConverter;
    use serde_json::{json, Value};

    #[test]
    fn data_frame_layout() {
        let cartesian = [7000.0, 0.0, 0.0, 0.0, 7.5, 0.0];
        let elements = ElementConverter::default().convert(&cartesian).unwrap();
        let frame = Frame::Data {
            elements,
            timestamp: 3,
            cartesian,
            total_points: 10,
        };

        let value: Value = serde_json::from_str(&frame.encode().unwrap()).unwrap();
        assert_eq!(value["type"], "gmat_data");
        assert_eq!(value["timestamp"], 3);
        assert_eq!(value["total_points"], 10);
        assert_eq!(value["cartesian"], json!([7000.0, 0.0, 0.0, 0.0, 7.5, 0.0]));
        for key in ["a", "e", "i", "raan", "argp", "M0", "mass", "velocity"] {
            assert!(value["elements"].get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn terminal_frames() {
        assert_eq!(
            serde_json::to_value(Frame::complete(100)).unwrap(),
            json!({"type": "complete", "message": "Processed 100 data points"})
        );
        assert_eq!(
            serde_json::to_value(Frame::error("boom")).unwrap(),
            json!({"type": "error", "message": "boom"})
        );
    }
}
