//! Error types for camera acquisition and track control.

use thiserror::Error;

use crate::config::MediaConstraints;

/// Failure reported by getUserMedia, carried as the DOMException name/message pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("getUserMedia error: {name}")]
pub struct AcquireError {
    pub name: String,
    pub message: String,
}

/// Category of an acquisition failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireErrorKind {
    /// Requested constraints exceed what the device can deliver
    ConstraintNotSatisfiable,
    /// The user or the system refused camera access
    PermissionDenied,
    Other,
}

impl AcquireError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Browsers report both the legacy and the current exception names
    pub fn kind(&self) -> AcquireErrorKind {
        match self.name.as_str() {
            "ConstraintNotSatisfiedError" | "OverconstrainedError" => {
                AcquireErrorKind::ConstraintNotSatisfiable
            }
            "PermissionDeniedError" | "NotAllowedError" => AcquireErrorKind::PermissionDenied,
            _ => AcquireErrorKind::Other,
        }
    }

    /// Lines appended to the visible error log for this failure.
    ///
    /// A category-specific explanation comes first when one exists; the
    /// generic `getUserMedia error: <name>` line is always last.
    pub fn user_messages(&self, constraints: &MediaConstraints) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        match self.kind() {
            AcquireErrorKind::ConstraintNotSatisfiable => {
                lines.push(match constraints.exact_resolution() {
                    Some((width, height)) => format!(
                        "The resolution {}x{} px is not supported by your device.",
                        width, height
                    ),
                    None => "The requested resolution is not supported by your device.".to_string(),
                });
            }
            AcquireErrorKind::PermissionDenied => {
                lines.push(PERMISSION_DENIED_MESSAGE.to_string());
            }
            AcquireErrorKind::Other => {}
        }
        lines.push(self.to_string());
        lines
    }
}

pub const PERMISSION_DENIED_MESSAGE: &str = "Permissions have not been granted to use your camera and \
microphone, you need to allow the page access to your devices in order for the demo to work.";

/// Errors from the enable/disable/stop actions
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    #[error("No active stream: acquire the camera first")]
    NoActiveStream,

    #[error("Stream has no video track")]
    NoVideoTrack,

    #[error("Video track has ended")]
    TrackEnded,
}

/// Invalid demo configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Video must be requested")]
    VideoNotRequested,

    #[error("Invalid exact resolution {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// Result type for track control
pub type ControlResult<T> = std::result::Result<T, ControlError>;
