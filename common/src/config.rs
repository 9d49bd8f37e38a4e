//! Configuration for the camera demo.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration handed to the client at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Constraints passed verbatim to getUserMedia
    #[serde(default)]
    pub constraints: MediaConstraints,

    /// DOM element lookups
    #[serde(default)]
    pub elements: ElementSelectors,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            constraints: MediaConstraints::default(),
            elements: ElementSelectors::default(),
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constraints.validate()
    }
}

/// Media constraints in the shape getUserMedia accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaConstraints {
    #[serde(default)]
    pub audio: bool,

    #[serde(default)]
    pub video: VideoConstraints,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: false,
            video: VideoConstraints::default(),
        }
    }
}

impl MediaConstraints {
    /// Exact resolution requested from the device, if any
    pub fn exact_resolution(&self) -> Option<(u32, u32)> {
        match &self.video {
            VideoConstraints::Enabled(_) => None,
            VideoConstraints::Resolution { width, height } => Some((width.exact, height.exact)),
        }
    }

    /// Compact JSON form, as logged on acquisition
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.video {
            VideoConstraints::Enabled(false) => Err(ConfigError::VideoNotRequested),
            VideoConstraints::Resolution { width, height } if width.exact == 0 || height.exact == 0 => {
                Err(ConfigError::ZeroDimension {
                    width: width.exact,
                    height: height.exact,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Either "any camera" (`true`) or an exact resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoConstraints {
    Enabled(bool),
    Resolution { width: Exact, height: Exact },
}

impl Default for VideoConstraints {
    fn default() -> Self {
        VideoConstraints::Enabled(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exact {
    pub exact: u32,
}

/// CSS selectors for the page elements the demo drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSelectors {
    #[serde(default = "default_error_log")]
    pub error_log: String,
    #[serde(default = "default_acquire_button")]
    pub acquire_button: String,
    #[serde(default = "default_disable_button")]
    pub disable_button: String,
    #[serde(default = "default_enable_button")]
    pub enable_button: String,
    #[serde(default = "default_stop_button")]
    pub stop_button: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_video")]
    pub video: String,
}

fn default_error_log() -> String {
    "#errorMsg".to_string()
}

fn default_acquire_button() -> String {
    "#getUserMedia".to_string()
}

fn default_disable_button() -> String {
    "#disable".to_string()
}

fn default_enable_button() -> String {
    "#enable".to_string()
}

fn default_stop_button() -> String {
    "#stop".to_string()
}

fn default_status() -> String {
    "#status".to_string()
}

fn default_video() -> String {
    "video".to_string()
}

impl Default for ElementSelectors {
    fn default() -> Self {
        Self {
            error_log: default_error_log(),
            acquire_button: default_acquire_button(),
            disable_button: default_disable_button(),
            enable_button: default_enable_button(),
            stop_button: default_stop_button(),
            status: default_status(),
            video: default_video(),
        }
    }
}
