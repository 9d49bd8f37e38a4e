//! Maps the current stream onto button enablement and a status line.

use crate::platform::{StreamHandle, TrackHandle};

/// Everything the page shows about the stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub disable_button_enabled: bool,
    pub enable_button_enabled: bool,
    pub stop_button_enabled: bool,
    pub status_text: String,
}

impl UiState {
    /// Initial state, and the state after a failed acquisition
    pub fn all_disabled() -> Self {
        Self::default()
    }
}

/// Derive the UI from an optional stream. Pure and idempotent.
pub fn reflect<S: StreamHandle>(stream: Option<&S>) -> UiState {
    let (stream, track) = match stream.and_then(|s| s.video_track().map(|t| (s, t))) {
        Some(pair) => pair,
        None => return UiState::all_disabled(),
    };

    let enabled = track.enabled();
    let status_text = format!(
        "{} {} {}",
        track.label(),
        if stream.active() { "active" } else { "inactive" },
        if enabled { "enabled" } else { "disabled" },
    );

    UiState {
        disable_button_enabled: enabled,
        enable_button_enabled: !enabled,
        stop_button_enabled: true,
        status_text,
    }
}
