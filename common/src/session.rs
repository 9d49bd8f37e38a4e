//! The camera session: current stream, error log, and the user actions.

use std::cell::RefCell;
use std::future::Future;

use crate::config::MediaConstraints;
use crate::error::{AcquireError, ControlError, ControlResult};
use crate::platform::{StreamHandle, TrackHandle};
use crate::reflector::{reflect, UiState};

/// Result of finishing an acquisition: the new UI plus any lines to append to
/// the visible error log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    pub ui: UiState,
    pub new_errors: Vec<String>,
}

/// Owns the single current stream. Every mutation ends in a fresh reflection.
pub struct CameraSession<S: StreamHandle> {
    constraints: MediaConstraints,
    stream: Option<S>,
    error_log: Vec<String>,
}

impl<S: StreamHandle> CameraSession<S> {
    pub fn new(constraints: MediaConstraints) -> Self {
        Self {
            constraints,
            stream: None,
            error_log: Vec::new(),
        }
    }

    pub fn constraints(&self) -> &MediaConstraints {
        &self.constraints
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Append-only; never cleared for the lifetime of the session
    pub fn error_log(&self) -> &[String] {
        &self.error_log
    }

    pub fn push_error(&mut self, line: impl Into<String>) {
        self.error_log.push(line.into());
    }

    pub fn ui_state(&self) -> UiState {
        reflect(self.stream.as_ref())
    }

    /// Store a successful acquisition or record a failed one, then reflect.
    ///
    /// A new stream replaces the previous handle. A failure leaves the
    /// current handle untouched.
    pub fn complete_acquisition(&mut self, result: Result<S, AcquireError>) -> Reflection {
        let mut new_errors = Vec::new();
        match result {
            Ok(stream) => {
                log::info!("Got stream with constraints: {}", self.constraints.to_json());
                if let Some(track) = stream.video_track() {
                    log::info!("Using video device: {}", track.label());
                }
                self.stream = Some(stream);
            }
            Err(err) => {
                log::error!("{} ({})", err, err.message);
                new_errors = err.user_messages(&self.constraints);
                self.error_log.extend(new_errors.iter().cloned());
            }
        }
        Reflection {
            ui: self.ui_state(),
            new_errors,
        }
    }

    /// Called when the platform reports the stream went inactive
    pub fn on_inactive(&self) -> UiState {
        log::info!("Stream inactive");
        self.ui_state()
    }

    pub fn enable(&mut self) -> ControlResult<UiState> {
        let track = self.live_track()?;
        track.set_enabled(true);
        Ok(self.ui_state())
    }

    pub fn disable(&mut self) -> ControlResult<UiState> {
        let track = self.live_track()?;
        track.set_enabled(false);
        Ok(self.ui_state())
    }

    /// Stopping is terminal. The handle is kept so the page still shows the
    /// device label, and stopping twice is harmless.
    pub fn stop(&mut self) -> ControlResult<UiState> {
        let track = self.current_track()?;
        if !track.ended() {
            track.stop();
        }
        Ok(self.ui_state())
    }

    fn current_track(&self) -> ControlResult<S::Track> {
        self.stream
            .as_ref()
            .ok_or(ControlError::NoActiveStream)?
            .video_track()
            .ok_or(ControlError::NoVideoTrack)
    }

    fn live_track(&self) -> ControlResult<S::Track> {
        let track = self.current_track()?;
        if track.ended() {
            return Err(ControlError::TrackEnded);
        }
        Ok(track)
    }
}

/// Await a stream request and fold its outcome into the session.
///
/// The session is only borrowed after the request resolves, so other handlers
/// can run while the permission prompt is open.
pub async fn acquire<S, F>(session: &RefCell<CameraSession<S>>, request: F) -> Reflection
where
    S: StreamHandle,
    F: Future<Output = Result<S, AcquireError>>,
{
    let result = request.await;
    session.borrow_mut().complete_acquisition(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeStream, FakeTrack};

    fn session() -> CameraSession<FakeStream> {
        CameraSession::new(MediaConstraints::default())
    }

    #[test]
    fn test_actions_without_stream() {
        let mut session = session();
        assert_eq!(session.enable(), Err(ControlError::NoActiveStream));
        assert_eq!(session.disable(), Err(ControlError::NoActiveStream));
        assert_eq!(session.stop(), Err(ControlError::NoActiveStream));
        assert!(session.error_log().is_empty());
    }

    #[test]
    fn test_actions_without_track() {
        let mut session = session();
        session.complete_acquisition(Ok(FakeStream::without_track()));
        assert_eq!(session.enable(), Err(ControlError::NoVideoTrack));
        assert_eq!(session.ui_state(), UiState::all_disabled());
    }

    #[test]
    fn test_enable_after_stop_is_rejected() {
        let mut session = session();
        session.complete_acquisition(Ok(FakeStream::new(FakeTrack::new("cam"))));
        session.stop().unwrap();
        assert_eq!(session.enable(), Err(ControlError::TrackEnded));
        assert_eq!(session.disable(), Err(ControlError::TrackEnded));
    }

    #[test]
    fn test_stop_twice_only_stops_once() {
        let track = FakeTrack::new("cam");
        let mut session = session();
        session.complete_acquisition(Ok(FakeStream::new(track.clone())));

        let first = session.stop().unwrap();
        let second = session.stop().unwrap();
        assert_eq!(first, second);
        assert_eq!(track.stop_calls(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_stream() {
        let mut session = session();
        session.complete_acquisition(Ok(FakeStream::new(FakeTrack::new("cam"))));
        let reflection =
            session.complete_acquisition(Err(AcquireError::new("NotReadableError", "busy")));
        assert_eq!(reflection.ui.status_text, "cam active enabled");
        assert_eq!(reflection.new_errors, vec!["getUserMedia error: NotReadableError"]);
    }

    #[test]
    fn test_error_log_is_append_only() {
        let mut session = session();
        session.complete_acquisition(Err(AcquireError::new("NotFoundError", "")));
        session.complete_acquisition(Err(AcquireError::new("AbortError", "")));
        assert_eq!(
            session.error_log(),
            &[
                "getUserMedia error: NotFoundError".to_string(),
                "getUserMedia error: AbortError".to_string(),
            ]
        );
    }
}
