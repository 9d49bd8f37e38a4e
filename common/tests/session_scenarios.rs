//! End-to-end session scenarios: acquire, toggle, stop, and failure recovery.

use std::cell::RefCell;

use common::testing::{FakeStream, FakeTrack};
use common::{
    acquire, AcquireError, CameraSession, MediaConstraints, StreamHandle, TrackHandle, UiState,
    PERMISSION_DENIED_MESSAGE,
};
use futures::executor::block_on;
use futures::future;

fn new_session() -> RefCell<CameraSession<FakeStream>> {
    RefCell::new(CameraSession::new(MediaConstraints::default()))
}

#[test]
fn test_initial_state_all_disabled() {
    let session = new_session();
    assert_eq!(session.borrow().ui_state(), UiState::all_disabled());
}

#[test]
fn test_successful_acquisition() {
    let session = new_session();
    let stream = FakeStream::new(FakeTrack::new("Cam1"));

    let reflection = block_on(acquire(&session, future::ready(Ok(stream))));

    assert!(reflection.new_errors.is_empty());
    assert!(reflection.ui.disable_button_enabled);
    assert!(!reflection.ui.enable_button_enabled);
    assert!(reflection.ui.stop_button_enabled);
    assert_eq!(reflection.ui.status_text, "Cam1 active enabled");
}

#[test]
fn test_permission_denied_falls_back_to_disabled() {
    let session = new_session();
    let err = AcquireError::new("NotAllowedError", "Permission denied");

    let reflection = block_on(acquire(&session, future::ready(Err(err))));

    assert_eq!(reflection.ui, UiState::all_disabled());
    let session = session.borrow();
    let count = session
        .error_log()
        .iter()
        .filter(|line| line.as_str() == PERMISSION_DENIED_MESSAGE)
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_enable_disable_stop_sequence() {
    let session = new_session();
    let track = FakeTrack::new("Cam1");
    block_on(acquire(&session, future::ready(Ok(FakeStream::new(track.clone())))));

    let mut session = session.borrow_mut();
    let state = session.enable().unwrap();
    assert!(state.status_text.ends_with("enabled"));

    let state = session.disable().unwrap();
    assert!(state.status_text.ends_with("disabled"));
    assert!(state.enable_button_enabled);

    let state = session.stop().unwrap();
    assert!(state.stop_button_enabled);
    assert_eq!(state.status_text, "Cam1 inactive disabled");
    assert_eq!(track.stop_calls(), 1);
}

#[test]
fn test_device_loss_reflects_inactive() {
    let session = new_session();
    let track = FakeTrack::new("Cam1");
    block_on(acquire(&session, future::ready(Ok(FakeStream::new(track.clone())))));

    track.end();

    let state = session.borrow().on_inactive();
    assert_eq!(state.status_text, "Cam1 inactive enabled");
    assert!(state.stop_button_enabled);
}

#[test]
fn test_reacquisition_replaces_stream() {
    let session = new_session();
    let first = FakeTrack::new("Cam1");
    block_on(acquire(&session, future::ready(Ok(FakeStream::new(first.clone())))));
    session.borrow_mut().stop().unwrap();

    let reflection = block_on(acquire(
        &session,
        future::ready(Ok(FakeStream::new(FakeTrack::new("Cam2")))),
    ));

    assert_eq!(reflection.ui.status_text, "Cam2 active enabled");
    let current = session.borrow().stream().and_then(|s| s.video_track()).map(|t| t.label());
    assert_eq!(current.as_deref(), Some("Cam2"));
    assert!(session.borrow_mut().disable().is_ok());
    assert!(first.ended());
    assert_eq!(first.stop_calls(), 1);
}
