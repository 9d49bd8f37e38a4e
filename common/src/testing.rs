//! In-memory stream and track used by the tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{StreamHandle, TrackHandle};

#[derive(Debug)]
struct TrackInner {
    label: String,
    enabled: Cell<bool>,
    ended: Cell<bool>,
    stop_calls: Cell<u32>,
}

/// Clones share state, like two JS references to one track
#[derive(Debug, Clone)]
pub struct FakeTrack(Rc<TrackInner>);

impl FakeTrack {
    pub fn new(label: &str) -> Self {
        Self(Rc::new(TrackInner {
            label: label.to_string(),
            enabled: Cell::new(true),
            ended: Cell::new(false),
            stop_calls: Cell::new(0),
        }))
    }

    /// The feed ended outside of our control (device unplugged, permission revoked)
    pub fn end(&self) {
        self.0.ended.set(true);
    }

    pub fn stop_calls(&self) -> u32 {
        self.0.stop_calls.get()
    }
}

impl TrackHandle for FakeTrack {
    fn label(&self) -> String {
        self.0.label.clone()
    }

    fn enabled(&self) -> bool {
        self.0.enabled.get()
    }

    fn set_enabled(&self, enabled: bool) {
        self.0.enabled.set(enabled);
    }

    fn ended(&self) -> bool {
        self.0.ended.get()
    }

    fn stop(&self) {
        self.0.stop_calls.set(self.0.stop_calls.get() + 1);
        self.0.ended.set(true);
    }
}

#[derive(Debug)]
struct StreamInner {
    active: Cell<bool>,
    track: Option<FakeTrack>,
}

#[derive(Debug, Clone)]
pub struct FakeStream(Rc<StreamInner>);

impl FakeStream {
    pub fn new(track: FakeTrack) -> Self {
        Self(Rc::new(StreamInner {
            active: Cell::new(true),
            track: Some(track),
        }))
    }

    pub fn without_track() -> Self {
        Self(Rc::new(StreamInner {
            active: Cell::new(true),
            track: None,
        }))
    }

    pub fn set_active(&self, active: bool) {
        self.0.active.set(active);
    }
}

impl StreamHandle for FakeStream {
    type Track = FakeTrack;

    /// A stream is only live while its track is
    fn active(&self) -> bool {
        self.0.active.get() && self.0.track.as_ref().map_or(false, |t| !t.ended())
    }

    fn video_track(&self) -> Option<FakeTrack> {
        self.0.track.clone()
    }
}
