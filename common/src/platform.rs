//! Seam between the session logic and whatever provides media streams.
//!
//! The browser client wraps `web_sys::MediaStream`/`MediaStreamTrack`; tests
//! use in-memory fakes. Handles are shared references to platform objects,
//! so mutation goes through `&self`.

/// A single video feed within a stream
pub trait TrackHandle {
    /// Device name reported by the platform
    fn label(&self) -> String;

    /// Whether frames are delivered to the sink
    fn enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// True once the track reached its terminal state
    fn ended(&self) -> bool;

    /// Transition to the terminal state. Calling it again has no effect.
    fn stop(&self);
}

/// An acquired camera stream
pub trait StreamHandle {
    type Track: TrackHandle;

    /// True while at least one underlying feed is live
    fn active(&self) -> bool;

    /// First video track of the stream, if any
    fn video_track(&self) -> Option<Self::Track>;
}
