use common::{AcquireError, MediaConstraints, StreamHandle, TrackHandle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState};

/// A `MediaStream` as seen by the session
#[derive(Clone)]
pub struct BrowserStream(MediaStream);

impl BrowserStream {
    pub fn new(stream: MediaStream) -> Self {
        Self(stream)
    }
}

impl StreamHandle for BrowserStream {
    type Track = BrowserTrack;

    fn active(&self) -> bool {
        self.0.active()
    }

    fn video_track(&self) -> Option<BrowserTrack> {
        first_video_track(&self.0).map(BrowserTrack)
    }
}

#[derive(Clone)]
pub struct BrowserTrack(MediaStreamTrack);

impl TrackHandle for BrowserTrack {
    fn label(&self) -> String {
        self.0.label()
    }

    fn enabled(&self) -> bool {
        self.0.enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.0.set_enabled(enabled);
    }

    fn ended(&self) -> bool {
        self.0.ready_state() == MediaStreamTrackState::Ended
    }

    fn stop(&self) {
        self.0.stop();
    }
}

fn first_video_track(stream: &MediaStream) -> Option<MediaStreamTrack> {
    let tracks = stream.get_video_tracks();
    if tracks.length() > 0 {
        Some(MediaStreamTrack::from(tracks.get(0)))
    } else {
        None
    }
}

/// Ask the browser for a camera stream.
///
/// Failures before the promise exists (no window, no mediaDevices, bad
/// constraints) are reported the same way as a rejected promise.
pub async fn get_camera_stream(constraints: &MediaConstraints) -> Result<MediaStream, AcquireError> {
    let window = web_sys::window().ok_or_else(|| not_supported("No window"))?;
    let media_devices = window.navigator().media_devices().map_err(acquire_error_from_js)?;

    let constraints_js = serde_wasm_bindgen::to_value(constraints)
        .map_err(|e| AcquireError::new("TypeError", e.to_string()))?;
    let constraints: MediaStreamConstraints = constraints_js.unchecked_into();

    let promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(acquire_error_from_js)?;
    let stream_js = JsFuture::from(promise).await.map_err(acquire_error_from_js)?;
    Ok(MediaStream::from(stream_js))
}

/// Invoke `callback` when the stream goes inactive or its video track ends
/// on its own (device unplugged, permission revoked).
pub fn add_inactive_listener(stream: &MediaStream, callback: Box<dyn Fn()>) -> Result<(), JsValue> {
    let closure = Closure::wrap(callback as Box<dyn Fn()>);
    stream.add_event_listener_with_callback("inactive", closure.as_ref().unchecked_ref())?;
    if let Some(track) = first_video_track(stream) {
        track.add_event_listener_with_callback("ended", closure.as_ref().unchecked_ref())?;
    }
    closure.forget();
    Ok(())
}

/// Make the stream and constraints reachable from the browser console
pub fn publish_to_window(stream: &MediaStream, constraints: &MediaConstraints) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    js_sys::Reflect::set(&window, &"stream".into(), stream)?;
    js_sys::Reflect::set(
        &window,
        &"constraints".into(),
        &serde_wasm_bindgen::to_value(constraints)?,
    )?;
    Ok(())
}

/// DOMException (or any thrown value) into name/message
pub fn acquire_error_from_js(err: JsValue) -> AcquireError {
    let field = |key: &str| {
        js_sys::Reflect::get(&err, &key.into())
            .ok()
            .and_then(|v| v.as_string())
    };
    match field("name") {
        Some(name) => AcquireError::new(name, field("message").unwrap_or_default()),
        None => AcquireError::new("UnknownError", err.as_string().unwrap_or_default()),
    }
}

fn not_supported(message: &str) -> AcquireError {
    AcquireError::new("NotSupportedError", message)
}
