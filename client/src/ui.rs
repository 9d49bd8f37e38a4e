use std::cell::RefCell;
use std::rc::Rc;

use common::{
    acquire, AcquireError, CameraSession, ControlResult, DemoConfig, ElementSelectors, UiState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlVideoElement};

use crate::media_streams::{
    acquire_error_from_js, add_inactive_listener, get_camera_stream, publish_to_window,
    BrowserStream,
};

type SharedSession = Rc<RefCell<CameraSession<BrowserStream>>>;
type ControlAction = fn(&mut CameraSession<BrowserStream>) -> ControlResult<UiState>;

/// Handles to the page elements the demo drives
pub struct UiController {
    error_log: HtmlElement,
    acquire_button: HtmlButtonElement,
    disable_button: HtmlButtonElement,
    enable_button: HtmlButtonElement,
    stop_button: HtmlButtonElement,
    status: HtmlElement,
    video: HtmlVideoElement,
}

fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("{} not found", selector)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("{} has the wrong element type", selector)))
}

impl UiController {
    pub fn new(selectors: &ElementSelectors) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        Ok(Self {
            error_log: query(&document, &selectors.error_log)?,
            acquire_button: query(&document, &selectors.acquire_button)?,
            disable_button: query(&document, &selectors.disable_button)?,
            enable_button: query(&document, &selectors.enable_button)?,
            stop_button: query(&document, &selectors.stop_button)?,
            status: query(&document, &selectors.status)?,
            video: query(&document, &selectors.video)?,
        })
    }

    pub fn apply(&self, state: &UiState) {
        self.disable_button.set_disabled(!state.disable_button_enabled);
        self.enable_button.set_disabled(!state.enable_button_enabled);
        self.stop_button.set_disabled(!state.stop_button_enabled);
        self.status.set_inner_text(&state.status_text);
    }

    /// One paragraph per message; the log is never cleared
    pub fn append_error(&self, message: &str) {
        let document = match self.error_log.owner_document() {
            Some(d) => d,
            None => {
                log::warn!("{}", lost_error_line(message, "error log is detached"));
                return;
            }
        };
        let p = match document.create_element("p") {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{}", lost_error_line(message, &format!("{:?}", e)));
                return;
            }
        };
        p.set_text_content(Some(message));
        if let Err(e) = self.error_log.append_child(&p) {
            log::warn!("{}", lost_error_line(message, &format!("{:?}", e)));
        }
    }

    pub fn bind_stream(&self, stream: &web_sys::MediaStream) {
        self.video.set_src_object(Some(stream));
    }
}

/// Console line for an error message the page could not display
fn lost_error_line(message: &str, reason: &str) -> String {
    format!("Could not show error \"{}\": {}", message, reason)
}

/// Look up the page, wire the buttons, and show the initial state
pub fn init_camera_demo(config: DemoConfig) -> Result<(), JsValue> {
    let ui = Rc::new(UiController::new(&config.elements)?);
    let session: SharedSession = Rc::new(RefCell::new(CameraSession::new(config.constraints)));

    setup_acquire_button(&ui, &session)?;
    setup_control_button(&ui.enable_button, &ui, &session, CameraSession::enable)?;
    setup_control_button(&ui.disable_button, &ui, &session, CameraSession::disable)?;
    setup_control_button(&ui.stop_button, &ui, &session, CameraSession::stop)?;

    ui.apply(&session.borrow().ui_state());
    log::info!("Camera demo ready");
    Ok(())
}

fn setup_acquire_button(ui: &Rc<UiController>, session: &SharedSession) -> Result<(), JsValue> {
    let ui_for_click = ui.clone();
    let session_for_click = session.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let ui = ui_for_click.clone();
        let session = session_for_click.clone();
        wasm_bindgen_futures::spawn_local(async move {
            run_acquisition(ui, session).await;
        });
    }) as Box<dyn FnMut(_)>);

    ui.acquire_button
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

async fn run_acquisition(ui: Rc<UiController>, session: SharedSession) {
    let constraints = session.borrow().constraints().clone();

    let request = {
        let ui = ui.clone();
        let session = session.clone();
        let constraints = constraints.clone();
        async move {
            let stream = get_camera_stream(&constraints).await?;

            let on_inactive = {
                let ui = ui.clone();
                let session = session.clone();
                move || {
                    // Skip if a handler is mid-mutation; it reflects on its own
                    if let Ok(session) = session.try_borrow() {
                        ui.apply(&session.on_inactive());
                    }
                }
            };
            add_inactive_listener(&stream, Box::new(on_inactive)).map_err(acquire_error_from_js)?;

            if let Err(e) = publish_to_window(&stream, &constraints) {
                log::warn!("Could not expose stream on window: {:?}", e);
            }
            ui.bind_stream(&stream);
            Ok::<_, AcquireError>(BrowserStream::new(stream))
        }
    };

    let reflection = acquire(session.as_ref(), request).await;
    for line in &reflection.new_errors {
        ui.append_error(line);
    }
    ui.apply(&reflection.ui);
}

fn setup_control_button(
    button: &HtmlButtonElement,
    ui: &Rc<UiController>,
    session: &SharedSession,
    action: ControlAction,
) -> Result<(), JsValue> {
    let ui = ui.clone();
    let session = session.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let mut session = session.borrow_mut();
        match action(&mut *session) {
            Ok(state) => ui.apply(&state),
            Err(e) => {
                log::warn!("{}", e);
                let line = e.to_string();
                ui.append_error(&line);
                session.push_error(line);
                ui.apply(&session.ui_state());
            }
        }
    }) as Box<dyn FnMut(_)>);

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_error_line_keeps_message() {
        let line = lost_error_line("getUserMedia error: NotAllowedError", "error log is detached");
        assert_eq!(
            line,
            "Could not show error \"getUserMedia error: NotAllowedError\": error log is detached"
        );
    }
}
