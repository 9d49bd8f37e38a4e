use common::DemoConfig;
use wasm_bindgen::prelude::*;

pub mod media_streams;
pub mod ui;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("Camera demo WASM initialized");
}

/// Wire the demo into the page. `config` may be omitted; missing fields fall
/// back to `{ audio: false, video: true }` and the stock element selectors.
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::debug!("Starting with constraints {}", config.constraints.to_json());

    ui::init_camera_demo(config)
}

fn parse_config(config: JsValue) -> Result<DemoConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(DemoConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}
