//! wasm-bindgen surface for browser hosts

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{Clock, Game};

/// Monotonic clock from `performance.now()`
#[derive(Debug, Clone)]
pub struct JsClock {
    performance: web_sys::Performance,
}

impl JsClock {
    /// None outside a window context
    pub fn new() -> Option<Self> {
        let performance = web_sys::window()?.performance()?;
        Some(Self { performance })
    }
}

impl Clock for JsClock {
    fn now(&self) -> f64 {
        self.performance.now() / 1000.0
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized if the module is started twice
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A game session exposed to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<JsClock>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsValue> {
        let clock = JsClock::new().ok_or_else(|| js_err("performance clock unavailable"))?;
        let settings = Settings::load();
        let game = Game::with_clock(settings, clock).map_err(js_err)?;
        log::info!("Hop Chain ready (seed {})", game.seed());
        Ok(WebGame { game })
    }

    /// Store the current settings in LocalStorage for the next visit
    pub fn save_settings(&self) -> Result<(), JsValue> {
        self.game.settings().save().map_err(js_err)
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Pointer/touch down. Returns true if a charge started.
    pub fn press(&mut self) -> bool {
        self.game.on_input_press()
    }

    /// Pointer/touch up. Returns the rejection reason if no jump happened.
    pub fn release(&mut self) -> Option<String> {
        self.game.on_input_release().err().map(|e| e.to_string())
    }

    /// Step animations by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.game.advance(dt);
    }

    pub fn player_position(&self) -> Vec<f32> {
        self.game.player().position.to_array().to_vec()
    }

    pub fn player_rotation(&self) -> f32 {
        self.game.player().rotation
    }

    pub fn player_heading(&self) -> Vec<f32> {
        self.game.player().heading.to_array().to_vec()
    }

    pub fn camera_position(&self) -> Vec<f32> {
        self.game.camera().to_array().to_vec()
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    /// Charge meter fill in [0, 1] for the progress bar
    pub fn charge_ratio(&self) -> f32 {
        self.game.charge_ratio()
    }

    /// Platform chain as a JSON array
    pub fn platforms_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.game.platforms()).map_err(js_err)
    }

    /// Flight paths of every jump this session as a JSON array of point arrays
    pub fn trails_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.player().trails).map_err(js_err)
    }

    /// Events since the last call as a JSON array
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.drain_events()).map_err(js_err)
    }
}
