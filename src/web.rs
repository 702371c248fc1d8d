//! Browser bindings
//!
//! The host page owns the game engine (sprites, timers, the scene manager).
//! It drives these wrappers from its callbacks and receives scene manager
//! requests through a JS function `(op, scene, overlayJson?)`.

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::persistence::KeyValueStore;
use crate::platform::{LocalStorage, time_seed};
use crate::puzzle::Piece;
use crate::scene::{HikeScene, Overlay, PuzzleScene, SceneContext, SceneHost, SceneKey};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Trailside starting...");
}

/// Forwards scene manager calls to a JS callback
struct JsHost {
    callback: js_sys::Function,
}

impl JsHost {
    fn call(&self, op: &str, scene: SceneKey, overlay: Option<&Overlay>) {
        let overlay = match overlay.map(serde_json::to_string).transpose() {
            Ok(json) => json.map(JsValue::from).unwrap_or(JsValue::UNDEFINED),
            Err(e) => {
                log::error!("Failed to encode overlay: {e}");
                JsValue::UNDEFINED
            }
        };
        if let Err(e) = self.callback.call3(
            &JsValue::NULL,
            &JsValue::from_str(op),
            &JsValue::from_str(scene.as_str()),
            &overlay,
        ) {
            log::error!("Scene host rejected {op} {}: {e:?}", scene.as_str());
        }
    }
}

impl SceneHost for JsHost {
    fn start(&mut self, scene: SceneKey) {
        self.call("start", scene, None);
    }

    fn stop(&mut self, scene: SceneKey) {
        self.call("stop", scene, None);
    }

    fn launch(&mut self, scene: SceneKey, overlay: Overlay) {
        self.call("launch", scene, Some(&overlay));
    }

    fn pause(&mut self, scene: SceneKey) {
        self.call("pause", scene, None);
    }
}

fn tuning_from(json: Option<String>) -> Tuning {
    json.as_deref().map(Tuning::from_json).unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn open_store() -> Result<LocalStorage, JsValue> {
    LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct WebHike {
    scene: HikeScene,
    store: LocalStorage,
    host: JsHost,
}

#[wasm_bindgen]
impl WebHike {
    /// Scene `create`. `tuning` is an optional JSON balance document.
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: js_sys::Function,
        restart: bool,
        tuning: Option<String>,
    ) -> Result<WebHike, JsValue> {
        let mut store = open_store()?;
        let mut host = JsHost { callback: host };
        let tuning = tuning_from(tuning).hike;
        let mut ctx = SceneContext::new(&mut store, &mut host);
        let scene = HikeScene::create(time_seed(), tuning, restart, &mut ctx);
        Ok(Self { scene, store, host })
    }

    /// 20 ms timer callback
    pub fn update(&mut self) {
        let mut ctx = SceneContext::new(&mut self.store, &mut self.host);
        self.scene.update(&mut ctx);
    }

    pub fn pointer_down(&mut self) {
        self.scene.pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.scene.pointer_up();
    }

    pub fn score_text(&self) -> String {
        self.scene.score_text()
    }

    /// Current frame as JSON
    pub fn frame(&self) -> Result<String, JsValue> {
        to_json(&self.scene.frame())
    }

    pub fn back_to_menu(&mut self) {
        let mut ctx = SceneContext::new(&mut self.store, &mut self.host);
        self.scene.back_to_menu(&mut ctx);
    }
}

#[wasm_bindgen]
pub struct WebPuzzle {
    scene: PuzzleScene,
    store: LocalStorage,
    host: JsHost,
}

#[wasm_bindgen]
impl WebPuzzle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: js_sys::Function,
        restart: bool,
        tuning: Option<String>,
    ) -> Result<WebPuzzle, JsValue> {
        let mut store = open_store()?;
        let mut host = JsHost { callback: host };
        let tuning = tuning_from(tuning).puzzle;
        let mut ctx = SceneContext::new(&mut store, &mut host);
        let scene = PuzzleScene::create(time_seed(), &tuning, restart, &mut ctx);
        Ok(Self { scene, store, host })
    }

    /// Texture key of the chosen image
    pub fn image(&self) -> String {
        self.scene.image().to_string()
    }

    pub fn drag(&mut self, piece: usize, x: f32, y: f32) {
        self.scene.drag(piece, Vec2::new(x, y));
    }

    /// Returns true once the puzzle is complete
    pub fn drag_end(&mut self, piece: usize) -> bool {
        let mut ctx = SceneContext::new(&mut self.store, &mut self.host);
        self.scene.drag_end(piece, &mut ctx).complete
    }

    /// Piece positions as JSON
    pub fn pieces(&self) -> Result<String, JsValue> {
        let pieces: &[Piece] = self.scene.board.pieces();
        to_json(&pieces)
    }

    pub fn back_to_menu(&mut self) {
        let mut ctx = SceneContext::new(&mut self.store, &mut self.host);
        self.scene.back_to_menu(&mut ctx);
    }
}

/// Wipe stored progress for both games
#[wasm_bindgen]
pub fn reset_progress() -> Result<(), JsValue> {
    let mut store = open_store()?;
    for key in ["highscore_hike", "playedPuzzles", "numDonePuzzlesEver"] {
        store
            .remove_item(key)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    }
    log::info!("Progress reset");
    Ok(())
}
