//! Scene controllers
//!
//! Each minigame scene wraps its simulation and talks to two collaborators
//! owned by the host engine: the scene manager (overlays, menu, pausing) and
//! key/value storage. Both are handed in per callback through a
//! [`SceneContext`] rather than reached through global state.

pub mod hike;
pub mod puzzle;

pub use hike::{HikeFrame, HikeScene, ObstacleFrame};
pub use puzzle::PuzzleScene;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Scenes the host engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKey {
    Menu,
    Intro,
    GameOver,
    Hike,
    Puzzle,
}

impl SceneKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKey::Menu => "menu",
            SceneKey::Intro => "intro",
            SceneKey::GameOver => "gameover",
            SceneKey::Hike => "hike",
            SceneKey::Puzzle => "puzzle",
        }
    }
}

/// Payload for the intro and game-over overlays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub text: String,
    /// Texture to show behind the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Opacity of `image`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl Overlay {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// The host engine's scene manager
pub trait SceneHost {
    /// Switch to `scene`
    fn start(&mut self, scene: SceneKey);
    fn stop(&mut self, scene: SceneKey);
    /// Run `scene` on top of the current one
    fn launch(&mut self, scene: SceneKey, overlay: Overlay);
    fn pause(&mut self, scene: SceneKey);
}

/// Collaborators handed to every scene callback
pub struct SceneContext<'a> {
    pub store: &'a mut dyn KeyValueStore,
    pub host: &'a mut dyn SceneHost,
}

impl<'a> SceneContext<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore, host: &'a mut dyn SceneHost) -> Self {
        Self { store, host }
    }
}

/// A scene manager call, as recorded by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Start(SceneKey),
    Stop(SceneKey),
    Launch(SceneKey, Overlay),
    Pause(SceneKey),
}

/// Host that records calls and logs them; used headless and in tests
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays launched so far for `scene`
    pub fn overlays(&self, scene: SceneKey) -> Vec<&Overlay> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Launch(key, overlay) if *key == scene => Some(overlay),
                _ => None,
            })
            .collect()
    }
}

impl SceneHost for RecordingHost {
    fn start(&mut self, scene: SceneKey) {
        log::info!("start {}", scene.as_str());
        self.calls.push(HostCall::Start(scene));
    }

    fn stop(&mut self, scene: SceneKey) {
        log::info!("stop {}", scene.as_str());
        self.calls.push(HostCall::Stop(scene));
    }

    fn launch(&mut self, scene: SceneKey, overlay: Overlay) {
        log::info!("launch {}: {:?}", scene.as_str(), overlay.text);
        self.calls.push(HostCall::Launch(scene, overlay));
    }

    fn pause(&mut self, scene: SceneKey) {
        log::info!("pause {}", scene.as_str());
        self.calls.push(HostCall::Pause(scene));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_key_names() {
        let names: Vec<&str> = [
            SceneKey::Menu,
            SceneKey::Intro,
            SceneKey::GameOver,
            SceneKey::Hike,
            SceneKey::Puzzle,
        ]
        .iter()
        .map(SceneKey::as_str)
        .collect();
        assert_eq!(names, ["menu", "intro", "gameover", "hike", "puzzle"]);
    }

    #[test]
    fn test_overlay_json_omits_empty_fields() {
        let json = serde_json::to_string(&Overlay::text("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }
}
