use crate::rendering::BaseLayer;
use serde::{Deserialize, Serialize};

/// Keyboard key codes the map reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Escape,
    Enter,
    Other(u32),
}

/// Discrete intents delivered by the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapIntent {
    /// Move by whole pan steps, positive is east / north
    Pan { dx: i32, dy: i32 },
    /// Zoom relative to the current level
    Zoom(i32),
    SetBaseLayer(BaseLayer),
    ShowTraffic(bool),
    ShowLabels(bool),
    ShowPostalCode(bool),
    Search(String),
    /// Click at a pixel of the rendered image
    Click { x: f64, y: f64 },
    Clear,
}

impl MapIntent {
    /// Keyboard bindings: page keys zoom, arrow keys pan
    pub fn from_key(key: KeyCode) -> Option<MapIntent> {
        match key {
            KeyCode::PageUp => Some(MapIntent::Zoom(1)),
            KeyCode::PageDown => Some(MapIntent::Zoom(-1)),
            KeyCode::ArrowUp => Some(MapIntent::Pan { dx: 0, dy: 1 }),
            KeyCode::ArrowDown => Some(MapIntent::Pan { dx: 0, dy: -1 }),
            KeyCode::ArrowLeft => Some(MapIntent::Pan { dx: -1, dy: 0 }),
            KeyCode::ArrowRight => Some(MapIntent::Pan { dx: 1, dy: 0 }),
            _ => None,
        }
    }
}
