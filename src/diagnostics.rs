// src/diagnostics.rs

use crate::rectangle::{RectId, Rectangle, Rgb};
use crate::session::Mode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectangleInfo {
    pub id: RectId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub color: Rgb,
}

impl From<&Rectangle> for RectangleInfo {
    fn from(rect: &Rectangle) -> Self {
        let bounds = rect.bounds();
        RectangleInfo {
            id: rect.id(),
            left: bounds.x0,
            top: bounds.y0,
            width: rect.width(),
            height: rect.height(),
            area: rect.area(),
            color: rect.color(),
        }
    }
}

/// Point-in-time dump of a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub offset: (f64, f64),
    pub next_id: u64,
    pub active: Vec<RectangleInfo>,
    pub pending: Option<RectangleInfo>,
    pub pending_removals: Vec<RectId>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the snapshot to the log between start/end markers.
    pub fn log(&self) {
        tracing::info!("------ START LOG ------");
        match self.to_json() {
            Ok(json) => tracing::info!("{}", json),
            Err(err) => tracing::warn!("failed to serialize session snapshot: {}", err),
        }
        tracing::info!("------ END LOG ------");
    }
}
