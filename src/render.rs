// src/render.rs

use crate::rectangle::{RectId, Rgb};
use druid::Rect;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Instructions the session emits for whatever surface draws it.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Show (or move) the rectangle currently being sized.
    Preview { bounds: Rect, color: Rgb },
    ClearPreview,
    /// A finalized rectangle joins the drawing.
    Place { id: RectId, bounds: Rect, color: Rgb },
    Recolor { id: RectId, color: Rgb },
    /// Play the removal spin. Cosmetic: the rectangle stays until `Remove`.
    Spin { id: RectId, duration: Duration },
    Remove { id: RectId },
    /// Drop everything.
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub id: RectId,
    pub bounds: Rect,
    pub color: Rgb,
    spin: Option<(Instant, Duration)>,
}

/// What the surface should currently draw, built by applying [`RenderCommand`]s.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    items: Vec<SceneItem>,
    preview: Option<(Rect, Rgb)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one command. Spins are timestamped with `now`.
    pub fn apply(&mut self, command: RenderCommand, now: Instant) {
        match command {
            RenderCommand::Preview { bounds, color } => self.preview = Some((bounds, color)),
            RenderCommand::ClearPreview => self.preview = None,
            RenderCommand::Place { id, bounds, color } => {
                self.items.push(SceneItem { id, bounds, color, spin: None })
            }
            RenderCommand::Recolor { id, color } => {
                if let Some(item) = self.item_mut(id) {
                    item.color = color;
                }
            }
            RenderCommand::Spin { id, duration } => {
                if let Some(item) = self.item_mut(id) {
                    item.spin = Some((now, duration));
                }
            }
            RenderCommand::Remove { id } => self.items.retain(|item| item.id != id),
            RenderCommand::Clear => {
                self.items.clear();
                self.preview = None;
            }
        }
    }

    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = RenderCommand>, now: Instant) {
        for command in commands {
            self.apply(command, now);
        }
    }

    /// Items in paint order (oldest first).
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn preview(&self) -> Option<(Rect, Rgb)> {
        self.preview
    }

    /// Spin angle in radians: one full turn over the spin duration, 0 outside it.
    pub fn rotation(&self, id: RectId, now: Instant) -> f64 {
        let Some(item) = self.items.iter().find(|item| item.id == id) else {
            return 0.0;
        };
        match item.spin {
            Some((start, duration)) if !duration.is_zero() => {
                let t = now.saturating_duration_since(start).as_secs_f64() / duration.as_secs_f64();
                if t < 1.0 { t * TAU } else { 0.0 }
            }
            _ => 0.0,
        }
    }

    /// Whether any spin is still in progress at `now`.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.items.iter().any(|item| {
            item.spin
                .is_some_and(|(start, duration)| now.saturating_duration_since(start) < duration)
        })
    }

    fn item_mut(&mut self, id: RectId) -> Option<&mut SceneItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const SPIN: Duration = Duration::from_millis(900);

    fn place(id: u64) -> RenderCommand {
        RenderCommand::Place { id: RectId(id), bounds: Rect::new(0.0, 0.0, 10.0, 10.0), color: RED }
    }

    #[test]
    fn place_recolor_remove() {
        let now = Instant::now();
        let mut scene = Scene::new();
        scene.apply_all([place(0), place(1)], now);
        scene.apply(RenderCommand::Recolor { id: RectId(1), color: BLUE }, now);
        assert_eq!(scene.items()[1].color, BLUE);
        assert_eq!(scene.items()[0].color, RED);

        scene.apply(RenderCommand::Remove { id: RectId(0) }, now);
        assert_eq!(scene.items().len(), 1);
        assert_eq!(scene.items()[0].id, RectId(1));
    }

    #[test]
    fn preview_is_replaced_and_cleared() {
        let now = Instant::now();
        let mut scene = Scene::new();
        scene.apply(RenderCommand::Preview { bounds: Rect::new(0.0, 0.0, 1.0, 1.0), color: RED }, now);
        scene.apply(RenderCommand::Preview { bounds: Rect::new(0.0, 0.0, 5.0, 5.0), color: RED }, now);
        assert_eq!(scene.preview(), Some((Rect::new(0.0, 0.0, 5.0, 5.0), RED)));
        scene.apply(RenderCommand::ClearPreview, now);
        assert_eq!(scene.preview(), None);
    }

    #[test]
    fn spin_runs_for_its_duration_only() {
        let t0 = Instant::now();
        let mut scene = Scene::new();
        scene.apply(place(4), t0);
        scene.apply(RenderCommand::Spin { id: RectId(4), duration: SPIN }, t0);

        let half = scene.rotation(RectId(4), t0 + Duration::from_millis(450));
        assert!((half - std::f64::consts::PI).abs() < 1e-9);
        assert!(scene.is_animating(t0 + Duration::from_millis(899)));
        assert!(!scene.is_animating(t0 + SPIN));
        assert_eq!(scene.rotation(RectId(4), t0 + SPIN), 0.0);
        // the rectangle is still drawn until removed
        assert_eq!(scene.items().len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let now = Instant::now();
        let mut scene = Scene::new();
        scene.apply_all(
            [place(0), RenderCommand::Preview { bounds: Rect::ZERO, color: RED }, RenderCommand::Clear],
            now,
        );
        assert!(scene.items().is_empty());
        assert_eq!(scene.preview(), None);
    }
}
