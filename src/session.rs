// src/session.rs

use crate::color::random_color;
use crate::config::Config;
use crate::debounce::{DebounceToken, Debouncer};
use crate::diagnostics::{RectangleInfo, SessionSnapshot};
use crate::pairing::{ClosestPair, closest_areas};
use crate::rectangle::{RectId, Rectangle};
use crate::render::RenderCommand;
use druid::{Point, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Whether the next pointer-down starts or finishes a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    Idle,
    Pending,
}

/// Result of [`DrawingSession::begin_or_finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Began,
    Finalized(RectId),
    /// The second click left the rectangle without area.
    Discarded,
}

/// A removal batch waiting on the debounce. Only the latest one can flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledFlush {
    pub token: DebounceToken,
    pub delay: Duration,
}

/// Owns the rectangles of one drawing area and the pointer state machine.
///
/// Pointer coordinates are taken in window space and translated through the
/// current drawing-area offset. Nothing is drawn here: every visible change is
/// queued as a [`RenderCommand`] and handed out by [`drain_commands`](Self::drain_commands).
pub struct DrawingSession {
    offset: Vec2,
    pending: Option<Rectangle>,
    active: Vec<Rectangle>,
    pending_removals: BTreeSet<RectId>,
    removal: Debouncer,
    spin_duration: Duration,
    next_id: u64,
    rng: StdRng,
    outbox: Vec<RenderCommand>,
}

impl DrawingSession {
    pub fn new(removal_delay: Duration, spin_duration: Duration) -> Self {
        Self::with_rng(removal_delay, spin_duration, StdRng::from_entropy())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.removal_delay(), config.spin_duration())
    }

    /// Same as `new`, with a caller-supplied color source.
    pub fn with_rng(removal_delay: Duration, spin_duration: Duration, rng: StdRng) -> Self {
        DrawingSession {
            offset: Vec2::ZERO,
            pending: None,
            active: Vec::new(),
            pending_removals: BTreeSet::new(),
            removal: Debouncer::new(removal_delay),
            spin_duration,
            next_id: 0,
            rng,
            outbox: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.pending.is_some() { Mode::Pending } else { Mode::Idle }
    }

    pub fn active(&self) -> &[Rectangle] {
        &self.active
    }

    pub fn pending(&self) -> Option<&Rectangle> {
        self.pending.as_ref()
    }

    pub fn pending_removals(&self) -> impl Iterator<Item = RectId> + '_ {
        self.pending_removals.iter().copied()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Records where the drawing area's top-left corner now sits in the window.
    pub fn recompute_offset(&mut self, origin: Point) {
        let offset = origin.to_vec2();
        if offset != self.offset {
            tracing::debug!("drawing area offset {:?} -> {:?}", self.offset, offset);
            self.offset = offset;
        }
    }

    fn to_local(&self, pointer: Point) -> Point {
        pointer - self.offset
    }

    /// First click anchors a rectangle, second click finalizes it.
    pub fn begin_or_finalize(&mut self, pointer: Point) -> Outcome {
        if self.pending.is_none() {
            let anchor = self.to_local(pointer);
            let rect = Rectangle::new(RectId(self.next_id), anchor, random_color(&mut self.rng));
            tracing::debug!("{} anchored at {:?}", rect.id(), anchor);
            self.outbox.push(RenderCommand::Preview { bounds: rect.bounds(), color: rect.color() });
            self.pending = Some(rect);
            return Outcome::Began;
        }

        self.update_extent(pointer);
        self.outbox.push(RenderCommand::ClearPreview);
        let Some(rect) = self.pending.take() else {
            return Outcome::Discarded;
        };
        if rect.area() > 0.0 {
            let id = rect.id();
            tracing::debug!("{} finalized, area {}", id, rect.area());
            self.outbox.push(RenderCommand::Place { id, bounds: rect.bounds(), color: rect.color() });
            self.active.push(rect);
            self.next_id += 1;
            Outcome::Finalized(id)
        } else {
            tracing::debug!("{} discarded, no area", rect.id());
            Outcome::Discarded
        }
    }

    /// Stretches the pending rectangle to the pointer. No-op while idle.
    pub fn update_extent(&mut self, pointer: Point) {
        let corner = self.to_local(pointer);
        if let Some(rect) = self.pending.as_mut() {
            rect.stretch_to(corner);
            self.outbox.push(RenderCommand::Preview { bounds: rect.bounds(), color: rect.color() });
        }
    }

    /// Topmost active rectangle under the pointer.
    pub fn rectangle_at(&self, pointer: Point) -> Option<RectId> {
        let local = self.to_local(pointer);
        self.active.iter().rev().find(|r| r.contains(local)).map(Rectangle::id)
    }

    /// Second pointer-down of a double-click.
    ///
    /// The target is picked before the click is fed to the state machine, so a
    /// sliver finalized by pointer jitter between the two clicks is never the one
    /// removed.
    pub fn double_click(&mut self, pointer: Point, now: Instant) -> Option<ScheduledFlush> {
        let target = self.rectangle_at(pointer);
        self.begin_or_finalize(pointer);
        target.and_then(|id| self.request_removal(id, now))
    }

    /// Queues `id` for removal and restarts the shared debounce.
    ///
    /// Returns the new flush schedule, or `None` for an id that is not active.
    pub fn request_removal(&mut self, id: RectId, now: Instant) -> Option<ScheduledFlush> {
        if !self.active.iter().any(|r| r.id() == id) {
            tracing::warn!("removal requested for unknown {}", id);
            return None;
        }
        self.pending_removals.insert(id);
        let token = self.removal.restart(now);
        self.outbox.push(RenderCommand::Spin { id, duration: self.spin_duration });
        tracing::debug!("{} queued, {} awaiting flush", id, self.pending_removals.len());
        Some(ScheduledFlush { token, delay: self.removal.delay() })
    }

    /// Flushes the removal batch if its deadline has passed.
    pub fn flush_due(&mut self, now: Instant) -> Vec<RectId> {
        if self.removal.is_due(now) { self.flush_removals() } else { Vec::new() }
    }

    /// Flushes when `token` is the latest schedule; stale timers do nothing.
    pub fn flush_if_current(&mut self, token: DebounceToken) -> Vec<RectId> {
        if self.removal.is_current(token) {
            self.flush_removals()
        } else {
            tracing::debug!("ignoring stale removal timer {:?}", token);
            Vec::new()
        }
    }

    /// Removes every queued rectangle in one go and disarms the debounce.
    pub fn flush_removals(&mut self) -> Vec<RectId> {
        self.removal.cancel();
        let batch = std::mem::take(&mut self.pending_removals);
        if batch.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::with_capacity(batch.len());
        self.active.retain(|r| {
            if batch.contains(&r.id()) {
                removed.push(r.id());
                false
            } else {
                true
            }
        });
        for &id in &removed {
            self.outbox.push(RenderCommand::Remove { id });
        }
        tracing::info!("flushed {} rectangle(s), {} left", removed.len(), self.active.len());
        removed
    }

    /// Gives the two rectangles with the closest areas one new shared color.
    pub fn pair_closest_areas(&mut self) -> Option<ClosestPair> {
        let pair = closest_areas(&self.active)?;
        let color = random_color(&mut self.rng);
        for rect in self.active.iter_mut() {
            if rect.id() == pair.first || rect.id() == pair.second {
                rect.set_color(color);
            }
        }
        self.outbox.push(RenderCommand::Recolor { id: pair.first, color });
        self.outbox.push(RenderCommand::Recolor { id: pair.second, color });
        tracing::info!("painted {} and {} {} (gap {})", pair.first, pair.second, color, pair.gap);
        Some(pair)
    }

    /// Back to an empty, idle session with ids restarting at 0.
    pub fn reset(&mut self) {
        self.active.clear();
        self.pending = None;
        self.pending_removals.clear();
        self.removal.cancel();
        self.next_id = 0;
        self.outbox.push(RenderCommand::Clear);
        tracing::info!("session reset");
    }

    /// Hands out the render instructions queued since the last call.
    pub fn drain_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode(),
            offset: (self.offset.x, self.offset.y),
            next_id: self.next_id,
            active: self.active.iter().map(RectangleInfo::from).collect(),
            pending: self.pending.as_ref().map(RectangleInfo::from),
            pending_removals: self.pending_removals().collect(),
        }
    }
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DrawingSession {
        DrawingSession::with_rng(
            Duration::from_millis(1000),
            Duration::from_millis(900),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn update_while_idle_does_nothing() {
        let mut s = session();
        s.update_extent(Point::new(40.0, 40.0));
        assert_eq!(s.mode(), Mode::Idle);
        assert!(s.drain_commands().is_empty());
    }

    #[test]
    fn pending_rectangle_keeps_the_next_id() {
        let mut s = session();
        s.begin_or_finalize(Point::new(0.0, 0.0));
        s.begin_or_finalize(Point::new(5.0, 5.0));
        s.begin_or_finalize(Point::new(1.0, 1.0));
        assert_eq!(s.pending().map(Rectangle::id), Some(RectId(1)));
        // discarding does not consume an id
        assert_eq!(s.begin_or_finalize(Point::new(1.0, 1.0)), Outcome::Discarded);
        s.begin_or_finalize(Point::new(2.0, 2.0));
        assert_eq!(s.begin_or_finalize(Point::new(3.0, 9.0)), Outcome::Finalized(RectId(1)));
    }

    #[test]
    fn pairing_keeps_insertion_order() {
        let mut s = session();
        for (x, y) in [(10.0, 10.0), (1.0, 1.0), (3.0, 3.0)] {
            s.begin_or_finalize(Point::ZERO);
            s.begin_or_finalize(Point::new(x, y));
        }
        s.drain_commands();
        let pair = s.pair_closest_areas().unwrap();
        assert_eq!((pair.first, pair.second), (RectId(1), RectId(2)));
        let ids: Vec<_> = s.active().iter().map(Rectangle::id).collect();
        assert_eq!(ids, vec![RectId(0), RectId(1), RectId(2)]);
        assert_eq!(s.active()[1].color(), s.active()[2].color());

        let commands = s.drain_commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], RenderCommand::Recolor { id: RectId(1), .. }));
    }

    #[test]
    fn double_click_ignores_the_sliver_it_finalizes() {
        let mut s = session();
        s.begin_or_finalize(Point::new(10.0, 10.0));
        s.begin_or_finalize(Point::new(110.0, 110.0));

        // first click anchors, the second lands one pixel away
        s.begin_or_finalize(Point::new(50.0, 50.0));
        let flush = s.double_click(Point::new(51.0, 51.0), Instant::now());
        assert!(flush.is_some());
        assert_eq!(s.active().len(), 2);
        assert_eq!(s.pending_removals().collect::<Vec<_>>(), vec![RectId(0)]);
    }

    #[test]
    fn double_click_on_empty_space_queues_nothing() {
        let mut s = session();
        s.begin_or_finalize(Point::new(5.0, 5.0));
        assert_eq!(s.double_click(Point::new(5.0, 5.0), Instant::now()), None);
        assert_eq!(s.mode(), Mode::Idle);
        assert_eq!(s.pending_removals().count(), 0);
    }

    #[test]
    fn only_the_latest_schedule_flushes() {
        let t0 = Instant::now();
        let mut s = session();
        for x in [10.0, 20.0] {
            s.begin_or_finalize(Point::ZERO);
            s.begin_or_finalize(Point::new(x, x));
        }
        let first = s.request_removal(RectId(0), t0).unwrap();
        let second = s.request_removal(RectId(1), t0).unwrap();
        assert_ne!(first.token, second.token);

        assert!(s.flush_if_current(first.token).is_empty());
        assert_eq!(s.active().len(), 2);
        assert_eq!(s.flush_if_current(second.token), vec![RectId(0), RectId(1)]);
        // already flushed
        assert!(s.flush_if_current(second.token).is_empty());
    }

    #[test]
    fn flush_with_nothing_queued_is_empty() {
        let mut s = session();
        assert!(s.flush_removals().is_empty());
        assert!(s.flush_due(Instant::now() + Duration::from_secs(60)).is_empty());
    }
}
