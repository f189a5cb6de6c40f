// src/canvas.rs

use druid::{
    Affine, BoxConstraints, Color, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx,
    PaintCtx, RenderContext, Size, TimerToken, UpdateCtx, Widget,
};
use rectpaint::debounce::DebounceToken;
use rectpaint::{Config, DrawingSession, Mode, RenderCommand, Rgb, Scene};
use std::time::Instant;

use crate::app::{AppState, LOG_INFOS, PAINT, RESET};

fn fill_color(rgb: Rgb) -> Color {
    Color::rgb8(rgb.r, rgb.g, rgb.b)
}

/// The drawing area: feeds pointer input to the session and paints its scene.
pub struct RectCanvas {
    session: DrawingSession,
    scene: Scene,
    /// Latest removal timer and the debounce arming it stands for.
    removal_timer: Option<(TimerToken, DebounceToken)>,
}

impl RectCanvas {
    pub fn new(config: &Config) -> Self {
        RectCanvas { session: DrawingSession::from_config(config), scene: Scene::new(), removal_timer: None }
    }

    /// Moves queued render commands into the scene and refreshes the status line.
    fn sync(&mut self, ctx: &mut EventCtx, data: &mut AppState) {
        let commands = self.session.drain_commands();
        if commands.is_empty() {
            return;
        }
        if commands.iter().any(|c| matches!(c, RenderCommand::Spin { .. })) {
            ctx.request_anim_frame();
        }
        self.scene.apply_all(commands, Instant::now());

        let mode = match self.session.mode() {
            Mode::Idle => "idle",
            Mode::Pending => "sizing",
        };
        data.status = format!(
            "{} · {} rectangle(s) · {} queued",
            mode,
            self.session.active().len(),
            self.session.pending_removals().count()
        );
        ctx.request_paint();
    }
}

impl Widget<AppState> for RectCanvas {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::MouseDown(e) if e.button.is_left() => {
                self.session.recompute_offset(ctx.window_origin());
                if e.count >= 2 {
                    if let Some(flush) = self.session.double_click(e.window_pos, Instant::now()) {
                        self.removal_timer = Some((ctx.request_timer(flush.delay), flush.token));
                    }
                } else {
                    self.session.begin_or_finalize(e.window_pos);
                }
                ctx.set_handled();
            }

            Event::MouseMove(e) if self.session.mode() == Mode::Pending => {
                self.session.recompute_offset(ctx.window_origin());
                self.session.update_extent(e.window_pos);
            }

            Event::Timer(token) if self.removal_timer.is_some_and(|(timer, _)| timer == *token) => {
                if let Some((_, debounce)) = self.removal_timer.take() {
                    self.session.flush_if_current(debounce);
                }
            }

            Event::AnimFrame(_) => {
                if self.scene.is_animating(Instant::now()) {
                    ctx.request_anim_frame();
                }
                ctx.request_paint();
            }

            Event::Command(cmd) if cmd.is(RESET) => {
                self.removal_timer = None;
                self.session.reset();
            }
            Event::Command(cmd) if cmd.is(PAINT) => {
                self.session.pair_closest_areas();
            }
            Event::Command(cmd) if cmd.is(LOG_INFOS) => {
                self.session.snapshot().log();
            }
            _ => {}
        }
        self.sync(ctx, data);
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &AppState, _env: &Env) {
        if let LifeCycle::WidgetAdded | LifeCycle::Size(_) = event {
            self.session.recompute_offset(ctx.window_origin());
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old: &AppState, data: &AppState, _env: &Env) {
        if old.dark_theme != data.dark_theme {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        let area = ctx.size().to_rect();
        let background = if data.dark_theme { Color::rgb8(0x24, 0x26, 0x2b) } else { Color::WHITE };
        ctx.fill(area, &background);
        ctx.clip(area);

        let now = Instant::now();
        for item in self.scene.items() {
            let color = fill_color(item.color);
            let angle = self.scene.rotation(item.id, now);
            if angle == 0.0 {
                ctx.fill(item.bounds, &color);
                continue;
            }
            let center = item.bounds.center().to_vec2();
            ctx.with_save(|ctx| {
                ctx.transform(Affine::translate(center) * Affine::rotate(angle) * Affine::translate(-center));
                ctx.fill(item.bounds, &color);
            });
        }

        if let Some((bounds, color)) = self.scene.preview() {
            let outline = if data.dark_theme { Color::WHITE } else { Color::BLACK };
            ctx.fill(bounds, &fill_color(color).with_alpha(0.6));
            ctx.stroke(bounds, &outline, 1.0);
        }
    }
}
