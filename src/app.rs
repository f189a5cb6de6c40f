// src/app.rs

use druid::widget::{Button, Checkbox, Either, EnvScope, Flex, Label, SizedBox};
use druid::{Color, Data, Env, Lens, Selector, Widget, WidgetExt, theme};
use rectpaint::Config;

use crate::canvas::RectCanvas;

pub const RESET: Selector = Selector::new("rectpaint.reset");
pub const PAINT: Selector = Selector::new("rectpaint.paint");
pub const LOG_INFOS: Selector = Selector::new("rectpaint.log-infos");

#[derive(Clone, Data, Lens)]
pub struct AppState {
    pub dark_theme: bool,
    pub show_diagnostics: bool,
    /// One-line summary of the session, refreshed by the canvas.
    pub status: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        AppState {
            dark_theme: config.dark_theme,
            show_diagnostics: config.show_diagnostics,
            status: String::new(),
        }
    }
}

fn controls() -> impl Widget<AppState> {
    let diagnostics = Flex::row()
        .with_child(Button::new("Log infos").on_click(|ctx, _, _| ctx.submit_command(LOG_INFOS)))
        .with_spacer(8.0)
        .with_child(Label::new(|data: &AppState, _: &Env| data.status.clone()));

    Flex::row()
        .with_child(Button::new("Reset").on_click(|ctx, _, _| ctx.submit_command(RESET)))
        .with_spacer(8.0)
        .with_child(Button::new("Paint").on_click(|ctx, _, _| ctx.submit_command(PAINT)))
        .with_spacer(16.0)
        .with_child(Checkbox::new("Diagnostics").lens(AppState::show_diagnostics))
        .with_spacer(8.0)
        .with_child(Checkbox::new("Dark theme").lens(AppState::dark_theme))
        .with_spacer(16.0)
        .with_child(Either::new(
            |data: &AppState, _| data.show_diagnostics,
            diagnostics,
            SizedBox::empty(),
        ))
        .padding(8.0)
}

pub fn build_root(config: &Config) -> impl Widget<AppState> + use<> {
    let layout = Flex::column()
        .with_child(controls())
        .with_flex_child(RectCanvas::new(config), 1.0);

    EnvScope::new(
        |env, data: &AppState| {
            if data.dark_theme {
                env.set(theme::WINDOW_BACKGROUND_COLOR, Color::rgb8(0x18, 0x19, 0x1c));
                env.set(theme::TEXT_COLOR, Color::rgb8(0xe6, 0xe6, 0xe6));
            } else {
                env.set(theme::WINDOW_BACKGROUND_COLOR, Color::rgb8(0xfa, 0xfa, 0xf7));
                env.set(theme::TEXT_COLOR, Color::rgb8(0x20, 0x20, 0x20));
            }
        },
        layout,
    )
}
