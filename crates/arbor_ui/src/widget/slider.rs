//! Horizontal value slider.

use arbor_core::{Binding, Point, Rect, Size};
use serde::Deserialize;

use crate::config::parse_options;
use crate::env::Environment;
use crate::error::ConfigError;
use crate::event::EventCx;
use crate::input::{Key, Modifiers};
use crate::render::Renderer;
use crate::view::{DrawCx, View};

/// Slider construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderOptions {
    /// Smallest value.
    pub minimum: i32,
    /// Largest value.
    pub maximum: i32,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 100,
        }
    }
}

impl SliderOptions {
    /// Recognized option keys.
    pub const ATTRIBUTES: &'static [&'static str] = &["minimum", "maximum"];
}

/// Edits a bound integer within `[minimum, maximum]`.
///
/// The pointer maps x across the inner rect onto the range; Left and Right
/// step by one, or by a tenth of the range with Shift.
#[derive(Debug, Clone)]
pub struct Slider {
    value: Binding<i32>,
    minimum: i32,
    maximum: i32,
}

impl Slider {
    /// A slider over `0..=100`.
    #[must_use]
    pub fn new(value: Binding<i32>) -> Self {
        Self::with_range(value, SliderOptions::default())
    }

    /// A slider over the given range.
    #[must_use]
    pub fn with_range(value: Binding<i32>, range: SliderOptions) -> Self {
        Self {
            value,
            minimum: range.minimum,
            maximum: range.maximum.max(range.minimum),
        }
    }

    /// A slider configured from TOML options.
    pub fn with_options(value: Binding<i32>, options: &str) -> Result<Self, ConfigError> {
        let range = parse_options("Slider", SliderOptions::ATTRIBUTES, options)?;
        Ok(Self::with_range(value, range))
    }

    /// Number of distinct values.
    #[must_use]
    pub fn span(&self) -> i64 {
        i64::from(self.maximum) - i64::from(self.minimum) + 1
    }

    /// The bound value.
    #[must_use]
    pub fn value(&self) -> &Binding<i32> {
        &self.value
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set(&self, value: i64) {
        let clamped = value.clamp(i64::from(self.minimum), i64::from(self.maximum));
        self.value.set(clamped as i32);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn track(&self, pt: Point, inner: Rect) {
        if inner.width() <= 0 {
            return;
        }
        let dx = i64::from(pt.x) - i64::from(inner.left());
        let pct = (dx as f64 / f64::from(inner.width())).clamp(0.0, 1.0);
        self.set(i64::from(self.minimum) + (pct * self.span() as f64) as i64);
    }

    /// Knob offset along a track with `travel` units of free space.
    #[allow(clippy::cast_possible_truncation)]
    fn knob_offset(&self, travel: i32) -> i32 {
        let steps = self.span() - 1;
        if steps <= 0 || travel <= 0 {
            return 0;
        }
        let along = i64::from(self.value.get()) - i64::from(self.minimum);
        let along = along.clamp(0, steps);
        // along <= steps, so the quotient never exceeds travel
        (i128::from(along) * i128::from(travel) / i128::from(steps)) as i32
    }
}

impl View for Slider {
    fn interactive(&self) -> bool {
        true
    }

    fn minimum_size(&self, env: &Environment, _children: Size) -> Size {
        Size::new(env.scaled(40), env.scaled(20))
    }

    fn content_size(&self, available: Size, env: &Environment) -> Size {
        Size::new(available.width, env.scaled(20))
    }

    fn draw(&self, renderer: &mut dyn Renderer, rect: Rect, cx: &DrawCx<'_>) {
        let env = cx.env;
        let knob = env.scaled(20);
        let offset = self.knob_offset((rect.width() - knob).max(0));
        let track = Rect::new(rect.left(), rect.top() + env.scaled(7), rect.width(), env.scaled(6));
        env.draw_asset(renderer, "slider.track", track);
        env.draw_asset(
            renderer,
            "slider.knob",
            Rect::new(rect.left() + offset, rect.top(), knob, knob),
        );
    }

    fn mousedown(&mut self, pt: Point, cx: &mut EventCx<'_>) -> bool {
        self.track(pt, cx.inner());
        true
    }

    fn mousemotion(&mut self, pt: Point, cx: &mut EventCx<'_>) {
        self.track(pt, cx.inner());
    }

    fn click(&mut self, pt: Point, cx: &mut EventCx<'_>) {
        self.track(pt, cx.inner());
    }

    fn keydown(&mut self, key: Key, mods: Modifiers, _cx: &mut EventCx<'_>) {
        let step = if mods.shift { self.span() / 10 } else { 1 };
        let current = i64::from(self.value.get());
        match key {
            Key::Left => self.set(current - step),
            Key::Right => self.set(current + step),
            _ => {}
        }
    }
}
