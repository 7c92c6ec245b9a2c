//! Cascading environment.
//!
//! Every live node owns an `Environment` value. During reconciliation a
//! child's environment starts as a copy of its parent's and then has the
//! child's own `EnvOverrides` applied, so reads always see the nearest
//! ancestor override and sibling subtrees never observe each other.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arbor_core::{Color, Rect, Size};
use serde::Deserialize;

use crate::render::Renderer;

/// A drawable resolved from the theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    name: Arc<str>,
}

impl Asset {
    /// Creates an asset handle for `name`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    /// The name the renderer knows this asset by.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Measurable font handle.
pub trait Font: fmt::Debug + Send + Sync {
    /// Size of `text`, wrapped at `width` when given.
    fn measure(&self, text: &str, width: Option<i32>) -> Size;

    /// Height of one line.
    fn line_height(&self) -> i32;
}

/// Theme and asset lookup.
pub trait Theme: fmt::Debug + Send + Sync {
    /// Resolves a named asset.
    fn resolve_asset(&self, name: &str) -> Option<Asset>;

    /// Returns a font handle for `family` at `size`.
    fn font(&self, family: &str, size: u16) -> Arc<dyn Font>;
}

/// Font with a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFont {
    advance: i32,
    line_height: i32,
}

impl FixedFont {
    /// Creates a font whose glyphs are all `advance` wide. Advances below
    /// one are raised to one.
    #[must_use]
    pub const fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance: if advance < 1 { 1 } else { advance },
            line_height,
        }
    }

    /// Metrics derived from a point size: half-size advance, full-size lines.
    #[must_use]
    pub fn for_size(size: u16) -> Self {
        let size = i32::from(size);
        Self::new((size / 2).max(1), size)
    }
}

impl Font for FixedFont {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn measure(&self, text: &str, width: Option<i32>) -> Size {
        let per_line = width.map(|w| (w / self.advance.max(1)).max(1));
        let mut lines = 0;
        let mut widest = 0;
        for line in text.split('\n') {
            let chars = line.chars().count() as i32;
            match per_line {
                Some(limit) if chars > limit => {
                    lines += (chars + limit - 1) / limit;
                    widest = widest.max(limit);
                }
                _ => {
                    lines += 1;
                    widest = widest.max(chars);
                }
            }
        }
        Size::new(widest * self.advance, lines * self.line_height)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}

/// Theme backed by a fixed table of asset names.
///
/// Lookups fall back along dotted names: `"button.pressed"` resolves to
/// `"button"` when no pressed variant is registered.
#[derive(Debug, Clone, Default)]
pub struct StaticTheme {
    assets: HashMap<String, Asset>,
}

impl StaticTheme {
    /// Creates an empty theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset under its own name.
    #[must_use]
    pub fn with_asset(mut self, name: &str) -> Self {
        self.assets.insert(name.to_owned(), Asset::new(name));
        self
    }
}

impl Theme for StaticTheme {
    fn resolve_asset(&self, name: &str) -> Option<Asset> {
        let mut key = name;
        loop {
            if let Some(asset) = self.assets.get(key) {
                return Some(asset.clone());
            }
            key = &key[..key.rfind('.')?];
        }
    }

    fn font(&self, _family: &str, size: u16) -> Arc<dyn Font> {
        Arc::new(FixedFont::for_size(size))
    }
}

/// Inherited styling context.
#[derive(Debug, Clone)]
pub struct Environment {
    scale: f32,
    font: Arc<str>,
    font_size: u16,
    color: Color,
    theme: Arc<dyn Theme>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font: Arc::from("default"),
            font_size: 14,
            color: Color::BLACK,
            theme: Arc::new(StaticTheme::default()),
        }
    }
}

impl Environment {
    /// Creates the default environment using `theme`.
    #[must_use]
    pub fn with_theme(theme: Arc<dyn Theme>) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Returns a copy of this environment with `overrides` applied.
    #[must_use]
    pub fn inherit(&self, overrides: &EnvOverrides) -> Self {
        let mut env = self.clone();
        if let Some(scale) = overrides.scale {
            env.scale = scale;
        }
        if let Some(font) = &overrides.font {
            env.font = Arc::from(font.as_str());
        }
        if let Some(size) = overrides.font_size {
            env.font_size = size;
        }
        if let Some(color) = overrides.color {
            env.color = color;
        }
        if let Some(theme) = &overrides.theme {
            env.theme = Arc::clone(theme);
        }
        env
    }

    /// Display scale factor.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Font family name.
    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Font size in points.
    #[must_use]
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Foreground color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Theme handle.
    #[must_use]
    pub fn theme(&self) -> &Arc<dyn Theme> {
        &self.theme
    }

    /// Scales a logical length by the display scale.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scaled(&self, value: i32) -> i32 {
        (value as f32 * self.scale).round() as i32
    }

    /// Resolves the environment's font through the theme.
    #[must_use]
    pub fn font_handle(&self) -> Arc<dyn Font> {
        self.theme.font(&self.font, self.font_size)
    }

    /// Draws a themed asset. Returns false when the theme has no such asset.
    pub fn draw_asset(&self, renderer: &mut dyn Renderer, name: &str, rect: Rect) -> bool {
        match self.theme.resolve_asset(name) {
            Some(asset) => {
                renderer.draw_asset(asset.name(), rect);
                true
            }
            None => {
                tracing::trace!(asset = name, "theme has no asset");
                false
            }
        }
    }
}

/// Per-node environment overrides. Unset fields inherit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvOverrides {
    /// Display scale factor.
    pub scale: Option<f32>,
    /// Font family.
    pub font: Option<String>,
    /// Font size in points.
    pub font_size: Option<u16>,
    /// Foreground color.
    pub color: Option<Color>,
    /// Theme handle; code-only.
    #[serde(skip)]
    pub theme: Option<Arc<dyn Theme>>,
}

impl EnvOverrides {
    /// Returns true if nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scale.is_none()
            && self.font.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.theme.is_none()
    }
}
