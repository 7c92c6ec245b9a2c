//! Integer geometry for layout and hit testing.
//!
//! All coordinates are whole device units. Sizes produced by layout never go
//! negative: every subtraction of insets clamps at zero per axis.

use std::fmt;
use std::ops::{Add, Sub};

use serde::Deserialize;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X position.
    pub x: i32,
    /// Y position.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Builds a point from a main-axis and cross-axis coordinate.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }
}

impl Add<Point> for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Builds a size from a main-axis and cross-axis extent.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: i32, cross: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Element-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Shrinks by `insets`, flooring each axis at zero independently.
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Self::new(
            (self.width - insets.width()).max(0),
            (self.height - insets.height()).max(0),
        )
    }

    /// Grows by `insets`.
    #[must_use]
    pub fn outset(self, insets: Insets) -> Self {
        Self::new(self.width + insets.width(), self.height + insets.height())
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Per-side insets (padding or border).
///
/// Options reject negative sides; layout assumes every side is at least zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "InsetsSpec")]
pub struct Insets {
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
    /// Left inset.
    pub left: i32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates insets in top, right, bottom, left order.
    #[must_use]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same inset on every side.
    #[must_use]
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    #[must_use]
    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right.
    #[must_use]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[must_use]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }

    /// Total inset along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    /// Returns true if no side is negative.
    #[must_use]
    pub const fn is_non_negative(self) -> bool {
        self.top >= 0 && self.right >= 0 && self.bottom >= 0 && self.left >= 0
    }

    /// Raises every negative side to zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.top.max(0), self.right.max(0), self.bottom.max(0), self.left.max(0))
    }

    /// Scales every side, rounding to the nearest unit.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale(self, factor: f32) -> Self {
        let s = |v: i32| (v as f32 * factor).round() as i32;
        Self::new(s(self.top), s(self.right), s(self.bottom), s(self.left))
    }
}

impl Add for Insets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

/// Accepted option spellings for insets: `10`, `[v, h]` or `[t, r, b, l]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum InsetsSpec {
    All(i32),
    Symmetric([i32; 2]),
    Sides([i32; 4]),
}

impl TryFrom<InsetsSpec> for Insets {
    type Error = String;

    fn try_from(spec: InsetsSpec) -> Result<Self, Self::Error> {
        let insets = match spec {
            InsetsSpec::All(v) => Self::all(v),
            InsetsSpec::Symmetric([v, h]) => Self::symmetric(v, h),
            InsetsSpec::Sides([t, r, b, l]) => Self::new(t, r, b, l),
        };
        if insets.is_non_negative() {
            Ok(insets)
        } else {
            Err(format!(
                "insets must not be negative, got [{}, {}, {}, {}]",
                insets.top, insets.right, insets.bottom, insets.left
            ))
        }
    }
}

/// A rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Creates a rectangle from position and extent.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.origin.y
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left() && pt.x < self.right() && pt.y >= self.top() && pt.y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Places a rect of `size` centered in this one (floor division).
    #[must_use]
    pub fn center(&self, size: Size) -> Self {
        let x = self.left() + (self.width() - size.width).div_euclid(2);
        let y = self.top() + (self.height() - size.height).div_euclid(2);
        Self::from_origin_size(Point::new(x, y), size)
    }
}

impl Sub<Insets> for Rect {
    type Output = Self;

    /// Moves the origin in by the leading insets and shrinks the size,
    /// flooring at zero.
    fn sub(self, insets: Insets) -> Self {
        Self {
            origin: Point::new(self.origin.x + insets.left, self.origin.y + insets.top),
            size: self.size.inset(insets),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.origin.x, self.origin.y, self.size)
    }
}
