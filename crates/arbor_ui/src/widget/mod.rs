//! Widgets built on the view contract.

mod button;
mod segmented;
mod slider;
mod stack;
mod text;

pub use button::Button;
pub use segmented::SegmentedButton;
pub use slider::{Slider, SliderOptions};
pub use stack::{hstack, vstack, Stack};
pub use text::Text;
