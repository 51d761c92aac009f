//! tabkit Panel Height Normalizer
//!
//! Fixes the height of every tabpanel container to its tallest panel (plus
//! the container's own padding and border), expressed in `em` so the layout
//! scales with the container's font size. Switching tabs afterwards never
//! changes the height of the page.
//!
//! Normalization measures natural rendered heights, so it must run while
//! every panel is still visible, i.e. before the tab controller hides the
//! inactive ones.

mod error;
mod length;
mod metrics;
mod normalizer;

pub use error::LayoutError;
pub use length::Length;
pub use metrics::{ComputedStyle, InlineStyleMetrics, Metrics, ROOT_FONT_SIZE_PX};
pub use normalizer::{normalize_container, normalize_containers, NormalizeOptions, NormalizedContainer};

pub type Result<T> = std::result::Result<T, LayoutError>;
