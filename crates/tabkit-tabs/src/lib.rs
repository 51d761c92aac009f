//! tabkit Tab Controller
//!
//! Implements single-selection tabs with a roving tabindex, following the
//! ARIA authoring practices:
//! - each tablist (tabs sharing a parent) has exactly one active tab
//! - the active tab has `aria-selected="true"` and `tabindex="0"`, the
//!   others `"false"` and `"-1"`
//! - only the active tab's panel is shown
//! - Left/Right arrow keys move the selection, wrapping around

mod controller;
mod error;
mod event;
mod group;
mod state;

pub use controller::{TabController, TabOptions};
pub use error::TabError;
pub use event::{EventOutcome, Key, TabEvent};
pub use group::{GroupId, TabGroup};
pub use state::TabState;

pub type Result<T> = std::result::Result<T, TabError>;
