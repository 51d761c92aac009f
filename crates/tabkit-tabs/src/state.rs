//! Tab selection state
//!
//! ```text
//! Inactive
//!   ↓ select (click, focus, arrow key)
//! Active
//!   ↓ another tab in the group is selected
//! Inactive
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Selected; the panel is shown and the tab is in the tab order
    Active,
    /// Not selected; the panel is hidden and the tab is skipped by Tab
    Inactive,
}

impl TabState {
    /// Value of `aria-selected` and `aria-expanded`
    pub fn aria_value(&self) -> &'static str {
        match self {
            TabState::Active => "true",
            TabState::Inactive => "false",
        }
    }

    /// Value of `tabindex` under the roving tabindex pattern
    pub fn tabindex(&self) -> &'static str {
        match self {
            TabState::Active => "0",
            TabState::Inactive => "-1",
        }
    }

    /// Read the state back from an `aria-selected` value
    pub fn from_aria_selected(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("true") => TabState::Active,
            _ => TabState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TabState::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Active => "active",
            TabState::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TabState::Active),
            "inactive" => Ok(TabState::Inactive),
            _ => Err(format!("Unknown tab state: {}", s)),
        }
    }
}
