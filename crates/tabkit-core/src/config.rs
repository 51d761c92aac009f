//! Widget configuration

use serde::{Deserialize, Serialize};

use tabkit_layout::{InlineStyleMetrics, NormalizeOptions, ROOT_FONT_SIZE_PX};
use tabkit_tabs::TabOptions;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class removed from tablists once the tabs are wired up
    pub tablist_hidden_class: String,
    /// Class marking tabpanel containers to normalize
    pub container_class: String,
    /// Class hiding the panel of an inactive tab
    pub inactive_class: String,
    /// Class added to containers after their height is fixed
    pub overlaps_class: String,
    /// Font size of the root element, used for `rem` and as the inherited
    /// font size when no ancestor declares one
    pub root_font_size_px: f64,
    /// Focus the first tab of each group when the widget is set up
    pub focus_on_init: bool,
}

impl Config {
    /// Parse a JSON config; missing fields take their default value
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let classes = [
            ("tablist_hidden_class", &self.tablist_hidden_class),
            ("container_class", &self.container_class),
            ("inactive_class", &self.inactive_class),
            ("overlaps_class", &self.overlaps_class),
        ];
        for (field, class) in classes {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(CoreError::Config(format!(
                    "{} must be a single class name, got {:?}",
                    field, class
                )));
            }
        }

        if !(self.root_font_size_px > 0.0 && self.root_font_size_px.is_finite()) {
            return Err(CoreError::Config(format!(
                "root_font_size_px must be positive, got {}",
                self.root_font_size_px
            )));
        }

        Ok(())
    }

    pub fn tab_options(&self) -> TabOptions {
        TabOptions {
            tablist_hidden_class: self.tablist_hidden_class.clone(),
            inactive_class: self.inactive_class.clone(),
            focus_on_init: self.focus_on_init,
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            container_class: self.container_class.clone(),
            overlaps_class: self.overlaps_class.clone(),
        }
    }

    /// Inline-style metrics that treat inactive panels as not rendered
    pub fn inline_metrics(&self) -> InlineStyleMetrics {
        InlineStyleMetrics::new()
            .with_root_font_size(self.root_font_size_px)
            .with_hidden_class(self.inactive_class.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        let tabs = TabOptions::default();
        let layout = NormalizeOptions::default();

        Self {
            tablist_hidden_class: tabs.tablist_hidden_class,
            container_class: layout.container_class,
            inactive_class: tabs.inactive_class,
            overlaps_class: layout.overlaps_class,
            root_font_size_px: ROOT_FONT_SIZE_PX,
            focus_on_init: tabs.focus_on_init,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_class_names() {
        let config = Config::default();
        assert_eq!(config.tablist_hidden_class, "tablist-hidden");
        assert_eq!(config.container_class, "tabpanel-container");
        assert_eq!(config.inactive_class, "tabpanel-inactive");
        assert_eq!(config.overlaps_class, "tabpanel-overlaps");
        assert_eq!(config.root_font_size_px, 16.0);
        assert!(config.focus_on_init);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_override() {
        let config = Config::from_json_str(r#"{"inactive_class": "hidden"}"#).unwrap();
        assert_eq!(config.inactive_class, "hidden");
        assert_eq!(config.container_class, "tabpanel-container");
        assert_eq!(config.tab_options().inactive_class, "hidden");

        let config = Config::from_json_str(r#"{"focus_on_init": false}"#).unwrap();
        assert!(!config.tab_options().focus_on_init);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(matches!(
            Config::from_json_str(r#"{"overlaps_class": ""}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"container_class": "a b"}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"root_font_size_px": 0}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str("not json"),
            Err(CoreError::Serialization(_))
        ));
    }
}
