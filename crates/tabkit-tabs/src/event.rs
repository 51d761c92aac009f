//! Input events routed to the tab controller
//!
//! Events can be built directly or decoded from JSON forwarded by a host:
//! `{"type": "keydown", "target": 3, "key": "ArrowRight"}`

use serde::{Deserialize, Serialize};
use tabkit_dom::NodeId;

/// Keyboard key, using DOM `KeyboardEvent.key` names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    pub fn as_str(&self) -> &str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from(name.as_str())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.as_str().to_string()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TabEvent {
    Click {
        target: NodeId,
    },
    Focus {
        target: NodeId,
    },
    KeyDown {
        target: NodeId,
        key: Key,
        /// Set when another listener already handled the event
        #[serde(default)]
        default_prevented: bool,
    },
}

impl TabEvent {
    pub fn click(target: NodeId) -> Self {
        TabEvent::Click { target }
    }

    pub fn focus(target: NodeId) -> Self {
        TabEvent::Focus { target }
    }

    pub fn key_down(target: NodeId, key: impl Into<Key>) -> Self {
        TabEvent::KeyDown {
            target,
            key: key.into(),
            default_prevented: false,
        }
    }

    /// Mark the event as already handled elsewhere
    pub fn prevent_default(mut self) -> Self {
        if let TabEvent::KeyDown {
            default_prevented, ..
        } = &mut self
        {
            *default_prevented = true;
        }
        self
    }

    pub fn target(&self) -> NodeId {
        match self {
            TabEvent::Click { target }
            | TabEvent::Focus { target }
            | TabEvent::KeyDown { target, .. } => *target,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TabEvent::Click { .. } => "click",
            TabEvent::Focus { .. } => "focus",
            TabEvent::KeyDown { .. } => "keydown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// The given tab is now the active tab of its group
    Selected(NodeId),
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabkit_dom::Document;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from("Enter"), Key::Other("Enter".to_string()));
        assert_eq!(Key::ArrowRight.to_string(), "ArrowRight");
    }

    #[test]
    fn test_decode_keydown() {
        let mut doc = Document::new();
        let root = doc.root();
        let tab = doc.append_element(root, "button", &[]).unwrap();

        let json = format!(
            r#"{{"type": "keydown", "target": {}, "key": "ArrowRight"}}"#,
            tab.index()
        );
        let event = TabEvent::from_json(&json).unwrap();
        assert_eq!(event, TabEvent::key_down(tab, "ArrowRight"));
        assert_eq!(event.target(), tab);
        assert_eq!(event.name(), "keydown");

        let json = format!(
            r#"{{"type": "keydown", "target": {}, "key": "x", "default_prevented": true}}"#,
            tab.index()
        );
        let event = TabEvent::from_json(&json).unwrap();
        assert_eq!(event, TabEvent::key_down(tab, "x").prevent_default());
    }

    #[test]
    fn test_decode_click_and_reject_unknown() {
        let event = TabEvent::from_json(r#"{"type": "click", "target": 0}"#).unwrap();
        assert_eq!(event.name(), "click");
        assert!(TabEvent::from_json(r#"{"type": "scroll", "target": 0}"#).is_err());
    }

    #[test]
    fn test_prevent_default_only_affects_keys() {
        let doc = Document::new();
        let click = TabEvent::click(doc.root());
        assert_eq!(click.clone().prevent_default(), click);
    }
}
