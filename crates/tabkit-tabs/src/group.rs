//! Tab groups (tablists)

use serde::{Deserialize, Serialize};
use tabkit_dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub usize);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Tabs sharing single-selection semantics, in document order.
///
/// A group is never empty and always has exactly one active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabGroup {
    id: GroupId,
    /// Element containing the tabs (the tablist)
    parent: NodeId,
    tabs: Vec<NodeId>,
    active: usize,
}

impl TabGroup {
    /// Returns `None` for an empty tab list. The first tab starts active.
    pub fn new(id: GroupId, parent: NodeId, tabs: Vec<NodeId>) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }
        Some(Self {
            id,
            parent,
            tabs,
            active: 0,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, tab: NodeId) -> bool {
        self.position(tab).is_some()
    }

    pub fn position(&self, tab: NodeId) -> Option<usize> {
        self.tabs.iter().position(|&t| t == tab)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> NodeId {
        self.tabs[self.active]
    }

    /// Mark `tab` active; returns false if it is not in this group
    pub fn set_active(&mut self, tab: NodeId) -> bool {
        match self.position(tab) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Tab before `tab`, wrapping from the first to the last
    pub fn previous(&self, tab: NodeId) -> Option<NodeId> {
        let index = self.position(tab)?;
        let prev = if index == 0 {
            self.tabs.len() - 1
        } else {
            index - 1
        };
        Some(self.tabs[prev])
    }

    /// Tab after `tab`, wrapping from the last to the first
    pub fn next(&self, tab: NodeId) -> Option<NodeId> {
        let index = self.position(tab)?;
        Some(self.tabs[(index + 1) % self.tabs.len()])
    }

    /// Every tab in the group except `tab`
    pub fn others(&self, tab: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tabs.iter().copied().filter(move |&t| t != tab)
    }
}
