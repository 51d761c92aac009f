//! Tab Controller
//!
//! Owns the tab groups and the validated tab → panel map, and applies
//! selection changes to the document.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use tabkit_dom::{Document, NodeId};

use crate::error::TabError;
use crate::event::{EventOutcome, Key, TabEvent};
use crate::group::{GroupId, TabGroup};
use crate::state::TabState;
use crate::Result;

const TAB_ROLE: &str = "tab";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabOptions {
    /// Class hiding a tablist until the controller is initialized
    pub tablist_hidden_class: String,
    /// Class hiding the panel of an inactive tab
    pub inactive_class: String,
    /// Focus the first tab of each group during initialization; the first
    /// tab of the last group ends up focused
    pub focus_on_init: bool,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            tablist_hidden_class: "tablist-hidden".to_string(),
            inactive_class: "tabpanel-inactive".to_string(),
            focus_on_init: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TabEntry {
    group: GroupId,
    panel: NodeId,
}

#[derive(Debug, Clone)]
pub struct TabController {
    groups: Vec<TabGroup>,
    /// Tab → group and panel
    tabs: HashMap<NodeId, TabEntry>,
    options: TabOptions,
}

impl TabController {
    /// Discover tabs under `roots`, validate them, reveal hidden tablists
    /// and activate the first tab of every group.
    ///
    /// Validation happens before any mutation: on error the document is
    /// left as it was.
    pub fn initialize(doc: &mut Document, roots: &[NodeId], options: TabOptions) -> Result<Self> {
        let controller = Self::discover(doc, roots, options)?;

        for list in doc.query_class_all(roots, &controller.options.tablist_hidden_class) {
            doc.remove_class(list, &controller.options.tablist_hidden_class)?;
        }

        for group in &controller.groups {
            for (index, &tab) in group.tabs().iter().enumerate() {
                let state = if index == 0 {
                    TabState::Active
                } else {
                    TabState::Inactive
                };
                controller.apply_state(doc, tab, state)?;
            }
            if controller.options.focus_on_init {
                doc.focus(group.active_tab())?;
            }
        }

        tracing::info!(
            groups = controller.groups.len(),
            tabs = controller.tabs.len(),
            "Initialized tabs"
        );

        Ok(controller)
    }

    /// Build groups and the panel map without touching the document
    pub fn discover(doc: &Document, roots: &[NodeId], options: TabOptions) -> Result<Self> {
        let mut by_parent: HashMap<NodeId, usize> = HashMap::new();
        let mut members: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
        let mut panels: HashMap<NodeId, NodeId> = HashMap::new();

        for tab in doc.query_role_all(roots, TAB_ROLE) {
            let panel = resolve_panel(doc, tab)?;
            panels.insert(tab, panel);

            let parent = match doc.parent(tab).filter(|&p| doc.is_element(p)) {
                Some(parent) => parent,
                None => {
                    tracing::warn!(tab = %doc.describe(tab), "Tab has no parent element, grouping it alone");
                    tab
                }
            };
            let slot = *by_parent.entry(parent).or_insert_with(|| {
                members.push((parent, Vec::new()));
                members.len() - 1
            });
            members[slot].1.push(tab);
        }

        let mut groups = Vec::with_capacity(members.len());
        let mut tabs = HashMap::with_capacity(panels.len());
        for (index, (parent, group_tabs)) in members.into_iter().enumerate() {
            let id = GroupId(index);
            for &tab in &group_tabs {
                if let Some(&panel) = panels.get(&tab) {
                    tabs.insert(tab, TabEntry { group: id, panel });
                }
            }
            if let Some(group) = TabGroup::new(id, parent, group_tabs) {
                groups.push(group);
            }
        }

        Ok(Self {
            groups,
            tabs,
            options,
        })
    }

    /// Make `tab` the active tab of its group: every other tab in the
    /// group is deactivated first, then `tab` is activated and focused.
    pub fn select_tab(&mut self, doc: &mut Document, tab: NodeId) -> Result<()> {
        let entry = self.entry(doc, tab)?;
        let group = self
            .groups
            .get(entry.group.0)
            .ok_or(TabError::GroupNotFound(entry.group.0))?;
        let previous = group.active_tab();
        let others: Vec<NodeId> = group.others(tab).collect();

        for other in others {
            self.apply_state(doc, other, TabState::Inactive)?;
        }
        self.apply_state(doc, tab, TabState::Active)?;
        doc.focus(tab)?;

        if let Some(group) = self.groups.get_mut(entry.group.0) {
            group.set_active(tab);
        }

        if previous != tab {
            tracing::debug!(
                group = %entry.group,
                from = %doc.describe(previous),
                to = %doc.describe(tab),
                "Tab selected"
            );
        }

        Ok(())
    }

    /// Select the tab before `tab`, wrapping to the last one
    pub fn select_previous(&mut self, doc: &mut Document, tab: NodeId) -> Result<NodeId> {
        let target = self
            .group_of(tab)
            .and_then(|g| g.previous(tab))
            .ok_or_else(|| TabError::UnknownTab(doc.describe(tab)))?;
        self.select_tab(doc, target)?;
        Ok(target)
    }

    /// Select the tab after `tab`, wrapping to the first one
    pub fn select_next(&mut self, doc: &mut Document, tab: NodeId) -> Result<NodeId> {
        let target = self
            .group_of(tab)
            .and_then(|g| g.next(tab))
            .ok_or_else(|| TabError::UnknownTab(doc.describe(tab)))?;
        self.select_tab(doc, target)?;
        Ok(target)
    }

    /// Route a click, focus or keydown event.
    ///
    /// Events on nodes that are not managed tabs, key events another
    /// listener already handled, and keys other than Left/Right are
    /// ignored.
    pub fn handle_event(&mut self, doc: &mut Document, event: &TabEvent) -> Result<EventOutcome> {
        let target = event.target();
        if !self.is_tab(target) {
            tracing::trace!(event = event.name(), target = %target, "Event target is not a tab");
            return Ok(EventOutcome::Ignored);
        }

        match event {
            TabEvent::Click { .. } | TabEvent::Focus { .. } => {
                self.select_tab(doc, target)?;
                Ok(EventOutcome::Selected(target))
            }
            TabEvent::KeyDown {
                default_prevented: true,
                ..
            } => Ok(EventOutcome::Ignored),
            TabEvent::KeyDown { key, .. } => match key {
                Key::ArrowLeft => Ok(EventOutcome::Selected(self.select_previous(doc, target)?)),
                Key::ArrowRight => Ok(EventOutcome::Selected(self.select_next(doc, target)?)),
                Key::Other(_) => Ok(EventOutcome::Ignored),
            },
        }
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Result<&TabGroup> {
        self.groups.get(id.0).ok_or(TabError::GroupNotFound(id.0))
    }

    pub fn group_of(&self, tab: NodeId) -> Option<&TabGroup> {
        self.tabs
            .get(&tab)
            .and_then(|entry| self.groups.get(entry.group.0))
    }

    pub fn active_tab(&self, id: GroupId) -> Result<NodeId> {
        Ok(self.group(id)?.active_tab())
    }

    /// Active tab of every group, in group order
    pub fn active_tabs(&self) -> Vec<NodeId> {
        self.groups.iter().map(TabGroup::active_tab).collect()
    }

    pub fn panel_of(&self, tab: NodeId) -> Option<NodeId> {
        self.tabs.get(&tab).map(|entry| entry.panel)
    }

    pub fn state_of(&self, tab: NodeId) -> Option<TabState> {
        let group = self.group_of(tab)?;
        Some(if group.active_tab() == tab {
            TabState::Active
        } else {
            TabState::Inactive
        })
    }

    pub fn is_tab(&self, node: NodeId) -> bool {
        self.tabs.contains_key(&node)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn options(&self) -> &TabOptions {
        &self.options
    }

    fn entry(&self, doc: &Document, tab: NodeId) -> Result<TabEntry> {
        self.tabs
            .get(&tab)
            .copied()
            .ok_or_else(|| TabError::UnknownTab(doc.describe(tab)))
    }

    /// Write a tab's ARIA attributes and show or hide its panel
    fn apply_state(&self, doc: &mut Document, tab: NodeId, state: TabState) -> Result<()> {
        let entry = self.entry(doc, tab)?;

        doc.set_attr(tab, "aria-selected", state.aria_value())?;
        doc.set_attr(tab, "aria-expanded", state.aria_value())?;
        doc.set_attr(tab, "tabindex", state.tabindex())?;

        if state.is_active() {
            doc.remove_class(entry.panel, &self.options.inactive_class)?;
        } else {
            doc.add_class(entry.panel, &self.options.inactive_class)?;
        }

        Ok(())
    }
}

fn resolve_panel(doc: &Document, tab: NodeId) -> Result<NodeId> {
    let panel_id = doc
        .attr(tab, "aria-controls")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| TabError::MissingControls {
            tab: doc.describe(tab),
        })?;

    doc.get_element_by_id(panel_id)
        .ok_or_else(|| TabError::PanelNotFound {
            tab: doc.describe(tab),
            panel_id: panel_id.to_string(),
        })
}
