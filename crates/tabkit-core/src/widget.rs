//! Tab widget
//!
//! Holds the document and the tab controller behind one lock so every
//! event is applied as a unit. Cloning the widget clones the handle.

use parking_lot::RwLock;
use std::sync::Arc;

use tabkit_dom::{Document, NodeId};
use tabkit_layout::{normalize_containers, Metrics, NormalizedContainer};
use tabkit_tabs::{EventOutcome, TabController, TabError, TabEvent, TabGroup};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

struct WidgetState {
    document: Document,
    controller: TabController,
}

pub struct TabWidget {
    state: Arc<RwLock<WidgetState>>,
    /// Container measurements taken at setup
    containers: Arc<Vec<NormalizedContainer>>,
    config: Config,
}

impl TabWidget {
    /// Wire up the tabs found under `roots`.
    ///
    /// Containers are normalized before the tabs are initialized: the
    /// normalizer has to measure every panel while it is still visible.
    pub fn setup(
        mut document: Document,
        roots: &[NodeId],
        config: Config,
        metrics: &dyn Metrics,
    ) -> Result<Self> {
        config.validate()?;
        if roots.is_empty() {
            return Err(CoreError::Config("no root elements to scan".to_string()));
        }

        let containers =
            normalize_containers(&mut document, roots, metrics, &config.normalize_options())?;
        let controller = TabController::initialize(&mut document, roots, config.tab_options())?;

        tracing::info!(
            roots = roots.len(),
            containers = containers.len(),
            groups = controller.groups().len(),
            tabs = controller.tab_count(),
            "Tab widget ready"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(WidgetState {
                document,
                controller,
            })),
            containers: Arc::new(containers),
            config,
        })
    }

    /// Parse `html` and set up the whole document with inline-style metrics
    pub fn from_html(html: &str, config: Config) -> Result<Self> {
        let document = Document::parse_html(html);
        let root = document.root();
        let metrics = config.inline_metrics();
        Self::setup(document, &[root], config, &metrics)
    }

    /// Apply a click, focus or keydown event
    pub fn dispatch(&self, event: &TabEvent) -> Result<EventOutcome> {
        let mut state = self.state.write();
        let WidgetState {
            document,
            controller,
        } = &mut *state;
        Ok(controller.handle_event(document, event)?)
    }

    /// Decode a JSON event from the host and apply it
    pub fn dispatch_json(&self, json: &str) -> Result<EventOutcome> {
        let event = TabEvent::from_json(json)?;
        self.dispatch(&event)
    }

    pub fn select_tab(&self, tab: NodeId) -> Result<()> {
        let mut state = self.state.write();
        let WidgetState {
            document,
            controller,
        } = &mut *state;
        Ok(controller.select_tab(document, tab)?)
    }

    /// Select the tab whose element id is `element_id`
    pub fn select_by_id(&self, element_id: &str) -> Result<NodeId> {
        let mut state = self.state.write();
        let WidgetState {
            document,
            controller,
        } = &mut *state;
        let tab = document
            .get_element_by_id(element_id)
            .filter(|&node| controller.is_tab(node))
            .ok_or_else(|| TabError::UnknownTab(format!("#{}", element_id)))?;
        controller.select_tab(document, tab)?;
        Ok(tab)
    }

    /// Active tab of every group, in document order of the groups
    pub fn active_tabs(&self) -> Vec<NodeId> {
        self.state.read().controller.active_tabs()
    }

    /// Element ids of the active tabs; tabs without an id are skipped
    pub fn active_tab_ids(&self) -> Vec<String> {
        let state = self.state.read();
        state
            .controller
            .active_tabs()
            .into_iter()
            .filter_map(|tab| state.document.attr(tab, "id").map(str::to_string))
            .collect()
    }

    pub fn groups(&self) -> Vec<TabGroup> {
        self.state.read().controller.groups().to_vec()
    }

    pub fn containers(&self) -> &[NormalizedContainer] {
        &self.containers
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `f` with read access to the document
    pub fn with_document<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Document) -> T,
    {
        let state = self.state.read();
        f(&state.document)
    }

    /// Serialize the current document
    pub fn to_html(&self) -> String {
        self.with_document(Document::to_html)
    }
}

impl Clone for TabWidget {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            containers: Arc::clone(&self.containers),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabkit_layout::InlineStyleMetrics;
    use tabkit_tabs::Key;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="tablist tablist-hidden" role="tablist">
    <button role="tab" id="tab-1" aria-controls="panel-1">First</button>
    <button role="tab" id="tab-2" aria-controls="panel-2">Second</button>
    <button role="tab" id="tab-3" aria-controls="panel-3">Third</button>
  </div>
  <div class="tabpanel-container" style="padding-top: 10px; padding-bottom: 10px; font-size: 16px">
    <div role="tabpanel" id="panel-1" style="height: 100px">One</div>
    <div role="tabpanel" id="panel-2" style="height: 150px">Two</div>
    <div role="tabpanel" id="panel-3" style="height: 120px">Three</div>
  </div>
</body>
</html>"#;

    fn widget() -> TabWidget {
        TabWidget::from_html(PAGE, Config::default()).unwrap()
    }

    fn node(widget: &TabWidget, element_id: &str) -> NodeId {
        widget.with_document(|doc| doc.get_element_by_id(element_id).unwrap())
    }

    fn container_height(widget: &TabWidget) -> Option<String> {
        let container = widget.containers()[0].container;
        widget.with_document(|doc| doc.style_property(container, "height"))
    }

    #[test]
    fn test_setup_normalizes_then_initializes() {
        let widget = widget();

        assert_eq!(widget.containers().len(), 1);
        assert_eq!(widget.containers()[0].height_em, 10.625);
        assert_eq!(container_height(&widget), Some("10.625em".to_string()));
        assert_eq!(widget.active_tab_ids(), vec!["tab-1".to_string()]);
        let tab_1 = node(&widget, "tab-1");
        assert_eq!(widget.with_document(|doc| doc.focused()), Some(tab_1));

        widget.with_document(|doc| {
            let container = widget.containers()[0].container;
            assert!(doc.has_class(container, "tabpanel-overlaps"));
            assert!(doc.query_class(doc.root(), "tablist-hidden").is_empty());
            let list = doc.query_role(doc.root(), "tablist")[0];
            assert!(doc.has_class(list, "tablist"));

            let panel_2 = doc.get_element_by_id("panel-2").unwrap();
            assert!(doc.has_class(panel_2, "tabpanel-inactive"));
        });
    }

    #[test]
    fn test_height_stable_across_selections() {
        let widget = widget();
        let before = container_height(&widget);

        for element_id in ["tab-2", "tab-3", "tab-1"] {
            widget.select_by_id(element_id).unwrap();
            assert_eq!(container_height(&widget), before);
        }
        assert_eq!(widget.active_tab_ids(), vec!["tab-1".to_string()]);
    }

    #[test]
    fn test_normalizing_after_hiding_measures_less() {
        // Initializing the tabs first hides panel-2, the tallest one
        let mut doc = Document::parse_html(PAGE);
        let root = doc.root();
        let config = Config::default();
        TabController::initialize(&mut doc, &[root], config.tab_options()).unwrap();
        let late = normalize_containers(
            &mut doc,
            &[root],
            &config.inline_metrics(),
            &config.normalize_options(),
        )
        .unwrap();

        assert_eq!(late[0].max_panel_height_px, 100.0);
        assert!(late[0].height_em < widget().containers()[0].height_em);
    }

    #[test]
    fn test_dispatch_keyboard_navigation() {
        let widget = widget();
        let tab_1 = node(&widget, "tab-1");
        let tab_3 = node(&widget, "tab-3");

        let outcome = widget
            .dispatch(&TabEvent::key_down(tab_1, Key::ArrowLeft))
            .unwrap();
        assert_eq!(outcome, EventOutcome::Selected(tab_3));
        assert_eq!(widget.active_tab_ids(), vec!["tab-3".to_string()]);
        assert_eq!(widget.with_document(|doc| doc.focused()), Some(tab_3));

        let json = format!(
            r#"{{"type": "keydown", "target": {}, "key": "ArrowRight", "default_prevented": true}}"#,
            tab_3.index()
        );
        assert_eq!(widget.dispatch_json(&json).unwrap(), EventOutcome::Ignored);
        assert_eq!(widget.active_tab_ids(), vec!["tab-3".to_string()]);

        let json = format!(r#"{{"type": "keydown", "target": {}, "key": "ArrowRight"}}"#, tab_3.index());
        assert_eq!(widget.dispatch_json(&json).unwrap(), EventOutcome::Selected(tab_1));
    }

    #[test]
    fn test_to_html_keeps_doctype_and_state() {
        let html = widget().to_html();
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains(r#"aria-selected="true""#));
        assert!(html.contains("height: 10.625em"));
    }

    #[test]
    fn test_clones_share_state() {
        let widget = widget();
        let other = widget.clone();

        other.select_by_id("tab-2").unwrap();
        assert_eq!(widget.active_tab_ids(), vec!["tab-2".to_string()]);
        assert!(widget.to_html().contains(r#"id="tab-2""#));
    }

    #[test]
    fn test_select_by_id_rejects_non_tabs() {
        let widget = widget();
        assert!(matches!(
            widget.select_by_id("panel-1"),
            Err(CoreError::Tab(TabError::UnknownTab(_)))
        ));
        assert!(widget.select_by_id("missing").is_err());
    }

    #[test]
    fn test_setup_errors() {
        let doc = Document::parse_html(PAGE);
        let metrics = InlineStyleMetrics::new();
        assert!(matches!(
            TabWidget::setup(doc, &[], Config::default(), &metrics),
            Err(CoreError::Config(_))
        ));

        let broken = PAGE.replace(r#"aria-controls="panel-2""#, r#"aria-controls="panel-9""#);
        assert!(matches!(
            TabWidget::from_html(&broken, Config::default()),
            Err(CoreError::Tab(TabError::PanelNotFound { .. }))
        ));

        let empty = r#"<div class="tabpanel-container"></div>"#;
        assert!(matches!(
            TabWidget::from_html(empty, Config::default()),
            Err(CoreError::Layout(_))
        ));
    }

    #[test]
    fn test_custom_config_class_names() {
        let html = PAGE
            .replace("tabpanel-container", "panes")
            .replace("tablist-hidden", "js-only");
        let config = Config::from_json_str(
            r#"{"container_class": "panes", "tablist_hidden_class": "js-only", "inactive_class": "is-hidden"}"#,
        )
        .unwrap();

        let widget = TabWidget::from_html(&html, config).unwrap();

        assert_eq!(container_height(&widget), Some("10.625em".to_string()));
        let panel_3 = node(&widget, "panel-3");
        widget.with_document(|doc| {
            assert!(doc.has_class(panel_3, "is-hidden"));
            assert!(doc.query_class(doc.root(), "js-only").is_empty());
        });
    }
}
