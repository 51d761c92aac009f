//! Tabpanel container height normalization

use serde::{Deserialize, Serialize};
use tabkit_dom::{Document, NodeId};

use crate::error::LayoutError;
use crate::metrics::Metrics;
use crate::Result;

const TABPANEL_ROLE: &str = "tabpanel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Class marking a container whose height gets fixed
    pub container_class: String,
    /// Class added once the container height is fixed
    pub overlaps_class: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            container_class: "tabpanel-container".to_string(),
            overlaps_class: "tabpanel-overlaps".to_string(),
        }
    }
}

/// Measurements taken for one container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContainer {
    pub container: NodeId,
    pub panel_count: usize,
    /// Tallest panel, border box
    pub max_panel_height_px: f64,
    /// Tallest panel plus the container's vertical padding and border
    pub padded_height_px: f64,
    pub font_size_px: f64,
    pub height_em: f64,
}

impl NormalizedContainer {
    /// The value written to `height` and `min-height`
    pub fn css_height(&self) -> String {
        format!("{}em", self.height_em)
    }
}

/// Normalize every container under `roots`.
///
/// All containers are measured before any is modified, so an error leaves
/// the document untouched.
pub fn normalize_containers(
    doc: &mut Document,
    roots: &[NodeId],
    metrics: &dyn Metrics,
    options: &NormalizeOptions,
) -> Result<Vec<NormalizedContainer>> {
    let containers = doc.query_class_all(roots, &options.container_class);

    let snapshot: &Document = doc;
    let measured = containers
        .iter()
        .map(|&container| measure(snapshot, container, metrics))
        .collect::<Result<Vec<_>>>()?;

    for normalized in &measured {
        apply(doc, normalized, options)?;
    }

    tracing::info!(containers = measured.len(), "Normalized tabpanel containers");

    Ok(measured)
}

/// Normalize a single container
pub fn normalize_container(
    doc: &mut Document,
    container: NodeId,
    metrics: &dyn Metrics,
    options: &NormalizeOptions,
) -> Result<NormalizedContainer> {
    let normalized = measure(doc, container, metrics)?;
    apply(doc, &normalized, options)?;
    Ok(normalized)
}

fn measure(doc: &Document, container: NodeId, metrics: &dyn Metrics) -> Result<NormalizedContainer> {
    let panels: Vec<NodeId> = doc
        .query_role(container, TABPANEL_ROLE)
        .into_iter()
        .filter(|&panel| panel != container)
        .collect();

    let mut max_panel_height_px: Option<f64> = None;
    for &panel in &panels {
        let height = metrics.bounding_height(doc, panel)?;
        max_panel_height_px = Some(max_panel_height_px.map_or(height, |max| max.max(height)));
    }
    let max_panel_height_px =
        max_panel_height_px.ok_or_else(|| LayoutError::EmptyContainer(doc.describe(container)))?;

    let style = metrics.computed_style(doc, container)?;
    if !(style.font_size > 0.0 && style.font_size.is_finite()) {
        return Err(LayoutError::InvalidFontSize {
            node: doc.describe(container),
            value: style.font_size,
        });
    }

    let padded_height_px = max_panel_height_px + style.vertical_chrome();
    let height_em = padded_height_px / style.font_size;

    tracing::debug!(
        container = %doc.describe(container),
        panels = panels.len(),
        max_panel_height_px,
        padded_height_px,
        height_em,
        "Measured tabpanel container"
    );

    Ok(NormalizedContainer {
        container,
        panel_count: panels.len(),
        max_panel_height_px,
        padded_height_px,
        font_size_px: style.font_size,
        height_em,
    })
}

fn apply(doc: &mut Document, normalized: &NormalizedContainer, options: &NormalizeOptions) -> Result<()> {
    let height = normalized.css_height();
    doc.set_style_property(normalized.container, "height", &height)?;
    doc.set_style_property(normalized.container, "min-height", &height)?;
    doc.add_class(normalized.container, &options.overlaps_class)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::InlineStyleMetrics;

    fn container_with_panels(
        doc: &mut Document,
        container_style: &str,
        heights: &[&str],
    ) -> (NodeId, Vec<NodeId>) {
        let root = doc.root();
        let container = doc
            .append_element(
                root,
                "div",
                &[("class", "tabpanel-container"), ("style", container_style)],
            )
            .unwrap();
        let panels = heights
            .iter()
            .map(|h| {
                let style = format!("height: {}", h);
                doc.append_element(container, "div", &[("role", "tabpanel"), ("style", style.as_str())])
                    .unwrap()
            })
            .collect();
        (container, panels)
    }

    #[test]
    fn test_tallest_panel_plus_padding_in_em() {
        let mut doc = Document::new();
        let (container, _) = container_with_panels(
            &mut doc,
            "padding-top: 10px; padding-bottom: 10px; font-size: 16px",
            &["100px", "150px", "120px"],
        );
        let root = doc.root();

        let result = normalize_containers(
            &mut doc,
            &[root],
            &InlineStyleMetrics::new(),
            &NormalizeOptions::default(),
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].panel_count, 3);
        assert_eq!(result[0].max_panel_height_px, 150.0);
        assert_eq!(result[0].padded_height_px, 170.0);
        assert_eq!(result[0].height_em, 10.625);
        assert_eq!(doc.style_property(container, "height"), Some("10.625em".to_string()));
        assert_eq!(
            doc.style_property(container, "min-height"),
            Some("10.625em".to_string())
        );
        assert!(doc.has_class(container, "tabpanel-overlaps"));
    }

    #[test]
    fn test_border_and_font_size_scale() {
        let mut doc = Document::new();
        let (container, _) = container_with_panels(
            &mut doc,
            "border: 5px solid; font-size: 20px",
            &["90px", "40px"],
        );

        let result = normalize_container(
            &mut doc,
            container,
            &InlineStyleMetrics::new(),
            &NormalizeOptions::default(),
        )
        .unwrap();

        assert_eq!(result.css_height(), "5em");
    }

    #[test]
    fn test_empty_container_fails_without_mutation() {
        let mut doc = Document::new();
        let (good, _) = container_with_panels(&mut doc, "", &["10px"]);
        container_with_panels(&mut doc, "", &[]);
        let root = doc.root();

        let err = normalize_containers(
            &mut doc,
            &[root],
            &InlineStyleMetrics::new(),
            &NormalizeOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, LayoutError::EmptyContainer(_)));
        assert!(doc.style_property(good, "height").is_none());
        assert!(!doc.has_class(good, "tabpanel-overlaps"));
    }

    #[test]
    fn test_hidden_panels_are_not_measured() {
        let mut doc = Document::new();
        let (container, panels) =
            container_with_panels(&mut doc, "", &["100px", "150px", "120px"]);
        doc.add_class(panels[1], "tabpanel-inactive").unwrap();

        let metrics = InlineStyleMetrics::new().with_hidden_class("tabpanel-inactive");
        let result =
            normalize_container(&mut doc, container, &metrics, &NormalizeOptions::default())
                .unwrap();

        assert_eq!(result.max_panel_height_px, 120.0);
    }

    #[test]
    fn test_custom_class_names() {
        let mut doc = Document::new();
        let root = doc.root();
        let container = doc
            .append_element(root, "section", &[("class", "panes")])
            .unwrap();
        doc.append_element(container, "div", &[("role", "tabpanel"), ("style", "height: 32px")])
            .unwrap();

        let options = NormalizeOptions {
            container_class: "panes".to_string(),
            overlaps_class: "stacked".to_string(),
        };
        normalize_containers(&mut doc, &[root], &InlineStyleMetrics::new(), &options).unwrap();

        assert!(doc.has_class(container, "stacked"));
        assert_eq!(doc.style_property(container, "height"), Some("2em".to_string()));
    }
}
