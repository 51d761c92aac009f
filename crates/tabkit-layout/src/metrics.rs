//! Rendered-size measurement

use serde::{Deserialize, Serialize};
use tabkit_dom::{Document, NodeId};

use crate::error::LayoutError;
use crate::length::Length;
use crate::Result;

/// Font size of the root element when nothing else is declared
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// The subset of an element's computed style the normalizer needs, in px
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub border_top_width: f64,
    pub border_bottom_width: f64,
    pub font_size: f64,
}

impl ComputedStyle {
    /// Vertical padding plus vertical border
    pub fn vertical_chrome(&self) -> f64 {
        self.padding_top + self.padding_bottom + self.border_top_width + self.border_bottom_width
    }
}

/// Source of layout measurements for elements of a [`Document`]
pub trait Metrics {
    /// Border-box height of the rendered element in px
    fn bounding_height(&self, doc: &Document, node: NodeId) -> Result<f64>;

    fn computed_style(&self, doc: &Document, node: NodeId) -> Result<ComputedStyle>;
}

/// Metrics computed from inline `style` attributes.
///
/// `height` is the content height (or the border-box height under
/// `box-sizing: border-box`). Missing or `auto` values count as zero.
/// Elements with `display: none`, or inside one, or carrying one of the
/// hidden classes, measure zero height.
#[derive(Debug, Clone)]
pub struct InlineStyleMetrics {
    root_font_size: f64,
    hidden_classes: Vec<String>,
}

impl InlineStyleMetrics {
    pub fn new() -> Self {
        Self {
            root_font_size: ROOT_FONT_SIZE_PX,
            hidden_classes: Vec::new(),
        }
    }

    pub fn with_root_font_size(mut self, px: f64) -> Self {
        self.root_font_size = px;
        self
    }

    /// Treat elements carrying `class` as not rendered
    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_classes.push(class.into());
        self
    }

    fn is_hidden(&self, doc: &Document, node: NodeId) -> bool {
        std::iter::once(node).chain(doc.ancestors(node)).any(|id| {
            doc.style_property(id, "display")
                .is_some_and(|d| d.eq_ignore_ascii_case("none"))
                || self.hidden_classes.iter().any(|c| doc.has_class(id, c))
        })
    }

    /// Font size of `node`, resolved from the outermost element inwards
    fn font_size(&self, doc: &Document, node: NodeId) -> Result<f64> {
        let mut chain: Vec<NodeId> = doc
            .ancestors(node)
            .take_while(|&id| doc.is_element(id))
            .collect();
        chain.reverse();
        chain.push(node);

        let mut size = self.root_font_size;
        for id in chain {
            if let Some(value) = doc.style_property(id, "font-size") {
                let length = parse(&value, "font-size")?;
                // em and % on font-size refer to the parent's font size
                size = length
                    .to_px(size, self.root_font_size, Some(size))
                    .ok_or_else(|| invalid("font-size", &value))?;
            }
            if !(size > 0.0 && size.is_finite()) {
                return Err(LayoutError::InvalidFontSize {
                    node: doc.describe(id),
                    value: size,
                });
            }
        }
        Ok(size)
    }

    fn length_px(&self, property: &str, value: &str, font_size: f64) -> Result<f64> {
        let px = parse(value, property)?
            .to_px(font_size, self.root_font_size, None)
            .ok_or_else(|| invalid(property, value))?;
        if px < 0.0 {
            return Err(invalid(property, value));
        }
        Ok(px)
    }

    fn border_width_px(&self, property: &str, value: &str, font_size: f64) -> Result<f64> {
        match value.trim().to_ascii_lowercase().as_str() {
            "thin" => Ok(1.0),
            "medium" => Ok(3.0),
            "thick" => Ok(5.0),
            _ => self.length_px(property, value, font_size),
        }
    }

    /// Width from a `border` / `border-top` shorthand: the first token that
    /// is a width. A shorthand without one resets the width to zero.
    fn border_shorthand_width(&self, property: &str, value: &str, font_size: f64) -> Result<f64> {
        for token in value.split_ascii_whitespace() {
            if let Ok(px) = self.border_width_px(property, token, font_size) {
                return Ok(px);
            }
        }
        Ok(0.0)
    }
}

impl Default for InlineStyleMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for InlineStyleMetrics {
    fn bounding_height(&self, doc: &Document, node: NodeId) -> Result<f64> {
        doc.element(node)?;
        if self.is_hidden(doc, node) {
            return Ok(0.0);
        }

        let style = self.computed_style(doc, node)?;
        let height = match doc.style_property(node, "height") {
            Some(value) if !value.trim().eq_ignore_ascii_case("auto") => {
                self.length_px("height", &value, style.font_size)?
            }
            _ => 0.0,
        };

        let border_box = doc
            .style_property(node, "box-sizing")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("border-box"));
        if border_box {
            Ok(height.max(style.vertical_chrome()))
        } else {
            Ok(height + style.vertical_chrome())
        }
    }

    fn computed_style(&self, doc: &Document, node: NodeId) -> Result<ComputedStyle> {
        let el = doc.element(node)?;
        let font_size = self.font_size(doc, node)?;
        let mut style = ComputedStyle {
            font_size,
            ..ComputedStyle::default()
        };

        // Later declarations win, shorthands included
        for (property, value) in el.style_declarations() {
            match property.as_str() {
                "padding" => {
                    let (top, bottom) = vertical_sides(&value);
                    style.padding_top = self.length_px(&property, top, font_size)?;
                    style.padding_bottom = self.length_px(&property, bottom, font_size)?;
                }
                "padding-top" => style.padding_top = self.length_px(&property, &value, font_size)?,
                "padding-bottom" => {
                    style.padding_bottom = self.length_px(&property, &value, font_size)?
                }
                "border-width" => {
                    let (top, bottom) = vertical_sides(&value);
                    style.border_top_width = self.border_width_px(&property, top, font_size)?;
                    style.border_bottom_width =
                        self.border_width_px(&property, bottom, font_size)?;
                }
                "border-top-width" => {
                    style.border_top_width = self.border_width_px(&property, &value, font_size)?
                }
                "border-bottom-width" => {
                    style.border_bottom_width = self.border_width_px(&property, &value, font_size)?
                }
                "border" => {
                    let width = self.border_shorthand_width(&property, &value, font_size)?;
                    style.border_top_width = width;
                    style.border_bottom_width = width;
                }
                "border-top" => {
                    style.border_top_width =
                        self.border_shorthand_width(&property, &value, font_size)?
                }
                "border-bottom" => {
                    style.border_bottom_width =
                        self.border_shorthand_width(&property, &value, font_size)?
                }
                _ => {}
            }
        }

        Ok(style)
    }
}

/// Top and bottom tokens of a 1-4 value box shorthand
fn vertical_sides(value: &str) -> (&str, &str) {
    let tokens: Vec<&str> = value.split_ascii_whitespace().collect();
    match tokens.as_slice() {
        [] => ("", ""),
        [all] | [all, _] => (*all, *all),
        [top, _, bottom, ..] => (*top, *bottom),
    }
}

fn parse(value: &str, property: &str) -> Result<Length> {
    Length::parse(value).ok_or_else(|| invalid(property, value))
}

fn invalid(property: &str, value: &str) -> LayoutError {
    LayoutError::InvalidLength {
        property: property.to_string(),
        value: value.to_string(),
    }
}
