//! Inline SVG visualizations.

use crate::dom::{Element, ParseError};
use crate::model::Visualization;
use crate::pipeline::sanitize::{self, Finding, Profile};

/// Wrap one sanitized visualization in a captioned figure.
///
/// Returns `Ok(None)` when nothing drawable survives sanitizing; parse
/// failures propagate so the caller can drop and report the item.
pub fn visualization(viz: &Visualization, index: usize) -> Result<Option<(Element, Vec<Finding>)>, ParseError> {
    let sanitized = sanitize::sanitize(&viz.svg_content, Profile::Svg)?;
    let nodes = crate::dom::Fragment::parse(&sanitized.html)?.nodes;
    if !nodes.iter().any(|n| n.as_element().is_some_and(|e| e.is("svg"))) {
        return Ok(None);
    }

    let title = viz
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| format!("Visualisierung {}", index + 1), str::to_string);
    let id = viz
        .id
        .as_deref()
        .map(crate::utils::slug::slugify)
        .filter(|id| !id.is_empty())
        .map_or_else(|| format!("viz-{index}"), |id| format!("viz-{id}"));

    let figure = Element::new("figure")
        .class("od-visualization")
        .with("id", id)
        .child(Element::new("div").class("od-visualization__graphic").children(nodes))
        .child(Element::new("figcaption").class("od-visualization__caption").text(title));

    Ok(Some((figure, sanitized.findings)))
}
