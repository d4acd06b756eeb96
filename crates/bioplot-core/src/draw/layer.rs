//! Layer-based SVG output.
//!
//! Renderers push SVG nodes tagged with a [`RenderLayer`] into a
//! [`LayeredOutput`]; rendering emits one `<g>` per non-empty layer in
//! z-order, so annotation fills never cover chromosome outlines regardless
//! of the order in which they were produced.
//!
//! # Example
//!
//! ```
//! # use bioplot_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Polyline, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Outline, Box::new(Polyline::new()));
//! output.add_to_layer(RenderLayer::Annotation, Box::new(Rectangle::new()));
//!
//! // Annotation renders below Outline even though it was added later
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Annotation rectangles inside chromosome bodies
    Annotation,
    /// Chromosome outlines and gene backbones
    Outline,
    /// Outer value tracks and gene arrows
    Track,
    /// Point markers
    Marker,
    /// Tick labels
    Axis,
    /// Colorbar legend
    Legend,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Annotation => "annotation",
            Self::Outline => "outline",
            Self::Track => "track",
            Self::Marker => "marker",
            Self::Axis => "axis",
            Self::Legend => "legend",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the given layer, after the nodes already there.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends all nodes of `other`, keeping their layers.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Nodes
    /// within a layer keep insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
