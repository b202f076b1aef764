//! Retained scene graph produced by the renderer.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Node 0 is the
//! root group; every other node has exactly one parent.

use serde::Serialize;

/// Index of a node inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A length that is either absolute or relative to the font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    Px(f64),
    Em(f64),
}

impl Length {
    /// Resolve to pixels for the given font size.
    pub fn to_px(self, font_size: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Em(em) => em * font_size,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}"),
            Self::Em(em) => write!(f, "{em}em"),
        }
    }
}

/// One line segment of a multi-line text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    /// Absolute x of the span.
    pub x: f64,
    /// Vertical offset from the previous span.
    pub dy: Length,
    pub text: String,
}

/// Text payload of a text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContent {
    Plain(String),
    Spans(Vec<TextSpan>),
}

impl TextContent {
    /// The visible segments, one per line.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Plain(text) => vec![text.as_str()],
            Self::Spans(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
        }
    }
}

/// Geometry of a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Group,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text {
        x: f64,
        y: f64,
        /// Extra vertical shift applied to the whole text.
        dy: Length,
        anchor: TextAnchor,
        content: TextContent,
    },
}

impl Shape {
    /// A square-cornered rectangle.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
            rx: 0.0,
            ry: 0.0,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::Line { x1, y1, x2, y2 }
    }

    /// Single-line text.
    pub fn text(x: f64, y: f64, anchor: TextAnchor, text: impl Into<String>) -> Self {
        Self::Text {
            x,
            y,
            dy: Length::Px(0.0),
            anchor,
            content: TextContent::Plain(text.into()),
        }
    }

    /// Short tag used in logs and exports.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Group => "g",
            Self::Rect { .. } => "rect",
            Self::Line { .. } => "line",
            Self::Text { .. } => "text",
        }
    }
}

/// Presentation attributes of a node. `None` means inherited/unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash: Option<Vec<f64>>,
    pub opacity: f64,
    pub font_size: Option<f64>,
    pub bold: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: None,
            dash: None,
            opacity: 1.0,
            font_size: None,
            bold: false,
        }
    }
}

impl Style {
    #[must_use]
    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    #[must_use]
    pub fn stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    #[must_use]
    pub fn dash(mut self, pattern: &[f64]) -> Self {
        self.dash = Some(pattern.to_vec());
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn font(mut self, size: f64, bold: bool) -> Self {
        self.font_size = Some(size);
        self.bold = bold;
        self
    }
}

/// A node in the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub shape: Shape,
    pub classes: Vec<String>,
    /// Translation applied to this node and its subtree.
    pub translate: (f64, f64),
    pub style: Style,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Arena-backed scene graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only the root group.
    pub fn new() -> Self {
        let root = Node {
            id: NodeId(0),
            parent: None,
            children: Vec::new(),
            shape: Shape::Group,
            classes: Vec::new(),
            translate: (0.0, 0.0),
            style: Style::default(),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append a node under `parent` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this scene.
    pub fn append(&mut self, parent: NodeId, shape: Shape, style: Style) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent node {parent:?}");
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            shape,
            classes: Vec::new(),
            translate: (0.0, 0.0),
            style,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Add a class to a node. Unknown ids are ignored.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    /// Set a node's translation. Unknown ids are ignored.
    pub fn set_translate(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.translate = (x, y);
        }
    }

    /// Set a node's opacity. Unknown ids are ignored.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.style.opacity = opacity;
        }
    }

    /// All nodes, in creation (document) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Depth-first descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendants of `scope` whose shape has the given tag.
    pub fn select_within(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.nodes[id.0].shape.tag() == tag)
            .collect()
    }

    /// Nodes carrying `class`, anywhere in the scene.
    pub fn select_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.has_class(class))
            .map(|n| n.id)
            .collect()
    }

    /// Sum of translations from the root down to and including `id`.
    pub fn absolute_offset(&self, id: NodeId) -> (f64, f64) {
        let mut offset = (0.0, 0.0);
        let mut current = self.nodes.get(id.0);
        while let Some(node) = current {
            offset.0 += node.translate.0;
            offset.1 += node.translate.1;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        offset
    }

    /// Product of opacities from the root down to and including `id`.
    pub fn effective_opacity(&self, id: NodeId) -> f64 {
        let mut opacity = 1.0;
        let mut current = self.nodes.get(id.0);
        while let Some(node) = current {
            opacity *= node.style.opacity;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        opacity
    }

    /// Whether `point` (scene coordinates) is inside the rect node `id`.
    pub fn rect_contains(&self, id: NodeId, point: (f64, f64)) -> bool {
        let Some(node) = self.nodes.get(id.0) else {
            return false;
        };
        let Shape::Rect {
            x, y, width, height, ..
        } = node.shape
        else {
            return false;
        };
        let (ox, oy) = self.absolute_offset(id);
        let (left, top) = (x + ox, y + oy);
        point.0 >= left && point.0 < left + width && point.1 >= top && point.1 < top + height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let group = scene.append(scene.root(), Shape::Group, Style::default());
        let rect = scene.append(group, Shape::rect(0.0, 0.0, 10.0, 10.0), Style::default());
        assert_eq!(scene.children(scene.root()), &[group]);
        assert_eq!(scene.children(group), &[rect]);
        assert_eq!(scene.node(rect).unwrap().parent, Some(group));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_descendants_are_depth_first() {
        let mut scene = Scene::new();
        let a = scene.append(scene.root(), Shape::Group, Style::default());
        let a1 = scene.append(a, Shape::Group, Style::default());
        let b = scene.append(scene.root(), Shape::Group, Style::default());
        let a2 = scene.append(a, Shape::Group, Style::default());
        assert_eq!(scene.descendants(scene.root()), vec![a, a1, a2, b]);
    }

    #[test]
    fn test_select_within_is_scoped() {
        let mut scene = Scene::new();
        let axis = scene.append(scene.root(), Shape::Group, Style::default());
        let inside = scene.append(axis, Shape::line(0.0, 0.0, 1.0, 0.0), Style::default());
        let outside = scene.append(scene.root(), Shape::line(0.0, 0.0, 0.0, 1.0), Style::default());

        let lines = scene.select_within(axis, "line");
        assert_eq!(lines, vec![inside]);
        assert!(!lines.contains(&outside));
    }

    #[test]
    fn test_offsets_and_opacity_compose() {
        let mut scene = Scene::new();
        let group = scene.append(scene.root(), Shape::Group, Style::default().opacity(0.5));
        scene.set_translate(group, 100.0, 20.0);
        let rect = scene.append(group, Shape::rect(5.0, 5.0, 10.0, 10.0), Style::default());
        scene.set_opacity(rect, 0.5);

        assert_eq!(scene.absolute_offset(rect), (100.0, 20.0));
        assert!((scene.effective_opacity(rect) - 0.25).abs() < 1e-9);
        assert!(scene.rect_contains(rect, (105.0, 25.0)));
        assert!(!scene.rect_contains(rect, (5.0, 5.0)));
        assert!(!scene.rect_contains(group, (105.0, 25.0)));
    }

    #[test]
    fn test_classes() {
        let mut scene = Scene::new();
        let group = scene.append(scene.root(), Shape::Group, Style::default());
        scene.add_class(group, "x-axis");
        scene.add_class(group, "x-axis");
        assert_eq!(scene.node(group).unwrap().classes, vec!["x-axis"]);
        assert_eq!(scene.select_class("x-axis"), vec![group]);
    }

    #[test]
    fn test_text_segments() {
        let content = TextContent::Spans(vec![
            TextSpan {
                x: 0.0,
                dy: Length::Px(0.0),
                text: "Danger".into(),
            },
            TextSpan {
                x: 0.0,
                dy: Length::Em(1.2),
                text: "Zone".into(),
            },
        ]);
        assert_eq!(content.segments(), vec!["Danger", "Zone"]);
        assert!((Length::Em(1.2).to_px(14.0) - 16.8).abs() < 1e-9);
        assert_eq!(Length::Em(1.2).to_string(), "1.2em");
    }
}
