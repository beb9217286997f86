use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Option id to value, e.g. `"elk.algorithm" -> "layered"`. Values are passed through verbatim.
pub type LayoutOptions = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElkPoint {
    pub x: f64,
    pub y: f64,
}

impl ElkPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry shared by nodes, ports and labels.
pub trait ElkShape {
    fn id(&self) -> &str;

    fn x(&self) -> Option<f64>;
    fn y(&self) -> Option<f64>;
    fn width(&self) -> Option<f64>;
    fn height(&self) -> Option<f64>;

    fn labels(&self) -> &[ElkLabel];

    fn set_position(&mut self, x: f64, y: f64);
    fn set_size(&mut self, width: f64, height: f64);

    /// `(x, y)` when both coordinates are present.
    fn position(&self) -> Option<ElkPoint> {
        Some(ElkPoint::new(self.x()?, self.y()?))
    }

    /// `(width, height)` when both extents are present.
    fn size(&self) -> Option<(f64, f64)> {
        Some((self.width()?, self.height()?))
    }
}

macro_rules! impl_elk_shape {
    ($ty:ty) => {
        impl ElkShape for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn x(&self) -> Option<f64> {
                self.x
            }
            fn y(&self) -> Option<f64> {
                self.y
            }
            fn width(&self) -> Option<f64> {
                self.width
            }
            fn height(&self) -> Option<f64> {
                self.height
            }
            fn labels(&self) -> &[ElkLabel] {
                self.labels.as_deref().unwrap_or(&[])
            }
            fn set_position(&mut self, x: f64, y: f64) {
                self.x = Some(x);
                self.y = Some(y);
            }
            fn set_size(&mut self, width: f64, height: f64) {
                self.width = Some(width);
                self.height = Some(height);
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<ElkLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_options: Option<LayoutOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ElkNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ElkPort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<ElkEdge>>,
}

impl ElkNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn children(&self) -> &[ElkNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn ports(&self) -> &[ElkPort] {
        self.ports.as_deref().unwrap_or(&[])
    }

    pub fn edges(&self) -> &[ElkEdge] {
        self.edges.as_deref().unwrap_or(&[])
    }
}

impl_elk_shape!(ElkNode);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkPort {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<ElkLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_options: Option<LayoutOptions>,
}

impl ElkPort {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl_elk_shape!(ElkPort);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkLabel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<ElkLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_options: Option<LayoutOptions>,
}

impl ElkLabel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl_elk_shape!(ElkLabel);

/// One routed path segment of an extended edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkEdgeSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<ElkPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend_points: Option<Vec<ElkPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<ElkPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_sections: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_sections: Option<Vec<String>>,
}

/// An edge in either the primitive (single source/target, optional port) or the extended
/// (`sources`/`targets`/`sections`) shape.
///
/// Ports are never edge endpoints themselves: an edge attached to a port names the owning node
/// in `source`/`target` and the port in `sourcePort`/`targetPort`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkEdge {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_point: Option<ElkPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend_points: Option<Vec<ElkPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_point: Option<ElkPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<ElkEdgeSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_points: Option<Vec<ElkPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<ElkLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_options: Option<LayoutOptions>,
}

impl ElkEdge {
    /// A primitive edge between `source` and `target`.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            target: Some(target.into()),
            ..Default::default()
        }
    }

    pub fn sections(&self) -> &[ElkEdgeSection] {
        self.sections.as_deref().unwrap_or(&[])
    }

    pub fn junction_points(&self) -> &[ElkPoint] {
        self.junction_points.as_deref().unwrap_or(&[])
    }

    pub fn labels(&self) -> &[ElkLabel] {
        self.labels.as_deref().unwrap_or(&[])
    }
}

/// Any element of an ELK graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ElkElement {
    Node(ElkNode),
    Edge(ElkEdge),
    Label(ElkLabel),
    Port(ElkPort),
}

impl ElkElement {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(node) => &node.id,
            Self::Edge(edge) => &edge.id,
            Self::Label(label) => &label.id,
            Self::Port(port) => &port.id,
        }
    }

    pub fn into_node(self) -> Option<ElkNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_edge(self) -> Option<ElkEdge> {
        match self {
            Self::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn into_label(self) -> Option<ElkLabel> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn into_port(self) -> Option<ElkPort> {
        match self {
            Self::Port(port) => Some(port),
            _ => None,
        }
    }
}
