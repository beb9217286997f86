//! Diagram model elements.
//!
//! The JSON shape mirrors the usual diagram-model wire format (`id`, `type`, `children`,
//! `position`, `size`, `sourceId`, `targetId`, `routingPoints`, `text`). Fields that do not
//! belong to an element's basic type, and any unknown fields, are kept in
//! [`SModelElement::properties`] so that a deserialize/serialize cycle is lossless.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::geom::{Dimension, Point};

/// Element classification derived from the prefix of the `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Graph,
    Node,
    Edge,
    Label,
    Port,
    Junction,
    Other,
}

impl BasicType {
    /// Classifies a declared type string such as `"node:rect"` or `"edge"`.
    pub fn of(element_type: &str) -> Self {
        let prefix = element_type
            .split_once(':')
            .map_or(element_type, |(prefix, _)| prefix);
        match prefix {
            "graph" => Self::Graph,
            "node" => Self::Node,
            "edge" => Self::Edge,
            "label" => Self::Label,
            "port" => Self::Port,
            "junction" => Self::Junction,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Label => "label",
            Self::Port => "port",
            Self::Junction => "junction",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shape {
    pub position: Option<Point>,
    pub size: Option<Dimension>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    /// Polyline vertices including both endpoints, when a route is known.
    pub routing_points: Option<Vec<Point>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub shape: Shape,
    pub text: String,
}

/// Type-specific payload of an element, one case per [`BasicType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Graph,
    Node(Shape),
    Edge(Edge),
    Label(Label),
    Port(Shape),
    Junction(Shape),
    Other(Shape),
}

impl ElementKind {
    /// Default payload for the given basic type.
    pub fn empty(basic_type: BasicType) -> Self {
        match basic_type {
            BasicType::Graph => Self::Graph,
            BasicType::Node => Self::Node(Shape::default()),
            BasicType::Edge => Self::Edge(Edge::default()),
            BasicType::Label => Self::Label(Label::default()),
            BasicType::Port => Self::Port(Shape::default()),
            BasicType::Junction => Self::Junction(Shape::default()),
            BasicType::Other => Self::Other(Shape::default()),
        }
    }

    pub fn basic_type(&self) -> BasicType {
        match self {
            Self::Graph => BasicType::Graph,
            Self::Node(_) => BasicType::Node,
            Self::Edge(_) => BasicType::Edge,
            Self::Label(_) => BasicType::Label,
            Self::Port(_) => BasicType::Port,
            Self::Junction(_) => BasicType::Junction,
            Self::Other(_) => BasicType::Other,
        }
    }

    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Self::Node(shape) | Self::Port(shape) | Self::Junction(shape) | Self::Other(shape) => {
                Some(shape)
            }
            Self::Label(label) => Some(&label.shape),
            Self::Graph | Self::Edge(_) => None,
        }
    }

    pub fn shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Self::Node(shape) | Self::Port(shape) | Self::Junction(shape) | Self::Other(shape) => {
                Some(shape)
            }
            Self::Label(label) => Some(&mut label.shape),
            Self::Graph | Self::Edge(_) => None,
        }
    }
}

/// A node of the diagram model tree.
///
/// The constructors and deserialization keep `element_type` and `kind` in agreement. When a caller
/// sets them independently, `kind` wins: [`SModelElement::basic_type`], layout and serialization of
/// the payload all follow it, and `element_type` is only carried along verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct SModelElement {
    pub id: String,
    /// Full declared type, e.g. `"node:rect"`.
    pub element_type: String,
    pub children: Option<Vec<SModelElement>>,
    /// Typed payload; decides the basic type.
    pub kind: ElementKind,
    pub properties: Map<String, Value>,
}

impl SModelElement {
    /// Creates an element from a declared type string; the payload starts empty.
    pub fn new(id: impl Into<String>, element_type: impl Into<String>) -> Self {
        let element_type = element_type.into();
        Self {
            id: id.into(),
            kind: ElementKind::empty(BasicType::of(&element_type)),
            element_type,
            children: None,
            properties: Map::new(),
        }
    }

    pub fn graph(id: impl Into<String>) -> Self {
        Self::new(id, "graph")
    }

    pub fn node(id: impl Into<String>) -> Self {
        Self::new(id, "node")
    }

    pub fn port(id: impl Into<String>) -> Self {
        Self::new(id, "port")
    }

    pub fn label(id: impl Into<String>, text: impl Into<String>) -> Self {
        let mut label = Self::new(id, "label");
        label.kind = ElementKind::Label(Label {
            shape: Shape::default(),
            text: text.into(),
        });
        label
    }

    pub fn edge(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        let mut edge = Self::new(id, "edge");
        edge.kind = ElementKind::Edge(Edge {
            source_id: source_id.into(),
            target_id: target_id.into(),
            routing_points: None,
        });
        edge
    }

    pub fn junction(id: impl Into<String>, position: Point) -> Self {
        let mut junction = Self::new(id, "junction");
        junction.kind = ElementKind::Junction(Shape {
            position: Some(position),
            size: None,
        });
        junction
    }

    /// Refines the declared type with a sub-type, e.g. `node` + `rect` gives `node:rect`.
    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.element_type = format!("{}:{subtype}", self.basic_type());
        self
    }

    /// Sets the position; no-op for kinds without a shape (graph, edge).
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        if let Some(shape) = self.kind.shape_mut() {
            shape.position = Some(Point::new(x, y));
        }
        self
    }

    /// Sets the size; no-op for kinds without a shape (graph, edge).
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        if let Some(shape) = self.kind.shape_mut() {
            shape.size = Some(Dimension::new(width, height));
        }
        self
    }

    /// Sets the routing points; no-op for non-edges.
    pub fn with_routing_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        if let ElementKind::Edge(edge) = &mut self.kind {
            edge.routing_points = Some(points.into_iter().collect());
        }
        self
    }

    pub fn with_child(mut self, child: SModelElement) -> Self {
        self.push_child(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SModelElement>) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .extend(children);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn basic_type(&self) -> BasicType {
        self.kind.basic_type()
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.kind.shape()
    }

    pub fn shape_mut(&mut self) -> Option<&mut Shape> {
        self.kind.shape_mut()
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match &self.kind {
            ElementKind::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn as_edge_mut(&mut self) -> Option<&mut Edge> {
        match &mut self.kind {
            ElementKind::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match &self.kind {
            ElementKind::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Direct children; empty when the element has no children list.
    pub fn children(&self) -> &[SModelElement] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> &mut [SModelElement] {
        self.children.as_deref_mut().unwrap_or(&mut [])
    }

    /// Appends a child, creating the children list if absent.
    pub fn push_child(&mut self, child: SModelElement) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Pre-order traversal of this element and all of its descendants.
    pub fn iter_preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a SModelElement>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SModelElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children().iter().rev());
        Some(element)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: String,
    #[serde(rename = "type")]
    element_type: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_children"
    )]
    children: Option<Vec<SModelElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    routing_points: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(flatten)]
    properties: Map<String, Value>,
}

/// A `children` value that is not an array is treated as absent.
fn lenient_children<'de, D>(deserializer: D) -> Result<Option<Vec<SModelElement>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn stash(properties: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        properties.insert(key.to_string(), value.into());
    }
}

impl TryFrom<RawElement> for SModelElement {
    type Error = ModelError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let RawElement {
            id,
            element_type,
            children,
            position,
            size,
            source_id,
            target_id,
            routing_points,
            text,
            mut properties,
        } = raw;

        let shape = Shape { position, size };
        let basic_type = BasicType::of(&element_type);
        let kind = match basic_type {
            BasicType::Edge => {
                let Some(source_id) = source_id else {
                    return Err(ModelError::MissingEndpoint {
                        id,
                        field: "sourceId",
                    });
                };
                let Some(target_id) = target_id else {
                    return Err(ModelError::MissingEndpoint {
                        id,
                        field: "targetId",
                    });
                };
                stash(&mut properties, "position", shape.position);
                stash(&mut properties, "size", shape.size);
                stash(&mut properties, "text", text);
                ElementKind::Edge(Edge {
                    source_id,
                    target_id,
                    routing_points,
                })
            }
            BasicType::Label => {
                stash(&mut properties, "sourceId", source_id);
                stash(&mut properties, "targetId", target_id);
                stash(&mut properties, "routingPoints", routing_points);
                ElementKind::Label(Label {
                    shape,
                    text: text.unwrap_or_default(),
                })
            }
            other => {
                stash(&mut properties, "sourceId", source_id);
                stash(&mut properties, "targetId", target_id);
                stash(&mut properties, "routingPoints", routing_points);
                stash(&mut properties, "text", text);
                match other {
                    BasicType::Graph => {
                        stash(&mut properties, "position", shape.position);
                        stash(&mut properties, "size", shape.size);
                        ElementKind::Graph
                    }
                    BasicType::Node => ElementKind::Node(shape),
                    BasicType::Port => ElementKind::Port(shape),
                    BasicType::Junction => ElementKind::Junction(shape),
                    _ => ElementKind::Other(shape),
                }
            }
        };

        Ok(Self {
            id,
            element_type,
            children,
            kind,
            properties,
        })
    }
}

impl From<SModelElement> for RawElement {
    fn from(element: SModelElement) -> Self {
        let mut raw = RawElement {
            id: element.id,
            element_type: element.element_type,
            children: element.children,
            position: None,
            size: None,
            source_id: None,
            target_id: None,
            routing_points: None,
            text: None,
            properties: element.properties,
        };
        match element.kind {
            ElementKind::Graph => {}
            ElementKind::Edge(edge) => {
                raw.source_id = Some(edge.source_id);
                raw.target_id = Some(edge.target_id);
                raw.routing_points = edge.routing_points;
            }
            ElementKind::Label(label) => {
                raw.position = label.shape.position;
                raw.size = label.shape.size;
                raw.text = Some(label.text);
            }
            ElementKind::Node(shape)
            | ElementKind::Port(shape)
            | ElementKind::Junction(shape)
            | ElementKind::Other(shape) => {
                raw.position = shape.position;
                raw.size = shape.size;
            }
        }
        raw
    }
}
