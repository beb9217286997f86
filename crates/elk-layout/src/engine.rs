use elk_graph::{Elk, ElkEdge, ElkElement, ElkLabel, ElkNode, ElkPoint, ElkPort, ElkShape};
use futures::FutureExt;
use futures::future::BoxFuture;
use smodel::{
    BasicType, Dimension, Edge, ElementKind, Label, ParentIndex, Point, SModelElement, Shape,
};

use crate::configurator::{DefaultLayoutConfigurator, LayoutConfigurator};
use crate::error::{Error, Result};
use crate::filter::{DefaultElementFilter, ElementFilter};
use crate::updates::{EdgeUpdate, LayoutUpdates};

/// Lays out a model and resolves with the same model carrying the computed geometry.
pub trait ModelLayoutEngine {
    fn layout<'a>(&'a self, graph: SModelElement) -> BoxFuture<'a, Result<SModelElement>>;
}

/// Layout engine that delegates to ELK by transforming the model into an ELK graph.
pub struct ElkLayoutEngine<E, F = DefaultElementFilter, C = DefaultLayoutConfigurator> {
    elk: E,
    filter: F,
    configurator: C,
}

impl<E: Elk> ElkLayoutEngine<E> {
    pub fn new(elk: E) -> Self {
        Self {
            elk,
            filter: DefaultElementFilter,
            configurator: DefaultLayoutConfigurator,
        }
    }

    /// Creates the engine instance through `factory`, e.g. to pick a bundled or worker-backed
    /// ELK at startup.
    pub fn from_factory(factory: impl FnOnce() -> E) -> Self {
        Self::new(factory())
    }
}

impl<E, F, C> ElkLayoutEngine<E, F, C> {
    pub fn with_filter<F2>(self, filter: F2) -> ElkLayoutEngine<E, F2, C> {
        ElkLayoutEngine {
            elk: self.elk,
            filter,
            configurator: self.configurator,
        }
    }

    pub fn with_configurator<C2>(self, configurator: C2) -> ElkLayoutEngine<E, F, C2> {
        ElkLayoutEngine {
            elk: self.elk,
            filter: self.filter,
            configurator,
        }
    }

    pub fn elk(&self) -> &E {
        &self.elk
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn configurator(&self) -> &C {
        &self.configurator
    }
}

impl<E, F, C> ElkLayoutEngine<E, F, C>
where
    E: Elk,
    F: ElementFilter,
    C: LayoutConfigurator,
{
    /// Lays out `graph` and returns it with updated geometry.
    ///
    /// Elements that are not graphs are returned unchanged without contacting the engine.
    pub async fn layout(&self, mut graph: SModelElement) -> Result<SModelElement> {
        self.layout_in_place(&mut graph).await?;
        Ok(graph)
    }

    /// Same as [`ElkLayoutEngine::layout`], mutating through a borrow.
    ///
    /// On error (including an engine failure) the model is left as it was.
    pub async fn layout_in_place(&self, graph: &mut SModelElement) -> Result<()> {
        if graph.basic_type() != BasicType::Graph {
            tracing::debug!(
                id = %graph.id,
                element_type = %graph.element_type,
                "not a graph, skipping layout"
            );
            return Ok(());
        }
        let updates = {
            let view: &SModelElement = graph;
            let index = ParentIndex::from_root(view)?;
            self.run(view, &index).await?
        };
        let applied = updates.commit(graph);
        tracing::debug!(graph = %graph.id, applied, "applied layout");
        Ok(())
    }

    /// Runs a pass against a caller-built index and returns the updates without committing them.
    ///
    /// The index should cover the whole tree (see [`ParentIndex::from_root`]); otherwise port
    /// endpoints and nested elements may not resolve. Returns `None` for non-graph input.
    pub async fn compute_updates(
        &self,
        graph: &SModelElement,
        index: &ParentIndex<'_>,
    ) -> Result<Option<LayoutUpdates>> {
        if graph.basic_type() != BasicType::Graph {
            return Ok(None);
        }
        self.run(graph, index).await.map(Some)
    }

    async fn run(&self, graph: &SModelElement, index: &ParentIndex<'_>) -> Result<LayoutUpdates> {
        let elk_graph = self.transform_graph(graph, index)?;
        tracing::debug!(
            graph = %graph.id,
            nodes = elk_graph.children().len(),
            edges = elk_graph.edges().len(),
            "running ELK layout"
        );
        let result = self.elk.layout(elk_graph).await?;
        let mut updates = LayoutUpdates::new();
        self.apply_layout(&result, index, &mut updates);
        Ok(updates)
    }

    /// Converts any supported model element into its ELK counterpart.
    pub fn transform_to_elk(
        &self,
        element: &SModelElement,
        index: &ParentIndex<'_>,
    ) -> Result<ElkElement> {
        match &element.kind {
            ElementKind::Graph => self.transform_graph(element, index).map(ElkElement::Node),
            ElementKind::Node(shape) => self
                .transform_node(element, shape, index)
                .map(ElkElement::Node),
            ElementKind::Edge(edge) => self
                .transform_edge(element, edge, index)
                .map(ElkElement::Edge),
            ElementKind::Label(label) => Ok(ElkElement::Label(
                self.transform_label(element, label, index),
            )),
            ElementKind::Port(shape) => self
                .transform_port(element, shape, index)
                .map(ElkElement::Port),
            ElementKind::Junction(_) | ElementKind::Other(_) => Err(Error::UnsupportedType {
                id: element.id.clone(),
                element_type: element.element_type.clone(),
            }),
        }
    }

    /// Converts a graph element into the ELK root node. Only node and edge children are kept.
    pub fn transform_graph(
        &self,
        graph: &SModelElement,
        index: &ParentIndex<'_>,
    ) -> Result<ElkNode> {
        if !matches!(graph.kind, ElementKind::Graph) {
            return Err(Error::NotAGraph {
                id: graph.id.clone(),
                element_type: graph.element_type.clone(),
            });
        }
        let mut root = ElkNode {
            layout_options: self.configurator.apply(graph, index),
            ..ElkNode::new(graph.id.clone())
        };
        if let Some(children) =
            self.transform_children(graph, &[BasicType::Node, BasicType::Edge], index)?
        {
            root.children = Some(children.nodes);
            root.edges = Some(children.edges);
        }
        Ok(root)
    }

    fn transform_node(
        &self,
        node: &SModelElement,
        shape: &Shape,
        index: &ParentIndex<'_>,
    ) -> Result<ElkNode> {
        let mut elk_node = ElkNode {
            layout_options: self.configurator.apply(node, index),
            ..ElkNode::new(node.id.clone())
        };
        if let Some(children) = self.transform_children(
            node,
            &[
                BasicType::Node,
                BasicType::Edge,
                BasicType::Label,
                BasicType::Port,
            ],
            index,
        )? {
            elk_node.children = Some(children.nodes);
            elk_node.edges = Some(children.edges);
            elk_node.labels = Some(children.labels);
            elk_node.ports = Some(children.ports);
        }
        transform_shape(&mut elk_node, shape);
        Ok(elk_node)
    }

    fn transform_edge(
        &self,
        element: &SModelElement,
        edge: &Edge,
        index: &ParentIndex<'_>,
    ) -> Result<ElkEdge> {
        let mut elk_edge = ElkEdge {
            layout_options: self.configurator.apply(element, index),
            ..ElkEdge::new(
                element.id.clone(),
                edge.source_id.clone(),
                edge.target_id.clone(),
            )
        };
        // ELK attaches edges to nodes; a port endpoint becomes its node plus a port reference.
        if let Some((node, port)) = port_endpoint(&edge.source_id, index) {
            elk_edge.source = Some(node.to_string());
            elk_edge.source_port = Some(port.to_string());
        }
        if let Some((node, port)) = port_endpoint(&edge.target_id, index) {
            elk_edge.target = Some(node.to_string());
            elk_edge.target_port = Some(port.to_string());
        }
        if let Some(children) = self.transform_children(element, &[BasicType::Label], index)? {
            elk_edge.labels = Some(children.labels);
        }
        // A previous route (at least both endpoints) seeds the engine.
        if let Some([first, bends @ .., last]) = edge.routing_points.as_deref() {
            elk_edge.source_point = Some(elk_point(*first));
            elk_edge.bend_points = Some(bends.iter().copied().map(elk_point).collect());
            elk_edge.target_point = Some(elk_point(*last));
        }
        Ok(elk_edge)
    }

    fn transform_label(
        &self,
        element: &SModelElement,
        label: &Label,
        index: &ParentIndex<'_>,
    ) -> ElkLabel {
        let mut elk_label = ElkLabel {
            text: Some(label.text.clone()),
            layout_options: self.configurator.apply(element, index),
            ..ElkLabel::new(element.id.clone())
        };
        transform_shape(&mut elk_label, &label.shape);
        elk_label
    }

    fn transform_port(
        &self,
        port: &SModelElement,
        shape: &Shape,
        index: &ParentIndex<'_>,
    ) -> Result<ElkPort> {
        let mut elk_port = ElkPort {
            layout_options: self.configurator.apply(port, index),
            ..ElkPort::new(port.id.clone())
        };
        if let Some(children) = self.transform_children(port, &[BasicType::Label], index)? {
            elk_port.labels = Some(children.labels);
        }
        transform_shape(&mut elk_port, shape);
        Ok(elk_port)
    }

    /// Transforms the children of `parent` whose basic type is in `wanted` and that pass the
    /// filter, grouped per kind in declaration order. `None` when `parent` has no children list.
    fn transform_children(
        &self,
        parent: &SModelElement,
        wanted: &[BasicType],
        index: &ParentIndex<'_>,
    ) -> Result<Option<ElkChildren>> {
        let Some(children) = parent.children.as_deref() else {
            return Ok(None);
        };
        let mut out = ElkChildren::default();
        for child in children {
            if !wanted.contains(&child.basic_type()) {
                continue;
            }
            if !self.filter.apply(child, index) {
                tracing::trace!(id = %child.id, "excluded from layout by filter");
                continue;
            }
            match &child.kind {
                ElementKind::Node(shape) => {
                    out.nodes.push(self.transform_node(child, shape, index)?);
                }
                ElementKind::Edge(edge) => {
                    out.edges.push(self.transform_edge(child, edge, index)?);
                }
                ElementKind::Label(label) => {
                    out.labels.push(self.transform_label(child, label, index));
                }
                ElementKind::Port(shape) => {
                    out.ports.push(self.transform_port(child, shape, index)?);
                }
                ElementKind::Graph | ElementKind::Junction(_) | ElementKind::Other(_) => {}
            }
        }
        Ok(Some(out))
    }

    /// Records the geometry of `elk_node` and everything below it.
    ///
    /// Elements are joined by id. ELK elements without a model counterpart of the expected basic
    /// type are skipped.
    pub fn apply_layout(
        &self,
        elk_node: &ElkNode,
        index: &ParentIndex<'_>,
        updates: &mut LayoutUpdates,
    ) {
        if let Some(node) = resolve(index, &elk_node.id, BasicType::Node) {
            self.apply_shape(node, elk_node, index, updates);
        }
        for child in elk_node.children() {
            self.apply_layout(child, index, updates);
        }
        for elk_edge in elk_node.edges() {
            if let Some(edge) = resolve(index, &elk_edge.id, BasicType::Edge) {
                self.apply_edge(edge, elk_edge, index, updates);
            }
        }
        for elk_port in elk_node.ports() {
            if let Some(port) = resolve(index, &elk_port.id, BasicType::Port) {
                self.apply_shape(port, elk_port, index, updates);
            }
        }
    }

    /// Records position and size of `element`, then of every label of `elk_shape` that resolves.
    pub fn apply_shape<S: ElkShape>(
        &self,
        element: &SModelElement,
        elk_shape: &S,
        index: &ParentIndex<'_>,
        updates: &mut LayoutUpdates,
    ) {
        if let Some(position) = elk_shape.position() {
            updates.set_position(&element.id, point(position));
        }
        if let Some((width, height)) = elk_shape.size() {
            updates.set_size(&element.id, Dimension::new(width, height));
        }
        for elk_label in elk_shape.labels() {
            match index.get_by_id(&elk_label.id) {
                Some(label) => self.apply_shape(label, elk_label, index, updates),
                None => tracing::trace!(id = %elk_label.id, "no model label for ELK label"),
            }
        }
    }

    /// Records the route, junction markers and label geometry of `edge`.
    ///
    /// The route is taken from the first section when the engine produced sections, otherwise
    /// from the primitive `sourcePoint`/`bendPoints`/`targetPoint` fields.
    pub fn apply_edge(
        &self,
        edge: &SModelElement,
        elk_edge: &ElkEdge,
        index: &ParentIndex<'_>,
        updates: &mut LayoutUpdates,
    ) {
        let mut routing_points = Vec::new();
        if let Some(section) = elk_edge.sections().first() {
            routing_points.extend(section.start_point.map(point));
            routing_points.extend(section.bend_points.iter().flatten().copied().map(point));
            routing_points.extend(section.end_point.map(point));
        } else {
            routing_points.extend(elk_edge.source_point.map(point));
            routing_points.extend(elk_edge.bend_points.iter().flatten().copied().map(point));
            routing_points.extend(elk_edge.target_point.map(point));
        }

        let junctions = elk_edge.junction_points.as_ref().map(|junction_points| {
            junction_points
                .iter()
                .enumerate()
                .map(|(i, &p)| SModelElement::junction(format!("{}_j{i}", edge.id), point(p)))
                .collect()
        });

        updates.set_edge(
            &edge.id,
            EdgeUpdate {
                routing_points,
                junctions,
            },
        );

        for elk_label in elk_edge.labels() {
            match index.get_by_id(&elk_label.id) {
                Some(label) => self.apply_shape(label, elk_label, index, updates),
                None => tracing::trace!(id = %elk_label.id, "no model label for ELK label"),
            }
        }
    }
}

impl<E, F, C> ModelLayoutEngine for ElkLayoutEngine<E, F, C>
where
    E: Elk,
    F: ElementFilter + Sync,
    C: LayoutConfigurator + Sync,
{
    fn layout<'a>(&'a self, graph: SModelElement) -> BoxFuture<'a, Result<SModelElement>> {
        ElkLayoutEngine::layout(self, graph).boxed()
    }
}

#[derive(Debug, Default)]
struct ElkChildren {
    nodes: Vec<ElkNode>,
    edges: Vec<ElkEdge>,
    labels: Vec<ElkLabel>,
    ports: Vec<ElkPort>,
}

/// `(node id, port id)` when `id` names a port owned by a node.
fn port_endpoint<'i>(id: &str, index: &ParentIndex<'i>) -> Option<(&'i str, &'i str)> {
    let port = index.get_by_id(id)?;
    if port.basic_type() != BasicType::Port {
        return None;
    }
    let parent = index.get_parent(&port.id)?;
    (parent.basic_type() == BasicType::Node).then_some((parent.id.as_str(), port.id.as_str()))
}

fn resolve<'i>(
    index: &ParentIndex<'i>,
    id: &str,
    basic_type: BasicType,
) -> Option<&'i SModelElement> {
    match index.get_by_id(id) {
        Some(element) if element.basic_type() == basic_type => Some(element),
        Some(element) => {
            tracing::trace!(
                id,
                expected = %basic_type,
                found = %element.basic_type(),
                "ELK element joins a model element of another type"
            );
            None
        }
        None => {
            tracing::trace!(id, "no model element for ELK element");
            None
        }
    }
}

fn transform_shape<S: ElkShape>(elk_shape: &mut S, shape: &Shape) {
    if let Some(position) = shape.position {
        elk_shape.set_position(position.x, position.y);
    }
    if let Some(size) = shape.size {
        elk_shape.set_size(size.width, size.height);
    }
}

fn point(p: ElkPoint) -> Point {
    Point::new(p.x, p.y)
}

fn elk_point(p: Point) -> ElkPoint {
    ElkPoint::new(p.x, p.y)
}
