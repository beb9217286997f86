//! Geometry computed by a layout pass, keyed by element id.
//!
//! The apply phase only reads the model and records what should change here.
//! [`LayoutUpdates::commit`] then writes everything in one mutable walk, after every borrow of the
//! model has ended.

use rustc_hash::FxHashMap;
use smodel::{BasicType, Dimension, Point, SModelElement};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeUpdate {
    pub position: Option<Point>,
    pub size: Option<Dimension>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeUpdate {
    /// Replaces the edge's routing points.
    pub routing_points: Vec<Point>,
    /// Junction markers appended to the edge's children, when the engine reported any.
    pub junctions: Option<Vec<SModelElement>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutUpdates {
    shapes: FxHashMap<String, ShapeUpdate>,
    edges: FxHashMap<String, EdgeUpdate>,
}

impl LayoutUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.edges.is_empty()
    }

    pub fn shape(&self, id: &str) -> Option<&ShapeUpdate> {
        self.shapes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeUpdate> {
        self.edges.get(id)
    }

    pub fn set_position(&mut self, id: &str, position: Point) {
        self.shapes.entry(id.to_string()).or_default().position = Some(position);
    }

    pub fn set_size(&mut self, id: &str, size: Dimension) {
        self.shapes.entry(id.to_string()).or_default().size = Some(size);
    }

    pub fn set_edge(&mut self, id: &str, update: EdgeUpdate) {
        self.edges.insert(id.to_string(), update);
    }

    /// Writes all updates into the tree rooted at `root` and returns how many were applied.
    ///
    /// Shape updates land on any element with a shape; edge updates only on edges. An edge update
    /// replaces the junction markers left by a previous pass. Updates whose id is not found are
    /// dropped.
    pub fn commit(mut self, root: &mut SModelElement) -> usize {
        let mut applied = 0;
        self.commit_element(root, &mut applied);
        if !self.is_empty() {
            tracing::trace!(
                root = %root.id,
                unmatched = self.len(),
                "layout updates without a matching element"
            );
        }
        applied
    }

    fn commit_element(&mut self, element: &mut SModelElement, applied: &mut usize) {
        for child in element.children_mut() {
            self.commit_element(child, applied);
        }

        if let Some(update) = self.shapes.remove(&element.id) {
            if let Some(shape) = element.shape_mut() {
                if update.position.is_some() {
                    shape.position = update.position;
                }
                if update.size.is_some() {
                    shape.size = update.size;
                }
                *applied += 1;
            } else {
                tracing::trace!(id = %element.id, "element has no shape to update");
            }
        }

        if let Some(update) = self.edges.remove(&element.id) {
            let Some(edge) = element.as_edge_mut() else {
                tracing::trace!(id = %element.id, "route update for a non-edge element");
                return;
            };
            edge.routing_points = Some(update.routing_points);
            // Markers from an earlier pass are replaced, never duplicated.
            let prefix = format!("{}_j", element.id);
            if let Some(children) = element.children.as_mut() {
                children.retain(|child| !is_layout_junction(child, &prefix));
            }
            if let Some(junctions) = update.junctions {
                element
                    .children
                    .get_or_insert_with(Vec::new)
                    .extend(junctions);
            }
            *applied += 1;
        }
    }
}

/// A junction child named `<edgeId>_j<i>`, as produced by a layout pass.
fn is_layout_junction(child: &SModelElement, prefix: &str) -> bool {
    child.basic_type() == BasicType::Junction
        && child
            .id
            .strip_prefix(prefix)
            .is_some_and(|i| !i.is_empty() && i.bytes().all(|b| b.is_ascii_digit()))
}
