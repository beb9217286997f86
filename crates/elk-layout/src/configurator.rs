use elk_graph::LayoutOptions;
use smodel::{BasicType, ParentIndex, SModelElement};

/// Supplies ELK layout options per model element.
///
/// All per-type methods return `None` by default; override them to choose the algorithm,
/// spacing, direction and so on. Option ids and values are not validated here.
pub trait LayoutConfigurator {
    fn apply(&self, element: &SModelElement, index: &ParentIndex<'_>) -> Option<LayoutOptions> {
        match element.basic_type() {
            BasicType::Graph => self.graph_options(element, index),
            BasicType::Node => self.node_options(element, index),
            BasicType::Edge => self.edge_options(element, index),
            BasicType::Label => self.label_options(element, index),
            BasicType::Port => self.port_options(element, index),
            _ => None,
        }
    }

    fn graph_options(
        &self,
        _graph: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        None
    }

    fn node_options(
        &self,
        _node: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        None
    }

    fn edge_options(
        &self,
        _edge: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        None
    }

    fn label_options(
        &self,
        _label: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        None
    }

    fn port_options(
        &self,
        _port: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLayoutConfigurator;

impl LayoutConfigurator for DefaultLayoutConfigurator {}
