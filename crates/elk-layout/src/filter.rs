use smodel::{BasicType, ParentIndex, SModelElement};

/// Decides which model elements take part in automatic layout.
///
/// Override the per-type methods to exclude elements. The provided [`filter_edge`] keeps an
/// edge only when both endpoints resolve and pass their own node/port filter, so excluding a
/// node or port also excludes every edge attached to it.
///
/// [`filter_edge`]: ElementFilter::filter_edge
pub trait ElementFilter {
    fn apply(&self, element: &SModelElement, index: &ParentIndex<'_>) -> bool {
        match element.basic_type() {
            BasicType::Node => self.filter_node(element, index),
            BasicType::Edge => self.filter_edge(element, index),
            BasicType::Label => self.filter_label(element, index),
            BasicType::Port => self.filter_port(element, index),
            _ => true,
        }
    }

    fn filter_node(&self, _node: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        true
    }

    fn filter_edge(&self, edge: &SModelElement, index: &ParentIndex<'_>) -> bool {
        endpoints_pass(self, edge, index)
    }

    fn filter_label(&self, _label: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        true
    }

    fn filter_port(&self, _port: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        true
    }
}

/// Both endpoints of `edge` resolve in `index`, and node/port endpoints pass `filter`.
pub fn endpoints_pass<F: ElementFilter + ?Sized>(
    filter: &F,
    edge: &SModelElement,
    index: &ParentIndex<'_>,
) -> bool {
    let Some(edge) = edge.as_edge() else {
        return false;
    };
    [edge.source_id.as_str(), edge.target_id.as_str()]
        .into_iter()
        .all(|id| {
            let Some(endpoint) = index.get_by_id(id) else {
                return false;
            };
            match endpoint.basic_type() {
                BasicType::Node => filter.filter_node(endpoint, index),
                BasicType::Port => filter.filter_port(endpoint, index),
                _ => true,
            }
        })
}

/// Includes every element; edges need both endpoints present.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultElementFilter;

impl ElementFilter for DefaultElementFilter {}
