use smodel::{ParentIndex, SModelElement};

use super::{engine, sample};
use crate::*;

/// Excludes elements by id.
struct Hide(&'static [&'static str]);

impl ElementFilter for Hide {
    fn filter_node(&self, node: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        !self.0.contains(&node.id.as_str())
    }

    fn filter_port(&self, port: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        !self.0.contains(&port.id.as_str())
    }

    fn filter_label(&self, label: &SModelElement, _index: &ParentIndex<'_>) -> bool {
        !self.0.contains(&label.id.as_str())
    }
}

#[test]
fn default_filter_keeps_everything_with_resolvable_endpoints() {
    let g = sample().with_child(SModelElement::edge("dangling", "a", "nowhere"));
    let index = ParentIndex::from_root(&g).unwrap();
    let filter = DefaultElementFilter;

    for element in g.iter_preorder() {
        let expected = element.id != "dangling";
        assert_eq!(filter.apply(element, &index), expected, "{}", element.id);
    }
}

#[test]
fn excluding_a_node_excludes_its_edges() {
    let g = sample()
        .with_child(SModelElement::node("c"))
        .with_child(SModelElement::edge("e3", "c", "a"))
        .with_child(SModelElement::edge("e4", "c", "c"));
    let index = ParentIndex::from_root(&g).unwrap();
    let filter = Hide(&["b"]);

    let kept: Vec<&str> = g
        .children()
        .iter()
        .filter(|e| filter.apply(e, &index))
        .map(|e| e.id.as_str())
        .collect();
    // `e2` runs between ports, which are still included.
    assert_eq!(kept, vec!["a", "e2", "g.l", "c", "e3", "e4"]);
}

#[test]
fn excluding_a_port_excludes_its_edges() {
    let g = sample();
    let index = ParentIndex::from_root(&g).unwrap();
    let filter = Hide(&["b.p"]);
    let e1 = &g.children()[2];
    let e2 = &g.children()[3];
    assert!(filter.apply(e1, &index));
    assert!(!filter.apply(e2, &index));
    assert!(crate::filter::endpoints_pass(&DefaultElementFilter, e2, &index));
}

#[test]
fn filtered_elements_are_not_sent_to_the_engine() {
    let g = sample();
    let index = ParentIndex::from_root(&g).unwrap();
    let engine = engine().with_filter(Hide(&["b", "a.l"]));
    let root = engine.transform_graph(&g, &index).unwrap();

    let nodes: Vec<&str> = root.children().iter().map(|n| n.id.as_str()).collect();
    let edges: Vec<&str> = root.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(nodes, vec!["a"]);
    assert_eq!(edges, vec!["e2"]);
    assert_eq!(root.children()[0].labels.as_deref(), Some(&[][..]));
    assert_eq!(root.children()[0].ports().len(), 1);
}

#[test]
fn graphs_and_other_types_always_pass() {
    let g = SModelElement::graph("g").with_child(SModelElement::new("x", "comp:header"));
    let index = ParentIndex::from_root(&g).unwrap();
    let filter = Hide(&["g", "x"]);
    assert!(filter.apply(&g, &index));
    assert!(filter.apply(&g.children()[0], &index));
}
