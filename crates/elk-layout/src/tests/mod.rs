use elk_graph::{Elk, ElkNode};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use smodel::SModelElement;

use crate::*;

mod config;
mod filter;

/// Resolves with the graph it was given.
struct Echo;

impl Elk for Echo {
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, elk_graph::Result<ElkNode>> {
        future::ready(Ok(graph)).boxed()
    }
}

fn engine() -> ElkLayoutEngine<Echo> {
    ElkLayoutEngine::new(Echo)
}

/// graph
/// ├── a (node, 0,0 20x10)
/// │   ├── a.l (label "A")
/// │   └── a.p (port)
/// ├── b (node)
/// │   └── b.p (port)
/// ├── e1: a -> b
/// ├── e2: a.p -> b.p
/// │   └── e2.l (label "flow")
/// └── g.l (label on the graph)
fn sample() -> SModelElement {
    SModelElement::graph("g")
        .with_child(
            SModelElement::node("a")
                .with_position(0.0, 0.0)
                .with_size(20.0, 10.0)
                .with_child(SModelElement::label("a.l", "A"))
                .with_child(SModelElement::port("a.p")),
        )
        .with_child(SModelElement::node("b").with_child(SModelElement::port("b.p")))
        .with_child(SModelElement::edge("e1", "a", "b"))
        .with_child(
            SModelElement::edge("e2", "a.p", "b.p")
                .with_child(SModelElement::label("e2.l", "flow")),
        )
        .with_child(SModelElement::label("g.l", "title"))
}
