use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::error::{ElkError, Result};
use crate::graph::ElkNode;

/// An ELK-compatible layout engine.
///
/// Implementations receive a graph without (or with seed) geometry and resolve with the same
/// graph carrying computed coordinates, sizes and edge routes. The engine may run in-process,
/// in a worker, or in another process; callers only await the returned future.
pub trait Elk: Send + Sync {
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, Result<ElkNode>>;
}

impl<E: Elk + ?Sized> Elk for &E {
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, Result<ElkNode>> {
        (**self).layout(graph)
    }
}

impl<E: Elk + ?Sized> Elk for Box<E> {
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, Result<ElkNode>> {
        (**self).layout(graph)
    }
}

impl<E: Elk + ?Sized> Elk for Arc<E> {
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, Result<ElkNode>> {
        (**self).layout(graph)
    }
}

/// Adapts an engine that exchanges ELK JSON text, such as a worker or a subprocess bridge.
///
/// The graph is serialized, handed to `send`, and the reply is parsed back into an [`ElkNode`].
pub struct JsonTransport<F> {
    send: F,
}

impl<F> JsonTransport<F> {
    pub fn new(send: F) -> Self {
        Self { send }
    }
}

impl<F, Fut> Elk for JsonTransport<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    fn layout(&self, graph: ElkNode) -> BoxFuture<'_, Result<ElkNode>> {
        let request = match serde_json::to_string(&graph) {
            Ok(request) => request,
            Err(err) => return future::ready(Err(ElkError::from(err))).boxed(),
        };
        tracing::trace!(graph = %graph.id, bytes = request.len(), "sending ELK request");
        let reply = (self.send)(request);
        async move {
            let reply = reply.await?;
            tracing::trace!(bytes = reply.len(), "received ELK reply");
            Ok(serde_json::from_str(&reply)?)
        }
        .boxed()
    }
}
