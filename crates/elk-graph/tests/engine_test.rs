use std::sync::Arc;

use elk_graph::{Elk, ElkError, ElkNode, JsonTransport};
use futures::executor::block_on;

#[test]
fn json_transport_round_trips_through_text() {
    let transport = JsonTransport::new(|request: String| async move {
        let mut graph: serde_json::Value = serde_json::from_str(&request)?;
        graph["x"] = 7.into();
        graph["y"] = 9.into();
        Ok::<_, ElkError>(graph.to_string())
    });

    let out = block_on(transport.layout(ElkNode::new("g"))).unwrap();
    assert_eq!(out.id, "g");
    assert_eq!((out.x, out.y), (Some(7.0), Some(9.0)));
}

#[test]
fn json_transport_reports_unparseable_replies() {
    let transport = JsonTransport::new(|_request: String| async {
        Ok::<_, ElkError>("not json".to_string())
    });
    let err = block_on(transport.layout(ElkNode::new("g"))).unwrap_err();
    assert!(matches!(err, ElkError::Json(_)), "{err}");
}

#[test]
fn json_transport_propagates_engine_failures() {
    let transport = JsonTransport::new(|_request: String| async {
        Err::<String, _>(ElkError::engine("worker crashed"))
    });
    let err = block_on(transport.layout(ElkNode::new("g"))).unwrap_err();
    assert_eq!(err.to_string(), "layout engine failed: worker crashed");
}

#[test]
fn shared_engines_are_engines() {
    let engine: Arc<dyn Elk> = Arc::new(JsonTransport::new(|request: String| async move {
        Ok::<_, ElkError>(request)
    }));
    let out = block_on(engine.layout(ElkNode::new("g"))).unwrap();
    assert_eq!(out, ElkNode::new("g"));
}
