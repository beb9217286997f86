use serde_json::json;
use smodel::{BasicType, ElementKind, ModelError, Point, SModelElement};

#[test]
fn deserializes_typed_payloads_from_the_type_prefix() {
    let g: SModelElement = serde_json::from_value(json!({
        "id": "g",
        "type": "graph",
        "children": [
            { "id": "a", "type": "node:rect", "position": { "x": 1.0, "y": 2.0 },
              "size": { "width": 30.0, "height": 20.0 },
              "children": [ { "id": "a.l", "type": "label:heading", "text": "A" } ] },
            { "id": "e", "type": "edge", "sourceId": "a", "targetId": "a",
              "routingPoints": [ { "x": 0.0, "y": 0.0 }, { "x": 5.0, "y": 5.0 } ] },
            { "id": "x", "type": "comp:header" }
        ]
    }))
    .unwrap();

    assert_eq!(g.basic_type(), BasicType::Graph);
    let a = &g.children()[0];
    assert_eq!(a.element_type, "node:rect");
    assert_eq!(a.basic_type(), BasicType::Node);
    let shape = a.shape().unwrap();
    assert_eq!(shape.position, Some(Point::new(1.0, 2.0)));
    assert_eq!(shape.size.map(|s| (s.width, s.height)), Some((30.0, 20.0)));
    assert_eq!(a.children()[0].as_label().map(|l| l.text.as_str()), Some("A"));

    let e = g.children()[1].as_edge().unwrap();
    assert_eq!(e.source_id, "a");
    assert_eq!(
        e.routing_points.as_deref(),
        Some(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)][..])
    );

    assert!(matches!(g.children()[2].kind, ElementKind::Other(_)));
}

#[test]
fn unknown_and_misplaced_fields_survive_a_round_trip() {
    let input = json!({
        "id": "g",
        "type": "graph",
        "zoom": 2.0,
        "scroll": { "x": 10.0, "y": 0.0 },
        "children": [
            { "id": "n", "type": "node", "cssClasses": ["hot"], "text": "stray" }
        ]
    });
    let g: SModelElement = serde_json::from_value(input.clone()).unwrap();
    assert_eq!(g.properties.get("zoom"), Some(&json!(2.0)));
    assert_eq!(g.children()[0].properties.get("text"), Some(&json!("stray")));

    let output = serde_json::to_value(&g).unwrap();
    assert_eq!(output, input);
}

#[test]
fn edges_without_endpoints_are_rejected() {
    let err = serde_json::from_value::<SModelElement>(json!({
        "id": "e", "type": "edge", "targetId": "b"
    }))
    .unwrap_err();
    assert!(
        err.to_string().contains(
            &ModelError::MissingEndpoint {
                id: "e".to_string(),
                field: "sourceId"
            }
            .to_string()
        ),
        "{err}"
    );
}

#[test]
fn junctions_serialize_with_their_position() {
    let j = SModelElement::junction("e_j0", Point::new(3.0, 4.0));
    assert_eq!(
        serde_json::to_value(&j).unwrap(),
        json!({ "id": "e_j0", "type": "junction", "position": { "x": 3.0, "y": 4.0 } })
    );
}

#[test]
fn misplaced_geometry_is_kept_as_json_objects() {
    let input = json!({
        "id": "g",
        "type": "graph",
        "position": { "x": 1.5, "y": 2.0 },
        "size": { "width": 100.0, "height": 50.0 },
        "children": [
            { "id": "n", "type": "node",
              "routingPoints": [ { "x": 0.0, "y": 1.0 }, { "x": 2.0, "y": 3.0 } ] },
            { "id": "e", "type": "edge", "sourceId": "n", "targetId": "n",
              "position": { "x": 7.0, "y": 8.0 } }
        ]
    });
    let g: SModelElement = serde_json::from_value(input.clone()).unwrap();

    assert_eq!(g.properties.get("position"), Some(&json!({ "x": 1.5, "y": 2.0 })));
    assert_eq!(
        g.properties.get("size"),
        Some(&json!({ "width": 100.0, "height": 50.0 }))
    );
    assert_eq!(
        g.children()[0].properties.get("routingPoints"),
        Some(&json!([{ "x": 0.0, "y": 1.0 }, { "x": 2.0, "y": 3.0 }]))
    );
    assert_eq!(
        g.children()[1].properties.get("position"),
        Some(&json!({ "x": 7.0, "y": 8.0 }))
    );
    assert_eq!(serde_json::to_value(&g).unwrap(), input);
    assert_eq!(
        serde_json::Value::from(Point::new(1.5, 2.0)),
        serde_json::to_value(Point::new(1.5, 2.0)).unwrap()
    );
}
