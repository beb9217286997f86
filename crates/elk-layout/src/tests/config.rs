use serde_json::json;
use smodel::{BasicType, ParentIndex, SModelElement};

use super::sample;
use crate::*;

#[test]
fn options_resolve_per_type_with_element_overrides() {
    let config = LayoutConfig::from_json_str(
        r#"{
            "graph": { "elk.algorithm": "layered", "elk.direction": "RIGHT" },
            "node": { "elk.padding": "[top=4,left=4,bottom=4,right=4]" },
            "elements": {
                "g": { "elk.direction": "DOWN" },
                "e1": { "elk.priority": "3" }
            }
        }"#,
    )
    .unwrap();
    let g = sample();
    let index = ParentIndex::from_root(&g).unwrap();

    let graph = config.apply(&g, &index).unwrap();
    assert_eq!(
        serde_json::to_value(&graph).unwrap(),
        json!({ "elk.algorithm": "layered", "elk.direction": "DOWN" })
    );
    // Overrides keep the position of keys already present.
    assert_eq!(
        graph.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["elk.algorithm", "elk.direction"]
    );

    let a = &g.children()[0];
    assert_eq!(
        config
            .apply(a, &index)
            .and_then(|o| o.get("elk.padding").cloned())
            .as_deref(),
        Some("[top=4,left=4,bottom=4,right=4]")
    );

    let e1 = &g.children()[2];
    assert_eq!(
        serde_json::to_value(config.apply(e1, &index)).unwrap(),
        json!({ "elk.priority": "3" })
    );
    let e2 = &g.children()[3];
    assert_eq!(config.apply(e2, &index), None);
}

#[test]
fn junctions_and_unknown_types_get_no_options() {
    let config = LayoutConfig::new()
        .with_option(BasicType::Other, "ignored", "1")
        .with_option(BasicType::Junction, "ignored", "1")
        .with_element_option("x", "elk.priority", "1");
    assert_eq!(config, LayoutConfig::new().with_element_option("x", "elk.priority", "1"));

    let g = SModelElement::graph("g").with_child(SModelElement::new("x", "comp:header"));
    let index = ParentIndex::from_root(&g).unwrap();
    assert_eq!(config.apply(&g.children()[0], &index), None);
    assert_eq!(config.options(BasicType::Other), None);
}

#[test]
fn default_configurator_supplies_nothing() {
    let g = sample();
    let index = ParentIndex::from_root(&g).unwrap();
    assert!(
        g.iter_preorder()
            .all(|e| DefaultLayoutConfigurator.apply(e, &index).is_none())
    );
}

#[test]
fn config_round_trips_through_json() {
    let config = LayoutConfig::new()
        .with_option(BasicType::Edge, "elk.edgeRouting", "ORTHOGONAL")
        .with_element_option("n1", "elk.priority", "10");
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["edge"], json!({ "elk.edgeRouting": "ORTHOGONAL" }));
    assert_eq!(LayoutConfig::from_value(value).unwrap(), config);
    assert_eq!(LayoutConfig::from_json_str("{}").unwrap(), LayoutConfig::new());
}
