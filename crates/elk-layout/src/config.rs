//! Data-driven layout options.
//!
//! ```json
//! {
//!   "graph": { "elk.algorithm": "layered", "elk.direction": "RIGHT" },
//!   "node": { "elk.nodeLabels.placement": "INSIDE V_CENTER H_CENTER" },
//!   "elements": { "n42": { "elk.priority": "10" } }
//! }
//! ```

use elk_graph::LayoutOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smodel::{BasicType, ParentIndex, SModelElement};

use crate::configurator::LayoutConfigurator;

/// Per-basic-type option maps plus per-element overrides keyed by element id.
///
/// The options for an element are its type map with the element's override merged on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub graph: LayoutOptions,
    pub node: LayoutOptions,
    pub edge: LayoutOptions,
    pub label: LayoutOptions,
    pub port: LayoutOptions,
    pub elements: IndexMap<String, LayoutOptions>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Adds an option for every element of `basic_type`; ignored for junction/other.
    pub fn with_option(
        mut self,
        basic_type: BasicType,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        if let Some(options) = self.options_mut(basic_type) {
            options.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_element_option(
        mut self,
        id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.elements
            .entry(id.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn options(&self, basic_type: BasicType) -> Option<&LayoutOptions> {
        match basic_type {
            BasicType::Graph => Some(&self.graph),
            BasicType::Node => Some(&self.node),
            BasicType::Edge => Some(&self.edge),
            BasicType::Label => Some(&self.label),
            BasicType::Port => Some(&self.port),
            BasicType::Junction | BasicType::Other => None,
        }
    }

    fn options_mut(&mut self, basic_type: BasicType) -> Option<&mut LayoutOptions> {
        match basic_type {
            BasicType::Graph => Some(&mut self.graph),
            BasicType::Node => Some(&mut self.node),
            BasicType::Edge => Some(&mut self.edge),
            BasicType::Label => Some(&mut self.label),
            BasicType::Port => Some(&mut self.port),
            BasicType::Junction | BasicType::Other => None,
        }
    }

    fn resolve(&self, element: &SModelElement) -> Option<LayoutOptions> {
        let mut options = self.options(element.basic_type())?.clone();
        if let Some(overrides) = self.elements.get(&element.id) {
            options.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        (!options.is_empty()).then_some(options)
    }
}

impl LayoutConfigurator for LayoutConfig {
    fn graph_options(
        &self,
        graph: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        self.resolve(graph)
    }

    fn node_options(
        &self,
        node: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        self.resolve(node)
    }

    fn edge_options(
        &self,
        edge: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        self.resolve(edge)
    }

    fn label_options(
        &self,
        label: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        self.resolve(label)
    }

    fn port_options(
        &self,
        port: &SModelElement,
        _index: &ParentIndex<'_>,
    ) -> Option<LayoutOptions> {
        self.resolve(port)
    }
}
