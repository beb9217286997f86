#![forbid(unsafe_code)]

//! ELK JSON graph schema and the engine interface.
//!
//! The types mirror the JSON graph format accepted and produced by ELK (`elkjs` and compatible
//! servers): camelCase field names, all optional fields omitted when absent. Edges carry both the
//! primitive shape (`sourcePoint`/`bendPoints`/`targetPoint`) and the extended one (`sections`),
//! since engines answer with either.

pub mod engine;
pub mod error;
pub mod graph;

pub use engine::{Elk, JsonTransport};
pub use error::{ElkError, Result};
pub use graph::{
    ElkEdge, ElkEdgeSection, ElkElement, ElkLabel, ElkNode, ElkPoint, ElkPort, ElkShape,
    LayoutOptions,
};
