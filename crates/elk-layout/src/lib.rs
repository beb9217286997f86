#![forbid(unsafe_code)]

//! Automatic layout of diagram models through an ELK-compatible engine.
//!
//! A layout pass converts an [`smodel`] graph into an ELK JSON graph, awaits the engine, and
//! writes positions, sizes, edge routes and junction markers back onto the model:
//!
//! ```text
//! SModelElement --transform--> ElkNode --Elk::layout--> ElkNode --apply--> LayoutUpdates --commit--> SModelElement
//! ```
//!
//! Which elements take part is decided by an [`ElementFilter`]; per-element ELK options come
//! from a [`LayoutConfigurator`] (see [`LayoutConfig`] for a data-driven one).
//!
//! A pass takes exclusive access to the model it lays out (`&mut` or by value), so at most one
//! pass can be in flight per model. Dropping the returned future before it resolves leaves the
//! model untouched.

pub mod config;
pub mod configurator;
pub mod engine;
pub mod error;
pub mod filter;
pub mod updates;

#[cfg(test)]
mod tests;

pub use config::LayoutConfig;
pub use configurator::{DefaultLayoutConfigurator, LayoutConfigurator};
pub use engine::{ElkLayoutEngine, ModelLayoutEngine};
pub use error::{Error, Result};
pub use filter::{DefaultElementFilter, ElementFilter};
pub use updates::{EdgeUpdate, LayoutUpdates, ShapeUpdate};

pub use elk_graph;
pub use smodel;
