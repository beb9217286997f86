#![forbid(unsafe_code)]

//! Diagram model schema used as the input and output of automatic layout.
//!
//! A diagram is a tree of [`SModelElement`]s. Every element carries a unique string id and a
//! `type` string whose prefix (before the first `:`) selects its [`BasicType`]. The
//! [`ParentIndex`] adds identifier and parent lookups on top of the otherwise parent-less tree.

pub mod element;
pub mod error;
pub mod geom;
pub mod index;

pub use element::{BasicType, Edge, ElementKind, Label, SModelElement, Shape};
pub use error::{IndexError, ModelError};
pub use geom::{Dimension, Point};
pub use index::{ModelIndex, ParentIndex};
