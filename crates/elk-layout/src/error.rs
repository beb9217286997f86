use elk_graph::ElkError;
use smodel::IndexError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("type not supported: {element_type}")]
    UnsupportedType { id: String, element_type: String },

    #[error("expected a graph element, found `{element_type}` ({id})")]
    NotAGraph { id: String, element_type: String },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Elk(#[from] ElkError),
}

pub type Result<T> = std::result::Result<T, Error>;
