#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("duplicate id in model: {id}")]
    DuplicateId { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("edge `{id}` is missing `{field}`")]
    MissingEndpoint { id: String, field: &'static str },
}
