use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathseamError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Gene not found: {gene} in organism {org}")]
    GeneNotFound { gene: String, org: String },

    #[error("Pathway not found: {0}")]
    PathwayNotFound(String),

    /// The pathway network step never ran for this gene.
    #[error("Missing node data for gene {0}: pathway network has not been built")]
    MissingNodeData(String),

    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PathseamError>;
