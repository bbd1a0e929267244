use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid yaml document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid json document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root must be a mapping, found {found}")]
    RootNotMapping { found: &'static str },
    #[error("mapping keys must be scalars, found {found}")]
    ComplexKey { found: &'static str },
}

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("cannot render json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document format `{0}`")]
pub struct UnknownFormatError(pub String);
