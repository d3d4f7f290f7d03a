/// Error taxonomy for the wire3d core
use thiserror::Error;

/// Errors raised by model construction, transformation, and registry operations.
///
/// All variants are raised synchronously at the offending call and propagate
/// to the caller unchanged; nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("basis vectors are not orthogonal or not right-handed")]
    InvalidBasis,

    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    #[error("face references vertex {index} but the model has {vertex_count} vertices")]
    InvalidFace { index: usize, vertex_count: usize },

    #[error("colours must be RGB triplets")]
    InvalidColor,

    #[error("no model is registered under key `{0}`")]
    UnknownKey(String),

    #[error("a model already exists with key `{0}`")]
    DuplicateKey(String),

    #[error("could not construct a model: {0}")]
    Construction(String),

    #[error("failed to parse mesh: {0}")]
    MeshParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
