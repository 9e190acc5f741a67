use thiserror::Error;

/// Errors raised while configuring generators, wiring graphs or writing maps.
///
/// Evaluation itself never fails with a `NoiseError`: a malformed graph
/// (an unset source, a terrace without control points) panics at the call
/// that tried to evaluate it.
#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("octave count {count} outside [1, {max}]")]
    InvalidOctaveCount { count: usize, max: usize },

    #[error("lower bound {lower} must be less than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("a control point already exists at {0}")]
    DuplicateControlPoint(f64),

    #[error("needs at least {needed} control points, has {count}")]
    NotEnoughControlPoints { needed: usize, count: usize },

    #[error("invalid map size {width}x{height}")]
    InvalidMapSize { width: usize, height: usize },

    #[error("no node with id {0} in this graph")]
    UnknownNode(usize),

    #[error("source index {index} out of range for {kind} ({count} sources)")]
    SourceIndexOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("connecting node {source_node} into node {node} would create a cycle")]
    Cycle { node: usize, source_node: usize },

    #[error("node {node} is missing source {index}")]
    MissingSource { node: usize, index: usize },

    #[error("{kind} cannot be evaluated in 6D")]
    Unsupported6d { kind: &'static str },

    #[error("graph parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("graph serialization error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
