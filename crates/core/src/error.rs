use thiserror::Error;

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("position {pos} lies outside the {width}x{height} grid")]
    OutOfBounds { pos: Pos, width: usize, height: usize },
    #[error("depth at {pos} was already assigned")]
    AlreadyAssigned { pos: Pos },
    #[error("placed {placed} of {requested} hazards before running out of deep floor")]
    InsufficientDeepFloor { placed: usize, requested: usize },
    #[error("invalid maze configuration: {reason}")]
    InvalidConfig { reason: String },
}
