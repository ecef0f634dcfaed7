use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position outside the board")]
    InvalidPosition,
    #[error("Board cells do not form a square grid")]
    NonSquareBoard,
    #[error("Board size exceeds the coordinate range")]
    BoardTooLarge,
}

pub type Result<T> = core::result::Result<T, GameError>;
