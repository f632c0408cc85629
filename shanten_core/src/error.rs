use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShantenError {
    /// Tile notation that does not name a tile.
    InvalidTile(String),
    /// Tile/call counts or call composition break the hand invariants.
    InvalidHand(String),
    /// A call or discard was forced on a hand that cannot make it.
    IllegalCall(String),
}

impl fmt::Display for ShantenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShantenError::InvalidTile(msg) => write!(f, "invalid tile: {}", msg),
            ShantenError::InvalidHand(msg) => write!(f, "invalid hand: {}", msg),
            ShantenError::IllegalCall(msg) => write!(f, "illegal call: {}", msg),
        }
    }
}

impl std::error::Error for ShantenError {}
