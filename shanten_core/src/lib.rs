use serde::{Deserialize, Serialize};

/// Switches shared by every entry point.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ShantenOptions {
    /// Count unseen copies of the advance tiles (and classify good shape).
    pub calc_advance_num: bool,
    /// Only the shanten numbers; no advance sets or discard maps.
    pub best_shanten_only: bool,
    /// Offer concealed quads from a closed 14-tile hand.
    pub allow_ankan: bool,
    /// Consider chi in a furo chance.
    pub allow_chi: bool,
}

impl Default for ShantenOptions {
    fn default() -> Self {
        ShantenOptions {
            calc_advance_num: true,
            best_shanten_only: false,
            allow_ankan: true,
            allow_chi: true,
        }
    }
}

mod decompose;
mod engine;
mod error;
mod evaluate;
mod furo;
mod got;
mod hand;
mod shanten;
mod special;
mod tile;
mod union;
mod wait;

pub use engine::{chitoi_shanten, furo_chance_shanten, kokushi_shanten, regular_shanten, shanten};
pub use error::ShantenError;
pub use furo::chi_candidates;
pub use hand::{Furo, FuroType, Hand, Tatsu};
pub use shanten::{
    Shanten, ShantenResult, ShantenResultType, ShantenWithFuroChance, ShantenWithGot,
    ShantenWithoutGot,
};
pub use special::{chitoi_shanten_num, kokushi_shanten_num};
pub use tile::{count_tiles, format_tiles, parse_tiles, Counts, Honor, Suit, Tile, TILE_KINDS};
