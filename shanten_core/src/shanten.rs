use crate::hand::{Hand, Tatsu};
use crate::tile::Tile;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Evaluation of a 13-tile decision point (about to draw).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShantenWithoutGot {
    #[serde(rename = "shantenNum")]
    pub shanten: i8,
    /// Tiles lowering the shanten by one. None under `best_shanten_only`.
    pub advance: Option<BTreeSet<Tile>>,
    pub advance_num: Option<u32>,
    pub good_shape_advance: Option<BTreeSet<Tile>>,
    pub good_shape_advance_num: Option<u32>,
}

impl ShantenWithoutGot {
    pub(crate) fn shanten_only(shanten: i8) -> Self {
        ShantenWithoutGot {
            shanten,
            advance: None,
            advance_num: None,
            good_shape_advance: None,
            good_shape_advance_num: None,
        }
    }
}

/// Evaluation of a 14-tile decision point (must discard, or may declare a
/// concealed quad).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShantenWithGot {
    #[serde(rename = "shantenNum")]
    pub shanten: i8,
    pub discard_to_advance: Option<BTreeMap<Tile, ShantenWithoutGot>>,
    pub ankan_to_advance: Option<BTreeMap<Tile, ShantenWithoutGot>>,
}

impl ShantenWithGot {
    /// Discards that keep the best shanten.
    pub fn best_discards(&self) -> Vec<Tile> {
        self.discard_to_advance
            .iter()
            .flatten()
            .filter(|(_, v)| v.shanten == self.shanten.max(0))
            .map(|(t, _)| *t)
            .collect()
    }
}

/// Pass versus every legal call on a tile discarded by another player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShantenWithFuroChance {
    #[serde(rename = "shantenNum")]
    pub shanten: i8,
    #[serde(rename = "pass")]
    pub pass_: Option<ShantenWithoutGot>,
    pub chi: BTreeMap<Tatsu, ShantenWithGot>,
    pub pon: Option<ShantenWithGot>,
    /// An open quad still owes its replacement draw, so it stays a 13-tile
    /// decision point.
    pub minkan: Option<ShantenWithoutGot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Shanten {
    #[serde(rename = "ShantenWithoutGot")]
    WithoutGot(ShantenWithoutGot),
    #[serde(rename = "ShantenWithGot")]
    WithGot(ShantenWithGot),
    #[serde(rename = "ShantenWithFuroChance")]
    WithFuroChance(ShantenWithFuroChance),
}

impl Shanten {
    pub fn shanten(&self) -> i8 {
        match self {
            Shanten::WithoutGot(s) => s.shanten,
            Shanten::WithGot(s) => s.shanten,
            Shanten::WithFuroChance(s) => s.shanten,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShantenResultType {
    Regular,
    Chitoi,
    Kokushi,
    Union,
    FuroChance,
}

/// Top level result. Only `Union` carries the three component results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShantenResult {
    #[serde(rename = "type")]
    pub result_type: ShantenResultType,
    pub hand: Hand,
    pub shanten_info: Shanten,
    pub regular: Option<Box<ShantenResult>>,
    pub chitoi: Option<Box<ShantenResult>>,
    pub kokushi: Option<Box<ShantenResult>>,
}

impl ShantenResult {
    pub(crate) fn single(result_type: ShantenResultType, hand: Hand, shanten_info: Shanten) -> Self {
        ShantenResult {
            result_type,
            hand,
            shanten_info,
            regular: None,
            chitoi: None,
            kokushi: None,
        }
    }

    pub fn shanten(&self) -> i8 {
        self.shanten_info.shanten()
    }

    pub fn without_got(&self) -> Option<&ShantenWithoutGot> {
        match &self.shanten_info {
            Shanten::WithoutGot(s) => Some(s),
            _ => None,
        }
    }

    pub fn with_got(&self) -> Option<&ShantenWithGot> {
        match &self.shanten_info {
            Shanten::WithGot(s) => Some(s),
            _ => None,
        }
    }

    pub fn furo_chance(&self) -> Option<&ShantenWithFuroChance> {
        match &self.shanten_info {
            Shanten::WithFuroChance(s) => Some(s),
            _ => None,
        }
    }

    pub fn advance(&self) -> Option<&BTreeSet<Tile>> {
        self.without_got().and_then(|s| s.advance.as_ref())
    }

    pub fn advance_num(&self) -> Option<u32> {
        self.without_got().and_then(|s| s.advance_num)
    }

    pub fn good_shape_advance(&self) -> Option<&BTreeSet<Tile>> {
        self.without_got().and_then(|s| s.good_shape_advance.as_ref())
    }

    pub fn discard_to_advance(&self) -> Option<&BTreeMap<Tile, ShantenWithoutGot>> {
        self.with_got().and_then(|s| s.discard_to_advance.as_ref())
    }

    pub fn ankan_to_advance(&self) -> Option<&BTreeMap<Tile, ShantenWithoutGot>> {
        self.with_got().and_then(|s| s.ankan_to_advance.as_ref())
    }
}
