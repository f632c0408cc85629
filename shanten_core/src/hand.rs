use crate::error::ShantenError;
use crate::tile::{count_tiles, format_tiles, Counts, Tile};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Two-tile proto-meld (搭子), keyed by its lower tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tatsu {
    Toitsu(Tile),  // 対子
    Ryanmen(Tile), // 両面 23..78
    Penchan(Tile), // 辺張 12 / 89
    Kanchan(Tile), // 嵌張 13..79
}

impl Tatsu {
    pub fn new(a: Tile, b: Tile) -> Result<Self, ShantenError> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return Ok(Tatsu::Toitsu(lo.plain()));
        }
        if lo.is_honor() || lo.suit() != hi.suit() {
            return Err(ShantenError::IllegalCall(format!(
                "{} and {} do not form a tatsu",
                lo, hi
            )));
        }
        match hi.num() - lo.num() {
            1 if lo.num() == 1 || lo.num() == 8 => Ok(Tatsu::Penchan(lo.plain())),
            1 => Ok(Tatsu::Ryanmen(lo.plain())),
            2 => Ok(Tatsu::Kanchan(lo.plain())),
            _ => Err(ShantenError::IllegalCall(format!(
                "{} and {} do not form a tatsu",
                lo, hi
            ))),
        }
    }

    pub fn first(&self) -> Tile {
        match *self {
            Tatsu::Toitsu(t) | Tatsu::Ryanmen(t) | Tatsu::Penchan(t) | Tatsu::Kanchan(t) => t,
        }
    }

    pub fn second(&self) -> Tile {
        let first = self.first();
        let second = match self {
            Tatsu::Toitsu(_) => Some(first),
            Tatsu::Ryanmen(_) | Tatsu::Penchan(_) => first.next(),
            Tatsu::Kanchan(_) => first.next2(),
        };
        second.unwrap_or(first)
    }

    /// Tiles that complete this tatsu into a meld.
    pub fn waiting(&self) -> Vec<Tile> {
        let first = self.first();
        match self {
            Tatsu::Toitsu(_) => vec![first],
            Tatsu::Kanchan(_) => first.next().into_iter().collect(),
            Tatsu::Penchan(_) | Tatsu::Ryanmen(_) => first
                .prev()
                .into_iter()
                .chain(self.second().next())
                .collect(),
        }
    }
}

impl fmt::Display for Tatsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = (self.first(), self.second());
        write!(f, "{}{}{}", a.num(), b.num(), a.suit().letter())
    }
}

impl Serialize for Tatsu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuroType {
    Chi,
    Pon,
    Minkan,
    Ankan,
}

impl FuroType {
    pub fn is_kan(self) -> bool {
        matches!(self, FuroType::Minkan | FuroType::Ankan)
    }

    /// Every call except a concealed quad opens the hand.
    pub fn is_open(self) -> bool {
        self != FuroType::Ankan
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FuroRepr {
    #[serde(rename = "type")]
    furo_type: FuroType,
    tiles: Vec<Tile>,
}

/// A declared meld. Its tiles are fixed and never enter the decomposition
/// search again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FuroRepr")]
pub struct Furo {
    #[serde(rename = "type")]
    furo_type: FuroType,
    tiles: Vec<Tile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    claimed: Option<Tile>,
}

impl Furo {
    /// Builds a call from its tiles, checking the composition.
    pub fn new(furo_type: FuroType, mut tiles: Vec<Tile>) -> Result<Self, ShantenError> {
        tiles.sort();
        let bad = |why: &str| {
            Err(ShantenError::InvalidHand(format!(
                "{:?} {}: {}",
                furo_type,
                tiles.iter().map(|t| t.to_string()).collect::<String>(),
                why
            )))
        };

        match furo_type {
            FuroType::Chi => {
                if tiles.len() != 3 {
                    return bad("chi needs 3 tiles");
                }
                if tiles[0].is_honor()
                    || tiles[0].next() != Some(tiles[1])
                    || tiles[1].next() != Some(tiles[2])
                {
                    return bad("chi tiles must be a run");
                }
            }
            FuroType::Pon | FuroType::Minkan | FuroType::Ankan => {
                let need = if furo_type.is_kan() { 4 } else { 3 };
                if tiles.len() != need {
                    return bad(&format!("needs {} tiles", need));
                }
                if tiles.iter().any(|t| *t != tiles[0]) {
                    return bad("tiles must be identical");
                }
            }
        }

        Ok(Furo {
            furo_type,
            tiles,
            claimed: None,
        })
    }

    pub fn chi(tatsu: Tatsu, claimed: Tile) -> Result<Self, ShantenError> {
        let mut furo = Furo::new(FuroType::Chi, vec![tatsu.first(), tatsu.second(), claimed])
            .map_err(|e| ShantenError::IllegalCall(e.to_string()))?;
        furo.claimed = Some(claimed);
        Ok(furo)
    }

    pub fn pon(claimed: Tile) -> Self {
        Furo {
            furo_type: FuroType::Pon,
            tiles: vec![claimed; 3],
            claimed: Some(claimed),
        }
    }

    pub fn minkan(claimed: Tile) -> Self {
        Furo {
            furo_type: FuroType::Minkan,
            tiles: vec![claimed; 4],
            claimed: Some(claimed),
        }
    }

    pub fn ankan(tile: Tile) -> Self {
        Furo {
            furo_type: FuroType::Ankan,
            tiles: vec![tile; 4],
            claimed: None,
        }
    }

    pub fn furo_type(&self) -> FuroType {
        self.furo_type
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile taken from another player, when known.
    pub fn claimed(&self) -> Option<Tile> {
        self.claimed
    }
}

impl TryFrom<FuroRepr> for Furo {
    type Error = ShantenError;

    fn try_from(repr: FuroRepr) -> Result<Self, Self::Error> {
        Furo::new(repr.furo_type, repr.tiles)
    }
}

/// Concealed tiles plus declared calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub furo: Vec<Furo>,
}

impl Hand {
    pub fn new(tiles: Vec<Tile>, furo: Vec<Furo>) -> Result<Self, ShantenError> {
        let hand = Hand { tiles, furo };
        hand.validate()?;
        Ok(hand)
    }

    /// Checks call count, the 13/14 length rule, call shapes and per-kind copies.
    pub fn validate(&self) -> Result<(), ShantenError> {
        if self.furo.len() > 4 {
            return Err(ShantenError::InvalidHand(format!(
                "{} calls, at most 4 allowed",
                self.furo.len()
            )));
        }
        let len = self.len();
        if len != 13 && len != 14 {
            return Err(ShantenError::InvalidHand(format!(
                "{} concealed tiles with {} calls is not a 13/14 tile hand",
                self.tiles.len(),
                self.furo.len()
            )));
        }
        for f in &self.furo {
            Furo::new(f.furo_type, f.tiles.clone())?;
        }
        let visible = self.visible_counts();
        if let Some(i) = visible.iter().position(|&c| c > 4) {
            return Err(ShantenError::InvalidHand(format!(
                "{} copies of {}",
                visible[i],
                Tile::from_index(i)
            )));
        }
        Ok(())
    }

    /// Concealed tiles plus three per call; a quad's fourth tile is its
    /// replacement draw.
    pub fn len(&self) -> usize {
        self.tiles.len() + 3 * self.furo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.furo.is_empty()
    }

    /// A drawn or claimed tile is waiting for a discard.
    pub fn with_got(&self) -> bool {
        self.len() % 3 == 2
    }

    /// No chi, pon or open quad.
    pub fn is_menzen(&self) -> bool {
        self.furo.iter().all(|f| !f.furo_type.is_open())
    }

    pub fn counts(&self) -> Counts {
        count_tiles(&self.tiles)
    }

    /// Copies held in the concealed part and in the calls.
    pub fn visible_counts(&self) -> Counts {
        count_tiles(self.tiles.iter().chain(self.furo.iter().flat_map(|f| f.tiles.iter())))
    }

    pub fn discard(&self, tile: Tile) -> Result<Hand, ShantenError> {
        if !self.with_got() {
            return Err(ShantenError::IllegalCall(format!(
                "cannot discard {} from a hand without a drawn tile",
                tile
            )));
        }
        let tiles = remove_copies(&self.tiles, tile, 1)
            .ok_or_else(|| ShantenError::IllegalCall(format!("{} is not in hand", tile)))?;
        Ok(Hand {
            tiles,
            furo: self.furo.clone(),
        })
    }

    pub fn chi(&self, tatsu: Tatsu, claimed: Tile) -> Result<Hand, ShantenError> {
        self.expect_waiting("chi")?;
        if matches!(tatsu, Tatsu::Toitsu(_)) || !tatsu.waiting().contains(&claimed) {
            return Err(ShantenError::IllegalCall(format!(
                "{} does not complete a run with {}",
                claimed, tatsu
            )));
        }
        let tiles = remove_copies(&self.tiles, tatsu.first(), 1)
            .and_then(|rest| remove_copies(&rest, tatsu.second(), 1))
            .ok_or_else(|| ShantenError::IllegalCall(format!("{} is not in hand", tatsu)))?;
        Ok(self.with_call(tiles, Furo::chi(tatsu, claimed)?))
    }

    pub fn pon(&self, claimed: Tile) -> Result<Hand, ShantenError> {
        self.expect_waiting("pon")?;
        let tiles = remove_copies(&self.tiles, claimed, 2)
            .ok_or_else(|| ShantenError::IllegalCall(format!("pon needs two {} in hand", claimed)))?;
        Ok(self.with_call(tiles, Furo::pon(claimed)))
    }

    pub fn minkan(&self, claimed: Tile) -> Result<Hand, ShantenError> {
        self.expect_waiting("minkan")?;
        if self.counts()[claimed.index()] != 3 {
            return Err(ShantenError::IllegalCall(format!(
                "minkan needs exactly three {} in hand",
                claimed
            )));
        }
        let tiles = remove_copies(&self.tiles, claimed, 3)
            .ok_or_else(|| ShantenError::IllegalCall(format!("{} is not in hand", claimed)))?;
        Ok(self.with_call(tiles, Furo::minkan(claimed)))
    }

    pub fn ankan(&self, tile: Tile) -> Result<Hand, ShantenError> {
        if !self.with_got() {
            return Err(ShantenError::IllegalCall(
                "ankan needs a drawn tile".to_string(),
            ));
        }
        let tiles = remove_copies(&self.tiles, tile, 4)
            .ok_or_else(|| ShantenError::IllegalCall(format!("ankan needs four {} in hand", tile)))?;
        Ok(self.with_call(tiles, Furo::ankan(tile.plain())))
    }

    fn expect_waiting(&self, action: &str) -> Result<(), ShantenError> {
        if self.with_got() {
            return Err(ShantenError::IllegalCall(format!(
                "{} on a hand that must discard first",
                action
            )));
        }
        Ok(())
    }

    fn with_call(&self, tiles: Vec<Tile>, furo: Furo) -> Hand {
        let mut calls = self.furo.clone();
        calls.push(furo);
        Hand { tiles, furo: calls }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_tiles(&self.tiles))?;
        for furo in &self.furo {
            write!(f, " {:?}({})", furo.furo_type, format_tiles(&furo.tiles))?;
        }
        Ok(())
    }
}

/// Copy of `tiles` without `n` copies of `tile`, or None when short.
fn remove_copies(tiles: &[Tile], tile: Tile, n: usize) -> Option<Vec<Tile>> {
    let mut rest = tiles.to_vec();
    for _ in 0..n {
        let pos = rest.iter().rposition(|t| *t == tile)?;
        rest.remove(pos);
    }
    Some(rest)
}
