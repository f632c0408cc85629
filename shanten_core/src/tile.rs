use crate::error::ShantenError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Number of distinct tile kinds (9 × 3 number suits + 7 honors).
pub const TILE_KINDS: usize = 34;

/// Per-kind tile counts, indexed by [`Tile::index`].
pub type Counts = [u8; TILE_KINDS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Man, Suit::Pin, Suit::Sou, Suit::Honor];

    /// First kind index of this suit.
    pub fn base(self) -> usize {
        match self {
            Suit::Man => 0,
            Suit::Pin => 9,
            Suit::Sou => 18,
            Suit::Honor => 27,
        }
    }

    /// Number of kinds in this suit.
    pub fn kinds(self) -> usize {
        if self == Suit::Honor {
            7
        } else {
            9
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'm' => Some(Suit::Man),
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    /// 1..=7 in E S W N P F C order.
    pub fn num(self) -> u8 {
        self as u8 + 1
    }

    fn from_code(c: char) -> Option<Self> {
        match c {
            'E' => Some(Honor::East),
            'S' => Some(Honor::South),
            'W' => Some(Honor::West),
            'N' => Some(Honor::North),
            'P' => Some(Honor::White),
            'F' => Some(Honor::Green),
            'C' => Some(Honor::Red),
            _ => None,
        }
    }
}

/// A single tile. Equality, hashing and ordering go by kind only, so a red
/// five compares equal to the plain five of its suit.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    suit: Suit,
    num: u8,
    red: bool,
}

impl Tile {
    pub fn new(suit: Suit, num: u8) -> Result<Self, ShantenError> {
        if num == 0 || num as usize > suit.kinds() {
            return Err(ShantenError::InvalidTile(format!(
                "invalid number {} for suit {:?}",
                num, suit
            )));
        }
        Ok(Tile {
            suit,
            num,
            red: false,
        })
    }

    pub fn honor(h: Honor) -> Self {
        Tile {
            suit: Suit::Honor,
            num: h.num(),
            red: false,
        }
    }

    /// Red five of a number suit.
    pub fn red_five(suit: Suit) -> Result<Self, ShantenError> {
        if suit == Suit::Honor {
            return Err(ShantenError::InvalidTile("honors have no red five".into()));
        }
        Ok(Tile {
            suit,
            num: 5,
            red: true,
        })
    }

    /// Inverse of [`Tile::index`]. `index` must be below [`TILE_KINDS`].
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < TILE_KINDS);
        let (suit, num) = match index {
            0..=8 => (Suit::Man, index + 1),
            9..=17 => (Suit::Pin, index - 8),
            18..=26 => (Suit::Sou, index - 17),
            _ => (Suit::Honor, index - 26),
        };
        Tile {
            suit,
            num: num as u8,
            red: false,
        }
    }

    /// The 34 kinds in index order, without red fives.
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..TILE_KINDS).map(Tile::from_index)
    }

    pub fn from_code(code: &str) -> Result<Self, ShantenError> {
        let mut chars = code.chars();
        let (first, second) = (chars.next(), chars.next());
        if chars.next().is_some() {
            return Err(ShantenError::InvalidTile(format!("invalid tile code: {}", code)));
        }

        match (first, second) {
            (Some(c), None) => Honor::from_code(c)
                .map(Tile::honor)
                .ok_or_else(|| ShantenError::InvalidTile(format!("invalid tile code: {}", code))),
            (Some(d), Some(s)) => {
                let n = d
                    .to_digit(10)
                    .ok_or_else(|| ShantenError::InvalidTile(format!("invalid number: {}", code)))?
                    as u8;
                let suit = Suit::from_letter(s)
                    .ok_or_else(|| ShantenError::InvalidTile(format!("invalid suit: {}", code)))?;
                if n == 0 {
                    Tile::red_five(suit)
                } else {
                    Tile::new(suit, n)
                }
            }
            _ => Err(ShantenError::InvalidTile(format!("invalid tile code: {}", code))),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn num(&self) -> u8 {
        self.num
    }

    pub fn is_red(&self) -> bool {
        self.red
    }

    pub fn is_honor(&self) -> bool {
        self.suit == Suit::Honor
    }

    /// Kind index in 0..34 (man, pin, sou, then honors).
    pub fn index(&self) -> usize {
        self.suit.base() + self.num as usize - 1
    }

    /// Same tile with the red flag cleared.
    pub fn plain(&self) -> Self {
        Tile { red: false, ..*self }
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    pub fn next2(&self) -> Option<Self> {
        self.offset(2)
    }

    pub fn prev(&self) -> Option<Self> {
        self.offset(-1)
    }

    /// Number tile `delta` steps away in the same suit, honors have no neighbours.
    pub fn offset(&self, delta: i8) -> Option<Self> {
        if self.is_honor() {
            return None;
        }
        let n = self.num as i8 + delta;
        if (1..=9).contains(&n) {
            Some(Tile {
                suit: self.suit,
                num: n as u8,
                red: false,
            })
        } else {
            None
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.index() == other.index()
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = if self.red { 0 } else { self.num };
        write!(f, "{}{}", n, self.suit.letter())
    }
}

impl FromStr for Tile {
    type Err = ShantenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::from_code(s)
    }
}

impl Serialize for Tile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Tile::from_code(&code).map_err(serde::de::Error::custom)
    }
}

/// Parses compact notation such as `123m0p55z` or space separated codes
/// (`1m 2m E`). Honor letters may appear on their own.
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>, ShantenError> {
    let mut tiles = vec![];
    let mut pending: Vec<u8> = vec![];

    for c in text.chars() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
            continue;
        }
        if let Some(suit) = Suit::from_letter(c) {
            if pending.is_empty() {
                return Err(ShantenError::InvalidTile(format!(
                    "suit '{}' without numbers in {:?}",
                    c, text
                )));
            }
            for n in pending.drain(..) {
                tiles.push(if n == 0 {
                    Tile::red_five(suit)?
                } else {
                    Tile::new(suit, n)?
                });
            }
            continue;
        }
        if let Some(h) = Honor::from_code(c) {
            if !pending.is_empty() {
                return Err(ShantenError::InvalidTile(format!(
                    "numbers without suit in {:?}",
                    text
                )));
            }
            tiles.push(Tile::honor(h));
            continue;
        }
        return Err(ShantenError::InvalidTile(format!(
            "unexpected '{}' in {:?}",
            c, text
        )));
    }

    if !pending.is_empty() {
        return Err(ShantenError::InvalidTile(format!(
            "numbers without suit in {:?}",
            text
        )));
    }
    Ok(tiles)
}

/// Compact notation (`123m0p11z`), grouping consecutive tiles of one suit.
pub fn format_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> String {
    let mut out = String::new();
    let mut suit: Option<Suit> = None;
    for t in tiles {
        if let Some(s) = suit {
            if s != t.suit {
                out.push(s.letter());
            }
        }
        out.push(char::from(b'0' + if t.red { 0 } else { t.num }));
        suit = Some(t.suit);
    }
    if let Some(s) = suit {
        out.push(s.letter());
    }
    out
}

pub fn count_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Counts {
    let mut counts = [0u8; TILE_KINDS];
    for t in tiles {
        counts[t.index()] = counts[t.index()].saturating_add(1);
    }
    counts
}

/// Kind indices of the thirteen terminal/honor kinds.
pub const YAOCHU_INDICES: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];
