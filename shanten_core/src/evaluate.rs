use crate::decompose::regular_shanten_num;
use crate::error::ShantenError;
use crate::got::with_got;
use crate::hand::Hand;
use crate::shanten::{Shanten, ShantenWithGot, ShantenWithoutGot};
use crate::special::{chitoi_shanten_num, kokushi_shanten_num};
use crate::tile::{Counts, Tile, TILE_KINDS};
use crate::wait::good_shape_advance;
use crate::ShantenOptions;
use std::collections::BTreeSet;

/// Winning-hand shape a base evaluation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Topology {
    Regular,
    Chitoi,
    Kokushi,
}

impl Topology {
    pub(crate) fn shanten_num(self, counts: &Counts, furo_count: usize) -> i8 {
        match self {
            Topology::Regular => regular_shanten_num(counts, furo_count),
            Topology::Chitoi => chitoi_shanten_num(counts),
            Topology::Kokushi => kokushi_shanten_num(counts),
        }
    }

    /// 13-tile evaluation: shanten, advance tiles and (standard form only)
    /// the good-shape subset.
    pub(crate) fn without_got(self, hand: &Hand, opts: &ShantenOptions) -> ShantenWithoutGot {
        let furo_count = hand.furo.len();
        let counts = hand.counts();
        let shanten = self.shanten_num(&counts, furo_count);
        if opts.best_shanten_only {
            return ShantenWithoutGot::shanten_only(shanten);
        }

        let visible = hand.visible_counts();
        let advance = advance_tiles(&counts, &visible, shanten, |c| {
            self.shanten_num(c, furo_count)
        });
        if !opts.calc_advance_num {
            return ShantenWithoutGot {
                advance: Some(advance),
                ..ShantenWithoutGot::shanten_only(shanten)
            };
        }

        let advance_num = remaining_num(&visible, &advance);
        let good_shape = match self {
            Topology::Regular => good_shape_advance(&counts, &visible, furo_count, shanten, &advance),
            Topology::Chitoi | Topology::Kokushi => None,
        };
        let good_shape_num = good_shape.as_ref().map(|g| remaining_num(&visible, g));

        ShantenWithoutGot {
            shanten,
            advance: Some(advance),
            advance_num: Some(advance_num),
            good_shape_advance: good_shape,
            good_shape_advance_num: good_shape_num,
        }
    }

    /// 14-tile evaluation through the discard/ankan wrapper.
    pub(crate) fn with_got(
        self,
        hand: &Hand,
        opts: &ShantenOptions,
    ) -> Result<ShantenWithGot, ShantenError> {
        let direct = self.shanten_num(&hand.counts(), hand.furo.len());
        let allow_ankan = self == Topology::Regular && opts.allow_ankan && hand.is_menzen();
        with_got(hand, direct, allow_ankan, opts, |h, o| self.without_got(h, o))
    }

    pub(crate) fn evaluate(self, hand: &Hand, opts: &ShantenOptions) -> Result<Shanten, ShantenError> {
        if hand.with_got() {
            Ok(Shanten::WithGot(self.with_got(hand, opts)?))
        } else {
            Ok(Shanten::WithoutGot(self.without_got(hand, opts)))
        }
    }
}

/// Kinds whose draw lowers `shanten`, trying every kind that still has an
/// unseen copy.
pub(crate) fn advance_tiles(
    counts: &Counts,
    visible: &Counts,
    shanten: i8,
    calc: impl Fn(&Counts) -> i8,
) -> BTreeSet<Tile> {
    let mut work = *counts;
    let mut advance = BTreeSet::new();
    for i in 0..TILE_KINDS {
        if visible[i] >= 4 {
            continue;
        }
        work[i] += 1;
        if calc(&work) < shanten {
            advance.insert(Tile::from_index(i));
        }
        work[i] -= 1;
    }
    advance
}

/// Unseen copies of `tiles` assuming four of each kind and nothing but the
/// hand visible.
pub(crate) fn remaining_num(visible: &Counts, tiles: &BTreeSet<Tile>) -> u32 {
    tiles
        .iter()
        .map(|t| 4u32.saturating_sub(visible[t.index()] as u32))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{count_tiles, parse_tiles};

    fn hand(text: &str) -> Hand {
        Hand::new(parse_tiles(text).unwrap(), vec![]).unwrap()
    }

    fn tiles(text: &str) -> BTreeSet<Tile> {
        parse_tiles(text).unwrap().into_iter().collect()
    }

    #[test]
    fn single_wait_advance() {
        let s = Topology::Regular.without_got(&hand("123456789m111p5s"), &ShantenOptions::default());
        assert_eq!(s.shanten, 0);
        assert_eq!(s.advance, Some(tiles("5s")));
        assert_eq!(s.advance_num, Some(3));
        assert_eq!(s.good_shape_advance, Some(BTreeSet::new()));
    }

    #[test]
    fn unreachable_kind_is_not_advance() {
        // tenpai on a fifth 1m only: the shape counts, the wait is dead
        let s = Topology::Regular.without_got(&hand("1111m234p567s777z"), &ShantenOptions::default());
        assert_eq!(s.shanten, 0);
        assert_eq!(s.advance, Some(BTreeSet::new()));
        assert_eq!(s.advance_num, Some(0));
        assert_eq!(s.good_shape_advance, Some(BTreeSet::new()));
    }

    #[test]
    fn remaining_counts_visible_copies() {
        let visible = count_tiles(&parse_tiles("55m5p").unwrap());
        assert_eq!(remaining_num(&visible, &tiles("5m5p5s")), 2 + 3 + 4);
    }

    #[test]
    fn calc_advance_num_off_keeps_advance_only() {
        let opts = ShantenOptions {
            calc_advance_num: false,
            ..ShantenOptions::default()
        };
        let s = Topology::Regular.without_got(&hand("123456789m111p5s"), &opts);
        assert_eq!(s.advance, Some(tiles("5s")));
        assert_eq!(s.advance_num, None);
        assert_eq!(s.good_shape_advance, None);
        assert_eq!(s.good_shape_advance_num, None);
    }

    #[test]
    fn chitoi_has_no_good_shape() {
        let s = Topology::Chitoi.without_got(&hand("1122m3344p5566s7z"), &ShantenOptions::default());
        assert_eq!(s.shanten, 0);
        assert_eq!(s.advance, Some(tiles("7z")));
        assert_eq!(s.good_shape_advance, None);
    }
}
