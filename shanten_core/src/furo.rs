use crate::error::ShantenError;
use crate::evaluate::Topology;
use crate::hand::{Hand, Tatsu};
use crate::shanten::ShantenWithFuroChance;
use crate::tile::Tile;
use crate::ShantenOptions;
use rayon::prelude::*;
use std::collections::BTreeMap;

// (lo, hi) offsets of the tatsu tiles from the claimed tile
const CHI_OFFSETS: [(i8, i8); 3] = [(-2, -1), (-1, 1), (1, 2)];

/// Distinct tatsu in `hand` that `chance` completes into a run.
pub fn chi_candidates(hand: &Hand, chance: Tile) -> Vec<Tatsu> {
    let counts = hand.counts();
    CHI_OFFSETS
        .iter()
        .filter_map(|&(lo, hi)| {
            let a = chance.offset(lo)?;
            let b = chance.offset(hi)?;
            if counts[a.index()] == 0 || counts[b.index()] == 0 {
                return None;
            }
            Tatsu::new(a, b).ok()
        })
        .collect()
}

/// Pass against every legal call on `chance`. Calls go to the standard form
/// only; a call never lowers the other shapes.
pub(crate) fn furo_chance(
    hand: &Hand,
    chance: Tile,
    opts: &ShantenOptions,
) -> Result<ShantenWithFuroChance, ShantenError> {
    if hand.with_got() {
        return Err(ShantenError::InvalidHand(format!(
            "{} must discard before claiming {}",
            hand, chance
        )));
    }
    if hand.visible_counts()[chance.index()] >= 4 {
        return Err(ShantenError::InvalidHand(format!(
            "all four {} are already in {}",
            chance, hand
        )));
    }

    let counts = hand.counts();
    let pass = Topology::Regular.without_got(hand, opts);

    let chi = if opts.allow_chi && !chance.is_honor() {
        chi_candidates(hand, chance)
            .into_par_iter()
            .map(|tatsu| {
                let after = hand.chi(tatsu, chance)?;
                Topology::Regular.with_got(&after, opts).map(|s| (tatsu, s))
            })
            .collect::<Result<BTreeMap<_, _>, ShantenError>>()?
    } else {
        BTreeMap::new()
    };

    let pon = if counts[chance.index()] >= 2 {
        Some(Topology::Regular.with_got(&hand.pon(chance)?, opts)?)
    } else {
        None
    };

    let minkan = if counts[chance.index()] == 3 {
        Some(Topology::Regular.without_got(&hand.minkan(chance)?, opts))
    } else {
        None
    };

    let shanten = chi
        .values()
        .map(|s| s.shanten)
        .chain(pon.as_ref().map(|s| s.shanten))
        .chain(minkan.as_ref().map(|s| s.shanten))
        .fold(pass.shanten, i8::min);
    tracing::trace!(
        chi = chi.len(),
        pon = pon.is_some(),
        minkan = minkan.is_some(),
        shanten,
        "evaluated furo chance"
    );

    Ok(ShantenWithFuroChance {
        shanten,
        pass_: Some(pass),
        chi,
        pon,
        minkan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;

    fn t(code: &str) -> Tile {
        Tile::from_code(code).unwrap()
    }

    fn hand(text: &str) -> Hand {
        Hand::new(parse_tiles(text).unwrap(), vec![]).unwrap()
    }

    #[test]
    fn chi_candidates_by_position() {
        let h = hand("12345m11p789s123z");
        let got = chi_candidates(&h, t("3m"));
        assert_eq!(
            got,
            vec![
                Tatsu::Penchan(t("1m")),
                Tatsu::Kanchan(t("2m")),
                Tatsu::Ryanmen(t("4m")),
            ]
        );
        assert!(chi_candidates(&h, t("1z")).is_empty());
        assert_eq!(chi_candidates(&h, t("6m")), vec![Tatsu::Ryanmen(t("4m"))]);
    }

    #[test]
    fn pass_only_for_unrelated_tile() {
        let s = furo_chance(&hand("123m456p789s1122z"), t("9m"), &ShantenOptions::default()).unwrap();
        assert!(s.chi.is_empty());
        assert!(s.pon.is_none());
        assert!(s.minkan.is_none());
        assert_eq!(s.shanten, s.pass_.as_ref().unwrap().shanten);
    }

    #[test]
    fn pon_reaches_tenpai() {
        let s = furo_chance(&hand("123m456p78s1122z5z"), t("1z"), &ShantenOptions::default()).unwrap();
        assert_eq!(s.pass_.as_ref().unwrap().shanten, 1);
        let pon = s.pon.unwrap();
        assert_eq!(pon.shanten, 0);
        assert_eq!(pon.best_discards(), vec![t("5z")]);
    }

    #[test]
    fn minkan_is_a_thirteen_tile_point() {
        let s = furo_chance(&hand("111m456p78s1122z3z"), t("1m"), &ShantenOptions::default()).unwrap();
        let minkan = s.minkan.unwrap();
        assert_eq!(minkan.shanten, 1);
        assert!(minkan.advance.is_some());
        assert!(s.pon.is_some());
    }

    #[test]
    fn chi_disabled() {
        let opts = ShantenOptions {
            allow_chi: false,
            ..ShantenOptions::default()
        };
        let s = furo_chance(&hand("12345m11p789s123z"), t("3m"), &opts).unwrap();
        assert!(s.chi.is_empty());
    }

    #[test]
    fn rejects_fourteen_tiles_and_fifth_copy() {
        assert!(furo_chance(&hand("123456789m11p459s"), t("1z"), &ShantenOptions::default()).is_err());
        assert!(furo_chance(&hand("1111m456p78s1122z"), t("1m"), &ShantenOptions::default()).is_err());
    }
}
