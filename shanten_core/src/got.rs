use crate::error::ShantenError;
use crate::hand::Hand;
use crate::shanten::{ShantenWithGot, ShantenWithoutGot};
use crate::tile::Tile;
use crate::ShantenOptions;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Evaluates every distinct discard (and, when `allow_ankan`, every
/// concealed quad) of a 14-tile hand with `eval`.
///
/// `direct` is the shanten of the 14 tiles themselves; it is what reports a
/// complete hand as -1.
pub(crate) fn with_got<F>(
    hand: &Hand,
    direct: i8,
    allow_ankan: bool,
    opts: &ShantenOptions,
    eval: F,
) -> Result<ShantenWithGot, ShantenError>
where
    F: Fn(&Hand, &ShantenOptions) -> ShantenWithoutGot + Sync,
{
    let kinds: BTreeSet<Tile> = hand.tiles.iter().map(Tile::plain).collect();
    let discard_to_advance = kinds
        .par_iter()
        .map(|&tile| hand.discard(tile).map(|after| (tile, eval(&after, opts))))
        .collect::<Result<BTreeMap<_, _>, ShantenError>>()?;

    let ankan_to_advance = if allow_ankan {
        let counts = hand.counts();
        kinds
            .iter()
            .filter(|t| counts[t.index()] == 4)
            .map(|&tile| hand.ankan(tile).map(|after| (tile, eval(&after, opts))))
            .collect::<Result<BTreeMap<_, _>, ShantenError>>()?
    } else {
        BTreeMap::new()
    };

    let shanten = discard_to_advance
        .values()
        .chain(ankan_to_advance.values())
        .map(|s| s.shanten)
        .fold(direct, i8::min);
    tracing::trace!(
        discards = discard_to_advance.len(),
        ankan = ankan_to_advance.len(),
        shanten,
        "evaluated got-tile candidates"
    );

    if opts.best_shanten_only {
        return Ok(ShantenWithGot {
            shanten,
            discard_to_advance: None,
            ankan_to_advance: None,
        });
    }
    Ok(ShantenWithGot {
        shanten,
        discard_to_advance: Some(discard_to_advance),
        ankan_to_advance: Some(ankan_to_advance),
    })
}

#[cfg(test)]
mod tests {
    use crate::evaluate::Topology;
    use crate::hand::{Furo, Hand};
    use crate::tile::{parse_tiles, Tile};
    use crate::ShantenOptions;

    fn t(code: &str) -> Tile {
        Tile::from_code(code).unwrap()
    }

    fn hand(text: &str) -> Hand {
        Hand::new(parse_tiles(text).unwrap(), vec![]).unwrap()
    }

    #[test]
    fn complete_hand_is_minus_one() {
        let s = Topology::Regular
            .with_got(&hand("123456789m123p11z"), &ShantenOptions::default())
            .unwrap();
        assert_eq!(s.shanten, -1);
        let discards = s.discard_to_advance.unwrap();
        assert_eq!(discards[&t("1z")].shanten, 0);
        assert_eq!(discards.len(), 13);
    }

    #[test]
    fn discard_map_covers_distinct_kinds() {
        let s = Topology::Regular
            .with_got(&hand("123456789m11p459s"), &ShantenOptions::default())
            .unwrap();
        assert_eq!(s.shanten, 0);
        let discards = s.discard_to_advance.as_ref().unwrap();
        assert_eq!(discards.len(), 13);
        assert_eq!(s.best_discards(), vec![t("9s")]);
        assert_eq!(discards[&t("9s")].advance_num, Some(8));
    }

    #[test]
    fn ankan_needs_four_concealed_copies() {
        let s = Topology::Regular
            .with_got(&hand("1111m234p567s789s1z"), &ShantenOptions::default())
            .unwrap();
        let ankan = s.ankan_to_advance.unwrap();
        assert_eq!(ankan.keys().copied().collect::<Vec<_>>(), vec![t("1m")]);
        assert_eq!(ankan[&t("1m")].shanten, 0);
    }

    #[test]
    fn ankan_is_skipped_for_open_hands_and_when_disabled() {
        let pon = Furo::pon(t("7z"));
        let open = Hand::new(parse_tiles("1111m234p567s9s").unwrap(), vec![pon]).unwrap();
        let s = Topology::Regular.with_got(&open, &ShantenOptions::default()).unwrap();
        assert_eq!(s.ankan_to_advance, Some(Default::default()));

        let opts = ShantenOptions {
            allow_ankan: false,
            ..ShantenOptions::default()
        };
        let s = Topology::Regular.with_got(&hand("1111m234p567s789s1z"), &opts).unwrap();
        assert_eq!(s.ankan_to_advance, Some(Default::default()));
    }

    #[test]
    fn best_shanten_only_drops_maps() {
        let opts = ShantenOptions {
            best_shanten_only: true,
            ..ShantenOptions::default()
        };
        let s = Topology::Regular.with_got(&hand("123456789m11p459s"), &opts).unwrap();
        assert_eq!(s.shanten, 0);
        assert_eq!(s.discard_to_advance, None);
        assert_eq!(s.ankan_to_advance, None);
    }
}
