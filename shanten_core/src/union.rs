use crate::error::ShantenError;
use crate::evaluate::remaining_num;
use crate::hand::Hand;
use crate::shanten::{Shanten, ShantenWithGot, ShantenWithoutGot};
use crate::tile::{Counts, Tile};
use std::collections::{BTreeMap, BTreeSet};

/// Unions the advance data of every part sitting at the lowest shanten.
///
/// Counts are recomputed on the merged sets, so an advance shared by two
/// shapes is not counted twice.
pub(crate) fn merge_without_got(parts: &[&ShantenWithoutGot], visible: &Counts) -> ShantenWithoutGot {
    let shanten = parts.iter().map(|s| s.shanten).min().unwrap_or(i8::MAX);
    let best: Vec<_> = parts.iter().filter(|s| s.shanten == shanten).collect();

    let advance = union_of(best.iter().map(|s| s.advance.as_ref()));
    let advance_num = match &advance {
        Some(a) if best.iter().any(|s| s.advance_num.is_some()) => Some(remaining_num(visible, a)),
        _ => None,
    };

    let provided: Vec<_> = best.iter().filter_map(|s| s.good_shape_advance.as_ref()).collect();
    let good_shape_advance = if provided.is_empty() {
        None
    } else {
        Some(provided.into_iter().flatten().copied().collect::<BTreeSet<_>>())
    };
    let good_shape_advance_num = good_shape_advance.as_ref().map(|g| remaining_num(visible, g));

    ShantenWithoutGot {
        shanten,
        advance,
        advance_num,
        good_shape_advance,
        good_shape_advance_num,
    }
}

// None as soon as one part skipped its advance set.
fn union_of<'a>(sets: impl Iterator<Item = Option<&'a BTreeSet<Tile>>>) -> Option<BTreeSet<Tile>> {
    let mut out = BTreeSet::new();
    for set in sets {
        out.extend(set?.iter().copied());
    }
    Some(out)
}

/// Per-discard merge of 14-tile results for one hand. `parts[0]` is the
/// standard form and supplies the ankan map.
pub(crate) fn merge_with_got(
    parts: &[&ShantenWithGot],
    hand: &Hand,
) -> Result<ShantenWithGot, ShantenError> {
    let shanten = parts.iter().map(|s| s.shanten).min().unwrap_or(i8::MAX);
    let Some(regular) = parts.first() else {
        return Ok(ShantenWithGot {
            shanten,
            discard_to_advance: None,
            ankan_to_advance: None,
        });
    };

    let discard_to_advance = match &regular.discard_to_advance {
        Some(discards) => {
            let mut merged = BTreeMap::new();
            for &tile in discards.keys() {
                let entries: Vec<_> = parts
                    .iter()
                    .filter_map(|p| p.discard_to_advance.as_ref()?.get(&tile))
                    .collect();
                let visible = hand.discard(tile)?.visible_counts();
                merged.insert(tile, merge_without_got(&entries, &visible));
            }
            Some(merged)
        }
        None => None,
    };

    Ok(ShantenWithGot {
        shanten,
        discard_to_advance,
        ankan_to_advance: regular.ankan_to_advance.clone(),
    })
}

/// Union payload of per-topology payloads of the same kind.
pub(crate) fn merge(parts: &[&Shanten], hand: &Hand) -> Result<Shanten, ShantenError> {
    if hand.with_got() {
        let got: Vec<_> = parts
            .iter()
            .filter_map(|s| match s {
                Shanten::WithGot(g) => Some(g),
                _ => None,
            })
            .collect();
        Ok(Shanten::WithGot(merge_with_got(&got, hand)?))
    } else {
        let without: Vec<_> = parts
            .iter()
            .filter_map(|s| match s {
                Shanten::WithoutGot(w) => Some(w),
                _ => None,
            })
            .collect();
        Ok(Shanten::WithoutGot(merge_without_got(&without, &hand.visible_counts())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{count_tiles, parse_tiles};

    fn tiles(text: &str) -> BTreeSet<Tile> {
        parse_tiles(text).unwrap().into_iter().collect()
    }

    fn part(shanten: i8, advance: &str, good: Option<&str>) -> ShantenWithoutGot {
        ShantenWithoutGot {
            shanten,
            advance: Some(tiles(advance)),
            advance_num: Some(0),
            good_shape_advance: good.map(tiles),
            good_shape_advance_num: good.map(|_| 0),
        }
    }

    #[test]
    fn only_minimal_parts_contribute() {
        let visible = count_tiles(&parse_tiles("1m").unwrap());
        let a = part(1, "1m2m", Some("2m"));
        let b = part(1, "2m3m", None);
        let c = part(2, "7z", None);
        let merged = merge_without_got(&[&a, &b, &c], &visible);
        assert_eq!(merged.shanten, 1);
        assert_eq!(merged.advance, Some(tiles("123m")));
        assert_eq!(merged.advance_num, Some(3 + 4 + 4));
        assert_eq!(merged.good_shape_advance, Some(tiles("2m")));
        assert_eq!(merged.good_shape_advance_num, Some(4));
    }

    #[test]
    fn good_shape_absent_without_provider() {
        let visible = [0; 34];
        let a = part(0, "1m", None);
        let b = part(2, "2m", Some("2m"));
        let merged = merge_without_got(&[&a, &b], &visible);
        assert_eq!(merged.good_shape_advance, None);
        assert_eq!(merged.good_shape_advance_num, None);
    }

    #[test]
    fn shanten_only_parts_stay_shanten_only() {
        let a = ShantenWithoutGot::shanten_only(3);
        let b = ShantenWithoutGot::shanten_only(1);
        let merged = merge_without_got(&[&a, &b], &[0; 34]);
        assert_eq!(merged, ShantenWithoutGot::shanten_only(1));
    }
}
