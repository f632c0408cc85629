use crate::decompose::regular_shanten_num;
use crate::tile::{Counts, Tile, TILE_KINDS};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Judges the waits of tenpai shapes sharing one set of calls.
struct WaitJudge {
    furo_counts: Counts,
    furo_count: usize,
    memo: FxHashMap<u128, bool>,
}

impl WaitJudge {
    fn new(counts: &Counts, visible: &Counts, furo_count: usize) -> Self {
        let mut furo_counts = [0; TILE_KINDS];
        for i in 0..TILE_KINDS {
            furo_counts[i] = visible[i] - counts[i];
        }
        WaitJudge {
            furo_counts,
            furo_count,
            memo: FxHashMap::default(),
        }
    }

    /// A tenpai is good shape when some drawable winning tile completes a
    /// 両面 run, i.e. the hand still wins with that run set aside as a meld.
    fn is_good(&mut self, counts: &Counts) -> bool {
        let key = pack(counts);
        if let Some(&good) = self.memo.get(&key) {
            return good;
        }

        let mut work = *counts;
        let mut good = false;
        for w in 0..TILE_KINDS {
            if work[w] + self.furo_counts[w] >= 4 {
                continue;
            }
            work[w] += 1;
            good = ryanmen_runs(w).any(|run| self.wins_around(&mut work, run));
            work[w] -= 1;
            if good {
                break;
            }
        }
        self.memo.insert(key, good);
        good
    }

    fn wins_around(&self, work: &mut Counts, run: [usize; 3]) -> bool {
        if run.iter().any(|&j| work[j] == 0) {
            return false;
        }
        for &j in &run {
            work[j] -= 1;
        }
        let wins = regular_shanten_num(work, self.furo_count + 1) == -1;
        for &j in &run {
            work[j] += 1;
        }
        wins
    }
}

/// Runs `w` completes out of a two-sided partial: as the low end below
/// anything but 89, or as the high end above anything but 12.
fn ryanmen_runs(w: usize) -> impl Iterator<Item = [usize; 3]> {
    let tile = Tile::from_index(w);
    let (suited, num) = (!tile.is_honor(), tile.num());
    let low = (suited && num <= 6).then(|| [w, w + 1, w + 2]);
    let high = (suited && num >= 4).then(|| [w - 2, w - 1, w]);
    low.into_iter().chain(high)
}

// 3 bits per kind
fn pack(counts: &Counts) -> u128 {
    counts
        .iter()
        .fold(0u128, |acc, &c| (acc << 3) | c as u128)
}

/// Good-shape subset of `advance` for a standard-form 13-tile hand.
///
/// At 1-shanten a draw is good when some discard after it leaves a tenpai
/// with a 両面-class wait. At tenpai the whole set is judged by the hand's
/// own wait. Farther hands have no verdict.
pub(crate) fn good_shape_advance(
    counts: &Counts,
    visible: &Counts,
    furo_count: usize,
    shanten: i8,
    advance: &BTreeSet<Tile>,
) -> Option<BTreeSet<Tile>> {
    let mut judge = WaitJudge::new(counts, visible, furo_count);
    match shanten {
        0 => {
            if judge.is_good(counts) {
                Some(advance.clone())
            } else {
                Some(BTreeSet::new())
            }
        }
        1 => {
            let good = advance
                .iter()
                .filter(|t| good_after_draw(counts, t.index(), furo_count, &mut judge))
                .copied()
                .collect::<BTreeSet<_>>();
            tracing::trace!(
                advance = advance.len(),
                good = good.len(),
                tenpai_shapes = judge.memo.len(),
                "classified 1-shanten draws"
            );
            Some(good)
        }
        _ => None,
    }
}

fn good_after_draw(counts: &Counts, drawn: usize, furo_count: usize, judge: &mut WaitJudge) -> bool {
    let mut work = *counts;
    work[drawn] += 1;
    (0..TILE_KINDS).any(|d| {
        if work[d] == 0 {
            return false;
        }
        work[d] -= 1;
        let good = regular_shanten_num(&work, furo_count) == 0 && judge.is_good(&work);
        work[d] += 1;
        good
    })
}
