use crate::tile::{Counts, Suit};
use rustc_hash::FxHashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

/// Reachable decomposition states of a tile group. Bit `p*25 + m*5 + t` is set
/// when the tiles split into `m` melds, `t` partial blocks and `p` heads
/// (m and t capped at 4, p at most 1).
pub(crate) type BlockMask = u64;

const CAP: u32 = 4;

fn bit(m: u32, t: u32, p: u32) -> BlockMask {
    1 << (p * 25 + m.min(CAP) * 5 + t.min(CAP))
}

/// (m, t, p) of every state set in `mask`.
fn states(mut mask: BlockMask) -> impl Iterator<Item = (u32, u32, u32)> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let i = mask.trailing_zeros();
        mask &= mask - 1;
        Some(((i % 25) / 5, i % 5, i / 25))
    })
}

/// Adds a block to every state, dropping states that would hold two heads.
fn shift(mask: BlockMask, dm: u32, dt: u32, dp: u32) -> BlockMask {
    states(mask)
        .filter(|&(_, _, p)| p + dp <= 1)
        .fold(0, |acc, (m, t, p)| acc | bit(m + dm, t + dt, p + dp))
}

/// All states reachable by splitting two independent groups.
fn combine(a: BlockMask, b: BlockMask) -> BlockMask {
    let mut out = 0;
    for (m1, t1, p1) in states(a) {
        for (m2, t2, p2) in states(b) {
            if p1 + p2 <= 1 {
                out |= bit(m1 + m2, t1 + t2, p1 + p2);
            }
        }
    }
    out
}

// Suit shapes recur across every hand, so their states are kept process-wide.
static SUIT_CACHE: LazyLock<RwLock<FxHashMap<u32, BlockMask>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

// 3 bits per kind, so every count a valid hand can hold keeps its own key.
fn suit_key(tiles: &[u8], honor: bool) -> u32 {
    debug_assert!(tiles.iter().all(|&c| c <= 7));
    let packed = tiles.iter().fold(0u32, |acc, &c| (acc << 3) | c as u32);
    (packed << 1) | honor as u32
}

/// Decomposition states of one suit (honors never form runs).
pub(crate) fn suit_blocks(tiles: &[u8], honor: bool) -> BlockMask {
    let key = suit_key(tiles, honor);
    if let Some(&mask) = SUIT_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return mask;
    }

    let mut memo = FxHashMap::default();
    let mut work = tiles.to_vec();
    let mask = search(&mut work, honor, &mut memo);

    tracing::trace!(shapes = memo.len(), "filled suit decomposition cache");
    let mut cache = SUIT_CACHE.write().unwrap_or_else(PoisonError::into_inner);
    cache.extend(memo);
    mask
}

/// Every copy of the lowest remaining tile either starts a block or floats.
fn search(tiles: &mut [u8], honor: bool, memo: &mut FxHashMap<u32, BlockMask>) -> BlockMask {
    let Some(i) = tiles.iter().position(|&c| c > 0) else {
        return bit(0, 0, 0);
    };
    let key = suit_key(tiles, honor);
    if let Some(&mask) = memo.get(&key) {
        return mask;
    }

    let mut mask = 0;
    // 刻子
    if tiles[i] >= 3 {
        mask |= take(tiles, &[i, i, i], (1, 0, 0), honor, memo);
    }
    // 雀頭 / 対子
    if tiles[i] >= 2 {
        mask |= take(tiles, &[i, i], (0, 0, 1), honor, memo);
        mask |= take(tiles, &[i, i], (0, 1, 0), honor, memo);
    }
    if !honor {
        let next = tiles.get(i + 1).copied().unwrap_or(0);
        let next2 = tiles.get(i + 2).copied().unwrap_or(0);
        // 順子
        if next > 0 && next2 > 0 {
            mask |= take(tiles, &[i, i + 1, i + 2], (1, 0, 0), honor, memo);
        }
        // 両面・辺張
        if next > 0 {
            mask |= take(tiles, &[i, i + 1], (0, 1, 0), honor, memo);
        }
        // 嵌張
        if next2 > 0 {
            mask |= take(tiles, &[i, i + 2], (0, 1, 0), honor, memo);
        }
    }
    // 浮き牌
    mask |= take(tiles, &[i], (0, 0, 0), honor, memo);

    memo.insert(key, mask);
    mask
}

/// Removes `used` as one block, searches the rest and puts the tiles back.
fn take(
    tiles: &mut [u8],
    used: &[usize],
    (dm, dt, dp): (u32, u32, u32),
    honor: bool,
    memo: &mut FxHashMap<u32, BlockMask>,
) -> BlockMask {
    for &j in used {
        tiles[j] -= 1;
    }
    let mask = shift(search(tiles, honor, memo), dm, dt, dp);
    for &j in used {
        tiles[j] += 1;
    }
    mask
}

/// Decomposition states of a whole concealed count vector.
pub(crate) fn hand_blocks(counts: &Counts) -> BlockMask {
    Suit::ALL.iter().fold(bit(0, 0, 0), |acc, &suit| {
        let group = &counts[suit.base()..suit.base() + suit.kinds()];
        combine(acc, suit_blocks(group, suit == Suit::Honor))
    })
}

/// Shanten of a decomposition with `m` melds, `t` partial blocks and `p`
/// heads when `need` melds are still to be built in the concealed part.
///
/// Partial blocks beyond the free meld slots are demoted to floating tiles;
/// without a head one of those floats is what grows into the pair.
pub(crate) fn shanten_of(m: u32, t: u32, p: u32, need: u32) -> i8 {
    let free = need - m;
    let used = t.min(free);
    (2 * free) as i8 - used as i8 - p as i8
}

/// Standard-form shanten of the concealed tiles next to `furo_count` calls.
pub(crate) fn regular_shanten_num(counts: &Counts, furo_count: usize) -> i8 {
    let need = 4u32.saturating_sub(furo_count as u32);
    states(hand_blocks(counts))
        .filter(|&(m, _, _)| m <= need)
        .map(|(m, t, p)| shanten_of(m, t, p, need))
        .min()
        .unwrap_or(2 * need as i8)
}
