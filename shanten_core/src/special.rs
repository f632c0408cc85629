use crate::tile::{Counts, YAOCHU_INDICES};

/// 七対子: seven distinct pairs. A quad only counts as one pair, and missing
/// kinds cost an extra step each.
pub fn chitoi_shanten_num(counts: &Counts) -> i8 {
    let pairs = counts.iter().filter(|&&c| c >= 2).count() as i8;
    let kinds = counts.iter().filter(|&&c| c >= 1).count() as i8;
    6 - pairs + (7 - kinds).max(0)
}

/// 国士無双: one of each terminal and honor plus a pair among them.
pub fn kokushi_shanten_num(counts: &Counts) -> i8 {
    let present = YAOCHU_INDICES.iter().filter(|&&i| counts[i] >= 1).count() as i8;
    let has_pair = YAOCHU_INDICES.iter().any(|&i| counts[i] >= 2);
    13 - present - has_pair as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{count_tiles, parse_tiles};

    fn counts(text: &str) -> Counts {
        count_tiles(&parse_tiles(text).unwrap())
    }

    #[test]
    fn chitoi() {
        assert_eq!(chitoi_shanten_num(&counts("1122m3344p5566s77z")), -1);
        assert_eq!(chitoi_shanten_num(&counts("1122m3344p5566s7z")), 0);
        assert_eq!(chitoi_shanten_num(&counts("1122m3344p556s77z")), 0);
        // quad is one pair, and only six kinds exist
        assert_eq!(chitoi_shanten_num(&counts("1111m2233p4455s6z")), 2);
        assert_eq!(chitoi_shanten_num(&counts("13579m13579p135s")), 6);
    }

    #[test]
    fn kokushi() {
        assert_eq!(kokushi_shanten_num(&counts("19m19p19s12345677z")), -1);
        assert_eq!(kokushi_shanten_num(&counts("19m19p19s1234567z")), 0);
        assert_eq!(kokushi_shanten_num(&counts("19m19p19s1234566z")), 0);
        assert_eq!(kokushi_shanten_num(&counts("2345678m2345678p")), 13);
    }
}
