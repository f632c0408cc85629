use crate::error::ShantenError;
use crate::evaluate::Topology;
use crate::furo::furo_chance;
use crate::hand::Hand;
use crate::shanten::{Shanten, ShantenResult, ShantenResultType};
use crate::tile::Tile;
use crate::union::merge;
use crate::ShantenOptions;

/// Standard form (four melds and a head).
pub fn regular_shanten(hand: &Hand, opts: &ShantenOptions) -> Result<ShantenResult, ShantenError> {
    hand.validate()?;
    tracing::debug!(%hand, "regular shanten");
    let info = Topology::Regular.evaluate(hand, opts)?;
    Ok(ShantenResult::single(ShantenResultType::Regular, hand.clone(), info))
}

/// 七対子. Rejects hands with calls.
pub fn chitoi_shanten(hand: &Hand, opts: &ShantenOptions) -> Result<ShantenResult, ShantenError> {
    hand.validate()?;
    expect_closed(hand, "chitoi")?;
    tracing::debug!(%hand, "chitoi shanten");
    let info = Topology::Chitoi.evaluate(hand, opts)?;
    Ok(ShantenResult::single(ShantenResultType::Chitoi, hand.clone(), info))
}

/// 国士無双. Rejects hands with calls.
pub fn kokushi_shanten(hand: &Hand, opts: &ShantenOptions) -> Result<ShantenResult, ShantenError> {
    hand.validate()?;
    expect_closed(hand, "kokushi")?;
    tracing::debug!(%hand, "kokushi shanten");
    let info = Topology::Kokushi.evaluate(hand, opts)?;
    Ok(ShantenResult::single(ShantenResultType::Kokushi, hand.clone(), info))
}

/// Best of the three shapes, with every applicable component attached.
///
/// A hand with calls can only be a standard hand, so only `regular` is
/// attached then.
pub fn shanten(hand: &Hand, opts: &ShantenOptions) -> Result<ShantenResult, ShantenError> {
    hand.validate()?;
    tracing::debug!(%hand, "union shanten");

    let (regular, rest) = if hand.furo.is_empty() {
        let (regular, rest) = rayon::join(
            || Topology::Regular.evaluate(hand, opts),
            || -> Result<_, ShantenError> {
                Ok((
                    Topology::Chitoi.evaluate(hand, opts)?,
                    Topology::Kokushi.evaluate(hand, opts)?,
                ))
            },
        );
        (regular?, Some(rest?))
    } else {
        (Topology::Regular.evaluate(hand, opts)?, None)
    };

    let mut parts: Vec<&Shanten> = vec![&regular];
    if let Some((chitoi, kokushi)) = &rest {
        parts.push(chitoi);
        parts.push(kokushi);
    }
    let info = merge(&parts, hand)?;

    let component = |result_type, info| Box::new(ShantenResult::single(result_type, hand.clone(), info));
    let (chitoi, kokushi) = match rest {
        Some((c, k)) => (
            Some(component(ShantenResultType::Chitoi, c)),
            Some(component(ShantenResultType::Kokushi, k)),
        ),
        None => (None, None),
    };
    Ok(ShantenResult {
        result_type: ShantenResultType::Union,
        hand: hand.clone(),
        shanten_info: info,
        regular: Some(component(ShantenResultType::Regular, regular)),
        chitoi,
        kokushi,
    })
}

/// Pass against chi/pon/minkan on a tile discarded by another player.
pub fn furo_chance_shanten(
    hand: &Hand,
    chance: Tile,
    opts: &ShantenOptions,
) -> Result<ShantenResult, ShantenError> {
    hand.validate()?;
    tracing::debug!(%hand, %chance, "furo chance shanten");
    let info = furo_chance(hand, chance, opts)?;
    Ok(ShantenResult::single(
        ShantenResultType::FuroChance,
        hand.clone(),
        Shanten::WithFuroChance(info),
    ))
}

fn expect_closed(hand: &Hand, shape: &str) -> Result<(), ShantenError> {
    if hand.furo.is_empty() {
        Ok(())
    } else {
        Err(ShantenError::InvalidHand(format!(
            "{} needs a hand without calls: {}",
            shape, hand
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Furo;
    use crate::tile::parse_tiles;

    fn hand(text: &str) -> Hand {
        Hand::new(parse_tiles(text).unwrap(), vec![]).unwrap()
    }

    #[test]
    fn union_attaches_all_components() {
        let r = shanten(&hand("1122m3344p5566s7z"), &ShantenOptions::default()).unwrap();
        assert_eq!(r.result_type, ShantenResultType::Union);
        assert_eq!(r.shanten(), 0);
        assert_eq!(r.chitoi.as_ref().unwrap().shanten(), 0);
        assert!(r.regular.as_ref().unwrap().shanten() > 0);
        assert!(r.kokushi.as_ref().unwrap().shanten() > 0);
    }

    #[test]
    fn union_with_calls_is_regular_only() {
        let pon = Furo::pon(Tile::from_code("7z").unwrap());
        let h = Hand::new(parse_tiles("123m456p789s1z").unwrap(), vec![pon]).unwrap();
        let r = shanten(&h, &ShantenOptions::default()).unwrap();
        assert_eq!(r.shanten(), 0);
        assert!(r.regular.is_some());
        assert!(r.chitoi.is_none());
        assert!(r.kokushi.is_none());
        assert_eq!(r.advance(), r.regular.as_ref().unwrap().advance());
    }

    #[test]
    fn special_shapes_reject_calls() {
        let pon = Furo::pon(Tile::from_code("7z").unwrap());
        let h = Hand::new(parse_tiles("123m456p789s1z").unwrap(), vec![pon]).unwrap();
        assert!(matches!(
            chitoi_shanten(&h, &ShantenOptions::default()),
            Err(ShantenError::InvalidHand(_))
        ));
        assert!(kokushi_shanten(&h, &ShantenOptions::default()).is_err());
    }

    #[test]
    fn invalid_hand_is_rejected_before_search() {
        let h = Hand {
            tiles: parse_tiles("123m").unwrap(),
            furo: vec![],
        };
        assert!(matches!(
            regular_shanten(&h, &ShantenOptions::default()),
            Err(ShantenError::InvalidHand(_))
        ));
    }
}
