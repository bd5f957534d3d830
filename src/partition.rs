//! Partitioner - splits the asset set into two gain-threshold boxes
//!
//! Box 1 holds low-gain (high-price) assets, Box 2 holds high-gain
//! (low-price) assets plus one bonus slot for a very-high-price asset.
//! Each box is re-normalized independently. No sorting happens anywhere:
//! box order and truncation follow the input order, which in turn follows
//! the price feed's response order.

use crate::aggregator::normalize;
use crate::error::FeedError;
use crate::types::CoinAsset;

/// Box 1 takes assets with `gain * 100` below this threshold.
pub const BOX1_MAX_GAIN_PCT: f64 = 1.1;
/// Box 2 takes assets with `gain * 100` at or above this threshold.
pub const BOX2_MIN_GAIN_PCT: f64 = 80.0;
/// The Box 2 bonus slot takes the last asset with `gain * 100` below this.
pub const BONUS_MAX_GAIN_PCT: f64 = 0.5;
/// Box 1 is truncated to this many assets.
pub const BOX1_CAP: usize = 10;
/// Box 2 is truncated to this many assets before the bonus slot.
pub const BOX2_CAP: usize = 9;

/// Split `assets` into (box 1, box 2) and re-normalize each box.
///
/// The bonus slot keeps only the LAST qualifying asset seen in the full
/// input (overwrite semantics) and is appended after Box 2 is truncated,
/// so Box 2 can end up holding `BOX2_CAP + 1` assets. Both quirks are
/// observable behavior and intentionally kept.
pub fn partition(assets: &[CoinAsset]) -> Result<(Vec<CoinAsset>, Vec<CoinAsset>), FeedError> {
    let mut box1: Vec<CoinAsset> = Vec::new();
    let mut box2: Vec<CoinAsset> = Vec::new();
    let mut bonus: Option<&CoinAsset> = None;

    for asset in assets {
        let gain_pct = asset.gain * 100.0;
        if gain_pct < BOX1_MAX_GAIN_PCT {
            box1.push(asset.clone());
        }
        if gain_pct >= BOX2_MIN_GAIN_PCT {
            box2.push(asset.clone());
        } else if gain_pct < BONUS_MAX_GAIN_PCT {
            bonus = Some(asset);
        }
    }

    box1.truncate(BOX1_CAP);
    box2.truncate(BOX2_CAP);
    if let Some(asset) = bonus {
        box2.push(asset.clone());
    }

    normalize(&mut box1)?;
    normalize(&mut box2)?;
    Ok((box1, box2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::is_normalized;

    fn asset_with_gain(symbol: &str, gain: f64) -> CoinAsset {
        CoinAsset {
            icon: format!("https://icons.test/{}.png", symbol.to_lowercase()),
            name: symbol.to_string(),
            pair_symbol: format!("{symbol}USDT"),
            ratio: 0.1,
            gain,
            probability: gain,
        }
    }

    fn symbols(assets: &[CoinAsset]) -> Vec<&str> {
        assets.iter().map(|a| a.pair_symbol.as_str()).collect()
    }

    #[test]
    fn test_threshold_membership() {
        // gain*100 = 85 -> box 2 only; gain*100 = 0.9 -> box 1 only.
        let assets = vec![asset_with_gain("AAA", 0.85), asset_with_gain("BBB", 0.009)];
        let (box1, box2) = partition(&assets).unwrap();

        assert_eq!(symbols(&box1), vec!["BBBUSDT"]);
        assert_eq!(symbols(&box2), vec!["AAAUSDT"]);
    }

    #[test]
    fn test_bonus_slot_keeps_last_match_only() {
        // Two assets under the bonus threshold; only the later one survives.
        let assets = vec![
            asset_with_gain("AAA", 0.004),
            asset_with_gain("BBB", 0.9),
            asset_with_gain("CCC", 0.003),
        ];
        let (_, box2) = partition(&assets).unwrap();

        assert_eq!(symbols(&box2), vec!["BBBUSDT", "CCCUSDT"]);
    }

    #[test]
    fn test_no_bonus_when_nothing_qualifies() {
        let assets = vec![asset_with_gain("AAA", 0.9), asset_with_gain("BBB", 0.85)];
        let (_, box2) = partition(&assets).unwrap();
        assert_eq!(box2.len(), 2);
    }

    #[test]
    fn test_box1_truncates_to_ten_in_input_order() {
        let assets: Vec<CoinAsset> = (0..15)
            .map(|i| asset_with_gain(&format!("C{i:02}"), 0.005))
            .collect();
        let (box1, _) = partition(&assets).unwrap();

        assert_eq!(box1.len(), BOX1_CAP);
        assert_eq!(box1[0].pair_symbol, "C00USDT");
        assert_eq!(box1[9].pair_symbol, "C09USDT");
    }

    #[test]
    fn test_box2_truncates_before_bonus_append() {
        // 12 qualifying assets plus one bonus candidate: truncation to 9
        // happens first, then the bonus lands on top for a total of 10.
        let mut assets: Vec<CoinAsset> = (0..12)
            .map(|i| asset_with_gain(&format!("H{i:02}"), 0.9))
            .collect();
        assets.push(asset_with_gain("BIG", 0.001));
        let (_, box2) = partition(&assets).unwrap();

        assert_eq!(box2.len(), BOX2_CAP + 1);
        assert_eq!(box2[8].pair_symbol, "H08USDT");
        assert_eq!(box2[9].pair_symbol, "BIGUSDT");
    }

    #[test]
    fn test_boxes_are_independently_renormalized() {
        let assets = vec![
            asset_with_gain("AAA", 0.9),
            asset_with_gain("BBB", 0.85),
            asset_with_gain("CCC", 0.005),
            asset_with_gain("DDD", 0.008),
        ];
        let (box1, box2) = partition(&assets).unwrap();

        assert!(is_normalized(&box1));
        assert!(is_normalized(&box2));
    }

    #[test]
    fn test_partition_is_deterministic() {
        let assets = vec![
            asset_with_gain("AAA", 0.9),
            asset_with_gain("BBB", 0.005),
            asset_with_gain("CCC", 0.003),
            asset_with_gain("DDD", 0.85),
        ];
        let first = partition(&assets).unwrap();
        let second = partition(&assets).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_boxes() {
        let (box1, box2) = partition(&[]).unwrap();
        assert!(box1.is_empty());
        assert!(box2.is_empty());
    }

    #[test]
    fn test_zero_gain_only_box_is_degenerate() {
        // A lone zero-gain asset qualifies for box 1 but cannot be
        // normalized there.
        let assets = vec![asset_with_gain("AAA", 0.0)];
        assert!(matches!(
            partition(&assets),
            Err(FeedError::DegenerateDistribution)
        ));
    }
}
