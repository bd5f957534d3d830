//! Random sampler - draws a fixed-size subset of distinct assets
//!
//! Rejection sampling over indices: draw a uniform index, keep it if
//! unseen, repeat until enough distinct picks are collected. The subset is
//! re-normalized so its probabilities sum to 1 on their own.

use std::collections::HashSet;

use rand::Rng;

use crate::aggregator::normalize;
use crate::error::FeedError;
use crate::types::CoinAsset;

/// Draw `k` distinct assets uniformly at random, using the thread RNG.
pub fn sample_distinct(assets: &[CoinAsset], k: usize) -> Result<Vec<CoinAsset>, FeedError> {
    sample_distinct_with(&mut rand::thread_rng(), assets, k)
}

/// Draw `k` distinct assets with a caller-supplied RNG.
///
/// The rejection loop terminates only if the input holds at least `k`
/// elements, so the size guard comes first.
pub fn sample_distinct_with<R: Rng>(
    rng: &mut R,
    assets: &[CoinAsset],
    k: usize,
) -> Result<Vec<CoinAsset>, FeedError> {
    if assets.len() < k {
        return Err(FeedError::NotEnoughAssets {
            have: assets.len(),
            want: k,
        });
    }

    let mut picked = Vec::with_capacity(k);
    let mut seen = HashSet::with_capacity(k);
    while picked.len() < k {
        let index = rng.gen_range(0..assets.len());
        if seen.insert(index) {
            picked.push(assets[index].clone());
        }
    }

    normalize(&mut picked)?;
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::is_normalized;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_assets(n: usize) -> Vec<CoinAsset> {
        (0..n)
            .map(|i| {
                let gain = 1.0 / (i + 1) as f64;
                CoinAsset {
                    icon: format!("https://icons.test/{i}.png"),
                    name: format!("Coin {i}"),
                    pair_symbol: format!("C{i}USDT"),
                    ratio: 1.0 / n as f64,
                    gain,
                    probability: gain,
                }
            })
            .collect()
    }

    #[test]
    fn test_sample_returns_k_distinct_assets() {
        let assets = make_assets(50);
        let sampled = sample_distinct(&assets, 10).unwrap();
        assert_eq!(sampled.len(), 10);

        let mut symbols: Vec<&str> = sampled.iter().map(|a| a.pair_symbol.as_str()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), 10);
    }

    #[test]
    fn test_sample_renormalizes_subset() {
        let assets = make_assets(30);
        let sampled = sample_distinct(&assets, 10).unwrap();
        assert!(is_normalized(&sampled));
    }

    #[test]
    fn test_sample_exact_size_input_returns_everything() {
        let assets = make_assets(10);
        let sampled = sample_distinct(&assets, 10).unwrap();
        assert_eq!(sampled.len(), 10);
    }

    #[test]
    fn test_sample_rejects_undersized_input() {
        let assets = make_assets(9);
        let err = sample_distinct(&assets, 10).unwrap_err();
        assert!(matches!(
            err,
            FeedError::NotEnoughAssets { have: 9, want: 10 }
        ));
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let assets = make_assets(40);
        let a = sample_distinct_with(&mut StdRng::seed_from_u64(7), &assets, 10).unwrap();
        let b = sample_distinct_with(&mut StdRng::seed_from_u64(7), &assets, 10).unwrap();
        assert_eq!(a, b);
    }
}
