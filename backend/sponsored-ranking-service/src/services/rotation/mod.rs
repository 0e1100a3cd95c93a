/// Rotation Module
///
/// Orders sponsored content (events, entertainment, specials) by the
/// subscription tier of the owning business.
///
/// # Strategies
/// - **Fair rotation**: tier descending, sort key ascending, and the lead slot
///   rotates among the items of the highest paid tier present.
/// - **Elite first**: plain stable tier ordering, no rotation.
///
/// Both are pure: the input slice is never mutated and the output is always a
/// permutation of it.
pub mod seed;

pub use seed::{RotationSeed, DEFAULT_EPOCH_SECS};

use crate::error::RankingServiceError;
use crate::models::{RankableItem, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Ranking policy applied to a candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    #[default]
    FairRotation,
    EliteFirst,
}

impl RankingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingStrategy::FairRotation => "fair_rotation",
            RankingStrategy::EliteFirst => "elite_first",
        }
    }

    pub fn apply<K: Ord + Clone>(
        &self,
        items: &[RankableItem<K>],
        seed: RotationSeed,
    ) -> Vec<RankableItem<K>> {
        match self {
            RankingStrategy::FairRotation => rank(items, seed),
            RankingStrategy::EliteFirst => elite_first_stable_sort(items),
        }
    }
}

impl FromStr for RankingStrategy {
    type Err = RankingServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fair_rotation" => Ok(RankingStrategy::FairRotation),
            "elite_first" => Ok(RankingStrategy::EliteFirst),
            other => Err(RankingServiceError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fair rotation over [`RankableItem`]s.
pub fn rank<K: Ord + Clone>(items: &[RankableItem<K>], seed: RotationSeed) -> Vec<RankableItem<K>> {
    let ranked = fair_rotate_by(items, seed, |item| item.tier, |item| &item.sort_key);

    debug!(
        items = items.len(),
        seed = seed.value(),
        lead = ranked.first().map(|item| item.id.as_str()),
        "fair rotation applied"
    );

    ranked
}

/// Elite, then premium, then basic; sort key ascending inside each tier.
pub fn elite_first_stable_sort<K: Ord + Clone>(items: &[RankableItem<K>]) -> Vec<RankableItem<K>> {
    elite_first_stable_sort_by(items, |item| item.tier, |item| &item.sort_key)
}

/// Stable tier ordering for any record shape.
///
/// `tier_of` and `key_of` decouple the ordering from the layout of upstream
/// records. Items with equal tier and key keep their input order.
pub fn elite_first_stable_sort_by<T, K, FT, FK>(items: &[T], tier_of: FT, key_of: FK) -> Vec<T>
where
    T: Clone,
    K: Ord + ?Sized,
    FT: Fn(&T) -> Tier,
    FK: Fn(&T) -> &K,
{
    let mut ordered = items.to_vec();
    // slice::sort_by is stable
    ordered.sort_by(|a, b| {
        tier_of(b)
            .cmp(&tier_of(a))
            .then_with(|| key_of(a).cmp(key_of(b)))
    });
    ordered
}

/// Fair rotation for any record shape.
///
/// After the stable tier ordering, the member of the highest paid tier group
/// selected by `seed` is moved to the lead slot. The rest of that group keeps
/// sort key order. When only basic items are present the result is the
/// stable ordering unchanged.
pub fn fair_rotate_by<T, K, FT, FK>(
    items: &[T],
    seed: RotationSeed,
    tier_of: FT,
    key_of: FK,
) -> Vec<T>
where
    T: Clone,
    K: Ord + ?Sized,
    FT: Fn(&T) -> Tier,
    FK: Fn(&T) -> &K,
{
    let mut ordered = elite_first_stable_sort_by(items, &tier_of, &key_of);

    let top = match ordered.first().map(&tier_of) {
        Some(tier) if tier.is_paid() => tier,
        _ => return ordered,
    };

    let group_len = ordered.iter().take_while(|&item| tier_of(item) == top).count();
    let lead = seed.lead_index(group_len);
    if lead > 0 {
        ordered[..=lead].rotate_right(1);
    }

    ordered
}

/// Stateless reranker holding the default strategy for a deployment.
pub struct RotationLayer {
    strategy: RankingStrategy,
}

impl Default for RotationLayer {
    fn default() -> Self {
        Self::new(RankingStrategy::default())
    }
}

impl RotationLayer {
    pub fn new(strategy: RankingStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> RankingStrategy {
        self.strategy
    }

    /// Rerank with an optional per-call strategy override.
    pub fn rerank<K: Ord + Clone>(
        &self,
        items: &[RankableItem<K>],
        seed: RotationSeed,
        strategy: Option<RankingStrategy>,
    ) -> Vec<RankableItem<K>> {
        strategy.unwrap_or(self.strategy).apply(items, seed)
    }
}
