// ============================================
// Lead Exposure Audit
// ============================================
//
// Answers "over the next N renders, how often does each item take the
// lead slot?" for a candidate list and a ranking strategy.
//
// Paying businesses ask why their event was not first on a given day; the
// audit replays the rotation over a seed window instead of reading
// impression logs.
//
// Fairness:
//   max(lead_count) - min(lead_count) <= 1 across the top paid tier group

use crate::models::{RankableItem, Tier};
use crate::services::rotation::{RankingStrategy, RotationSeed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Lead slot tally over a window of consecutive rotation seeds.
///
/// Fairness is judged per input position, so two listings that share an id
/// are still counted as separate contenders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureReport {
    pub start_seed: RotationSeed,
    pub renders: u64,
    pub strategy: RankingStrategy,
    /// Highest paid tier present, if any
    pub top_tier: Option<Tier>,
    /// Lead count per item id; ids that never lead report 0, duplicate ids merge
    pub lead_counts: BTreeMap<String, u64>,
    /// Lead count per input position
    pub position_leads: Vec<u64>,
    /// Input positions competing for the lead slot
    pub contenders: Vec<usize>,
    pub fair: bool,
}

impl ExposureReport {
    pub fn lead_count(&self, id: &str) -> u64 {
        self.lead_counts.get(id).copied().unwrap_or(0)
    }

    /// True when every contender led within one render of every other.
    pub fn is_fair(&self) -> bool {
        let counts = self
            .contenders
            .iter()
            .map(|&pos| self.position_leads.get(pos).copied().unwrap_or(0));
        match (counts.clone().min(), counts.max()) {
            (Some(min), Some(max)) => max - min <= 1,
            _ => true,
        }
    }
}

/// Replay `strategy` over `renders` consecutive seeds starting at `start_seed`.
pub fn lead_exposure<K: Ord + Clone>(
    items: &[RankableItem<K>],
    start_seed: RotationSeed,
    renders: u64,
    strategy: RankingStrategy,
) -> ExposureReport {
    // Input position rides along as a secondary key. Ties on the sort key
    // already resolve in input order, so the ranking is unchanged.
    let positioned: Vec<RankableItem<(K, usize)>> = items
        .iter()
        .enumerate()
        .map(|(pos, item)| {
            RankableItem::new(item.id.clone(), item.tier, (item.sort_key.clone(), pos))
        })
        .collect();

    let top_tier = items
        .iter()
        .map(|item| item.tier)
        .filter(Tier::is_paid)
        .max();

    let contenders: Vec<usize> = match top_tier {
        Some(top) => (0..items.len()).filter(|&pos| items[pos].tier == top).collect(),
        None => Vec::new(),
    };

    let mut lead_counts: BTreeMap<String, u64> =
        items.iter().map(|item| (item.id.clone(), 0)).collect();
    let mut position_leads = vec![0u64; items.len()];

    for step in 0..renders {
        let ranked = strategy.apply(&positioned, start_seed.advance(step));
        if let Some(lead) = ranked.first() {
            position_leads[lead.sort_key.1] += 1;
            *lead_counts.entry(lead.id.clone()).or_insert(0) += 1;
        }
    }

    let mut report = ExposureReport {
        start_seed,
        renders,
        strategy,
        top_tier,
        lead_counts,
        position_leads,
        contenders,
        fair: true,
    };
    report.fair = report.is_fair();

    debug!(
        items = items.len(),
        renders,
        strategy = %strategy,
        fair = report.fair,
        "lead exposure computed"
    );

    report
}
