use rand::{rngs::StdRng, Rng, SeedableRng};
use sponsored_ranking_service::{
    elite_first_stable_sort, rank, RankableItem, RotationSeed, SortKey, Tier,
};
use std::collections::HashSet;

const TIER_NAMES: [Option<&str>; 6] = [
    Some("basic"),
    Some("premium"),
    Some("elite"),
    Some("Elite"),
    Some("gold"),
    None,
];

/// Random candidate lists; ids are `i{input index}` so input order can be recovered.
fn random_lists(count: usize) -> Vec<Vec<RankableItem<i64>>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..25);
            (0..len)
                .map(|i| {
                    let tier = Tier::from_name(TIER_NAMES[rng.gen_range(0..TIER_NAMES.len())]);
                    // narrow key range forces ties
                    RankableItem::new(format!("i{}", i), tier, rng.gen_range(0..6))
                })
                .collect()
        })
        .collect()
}

fn input_index(item: &RankableItem<i64>) -> usize {
    item.id[1..].parse().unwrap()
}

fn ids<K>(items: &[RankableItem<K>]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

#[test]
fn test_rank_is_a_permutation() {
    for items in random_lists(200) {
        for seed in [0, 1, 5, 1_000_003] {
            let ranked = rank(&items, RotationSeed::new(seed));
            assert_eq!(ranked.len(), items.len());

            let mut before = ids(&items);
            let mut after = ids(&ranked);
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }
}

#[test]
fn test_tiers_never_increase_down_the_list() {
    for items in random_lists(200) {
        let ranked = rank(&items, RotationSeed::new(3));
        for pair in ranked.windows(2) {
            assert!(pair[0].tier >= pair[1].tier, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_within_tier_order_is_preserved_except_lead() {
    for items in random_lists(200) {
        for seed in 0..4 {
            let ranked = rank(&items, RotationSeed::new(seed));
            let rest = ranked.iter().skip(1).collect::<Vec<_>>();

            for (i, a) in rest.iter().enumerate() {
                for b in rest.iter().skip(i + 1) {
                    if a.tier == b.tier {
                        assert!(
                            (a.sort_key, input_index(a)) < (b.sort_key, input_index(b)),
                            "{:?} should follow {:?}",
                            a,
                            b
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_elite_first_preserves_all_within_tier_order() {
    for items in random_lists(200) {
        let sorted = elite_first_stable_sort(&items);
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.tier >= b.tier);
            if a.tier == b.tier {
                assert!((a.sort_key, input_index(a)) < (b.sort_key, input_index(b)));
            }
        }
    }
}

#[test]
fn test_rank_is_deterministic() {
    for items in random_lists(100) {
        let seed = RotationSeed::new(17);
        assert_eq!(rank(&items, seed), rank(&items, seed));
    }
}

#[test]
fn test_every_elite_item_leads_within_n_consecutive_days() {
    let items: Vec<RankableItem> = vec![
        RankableItem::new("brunch", Tier::Basic, SortKey::from("11:00")),
        RankableItem::new("trivia", Tier::Elite, SortKey::from("19:00")),
        RankableItem::new("salsa", Tier::Premium, SortKey::from("20:00")),
        RankableItem::new("karaoke", Tier::Elite, SortKey::from("21:00")),
        RankableItem::new("comedy", Tier::Elite, SortKey::from("20:30")),
        RankableItem::new("dj-set", Tier::Elite, SortKey::from("23:00")),
    ];

    let first_day = chrono::NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
    let leads: HashSet<String> = (0..4)
        .map(|day| {
            let seed = RotationSeed::for_date(first_day + chrono::Days::new(day));
            rank(&items, seed)[0].id.clone()
        })
        .collect();

    let expected: HashSet<String> = ["trivia", "karaoke", "comedy", "dj-set"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(leads, expected);
}

#[test]
fn test_unknown_tier_matches_explicit_basic() {
    let with_unknown = vec![
        RankableItem::new("a", Tier::from_name(Some("platinum")), 10),
        RankableItem::new("b", Tier::Premium, 5),
        RankableItem::new("c", Tier::from_name(None), 1),
    ];
    let with_basic = vec![
        RankableItem::new("a", Tier::Basic, 10),
        RankableItem::new("b", Tier::Premium, 5),
        RankableItem::new("c", Tier::Basic, 1),
    ];

    for seed in 0..3 {
        let seed = RotationSeed::new(seed);
        assert_eq!(rank(&with_unknown, seed), rank(&with_basic, seed));
    }
    assert_eq!(ids(&rank(&with_basic, RotationSeed::new(0))), vec!["b", "c", "a"]);
}

#[test]
fn test_rotated_examples() {
    let items: Vec<RankableItem> = vec![
        RankableItem::new("a", Tier::Basic, SortKey::from("10:00")),
        RankableItem::new("b", Tier::Elite, SortKey::from("09:00")),
        RankableItem::new("c", Tier::Elite, SortKey::from("08:00")),
    ];

    let outputs: HashSet<Vec<String>> = (0..2)
        .map(|seed| ids(&rank(&items, RotationSeed::new(seed))))
        .collect();

    let expected: HashSet<Vec<String>> = [vec!["c", "b", "a"], vec!["b", "c", "a"]]
        .iter()
        .map(|v| v.iter().map(|s| s.to_string()).collect())
        .collect();
    assert_eq!(outputs, expected);

    let mixed = vec![
        RankableItem::new("x", Tier::Premium, 1),
        RankableItem::new("y", Tier::Elite, 2),
        RankableItem::new("z", Tier::Basic, 0),
    ];
    assert_eq!(ids(&elite_first_stable_sort(&mixed)), vec!["y", "x", "z"]);
}
