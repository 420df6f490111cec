//! Per-category manipulation counts
//!
//! The one derived structure this service computes itself: a single pass
//! over the validated tactic list producing, for every distinct non-empty
//! category, how many of its tactics were classified Blatant Manipulation
//! and how many Borderline Manipulation. A pure function of the tactic
//! list; it never fails.

use crate::models::{Intent, ManipulationCategory, Tactic};
use std::collections::BTreeMap;

/// Derive the category breakdown from a validated tactic list.
///
/// Every tactic with a non-empty category touches its category's entry, so
/// a category whose tactics are all Legitimate Use still appears, with both
/// counters at zero. Only the two manipulation intents increment anything.
/// Tactics with an empty category create no entry. The BTreeMap makes the
/// emitted order stable (alphabetical), but callers must not treat order as
/// part of the contract.
pub fn aggregate_by_category(tactics: &[Tactic]) -> Vec<ManipulationCategory> {
    let mut counts: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for tactic in tactics {
        if tactic.category.is_empty() {
            continue;
        }
        let entry = counts.entry(tactic.category.as_str()).or_insert((0, 0));
        match tactic.intent {
            Intent::BlatantManipulation => entry.0 += 1,
            Intent::BorderlineManipulation => entry.1 += 1,
            Intent::LegitimateUse => {}
        }
    }

    counts
        .into_iter()
        .map(|(name, (blatant, borderline))| ManipulationCategory {
            name: name.to_string(),
            blatant,
            borderline,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn tactic(id: i64, category: &str, intent: Intent) -> Tactic {
        Tactic {
            id,
            name: format!("Tactic {id}"),
            category: category.to_string(),
            intent,
            quote: "quote".to_string(),
            explanation: "explanation".to_string(),
            resistance_strategy: "strategy".to_string(),
            sources: None,
        }
    }

    fn as_set(categories: Vec<ManipulationCategory>) -> BTreeSet<(String, u32, u32)> {
        categories
            .into_iter()
            .map(|c| (c.name, c.blatant, c.borderline))
            .collect()
    }

    #[test]
    fn test_empty_tactic_list_yields_empty_breakdown() {
        assert!(aggregate_by_category(&[]).is_empty());
    }

    #[test]
    fn test_mixed_intents_counted_exactly() {
        let tactics = vec![
            tactic(1, "A", Intent::BlatantManipulation),
            tactic(2, "A", Intent::BorderlineManipulation),
            tactic(3, "A", Intent::LegitimateUse),
            tactic(4, "B", Intent::BlatantManipulation),
        ];
        let expected: BTreeSet<(String, u32, u32)> =
            [("A".to_string(), 1, 1), ("B".to_string(), 1, 0)]
                .into_iter()
                .collect();
        assert_eq!(as_set(aggregate_by_category(&tactics)), expected);
    }

    #[test]
    fn test_legitimate_only_category_appears_with_zero_counts() {
        let tactics = vec![
            tactic(1, "Source Credibility", Intent::LegitimateUse),
            tactic(2, "Source Credibility", Intent::LegitimateUse),
        ];
        let breakdown = aggregate_by_category(&tactics);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].name, "Source Credibility");
        assert_eq!(breakdown[0].blatant, 0);
        assert_eq!(breakdown[0].borderline, 0);
    }

    #[test]
    fn test_legitimate_use_never_increments_counters() {
        let tactics = vec![
            tactic(1, "C", Intent::BlatantManipulation),
            tactic(2, "C", Intent::LegitimateUse),
            tactic(3, "C", Intent::LegitimateUse),
            tactic(4, "C", Intent::LegitimateUse),
        ];
        let breakdown = aggregate_by_category(&tactics);
        assert_eq!(breakdown[0].blatant, 1);
        assert_eq!(breakdown[0].borderline, 0);
    }

    #[test]
    fn test_empty_category_creates_no_entry() {
        let tactics = vec![
            tactic(1, "", Intent::BlatantManipulation),
            tactic(2, "", Intent::LegitimateUse),
        ];
        assert!(aggregate_by_category(&tactics).is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let tactics = vec![
            tactic(1, "A", Intent::BorderlineManipulation),
            tactic(2, "B", Intent::LegitimateUse),
            tactic(3, "A", Intent::BlatantManipulation),
            tactic(4, "C", Intent::BlatantManipulation),
        ];
        let first = as_set(aggregate_by_category(&tactics));
        let second = as_set(aggregate_by_category(&tactics));
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_order_does_not_change_result() {
        let forward = vec![
            tactic(1, "A", Intent::BlatantManipulation),
            tactic(2, "B", Intent::BorderlineManipulation),
            tactic(3, "A", Intent::BorderlineManipulation),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            as_set(aggregate_by_category(&forward)),
            as_set(aggregate_by_category(&reversed))
        );
    }
}
