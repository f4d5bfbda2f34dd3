//! Property tests for the 5-1-1 evaluator.

use laborpace_core::{evaluate, ContractionHistory, ContractionRecord, WarningLevel};
use proptest::prelude::*;

/// Build a valid history from (duration, gap-before) pairs.
fn build_history(shape: &[(u64, u64)]) -> ContractionHistory {
    let mut history = ContractionHistory::new();
    let mut clock = 0u64;
    for (i, &(duration_ms, gap_ms)) in shape.iter().enumerate() {
        let interval_ms = if i == 0 { 0 } else { gap_ms };
        if i > 0 {
            clock += gap_ms;
        }
        let start_ms = clock;
        let end_ms = start_ms + duration_ms;
        history
            .push(ContractionRecord {
                id: end_ms.to_string(),
                start_ms,
                end_ms,
                duration_ms,
                interval_ms,
            })
            .unwrap();
        clock = end_ms;
    }
    history
}

fn shape_strategy(max_len: usize) -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..1_200_000, 0u64..3_600_000), 0..max_len)
}

proptest! {
    #[test]
    fn evaluate_is_idempotent(shape in shape_strategy(12)) {
        let history = build_history(&shape);
        prop_assert_eq!(evaluate(&history), evaluate(&history));
    }

    #[test]
    fn short_histories_are_always_normal(shape in shape_strategy(6)) {
        prop_assume!(shape.len() < 6);
        let history = build_history(&shape);
        let eval = evaluate(&history);
        prop_assert_eq!(eval.level, WarningLevel::Normal);
        prop_assert!(!eval.hospital_alert);
    }

    #[test]
    fn alert_fires_only_at_critical(shape in shape_strategy(12)) {
        let history = build_history(&shape);
        let eval = evaluate(&history);
        prop_assert_eq!(eval.hospital_alert, eval.level == WarningLevel::Critical);
    }

    #[test]
    fn evaluation_ignores_records_before_the_window(
        shape in prop::collection::vec((0u64..1_200_000, 0u64..3_600_000), 6),
        prefix_duration in 0u64..1_200_000,
    ) {
        // Prepend an extra old record; only the trailing six may matter.
        let mut padded = vec![(prefix_duration, 0)];
        padded.extend_from_slice(&shape);
        let base = build_history(&shape);
        let with_prefix = build_history(&padded);
        prop_assert_eq!(evaluate(&base).level, evaluate(&with_prefix).level);
    }
}
