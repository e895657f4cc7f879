//! Property tests for the sequence generator over the builtin pool.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use siemulate::engine::event::EventCategory;
use siemulate::engine::pool::EventPool;
use siemulate::engine::sequence::generate;

/// The builtin pool holds 10 benign and 8 attack templates.
const BENIGN_TEMPLATES: usize = 10;
const ATTACK_TEMPLATES: usize = 8;
const POOL_TOTAL: usize = BENIGN_TEMPLATES + ATTACK_TEMPLATES;

proptest! {
    #[test]
    fn prop_length_is_request_capped_by_pool(
        seed in any::<u64>(),
        length in 0usize..=48,
        bias in 0.0f64..=1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = generate(EventPool::builtin(), length, bias, &mut rng);
        prop_assert_eq!(sequence.len(), length.min(POOL_TOTAL));
    }

    #[test]
    fn prop_ids_are_positional_and_unstamped(
        seed in any::<u64>(),
        length in 0usize..=48,
        bias in 0.0f64..=1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = generate(EventPool::builtin(), length, bias, &mut rng);
        for (i, event) in sequence.iter().enumerate() {
            prop_assert_eq!(event.id.clone(), format!("evt_{:03}", i + 1));
            prop_assert!(event.timestamp.is_none());
        }
    }

    #[test]
    fn prop_draws_without_replacement(
        seed in any::<u64>(),
        length in 0usize..=48,
        bias in 0.0f64..=1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = generate(EventPool::builtin(), length, bias, &mut rng);
        let messages: HashSet<&str> = sequence.iter().map(|e| e.message.as_str()).collect();
        prop_assert_eq!(messages.len(), sequence.len());
    }

    #[test]
    fn prop_category_counts_respect_pool_sides(
        seed in any::<u64>(),
        length in 0usize..=48,
        bias in 0.0f64..=1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = generate(EventPool::builtin(), length, bias, &mut rng);

        let benign = sequence
            .iter()
            .filter(|e| e.category == EventCategory::Normal)
            .count();
        let attacks = sequence.len() - benign;

        prop_assert!(benign <= BENIGN_TEMPLATES);
        prop_assert!(attacks <= ATTACK_TEMPLATES);
    }

    #[test]
    fn prop_same_seed_reproduces_the_sequence(
        seed in any::<u64>(),
        length in 0usize..=48,
        bias in 0.0f64..=1.0,
    ) {
        let run = || {
            let mut rng = StdRng::seed_from_u64(seed);
            generate(EventPool::builtin(), length, bias, &mut rng)
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_full_bias_front_loads_benign(
        seed in any::<u64>(),
        length in 0usize..=48,
    ) {
        // With bias 1.0 every coin prefers the benign side; attacks only
        // appear once the ten benign templates are exhausted.
        let mut rng = StdRng::seed_from_u64(seed);
        let sequence = generate(EventPool::builtin(), length, 1.0, &mut rng);

        if let Some(pos) = sequence
            .iter()
            .position(|e| e.category == EventCategory::Attack)
        {
            prop_assert_eq!(pos, BENIGN_TEMPLATES);
            prop_assert!(
                sequence[pos..]
                    .iter()
                    .all(|e| e.category == EventCategory::Attack)
            );
        } else {
            prop_assert!(sequence.len() <= BENIGN_TEMPLATES);
        }
    }
}
