//! Sequence generation: biased interleave of benign and attack events.
//!
//! Both pool sides are shuffled, then slots are filled by a biased coin
//! (default 60% benign) that consumes each side without replacement and
//! falls back to the other side once one is exhausted. The slot count is
//! the hard contract; the benign/attack ratio is advisory.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::event::SecurityEvent;
use crate::engine::pool::EventPool;

/// Generate a delivery sequence of up to `length` events.
///
/// Events are drawn without replacement from shuffled copies of the pool.
/// Per slot a uniform draw below `benign_bias` prefers the benign side,
/// otherwise the attack side; an exhausted side falls back to the other.
/// When both sides run dry the sequence ends early, shorter than `length`.
///
/// Slot ids are assigned in order as `evt_001`, `evt_002`, ..; delivery
/// timestamps stay unset until the scheduler releases each event.
#[must_use]
pub fn generate(
    pool: &EventPool,
    length: usize,
    benign_bias: f64,
    rng: &mut impl Rng,
) -> Vec<SecurityEvent> {
    let mut benign = pool.benign.clone();
    let mut suspicious = pool.suspicious.clone();
    benign.shuffle(rng);
    suspicious.shuffle(rng);

    let mut benign = benign.into_iter();
    let mut suspicious = suspicious.into_iter();
    let mut sequence = Vec::with_capacity(length);

    for slot in 0..length {
        // The coin is drawn every slot, even when the preferred side is
        // already empty, so the draw count depends only on the slot index.
        let prefer_benign = rng.random::<f64>() < benign_bias;
        let next = if prefer_benign {
            benign.next().or_else(|| suspicious.next())
        } else {
            suspicious.next().or_else(|| benign.next())
        };

        let Some(mut event) = next else { break };
        event.id = format!("evt_{:03}", slot + 1);
        sequence.push(event);
    }

    sequence
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::event::{EventCategory, Severity};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn tiny_pool(benign: usize, suspicious: usize) -> EventPool {
        let benign = (0..benign)
            .map(|i| {
                SecurityEvent::template(
                    &format!("norm_{i:03}"),
                    EventCategory::Normal,
                    Severity::Info,
                    &format!("benign {i}"),
                    "test",
                )
            })
            .collect();
        let suspicious = (0..suspicious)
            .map(|i| {
                SecurityEvent::template(
                    &format!("susp_{i:03}"),
                    EventCategory::Attack,
                    Severity::Critical,
                    &format!("attack {i}"),
                    "test",
                )
            })
            .collect();
        EventPool::new(benign, suspicious)
    }

    #[test]
    fn test_full_length_with_positional_ids() {
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = generate(EventPool::builtin(), 16, 0.6, &mut rng);

        assert_eq!(sequence.len(), 16);
        for (i, event) in sequence.iter().enumerate() {
            assert_eq!(event.id, format!("evt_{:03}", i + 1));
            assert!(event.timestamp.is_none());
        }
    }

    #[test]
    fn test_draws_without_replacement() {
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = generate(EventPool::builtin(), 16, 0.6, &mut rng);

        let messages: HashSet<&str> = sequence.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages.len(), sequence.len());
    }

    #[test]
    fn test_seed_determinism() {
        let a = generate(EventPool::builtin(), 16, 0.6, &mut StdRng::seed_from_u64(9));
        let b = generate(EventPool::builtin(), 16, 0.6, &mut StdRng::seed_from_u64(9));
        let c = generate(EventPool::builtin(), 16, 0.6, &mut StdRng::seed_from_u64(10));

        let ids = |s: &[SecurityEvent]| -> Vec<String> {
            s.iter().map(|e| e.message.clone()).collect()
        };
        assert_eq!(ids(&a), ids(&b));
        assert_ne!(ids(&a), ids(&c));
    }

    #[test]
    fn test_both_categories_present() {
        let mut rng = StdRng::seed_from_u64(42);
        let sequence = generate(EventPool::builtin(), 16, 0.6, &mut rng);

        assert!(
            sequence
                .iter()
                .any(|e| e.category == EventCategory::Normal)
        );
        assert!(
            sequence
                .iter()
                .any(|e| e.category == EventCategory::Attack)
        );
    }

    #[test]
    fn test_double_exhaustion_stops_early() {
        let pool = tiny_pool(2, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let sequence = generate(&pool, 16, 0.6, &mut rng);

        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence[0].id, "evt_001");
        assert_eq!(sequence[2].id, "evt_003");
    }

    #[test]
    fn test_empty_pool_yields_empty_sequence() {
        let pool = tiny_pool(0, 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(&pool, 16, 0.6, &mut rng).is_empty());
    }

    #[test]
    fn test_bias_one_front_loads_benign() {
        let mut rng = StdRng::seed_from_u64(3);
        let sequence = generate(EventPool::builtin(), 16, 1.0, &mut rng);

        for event in &sequence[..10] {
            assert_eq!(event.category, EventCategory::Normal);
        }
        for event in &sequence[10..] {
            assert_eq!(event.category, EventCategory::Attack);
        }
    }

    #[test]
    fn test_bias_zero_front_loads_attacks() {
        let mut rng = StdRng::seed_from_u64(3);
        let sequence = generate(EventPool::builtin(), 16, 0.0, &mut rng);

        for event in &sequence[..8] {
            assert_eq!(event.category, EventCategory::Attack);
        }
        for event in &sequence[8..] {
            assert_eq!(event.category, EventCategory::Normal);
        }
    }
}
