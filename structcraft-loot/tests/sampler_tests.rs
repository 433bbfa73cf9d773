use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use structcraft_loot::{SamplerError, WeightedSampler};

#[test]
fn rejects_zero_weight() {
    let mut sampler = WeightedSampler::new();
    assert_eq!(sampler.add(0, "nothing"), Err(SamplerError::ZeroWeight));
    assert!(sampler.is_empty());
}

#[test]
fn empty_sampler_cannot_draw() {
    let sampler: WeightedSampler<&str> = WeightedSampler::new();
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(sampler.sample(&mut rng), Err(SamplerError::Empty));
}

#[test]
fn total_weight_accumulates() {
    let mut sampler = WeightedSampler::new();
    sampler.add(3, "common").unwrap();
    sampler.add(1, "rare").unwrap();
    assert_eq!(sampler.total_weight(), 4);
    assert_eq!(sampler.len(), 2);
}

#[test]
fn draw_always_returns_an_inserted_payload() {
    let mut sampler = WeightedSampler::new();
    for (weight, name) in [(5u32, "iron"), (3, "gold"), (1, "diamond")] {
        sampler.add(weight, name).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let drawn = *sampler.sample(&mut rng).unwrap();
        assert!(["iron", "gold", "diamond"].contains(&drawn));
    }
}

#[test]
fn single_entry_is_always_drawn() {
    let mut sampler = WeightedSampler::new();
    sampler.add(7, "only").unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        assert_eq!(*sampler.sample(&mut rng).unwrap(), "only");
    }
}

#[test]
fn frequencies_converge_to_weight_ratios() {
    let mut sampler = WeightedSampler::new();
    sampler.add(60, "common").unwrap();
    sampler.add(30, "uncommon").unwrap();
    sampler.add(10, "rare").unwrap();

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let draws = 100_000;
    for _ in 0..draws {
        *counts.entry(sampler.sample(&mut rng).unwrap()).or_default() += 1;
    }

    for (name, weight) in [("common", 60.0), ("uncommon", 30.0), ("rare", 10.0)] {
        let expected = weight / 100.0;
        let observed = f64::from(counts[name]) / f64::from(draws);
        assert!(
            (observed - expected).abs() < 0.01,
            "{name}: observed {observed}, expected {expected}"
        );
    }
}
