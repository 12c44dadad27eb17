//! Integration test: drop expansion end to end
//!
//! Covers bundle conservation, generator conservation and weighting, tag
//! merging, reproducibility, and fatal catalog errors.

use dropsim::catalog::{Catalog, ItemDef, ItemId, ItemKind, Tag};
use dropsim::engine::{expand, ExpandConfig, Expander, TagSet, WorkItem};
use dropsim::DropError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn quantity_of(items: &[WorkItem], id: ItemId) -> i64 {
    items.iter().filter(|w| w.item == id).map(|w| w.quantity).sum()
}

/// item 1 = bundle {2x3, 3x1}, item 2 = terminal,
/// item 3 = generator {4:1, 5:1}, items 4 and 5 terminal.
fn starter_catalog() -> Catalog {
    Catalog::from_defs([
        ItemDef::bundle(1, &[(2, 3), (3, 1)]),
        ItemDef::terminal(2),
        ItemDef::generator(3, &[(4, 1), (5, 1)]),
        ItemDef::terminal(4),
        ItemDef::terminal(5),
    ])
    .unwrap()
}

// =========================================================================
// End-to-end scenario
// =========================================================================

#[test]
fn test_bundle_then_generator_scenario() {
    let catalog = starter_catalog();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(&catalog, &[WorkItem::new(1, 10)], &mut rng).unwrap();

    let item2: Vec<_> = result.iter().filter(|w| w.item == 2).collect();
    assert_eq!(item2.len(), 1, "item 2 should be a single merged entry");
    assert_eq!(item2[0].quantity, 30);
    assert!(item2[0].tags.is_empty());

    assert_eq!(quantity_of(&result, 4) + quantity_of(&result, 5), 10);
    assert!(result.iter().all(|w| matches!(w.item, 2 | 4 | 5)));
}

#[test]
fn test_bundle_then_generator_large_quantity_split() {
    let catalog = starter_catalog();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let result = expand(&catalog, &[WorkItem::new(1, 20_000)], &mut rng).unwrap();
    assert_eq!(quantity_of(&result, 2), 60_000);

    let fours = quantity_of(&result, 4);
    let fives = quantity_of(&result, 5);
    assert_eq!(fours + fives, 20_000);
    // Equal weights: each side within 5% of half
    assert!(
        (9_500..=10_500).contains(&fours),
        "expected ~10000 of item 4, got {fours}"
    );
}

// =========================================================================
// Conservation properties
// =========================================================================

#[test]
fn test_bundle_conservation_with_tags() {
    let catalog = Catalog::from_defs([
        ItemDef::bundle(1, &[(2, 4), (3, 7), (2, 1)]),
        ItemDef::terminal(2),
        ItemDef::terminal(3),
    ])
    .unwrap();
    let tags: TagSet = vec![Tag::new("season", "winter")].into();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(&catalog, &[WorkItem::with_tags(1, 6, tags.clone())], &mut rng).unwrap();

    // Repeated content entries for the same target merge
    assert_eq!(result.len(), 2);
    assert_eq!(quantity_of(&result, 2), 6 * (4 + 1));
    assert_eq!(quantity_of(&result, 3), 6 * 7);
    assert!(result.iter().all(|w| w.tags == tags));
}

#[test]
fn test_generator_chi_squared_against_weights() {
    let weights = [(10, 1), (11, 2), (12, 7)];
    let mut defs = vec![ItemDef::generator(1, &weights)];
    defs.extend(weights.iter().map(|&(id, _)| ItemDef::terminal(id)));
    let catalog = Catalog::from_defs(defs).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    let trials = 50_000;
    let result = expand(&catalog, &[WorkItem::new(1, trials)], &mut rng).unwrap();

    let total_weight: i32 = weights.iter().map(|&(_, w)| w).sum();
    let chi_squared: f64 = weights
        .iter()
        .map(|&(id, w)| {
            let expected = trials as f64 * w as f64 / total_weight as f64;
            let observed = quantity_of(&result, id) as f64;
            (observed - expected).powi(2) / expected
        })
        .sum();

    assert_eq!(result.iter().map(|w| w.quantity).sum::<i64>(), trials);
    // 2 degrees of freedom, p = 0.001
    assert!(chi_squared < 13.82, "chi-squared {chi_squared} too large");
}

#[test]
fn test_zero_weight_outcome_never_drops() {
    let catalog = Catalog::from_defs([
        ItemDef::generator(1, &[(2, 1), (3, 0), (4, 1)]),
        ItemDef::terminal(2),
        ItemDef::terminal(3),
        ItemDef::terminal(4),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(77);

    let result = expand(&catalog, &[WorkItem::new(1, 10_000)], &mut rng).unwrap();
    assert_eq!(quantity_of(&result, 3), 0);
    assert_eq!(quantity_of(&result, 2) + quantity_of(&result, 4), 10_000);
}

// =========================================================================
// Tags and merging
// =========================================================================

#[test]
fn test_permuted_tag_sets_merge() {
    let catalog = Catalog::from_defs([ItemDef::terminal(1)]).unwrap();
    let ab: TagSet = vec![Tag::new("a", "1"), Tag::new("b", "2")].into();
    let ba: TagSet = vec![Tag::new("b", "2"), Tag::new("a", "1")].into();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(
        &catalog,
        &[WorkItem::with_tags(1, 2, ab), WorkItem::with_tags(1, 3, ba)],
        &mut rng,
    )
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].quantity, 5);
}

#[test]
fn test_tag_generators_feed_nested_generators() {
    // A generator whose outcome is another generator: tags accumulate
    let catalog = Catalog::from_defs([
        ItemDef::generator(1, &[(2, 1)]).with_tag_generators(&[20]),
        ItemDef::generator(2, &[(3, 1)]).with_tag_generators(&[21]),
        ItemDef::terminal(3),
        ItemDef::tag_generator(20, "origin", &[("crate", 1)]),
        ItemDef::tag_generator(21, "quality", &[("unique", 1)]),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(&catalog, &[WorkItem::new(1, 4)], &mut rng).unwrap();
    let expected: TagSet = vec![Tag::new("quality", "unique"), Tag::new("origin", "crate")].into();
    assert_eq!(result, vec![WorkItem::with_tags(3, 4, expected)]);
}

#[test]
fn test_playtime_generator_and_tag_tool() {
    let mut playtime = ItemDef::generator(1, &[(2, 1)]);
    playtime.kind = ItemKind::PlaytimeGenerator;
    let catalog = Catalog::from_defs([playtime, ItemDef::new(2, ItemKind::TagTool)]).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = expand(&catalog, &[WorkItem::new(1, 3)], &mut rng).unwrap();
    assert_eq!(result, vec![WorkItem::new(2, 3)]);
}

// =========================================================================
// Reproducibility
// =========================================================================

#[test]
fn test_same_seed_same_result() {
    let catalog = Catalog::from_defs([
        ItemDef::generator(1, &[(2, 3), (3, 5)]).with_tag_generators(&[9]),
        ItemDef::terminal(2),
        ItemDef::terminal(3),
        ItemDef::tag_generator(9, "paint", &[("red", 1), ("green", 2), ("blue", 3)]),
    ])
    .unwrap();
    let seeds = [WorkItem::new(1, 2_000)];

    let first = expand(&catalog, &seeds, &mut ChaCha8Rng::seed_from_u64(31)).unwrap();
    let second = expand(&catalog, &seeds, &mut ChaCha8Rng::seed_from_u64(31)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_seed_list_not_modified() {
    let catalog = starter_catalog();
    let seeds = vec![WorkItem::new(1, 2), WorkItem::new(3, 1)];
    let before = seeds.clone();

    expand(&catalog, &seeds, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
    assert_eq!(seeds, before);
}

// =========================================================================
// Fatal errors
// =========================================================================

#[test]
fn test_unknown_kind_aborts_run() {
    let catalog = Catalog::from_defs([
        ItemDef::generator(1, &[(2, 1)]),
        ItemDef::new(2, ItemKind::Unknown("crafting_recipe".to_string())),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let err = expand(&catalog, &[WorkItem::new(1, 1)], &mut rng).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("crafting_recipe"));
}

#[test]
fn test_zero_weight_tag_generator_aborts_run() {
    let catalog = Catalog::from_defs([
        ItemDef::generator(1, &[(2, 1)]).with_tag_generators(&[9]),
        ItemDef::terminal(2),
        ItemDef::tag_generator(9, "paint", &[]),
    ])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(matches!(
        expand(&catalog, &[WorkItem::new(1, 1)], &mut rng),
        Err(DropError::EmptySelection)
    ));
}

#[test]
fn test_self_referencing_generator_hits_round_limit() {
    let catalog = Catalog::from_defs([ItemDef::generator(1, &[(1, 1)])]).unwrap();
    let expander = Expander::with_config(&catalog, ExpandConfig { max_rounds: 50 });
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(matches!(
        expander.expand(&[WorkItem::new(1, 1)], &mut rng),
        Err(DropError::RoundLimitExceeded { rounds: 50 })
    ));
}
