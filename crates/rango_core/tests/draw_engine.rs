use rango_core::{
    draw_assignments, expand_units, units_per_family, Family, FoodItem, IdentityShuffler,
    RandomShuffler,
};
use std::collections::HashMap;

fn item(name: &str, quantity: u32) -> FoodItem {
    FoodItem::new(name, quantity).unwrap()
}

fn families(count: usize) -> Vec<Family> {
    (0..count)
        .map(|index| Family::new(&format!("Family {index}"), None).unwrap())
        .collect()
}

fn label_counts<'a>(labels: impl IntoIterator<Item = &'a String>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn unit_pool_size_is_sum_of_quantities() {
    let items = vec![item("Rice", 4), item("Beans", 1), item("Salad", 7)];
    assert_eq!(expand_units(&items).len(), 12);
}

#[test]
fn draws_conserve_units_across_shapes() {
    let shapes: Vec<(Vec<u32>, usize)> = vec![
        (vec![1], 1),
        (vec![1], 6),
        (vec![3, 2], 2),
        (vec![5], 2),
        (vec![2, 2, 2], 4),
        (vec![10, 1], 3),
        (vec![1, 1, 1, 1, 1, 1, 1], 7),
    ];

    for (seed, (quantities, family_count)) in shapes.iter().enumerate() {
        let items: Vec<FoodItem> = quantities
            .iter()
            .enumerate()
            .map(|(index, quantity)| item(&format!("Dish {index}"), *quantity))
            .collect();
        let fams = families(*family_count);
        let pool: Vec<String> = expand_units(&items).iter().map(|u| u.label()).collect();
        let cap = units_per_family(pool.len(), fams.len());

        let result = draw_assignments(&items, &fams, &mut RandomShuffler::seeded(seed as u64));

        assert_eq!(result.len(), fams.len());
        assert_eq!(
            label_counts(result.iter().flat_map(|a| a.items.iter())),
            label_counts(pool.iter()),
            "shape {quantities:?} x {family_count} lost or duplicated units"
        );
        assert!(result.iter().all(|a| a.items.len() <= cap));
        if fams.len() > pool.len() {
            let empty = result.iter().filter(|a| a.items.is_empty()).count();
            assert!(empty >= fams.len() - pool.len());
        }
    }
}

#[test]
fn identity_draw_is_reproducible() {
    let items = vec![item("Soda", 2), item("Chips", 3)];
    let fams = families(2);

    let first = draw_assignments(&items, &fams, &mut IdentityShuffler);
    let second = draw_assignments(&items, &fams, &mut IdentityShuffler);

    assert_eq!(first, second);
    assert_eq!(first[0].items, vec!["Soda (1)", "Soda (2)", "Chips (1)"]);
    assert_eq!(first[1].items, vec!["Chips (2)", "Chips (3)"]);
}

#[test]
fn seeded_draws_are_reproducible() {
    let items = vec![item("Soda", 3), item("Chips", 3)];
    let fams = families(3);

    let first = draw_assignments(&items, &fams, &mut RandomShuffler::seeded(99));
    let second = draw_assignments(&items, &fams, &mut RandomShuffler::seeded(99));

    assert_eq!(first, second);
}
