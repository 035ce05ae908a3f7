//! Property tests for store invariants.

use entity_store::domain::{Product, ProductPatch};
use entity_store::{InMemoryStore, Store, StoreError};
use proptest::prelude::*;

fn arb_product() -> impl Strategy<Value = Product> {
    (
        "[A-Za-z ]{1,12}",
        0i64..1_000,
        "[A-Z]{1,3}-[0-9]{1,4}",
        any::<bool>(),
        0.0f64..10_000.0,
    )
        .prop_map(|(name, quantity, code_value, is_published, price)| Product {
            id: 0,
            name,
            quantity,
            code_value,
            is_published,
            expiration: "01/01/2030".into(),
            price,
        })
}

/// Products with pairwise distinct codes.
fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(arb_product(), 1..20).prop_map(|mut products| {
        for (i, p) in products.iter_mut().enumerate() {
            p.code_value = format!("{}#{}", p.code_value, i);
        }
        products
    })
}

fn arb_patch() -> impl Strategy<Value = ProductPatch> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(ProductPatch::Name),
        (0i64..50).prop_map(ProductPatch::Quantity),
        any::<bool>().prop_map(ProductPatch::IsPublished),
        (0.0f64..100.0).prop_map(ProductPatch::Price),
    ]
}

proptest! {
    #[test]
    fn create_then_get_equals_input_but_id(product in arb_product()) {
        let store = InMemoryStore::<Product>::new();
        let stored = store.create(product.clone()).unwrap();
        let loaded = store.get(stored.id).unwrap();
        prop_assert_eq!(loaded, Product { id: stored.id, ..product });
    }

    #[test]
    fn delete_then_get_is_not_found(catalog in arb_catalog(), pick in any::<prop::sample::Index>()) {
        let store = InMemoryStore::<Product>::new();
        let stored = store.create_many(catalog).unwrap();
        let victim = stored[pick.index(stored.len())].id;

        store.delete(victim).unwrap();

        let is_not_found = matches!(store.get(victim), Err(StoreError::NotFound { .. }));
        prop_assert!(is_not_found);
        for other in stored.iter().filter(|p| p.id != victim) {
            prop_assert_eq!(&store.get(other.id).unwrap(), other);
        }
    }

    #[test]
    fn duplicate_key_leaves_count_unchanged(catalog in arb_catalog(), pick in any::<prop::sample::Index>()) {
        let store = InMemoryStore::<Product>::new();
        let stored = store.create_many(catalog).unwrap();
        let before = store.len().unwrap();

        let mut clash = stored[pick.index(stored.len())].clone();
        clash.id = 0;
        clash.name = "clash".into();

        let is_duplicate = matches!(store.create(clash), Err(StoreError::DuplicateKey { .. }));
        prop_assert!(is_duplicate);
        prop_assert_eq!(store.len().unwrap(), before);
    }

    #[test]
    fn partial_update_only_touches_named_fields(product in arb_product(), patch in arb_patch()) {
        let store = InMemoryStore::<Product>::new();
        let stored = store.create(product).unwrap();

        let patched = store.update_partial(stored.id, vec![patch.clone()]).unwrap();

        let mut expected = stored.clone();
        match patch {
            ProductPatch::Name(v) => expected.name = v,
            ProductPatch::Quantity(v) => expected.quantity = v,
            ProductPatch::IsPublished(v) => expected.is_published = v,
            ProductPatch::Price(v) => expected.price = v,
            ProductPatch::CodeValue(_) | ProductPatch::Expiration(_) => unreachable!(),
        }
        prop_assert_eq!(patched, expected);
    }

    #[test]
    fn aggregate_is_mean_or_not_found_many(catalog in arb_catalog(), threshold in 0.0f64..10_000.0) {
        let store = InMemoryStore::<Product>::new();
        store.create_many(catalog.clone()).unwrap();

        let matching: Vec<f64> = catalog.iter().map(|p| p.price).filter(|&p| p > threshold).collect();
        let result = store.aggregate(&|p| p.price > threshold, &|p| p.price);

        if matching.is_empty() {
            let is_not_found_many = matches!(result, Err(StoreError::NotFoundMany { .. }));
            prop_assert!(is_not_found_many);
        } else {
            let expected = matching.iter().sum::<f64>() / matching.len() as f64;
            let mean = result.unwrap();
            prop_assert!(mean.is_finite());
            prop_assert!((mean - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn ids_are_never_reused(catalog in arb_catalog()) {
        let store = InMemoryStore::<Product>::new();
        let stored = store.create_many(catalog).unwrap();
        let max = stored.iter().map(|p| p.id).max().unwrap();
        for p in &stored {
            store.delete(p.id).unwrap();
        }

        let fresh = store.create(stored[0].clone()).unwrap();
        prop_assert!(fresh.id > max);
    }
}
