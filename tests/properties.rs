//! Property tests for the tree builder's structural guarantees.
use canopy::prelude::*;
use proptest::prelude::*;

fn structure_value() -> impl Strategy<Value = StructureValue> {
    let leaf = prop_oneof![
        Just(StructureValue::Null),
        any::<bool>().prop_map(StructureValue::Boolean),
        (-1.0e6..1.0e6f64).prop_map(StructureValue::Number),
        "[a-z]{0,6}".prop_map(StructureValue::String),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(StructureValue::Array),
            prop::collection::hash_map("[a-zA-Z0-9_/~]{1,4}", inner, 0..5)
                .prop_map(|m| StructureValue::Map(m.into_iter().collect())),
        ]
    })
}

fn structure_map() -> impl Strategy<Value = StructureMap> {
    prop::collection::hash_map("[a-zA-Z0-9_/~]{1,4}", structure_value(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn root_node_count_matches_key_count(structure in structure_map()) {
        let tree = build(&structure);
        prop_assert_eq!(tree.nodes.len(), structure.len());
    }

    #[test]
    fn leaves_are_exactly_the_non_container_nodes(structure in structure_map()) {
        let tree = build(&structure);
        let leaf_nodes: Vec<_> = tree.walk().filter(|n| !n.is_container).collect();

        prop_assert_eq!(leaf_nodes.len(), tree.leaf_count());
        for node in leaf_nodes {
            let expected = FieldOption::from(node);
            prop_assert_eq!(tree.resolve(&node.key), Some(&expected));
        }
        for node in tree.walk().filter(|n| n.is_container) {
            prop_assert!(!tree.leaves.contains_key(&node.key));
        }
    }

    #[test]
    fn every_node_key_is_unique(structure in structure_map()) {
        let tree = build(&structure);
        let mut seen = std::collections::HashSet::new();
        for node in tree.walk() {
            prop_assert!(seen.insert(node.key.clone()), "duplicate key {}", node.key);
        }
    }

    #[test]
    fn build_is_deterministic(structure in structure_map()) {
        let first = build(&structure);
        // A rebuilt map has a different hash state and iteration order.
        let reinserted: StructureMap = structure.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let second = build(&reinserted);

        prop_assert_eq!(&first.nodes, &second.nodes);
        prop_assert!(first.leaves.keys().eq(second.leaves.keys()));
    }

    #[test]
    fn sibling_map_keys_are_ordinal_sorted(structure in structure_map()) {
        let tree = build(&structure);
        let roots: Vec<_> = tree.nodes.iter().map(|n| n.label.clone()).collect();
        let mut sorted = roots.clone();
        sorted.sort();
        prop_assert_eq!(roots, sorted);
    }

    #[test]
    fn append_always_uses_sibling_count(len in 0usize..20) {
        let mut list: OrderedList<usize> = (0..len).collect();
        prop_assert_eq!(list.append(len).order, Some(len as i64));
    }
}
