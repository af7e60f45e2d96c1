//! Tests for field tree construction, leaf indexing and selection.
mod common;
use canopy::prelude::*;
use canopy::tree::key_for_path;
use common::*;
use serde_json::json;

fn keys(nodes: &[FieldNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.key.as_str()).collect()
}

#[test]
fn test_root_nodes_match_root_keys() {
    let tree = build_from_json(&customer_structure());
    assert_eq!(tree.nodes.len(), 7);

    // 4 scalar roots, city/zip, sku/price for two items
    assert_eq!(tree.leaf_count(), 4 + 2 + 4);
    for leaf in &tree.leaves {
        let node = tree.find_node(&leaf.key).expect("every leaf is a node");
        assert!(node.is_leaf());
    }
}

#[test]
fn test_map_keys_are_sorted() {
    let tree = build_from_json(&json!({"b": 1, "a": 2}));
    assert_eq!(keys(&tree.nodes), ["a", "b"]);
}

#[test]
fn test_sorting_is_ordinal_not_locale_aware() {
    let tree = build_from_json(&json!({"b": 1, "B": 2, "a": 3, "_x": 4, "10": 5, "9": 6}));
    assert_eq!(keys(&tree.nodes), ["10", "9", "B", "_x", "a", "b"]);
}

#[test]
fn test_array_members_are_indexed() {
    let tree = build_from_json(&json!({"items": [10, 20]}));
    let items = &tree.nodes[0];

    assert_eq!(items.field_type, FieldType::Array);
    assert!(items.is_container);
    assert!(!items.selectable);
    assert_eq!(keys(items.children()), ["items/0", "items/1"]);

    let labels: Vec<_> = items.children().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, ["[0]", "[1]"]);
    for child in items.children() {
        assert_eq!(child.field_type, FieldType::Number);
        assert!(child.selectable);
        assert!(tree.leaves.contains_key(&child.key));
    }
}

#[test]
fn test_array_order_follows_index_not_string_order() {
    let values: Vec<_> = (0..12).collect();
    let tree = build_from_json(&json!({ "list": values }));
    let children = tree.nodes[0].children();
    assert_eq!(children[2].key, "list/2");
    assert_eq!(children[10].key, "list/10");
    assert_eq!(children[10].path, ["list", "10"]);
}

#[test]
fn test_nested_map_leaves() {
    let tree = build_from_json(&json!({"address": {"city": "X", "zip": 12345}}));

    let city = tree.resolve("address/city").expect("city leaf");
    assert_eq!(city.field_type, FieldType::String);
    assert_eq!(city.path, ["address", "city"]);
    assert_eq!(city.label, "city");

    let zip = tree.resolve("address/zip").expect("zip leaf");
    assert_eq!(zip.field_type, FieldType::Number);

    assert!(tree.resolve("address").is_none());
    assert!(!tree.leaves.contains_key("address"));
    assert_eq!(tree.find_node("address").map(|n| n.field_type), Some(FieldType::Map));
}

#[test]
fn test_empty_containers() {
    let tree = build_from_json(&json!({"tags": [], "meta": {}}));
    for node in &tree.nodes {
        assert!(node.is_container);
        assert_eq!(node.children, Some(vec![]));
    }
    assert!(tree.leaves.is_empty());
}

#[test]
fn test_leaves_follow_depth_first_build_order() {
    let tree = build_from_json(&json!({"b": {"y": 1, "x": 2}, "a": 3, "c": [true]}));
    let leaf_keys: Vec<_> = tree.leaves.keys().collect();
    assert_eq!(leaf_keys, ["a", "b/x", "b/y", "c/0"]);
}

#[test]
fn test_keys_are_joined_paths() {
    let tree = build_from_json(&customer_structure());
    for node in tree.walk() {
        assert_eq!(node.key, key_for_path(&node.path));
        assert_eq!(node.selectable, !node.is_container);
        assert_eq!(node.children.is_some(), node.is_container);
    }
}

#[test]
fn test_slash_in_map_key_does_not_collide_with_nested_path() {
    let tree = build_from_json(&json!({"a/b": 1, "a": {"b": "x"}, "a~1b": true}));

    let all_keys: Vec<_> = tree.walk().map(|n| n.key.as_str()).collect();
    assert_eq!(all_keys, ["a", "a/b", "a~1b", "a~01b"]);
    assert_eq!(tree.leaf_count(), 3);

    let nested = tree.resolve("a/b").expect("nested leaf");
    assert_eq!(nested.path, ["a", "b"]);
    assert_eq!(nested.field_type, FieldType::String);

    let slashed = tree.resolve("a~1b").expect("root leaf with a slash");
    assert_eq!(slashed.path, ["a/b"]);
    assert_eq!(slashed.label, "a/b");
    assert_eq!(slashed.field_type, FieldType::Number);

    let tilde = tree.resolve("a~01b").expect("root leaf with a tilde");
    assert_eq!(tilde.path, ["a~1b"]);
    assert_eq!(tilde.field_type, FieldType::Boolean);
}

#[test]
fn test_field_index_keeps_first_entry_on_duplicate_key() {
    let mut index = FieldIndex::new();
    let first = FieldOption {
        key: "a".to_string(),
        label: "a".to_string(),
        path: vec!["a".to_string()],
        field_type: FieldType::Number,
    };
    let second = FieldOption {
        field_type: FieldType::String,
        ..first.clone()
    };

    assert!(index.insert(first.clone()));
    assert!(!index.insert(second));
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("a"), Some(&first));
}

#[test]
fn test_build_is_deterministic() {
    let structure = canopy::value::structure_from_json(&customer_structure());
    let first = build(&structure);
    let second = build(&structure.clone());

    assert_eq!(first.nodes, second.nodes);
    assert!(first.leaves.keys().eq(second.leaves.keys()));
}

#[test]
fn test_non_object_roots_yield_empty_tree() {
    for root in [json!(null), json!([1, 2]), json!("x"), json!(3)] {
        let tree = build_from_json(&root);
        assert!(tree.nodes.is_empty());
        assert!(tree.leaves.is_empty());
    }
}

#[test]
fn test_deep_nesting_is_truncated_not_fatal() {
    let mut value = json!("bottom");
    for _ in 0..200 {
        value = json!({ "n": value });
    }
    let tree = build_from_json(&value);

    let deepest = tree.walk().map(|n| n.depth()).max().unwrap_or(0);
    assert_eq!(deepest, canopy::tree::DEFAULT_MAX_DEPTH);
    assert!(tree.leaves.is_empty());
}

#[test]
fn test_tree_serializes_for_widget() {
    let tree = build_from_json(&json!({"address": {"zip": 1}}));
    let wire = serde_json::to_value(&tree).unwrap();

    assert_eq!(
        wire,
        json!({
            "nodes": [{
                "key": "address",
                "label": "address",
                "path": ["address"],
                "type": "map",
                "isContainer": true,
                "selectable": false,
                "children": [{
                    "key": "address/zip",
                    "label": "zip",
                    "path": ["address", "zip"],
                    "type": "number",
                    "isContainer": false,
                    "selectable": true
                }]
            }],
            "leaves": {
                "address/zip": {
                    "key": "address/zip",
                    "label": "zip",
                    "path": ["address", "zip"],
                    "type": "number"
                }
            }
        })
    );
}
