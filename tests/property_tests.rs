//! Property-based tests for the emission guarantees: one line per scalar,
//! fixed bucket order, one block per array element, and byte-identical
//! output across calls.

use membertext::{record, serialize, to_string, to_tree, Node};
use proptest::prelude::*;

record! {
    #[derive(Debug, Clone)]
    struct Scalars {
        label: String,
        ratio: f64,
        id: i64,
        active: bool,
        big: u128,
        letter: char,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Item {
        name: String,
        weight: f32,
    }
}

record! {
    #[derive(Debug, Clone)]
    struct Basket {
        items: Vec<Item>,
        @[rename("CODES")] codes: Vec<i32>,
        owner: String,
        @[ignore] scratch: u8,
    }
}

fn scalars() -> impl Strategy<Value = Scalars> {
    (
        ".*",
        -1.0e12f64..1.0e12,
        any::<i64>(),
        any::<bool>(),
        any::<u128>(),
        any::<char>(),
    )
        .prop_map(|(label, ratio, id, active, big, letter)| Scalars {
            label,
            ratio,
            id,
            active,
            big,
            letter,
        })
}

fn basket() -> impl Strategy<Value = Basket> {
    (
        prop::collection::vec(("[a-z]{1,8}", -1.0e6f32..1.0e6), 0..8),
        prop::collection::vec(any::<i32>(), 0..16),
        "[a-zA-Z ]{0,12}",
        any::<u8>(),
    )
        .prop_map(|(items, codes, owner, scratch)| Basket {
            items: items
                .into_iter()
                .map(|(name, weight)| Item { name, weight })
                .collect(),
            codes,
            owner,
            scratch,
        })
}

fn top_level_names(text: &str) -> Vec<&str> {
    text.lines()
        .filter_map(|line| line.split(" : ").next())
        .collect()
}

proptest! {
    #[test]
    fn prop_each_scalar_is_one_line(value in scalars()) {
        let text = to_string(&value).unwrap();
        prop_assert_eq!(text.lines().count(), 6);
        prop_assert!(text.ends_with('\n'));
        prop_assert_eq!(
            top_level_names(&text),
            vec!["active", "id", "big", "ratio", "label", "letter"]
        );
    }

    #[test]
    fn prop_integers_are_plain_decimal(id in any::<i64>(), big in any::<u128>()) {
        let value = Scalars {
            label: String::new(),
            ratio: 0.0,
            id,
            active: false,
            big,
            letter: 'x',
        };
        let text = to_string(&value).unwrap();
        let expected_id = format!("id : {}\n", id);
        let expected_big = format!("big : {}\n", big);
        prop_assert!(text.contains(&expected_id));
        prop_assert!(text.contains(&expected_big));
    }

    #[test]
    fn prop_floats_have_six_fraction_digits(value in scalars()) {
        let text = to_string(&value).unwrap();
        let line = text.lines().find(|l| l.starts_with("ratio : ")).unwrap();
        let literal = &line["ratio : ".len()..];
        prop_assert!(!literal.contains('e'));
        let (_, fraction) = literal.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 6);
    }

    #[test]
    fn prop_array_of_n_has_n_blocks(value in basket()) {
        let tree = to_tree(&value).unwrap();

        let codes = tree.get("CODES").and_then(Node::as_elements).unwrap();
        prop_assert_eq!(codes.len(), value.codes.len());
        for (i, node) in codes.iter().enumerate() {
            prop_assert_eq!(node.name(), i.to_string());
        }

        let items = tree.get("items").and_then(Node::as_elements).unwrap();
        prop_assert_eq!(items.len(), value.items.len());
    }

    #[test]
    fn prop_bucket_order_and_markers(value in basket()) {
        let text = to_string(&value).unwrap();
        prop_assert!(text.starts_with("owner : "));
        prop_assert!(!text.contains("scratch : "));
        prop_assert!(!text.contains("codes : "));
        prop_assert_eq!(text.matches("CODES : [\n").count(), 1);

        let codes_at = text.find("CODES : [").unwrap();
        let items_at = text.find("items : [").unwrap();
        prop_assert!(items_at < codes_at);
    }

    #[test]
    fn prop_deterministic(value in basket()) {
        let first = serialize(&value).unwrap();
        let second = serialize(&value.clone()).unwrap();
        prop_assert_eq!(first, second);
    }
}
