//! Property-based round-trip checks over generated value trees.
//!
//! Every generated tree is serializable by construction, so the two core
//! guarantees can be stated directly: serialize-then-parse returns an
//! equal tree, and reserializing a reparsed tree is byte-stable.

use proptest::prelude::*;
use structured_fields::{
    parse_dictionary, parse_item, parse_list, to_string, BareItem, Dictionary, InnerList, Item,
    ListEntry, Parameters,
};

fn integer_strategy() -> impl Strategy<Value = i64> {
    -999_999_999_999_999i64..=999_999_999_999_999
}

fn key_strategy() -> impl Strategy<Value = String> {
    // The serializer's key grammar, which is the parser's minus `.`.
    "[a-z*][a-z0-9_*-]{0,12}"
}

fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z*][A-Za-z0-9!#$%&'*+.^_`|~:/-]{0,12}"
}

fn bare_item_strategy() -> impl Strategy<Value = BareItem> {
    prop_oneof![
        integer_strategy().prop_map(BareItem::Integer),
        // Any decimal with three fractional digits, built exactly.
        integer_strategy().prop_map(|n| BareItem::Decimal(n as f64 / 1000.0)),
        "[ -~]{0,24}".prop_map(BareItem::String),
        token_strategy().prop_map(BareItem::Token),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(BareItem::ByteSequence),
        any::<bool>().prop_map(BareItem::Boolean),
    ]
}

fn params_strategy() -> impl Strategy<Value = Parameters> {
    proptest::collection::vec((key_strategy(), bare_item_strategy()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (bare_item_strategy(), params_strategy())
        .prop_map(|(bare_item, params)| Item::with_params(bare_item, params))
}

fn inner_list_strategy() -> impl Strategy<Value = InnerList> {
    (
        proptest::collection::vec(item_strategy(), 0..4),
        params_strategy(),
    )
        .prop_map(|(items, params)| InnerList::with_params(items, params))
}

fn member_strategy() -> impl Strategy<Value = ListEntry> {
    prop_oneof![
        item_strategy().prop_map(ListEntry::Item),
        inner_list_strategy().prop_map(ListEntry::InnerList),
    ]
}

fn list_strategy() -> impl Strategy<Value = Vec<ListEntry>> {
    proptest::collection::vec(member_strategy(), 0..5)
}

fn dictionary_strategy() -> impl Strategy<Value = Dictionary> {
    proptest::collection::vec((key_strategy(), member_strategy()), 0..5)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn item_round_trips(item in item_strategy()) {
        let wire = to_string(&item).unwrap();
        prop_assert_eq!(parse_item(wire.as_bytes()).unwrap(), item);
    }

    #[test]
    fn list_round_trips(list in list_strategy()) {
        let wire = to_string(&list).unwrap();
        prop_assert_eq!(parse_list(wire.as_bytes()).unwrap(), list);
    }

    #[test]
    fn dictionary_round_trips(dict in dictionary_strategy()) {
        let wire = to_string(&dict).unwrap();
        prop_assert_eq!(parse_dictionary(wire.as_bytes()).unwrap(), dict);
    }

    #[test]
    fn reserialization_is_byte_stable(list in list_strategy()) {
        let wire = to_string(&list).unwrap();
        let reparsed = parse_list(wire.as_bytes()).unwrap();
        prop_assert_eq!(to_string(&reparsed).unwrap(), wire);
    }

    #[test]
    fn output_is_always_ascii(dict in dictionary_strategy()) {
        let wire = to_string(&dict).unwrap();
        prop_assert!(wire.is_ascii());
    }
}
