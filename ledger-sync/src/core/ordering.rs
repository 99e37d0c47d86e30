//! Collection ordering applied to every freshly fetched list.
//!
//! # Contract
//! - Without a sort directive the comparator always answers "candidate goes
//!   after the records already placed". Ordering is a stable binary insertion,
//!   so this constant bias reproduces the arrival order; it is not a separate
//!   no-sort code path.
//! - With `field,asc` adjacent records satisfy `a[field] <= b[field]`; any
//!   other direction yields the descending order.
//! - Records with equal keys keep their arrival order.
//! - Keys form a total order: numbers and numeric strings, then other
//!   strings, then booleans, then structured values. Records whose key is
//!   missing or `null` go last in either direction.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

const ASCENDING: &str = "asc";
const DESCENDING: &str = "desc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A `field,direction` sort request attached to one fetch-list call.
///
/// Keeps the caller's text so the request carries it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// Wire (camelCase) name of the attribute to compare.
    pub field: String,
    pub direction: Direction,
    raw: String,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        let field = field.into();
        let raw = match direction {
            Direction::Ascending => format!("{field},{ASCENDING}"),
            Direction::Descending => format!("{field},{DESCENDING}"),
        };
        Self {
            field,
            direction,
            raw,
        }
    }

    /// Parses `field,direction`.
    ///
    /// Returns `None` for a blank directive, which counts as absent. A missing
    /// or unrecognised direction means descending; only `asc` is ascending.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut parts = trimmed.split(',');
        let field = parts.next().unwrap_or_default().trim();
        let direction = match parts.next().map(str::trim) {
            Some(ASCENDING) => Direction::Ascending,
            _ => Direction::Descending,
        };
        Some(Self {
            field: field.to_string(),
            direction,
            raw: raw.to_string(),
        })
    }

    /// The directive as the caller wrote it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Reorder `records` per `sort`, recomputing the whole order.
pub fn order_collection<T: Serialize>(records: Vec<T>, sort: Option<&SortDirective>) -> Vec<T> {
    let mut placed: Vec<(Option<Value>, T)> = Vec::with_capacity(records.len());
    for record in records {
        let key = sort.and_then(|directive| sort_key(&record, &directive.field));
        let position = placed.partition_point(|(placed_key, _)| {
            compare(key.as_ref(), placed_key.as_ref(), sort) == Ordering::Greater
        });
        placed.insert(position, (key, record));
    }
    placed.into_iter().map(|(_, record)| record).collect()
}

/// Where `candidate` belongs relative to an already placed record.
///
/// `Greater` means after. `Equal` is never returned: ties place the candidate
/// after, which keeps the insertion stable.
fn compare(
    candidate: Option<&Value>,
    placed: Option<&Value>,
    sort: Option<&SortDirective>,
) -> Ordering {
    let Some(directive) = sort else {
        return Ordering::Greater;
    };
    let ordering = match (candidate, placed) {
        (None, _) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(candidate), Some(placed)) => match directive.direction {
            Direction::Ascending => key_order(candidate, placed),
            Direction::Descending => key_order(placed, candidate),
        },
    };
    if ordering == Ordering::Less {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Field value of the record's wire form; `null` counts as missing.
fn sort_key<T: Serialize>(record: &T, field: &str) -> Option<Value> {
    serde_json::to_value(record)
        .ok()
        .and_then(|value| value.get(field).cloned())
        .filter(|value| !value.is_null())
}

/// Comparable form of a present key.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey<'a> {
    Numeric(f64),
    Text(&'a str),
    Flag(bool),
    Structured,
}

impl<'a> SortKey<'a> {
    /// Numbers compare numerically, as do strings that parse as finite numbers
    /// (`amount` is transmitted as a decimal string).
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Number(number) => number
                .as_f64()
                .map_or(SortKey::Structured, SortKey::Numeric),
            Value::String(text) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => SortKey::Numeric(number),
                _ => SortKey::Text(text),
            },
            Value::Bool(flag) => SortKey::Flag(*flag),
            _ => SortKey::Structured,
        }
    }
}

/// Total order over present keys.
///
/// Derived `PartialOrd` ranks variants in declaration order and compares
/// payloads within a variant. Numeric payloads are always finite, so the only
/// unordered case left is unreachable and treated as a tie.
fn key_order(a: &Value, b: &Value) -> Ordering {
    SortKey::of(a)
        .partial_cmp(&SortKey::of(b))
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expense, Group};
    use crate::test_support::{expense, expense_with_amount};
    use serde_json::json;

    fn amounts(records: &[Expense]) -> Vec<&str> {
        records
            .iter()
            .map(|record| record.amount.as_deref().unwrap_or("-"))
            .collect()
    }

    #[test]
    fn parse_splits_field_and_direction() {
        let directive = SortDirective::parse("amount,asc").expect("directive");
        assert_eq!(directive, SortDirective::new("amount", Direction::Ascending));
        assert_eq!(directive.to_string(), "amount,asc");
    }

    #[test]
    fn parse_keeps_caller_text() {
        for raw in ["amount", "amount,DESC", " name , asc"] {
            let directive = SortDirective::parse(raw).expect("directive");
            assert_eq!(directive.as_str(), raw);
        }
        assert_eq!(
            SortDirective::parse(" name , asc").map(|d| d.direction),
            Some(Direction::Ascending)
        );
    }

    #[test]
    fn parse_treats_anything_but_asc_as_descending() {
        for raw in ["amount,desc", "amount,DESC", "amount", "amount,"] {
            let directive = SortDirective::parse(raw).expect("directive");
            assert_eq!(directive.direction, Direction::Descending, "{raw}");
        }
    }

    #[test]
    fn parse_blank_is_absent() {
        assert!(SortDirective::parse("").is_none());
        assert!(SortDirective::parse("   ").is_none());
    }

    /// The no-directive comparator is a constant "after" bias, not a skipped
    /// sort. Under stable insertion it keeps arrival order.
    #[test]
    fn no_directive_applies_constant_after_bias() {
        let records = vec![
            expense_with_amount(1, "5"),
            expense_with_amount(2, "30"),
            expense_with_amount(3, "20"),
        ];
        assert_eq!(compare(None, None, None), Ordering::Greater);

        let ordered = order_collection(records, None);
        assert_eq!(amounts(&ordered), vec!["5", "30", "20"]);
    }

    #[test]
    fn descending_amounts_compare_numerically() {
        let records = vec![
            expense_with_amount(1, "5"),
            expense_with_amount(2, "30"),
            expense_with_amount(3, "20"),
        ];
        let directive = SortDirective::parse("amount,desc");
        let ordered = order_collection(records, directive.as_ref());
        assert_eq!(amounts(&ordered), vec!["30", "20", "5"]);
    }

    #[test]
    fn ascending_adjacent_pairs_are_non_decreasing() {
        let records: Vec<Expense> = ["9.5", "12.50", "1", "100", "12.5", "0.25"]
            .iter()
            .enumerate()
            .map(|(idx, amount)| expense_with_amount(idx as i64, amount))
            .collect();
        let directive = SortDirective::parse("amount,asc");
        let ordered = order_collection(records, directive.as_ref());
        for pair in ordered.windows(2) {
            let a: f64 = pair[0].amount.as_deref().unwrap_or("0").parse().expect("num");
            let b: f64 = pair[1].amount.as_deref().unwrap_or("0").parse().expect("num");
            assert!(a <= b, "{a} > {b}");
        }
    }

    #[test]
    fn equal_keys_keep_arrival_order() {
        let records = vec![
            expense_with_amount(1, "10"),
            expense_with_amount(2, "5"),
            expense_with_amount(3, "10"),
        ];
        let directive = SortDirective::parse("amount,desc");
        let ordered = order_collection(records, directive.as_ref());
        let ids: Vec<_> = ordered.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3), Some(2)]);
    }

    #[test]
    fn sorts_numeric_fields_and_text_fields() {
        let groups = vec![
            Group {
                id: Some(3),
                name: Some("beta".to_string()),
                ..Group::default()
            },
            Group {
                id: Some(1),
                name: Some("alpha".to_string()),
                ..Group::default()
            },
            Group {
                id: Some(2),
                name: Some("gamma".to_string()),
                ..Group::default()
            },
        ];
        let by_id = order_collection(groups.clone(), SortDirective::parse("id,asc").as_ref());
        assert_eq!(
            by_id.iter().map(|g| g.id).collect::<Vec<_>>(),
            vec![Some(1), Some(2), Some(3)]
        );
        let by_name = order_collection(groups, SortDirective::parse("name,desc").as_ref());
        assert_eq!(
            by_name.iter().map(|g| g.name.as_deref()).collect::<Vec<_>>(),
            vec![Some("gamma"), Some("beta"), Some("alpha")]
        );
    }

    #[test]
    fn missing_and_null_keys_go_last_in_both_directions() {
        let records = vec![
            json!({ "id": 1, "amount": "5" }),
            json!({ "id": 2 }),
            json!({ "id": 3, "amount": "1" }),
            json!({ "id": 4, "amount": null }),
            json!({ "id": 5, "amount": "3" }),
        ];
        let ids = |ordered: Vec<Value>| -> Vec<i64> {
            ordered.iter().filter_map(|record| record["id"].as_i64()).collect()
        };

        let asc = order_collection(records.clone(), SortDirective::parse("amount,asc").as_ref());
        assert_eq!(ids(asc), vec![3, 5, 1, 2, 4]);

        let desc = order_collection(records, SortDirective::parse("amount,desc").as_ref());
        assert_eq!(ids(desc), vec![1, 5, 3, 2, 4]);
    }

    #[test]
    fn mixed_numeric_and_text_keys_stay_ordered() {
        let records: Vec<Expense> = ["10", "1a", "9", "0.5", "abc", "100"]
            .iter()
            .enumerate()
            .map(|(idx, amount)| expense_with_amount(idx as i64, amount))
            .collect();
        let mut with_missing = records.clone();
        with_missing.insert(2, expense(99));

        let ordered = order_collection(with_missing, SortDirective::parse("amount,asc").as_ref());

        assert_eq!(
            amounts(&ordered),
            vec!["0.5", "9", "10", "100", "1a", "abc", "-"]
        );
        let present: Vec<Value> = ordered
            .iter()
            .filter_map(|record| record.amount.clone().map(Value::String))
            .collect();
        for pair in present.windows(2) {
            assert_ne!(
                key_order(&pair[0], &pair[1]),
                Ordering::Greater,
                "{} > {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn key_order_ranks_value_classes() {
        let ordered = [
            json!(-1),
            json!("2"),
            json!(3.5),
            json!("b"),
            json!("c"),
            json!(false),
            json!(true),
            json!([1]),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(
                key_order(&pair[0], &pair[1]),
                Ordering::Less,
                "{} vs {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(key_order(&json!("12.50"), &json!(12.5)), Ordering::Equal);
    }
}
