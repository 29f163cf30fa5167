//! Entity descriptor: the per-type metadata driving the generic CRUD flow.
//!
//! Each content record type declares its backend table, its designated
//! list ordering and an optional cascade rule. The gateway and the admin
//! panels are generic over this trait instead of hand-writing ten copies
//! of the same choreography.

use std::cmp::Ordering;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Suffix used in PostgREST `order=` query values.
    pub fn as_query(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Designated ordering of an entity's list fetches.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub column: &'static str,
    pub direction: Direction,
}

impl SortKey {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Cascade rule: rows of `table` whose `column` references a deleted id
/// are removed before the record itself.
#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    pub table: &'static str,
    pub column: &'static str,
}

/// A flat content record with an opaque string identifier.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Backend table/collection name.
    const TABLE: &'static str;

    /// Ordering applied to every list fetch.
    const SORT: SortKey;

    /// Rows deleted alongside this record, if any.
    const CASCADE: Option<Cascade> = None;

    fn id(&self) -> &str;
}

/// Entities creatable from the admin console.
pub trait Draftable: Entity {
    /// Blank record seeded with a fresh identifier, default field values
    /// and the next sequential sort position.
    fn blank(next_sort: i32) -> Self;
}

/// Comparable projection of one row's sort column.
///
/// Rows arrive as JSON both from the hosted backend and the in-memory
/// store, so ordering is defined over JSON scalars: null < bool < number
/// < string. Dates sort correctly as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq)]
enum SortVal {
    Null,
    Bool(bool),
    Num(f64),
    Text(String),
}

impl SortVal {
    fn of(row: &Value, column: &str) -> Self {
        match row.get(column) {
            Some(Value::Bool(b)) => SortVal::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map(SortVal::Num).unwrap_or(SortVal::Null),
            Some(Value::String(s)) => SortVal::Text(s.clone()),
            _ => SortVal::Null,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortVal::Null => 0,
            SortVal::Bool(_) => 1,
            SortVal::Num(_) => 2,
            SortVal::Text(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortVal::Bool(a), SortVal::Bool(b)) => a.cmp(b),
            (SortVal::Num(a), SortVal::Num(b)) => a.total_cmp(b),
            (SortVal::Text(a), SortVal::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn directed(ord: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

/// Stable sort of raw JSON rows by a sort key. Ties keep their order.
pub(crate) fn sort_value_rows(rows: &mut [Value], key: SortKey) {
    rows.sort_by(|a, b| {
        directed(
            SortVal::of(a, key.column).compare(&SortVal::of(b, key.column)),
            key.direction,
        )
    });
}

/// Stable sort of typed rows by the entity's designated key.
pub fn sort_rows<E: Entity>(rows: &mut Vec<E>) {
    let mut keyed: Vec<(SortVal, E)> = rows
        .drain(..)
        .map(|record| {
            let key = serde_json::to_value(&record)
                .map(|v| SortVal::of(&v, E::SORT.column))
                .unwrap_or(SortVal::Null);
            (key, record)
        })
        .collect();
    keyed.sort_by(|a, b| directed(a.0.compare(&b.0), E::SORT.direction));
    rows.extend(keyed.into_iter().map(|(_, record)| record));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{BlogPost, StatItem};
    use chrono::NaiveDate;

    fn stat(id: &str, sort_order: i32) -> StatItem {
        StatItem {
            id: id.to_string(),
            value: "100+".to_string(),
            label_en: String::new(),
            label_hi: String::new(),
            sort_order,
        }
    }

    #[test]
    fn sorting_is_idempotent_and_stable_for_ties() {
        let mut rows = vec![stat("a", 1), stat("b", 2), stat("c", 2), stat("d", 3)];
        let expected = rows.clone();

        sort_rows(&mut rows);
        assert_eq!(rows, expected);

        // Ties ("b" before "c") survive a second pass unchanged.
        sort_rows(&mut rows);
        assert_eq!(rows, expected);
    }

    #[test]
    fn unsorted_rows_end_up_in_ascending_sort_order() {
        let mut rows = vec![stat("c", 3), stat("a", 1), stat("b", 2)];
        sort_rows(&mut rows);
        let ids: Vec<&str> = rows.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn blog_posts_sort_by_publish_date_descending() {
        let post = |id: &str, date: &str| {
            let mut p = BlogPost::sample(id);
            p.published_at = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            p
        };
        let mut rows = vec![
            post("old", "2023-01-05"),
            post("new", "2024-06-01"),
            post("mid", "2023-11-20"),
        ];
        sort_rows(&mut rows);
        let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
