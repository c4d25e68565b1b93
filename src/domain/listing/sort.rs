use super::collation;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    AlphaAscending,
    AlphaDescending,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "newest-first",
            Self::OldestFirst => "oldest-first",
            Self::AlphaAscending => "alpha-ascending",
            Self::AlphaDescending => "alpha-descending",
        }
    }

    /// Parse an optional query value, falling back to `default` when absent.
    pub fn from_query(raw: Option<&str>, default: Self) -> DomainResult<Self> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse(),
            None => Ok(default),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest-first" => Ok(Self::NewestFirst),
            "oldest-first" => Ok(Self::OldestFirst),
            "alpha-ascending" => Ok(Self::AlphaAscending),
            "alpha-descending" => Ok(Self::AlphaDescending),
            other => Err(DomainError::Validation(format!("unknown sort key: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    /// Publish time for posts, creation time for categories and authors.
    Timestamp,
    /// Title for posts, display name for categories and authors.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: OrderField,
    pub direction: SortDirection,
    /// Text comparison must use the application locale's collation.
    pub localized: bool,
}

pub fn sort_key_to_ordering(key: SortKey) -> OrderSpec {
    let (field, direction) = match key {
        SortKey::NewestFirst => (OrderField::Timestamp, SortDirection::Descending),
        SortKey::OldestFirst => (OrderField::Timestamp, SortDirection::Ascending),
        SortKey::AlphaAscending => (OrderField::Text, SortDirection::Ascending),
        SortKey::AlphaDescending => (OrderField::Text, SortDirection::Descending),
    };
    OrderSpec {
        field,
        direction,
        localized: field == OrderField::Text,
    }
}

impl OrderSpec {
    /// Compare two entities in memory the same way the database orders them.
    pub fn compare(
        &self,
        (a_time, a_text): (DateTime<Utc>, &str),
        (b_time, b_text): (DateTime<Utc>, &str),
    ) -> Ordering {
        let ordering = match self.field {
            OrderField::Timestamp => a_time.cmp(&b_time),
            OrderField::Text if self.localized => collation::compare(a_text, b_text),
            OrderField::Text => a_text.cmp(b_text),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn sort<T>(&self, items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, &str)) {
        items.sort_by(|a, b| self.compare(key(a), key(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn alpha_ascending_uses_russian_collation() {
        let mut names = vec![(at(1), "Яблоко"), (at(2), "Апельсин")];
        sort_key_to_ordering(SortKey::AlphaAscending).sort(&mut names, |item| (item.0, item.1));
        let names: Vec<_> = names.into_iter().map(|item| item.1).collect();
        assert_eq!(names, vec!["Апельсин", "Яблоко"]);
    }

    #[test]
    fn newest_first_is_descending_by_time() {
        let mut items = vec![(at(1), "a"), (at(3), "b"), (at(2), "c")];
        sort_key_to_ordering(SortKey::NewestFirst).sort(&mut items, |item| (item.0, item.1));
        assert_eq!(items.iter().map(|item| item.1).collect::<String>(), "bca");
    }

    #[test]
    fn oldest_first_and_alpha_descending() {
        let order = sort_key_to_ordering(SortKey::OldestFirst);
        assert_eq!(order.direction, SortDirection::Ascending);
        assert!(!order.localized);

        let order = sort_key_to_ordering(SortKey::AlphaDescending);
        assert_eq!(order.field, OrderField::Text);
        assert_eq!(order.direction, SortDirection::Descending);
        assert!(order.localized);
    }

    #[test]
    fn parses_query_values() {
        assert_eq!(SortKey::from_query(None, SortKey::AlphaAscending).unwrap(), SortKey::AlphaAscending);
        assert_eq!(SortKey::from_query(Some("oldest-first"), SortKey::NewestFirst).unwrap(), SortKey::OldestFirst);
        assert!(SortKey::from_query(Some("random"), SortKey::NewestFirst).is_err());
    }
}
