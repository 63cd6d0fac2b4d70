use std::fmt;

use crate::data::model::{Month, weekday_names};
use crate::data::registry::City;

/// Token accepted for "no month/day filter".
pub const ALL: &str = "all";

/// Which answer is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    City,
    Month,
    Day,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::City => "city",
            Category::Month => "month",
            Category::Day => "day",
        };
        write!(f, "{name}")
    }
}

/// Whether `value` is an accepted answer for `category`.
///
/// `value` is compared as-is, so callers lowercase and trim first.
pub fn is_valid(category: Category, value: &str) -> bool {
    match category {
        Category::City => City::from_name(value).is_some(),
        Category::Month | Category::Day => {
            value == ALL || candidates(category).contains(&value)
        }
    }
}

/// Valid names for `category` in prompt order, used as suggestion targets.
/// `"all"` is deliberately not among them.
pub fn candidates(category: Category) -> Vec<&'static str> {
    match category {
        Category::City => City::names(),
        Category::Month => Month::names(),
        Category::Day => weekday_names(),
    }
}
