// src/board/options.rs

use crate::board::filters::BudgetBucket;
use crate::store::models::Profile;

use std::collections::BTreeSet;

/// Sentinel "show all" options, shown first in each dropdown.
pub const ALL_SKILLS: &str = "All Skills";
pub const ALL_CITIES: &str = "All Cities";
pub const ANY_TIME: &str = "Any Time";
pub const ANY_BUDGET: &str = "Any Budget";

/// Dropdown option sets derived from the current profile list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub skills: Vec<String>,
    pub cities: Vec<String>,
    pub availability: Vec<String>,
}

/// Derive distinct skills, cities, and availability values from the listed
/// profiles. Pure; recomputed whenever the profile list changes.
pub fn filter_options(profiles: &[Profile]) -> FilterOptions {
    let skills: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| p.skills.iter())
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    let cities: BTreeSet<&str> = profiles
        .iter()
        .map(|p| p.city.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    let availability: BTreeSet<&str> = profiles
        .iter()
        .map(|p| p.availability.as_str())
        .filter(|a| !a.is_empty())
        .collect();

    FilterOptions {
        skills: with_sentinel(ALL_SKILLS, skills),
        cities: with_sentinel(ALL_CITIES, cities),
        availability: with_sentinel(ANY_TIME, availability),
    }
}

/// The fixed budget dropdown: sentinel plus the bucket labels.
pub fn budget_options() -> Vec<String> {
    let mut options = vec![ANY_BUDGET.to_string()];
    options.extend(
        [
            BudgetBucket::Under20,
            BudgetBucket::From20To50,
            BudgetBucket::Over50,
        ]
        .iter()
        .map(|b| b.label().to_string()),
    );
    options
}

fn with_sentinel(sentinel: &str, values: BTreeSet<&str>) -> Vec<String> {
    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(sentinel.to_string());
    options.extend(values.into_iter().map(str::to_string));
    options
}
