// src/board/filters.rs

use crate::store::models::Profile;

/// Fixed budget buckets over `price_usd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBucket {
    Under20,
    From20To50,
    Over50,
}

impl BudgetBucket {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetBucket::Under20 => "Under $20",
            BudgetBucket::From20To50 => "$20 - $50",
            BudgetBucket::Over50 => "Over $50",
        }
    }

    /// Parse a dropdown label back into a bucket. Unknown labels (including
    /// the "Any Budget" sentinel) mean no budget filter.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Under $20" => Some(BudgetBucket::Under20),
            "$20 - $50" => Some(BudgetBucket::From20To50),
            "Over $50" => Some(BudgetBucket::Over50),
            _ => None,
        }
    }

    pub fn matches(&self, price_usd: f64) -> bool {
        match self {
            BudgetBucket::Under20 => price_usd < 20.0,
            BudgetBucket::From20To50 => (20.0..=50.0).contains(&price_usd),
            BudgetBucket::Over50 => price_usd > 50.0,
        }
    }
}

/// Current filter selection. `None` on a dimension means that dimension is
/// inactive; active dimensions combine with logical AND.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    /// Free-text search over name, skills, and spark line.
    pub search: Option<String>,
    pub skill: Option<String>,
    pub city: Option<String>,
    pub availability: Option<String>,
    pub budget: Option<BudgetBucket>,
}

/// Apply the filter to the full profile list, preserving input order.
pub fn apply(profiles: &[Profile], filter: &BoardFilter) -> Vec<Profile> {
    profiles
        .iter()
        .filter(|profile| matches_profile(profile, filter))
        .cloned()
        .collect()
}

fn matches_profile(profile: &Profile, filter: &BoardFilter) -> bool {
    if let Some(term) = &filter.search {
        let term = term.to_lowercase();
        let hit = profile.full_name.to_lowercase().contains(&term)
            || profile
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&term))
            || profile.spark_line.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }

    if let Some(skill) = &filter.skill {
        if !profile.skills.iter().any(|s| s == skill) {
            return false;
        }
    }

    if let Some(city) = &filter.city {
        if &profile.city != city {
            return false;
        }
    }

    if let Some(availability) = &filter.availability {
        if &profile.availability != availability {
            return false;
        }
    }

    if let Some(bucket) = &filter.budget {
        if !bucket.matches(profile.price_usd) {
            return false;
        }
    }

    true
}
