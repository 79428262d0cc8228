//! Filter and sort engine for the enriched operator collection.
//!
//! Criteria are sparse: every present field is ANDed in, and the UI
//! sentinels "Tous"/"All" mean the same as absence. Filtering preserves
//! input order; sorting is a separate, stable, non-mutating step so paging
//! stays deterministic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enrich::EnrichedOperator;
use crate::error::SiegeError;


/// Sparse filter criteria over enriched operators.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OperatorCriteria {
    /// Free text matched against name, real name, or unit.
    pub search: Option<String>,
    pub role: Option<String>,
    pub side: Option<String>,
    pub speed: Option<u8>,
    pub unit: Option<String>,
    pub country: Option<String>,
    pub season: Option<String>,
    /// Membership in the operator's derived weapon-type set.
    pub weapon_type: Option<String>,
    /// Membership among the compatible weapons' classes.
    pub weapon_class: Option<String>,
    pub min_avg_damage: Option<u32>,
    pub max_avg_damage: Option<u32>,
    /// Substring match against any compatible weapon's name.
    pub weapon_name: Option<String>,
}

/// Treat the UI's "show everything" sentinels like an absent field.
fn constraint(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None => None,
        Some(v) if v.is_empty() || v == "Tous" || v == "All" => None,
        Some(v) => Some(v),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl OperatorCriteria {
    /// Whether one enriched operator passes every present constraint.
    pub fn matches(&self, op: &EnrichedOperator) -> bool {
        if let Some(search) = constraint(&self.search) {
            let hit = contains_ci(&op.operator.name, search)
                || contains_ci(&op.operator.realname, search)
                || contains_ci(&op.operator.unit, search);
            if !hit {
                return false;
            }
        }

        if let Some(role) = constraint(&self.role) {
            if !op.operator.roles.iter().any(|r| r.eq_ignore_ascii_case(role)) {
                return false;
            }
        }

        if let Some(side) = constraint(&self.side) {
            if !op.operator.side.to_string().eq_ignore_ascii_case(side) {
                return false;
            }
        }

        if let Some(speed) = self.speed {
            if op.operator.speed != speed {
                return false;
            }
        }

        if let Some(unit) = constraint(&self.unit) {
            if !op.operator.unit.eq_ignore_ascii_case(unit) {
                return false;
            }
        }

        if let Some(country) = constraint(&self.country) {
            if !contains_ci(&op.operator.birthplace, country) {
                return false;
            }
        }

        if let Some(season) = constraint(&self.season) {
            if !op.operator.season_introduced.eq_ignore_ascii_case(season) {
                return false;
            }
        }

        if let Some(weapon_type) = constraint(&self.weapon_type) {
            if !op
                .weapon_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(weapon_type))
            {
                return false;
            }
        }

        if let Some(weapon_class) = constraint(&self.weapon_class) {
            if !op
                .weapons
                .iter()
                .any(|w| w.class.eq_ignore_ascii_case(weapon_class))
            {
                return false;
            }
        }

        if let Some(min) = self.min_avg_damage {
            if op.average_weapon_damage < min {
                return false;
            }
        }

        if let Some(max) = self.max_avg_damage {
            if op.average_weapon_damage > max {
                return false;
            }
        }

        if let Some(weapon_name) = constraint(&self.weapon_name) {
            if !op.weapons.iter().any(|w| contains_ci(&w.name, weapon_name)) {
                return false;
            }
        }

        true
    }
}

/// AND all present criteria over the collection, preserving input order.
pub fn filter_operators(
    operators: &[EnrichedOperator],
    criteria: &OperatorCriteria,
) -> Vec<EnrichedOperator> {
    operators
        .iter()
        .filter(|op| criteria.matches(op))
        .cloned()
        .collect()
}

/// Selectable sort orderings for the operator browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    HealthAsc,
    HealthDesc,
    SpeedAsc,
    SpeedDesc,
    WeaponCountAsc,
    WeaponCountDesc,
    AverageDamageAsc,
    AverageDamageDesc,
    SeasonAsc,
    SeasonDesc,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::HealthAsc => "health-asc",
            SortKey::HealthDesc => "health-desc",
            SortKey::SpeedAsc => "speed-asc",
            SortKey::SpeedDesc => "speed-desc",
            SortKey::WeaponCountAsc => "weapons-asc",
            SortKey::WeaponCountDesc => "weapons-desc",
            SortKey::AverageDamageAsc => "damage-asc",
            SortKey::AverageDamageDesc => "damage-desc",
            SortKey::SeasonAsc => "season-asc",
            SortKey::SeasonDesc => "season-desc",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortKey {
    type Err = SiegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "health-asc" => Ok(SortKey::HealthAsc),
            "health-desc" => Ok(SortKey::HealthDesc),
            "speed-asc" => Ok(SortKey::SpeedAsc),
            "speed-desc" => Ok(SortKey::SpeedDesc),
            "weapons-asc" => Ok(SortKey::WeaponCountAsc),
            "weapons-desc" => Ok(SortKey::WeaponCountDesc),
            "damage-asc" => Ok(SortKey::AverageDamageAsc),
            "damage-desc" => Ok(SortKey::AverageDamageDesc),
            "season-asc" => Ok(SortKey::SeasonAsc),
            "season-desc" => Ok(SortKey::SeasonDesc),
            other => Err(SiegeError::NotFound {
                name: format!("sort key '{}'", other),
            }),
        }
    }
}

fn cmp_str_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable, non-mutating sort over a snapshot of the collection.
///
/// Ties keep their original relative order, which the UI relies on for
/// deterministic paging and animation delays.
pub fn sort_operators(operators: &[EnrichedOperator], key: SortKey) -> Vec<EnrichedOperator> {
    let mut sorted = operators.to_vec();

    sorted.sort_by(|a, b| match key {
        SortKey::NameAsc => cmp_str_ci(&a.operator.name, &b.operator.name),
        SortKey::NameDesc => cmp_str_ci(&b.operator.name, &a.operator.name),
        SortKey::HealthAsc => a.operator.health.cmp(&b.operator.health),
        SortKey::HealthDesc => b.operator.health.cmp(&a.operator.health),
        SortKey::SpeedAsc => a.operator.speed.cmp(&b.operator.speed),
        SortKey::SpeedDesc => b.operator.speed.cmp(&a.operator.speed),
        SortKey::WeaponCountAsc => a.weapon_count.cmp(&b.weapon_count),
        SortKey::WeaponCountDesc => b.weapon_count.cmp(&a.weapon_count),
        SortKey::AverageDamageAsc => a.average_weapon_damage.cmp(&b.average_weapon_damage),
        SortKey::AverageDamageDesc => b.average_weapon_damage.cmp(&a.average_weapon_damage),
        SortKey::SeasonAsc => cmp_str_ci(&a.operator.season_introduced, &b.operator.season_introduced),
        SortKey::SeasonDesc => cmp_str_ci(&b.operator.season_introduced, &a.operator.season_introduced),
    });

    sorted
}
