//! Synergy analyzer: best operator loadouts, per-map picks, and weapon
//! effectiveness rankings over the full enriched dataset.
//!
//! The whole computation is O(operators x weapons), runs synchronously on
//! demand, and is idempotent: unchanged inputs produce identical reports.

use rayon::prelude::*;
use serde::Serialize;

use crate::enrich::{EnrichedOperator, EnrichedWeapon, DEFAULT_FIRE_RATE};
use crate::model::{Map, Side};


/// An operator's highest-scoring compatible weapon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorWeaponCombo {
    pub operator_name: String,
    pub weapon_name: String,
    pub score: f64,
}

/// The best pick for one side of a map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidePick {
    pub operator_name: String,
    pub score: f64,
}

/// Recommended attacker and defender for one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRecommendation {
    pub map_name: String,
    pub best_attacker: Option<SidePick>,
    pub best_defender: Option<SidePick>,
}

/// One weapon's position in the effectiveness ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponRanking {
    pub weapon_name: String,
    pub effectiveness: f64,
}

/// The three independent synergy reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyReport {
    pub best_combos: Vec<OperatorWeaponCombo>,
    pub map_recommendations: Vec<MapRecommendation>,
    pub weapon_rankings: Vec<WeaponRanking>,
}

/// Compute all three reports over the enriched collections.
pub fn analyze_synergies(
    operators: &[EnrichedOperator],
    weapons: &[EnrichedWeapon],
    maps: &[Map],
) -> SynergyReport {
    SynergyReport {
        best_combos: best_operator_weapon_combos(operators, weapons),
        map_recommendations: recommend_for_maps(maps, operators),
        weapon_rankings: rank_weapons(weapons),
    }
}

/// A weapon is a candidate for an operator when the back-reference lists
/// the operator, the weapon family matches the operator's side, or an
/// explicit `availableFor` entry names the operator.
fn is_candidate(weapon: &EnrichedWeapon, operator: &EnrichedOperator) -> bool {
    let name = &operator.operator.name;

    if weapon.weapon.operators.iter().any(|n| n == name) {
        return true;
    }

    if family_matches(weapon.weapon.family.as_deref(), operator.operator.side) {
        return true;
    }

    weapon
        .weapon
        .available_for
        .as_ref()
        .map(|list| list.iter().any(|n| n == name))
        .unwrap_or(false)
}

fn family_matches(family: Option<&str>, side: Side) -> bool {
    match family {
        Some(f) => match side {
            Side::Attacker => f.eq_ignore_ascii_case("atk") || f.eq_ignore_ascii_case("attacker"),
            Side::Defender => f.eq_ignore_ascii_case("def") || f.eq_ignore_ascii_case("defender"),
        },
        None => false,
    }
}

/// Best combo per operator, sorted descending by score.
///
/// Ties pick the first-encountered weapon; operators with no candidate
/// weapons are excluded rather than zero-scored.
pub fn best_operator_weapon_combos(
    operators: &[EnrichedOperator],
    weapons: &[EnrichedWeapon],
) -> Vec<OperatorWeaponCombo> {
    let mut combos: Vec<OperatorWeaponCombo> = operators
        .par_iter()
        .filter_map(|op| {
            let mut best: Option<&EnrichedWeapon> = None;
            for weapon in weapons {
                if !is_candidate(weapon, op) {
                    continue;
                }
                match best {
                    Some(current) if weapon.effectiveness_score <= current.effectiveness_score => {}
                    _ => best = Some(weapon),
                }
            }

            best.map(|weapon| OperatorWeaponCombo {
                operator_name: op.operator.name.clone(),
                weapon_name: weapon.weapon.name.clone(),
                score: weapon.effectiveness_score,
            })
        })
        .collect();

    // Stable sort keeps operator input order among equal scores.
    combos.sort_by(|a, b| b.score.total_cmp(&a.score));
    combos
}

fn attacker_score(op: &EnrichedOperator) -> f64 {
    (f64::from(op.operator.speed) / 3.0 + f64::from(op.operator.health) / 150.0) / 2.0
}

fn defender_score(op: &EnrichedOperator) -> f64 {
    (f64::from(op.operator.health) / 150.0 + op.weapon_count as f64 / 10.0) / 2.0
}

/// Per map, the best attacker and defender over the respective side pools.
/// First-encountered operator wins ties.
pub fn recommend_for_maps(
    maps: &[Map],
    operators: &[EnrichedOperator],
) -> Vec<MapRecommendation> {
    let best_attacker = best_for_side(operators, Side::Attacker, attacker_score);
    let best_defender = best_for_side(operators, Side::Defender, defender_score);

    maps.iter()
        .map(|map| MapRecommendation {
            map_name: map.name.clone(),
            best_attacker: best_attacker.clone(),
            best_defender: best_defender.clone(),
        })
        .collect()
}

fn best_for_side(
    operators: &[EnrichedOperator],
    side: Side,
    score: fn(&EnrichedOperator) -> f64,
) -> Option<SidePick> {
    let mut best: Option<SidePick> = None;
    for op in operators.iter().filter(|o| o.operator.side == side) {
        let s = score(op);
        match &best {
            Some(current) if s <= current.score => {}
            _ => {
                best = Some(SidePick {
                    operator_name: op.operator.name.clone(),
                    score: s,
                })
            }
        }
    }
    best
}

/// All weapons ranked descending by
/// `(damage/100 + fire_rate_or_default/1000 + compatible_operators/10) * 30`.
pub fn rank_weapons(weapons: &[EnrichedWeapon]) -> Vec<WeaponRanking> {
    let mut rankings: Vec<WeaponRanking> = weapons
        .iter()
        .map(|w| {
            let rate = w
                .weapon
                .fire_rate
                .map(f64::from)
                .unwrap_or(DEFAULT_FIRE_RATE);
            let effectiveness = (f64::from(w.weapon.damage) / 100.0
                + rate / 1000.0
                + w.compatible_operators.len() as f64 / 10.0)
                * 30.0;

            WeaponRanking {
                weapon_name: w.weapon.name.clone(),
                effectiveness,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.effectiveness.total_cmp(&a.effectiveness));
    rankings
}
