//! Enrichment engine: joins operators with their compatible weapons and
//! derives per-operator and per-weapon aggregate metrics.
//!
//! The join is a string membership test against each weapon's `operators`
//! back-reference. Enrichment is a pure function of the two input
//! collections; it holds no state and is recomputed wholesale whenever
//! either collection changes, never patched incrementally.

use rayon::prelude::*;
use serde::Serialize;

use crate::model::{Operator, Weapon};


/// Substituted for a missing `fireRate` when scoring weapon effectiveness.
/// Explicit so an absent field can never produce a NaN score.
pub const DEFAULT_FIRE_RATE: f64 = 500.0;

/// An operator plus metrics derived from its compatible-weapon subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedOperator {
    pub operator: Operator,
    /// Weapons whose back-reference lists this operator's name.
    pub weapons: Vec<Weapon>,
    /// Deduplicated weapon categories, in first-seen order.
    pub weapon_types: Vec<String>,
    pub weapon_count: usize,
    /// Mean damage over the subset, rounded to the nearest integer; 0 when
    /// the subset is empty.
    pub average_weapon_damage: u32,
    /// True when any compatible weapon lists exactly one operator.
    pub has_unique_weapon: bool,
}

/// A weapon plus its compatible-operator subset and effectiveness score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedWeapon {
    pub weapon: Weapon,
    /// Operators from the input collection that can equip this weapon.
    pub compatible_operators: Vec<Operator>,
    pub effectiveness_score: f64,
}

/// Score a weapon from its damage and fire rate.
///
/// `(damage/100 + fire_rate/1000) * 50`, with [`DEFAULT_FIRE_RATE`]
/// substituted when the source omits the fire rate.
pub fn weapon_effectiveness(damage: u16, fire_rate: Option<u16>) -> f64 {
    let rate = fire_rate.map(f64::from).unwrap_or(DEFAULT_FIRE_RATE);
    (f64::from(damage) / 100.0 + rate / 1000.0) * 50.0
}

/// Join every operator against the weapon collection.
///
/// Output order matches the input operator order. An empty weapon
/// collection yields operators with zero-valued derived fields.
pub fn enrich_operators(operators: &[Operator], weapons: &[Weapon]) -> Vec<EnrichedOperator> {
    operators
        .par_iter()
        .map(|operator| enrich_one(operator, weapons))
        .collect()
}

fn enrich_one(operator: &Operator, weapons: &[Weapon]) -> EnrichedOperator {
    let compatible: Vec<Weapon> = weapons
        .iter()
        .filter(|w| w.operators.iter().any(|name| name == &operator.name))
        .cloned()
        .collect();

    let mut weapon_types: Vec<String> = Vec::new();
    for weapon in &compatible {
        if !weapon_types.contains(&weapon.weapon_type) {
            weapon_types.push(weapon.weapon_type.clone());
        }
    }

    let weapon_count = compatible.len();
    let average_weapon_damage = if compatible.is_empty() {
        0
    } else {
        let total: u32 = compatible.iter().map(|w| u32::from(w.damage)).sum();
        (f64::from(total) / weapon_count as f64).round() as u32
    };
    let has_unique_weapon = compatible.iter().any(|w| w.operators.len() == 1);

    EnrichedOperator {
        operator: operator.clone(),
        weapons: compatible,
        weapon_types,
        weapon_count,
        average_weapon_damage,
        has_unique_weapon,
    }
}

/// Symmetric join: attach each weapon's compatible-operator subset and its
/// effectiveness score. Output order matches the input weapon order.
pub fn enrich_weapons(weapons: &[Weapon], operators: &[Operator]) -> Vec<EnrichedWeapon> {
    weapons
        .par_iter()
        .map(|weapon| {
            let compatible_operators: Vec<Operator> = operators
                .iter()
                .filter(|op| weapon.operators.iter().any(|name| name == &op.name))
                .cloned()
                .collect();

            EnrichedWeapon {
                effectiveness_score: weapon_effectiveness(weapon.damage, weapon.fire_rate),
                weapon: weapon.clone(),
                compatible_operators,
            }
        })
        .collect()
}
