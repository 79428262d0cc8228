//! Serde models for the reference-data and player-stats sources.
//!
//! Field names follow the wire format of the third-party APIs; only the
//! fields the library consumes are modeled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SiegeError;

#[cfg(test)]
mod tests;

/// Which side of the siege an operator plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Attacker,
    Defender,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

impl FromStr for Side {
    type Err = SiegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attacker" | "atk" => Ok(Side::Attacker),
            "defender" | "def" => Ok(Side::Defender),
            other => Err(SiegeError::NotFound {
                name: format!("side '{}'", other),
            }),
        }
    }
}

/// Operator reference entity. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Operator {
    pub name: String,
    #[serde(default)]
    pub safename: String,
    #[serde(default)]
    pub realname: String,
    pub side: Side,
    pub health: u16,
    /// Ordinal 1-3.
    pub speed: u8,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub birthplace: String,
    #[serde(rename = "season_introduced", default)]
    pub season_introduced: String,
}

/// Weapon reference entity.
///
/// `operators` is a denormalized back-reference: a list of operator names
/// that can equip this weapon. Joining against it is a string membership
/// test, not an object-graph link.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub damage: u16,
    #[serde(rename = "fireRate", default)]
    pub fire_rate: Option<u16>,
    #[serde(default)]
    pub mobility: Option<u16>,
    /// Primary / Secondary / Gadget.
    #[serde(default)]
    pub class: String,
    /// ATK / DEF association, when the source provides one.
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub operators: Vec<String>,
    #[serde(rename = "availableFor", default)]
    pub available_for: Option<Vec<String>>,
}

/// Map reference entity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Map {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "releaseDate", default)]
    pub release_date: String,
    /// Comma-joined playlist tags.
    #[serde(default)]
    pub playlists: String,
    #[serde(rename = "mapReworked", default)]
    pub map_reworked: Option<String>,
}

/// Win/loss/abandon counts for a ranked season.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MatchOutcomes {
    pub wins: u32,
    pub losses: u32,
    pub abandons: u32,
}

/// Per-season kill/death and match counts.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SeasonStatistics {
    pub kills: u32,
    pub deaths: u32,
    pub match_outcomes: MatchOutcomes,
}

/// A player's ranked profile snapshot, as returned by the stats source.
///
/// Treated as immutable per query; one comparison consumes one snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerRankedProfile {
    /// Ordinal rank tier, 0 (unranked) through 36 (Champion).
    pub rank: u8,
    /// Matchmaking rating points.
    pub rank_points: i32,
    #[serde(default)]
    pub max_rank: u8,
    #[serde(default)]
    pub max_rank_points: i32,
    pub season_statistics: SeasonStatistics,
}

/// One member of a team being compared. Members without a ranked profile
/// still count toward team size and level averages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub ranked: Option<PlayerRankedProfile>,
}

/// Platform identifier for the player-stats source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Uplay,
    Psn,
    Xbl,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Uplay => write!(f, "uplay"),
            Platform::Psn => write!(f, "psn"),
            Platform::Xbl => write!(f, "xbl"),
        }
    }
}

/// Stat board the ranked profile is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Ranked,
    Casual,
    Event,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Board::Ranked => write!(f, "ranked"),
            Board::Casual => write!(f, "casual"),
            Board::Event => write!(f, "event"),
        }
    }
}
