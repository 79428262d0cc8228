//! Player and team comparison scoring from ranked statistics.
//!
//! Scores are weighted composites on a 0-100 scale per player; teams get
//! an unbounded composite with a size handicap. Both paths fail fast when
//! the minimum ranked data is missing rather than scoring a zero-filled
//! profile, which would silently declare the data-poor side the loser.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SiegeError};
use crate::model::{PlayerRankedProfile, TeamMember};


/// Composite weights for the 1v1 score. They sum to 1.0 so the score stays
/// on a 0-100 scale.
const WEIGHT_MMR: f64 = 0.40;
const WEIGHT_KD: f64 = 0.30;
const WEIGHT_WIN_RATE: f64 = 0.20;
const WEIGHT_EXPERIENCE: f64 = 0.07;
const WEIGHT_CONSISTENCY: f64 = 0.03;

/// Score gap under which a 1v1 is declared a tie.
const TIE_MARGIN: f64 = 2.0;

/// Metrics derived from one ranked profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerMetrics {
    pub mmr: f64,
    /// Kills per death; raw kills when the player has zero deaths.
    pub kd: f64,
    /// Percentage of decided matches won, 0 with no matches played.
    pub win_rate: f64,
    pub matches: u32,
    /// 100 minus the abandon share, 0 with no matches played.
    pub consistency: f64,
}

impl PlayerMetrics {
    pub fn from_profile(profile: &PlayerRankedProfile) -> Self {
        let stats = &profile.season_statistics;
        let outcomes = &stats.match_outcomes;

        let kd = if stats.deaths > 0 {
            f64::from(stats.kills) / f64::from(stats.deaths)
        } else {
            f64::from(stats.kills)
        };

        let matches = outcomes.wins + outcomes.losses;
        let win_rate = if matches > 0 {
            f64::from(outcomes.wins) / f64::from(matches) * 100.0
        } else {
            0.0
        };
        let consistency = if matches > 0 {
            100.0 - f64::from(outcomes.abandons) / f64::from(matches) * 100.0
        } else {
            0.0
        };

        Self {
            mmr: f64::from(profile.rank_points),
            kd,
            win_rate,
            matches,
            consistency,
        }
    }
}

/// Outcome label for a 1v1 comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

/// Both players' raw values for one criterion, plus who leads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub player1: f64,
    pub player2: f64,
    /// "player1", "player2", or "equal".
    pub leader: String,
}

impl Factor {
    fn new(player1: f64, player2: f64) -> Self {
        let leader = if player1 > player2 {
            "player1"
        } else if player2 > player1 {
            "player2"
        } else {
            "equal"
        };
        Self {
            player1,
            player2,
            leader: leader.to_string(),
        }
    }
}

/// Result of a 1v1 comparison. Created fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonScore {
    pub player1_score: f64,
    pub player2_score: f64,
    pub winner: Winner,
    /// Win-probability estimate: 55-95 for a decided result, 50 for a tie.
    pub confidence: f64,
    pub factors: BTreeMap<String, Factor>,
}

/// The MMR component is deliberately asymmetric: the higher-rated player is
/// pinned at 100 and only the lower-rated player is penalized, with the
/// penalty tapering to zero at a 1000-point gap. Kept exactly as designed;
/// do not normalize.
fn mmr_components(mmr1: f64, mmr2: f64) -> (f64, f64) {
    let gap_penalty = (100.0 - (mmr1 - mmr2).abs() / 10.0).max(0.0);
    if mmr1 >= mmr2 {
        (100.0, gap_penalty)
    } else {
        (gap_penalty, 100.0)
    }
}

fn composite_score(metrics: &PlayerMetrics, mmr_component: f64) -> f64 {
    WEIGHT_MMR * mmr_component
        + WEIGHT_KD * (metrics.kd * 25.0).min(100.0)
        + WEIGHT_WIN_RATE * metrics.win_rate
        + WEIGHT_EXPERIENCE * (f64::from(metrics.matches) / 2.0).min(100.0)
        + WEIGHT_CONSISTENCY * metrics.consistency
}

/// Score a 1v1 from two ranked profiles.
///
/// Symmetric: swapping the arguments mirrors the winner label and yields
/// the same confidence, because the score gap is computed once from the
/// absolute difference.
pub fn compare_players(p1: &PlayerRankedProfile, p2: &PlayerRankedProfile) -> ComparisonScore {
    let m1 = PlayerMetrics::from_profile(p1);
    let m2 = PlayerMetrics::from_profile(p2);

    let (mmr_c1, mmr_c2) = mmr_components(m1.mmr, m2.mmr);
    let score1 = composite_score(&m1, mmr_c1);
    let score2 = composite_score(&m2, mmr_c2);

    let gap = (score1 - score2).abs();
    let (winner, confidence) = if gap < TIE_MARGIN {
        (Winner::Tie, 50.0)
    } else {
        let winner = if score1 > score2 {
            Winner::Player1
        } else {
            Winner::Player2
        };
        (winner, (50.0 + 0.8 * gap).clamp(55.0, 95.0))
    };

    let mut factors = BTreeMap::new();
    factors.insert("rank".to_string(), Factor::new(m1.mmr, m2.mmr));
    factors.insert("kd".to_string(), Factor::new(m1.kd, m2.kd));
    factors.insert("winRate".to_string(), Factor::new(m1.win_rate, m2.win_rate));
    factors.insert(
        "experience".to_string(),
        Factor::new(f64::from(m1.matches), f64::from(m2.matches)),
    );
    factors.insert(
        "consistency".to_string(),
        Factor::new(m1.consistency, m2.consistency),
    );

    ComparisonScore {
        player1_score: score1,
        player2_score: score2,
        winner,
        confidence,
        factors,
    }
}

/// Outcome label for a team comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamWinner {
    Team1,
    Team2,
    Tie,
}

/// Aggregated stats for one team.
///
/// Ranked averages cover only members with a ranked profile; level and
/// size cover everyone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub avg_mmr: f64,
    pub avg_kd: f64,
    /// Mean win rate as a fraction (0-1), not a percentage.
    pub avg_win_rate: f64,
    pub avg_level: f64,
    pub team_size: usize,
    pub ranked_members: usize,
}

/// Result of a team-vs-team comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparisonScore {
    /// Composite scores after the size handicap is applied.
    pub team1_score: f64,
    pub team2_score: f64,
    pub winner: TeamWinner,
    /// The winning side's share of the summed adjusted scores, as a
    /// percentage; 50 for a tie.
    pub win_probability: f64,
    pub team1_stats: TeamStats,
    pub team2_stats: TeamStats,
}

fn team_stats(members: &[TeamMember]) -> TeamStats {
    let team_size = members.len();
    let avg_level = if team_size > 0 {
        members.iter().map(|m| f64::from(m.level)).sum::<f64>() / team_size as f64
    } else {
        0.0
    };

    let ranked: Vec<PlayerMetrics> = members
        .iter()
        .filter_map(|m| m.ranked.as_ref())
        .map(PlayerMetrics::from_profile)
        .collect();
    let ranked_members = ranked.len();

    let (avg_mmr, avg_kd, avg_win_rate) = if ranked_members > 0 {
        let n = ranked_members as f64;
        (
            ranked.iter().map(|m| m.mmr).sum::<f64>() / n,
            ranked.iter().map(|m| m.kd).sum::<f64>() / n,
            ranked.iter().map(|m| m.win_rate / 100.0).sum::<f64>() / n,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    TeamStats {
        avg_mmr,
        avg_kd,
        avg_win_rate,
        avg_level,
        team_size,
        ranked_members,
    }
}

/// Raw team composite, before any size handicap.
pub fn team_score(stats: &TeamStats) -> f64 {
    0.40 * stats.avg_mmr
        + 0.30 * stats.avg_kd * 1000.0
        + 0.20 * stats.avg_win_rate * 5000.0
        + 0.07 * stats.avg_level
        + 0.03 * stats.team_size as f64 * 500.0
}

/// Score a team-vs-team comparison.
///
/// When the team sizes differ, the larger team's score is multiplied by
/// `sqrt(smaller/larger)` before comparison: a deliberate handicap so a
/// numerical advantage alone does not decide the outcome. Fails with
/// `InsufficientData` unless both teams have at least one ranked member.
pub fn compare_teams(team1: &[TeamMember], team2: &[TeamMember]) -> Result<TeamComparisonScore> {
    let stats1 = team_stats(team1);
    let stats2 = team_stats(team2);

    if stats1.ranked_members == 0 {
        return Err(SiegeError::InsufficientData {
            message: "team 1 has no ranked members".to_string(),
        });
    }
    if stats2.ranked_members == 0 {
        return Err(SiegeError::InsufficientData {
            message: "team 2 has no ranked members".to_string(),
        });
    }

    let mut score1 = team_score(&stats1);
    let mut score2 = team_score(&stats2);

    if stats1.team_size != stats2.team_size {
        let smaller = stats1.team_size.min(stats2.team_size) as f64;
        let larger = stats1.team_size.max(stats2.team_size) as f64;
        let handicap = (smaller / larger).sqrt();
        if stats1.team_size > stats2.team_size {
            score1 *= handicap;
        } else {
            score2 *= handicap;
        }
    }

    let total = score1 + score2;
    let (winner, win_probability) = if score1 == score2 || total == 0.0 {
        (TeamWinner::Tie, 50.0)
    } else if score1 > score2 {
        (TeamWinner::Team1, score1 / total * 100.0)
    } else {
        (TeamWinner::Team2, score2 / total * 100.0)
    };

    Ok(TeamComparisonScore {
        team1_score: score1,
        team2_score: score2,
        winner,
        win_probability,
        team1_stats: stats1,
        team2_stats: stats2,
    })
}
