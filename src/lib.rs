//! Rainbow Six Siege Stats Library
//!
//! A Rust library backing a Siege stats web front end: it loads operator,
//! weapon, and map reference data from a third-party source, joins the
//! collections into an enriched model, filters and sorts it for browsing,
//! derives synergy recommendations, and scores 1v1 and team-vs-team
//! comparisons from ranked statistics.
//!
//! ## Features
//!
//! - **Reference Data Access**: Cached fetching of operators, weapons, and maps
//! - **Enrichment**: Operator/weapon join with derived aggregate metrics
//! - **Filtering & Sorting**: Multi-field criteria and stable selectable ordering
//! - **Synergy Analysis**: Best loadouts, per-map picks, weapon rankings
//! - **Comparison Scoring**: Weighted 1v1 and team composite scores with
//!   win-probability estimates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use siege_stats::{SiegeClient, enrich::enrich_operators};
//!
//! # async fn example() -> siege_stats::Result<()> {
//! let client = SiegeClient::new()?;
//! let operators = client.load_operators().await?;
//! let weapons = client.load_weapons().await?;
//!
//! let enriched = enrich_operators(&operators, &weapons);
//! for op in enriched.iter().take(5) {
//!     println!("{}: {} weapons", op.operator.name, op.weapon_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set an API token if your data source requires one:
//! ```bash
//! export SIEGE_STATS_TOKEN=abc123
//! ```

pub mod api;
pub mod compare;
pub mod core;
pub mod enrich;
pub mod error;
pub mod filters;
pub mod model;
pub mod synergy;

// Re-export commonly used types
pub use api::SiegeClient;
pub use compare::{compare_players, compare_teams, ComparisonScore, TeamComparisonScore};
pub use enrich::{EnrichedOperator, EnrichedWeapon};
pub use error::{Result, SiegeError};
pub use model::{Map, Operator, PlayerRankedProfile, Side, Weapon};

pub const TOKEN_ENV_VAR: &str = "SIEGE_STATS_TOKEN";
