#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Torus Life engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. It also holds the simulation vocabulary: cells
//! and their coordinates, the closed set of transition buckets, and the
//! signed-probability table that drives the Monte Carlo rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the simulation boots.
pub const WELCOME_BANNER: &str = "Welcome to Torus Life.";

/// Number of neighbor-count buckets on a two-dimensional grid (counts 0..=8).
const BUCKET_COUNT: usize = 9;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advances the grid by exactly one generation.
    Advance,
    /// Re-seeds every cell independently with a fair coin flip.
    SeedRandom {
        /// Seed for the generator backing the coin flips.
        seed: u64,
    },
    /// Sets every cell dead.
    KillAll,
    /// Sets every cell alive.
    ReviveAll,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the grid advanced by one generation.
    GenerationAdvanced {
        /// Generation index reached by the advance.
        generation: u64,
        /// Number of cells that switched from dead to alive.
        births: u32,
        /// Number of cells that switched from alive to dead.
        deaths: u32,
    },
    /// Confirms that the grid was re-seeded.
    Seeded {
        /// Seed that produced the configuration.
        seed: u64,
        /// Number of cells left alive by the seeding.
        alive: u32,
    },
    /// Confirms that every cell was set dead.
    Cleared,
    /// Confirms that every cell was set alive.
    Revived,
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Smallest unit of simulation state: an alive flag anchored at a coordinate.
///
/// The coordinate is fixed at creation and never changes; only the alive flag
/// mutates, once per generation, through the grid's update algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    coord: CellCoord,
    alive: bool,
}

impl Cell {
    /// Creates a dead cell anchored at the provided coordinate.
    #[must_use]
    pub const fn dead_at(coord: CellCoord) -> Self {
        Self {
            coord,
            alive: false,
        }
    }

    /// Sets the cell alive.
    pub fn birth(&mut self) {
        self.alive = true;
    }

    /// Sets the cell dead.
    pub fn death(&mut self) {
        self.alive = false;
    }

    /// Reports whether the cell is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Reports whether the cell is dead.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Immutable coordinate the cell occupies.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Copies the alive flag from `other`, leaving own coordinates untouched.
    pub fn clone_state_from(&mut self, other: &Cell) {
        self.alive = other.alive;
    }
}

/// Transition model applied when the grid advances a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Classic deterministic rule: fixed neighbor-count buckets.
    Deterministic,
    /// Stochastic rule: neighbor counts map to birth or death probabilities.
    MonteCarlo,
}

/// Update rule selected at grid construction.
///
/// The Monte Carlo variant carries its transition table, so requesting the
/// stochastic rule without a table cannot be expressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UpdateRule {
    /// Classic deterministic rule.
    Deterministic,
    /// Stochastic rule driven by the embedded transition table.
    MonteCarlo(TransitionTable),
}

impl UpdateRule {
    /// Queryable tag of the rule.
    #[must_use]
    pub const fn mode(&self) -> UpdateMode {
        match self {
            Self::Deterministic => UpdateMode::Deterministic,
            Self::MonteCarlo(_) => UpdateMode::MonteCarlo,
        }
    }
}

/// Named transition bucket a cell's neighbor count resolves to.
///
/// The set is closed: every neighbor count resolves to exactly one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeBucket {
    /// Too few neighbors; a live cell dies.
    Starving,
    /// No pressure either way; the cell keeps its state.
    Stable,
    /// Exactly the right crowd; a dead cell is born.
    Reproducing,
    /// Too many neighbors; a live cell dies.
    Crowded,
}

impl LifeBucket {
    /// Classifies a neighbor count under the deterministic rule.
    ///
    /// Counts 0 and 1 starve, 2 is stable, 3 reproduces, and everything above
    /// crowds. The buckets partition 0..=8 with no overlap and no gaps, which
    /// reproduces the standard rule: a live cell survives with 2 or 3
    /// neighbors, a dead cell is born with exactly 3. Counts above 8 cannot
    /// arise from a two-dimensional neighborhood.
    #[must_use]
    pub const fn classify(count: u8) -> Self {
        match count {
            0 | 1 => Self::Starving,
            2 => Self::Stable,
            3 => Self::Reproducing,
            _ => Self::Crowded,
        }
    }
}

/// Mapping from neighbor count to a signed transition probability.
///
/// Entries lie in `[-1.0, 1.0]`: negative magnitudes are birth probabilities,
/// positive values are death probabilities, and zero leaves the cell alone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    entries: [f64; BUCKET_COUNT],
}

impl TransitionTable {
    /// Validates and wraps a full table of signed probabilities.
    ///
    /// Every neighbor count 0..=8 must have an entry within `[-1.0, 1.0]`;
    /// the first offending entry is reported and no table is produced.
    pub fn from_entries(entries: [f64; BUCKET_COUNT]) -> Result<Self, ConfigError> {
        for (count, &value) in entries.iter().enumerate() {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::EntryOutOfRange {
                    count: count as u8,
                    value,
                });
            }
        }
        Ok(Self { entries })
    }

    /// The table the simulator ships: starvation and crowding always kill,
    /// three neighbors always reproduce, two neighbors never act.
    ///
    /// Because every entry is 0 or ±1, driving this table through the Monte
    /// Carlo path replays the deterministic rule exactly.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            entries: [1.0, 1.0, 0.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Signed probability stored for the provided neighbor count.
    ///
    /// Counts above 8 cannot arise from a two-dimensional neighborhood and
    /// saturate to the final entry.
    #[must_use]
    pub fn probability(&self, count: u8) -> f64 {
        self.entries[usize::from(count.min(8))]
    }
}

/// Outcome of a single generation advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepSummary {
    /// Number of cells that switched from dead to alive.
    pub births: u32,
    /// Number of cells that switched from alive to dead.
    pub deaths: u32,
}

/// Grid axis named in dimension errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Vertical extent of the grid.
    Rows,
    /// Horizontal extent of the grid.
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("rows"),
            Self::Columns => f.write_str("columns"),
        }
    }
}

/// Errors surfaced while constructing a grid or its transition table.
///
/// All of these are fatal at construction: no partial grid is ever returned.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Error)]
pub enum ConfigError {
    /// A grid dimension was zero.
    #[error("grid {axis} must be at least 1")]
    InvalidDimension {
        /// Axis that failed validation.
        axis: Axis,
    },
    /// A transition table entry fell outside the signed probability range.
    #[error("transition entry for {count} neighbors must lie in [-1.0, 1.0] (received {value})")]
    EntryOutOfRange {
        /// Neighbor count whose entry failed validation.
        count: u8,
        /// Offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        Axis, Cell, CellCoord, ConfigError, LifeBucket, TransitionTable, UpdateMode, UpdateRule,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 3));
    }

    #[test]
    fn update_rule_round_trips_through_bincode() {
        assert_round_trip(&UpdateRule::Deterministic);
        assert_round_trip(&UpdateRule::MonteCarlo(TransitionTable::classic()));
    }

    #[test]
    fn config_error_round_trips_through_bincode() {
        assert_round_trip(&ConfigError::InvalidDimension { axis: Axis::Rows });
    }

    #[test]
    fn cell_birth_and_death_toggle_liveness() {
        let mut cell = Cell::dead_at(CellCoord::new(1, 1));
        assert!(cell.is_dead());
        assert!(!cell.is_alive());

        cell.birth();
        assert!(cell.is_alive());
        assert!(!cell.is_dead());

        cell.death();
        assert!(cell.is_dead());
    }

    #[test]
    fn clone_state_copies_only_the_alive_flag() {
        let mut target = Cell::dead_at(CellCoord::new(0, 0));
        let mut source = Cell::dead_at(CellCoord::new(5, 9));
        source.birth();

        target.clone_state_from(&source);

        assert!(target.is_alive());
        assert_eq!(target.coord(), CellCoord::new(0, 0));
    }

    #[test]
    fn deterministic_buckets_partition_all_counts() {
        let expected = [
            LifeBucket::Starving,
            LifeBucket::Starving,
            LifeBucket::Stable,
            LifeBucket::Reproducing,
            LifeBucket::Crowded,
            LifeBucket::Crowded,
            LifeBucket::Crowded,
            LifeBucket::Crowded,
            LifeBucket::Crowded,
        ];
        for (count, bucket) in expected.iter().enumerate() {
            assert_eq!(LifeBucket::classify(count as u8), *bucket);
        }
    }

    #[test]
    fn classic_table_matches_shipped_probabilities() {
        let table = TransitionTable::classic();
        assert_eq!(table.probability(0), 1.0);
        assert_eq!(table.probability(1), 1.0);
        assert_eq!(table.probability(2), 0.0);
        assert_eq!(table.probability(3), -1.0);
        for count in 4..=8 {
            assert_eq!(table.probability(count), 1.0);
        }
    }

    #[test]
    fn table_rejects_entries_outside_the_signed_range() {
        let mut entries = [0.0; 9];
        entries[5] = 1.5;
        assert_eq!(
            TransitionTable::from_entries(entries),
            Err(ConfigError::EntryOutOfRange {
                count: 5,
                value: 1.5
            })
        );

        entries[5] = f64::NAN;
        assert!(TransitionTable::from_entries(entries).is_err());
    }

    #[test]
    fn rule_reports_its_mode() {
        assert_eq!(UpdateRule::Deterministic.mode(), UpdateMode::Deterministic);
        assert_eq!(
            UpdateRule::MonteCarlo(TransitionTable::classic()).mode(),
            UpdateMode::MonteCarlo
        );
    }
}
