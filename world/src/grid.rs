//! Toroidal cell grid and the generation-advance algorithm.

use rand::Rng;
use torus_life_core::{
    Axis, Cell, CellCoord, ConfigError, LifeBucket, StepSummary, TransitionTable, UpdateMode,
    UpdateRule,
};

/// Fixed-size rectangular collection of cells with periodic boundaries.
///
/// Dimensions and cell coordinates are immutable after construction; only the
/// alive flags mutate, one generation at a time. The grid keeps a scratch
/// buffer of next-generation alive flags so each advance reuses the same
/// allocation instead of copying the whole cell matrix.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
    next: Vec<bool>,
    rule: UpdateRule,
    generation: u64,
}

impl Grid {
    /// Creates a grid of `rows` x `columns` dead cells governed by `rule`.
    ///
    /// Both dimensions must be at least 1; construction fails fast otherwise
    /// and no partial grid is returned.
    pub fn new(rows: u32, columns: u32, rule: UpdateRule) -> Result<Self, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::InvalidDimension { axis: Axis::Rows });
        }
        if columns == 0 {
            return Err(ConfigError::InvalidDimension {
                axis: Axis::Columns,
            });
        }

        let capacity = rows as usize * columns as usize;
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::dead_at(CellCoord::new(row, column)));
            }
        }

        Ok(Self {
            rows,
            columns,
            cells,
            next: vec![false; capacity],
            rule,
            generation: 0,
        })
    }

    /// Grid dimensions as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Transition model the grid advances under.
    #[must_use]
    pub const fn mode(&self) -> UpdateMode {
        self.rule.mode()
    }

    /// Number of generations advanced since construction.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Number of cells currently alive.
    #[must_use]
    pub fn alive_cells(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_alive()).count() as u32
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cell at the toroidal position `(i, j)`.
    ///
    /// Indices are reduced modulo the dimensions, so negative and overflowing
    /// values wrap around: `at(-1, 0)` is the last row, `at(rows, 0)` the
    /// first. The torus has no distinguished edge.
    #[must_use]
    pub fn at(&self, i: i64, j: i64) -> &Cell {
        let coord = self.wrap(i, j);
        &self.cells[self.index(coord)]
    }

    /// Coordinates of the 8 neighbors of `coord`, each wrapped toroidally.
    ///
    /// With a dimension below 3 the wrap makes some of the 8 positions
    /// coincide; that degenerate behavior is left as-is because the driving
    /// configuration enforces a minimum dimension of 3.
    #[must_use]
    pub fn neighbor_coords(&self, coord: CellCoord) -> [CellCoord; 8] {
        let mut neighbors = [coord; 8];
        let mut slot = 0;
        for di in -1..=1_i64 {
            for dj in -1..=1_i64 {
                if di == 0 && dj == 0 {
                    continue;
                }
                neighbors[slot] = self.wrap(
                    i64::from(coord.row()) + di,
                    i64::from(coord.column()) + dj,
                );
                slot += 1;
            }
        }
        neighbors
    }

    /// The 8 neighboring cells of `coord`, resolved through the toroidal wrap.
    #[must_use]
    pub fn neighbors_of(&self, coord: CellCoord) -> [&Cell; 8] {
        self.neighbor_coords(coord)
            .map(|neighbor| &self.cells[self.index(neighbor)])
    }

    /// Number of alive cells among the 8 neighbors of `coord`.
    #[must_use]
    pub fn alive_neighbors(&self, coord: CellCoord) -> u8 {
        Self::alive_count(&self.neighbors_of(coord))
    }

    /// Number of alive cells in a caller-supplied neighbor list.
    ///
    /// Produces the same result as [`Grid::alive_neighbors`] when handed the
    /// output of [`Grid::neighbors_of`] for the same cell.
    #[must_use]
    pub fn alive_count(neighbors: &[&Cell; 8]) -> u8 {
        neighbors.iter().filter(|cell| cell.is_alive()).count() as u8
    }

    /// Resolves the transition bucket for a neighbor count under the grid's
    /// rule.
    ///
    /// Under the Monte Carlo rule this performs a fresh weighted draw on every
    /// call; it is a command, not an idempotent query.
    pub fn classify_count<R: Rng>(&self, count: u8, rng: &mut R) -> LifeBucket {
        match &self.rule {
            UpdateRule::Deterministic => LifeBucket::classify(count),
            UpdateRule::MonteCarlo(table) => decide(table, count, rng),
        }
    }

    /// Resolves the transition bucket for the cell at `coord`.
    pub fn classify_cell<R: Rng>(&self, coord: CellCoord, rng: &mut R) -> LifeBucket {
        self.classify_count(self.alive_neighbors(coord), rng)
    }

    /// Computes the next alive flag for the cell at `coord` against the
    /// current generation, without mutating anything.
    pub fn next_state_of<R: Rng>(&self, coord: CellCoord, rng: &mut R) -> bool {
        let alive = self
            .at(i64::from(coord.row()), i64::from(coord.column()))
            .is_alive();
        next_state(alive, self.classify_cell(coord, rng))
    }

    /// Advances the whole grid by one generation.
    ///
    /// Two passes: the first classifies every cell against the frozen current
    /// generation and records the next alive flags into the scratch buffer
    /// (Monte Carlo draws happen here, once per cell); the second writes the
    /// buffered flags back. No cell ever observes a neighbor's
    /// already-updated state, and the grid is never left partially updated.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> StepSummary {
        for index in 0..self.cells.len() {
            let coord = self.cells[index].coord();
            let target = self.next_state_of(coord, rng);
            self.next[index] = target;
        }

        let mut summary = StepSummary::default();
        let next = &self.next;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let target = next[index];
            if target == cell.is_alive() {
                continue;
            }
            if target {
                cell.birth();
                summary.births += 1;
            } else {
                cell.death();
                summary.deaths += 1;
            }
        }

        self.generation = self.generation.saturating_add(1);
        summary
    }

    /// Sets every cell independently alive or dead with probability 1/2.
    ///
    /// Returns the number of cells left alive. The generator is supplied by
    /// the caller, so the same seeded stream reproduces the same
    /// configuration.
    pub fn seed_random<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let mut alive = 0;
        for cell in &mut self.cells {
            if rng.gen::<bool>() {
                cell.birth();
                alive += 1;
            } else {
                cell.death();
            }
        }
        alive
    }

    /// Sets every cell dead.
    pub fn kill_all(&mut self) {
        for cell in &mut self.cells {
            cell.death();
        }
    }

    /// Sets every cell alive.
    pub fn revive_all(&mut self) {
        for cell in &mut self.cells {
            cell.birth();
        }
    }

    /// Sets the alive flag of the cell at the toroidal position `(i, j)`.
    pub fn set_alive(&mut self, i: i64, j: i64, alive: bool) {
        let coord = self.wrap(i, j);
        let index = self.index(coord);
        if alive {
            self.cells[index].birth();
        } else {
            self.cells[index].death();
        }
    }

    fn wrap(&self, i: i64, j: i64) -> CellCoord {
        CellCoord::new(
            wrap_index(i, self.rows),
            wrap_index(j, self.columns),
        )
    }

    fn index(&self, coord: CellCoord) -> usize {
        coord.row() as usize * self.columns as usize + coord.column() as usize
    }
}

/// Reduces an index modulo a grid extent, mapping into `0..extent`.
fn wrap_index(value: i64, extent: u32) -> u32 {
    value.rem_euclid(i64::from(extent)) as u32
}

/// Resolves the Monte Carlo bucket for a neighbor count.
///
/// Negative entries roll their magnitude as a birth probability, positive
/// entries roll a death probability, and zero is always stable. Each call
/// performs one fresh draw from `rng`.
pub fn decide<R: Rng>(table: &TransitionTable, count: u8, rng: &mut R) -> LifeBucket {
    let probability = table.probability(count);
    if probability < 0.0 {
        if roll(-probability, rng) {
            LifeBucket::Reproducing
        } else {
            LifeBucket::Stable
        }
    } else if roll(probability, rng) {
        LifeBucket::Starving
    } else {
        LifeBucket::Stable
    }
}

/// Weighted coin flip: samples uniformly from `[0, 1)` and triggers iff the
/// sample falls below `probability`. A probability of 0 never triggers and a
/// probability of 1 always does; the boundaries are exact, not approximate.
fn roll<R: Rng>(probability: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < probability
}

/// Combines current liveness with a transition bucket into the next state.
///
/// A live cell dies when starving or crowded, a dead cell is born when
/// reproducing, and every other combination carries the current liveness
/// forward. The rule is identical in both transition models; only the bucket
/// resolution differs.
#[must_use]
pub const fn next_state(alive: bool, bucket: LifeBucket) -> bool {
    match (alive, bucket) {
        (true, LifeBucket::Starving | LifeBucket::Crowded) => false,
        (false, LifeBucket::Reproducing) => true,
        (alive, _) => alive,
    }
}
