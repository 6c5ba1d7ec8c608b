#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Torus Life.
//!
//! The world owns the toroidal grid and a seeded generator for Monte Carlo
//! draws. Adapters mutate it exclusively through [`apply`], which executes a
//! [`Command`] and broadcasts the resulting [`Event`] values; read access goes
//! through the [`query`] module.

mod grid;

pub use grid::{decide, next_state, Grid};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use torus_life_core::{Command, ConfigError, Event, UpdateRule};

/// Configuration required to construct a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    rows: u32,
    columns: u32,
    rule: UpdateRule,
    draw_seed: u64,
}

impl WorldConfig {
    /// Creates a new configuration with explicit dimensions.
    ///
    /// `draw_seed` seeds the world-owned stream used for Monte Carlo draws;
    /// two worlds built from equal configurations evolve identically.
    #[must_use]
    pub const fn new(rows: u32, columns: u32, rule: UpdateRule, draw_seed: u64) -> Self {
        Self {
            rows,
            columns,
            rule,
            draw_seed,
        }
    }

    /// Creates a configuration for a square grid.
    #[must_use]
    pub const fn square(dimension: u32, rule: UpdateRule, draw_seed: u64) -> Self {
        Self::new(dimension, dimension, rule, draw_seed)
    }
}

/// Represents the authoritative Torus Life world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    draws: ChaCha8Rng,
}

impl World {
    /// Creates a new world ready for simulation.
    ///
    /// Fails fast on invalid dimensions; no partial world is returned.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::new(config.rows, config.columns, config.rule)?,
            draws: ChaCha8Rng::seed_from_u64(config.draw_seed),
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Advance => {
            let summary = world.grid.advance(&mut world.draws);
            out_events.push(Event::GenerationAdvanced {
                generation: world.grid.generation(),
                births: summary.births,
                deaths: summary.deaths,
            });
        }
        Command::SeedRandom { seed } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let alive = world.grid.seed_random(&mut rng);
            out_events.push(Event::Seeded { seed, alive });
        }
        Command::KillAll => {
            world.grid.kill_all();
            out_events.push(Event::Cleared);
        }
        Command::ReviveAll => {
            world.grid.revive_all();
            out_events.push(Event::Revived);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use torus_life_core::{Cell, UpdateMode};

    /// Grid dimensions as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Number of generations advanced since construction.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.grid.generation()
    }

    /// Transition model the world advances under.
    #[must_use]
    pub fn mode(world: &World) -> UpdateMode {
        world.grid.mode()
    }

    /// Number of cells currently alive.
    #[must_use]
    pub fn alive_cells(world: &World) -> u32 {
        world.grid.alive_cells()
    }

    /// Captures a read-only view of the grid for rendering and inspection.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView { grid: &world.grid }
    }

    /// Read-only view into the toroidal grid.
    #[derive(Clone, Copy, Debug)]
    pub struct GridView<'a> {
        grid: &'a Grid,
    }

    impl GridView<'_> {
        /// Grid dimensions as `(rows, columns)`.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            self.grid.dimensions()
        }

        /// Reports whether the cell at the toroidal position `(i, j)` is
        /// alive.
        #[must_use]
        pub fn alive(&self, i: i64, j: i64) -> bool {
            self.grid.at(i, j).is_alive()
        }

        /// Row-major iterator over every cell.
        pub fn iter(&self) -> impl Iterator<Item = &Cell> {
            self.grid.cells()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torus_life_core::UpdateMode;

    fn deterministic_world(rows: u32, columns: u32) -> World {
        World::new(WorldConfig::new(
            rows,
            columns,
            UpdateRule::Deterministic,
            1,
        ))
        .expect("valid configuration")
    }

    #[test]
    fn new_world_starts_dead_at_generation_zero() {
        let world = deterministic_world(8, 6);
        assert_eq!(query::dimensions(&world), (8, 6));
        assert_eq!(query::generation(&world), 0);
        assert_eq!(query::alive_cells(&world), 0);
        assert_eq!(query::mode(&world), UpdateMode::Deterministic);
    }

    #[test]
    fn invalid_dimensions_surface_before_any_world_exists() {
        let result = World::new(WorldConfig::new(0, 6, UpdateRule::Deterministic, 1));
        assert!(result.is_err());
    }

    #[test]
    fn seed_command_reports_the_seed_and_alive_count() {
        let mut world = deterministic_world(10, 10);
        let mut events = Vec::new();

        apply(&mut world, Command::SeedRandom { seed: 6666 }, &mut events);

        match events.as_slice() {
            [Event::Seeded { seed, alive }] => {
                assert_eq!(*seed, 6666);
                assert_eq!(*alive, query::alive_cells(&world));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn seeding_is_deterministic_across_worlds() {
        let mut first = deterministic_world(12, 12);
        let mut second = deterministic_world(12, 12);
        let mut first_events = Vec::new();
        let mut second_events = Vec::new();

        apply(
            &mut first,
            Command::SeedRandom { seed: 99 },
            &mut first_events,
        );
        apply(
            &mut second,
            Command::SeedRandom { seed: 99 },
            &mut second_events,
        );

        assert_eq!(first_events, second_events);
        let first_view = query::grid_view(&first);
        let second_view = query::grid_view(&second);
        for (left, right) in first_view.iter().zip(second_view.iter()) {
            assert_eq!(left, right);
        }
    }

    #[test]
    fn advance_command_emits_a_generation_event() {
        let mut world = deterministic_world(5, 5);
        let mut events = Vec::new();

        apply(&mut world, Command::Advance, &mut events);
        apply(&mut world, Command::Advance, &mut events);

        assert_eq!(
            events,
            vec![
                Event::GenerationAdvanced {
                    generation: 1,
                    births: 0,
                    deaths: 0,
                },
                Event::GenerationAdvanced {
                    generation: 2,
                    births: 0,
                    deaths: 0,
                },
            ]
        );
    }

    #[test]
    fn kill_and_revive_commands_flip_the_whole_grid() {
        let mut world = deterministic_world(4, 4);
        let mut events = Vec::new();

        apply(&mut world, Command::ReviveAll, &mut events);
        assert_eq!(query::alive_cells(&world), 16);

        apply(&mut world, Command::KillAll, &mut events);
        assert_eq!(query::alive_cells(&world), 0);

        assert_eq!(events, vec![Event::Revived, Event::Cleared]);
    }

    #[test]
    fn grid_view_resolves_toroidal_lookups() {
        let mut world = deterministic_world(5, 5);
        let mut events = Vec::new();
        apply(&mut world, Command::ReviveAll, &mut events);

        let view = query::grid_view(&world);
        assert!(view.alive(-1, -1));
        assert!(view.alive(5, 5));
        assert_eq!(view.iter().count(), 25);
    }
}
