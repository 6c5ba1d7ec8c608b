#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Torus Life simulation.

mod args;
mod presenter;

use std::{io, thread, time::Duration};

use anyhow::Result;
use clap::Parser;
use torus_life_core::{Command, TransitionTable, UpdateRule, WELCOME_BANNER};
use torus_life_rendering::{FramePresenter, Scene};
use torus_life_system_stepper::{Config as StepperConfig, Stepper};
use torus_life_world::{self as world, query, World, WorldConfig};

use crate::presenter::AnsiPresenter;

/// Entry point for the Torus Life command-line interface.
fn main() -> Result<()> {
    let args = args::validate(args::Args::parse())?;

    let rule = if args.monte_carlo {
        UpdateRule::MonteCarlo(TransitionTable::classic())
    } else {
        UpdateRule::Deterministic
    };
    let mut world = World::new(WorldConfig::square(args.dim, rule, args.seed))?;

    println!("{WELCOME_BANNER}");
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SeedRandom { seed: args.seed },
        &mut events,
    );

    let wait = Duration::from_secs_f64(args.wait);
    let mut stepper = Stepper::new(StepperConfig::new(wait, args.steps));
    let mut presenter = AnsiPresenter::new(io::stdout().lock());
    presenter.clear()?;
    presenter.present(&build_scene(&world)?)?;

    while !stepper.is_exhausted() {
        thread::sleep(wait);

        let mut commands = Vec::new();
        stepper.handle(&events, wait, &mut commands);
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }

        presenter.present(&build_scene(&world)?)?;
    }

    Ok(())
}

fn build_scene(world: &World) -> Result<Scene> {
    let (rows, columns) = query::dimensions(world);
    let view = query::grid_view(world);
    let scene = Scene::from_cells(rows, columns, query::generation(world), view.iter())?;
    Ok(scene)
}
