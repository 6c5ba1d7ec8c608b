#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pacing system that converts elapsed time into step commands.

use std::time::Duration;

use torus_life_core::{Command, Event};

/// Configuration parameters required to construct the stepper system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    step_interval: Duration,
    step_budget: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and generation
    /// budget.
    #[must_use]
    pub const fn new(step_interval: Duration, step_budget: u64) -> Self {
        Self {
            step_interval,
            step_budget,
        }
    }
}

/// Pure system that emits advance commands at a fixed cadence until its
/// generation budget runs out.
#[derive(Debug)]
pub struct Stepper {
    step_interval: Duration,
    accumulator: Duration,
    remaining: u64,
}

impl Stepper {
    /// Creates a new stepper system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            step_interval: config.step_interval,
            accumulator: Duration::ZERO,
            remaining: config.step_budget,
        }
    }

    /// Consumes events and elapsed time to emit advance commands.
    ///
    /// Observed [`Event::GenerationAdvanced`] values drain the budget;
    /// accumulated time beyond the configured interval emits one
    /// [`Command::Advance`] per full interval, never more than the remaining
    /// budget. A zero interval emits a single command per call.
    pub fn handle(&mut self, events: &[Event], dt: Duration, out: &mut Vec<Command>) {
        for event in events {
            if let Event::GenerationAdvanced { .. } = event {
                self.remaining = self.remaining.saturating_sub(1);
            }
        }

        if self.remaining == 0 {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.step_interval.is_zero() {
            out.push(Command::Advance);
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut emitted = 0;
        while self.accumulator >= self.step_interval && emitted < self.remaining {
            self.accumulator -= self.step_interval;
            emitted += 1;
            out.push(Command::Advance);
        }
    }

    /// Reports whether the generation budget is spent.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_nothing_below_the_interval() {
        let mut stepper = Stepper::new(Config::new(Duration::from_millis(100), 10));
        let mut commands = Vec::new();

        stepper.handle(&[], Duration::from_millis(60), &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn catches_up_over_multiple_intervals() {
        let mut stepper = Stepper::new(Config::new(Duration::from_millis(100), 10));
        let mut commands = Vec::new();

        stepper.handle(&[], Duration::from_millis(350), &mut commands);

        assert_eq!(commands, vec![Command::Advance; 3]);
    }

    #[test]
    fn never_emits_beyond_the_remaining_budget() {
        let mut stepper = Stepper::new(Config::new(Duration::from_millis(100), 2));
        let mut commands = Vec::new();

        stepper.handle(&[], Duration::from_secs(1), &mut commands);

        assert_eq!(commands, vec![Command::Advance; 2]);
    }

    #[test]
    fn generation_events_drain_the_budget() {
        let mut stepper = Stepper::new(Config::new(Duration::from_millis(100), 2));
        let mut commands = Vec::new();
        let advanced = Event::GenerationAdvanced {
            generation: 1,
            births: 0,
            deaths: 0,
        };

        stepper.handle(&[advanced, advanced], Duration::from_secs(1), &mut commands);

        assert!(commands.is_empty());
        assert!(stepper.is_exhausted());
    }

    #[test]
    fn zero_interval_emits_one_command_per_call() {
        let mut stepper = Stepper::new(Config::new(Duration::ZERO, 5));
        let mut commands = Vec::new();

        stepper.handle(&[], Duration::ZERO, &mut commands);
        stepper.handle(&[], Duration::ZERO, &mut commands);

        assert_eq!(commands, vec![Command::Advance; 2]);
    }

    #[test]
    fn non_generation_events_leave_the_budget_alone() {
        let mut stepper = Stepper::new(Config::new(Duration::from_millis(100), 1));
        let mut commands = Vec::new();
        let seeded = Event::Seeded {
            seed: 6666,
            alive: 50,
        };

        stepper.handle(&[seeded], Duration::from_millis(100), &mut commands);

        assert_eq!(commands, vec![Command::Advance]);
    }
}
