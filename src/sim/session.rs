//! Session driver
//!
//! Owns the state and its collaborators for one run and sequences them:
//! due timer tasks first, then the tick. Frames of any length are split into
//! fixed substeps.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Clock;
use super::combat;
use super::input::{Input, TickInput};
use super::physics::{ArcadePhysics, Physics};
use super::spawn;
use super::state::GameState;
use super::tick::{run_timer_task, tick};
use crate::config::Tuning;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::hud::Hud;
use crate::secs_to_ms;

/// One play session from start to death (or shutdown)
pub struct Session<P: Physics = ArcadePhysics> {
    pub state: GameState,
    pub clock: Clock,
    pub physics: P,
    rng: Pcg32,
    seed: u64,
    accumulator: f32,
}

impl Session<ArcadePhysics> {
    /// Start a session with the built-in physics
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_physics(seed, tuning, ArcadePhysics::new())
    }
}

impl<P: Physics> Session<P> {
    /// Start a session with a caller-provided physics collaborator
    pub fn with_physics(seed: u64, tuning: Tuning, physics: P) -> Self {
        let mut state = GameState::new(tuning);
        let mut clock = Clock::new();
        spawn::start_spawning(&mut state, &mut clock);
        combat::schedule_auto_fire(&mut state, &mut clock);
        log::info!("Session started with seed {}", seed);

        Self {
            state,
            clock,
            physics,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            accumulator: 0.0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance one fixed step of `dt` seconds
    pub fn step(&mut self, input: &dyn Input, dt: f32) {
        for (handle, task) in self.clock.advance(secs_to_ms(dt)) {
            run_timer_task(&mut self.state, handle, task, &mut self.rng);
        }
        tick(
            &mut self.state,
            input,
            dt,
            &mut self.physics,
            &mut self.clock,
            &mut self.rng,
        );
    }

    /// Run as many fixed steps as `frame_dt` covers.
    /// One-shot presses are cleared after the first step that sees them.
    pub fn advance(&mut self, input: &mut TickInput, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&*input, SIM_DT);
            input.clear_pressed();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Presentation readback
    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }
}
