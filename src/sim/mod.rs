//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit time steps only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies
//!
//! Physics, timers and input are reached through the [`Physics`],
//! [`Scheduler`] and [`Input`] traits so hosts can supply their own.

pub mod clock;
pub mod combat;
pub mod input;
pub mod physics;
pub mod progression;
pub mod registry;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use clock::{Clock, Scheduler, TimerHandle, TimerTask};
pub use input::{Action, Input, TickInput};
pub use physics::{ArcadePhysics, Bounds, Overlap, Physics};
pub use registry::{Enemy, EntityId, Projectile, Registry, XpOrb};
pub use session::Session;
pub use state::{EnemyTemplate, GameEvent, GamePhase, GameState, Player, PlayerStats};
pub use tick::{run_timer_task, tick};
pub use upgrade::{CATALOG, UpgradeKey, UpgradeOption, UpgradeSelection};
