//! Upgrade catalog and the selection state machine
//!
//! A level-up opens an episode: simulation time freezes, three distinct
//! upgrades are drawn from [`CATALOG`], the player moves a cursor and confirms.
//! Confirming applies the upgrade and either opens the next queued episode or
//! unfreezes the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::Scheduler;
use super::combat;
use super::input::{Action, Input};
use super::physics::Physics;
use super::state::{EnemyTemplate, GameEvent, GameState, PlayerStats};
use crate::config::Tuning;
use crate::consts::UPGRADE_CHOICES;

/// Identity of an upgrade in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKey {
    MoveSpeed,
    MaxHp,
    Heal,
    Damage,
    FireRate,
    XpMultiplier,
    EnemySlow,
    EnemyBounty,
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeOption {
    pub key: UpgradeKey,
    pub label: &'static str,
}

/// Fixed, ordered upgrade catalog
pub static CATALOG: [UpgradeOption; 8] = [
    UpgradeOption {
        key: UpgradeKey::MoveSpeed,
        label: "Move Speed +20",
    },
    UpgradeOption {
        key: UpgradeKey::MaxHp,
        label: "Max HP +20",
    },
    UpgradeOption {
        key: UpgradeKey::Heal,
        label: "Heal 30 HP",
    },
    UpgradeOption {
        key: UpgradeKey::Damage,
        label: "Damage +5",
    },
    UpgradeOption {
        key: UpgradeKey::FireRate,
        label: "Fire Rate +15%",
    },
    UpgradeOption {
        key: UpgradeKey::XpMultiplier,
        label: "XP Gain +1x",
    },
    UpgradeOption {
        key: UpgradeKey::EnemySlow,
        label: "Enemies 10% Slower",
    },
    UpgradeOption {
        key: UpgradeKey::EnemyBounty,
        label: "Enemy XP +5",
    },
];

impl UpgradeKey {
    /// Catalog entry for this key
    pub fn option(self) -> &'static UpgradeOption {
        CATALOG
            .iter()
            .find(|o| o.key == self)
            .unwrap_or(&CATALOG[0])
    }

    pub fn label(self) -> &'static str {
        self.option().label
    }

    /// Apply the upgrade's effect. Floors and clamps come from `tuning`.
    pub fn apply(self, stats: &mut PlayerStats, enemy: &mut EnemyTemplate, tuning: &Tuning) {
        match self {
            UpgradeKey::MoveSpeed => stats.move_speed += 20.0,
            UpgradeKey::MaxHp => {
                stats.max_hp = stats.max_hp.saturating_add(20);
                stats.set_hp(stats.hp.saturating_add(20));
            }
            UpgradeKey::Heal => stats.set_hp(stats.hp.saturating_add(30)),
            UpgradeKey::Damage => stats.damage = stats.damage.saturating_add(5),
            UpgradeKey::FireRate => {
                let floor = tuning.player.min_fire_rate_ms;
                stats.fire_rate_ms = (stats.fire_rate_ms * 0.85).max(floor);
            }
            UpgradeKey::XpMultiplier => {
                stats.xp_multiplier = stats.xp_multiplier.saturating_add(1).max(1);
            }
            UpgradeKey::EnemySlow => {
                enemy.move_speed = (enemy.move_speed * 0.9).max(tuning.enemy.min_move_speed);
            }
            UpgradeKey::EnemyBounty => enemy.xp_value = enemy.xp_value.saturating_add(5),
        }
    }
}

/// Upgrade selection state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpgradeSelection {
    #[default]
    Inactive,
    Presenting {
        options: [UpgradeKey; UPGRADE_CHOICES],
        cursor: usize,
    },
}

impl UpgradeSelection {
    pub fn is_active(&self) -> bool {
        matches!(self, UpgradeSelection::Presenting { .. })
    }

    pub fn options(&self) -> Option<&[UpgradeKey; UPGRADE_CHOICES]> {
        match self {
            UpgradeSelection::Presenting { options, .. } => Some(options),
            UpgradeSelection::Inactive => None,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            UpgradeSelection::Presenting { cursor, .. } => Some(*cursor),
            UpgradeSelection::Inactive => None,
        }
    }

    /// Option under the cursor
    pub fn selected(&self) -> Option<UpgradeKey> {
        match self {
            UpgradeSelection::Presenting { options, cursor } => options.get(*cursor).copied(),
            UpgradeSelection::Inactive => None,
        }
    }

    /// Move the cursor up, wrapping to the last option
    pub fn move_up(&mut self) {
        if let UpgradeSelection::Presenting { options, cursor } = self {
            let n = options.len();
            *cursor = (*cursor + n - 1) % n;
        }
    }

    /// Move the cursor down, wrapping to the first option
    pub fn move_down(&mut self) {
        if let UpgradeSelection::Presenting { options, cursor } = self {
            *cursor = (*cursor + 1) % options.len();
        }
    }
}

/// Draw distinct catalog entries uniformly without replacement
pub fn roll_options<R: Rng + ?Sized>(rng: &mut R) -> [UpgradeKey; UPGRADE_CHOICES] {
    let picks = rand::seq::index::sample(rng, CATALOG.len(), UPGRADE_CHOICES);
    let mut options = [CATALOG[0].key; UPGRADE_CHOICES];
    for (slot, idx) in options.iter_mut().zip(picks.iter()) {
        *slot = CATALOG[idx].key;
    }
    options
}

/// Open the next queued episode if none is active.
/// Returns true if the simulation is now presenting upgrades.
pub fn begin_pending<R: Rng + ?Sized>(
    state: &mut GameState,
    physics: &mut dyn Physics,
    scheduler: &mut dyn Scheduler,
    rng: &mut R,
) -> bool {
    if state.selection.is_active() {
        return true;
    }
    if state.pending_upgrades == 0 || state.is_player_dead {
        return false;
    }

    state.pending_upgrades -= 1;
    freeze(state, physics, scheduler);

    let options = roll_options(rng);
    state.selection = UpgradeSelection::Presenting { options, cursor: 0 };
    log::debug!("Presenting upgrades {:?}", options);
    state.push_event(GameEvent::UpgradePresented {
        options: options.to_vec(),
    });
    true
}

/// Consume one tick of menu input while an episode is active
pub fn handle_input<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &dyn Input,
    physics: &mut dyn Physics,
    scheduler: &mut dyn Scheduler,
    rng: &mut R,
) {
    if !state.selection.is_active() {
        return;
    }

    if input.just_pressed(Action::MenuUp) {
        state.selection.move_up();
    } else if input.just_pressed(Action::MenuDown) {
        state.selection.move_down();
    } else if input.just_pressed(Action::Confirm) {
        confirm(state, physics, scheduler, rng);
    }
}

/// Apply the option under the cursor and close the episode
pub fn confirm<R: Rng + ?Sized>(
    state: &mut GameState,
    physics: &mut dyn Physics,
    scheduler: &mut dyn Scheduler,
    rng: &mut R,
) {
    let Some(key) = state.selection.selected() else {
        return;
    };

    let old_fire_rate = state.stats.fire_rate_ms;
    key.apply(&mut state.stats, &mut state.enemy_template, &state.tuning);
    log::info!("Upgrade applied: {}", key.label());
    state.push_event(GameEvent::UpgradeApplied { key });

    if state.stats.fire_rate_ms != old_fire_rate {
        combat::schedule_auto_fire(state, scheduler);
        // Still frozen until the episode closes below
        if let Some(handle) = state.fire_timer {
            scheduler.pause(handle);
        }
    }

    state.selection = UpgradeSelection::Inactive;

    if !begin_pending(state, physics, scheduler, rng) {
        thaw(state, physics, scheduler);
    }
}

/// Stop simulation time: physics and both gameplay timers
fn freeze(state: &GameState, physics: &mut dyn Physics, scheduler: &mut dyn Scheduler) {
    physics.set_paused(true);
    for handle in [state.spawn_timer, state.fire_timer].into_iter().flatten() {
        scheduler.pause(handle);
    }
}

fn thaw(state: &GameState, physics: &mut dyn Physics, scheduler: &mut dyn Scheduler) {
    physics.set_paused(false);
    for handle in [state.spawn_timer, state.fire_timer].into_iter().flatten() {
        scheduler.resume(handle);
    }
}
