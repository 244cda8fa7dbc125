//! Experience and levelling
//!
//! Collecting an orb grants `value * xp_multiplier` XP. Every threshold crossed
//! is one level and one queued upgrade episode; a single large orb can queue
//! several.

use super::registry::EntityId;
use super::state::{GameEvent, GameState, PlayerStats};

/// Next level threshold: `floor(current * percent / 100)`, saturating
pub fn next_threshold(current: u32, growth_percent: u32) -> u32 {
    let grown = u64::from(current) * u64::from(growth_percent) / 100;
    u32::try_from(grown).unwrap_or(u32::MAX).max(1)
}

/// Add XP and consume every threshold it covers. Returns levels gained.
pub fn grant_xp(stats: &mut PlayerStats, amount: u32, growth_percent: u32) -> u32 {
    stats.xp = stats.xp.saturating_add(amount);
    let mut gained = 0;
    while stats.xp >= stats.xp_to_level {
        stats.xp -= stats.xp_to_level;
        stats.level += 1;
        stats.xp_to_level = next_threshold(stats.xp_to_level, growth_percent);
        gained += 1;
    }
    gained
}

/// Pick up an orb and queue an upgrade episode per level gained.
/// Returns levels gained; unknown orbs are ignored.
pub fn collect_orb(state: &mut GameState, orb: EntityId) -> u32 {
    if state.is_player_dead {
        return 0;
    }
    let Some(orb) = state.registry.remove_orb(orb) else {
        return 0;
    };

    let multiplier = state.stats.xp_multiplier.max(1);
    let xp = orb.value.saturating_mul(multiplier);
    state.push_event(GameEvent::OrbCollected { id: orb.id, xp });

    let gained = grant_xp(&mut state.stats, xp, state.tuning.xp_growth_percent);
    if gained > 0 {
        let first = state.stats.level - gained + 1;
        for level in first..=state.stats.level {
            log::info!("Level up! Now level {}", level);
            state.push_event(GameEvent::LevelUp { level });
        }
        state.pending_upgrades += gained;
    }
    gained
}
