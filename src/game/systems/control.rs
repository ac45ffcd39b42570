//! Per-frame player update: timers, stun, controls, then physics
//!
//! Control precedence within a frame is fixed: horizontal movement, jump,
//! gravity swap, attack, attack timer, physics, spike check.

use smallvec::SmallVec;
use tracing::debug;

use crate::game::constants::combat::{ATTACK_COOLDOWN, ATTACK_DURATION};
use crate::game::constants::physics::{JUMP_FORCE, SPEED};
use crate::game::input::PlayerIntent;
use crate::game::state::{Arena, Facing, Gravity, Player, PlayerId};
use crate::game::systems::arena::{self, ArenaEvent};
use crate::game::systems::{collision, gravity, physics};

/// Things that happened to a player during its own update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    GravitySwapped { player_id: PlayerId, gravity: Gravity },
    Arena(ArenaEvent),
}

/// Advance one player by one frame
pub fn update_player(
    player: &mut Player,
    intent: &PlayerIntent,
    arena: &Arena,
) -> SmallVec<[PlayerEvent; 2]> {
    let mut events = SmallVec::new();

    if player.is_eliminated() {
        return events;
    }

    player.swap_cooldown = player.swap_cooldown.saturating_sub(1);
    player.attack_cooldown = player.attack_cooldown.saturating_sub(1);

    // Stun overrides input; only physics runs
    if player.is_stunned() {
        player.stun_frames -= 1;
        physics::integrate(player, arena);
        return events;
    }

    apply_movement(player, intent);

    if intent.jump && collision::is_on_ground(player, arena) {
        player.velocity.y = -JUMP_FORCE * player.gravity.sign();
    }

    if intent.swap {
        if let Some(new_gravity) = gravity::try_swap(player) {
            debug!(player_id = player.id, gravity = ?new_gravity, "gravity swapped");
            events.push(PlayerEvent::GravitySwapped {
                player_id: player.id,
                gravity: new_gravity,
            });
        }
    }

    if intent.attack && player.attack_cooldown == 0 {
        start_attack(player);
    }

    if player.is_attacking {
        player.attack_timer = player.attack_timer.saturating_sub(1);
        if player.attack_timer == 0 {
            player.is_attacking = false;
        }
    }

    physics::integrate(player, arena);

    if let Some(event) = arena::check_lethal_zones(player, arena) {
        events.push(PlayerEvent::Arena(event));
    }

    events
}

/// Left wins over right; facing only changes while moving
fn apply_movement(player: &mut Player, intent: &PlayerIntent) {
    if intent.left {
        player.velocity.x = -SPEED;
        player.facing = Facing::Left;
    } else if intent.right {
        player.velocity.x = SPEED;
        player.facing = Facing::Right;
    } else {
        player.velocity.x = 0.0;
    }
}

/// The cooldown starts together with the active window
fn start_attack(player: &mut Player) {
    player.is_attacking = true;
    player.attack_timer = ATTACK_DURATION;
    player.attack_cooldown = ATTACK_COOLDOWN;
}
