//! Melee combat resolution
//!
//! Hits never cost lives directly. A hit stuns the defender and knocks it
//! away; the spike bands do the rest.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::game::constants::combat::{
    HITBOX_HEIGHT, HITBOX_WIDTH, KNOCKBACK, KNOCKBACK_LIFT, STUN_FRAMES,
};
use crate::game::state::{Facing, Player, PlayerId};
use crate::util::rect::Rect;

/// A landed attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub attacker_id: PlayerId,
    pub defender_id: PlayerId,
}

/// Hitbox in front of the attacker, level with the top of its body
pub fn attack_hitbox(attacker: &Player) -> Rect {
    let x = match attacker.facing {
        Facing::Right => attacker.position.x + attacker.size.x,
        Facing::Left => attacker.position.x - HITBOX_WIDTH,
    };
    Rect::new(x, attacker.position.y, HITBOX_WIDTH, HITBOX_HEIGHT)
}

/// Apply one attacker's swing to one defender. Returns true on a hit.
///
/// A defender that is already stunned cannot be hit again until the stun
/// runs out.
pub fn check_combat(attacker: &Player, defender: &mut Player) -> bool {
    if attacker.is_eliminated() || defender.is_eliminated() {
        return false;
    }
    if !attacker.is_attacking || attacker.attack_timer == 0 || defender.is_stunned() {
        return false;
    }
    if !attack_hitbox(attacker).overlaps(&defender.body()) {
        return false;
    }

    defender.stun_frames = STUN_FRAMES;
    defender.velocity.x = attacker.facing.sign() * KNOCKBACK;
    defender.velocity.y = -KNOCKBACK_LIFT * defender.gravity.sign();

    debug!(
        attacker_id = attacker.id,
        defender_id = defender.id,
        "attack landed"
    );
    true
}

/// Run every ordered pair of distinct players, in roster order
pub fn resolve_all(players: &mut [Player]) -> SmallVec<[Hit; 2]> {
    let mut hits = SmallVec::new();
    let count = players.len();

    for attacker_idx in 0..count {
        for defender_idx in 0..count {
            if attacker_idx == defender_idx {
                continue;
            }
            let (attacker, defender) = pair_mut(players, attacker_idx, defender_idx);
            if check_combat(attacker, defender) {
                hits.push(Hit {
                    attacker_id: attacker.id,
                    defender_id: defender.id,
                });
            }
        }
    }

    hits
}

/// Borrow two distinct players, the first immutably
fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (head, tail) = players.split_at_mut(b);
        (&head[a], &mut tail[0])
    } else {
        let (head, tail) = players.split_at_mut(a);
        (&tail[0], &mut head[b])
    }
}
