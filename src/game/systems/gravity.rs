//! Per-player gravity
//!
//! Every player carries its own gravity direction. Acceleration follows it,
//! and a swap flips it subject to a cooldown.

use crate::game::constants::physics::GRAVITY_FORCE;
use crate::game::constants::player::SWAP_COOLDOWN;
use crate::game::state::{Gravity, Player};

/// Accelerate the player along its current gravity
#[inline]
pub fn apply_gravity(player: &mut Player) {
    player.velocity.y += GRAVITY_FORCE * player.gravity.sign();
}

/// Flip gravity if the cooldown has run out.
///
/// Vertical momentum is dropped so the player does not carry speed through the
/// inversion. Returns the new direction when a swap happened.
pub fn try_swap(player: &mut Player) -> Option<Gravity> {
    if player.swap_cooldown > 0 {
        return None;
    }
    player.gravity = player.gravity.flipped();
    player.swap_cooldown = SWAP_COOLDOWN;
    player.velocity.y = 0.0;
    Some(player.gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::PlayerConfig;

    fn create_test_player() -> Player {
        Player::new(&PlayerConfig::default_roster()[0])
    }

    #[test]
    fn test_gravity_pulls_down_by_default() {
        let mut player = create_test_player();
        apply_gravity(&mut player);
        assert_eq!(player.velocity.y, GRAVITY_FORCE);
    }

    #[test]
    fn test_inverted_gravity_pulls_up() {
        let mut player = create_test_player();
        player.gravity = Gravity::Up;
        apply_gravity(&mut player);
        apply_gravity(&mut player);
        assert_eq!(player.velocity.y, -2.0 * GRAVITY_FORCE);
    }

    #[test]
    fn test_swap_flips_and_zeroes_vertical_speed() {
        let mut player = create_test_player();
        player.velocity.y = 7.5;
        player.velocity.x = 5.0;

        assert_eq!(try_swap(&mut player), Some(Gravity::Up));
        assert_eq!(player.gravity, Gravity::Up);
        assert_eq!(player.swap_cooldown, SWAP_COOLDOWN);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.velocity.x, 5.0);
    }

    #[test]
    fn test_swap_blocked_during_cooldown() {
        let mut player = create_test_player();
        try_swap(&mut player);
        player.swap_cooldown = 1;
        player.velocity.y = -3.0;

        assert_eq!(try_swap(&mut player), None);
        assert_eq!(player.gravity, Gravity::Up);
        assert_eq!(player.swap_cooldown, 1);
        assert_eq!(player.velocity.y, -3.0);
    }
}
