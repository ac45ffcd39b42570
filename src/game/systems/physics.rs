use crate::game::state::{Arena, Player};
use crate::game::systems::{collision, gravity};

/// Advance one player by one step.
///
/// Semi-implicit Euler: gravity first, then position, then platform
/// resolution and the side walls. There is no vertical clamp; the spike bands
/// take care of that.
pub fn integrate(player: &mut Player, arena: &Arena) {
    if player.is_eliminated() {
        return;
    }

    gravity::apply_gravity(player);
    player.position += player.velocity;

    collision::resolve_platforms(player, arena);

    clamp_to_walls(player, arena);
}

/// Keep the body between the left and right walls
fn clamp_to_walls(player: &mut Player, arena: &Arena) {
    let max_x = arena.width - player.size.x;
    if player.position.x < 0.0 {
        player.position.x = 0.0;
    }
    if player.position.x > max_x {
        player.position.x = max_x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::physics::GRAVITY_FORCE;
    use crate::game::state::{Gravity, PlayerConfig};
    use crate::util::vec2::Vec2;

    fn create_test_player() -> Player {
        Player::new(&PlayerConfig::default_roster()[0])
    }

    #[test]
    fn test_position_integration() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(400.0, 100.0);
        player.velocity = Vec2::new(5.0, 2.0);

        integrate(&mut player, &arena);

        assert_eq!(player.velocity, Vec2::new(5.0, 2.0 + GRAVITY_FORCE));
        assert_eq!(player.position, Vec2::new(405.0, 102.5));
    }

    #[test]
    fn test_inverted_gravity_rises() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(400.0, 100.0);
        player.gravity = Gravity::Up;

        integrate(&mut player, &arena);

        assert_eq!(player.velocity.y, -GRAVITY_FORCE);
        assert_eq!(player.position.y, 100.0 - GRAVITY_FORCE);
    }

    #[test]
    fn test_resting_player_stays_on_platform() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(400.0, 250.0);

        for _ in 0..10 {
            integrate(&mut player, &arena);
        }

        assert_eq!(player.position.y, 250.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_walls_clamp_horizontal_position() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(2.0, 100.0);
        player.velocity.x = -5.0;
        integrate(&mut player, &arena);
        assert_eq!(player.position.x, 0.0);

        player.position.x = arena.width - player.size.x - 1.0;
        player.velocity.x = 5.0;
        integrate(&mut player, &arena);
        assert_eq!(player.position.x, arena.width - player.size.x);
    }

    #[test]
    fn test_eliminated_players_not_updated() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.lives = 0;
        player.velocity = Vec2::new(5.0, 5.0);
        let before = player.clone();

        integrate(&mut player, &arena);

        assert_eq!(player, before);
    }

    #[test]
    fn test_physics_determinism() {
        let arena = Arena::default();
        let mut a = create_test_player();
        let mut b = create_test_player();
        a.velocity = Vec2::new(5.0, -8.0);
        b.velocity = Vec2::new(5.0, -8.0);

        for _ in 0..100 {
            integrate(&mut a, &arena);
            integrate(&mut b, &arena);
        }

        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}
