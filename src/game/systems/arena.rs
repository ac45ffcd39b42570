//! Spike zones and the death/respawn cycle

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::state::{Arena, Player, PlayerId};

/// Arena events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// Player touched a spike band and lost a life
    LifeLost { player_id: PlayerId, lives_remaining: u8 },
}

impl ArenaEvent {
    /// Whether the life lost was the player's last
    pub fn is_elimination(&self) -> bool {
        match self {
            ArenaEvent::LifeLost { lives_remaining, .. } => *lives_remaining == 0,
        }
    }
}

/// Kill the player if its body touches either spike band
pub fn check_lethal_zones(player: &mut Player, arena: &Arena) -> Option<ArenaEvent> {
    if player.is_eliminated() || !arena.in_lethal_zone(&player.body()) {
        return None;
    }
    Some(die(player))
}

/// Take one life. A player with lives left respawns; one without stays where
/// it is, inert, and the match controller decides the winner.
pub fn die(player: &mut Player) -> ArenaEvent {
    player.lives = player.lives.saturating_sub(1);
    info!(player_id = player.id, lives = player.lives, "player lost a life");

    if player.is_alive() {
        player.respawn();
    }

    ArenaEvent::LifeLost {
        player_id: player.id,
        lives_remaining: player.lives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Gravity, PlayerConfig};
    use crate::util::vec2::Vec2;

    fn create_test_player() -> Player {
        Player::new(&PlayerConfig::default_roster()[0])
    }

    #[test]
    fn test_safe_position_is_not_lethal() {
        let arena = Arena::default();
        let mut player = create_test_player();
        assert_eq!(check_lethal_zones(&mut player, &arena), None);
        assert_eq!(player.lives, 3);
    }

    #[test]
    fn test_top_band_costs_one_life_and_respawns() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(500.0, 19.0);
        player.velocity = Vec2::new(5.0, -6.0);
        player.gravity = Gravity::Up;

        let event = check_lethal_zones(&mut player, &arena);

        assert_eq!(
            event,
            Some(ArenaEvent::LifeLost {
                player_id: 1,
                lives_remaining: 2
            })
        );
        assert!(!event.unwrap().is_elimination());
        assert_eq!(player.position, Vec2::new(100.0, 300.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.gravity, Gravity::Down);
    }

    #[test]
    fn test_bottom_band_is_lethal() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.position = Vec2::new(500.0, 551.0);

        let event = check_lethal_zones(&mut player, &arena);

        assert!(event.is_some());
        assert_eq!(player.lives, 2);
    }

    #[test]
    fn test_last_life_eliminates_without_respawn() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.lives = 1;
        player.position = Vec2::new(500.0, 10.0);

        let event = check_lethal_zones(&mut player, &arena).unwrap();

        assert!(event.is_elimination());
        assert!(player.is_eliminated());
        assert_eq!(player.position, Vec2::new(500.0, 10.0));
    }

    #[test]
    fn test_eliminated_player_cannot_die_again() {
        let arena = Arena::default();
        let mut player = create_test_player();
        player.lives = 0;
        player.position = Vec2::new(500.0, 10.0);

        assert_eq!(check_lethal_zones(&mut player, &arena), None);
        assert_eq!(player.lives, 0);
    }
}
