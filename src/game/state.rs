//! Game state definitions and structures
//!
//! Contains the arena geometry, the players and the match state.

use serde::{Deserialize, Serialize};

use crate::game::constants::{arena, player};
use crate::game::input::ControlScheme;
use crate::util::rect::Rect;
use crate::util::vec2::Vec2;

/// Player identifier (1-based, matches the roster order)
pub type PlayerId = u8;

/// Platforms are plain rectangles
pub type Platform = Rect;

/// Direction gravity pulls a player
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Gravity {
    /// Toward increasing y (the floor)
    #[default]
    Down,
    /// Toward decreasing y (the ceiling)
    Up,
}

impl Gravity {
    /// +1 for down, -1 for up
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Down => 1.0,
            Gravity::Up => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Static description of one competitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub id: PlayerId,
    /// Where the player starts and respawns
    pub spawn: Vec2,
    /// Display color, opaque to the simulation
    pub color: String,
    pub controls: ControlScheme,
}

impl PlayerConfig {
    /// The two-player roster: blue on the left with WASD+Q, orange on the right with arrows+K
    pub fn default_roster() -> Vec<PlayerConfig> {
        vec![
            PlayerConfig {
                id: 1,
                spawn: Vec2::new(100.0, 300.0),
                color: "#44aaff".to_string(),
                controls: ControlScheme::new("a", "d", "w", "s", "q"),
            },
            PlayerConfig {
                id: 2,
                spawn: Vec2::new(970.0, 300.0),
                color: "#ffaa44".to_string(),
                controls: ControlScheme::new("ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "k"),
            },
        ]
    }
}

/// Player state
///
/// Hot fields (touched every step) come first, identity fields last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    // === Kinematics ===
    /// Top-left corner of the body
    pub position: Vec2,
    pub velocity: Vec2,
    /// Body extents (constant)
    pub size: Vec2,
    pub facing: Facing,

    // === Gravity ===
    pub gravity: Gravity,
    /// Frames until the next gravity swap is allowed
    pub swap_cooldown: u32,

    // === Combat ===
    pub is_attacking: bool,
    /// Frames the current attack hitbox remains active
    pub attack_timer: u32,
    /// Frames until the next attack is allowed
    pub attack_cooldown: u32,
    /// Frames the player remains unable to act
    pub stun_frames: u32,

    // === Progress ===
    pub lives: u8,

    // === Identity ===
    pub id: PlayerId,
    pub spawn: Vec2,
    pub color: String,
    pub controls: ControlScheme,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: config.spawn,
            velocity: Vec2::ZERO,
            size: Vec2::new(player::WIDTH, player::HEIGHT),
            facing: Facing::Right,
            gravity: Gravity::Down,
            swap_cooldown: 0,
            is_attacking: false,
            attack_timer: 0,
            attack_cooldown: 0,
            stun_frames: 0,
            lives: player::STARTING_LIVES,
            id: config.id,
            spawn: config.spawn,
            color: config.color.clone(),
            controls: config.controls.clone(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    #[inline]
    pub fn is_eliminated(&self) -> bool {
        self.lives == 0
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun_frames > 0
    }

    /// Body rectangle at the current position
    pub fn body(&self) -> Rect {
        Rect::from_position(self.position, self.size)
    }

    /// Back to the spawn point with default gravity and no momentum.
    /// Cooldowns, attack state and lives carry over.
    pub fn respawn(&mut self) {
        self.velocity = Vec2::ZERO;
        self.gravity = Gravity::Down;
        self.stun_frames = 0;
        self.position = self.spawn;
    }
}

/// Arena geometry: five fixed platforms inside a field bounded by spike bands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Thickness of the spike bands at the top and bottom edges
    pub lethal_margin: f32,
    /// Index 0 is the central platform
    pub platforms: [Platform; arena::PLATFORM_COUNT],
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: arena::FIELD_WIDTH,
            height: arena::FIELD_HEIGHT,
            lethal_margin: arena::LETHAL_MARGIN,
            platforms: [
                Platform::new(250.0, 280.0, 600.0, 40.0), // center
                Platform::new(50.0, 400.0, 100.0, 20.0),  // lower left
                Platform::new(950.0, 400.0, 100.0, 20.0), // lower right
                Platform::new(50.0, 180.0, 100.0, 20.0),  // upper left
                Platform::new(950.0, 180.0, 100.0, 20.0), // upper right
            ],
        }
    }
}

impl Arena {
    pub fn central_platform(&self) -> &Platform {
        &self.platforms[arena::CENTRAL_PLATFORM]
    }

    /// Every platform except the central one
    pub fn side_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != arena::CENTRAL_PLATFORM)
            .map(|(_, p)| p)
    }

    /// Whether a body touches either spike band
    pub fn in_lethal_zone(&self, body: &Rect) -> bool {
        body.top() < self.lethal_margin || body.bottom() > self.height - self.lethal_margin
    }
}

/// Match phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Match in progress
    #[default]
    Playing,
    /// Match ended (terminal until reset)
    Over,
}

/// Match state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub winner_id: Option<PlayerId>,
    /// Tick at which this match started
    pub started_tick: u64,
    /// Tick at which this match ended
    pub ended_tick: Option<u64>,
    /// Ticks left before an automatic reset, armed at match end
    pub restart_in: Option<u32>,
}

impl MatchState {
    pub fn starting_at(tick: u64) -> Self {
        Self {
            started_tick: tick,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::Over
    }
}

/// Complete game state, readable by presentation each tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// Steps simulated since the loop was created (keeps counting across resets)
    pub tick: u64,
    pub match_state: MatchState,
    pub arena: Arena,
    /// Roster order
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(roster: &[PlayerConfig]) -> Self {
        Self {
            tick: 0,
            match_state: MatchState::default(),
            arena: Arena::default(),
            players: roster.iter().map(Player::new).collect(),
        }
    }

    /// Get player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get mutable player by ID
    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Players that still have lives
    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&PlayerConfig::default_roster())
    }
}
