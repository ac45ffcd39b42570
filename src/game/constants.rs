//! Tuning constants
//!
//! All rates and timers are per fixed simulation step. The values were tuned
//! for a 60 Hz step; a different tick rate changes game speed, not feel.

/// Physics constants
pub mod physics {
    /// Vertical acceleration applied every step, signed by the player's gravity direction
    pub const GRAVITY_FORCE: f32 = 0.5;
    /// Initial vertical speed of a jump, away from the current gravity
    pub const JUMP_FORCE: f32 = 12.0;
    /// Horizontal speed while a movement key is held
    pub const SPEED: f32 = 5.0;
    /// Nominal tick rate in Hz
    pub const TICK_RATE: u32 = 60;
}

/// Player body and lifecycle constants
pub mod player {
    /// Body width
    pub const WIDTH: f32 = 30.0;
    /// Body height
    pub const HEIGHT: f32 = 30.0;
    /// Lives at match start
    pub const STARTING_LIVES: u8 = 3;
    /// Frames between two gravity swaps
    pub const SWAP_COOLDOWN: u32 = 90;
    /// Distance within which a side platform counts as ground
    pub const GROUND_TOLERANCE: f32 = 10.0;
}

/// Melee combat constants
pub mod combat {
    /// Frames the attack hitbox stays active
    pub const ATTACK_DURATION: u32 = 10;
    /// Frames between two attacks, counted from the start of the attack
    pub const ATTACK_COOLDOWN: u32 = 30;
    /// Horizontal reach of the hitbox from the attacker's leading edge
    pub const HITBOX_WIDTH: f32 = 40.0;
    /// Vertical extent of the hitbox, measured down from the attacker's top
    pub const HITBOX_HEIGHT: f32 = 10.0;
    /// Frames a hit defender is unable to act
    pub const STUN_FRAMES: u32 = 20;
    /// Horizontal knockback speed
    pub const KNOCKBACK: f32 = 10.0;
    /// Vertical knockback speed, away from the defender's gravity
    pub const KNOCKBACK_LIFT: f32 = 5.0;
}

/// Arena constants
pub mod arena {
    /// Field width
    pub const FIELD_WIDTH: f32 = 1100.0;
    /// Field height
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Thickness of the spike bands at the top and bottom of the field
    pub const LETHAL_MARGIN: f32 = 20.0;
    /// Number of platforms in the layout
    pub const PLATFORM_COUNT: usize = 5;
    /// Index of the central platform
    pub const CENTRAL_PLATFORM: usize = 0;
}

/// Match flow constants
pub mod game {
    /// Delay between match end and automatic restart, in milliseconds
    pub const RESTART_DELAY_MS: u64 = 3000;
    /// Longest accepted restart delay: one hour
    pub const MAX_RESTART_DELAY_MS: u64 = 3_600_000;
}

/// Convert a wall-clock delay to a whole number of steps at the given tick rate.
/// Saturates at `u32::MAX` steps.
pub fn millis_to_ticks(millis: u64, tick_rate: u32) -> u32 {
    let ticks = millis.saturating_mul(tick_rate as u64).saturating_add(999) / 1000;
    u32::try_from(ticks).unwrap_or(u32::MAX)
}
