//! Match result and standings
//!
//! Computes final match results once the match is over.

use serde::{Deserialize, Serialize};

use crate::game::constants::player::STARTING_LIVES;
use crate::game::state::{GameState, MatchPhase, PlayerId};

/// Match result information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner_id: Option<PlayerId>,
    pub reason: MatchEndReason,
    pub standings: Vec<PlayerStanding>,
    /// Match length in steps
    pub match_ticks: u64,
    /// Match length in seconds at the configured tick rate
    pub match_duration: f32,
}

/// One player's line in the final standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_id: PlayerId,
    pub rank: u32,
    pub lives_remaining: u8,
    pub lives_lost: u8,
    pub eliminated: bool,
}

/// Reason why match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// At most one player still has lives
    LastPlayerStanding,
}

/// Check if match should end
pub fn check_match_end(state: &GameState) -> Option<MatchEndReason> {
    if state.match_state.phase != MatchPhase::Playing {
        return None;
    }

    if state.alive_count() <= 1 {
        return Some(MatchEndReason::LastPlayerStanding);
    }

    None
}

/// The sole surviving player, if there is exactly one
pub fn last_player_standing(state: &GameState) -> Option<PlayerId> {
    let mut alive = state.alive_players();
    match (alive.next(), alive.next()) {
        (Some(player), None) => Some(player.id),
        _ => None,
    }
}

/// Determine match result from game state. Returns None while still playing.
pub fn determine_result(state: &GameState, tick_rate: u32) -> Option<MatchResult> {
    let ended_tick = state.match_state.ended_tick?;

    let mut standings: Vec<PlayerStanding> = state
        .players
        .iter()
        .map(|p| PlayerStanding {
            player_id: p.id,
            rank: 0,
            lives_remaining: p.lives,
            lives_lost: STARTING_LIVES.saturating_sub(p.lives),
            eliminated: p.is_eliminated(),
        })
        .collect();

    // Winner first, then by lives left; ties keep roster order
    let winner_id = state.match_state.winner_id;
    let is_winner = |s: &PlayerStanding| Some(s.player_id) == winner_id;
    standings.sort_by(|a, b| {
        is_winner(b)
            .cmp(&is_winner(a))
            .then_with(|| b.lives_remaining.cmp(&a.lives_remaining))
    });

    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = (i + 1) as u32;
    }

    let match_ticks = ended_tick.saturating_sub(state.match_state.started_tick);

    Some(MatchResult {
        winner_id,
        reason: MatchEndReason::LastPlayerStanding,
        standings,
        match_ticks,
        match_duration: match_ticks as f32 / tick_rate.max(1) as f32,
    })
}
