//! Match controller: runs one fixed step of the whole match per tick
//!
//! Per tick: drain key events into the input state, update every player in
//! roster order, resolve combat in both directions, and end the match when at
//! most one player has lives left. Everything that presentation cares about
//! comes back as [`GameLoopEvent`]s.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::game::constants::{game, millis_to_ticks, physics};
use crate::game::input::InputState;
use crate::game::input_buffer::{InputBuffer, InputSender};
use crate::game::match_result::{self, MatchResult};
use crate::game::state::{
    GameState, Gravity, MatchPhase, MatchState, Player, PlayerConfig, PlayerId,
};
use crate::game::systems::arena::ArenaEvent;
use crate::game::systems::combat;
use crate::game::systems::control::{self, PlayerEvent};

/// Game loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameLoopConfig {
    /// Fixed steps per second
    pub tick_rate: u32,
    /// Delay between match end and the automatic reset
    pub restart_delay_ms: u64,
    /// Reset automatically after `restart_delay_ms`
    pub auto_restart: bool,
    /// Key events that can be pending between two ticks
    pub input_buffer_capacity: usize,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: physics::TICK_RATE,
            restart_delay_ms: game::RESTART_DELAY_MS,
            auto_restart: true,
            input_buffer_capacity: 256,
        }
    }
}

/// Events reported to presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameLoopEvent {
    /// Score display should show the new life count
    LifeLost { player_id: PlayerId, lives_remaining: u8 },
    PlayerHit { attacker_id: PlayerId, defender_id: PlayerId },
    GravitySwapped { player_id: PlayerId, gravity: Gravity },
    /// Terminal for this match; `winner_id` is the last player with lives. With
    /// the two-player roster there is always one; None only when a custom roster
    /// leaves nobody alive at the elimination that ends the match.
    MatchOver { winner_id: Option<PlayerId> },
    /// Fresh players, back to Playing
    MatchRestarted,
}

/// Events from one tick; two players rarely produce more than a handful
pub type TickEvents = SmallVec<[GameLoopEvent; 4]>;

/// Owns the match state, the key state and the key event buffer
pub struct GameLoop {
    state: GameState,
    config: GameLoopConfig,
    roster: Vec<PlayerConfig>,
    input: InputState,
    input_buffer: InputBuffer,
}

impl GameLoop {
    /// Two-player match with the default roster
    pub fn new(config: GameLoopConfig) -> Self {
        Self::with_roster(config, PlayerConfig::default_roster())
    }

    pub fn with_roster(config: GameLoopConfig, roster: Vec<PlayerConfig>) -> Self {
        let input = InputState::for_schemes(roster.iter().map(|c| &c.controls));
        let input_buffer = InputBuffer::new(config.input_buffer_capacity.max(1));
        Self {
            state: GameState::new(&roster),
            config,
            roster,
            input,
            input_buffer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameLoopConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Handle for key event sources
    pub fn input_sender(&self) -> InputSender {
        self.input_buffer.sender()
    }

    pub fn is_over(&self) -> bool {
        self.state.match_state.is_over()
    }

    /// Final result once the match is over
    pub fn result(&self) -> Option<MatchResult> {
        match_result::determine_result(&self.state, self.config.tick_rate)
    }

    /// Run one fixed step
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::new();
        self.state.tick += 1;

        self.apply_pending_input();

        if self.state.match_state.phase == MatchPhase::Over {
            self.advance_restart_countdown(&mut events);
            return events;
        }

        for idx in 0..self.state.players.len() {
            let intent = self.state.players[idx].controls.sample(&self.input);
            let player_events =
                control::update_player(&mut self.state.players[idx], &intent, &self.state.arena);

            for event in player_events {
                match event {
                    PlayerEvent::GravitySwapped { player_id, gravity } => {
                        events.push(GameLoopEvent::GravitySwapped { player_id, gravity });
                    }
                    PlayerEvent::Arena(arena_event) => {
                        self.handle_arena_event(arena_event, &mut events);
                    }
                }
            }
        }

        for hit in combat::resolve_all(&mut self.state.players) {
            events.push(GameLoopEvent::PlayerHit {
                attacker_id: hit.attacker_id,
                defender_id: hit.defender_id,
            });
        }

        events
    }

    /// End the match. Only the first call has any effect.
    pub fn end_game(&mut self, winner_id: Option<PlayerId>) -> bool {
        if self.state.match_state.is_over() {
            return false;
        }

        let match_state = &mut self.state.match_state;
        match_state.phase = MatchPhase::Over;
        match_state.winner_id = winner_id;
        match_state.ended_tick = Some(self.state.tick);
        if self.config.auto_restart {
            match_state.restart_in = Some(millis_to_ticks(
                self.config.restart_delay_ms,
                self.config.tick_rate,
            ));
        }

        info!(winner_id = ?winner_id, tick = self.state.tick, "match over");
        true
    }

    /// Fresh players and a new match, in place. Held keys stay held.
    pub fn reset(&mut self) {
        let tick = self.state.tick;
        self.state.players = self.roster.iter().map(Player::new).collect();
        self.state.match_state = MatchState::starting_at(tick);
        info!(tick, "match reset");
    }

    fn apply_pending_input(&mut self) {
        let mut applied = 0usize;
        for event in self.input_buffer.drain() {
            if self.input.apply(&event) {
                applied += 1;
            }
        }
        if applied > 0 {
            trace!(applied, held = self.input.held_count(), "key state updated");
        }
    }

    fn handle_arena_event(&mut self, event: ArenaEvent, events: &mut TickEvents) {
        let ArenaEvent::LifeLost {
            player_id,
            lives_remaining,
        } = event;
        events.push(GameLoopEvent::LifeLost {
            player_id,
            lives_remaining,
        });

        if event.is_elimination() && match_result::check_match_end(&self.state).is_some() {
            let winner_id = match_result::last_player_standing(&self.state);
            if self.end_game(winner_id) {
                events.push(GameLoopEvent::MatchOver { winner_id });
            }
        }
    }

    fn advance_restart_countdown(&mut self, events: &mut TickEvents) {
        let Some(remaining) = self.state.match_state.restart_in else {
            return;
        };
        if remaining <= 1 {
            self.reset();
            events.push(GameLoopEvent::MatchRestarted);
        } else {
            self.state.match_state.restart_in = Some(remaining - 1);
            debug!(remaining = remaining - 1, "restart countdown");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(GameLoopConfig::default())
    }
}
