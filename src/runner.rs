//! Drives a [`GameLoop`] from an input script
//!
//! The headless runner steps as fast as possible; the realtime runner paces
//! the same fixed step on a tokio interval. Both feed scripted key events
//! through the loop's input buffer, so a script replays identically either way.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::SimConfig;
use crate::game::game_loop::{GameLoop, GameLoopEvent};
use crate::game::input_buffer::InputSender;
use crate::game::match_result::MatchResult;
use crate::game::performance::PerformanceMonitor;
use crate::game::state::GameState;
use crate::script::{InputScript, ScriptCursor};

/// Presentation side of the simulation: receives every reported event
pub trait EventSink {
    fn on_event(&mut self, state: &GameState, event: &GameLoopEvent);

    fn on_match_over(&mut self, _result: &MatchResult) {}
}

/// Reports score changes and match results through tracing
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&mut self, state: &GameState, event: &GameLoopEvent) {
        match *event {
            GameLoopEvent::LifeLost {
                player_id,
                lives_remaining,
            } => {
                info!(
                    tick = state.tick,
                    player_id,
                    lives_remaining,
                    "score: {}",
                    scoreboard(state)
                );
            }
            GameLoopEvent::MatchRestarted => info!(tick = state.tick, "new match started"),
            // Reported with the full result in on_match_over
            GameLoopEvent::MatchOver { .. } => {}
            other => trace!(tick = state.tick, event = ?other, "game event"),
        }
    }

    fn on_match_over(&mut self, result: &MatchResult) {
        match result.winner_id {
            Some(winner_id) => info!(
                winner_id,
                ticks = result.match_ticks,
                "Player {} wins after {:.1}s",
                winner_id,
                result.match_duration
            ),
            None => info!(ticks = result.match_ticks, "Match ended with no winner"),
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Tick each event was reported on, with the event
    pub events: Vec<(u64, GameLoopEvent)>,
    pub results: Vec<MatchResult>,
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, state: &GameState, event: &GameLoopEvent) {
        self.events.push((state.tick, *event));
    }

    fn on_match_over(&mut self, result: &MatchResult) {
        self.results.push(result.clone());
    }
}

fn scoreboard(state: &GameState) -> String {
    state
        .players
        .iter()
        .map(|p| format!("P{} {}", p.id, p.lives))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The match ended and no restart was configured
    MatchOver,
    /// MAX_TICKS reached
    TickCap,
    /// Ctrl+C or another shutdown signal
    Shutdown,
}

/// What a run did
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub stop_reason: Option<StopReason>,
    pub results: Vec<MatchResult>,
    /// Scripted key events rejected by a full input buffer
    pub dropped_inputs: u64,
}

/// A game loop plus the script feeding it
pub struct Session {
    game: GameLoop,
    script: InputScript,
    cursor: ScriptCursor,
    sender: InputSender,
    tick_cap: Option<u64>,
    auto_restart: bool,
    results: Vec<MatchResult>,
    dropped_inputs: u64,
    stop_reason: Option<StopReason>,
}

impl Session {
    pub fn new(config: &SimConfig, script: InputScript) -> Self {
        let game = GameLoop::new(config.game_loop_config());
        let sender = game.input_sender();
        Self {
            game,
            cursor: script.cursor(),
            script,
            sender,
            tick_cap: config.tick_cap(),
            auto_restart: config.auto_restart,
            results: Vec::new(),
            dropped_inputs: 0,
            stop_reason: None,
        }
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Stop the run; the first reason given wins
    pub fn stop(&mut self, reason: StopReason) {
        self.stop_reason.get_or_insert(reason);
    }

    /// Submit due input, run one tick and report its events.
    /// Returns the stop reason once the run is finished.
    pub fn step<S: EventSink>(&mut self, sink: &mut S) -> Option<StopReason> {
        if self.stop_reason.is_some() {
            return self.stop_reason;
        }
        if let Some(cap) = self.tick_cap {
            if self.game.state().tick >= cap {
                info!(cap, "tick cap reached");
                self.stop(StopReason::TickCap);
                return self.stop_reason;
            }
        }

        self.submit_due_input();
        let events = self.game.tick();

        for event in &events {
            sink.on_event(self.game.state(), event);
            if let GameLoopEvent::MatchOver { .. } = event {
                if let Some(result) = self.game.result() {
                    sink.on_match_over(&result);
                    self.results.push(result);
                }
                if !self.auto_restart {
                    self.stop(StopReason::MatchOver);
                }
            }
        }

        self.stop_reason
    }

    fn submit_due_input(&mut self) {
        if self.cursor.is_finished(&self.script) {
            return;
        }
        let tick = self.game.state().tick;
        for scripted in self.cursor.due(&self.script, tick) {
            if let Err(e) = self.sender.try_send(scripted.to_key_event()) {
                warn!(tick, key = %scripted.key, "Dropped scripted key event: {}", e);
                self.dropped_inputs += 1;
            }
        }
        if !self.script.is_empty() && self.cursor.is_finished(&self.script) {
            debug!(tick, "input script exhausted");
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.game.state().tick,
            stop_reason: self.stop_reason,
            results: self.results.clone(),
            dropped_inputs: self.dropped_inputs,
        }
    }
}

/// Step as fast as possible until the run stops
pub fn run_headless<S: EventSink>(session: &mut Session, sink: &mut S) -> RunSummary {
    info!("Running headless");
    while session.step(sink).is_none() {}
    session.summary()
}

/// Step at the configured tick rate until the run stops or `shutdown` resolves
pub async fn run_realtime<S, F>(session: &mut Session, sink: &mut S, shutdown: F) -> RunSummary
where
    S: EventSink,
    F: Future<Output = ()>,
{
    let tick_rate = session.game().config().tick_rate.max(1);
    let mut ticker = interval(Duration::from_secs_f64(1.0 / tick_rate as f64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut performance = PerformanceMonitor::new(tick_rate);
    let mut last_status = performance.status();

    info!("Game loop started at {} Hz", tick_rate);
    let start = Instant::now();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                session.stop(StopReason::Shutdown);
                break;
            }
            _ = ticker.tick() => {}
        }

        performance.tick_start();
        let stopped = session.step(sink).is_some();
        performance.tick_end();

        let status = performance.status();
        if status != last_status {
            if status.keeps_up() {
                debug!("Performance: {}", performance.status_message());
            } else {
                warn!("Simulation falling behind: {}", performance.status_message());
            }
            last_status = status;
        }

        // Log stats periodically (every 30 seconds)
        let tick = session.game().state().tick;
        if tick > 0 && tick % (tick_rate as u64 * 30) == 0 {
            info!(
                "Sim: {}s, tick {} | Perf: {}",
                start.elapsed().as_secs(),
                tick,
                performance.status_message()
            );
        }

        if stopped {
            break;
        }
    }

    session.summary()
}
