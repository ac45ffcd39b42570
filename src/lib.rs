//! Gravity Duel
//!
//! A two-player arena duel where each player can flip the direction gravity
//! pulls them. The library holds the fixed-step simulation; the binary replays
//! scripted key input against it, headless or paced in real time.

pub mod config;
pub mod game;
pub mod runner;
pub mod script;
pub mod util;
