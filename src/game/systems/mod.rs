pub mod arena;
pub mod collision;
pub mod combat;
pub mod control;
pub mod gravity;
pub mod physics;
