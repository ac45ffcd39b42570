pub mod constants;
pub mod game_loop;
pub mod input;
pub mod input_buffer;
pub mod match_result;
pub mod performance;
pub mod state;
pub mod systems;
