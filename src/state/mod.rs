//! State module for tracking run progress
//!
//! A harvest run moves through a fixed, linear sequence of states. There is
//! no branching and no retry between states; a failure in any state ends the
//! run.

mod run_state;

pub use run_state::RunState;
