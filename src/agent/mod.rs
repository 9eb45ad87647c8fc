//! Automated seats.
//!
//! - `policy`: which movable piece an agent picks
//! - `driver`: which step an agent seat takes next, and taking it

pub mod driver;
pub mod policy;

pub use driver::{next_step, take_move, AgentMove, AgentStep};
pub use policy::{AgentPolicy, FirstEligible, RandomEligible};
