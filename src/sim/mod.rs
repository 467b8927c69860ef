//! The simulator contract that search algorithms are written against.

mod simulator;

pub use simulator::{JointAction, Simulator};
