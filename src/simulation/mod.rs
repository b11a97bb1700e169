pub mod generator;
pub mod runner;

pub use generator::ReadingGenerator;
pub use runner::{RunPlan, Simulator};
