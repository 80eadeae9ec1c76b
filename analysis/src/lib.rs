pub mod align;
pub mod detector;
pub mod orchestrator;
pub mod report;
pub mod spread;
pub mod sweep;
