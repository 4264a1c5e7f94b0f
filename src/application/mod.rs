pub mod dashboard;
pub mod orchestrator;
