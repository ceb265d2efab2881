// Alert pipeline for attendance records.
//
// Architecture:
// - model.rs: Severity, classification result and alert event types
// - triggers.rs: Threshold classification and message text
// - engine.rs: Dispatches alerts to the report log or the console preview

pub mod engine;
pub mod model;
pub mod triggers;
