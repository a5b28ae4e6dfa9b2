// Composition root for the host application.
//
// Responsibilities
// - Read config from the environment.
// - Load declarative achievement rules and build the engine.
// - Expose the engine over HTTP.

pub mod config;
pub mod http;
pub mod rule_definitions;
pub mod state;
