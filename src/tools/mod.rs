// Shared types
#[macro_use]
mod macros;
pub mod types;

// Modular tools
pub mod batch;
pub mod clean;
pub mod extract;
pub mod fetch;
