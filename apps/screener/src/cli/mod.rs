// Interactive terminal front end: command parsing, text rendering and the event loop.
// All state changes go through `session::Workspace`.

pub mod commands;
pub mod render;
pub mod repl;

pub use commands::{parse, Command};
