//! Terminal front end. Reads engine state once per frame and draws it;
//! never mutates game state.

pub mod renderer;

pub use renderer::TerminalRenderer;
