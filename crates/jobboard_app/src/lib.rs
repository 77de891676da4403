//! `jobboard` binary internals: CLI, config, dataset loading and session wiring.
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod dataset;
pub mod effects;
pub mod logging;
pub mod render;

pub use app::{run, Board, Session};
