//! # Connect Four
//!
//! A two-player Connect Four game. The engine keeps a fixed 6x7 board, applies
//! one column drop per turn, and after every move decides between a win, a
//! tie, or the next turn. Two front ends drive it: a line-by-line text console
//! and a full-screen terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, win detection, players, state machine
//! - [`console`]: Text prompts and board printing over any reader/writer
//! - [`ui`]: Terminal UI: hot-seat game view
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Structured error types

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
