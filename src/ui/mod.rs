//! Terminal UI: a hot-seat game view where both players share the keyboard.

mod app;
mod game_view;

pub use app::App;
