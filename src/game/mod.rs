//! Core Connect Four game logic: the board, four-in-a-row detection, players,
//! and the turn-by-turn game state machine.

mod board;
mod player;
mod state;
pub mod win;

pub use board::{Board, Cell, Mark, COLS, ROWS};
pub use player::{is_valid_name, Player, Seat};
pub use state::{Game, GameObserver, GameStatus, MoveSource};
pub use win::{Axis, Win};
