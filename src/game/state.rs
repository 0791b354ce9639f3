use std::io;

use tracing::instrument;

use super::board::Board;
use super::player::{Player, Seat};
use super::win::{self, Win};
use crate::error::{GameError, MoveError, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(Seat),
    Won { seat: Seat, win: Win },
    Tied,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::AwaitingMove(_))
    }
}

/// Supplies column choices for the player whose turn it is.
pub trait MoveSource {
    /// Propose a column for `player`. The game validates it and calls
    /// [`MoveSource::column_rejected`] before asking again if it cannot be used.
    fn choose_column(&mut self, board: &Board, player: &Player) -> io::Result<usize>;

    /// The proposed column was out of range or full.
    fn column_rejected(&mut self, _column: usize, _reason: MoveError) -> io::Result<()> {
        Ok(())
    }
}

/// Receives progress notifications while [`Game::run`] drives a game.
pub trait GameObserver {
    fn turn_started(&mut self, _game: &Game) -> io::Result<()> {
        Ok(())
    }

    fn game_over(&mut self, game: &Game) -> io::Result<()>;
}

/// One game between two players: the board, whose turn it is, and the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    first: Seat,
    status: GameStatus,
    turn: u32,
}

impl Game {
    /// Start a game. The two players must use different marks.
    pub fn new(one: Player, two: Player, first: Seat) -> Result<Self, SetupError> {
        if one.mark() == two.mark() {
            return Err(SetupError::SameMark(one.mark()));
        }
        Ok(Game {
            board: Board::new(),
            players: [one, two],
            first,
            status: GameStatus::AwaitingMove(first),
            turn: 0,
        })
    }

    /// Fresh game with the same players and starting seat
    pub fn rematch(&self) -> Self {
        Game {
            board: Board::new(),
            players: self.players.clone(),
            first: self.first,
            status: GameStatus::AwaitingMove(self.first),
            turn: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Completed moves so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Player to move, or `None` once the game is over
    pub fn active_seat(&self) -> Option<Seat> {
        match self.status {
            GameStatus::AwaitingMove(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<(&Player, Win)> {
        match self.status {
            GameStatus::Won { seat, win } => Some((self.player(seat), win)),
            _ => None,
        }
    }

    /// Drop the active player's piece into `column` and advance the game.
    ///
    /// On error the game is left untouched.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn play(&mut self, column: usize) -> Result<GameStatus, MoveError> {
        let seat = match self.status {
            GameStatus::AwaitingMove(seat) => seat,
            _ => return Err(MoveError::GameOver),
        };
        let mark = self.player(seat).mark();

        self.board.drop_piece(column, mark)?;
        self.turn += 1;

        // A win on the last empty cell is still a win
        self.status = if let Some(win) = win::check(&self.board) {
            tracing::info!(player = self.player(seat).name(), axis = %win.axis, "game won");
            GameStatus::Won { seat, win }
        } else if self.board.is_full() {
            tracing::info!(turns = self.turn, "game tied");
            GameStatus::Tied
        } else {
            GameStatus::AwaitingMove(seat.other())
        };

        Ok(self.status)
    }

    /// Play until someone wins or the board fills up.
    ///
    /// Columns from `frontend` are validated before they are played; rejected
    /// ones are reported back and the same player is asked again.
    #[instrument(skip_all)]
    pub fn run<F>(&mut self, frontend: &mut F) -> Result<GameStatus, GameError>
    where
        F: MoveSource + GameObserver,
    {
        while let Some(seat) = self.active_seat() {
            frontend.turn_started(self)?;

            let column = loop {
                let column = frontend.choose_column(&self.board, self.player(seat))?;
                match self.board.is_column_playable(column) {
                    Ok(true) => break column,
                    Ok(false) => frontend.column_rejected(column, MoveError::ColumnFull(column))?,
                    Err(err) => frontend.column_rejected(column, err)?,
                }
            };

            self.play(column)?;
        }

        frontend.game_over(self)?;
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Axis, Cell, Mark, COLS, ROWS};
    use std::collections::VecDeque;

    fn players() -> (Player, Player) {
        (
            Player::new("Ada", Mark::X).unwrap(),
            Player::new("Grace", Mark::O).unwrap(),
        )
    }

    fn new_game(first: Seat) -> Game {
        let (one, two) = players();
        Game::new(one, two, first).unwrap()
    }

    /// Replays a fixed list of columns and records what it was told.
    #[derive(Default)]
    struct Scripted {
        columns: VecDeque<usize>,
        rejected: Vec<(usize, MoveError)>,
        turns_seen: Vec<u32>,
        finished: bool,
    }

    impl Scripted {
        fn new(columns: &[usize]) -> Self {
            Scripted {
                columns: columns.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl MoveSource for Scripted {
        fn choose_column(&mut self, _board: &Board, _player: &Player) -> io::Result<usize> {
            self.columns
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn column_rejected(&mut self, column: usize, reason: MoveError) -> io::Result<()> {
            self.rejected.push((column, reason));
            Ok(())
        }
    }

    impl GameObserver for Scripted {
        fn turn_started(&mut self, game: &Game) -> io::Result<()> {
            self.turns_seen.push(game.turn());
            Ok(())
        }

        fn game_over(&mut self, _game: &Game) -> io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_initial_state() {
        let game = new_game(Seat::Two);
        assert_eq!(game.status(), GameStatus::AwaitingMove(Seat::Two));
        assert_eq!(game.turn(), 0);
        assert!(!game.is_terminal());
        assert_eq!(game.board().piece_count(), 0);
    }

    #[test]
    fn test_same_marks_rejected() {
        let one = Player::new("Ada", Mark::O).unwrap();
        let two = Player::new("Grace", Mark::O).unwrap();
        assert_eq!(
            Game::new(one, two, Seat::One),
            Err(SetupError::SameMark(Mark::O))
        );
    }

    #[test]
    fn test_play_alternates_players() {
        let mut game = new_game(Seat::One);
        assert_eq!(game.play(3), Ok(GameStatus::AwaitingMove(Seat::Two)));
        assert_eq!(game.board().get(5, 3), Cell::X);
        assert_eq!(game.play(3), Ok(GameStatus::AwaitingMove(Seat::One)));
        assert_eq!(game.board().get(4, 3), Cell::O);
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_rejected_move_leaves_state_unchanged() {
        let mut game = new_game(Seat::One);
        for _ in 0..ROWS {
            game.play(0).unwrap();
        }
        let before = game.clone();
        assert_eq!(game.play(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(game.play(COLS), Err(MoveError::InvalidColumn(COLS)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_detection() {
        let mut game = new_game(Seat::One);
        // X takes the bottom row, O stacks on top
        for col in 0..3 {
            game.play(col).unwrap();
            game.play(col).unwrap();
        }
        let status = game.play(3).unwrap();

        match status {
            GameStatus::Won { seat, win } => {
                assert_eq!(seat, Seat::One);
                assert_eq!(win.axis, Axis::Row);
                assert_eq!(win.mark, Mark::X);
            }
            other => panic!("expected a win, got {other:?}"),
        }
        assert_eq!(game.winner().map(|(p, _)| p.name()), Some("Ada"));
        assert_eq!(game.play(4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_win_on_filling_move_beats_tie() {
        // No four-in-a-row until O's 42nd move completes a diagonal
        let columns = [
            4, 5, 6, 4, 4, 4, 3, 4, 1, 2, 3, 2, 5, 3, 0, 6, 1, 1, 4, 6, 0, 2, 2, 3, 0, 5, 6,
            0, 3, 1, 1, 0, 0, 5, 3, 6, 1, 2, 6, 2, 5, 5,
        ];
        let mut game = new_game(Seat::One);
        let (last, rest) = columns.split_last().unwrap();
        for &col in rest {
            assert!(matches!(game.play(col), Ok(GameStatus::AwaitingMove(_))));
        }

        let status = game.play(*last).unwrap();
        assert!(game.board().is_full());
        match status {
            GameStatus::Won { seat, win } => {
                assert_eq!(seat, Seat::Two);
                assert_eq!(win.axis, Axis::DiagUp);
                assert!(win.contains(0, 5));
            }
            other => panic!("expected a win, got {other:?}"),
        }
    }

    #[test]
    fn test_run_reprompts_rejected_columns() {
        let mut game = new_game(Seat::One);
        for _ in 0..ROWS {
            game.play(6).unwrap();
        }
        // 9 is out of range, 6 is full, then X wins on column 0
        let mut script = Scripted::new(&[9, 6, 0, 1, 0, 1, 0, 1, 0]);
        let status = game.run(&mut script).unwrap();

        assert_eq!(
            script.rejected,
            vec![(9, MoveError::InvalidColumn(9)), (6, MoveError::ColumnFull(6))]
        );
        assert!(matches!(status, GameStatus::Won { seat: Seat::One, .. }));
        assert!(script.finished);
        assert_eq!(script.turns_seen, vec![6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_run_stops_on_input_error() {
        let mut game = new_game(Seat::One);
        let mut script = Scripted::new(&[3]);
        let err = game.run(&mut script).unwrap_err();
        assert!(matches!(err, GameError::Input(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert!(!script.finished);
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_rematch_resets_board() {
        let mut game = new_game(Seat::Two);
        game.play(2).unwrap();
        let fresh = game.rematch();
        assert_eq!(fresh.status(), GameStatus::AwaitingMove(Seat::Two));
        assert_eq!(fresh.board().piece_count(), 0);
        assert_eq!(fresh.player(Seat::One).name(), "Ada");
    }
}
