//! Line-oriented front end: prompts on a reader/writer pair, prints the board
//! as text, and feeds column choices into [`Game::run`].

use std::io::{self, BufRead, Write};

use crate::error::MoveError;
use crate::game::{is_valid_name, Board, Cell, Game, GameObserver, GameStatus, Mark, MoveSource, Player, Seat, COLS};

const SEPARATOR: &str = "────────────────────────────";

const TUTORIAL: &str = "\nObject: Connect four of your checkers in a row while preventing your opponent\n\
from doing the same. But, look out, your opponent can sneak up on you and win the game!\n\
The directions you can connect your checkers are: row, column or diagonal.\n\
\nGameplay: Each turn, a player selects the column their piece will fall into.\n\
And, of course, players can tie.";

pub struct TextConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TextConsole { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Read one trimmed line; running out of input is an error.
    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the game finished",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Welcome banner, the optional tutorial, and a pause before setup.
    pub fn introduction(&mut self, offer_tutorial: bool) -> io::Result<()> {
        writeln!(self.output, "Welcome to Connect Four!")?;
        if offer_tutorial {
            writeln!(self.output, "Do you want to see the tutorial?")?;
            if self.ask_yes_no()? {
                writeln!(self.output, "{TUTORIAL}")?;
            }
        }
        writeln!(self.output, "\nSo.. shall we begin?")?;
        writeln!(self.output, "\n>Press ENTER to continue<")?;
        self.read_line()?;
        Ok(())
    }

    pub fn ask_yes_no(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "\n>Enter Y(yes)/N(no)<")?;
            let answer = self.read_line()?.to_lowercase();
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(
                    self.output,
                    "\nSorry, '{answer}' is not a valid answer. Try again."
                )?,
            }
        }
    }

    /// Ask for a player name until a valid one not already `taken` is given.
    pub fn ask_name(&mut self, ordinal: &str, taken: Option<&str>) -> io::Result<String> {
        loop {
            writeln!(self.output, "\nPlayer {ordinal}, enter your name:")?;
            let name = self.read_line()?;
            if !is_valid_name(&name) {
                writeln!(self.output, "\n'{name}' is an invalid name. Please, try again.")?;
            } else if taken.is_some_and(|t| t.eq_ignore_ascii_case(&name)) {
                writeln!(self.output, "\n'{name}' is already taken. Please, try again.")?;
            } else {
                return Ok(name);
            }
        }
    }

    pub fn ask_mark(&mut self, name: &str) -> io::Result<Mark> {
        loop {
            writeln!(
                self.output,
                "\n{name}, enter your symbol:\n>Enter 1 for 'X' or 2 for 'O'"
            )?;
            let choice = self.read_line()?;
            match choice.as_str() {
                "1" => return Ok(Mark::X),
                "2" => return Ok(Mark::O),
                _ => writeln!(
                    self.output,
                    "\n'{choice}' is an invalid symbol. Please, try again."
                )?,
            }
        }
    }

    /// Ask which player moves first, by name.
    pub fn ask_first(&mut self, one: &Player, two: &Player) -> io::Result<Seat> {
        loop {
            writeln!(
                self.output,
                "\nSo, who goes first?\n>Enter {} or {}<",
                one.name(),
                two.name()
            )?;
            let name = self.read_line()?;
            if name.eq_ignore_ascii_case(one.name()) {
                return Ok(Seat::One);
            }
            if name.eq_ignore_ascii_case(two.name()) {
                return Ok(Seat::Two);
            }
            writeln!(self.output, "\n'{name}' is an invalid name. Please, try again.")?;
        }
    }

    /// Interactive setup: two names, player one's mark, and who starts.
    pub fn setup_game(&mut self) -> io::Result<Game> {
        let one_name = self.ask_name("one", None)?;
        let one_mark = self.ask_mark(&one_name)?;
        let two_name = self.ask_name("two", Some(&one_name))?;

        let one = Player::new(one_name, one_mark).map_err(invalid_input)?;
        let two = Player::new(two_name, one_mark.other()).map_err(invalid_input)?;
        let first = self.ask_first(&one, &two)?;

        Game::new(one, two, first).map_err(invalid_input)
    }

    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        write!(self.output, "{}", render_board(board))
    }
}

fn invalid_input(err: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Board as bordered text rows with a column index header.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("\nCurrently board:\n");
    out.push(' ');
    for col in 0..COLS {
        out.push_str(&format!(" {col}  "));
    }
    out.push('\n');
    for row in board.rows() {
        out.push('|');
        for cell in row {
            let symbol = match cell {
                Cell::Empty => ' ',
                Cell::X => 'X',
                Cell::O => 'O',
            };
            out.push_str(&format!(" {symbol} |"));
        }
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

impl<R: BufRead, W: Write> MoveSource for TextConsole<R, W> {
    fn choose_column(&mut self, _board: &Board, player: &Player) -> io::Result<usize> {
        loop {
            writeln!(self.output, "{}, enter a column:", player.name())?;
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(column) => return Ok(column),
                Err(_) => writeln!(self.output, "\nInvalid column. Try again.")?,
            }
        }
    }

    fn column_rejected(&mut self, _column: usize, reason: MoveError) -> io::Result<()> {
        let message = match reason {
            MoveError::InvalidColumn(_) => "Invalid column. Try again.",
            MoveError::ColumnFull(_) => "This column is full! Try again.",
            MoveError::GameOver => "The game is over.",
        };
        writeln!(self.output, "\n{message}")
    }
}

impl<R: BufRead, W: Write> GameObserver for TextConsole<R, W> {
    fn turn_started(&mut self, game: &Game) -> io::Result<()> {
        writeln!(self.output, "\nRound {}. Fight!", game.turn())?;
        self.show_board(game.board())
    }

    fn game_over(&mut self, game: &Game) -> io::Result<()> {
        self.show_board(game.board())?;
        match game.status() {
            GameStatus::Won { seat, win } => {
                let player = game.player(seat);
                writeln!(
                    self.output,
                    "\nCONGRATULATIONS!! {}({}) won by scoring 4 symbols in a row in: {}",
                    player.name(),
                    player.mark(),
                    win.axis
                )
            }
            GameStatus::Tied => writeln!(self.output, "\nIt's a tie!"),
            GameStatus::AwaitingMove(_) => Ok(()),
        }
    }
}
