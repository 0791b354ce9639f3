use crate::game::{Board, Game, GameStatus, Mark, Win, COLS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, game: &Game, selected_column: usize, message: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    let win = game.winner().map(|(_, win)| win);
    render_board(frame, game.board(), selected_column, win.as_ref(), chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::X => Color::Red,
        Mark::O => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game: &Game, area: Rect) {
    let (status, color) = match game.status() {
        GameStatus::AwaitingMove(seat) => {
            let player = game.player(seat);
            (
                format!("Round {}  |  {} ({}) to move", game.turn(), player.name(), player.mark()),
                mark_color(player.mark()),
            )
        }
        GameStatus::Won { seat, .. } => {
            let player = game.player(seat);
            (
                format!("Game Over  |  {} wins", player.name()),
                mark_color(player.mark()),
            )
        }
        GameStatus::Tied => ("Game Over  |  Tie".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    selected_column: usize,
    win: Option<&Win>,
    area: Rect,
) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for (row, cells) in board.rows().iter().enumerate() {
        let mut row_spans = vec![Span::raw("  ║")];

        for (col, cell) in cells.iter().enumerate() {
            let (symbol, mut style) = match cell.mark() {
                None => (" . ", Style::default().fg(Color::DarkGray)),
                Some(mark) => (" ● ", Style::default().fg(mark_color(mark))),
            };
            if win.is_some_and(|w| w.contains(row, col)) {
                style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→: Move  |  1-7 or Enter: Drop  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Player, Seat};
    use ratatui::{backend::TestBackend, Terminal};

    fn game() -> Game {
        let one = Player::new("Ada", Mark::X).unwrap();
        let two = Player::new("Grace", Mark::O).unwrap();
        Game::new(one, two, Seat::One).unwrap()
    }

    fn screen(game: &Game, message: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|f| render(f, game, 3, message))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_header_names_active_player() {
        let text = screen(&game(), None);
        assert!(text.contains("Ada (X) to move"));
        assert!(text.contains("Connect Four"));
    }

    #[test]
    fn test_renders_pieces_and_message() {
        let mut game = game();
        game.play(0).unwrap();
        let text = screen(&game, Some("Column is full!"));
        assert!(text.contains('●'));
        assert!(text.contains("Column is full!"));
        assert!(text.contains("Grace (O) to move"));
    }

    #[test]
    fn test_header_after_win() {
        let mut game = game();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            game.play(col).unwrap();
        }
        assert!(screen(&game, None).contains("Game Over  |  Ada wins"));
    }
}
