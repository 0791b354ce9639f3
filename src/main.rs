use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::{AppConfig, UiMode};
use connect_four::console::TextConsole;
use connect_four::game::{Game, Mark, Player, Seat};
use connect_four::logging;
use connect_four::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Use line-by-line text prompts instead of the full-screen UI
    #[arg(long)]
    text: bool,

    /// Skip the tutorial offer in text mode
    #[arg(long)]
    no_tutorial: bool,

    /// Override player one's name
    #[arg(long)]
    player_one: Option<String>,

    /// Override player two's name
    #[arg(long)]
    player_two: Option<String>,

    /// Override player one's mark: X or O
    #[arg(long, value_parser = parse_mark)]
    mark: Option<Mark>,

    /// Override who moves first: one or two
    #[arg(long, value_parser = parse_seat)]
    first: Option<Seat>,

    /// Write logs to this file instead of stderr (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    match s.to_ascii_uppercase().as_str() {
        "X" => Ok(Mark::X),
        "O" => Ok(Mark::O),
        other => Err(format!("unknown mark '{other}' (expected X or O)")),
    }
}

fn parse_seat(s: &str) -> Result<Seat, String> {
    match s.to_ascii_lowercase().as_str() {
        "one" | "1" => Ok(Seat::One),
        "two" | "2" => Ok(Seat::Two),
        other => Err(format!("unknown player '{other}' (expected one or two)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref()).context("setting up logging")?;

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(name) = cli.player_one {
        config.players.one = name;
    }
    if let Some(name) = cli.player_two {
        config.players.two = name;
    }
    if let Some(mark) = cli.mark {
        config.players.one_mark = mark;
    }
    if let Some(first) = cli.first {
        config.players.first = first;
    }
    if cli.text {
        config.ui.mode = UiMode::Text;
    }
    if cli.no_tutorial {
        config.ui.tutorial = false;
    }
    config.validate().context("invalid settings")?;

    match config.ui.mode {
        UiMode::Text => run_text(&config),
        UiMode::Tui => run_tui(&config),
    }
}

fn run_text(config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut console = TextConsole::new(stdin.lock(), io::stdout());

    console.introduction(config.ui.tutorial)?;
    let mut game = console.setup_game()?;
    tracing::info!(
        one = game.player(Seat::One).name(),
        two = game.player(Seat::Two).name(),
        "text game started"
    );
    game.run(&mut console)?;
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let players = &config.players;
    let one = Player::new(players.one.as_str(), players.one_mark)?;
    let two = Player::new(players.two.as_str(), players.one_mark.other())?;
    let game = Game::new(one, two, players.first)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(game);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
