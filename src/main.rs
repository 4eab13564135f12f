mod render;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use maze_game::{Config, Dir, GameState, Observer, Outcome, Session};
use rand::rngs::StdRng;
use render::Renderer;
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Collects notifications so the loop can redraw after each event.
#[derive(Default)]
struct Frontend {
    dirty: bool,
    terminal: Option<Outcome>,
}

impl Observer for Frontend {
    fn on_state_changed(&mut self, _state: &GameState) {
        self.dirty = true;
    }

    fn on_terminal(&mut self, outcome: Outcome) {
        self.terminal = Some(outcome);
    }
}

enum Command {
    Move(Dir),
    Restart,
    Quit,
}

fn main() -> maze_game::Result<()> {
    init_logging()?;
    let config = Config::from_env();
    let mut session = Session::from_config(config)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    if let Err(err) = enter_screen(&mut stdout) {
        let _ = restore_terminal(&mut stdout, terminal::disable_raw_mode);
        return Err(err.into());
    }

    let result = run(&mut stdout, &mut session);

    restore_terminal(&mut stdout, terminal::disable_raw_mode)?;
    result
}

fn enter_screen(stdout: &mut Stdout) -> io::Result<()> {
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

/// Undoes `enter_screen` and raw mode. Raw mode is always turned off, even when
/// the screen commands fail after a partial setup.
fn restore_terminal<W: Write>(
    out: &mut W,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let screen = out
        .execute(Show)
        .and_then(|out| out.execute(LeaveAlternateScreen))
        .map(|_| ());
    disable_raw()?;
    screen
}

/// Logs go to the file named by `MAZE_LOG`; the terminal belongs to the game.
fn init_logging() -> io::Result<()> {
    let Ok(path) = std::env::var("MAZE_LOG") else {
        return Ok(());
    };
    let level = std::env::var("MAZE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(level))
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session<StdRng>) -> maze_game::Result<()> {
    let config = *session.config();
    let mut renderer = Renderer::new(config.cols, config.rows);
    let mut frontend = Frontend::default();
    renderer.render(stdout, session.state())?;

    loop {
        match event::read()? {
            Event::Resize(_, _) => {
                renderer.invalidate();
                frontend.dirty = true;
            }
            Event::Key(key) => match command_for(key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Restart) => {
                    session.reset(&mut frontend)?;
                    renderer.invalidate();
                }
                Some(Command::Move(dir)) => {
                    session.submit_move(dir, &mut frontend);
                }
                None => {}
            },
            _ => {}
        }

        if frontend.dirty {
            frontend.dirty = false;
            renderer.render(stdout, session.state())?;
        }

        // Nothing reaches the session between the announcement and the reset.
        if let Some(outcome) = frontend.terminal.take() {
            renderer.render_banner(stdout, outcome)?;
            if !wait_for_ack()? {
                return Ok(());
            }
            session.reset(&mut frontend)?;
            frontend.dirty = false;
            renderer.invalidate();
            renderer.render(stdout, session.state())?;
        }
    }
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(Dir::Up)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(Dir::Right)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(Dir::Left)),
        _ => None,
    }
}

/// Blocks until a key press. Returns false when the player asked to quit.
fn wait_for_ack() -> io::Result<bool> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return Ok(!matches!(command_for(key), Some(Command::Quit)));
        }
    }
}
