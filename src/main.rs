//! Pachisi - Entry Point
//!
//! This is the main executable that initializes the terminal,
//! loads and validates the board set, and runs the frame loop.

use std::fs::OpenOptions;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use pachisi::audio::AudioManager;
use pachisi::board::{BoardSet, REFERENCE_BOARD};
use pachisi::game::{MinigameController, SessionConfig, TickContext, TickOutcome};
use pachisi::ui::App;

/// Target frames per second for the game loop
const TARGET_FPS: u64 = 60;
const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);

fn main() -> Result<()> {
    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("pachisi.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Pachisi v{}", env!("CARGO_PKG_VERSION"));

    // Board configuration errors are fatal before any session starts.
    let boards = BoardSet::load()?;
    let board = boards
        .find(REFERENCE_BOARD)
        .cloned()
        .ok_or_else(|| anyhow!("board '{}' missing from board set", REFERENCE_BOARD))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the session and its host collaborators
    let mut app = App::new();
    let mut audio = AudioManager::new();
    let mut controller = MinigameController::new(SessionConfig::new(board));

    // Run the game loop
    let result = run_game_loop(&mut terminal, &mut app, &mut audio, &mut controller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Pachisi shut down cleanly");
    result
}

/// Main game loop: one controller tick per frame
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    audio: &mut AudioManager,
    controller: &mut MinigameController,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Collect this frame's input
        app.begin_frame();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Advance the session
        let outcome = {
            let mut ctx = TickContext {
                input: &app.input,
                surface: &mut app.message_box,
                effects: &mut app.banner,
                audio: &mut *audio,
            };
            controller.tick(&mut ctx)?
        };

        // Render
        terminal.draw(|frame| {
            app.render(frame, controller);
        })?;

        // The session signals its own end; hand the terminal back.
        if outcome == TickOutcome::Finished {
            break;
        }

        // Frame rate limiting
        let frame_time = frame_start.elapsed();
        if frame_time < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - frame_time);
        }
    }

    Ok(())
}
