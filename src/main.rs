#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use blockdrop::app::{App, AppResult};
use blockdrop::config::{self, Config};
use blockdrop::input::Action;
use blockdrop::ui;
use crossterm::event::{KeyCode, KeyEventKind};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "blockdrop.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    // The terminal is in raw mode, so stderr output would corrupt the screen
    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockdrop");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(&config);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AppResult<()> {
    let frame_interval = Duration::from_millis(app.display.frame_interval_ms.max(1));
    let mut last_frame = Instant::now();

    // Flush anything typed before the game started
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    if !app.world.resource::<blockdrop::sound::AudioState>().is_audio_available() {
        error!("Audio thread unavailable. Continuing without sound.");
    }

    loop {
        if app.should_quit {
            return Ok(());
        }

        // Each frame: apply queued input, advance gravity, redraw
        if last_frame.elapsed() >= frame_interval {
            last_frame = Instant::now();
            let now_ms = app.now_ms();
            app.update(now_ms);
            terminal.draw(|f| ui::render(f, &app))?;
        }

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                debug!("Key event: {key:?}");

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Char('r') => app.restart(),
                    KeyCode::Char('m') => app.toggle_music(),
                    KeyCode::Char('n') => app.toggle_sound(),
                    KeyCode::Char('+' | '=') => app.adjust_volume(0.1),
                    KeyCode::Char('-' | '_') => app.adjust_volume(-0.1),
                    code => {
                        if let Some(action) = Action::from_key(code) {
                            app.queue_action(action);
                        }
                    }
                }
            }
        }
    }
}
