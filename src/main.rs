//! keystate demo - sample the keyboard every tick and log movement intents

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode as CtKeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use std::{
    io::stdout,
    rc::Rc,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use keystate::{
    config::Config,
    intent::{Intent, IntentSampler},
    keyboard::{KeySource, KeyboardState, PolledKeySource},
    ui::{App, AppState, IntentEntry, IntentLog, KeyPanel, StatusBar, ThemeColors},
};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("failed to load config ({err}), using defaults");
        Config::default()
    });

    // Ctrl-C / SIGTERM flag for clean terminal restoration
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Wire the input pipeline: OS poller -> tracker -> intent sampler
    let source = Rc::new(PolledKeySource::new());
    let mut keyboard = KeyboardState::new(Rc::clone(&source) as Rc<dyn KeySource>);
    keyboard.connect();

    let sampler = IntentSampler::new(config.bindings.clone());
    sampler
        .emitter()
        .any(Rc::new(|intent: &Intent, _frame: &u64| {
            log::info!("{}", intent.label());
        }));

    let mut app = App::new(config.clone());
    let colors = ThemeColors::from_theme(config.ui.theme);
    let tick_rate = config.refresh_interval();
    let deadline = config.auto_exit().map(|limit| Instant::now() + limit);

    // Main loop
    loop {
        source.poll();

        if app.state == AppState::Running {
            let active = sampler.sample(&keyboard);
            app.record(&active);
        }

        // Draw UI
        terminal.draw(|frame| {
            frame.render_widget(
                Block::default().style(Style::default().bg(colors.bg)),
                frame.area(),
            );

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6), // key panel
                    Constraint::Min(6),    // intent log
                    Constraint::Length(1), // status bar
                ])
                .split(frame.area());

            frame.render_widget(KeyPanel::new(&keyboard, colors), chunks[0]);

            let entries: Vec<IntentEntry> = app.log().cloned().collect();
            frame.render_widget(IntentLog::new(&entries, colors), chunks[1]);

            let state_str = match app.state {
                AppState::Running => "RUNNING",
                AppState::Paused => "PAUSED",
                AppState::Quitting => "QUITTING",
            };
            let elapsed = app.elapsed_formatted();
            let status = StatusBar::new(
                state_str,
                &elapsed,
                app.total_samples,
                app.total_intents,
                colors,
            )
            .message(app.status());
            frame.render_widget(status, chunks[2]);
        })?;

        // Handle terminal events (navigation/control)
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    CtKeyCode::Char('q') | CtKeyCode::Esc => app.quit(),
                    CtKeyCode::Char(' ') => app.toggle_pause(),
                    CtKeyCode::Char('r') => app.reset(),
                    _ => {}
                }
            }
        }

        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                app.quit();
            }
        }
        if interrupted.load(Ordering::SeqCst) {
            app.quit();
        }
        if app.state == AppState::Quitting {
            break;
        }
    }

    keyboard.disconnect();

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    println!("\nkeystate session complete.");
    println!("Samples taken: {}", app.total_samples);
    println!("Intents recorded: {}", app.total_intents);
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}
