use crate::core::time_source::TimeSource;
use crate::core::tuner::Tuner;
use crate::domain::model::{TimeSnapshot, TransmissionResult};
use crate::domain::ports::{Clock, TransmissionFetcher};
use crate::ui::app::{action_for_key, ClockApp, Effect};
use crate::ui::digits::render_clock_lines;
use crate::ui::render;
use crate::utils::error::Result;
use crossterm::event::{self, Event, KeyEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum AppEvent {
    Tick(TimeSnapshot),
    Key(KeyEvent),
    Transmission(TransmissionResult),
    Redraw,
}

/// Raw mode + alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

/// Blocking crossterm reader on its own thread; stops when dropped.
struct InputReader {
    stop: Arc<AtomicBool>,
}

impl InputReader {
    fn spawn(tx: UnboundedSender<AppEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        tokio::task::spawn_blocking(move || {
            while !flag.load(Ordering::Relaxed) && !tx.is_closed() {
                let ready = match event::poll(INPUT_POLL) {
                    Ok(ready) => ready,
                    Err(e) => {
                        tracing::error!("❌ Terminal input failed: {}", e);
                        break;
                    }
                };
                if !ready {
                    continue;
                }
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(_, _)) => tx.send(AppEvent::Redraw),
                    Ok(_) => Ok(()),
                    Err(e) => {
                        tracing::error!("❌ Terminal input failed: {}", e);
                        break;
                    }
                };
                if forwarded.is_err() {
                    break;
                }
            }
        });

        Self { stop }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn start_tuning<F: TransmissionFetcher>(
    tuner: &Tuner<F>,
    label: String,
    tx: &UnboundedSender<AppEvent>,
) {
    let Some(handle) = tuner.tune_in(label) else {
        return;
    };

    let tx = tx.clone();
    tokio::spawn(async move {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("❌ Transmission task failed: {}", e);
                TransmissionResult::signal_lost()
            }
        };
        let _ = tx.send(AppEvent::Transmission(result));
    });
}

/// Interactive clock. Returns once the user quits.
pub async fn run<C: Clock, F: TransmissionFetcher>(
    time_source: TimeSource<C>,
    tuner: Tuner<F>,
    mut app: ClockApp,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (tx, mut rx) = mpsc::unbounded_channel();

    let tick_tx = tx.clone();
    let observation = time_source.observe(app.use_24_hour, move |snapshot| {
        let _ = tick_tx.send(AppEvent::Tick(snapshot));
    });
    let _input = InputReader::spawn(tx.clone());

    tracing::info!("🚀 Clock running (theme: {}, 24h: {})", app.theme, app.use_24_hour);
    terminal.draw(|frame| render::draw(frame, &app))?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Tick(snapshot) => app.on_tick(snapshot),
            AppEvent::Transmission(result) => app.on_transmission(result),
            AppEvent::Redraw => {}
            AppEvent::Key(key) => {
                let Some(action) = action_for_key(key) else {
                    continue;
                };
                tracing::debug!("Action: {:?}", action);
                match app.apply(action) {
                    Effect::HourFormatChanged(use_24_hour) => {
                        observation.set_24_hour(use_24_hour)
                    }
                    Effect::StartTuning(label) => start_tuning(&tuner, label, &tx),
                    Effect::Exit => break,
                    Effect::None => {}
                }
            }
        }
        terminal.draw(|frame| render::draw(frame, &app))?;
    }

    observation.stop().await;
    tracing::info!("👋 Clock stopped");
    Ok(())
}

/// Plain-text rendering of one snapshot, as printed by `--once`.
pub fn render_once(snapshot: &TimeSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&snapshot.full_date);
    out.push('\n');
    for line in render_clock_lines(snapshot) {
        out.push_str(&line);
        out.push('\n');
    }
    if !snapshot.period.is_empty() {
        out.push_str(&snapshot.period);
        out.push('\n');
    }
    out
}

/// Print the clock once, optionally followed by one transmission.
pub async fn run_once<C: Clock, F: TransmissionFetcher>(
    time_source: &TimeSource<C>,
    tuner: Option<&Tuner<F>>,
    use_24_hour: bool,
) -> Result<()> {
    let snapshot = time_source.snapshot(use_24_hour);
    print!("{}", render_once(&snapshot));
    io::stdout().flush()?;

    if let Some(tuner) = tuner {
        if let Some(result) = tuner.receive(&snapshot.time_label()).await {
            println!();
            println!("FREQ: {}   TS: {}", result.frequency, result.timestamp);
            println!("\"{}\"", result.message);
        }
    }

    Ok(())
}
