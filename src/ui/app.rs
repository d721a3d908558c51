use crate::domain::model::{TimeSnapshot, TransmissionResult, TunerState};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleHourFormat,
    ToggleFullscreen,
    CycleTheme,
    SetTheme(Theme),
    TuneIn,
    Quit,
}

/// What the runner has to do after an action changed the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    HourFormatChanged(bool),
    StartTuning(String),
    Exit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::ToggleHourFormat),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleFullscreen),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::CycleTheme),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Some(Action::SetTheme(Theme::ALL[index]))
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::TuneIn),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ClockApp {
    pub snapshot: TimeSnapshot,
    pub use_24_hour: bool,
    pub theme: Theme,
    pub fullscreen: bool,
    pub tuner: TunerState,
    /// Separator pulse, flipped on every tick.
    pub pulse: bool,
    pub should_quit: bool,
}

impl ClockApp {
    pub fn new(snapshot: TimeSnapshot, use_24_hour: bool, theme: Theme, fullscreen: bool) -> Self {
        Self {
            snapshot,
            use_24_hour,
            theme,
            fullscreen,
            tuner: TunerState::Idle,
            pulse: true,
            should_quit: false,
        }
    }

    pub fn on_tick(&mut self, snapshot: TimeSnapshot) {
        self.snapshot = snapshot;
        self.pulse = !self.pulse;
    }

    pub fn on_transmission(&mut self, result: TransmissionResult) {
        self.tuner = TunerState::Received(result);
    }

    pub fn is_scanning(&self) -> bool {
        self.tuner == TunerState::Scanning
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::ToggleHourFormat => {
                self.use_24_hour = !self.use_24_hour;
                Effect::HourFormatChanged(self.use_24_hour)
            }
            Action::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                Effect::None
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
                Effect::None
            }
            Action::SetTheme(theme) => {
                self.theme = theme;
                Effect::None
            }
            // 收訊中按鈕停用
            Action::TuneIn if self.is_scanning() => Effect::None,
            Action::TuneIn => {
                self.tuner = TunerState::Scanning;
                Effect::StartTuning(self.snapshot.time_label())
            }
            Action::Quit => {
                self.should_quit = true;
                Effect::Exit
            }
        }
    }
}
