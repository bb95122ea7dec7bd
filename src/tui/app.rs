use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::io::config_io::read_config;
use crate::io::marker::read_last_update;
use crate::io::state::{PomodoroState, UiState, read_ui_state, write_ui_state};
use crate::io::{
    HABITS_FILE, Lists, StorageError, TASKS_FILE, load_lists, roll_over_if_due, save_list,
    save_lists,
};
use crate::logging::init_logging;
use crate::model::{AppConfig, HabitItem, TaskItem};
use crate::ops::{ListEditor, Pomodoro, TickEvent};

use super::input;
use super::session::{CrosstermKeys, KeySource, Session};
use super::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Modules reachable from the panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Habits,
    Tasks,
    Pomodoro,
    Settings,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::Habits,
        Module::Tasks,
        Module::Pomodoro,
        Module::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Module::Habits => "Habits",
            Module::Tasks => "Tasks",
            Module::Pomodoro => "Pomodoro",
            Module::Settings => "Settings",
        }
    }
}

/// What fills the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Panel,
    Module(Module),
}

/// Main application state
pub struct App {
    pub habits: ListEditor<HabitItem>,
    pub tasks: ListEditor<TaskItem>,
    pub pomodoro: Pomodoro,
    pub screen: Screen,
    pub panel_cursor: usize,
    pub should_quit: bool,
    pub theme: Theme,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub last_rollover: Option<NaiveDate>,
    last_tick: Instant,
}

impl App {
    pub fn new(lists: Lists, config: AppConfig, data_dir: PathBuf) -> Self {
        let theme = Theme::from_config(&config.ui);
        let pomodoro = Pomodoro::new(&config.pomodoro);
        App {
            habits: ListEditor::new(lists.habits),
            tasks: ListEditor::new(lists.tasks),
            pomodoro,
            screen: Screen::Panel,
            panel_cursor: 0,
            should_quit: false,
            theme,
            config,
            data_dir,
            last_rollover: None,
            last_tick: Instant::now(),
        }
    }

    pub fn active_module(&self) -> Option<Module> {
        match self.screen {
            Screen::Panel => None,
            Screen::Module(module) => Some(module),
        }
    }

    /// Open the module under the panel cursor
    pub fn open_selected(&mut self) {
        let module = Module::ALL[self.panel_cursor % Module::ALL.len()];
        log::debug!("open module {}", module.label());
        self.screen = Screen::Module(module);
        self.last_tick = Instant::now();
    }

    pub fn back_to_panel(&mut self) {
        self.screen = Screen::Panel;
    }

    /// Advance the pomodoro once per elapsed second, only while it is on screen
    pub fn tick(&mut self, now: Instant) -> Option<TickEvent> {
        if self.active_module() != Some(Module::Pomodoro) {
            self.last_tick = now;
            return None;
        }
        if now.duration_since(self.last_tick) < TICK_INTERVAL {
            return None;
        }
        self.last_tick = now;
        Some(self.pomodoro.tick())
    }

    pub fn save_habits(&self) -> Result<(), StorageError> {
        save_list(&self.data_dir.join(HABITS_FILE), self.habits.collection())
    }

    pub fn save_tasks(&self) -> Result<(), StorageError> {
        save_list(&self.data_dir.join(TASKS_FILE), self.tasks.collection())
    }

    pub fn save_all(&self) -> Result<(), StorageError> {
        save_lists(
            &self.data_dir,
            self.habits.collection(),
            self.tasks.collection(),
        )
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            panel_cursor: self.panel_cursor,
            pomodoro: Some(PomodoroState {
                work_secs: self.pomodoro.work_secs,
                rest_secs: self.pomodoro.rest_secs,
                cycle: self.pomodoro.cycle(),
            }),
        }
    }

    pub fn restore_ui_state(&mut self, state: &UiState) {
        self.panel_cursor = state.panel_cursor.min(Module::ALL.len() - 1);
        if let Some(p) = state.pomodoro {
            self.pomodoro.restore(p.work_secs, p.rest_secs, p.cycle);
        }
    }
}

/// Load everything, run the daily rollover, then hand the terminal to the UI.
/// Both lists are saved on the way out.
pub fn run(data_dir: &Path, log_level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let config = read_config(data_dir)?;

    let level = log_level.unwrap_or(&config.log.level).to_string();
    let _logger = match init_logging(&level, data_dir) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: {}", e);
            None
        }
    };

    let mut lists = load_lists(data_dir, config.limits);
    let today = Local::now().date_naive();
    if let Err(e) = roll_over_if_due(data_dir, &mut lists, today, false) {
        log::error!("daily rollover failed: {}", e);
    }

    let mut app = App::new(lists, config, data_dir.to_path_buf());
    app.last_rollover = read_last_update(data_dir);
    if let Some(state) = read_ui_state(data_dir) {
        app.restore_ui_state(&state);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let theme = app.theme.clone();
    let result = {
        let mut session = Session::new(&mut terminal, CrosstermKeys, theme);
        run_event_loop(&mut session, &mut app)
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_all() {
        eprintln!("error: {}", e);
    }
    if let Err(e) = write_ui_state(data_dir, &app.ui_state()) {
        log::warn!("could not save ui state: {}", e);
    }
    log::info!("shutdown");

    result
}

fn run_event_loop<B: Backend, K: KeySource>(
    session: &mut Session<'_, B, K>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        session.draw(app)?;

        if let Some(key) = session.poll_key(POLL_INTERVAL)? {
            input::handle_key(app, key, session);
        }

        if let Some(TickEvent::SessionEnded(_)) = app.tick(Instant::now()) {
            session.bell();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, Limits};
    use crate::ops::CycleMode;

    fn empty_app() -> App {
        let lists = Lists {
            habits: Collection::new(Limits::default()),
            tasks: Collection::new(Limits::default()),
        };
        App::new(lists, AppConfig::default(), PathBuf::from("/tmp/daybook-test"))
    }

    #[test]
    fn pomodoro_only_ticks_while_open() {
        let mut app = empty_app();
        app.pomodoro.handle_key(crate::ops::PomodoroKey::Char(' '));
        let start = Instant::now();
        assert_eq!(app.tick(start + Duration::from_secs(5)), None);

        app.panel_cursor = 2;
        app.open_selected();
        let opened = app.last_tick;
        assert_eq!(app.tick(opened + Duration::from_millis(500)), None);
        assert_eq!(
            app.tick(opened + Duration::from_secs(1)),
            Some(TickEvent::Counted)
        );
        assert_eq!(app.pomodoro.clock(), "24:59");
    }

    #[test]
    fn ui_state_round_trips_through_app() {
        let mut app = empty_app();
        app.panel_cursor = 3;
        app.pomodoro.restore(600, 120, CycleMode::Progressive);
        let state = app.ui_state();

        let mut other = empty_app();
        other.restore_ui_state(&state);
        assert_eq!(other.panel_cursor, 3);
        assert_eq!(other.pomodoro.work_secs, 600);
        assert_eq!(other.pomodoro.cycle(), CycleMode::Progressive);
        assert_eq!(other.pomodoro.clock(), "10:00");
    }

    #[test]
    fn restored_cursor_is_clamped() {
        let mut app = empty_app();
        app.restore_ui_state(&UiState {
            panel_cursor: 40,
            pomodoro: None,
        });
        assert_eq!(app.panel_cursor, 3);
    }
}
