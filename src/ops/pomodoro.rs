use serde::{Deserialize, Serialize};

use crate::model::config::PomodoroConfig;

/// Which half of the cycle is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Work,
    Rest,
}

impl Session {
    pub fn label(self) -> &'static str {
        match self {
            Session::Work => "Work",
            Session::Rest => "Rest",
        }
    }

    fn other(self) -> Session {
        match self {
            Session::Work => Session::Rest,
            Session::Rest => Session::Work,
        }
    }
}

/// Standard repeats the same work length; progressive grows it every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    #[default]
    Standard,
    Progressive,
}

impl CycleMode {
    pub fn label(self) -> &'static str {
        match self {
            CycleMode::Standard => "standard",
            CycleMode::Progressive => "progressive",
        }
    }
}

/// Keys the timer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroKey {
    Char(char),
    Enter,
    Backspace,
    Esc,
}

/// Something the owner should act on after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Idle,
    Counted,
    /// A session ran out; the next one is loaded and paused
    SessionEnded(Session),
}

/// In-progress MMSS entry for one of the two base durations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationEdit {
    pub target: Session,
    digits: String,
}

impl DurationEdit {
    /// Four display slots, `_` for the ones not typed yet
    pub fn slots(&self) -> [char; 4] {
        let mut out = ['_'; 4];
        for (slot, c) in out.iter_mut().zip(self.digits.chars()) {
            *slot = c;
        }
        out
    }

    pub fn cursor(&self) -> usize {
        self.digits.len()
    }

    /// Seconds for a complete entry: minutes capped at 99, seconds at 59
    fn seconds(&self) -> Option<u32> {
        if self.digits.len() != 4 {
            return None;
        }
        let value: Vec<u32> = self.digits.chars().filter_map(|c| c.to_digit(10)).collect();
        let minutes = (value[0] * 10 + value[1]).min(99);
        let seconds = (value[2] * 10 + value[3]).min(59);
        Some(minutes * 60 + seconds)
    }
}

/// The focus timer. Driven by `handle_key` and a once-per-second `tick`.
#[derive(Debug, Clone)]
pub struct Pomodoro {
    pub work_secs: u32,
    pub rest_secs: u32,
    pub progressive_step_secs: u32,
    current_work_secs: u32,
    remaining: u32,
    session: Session,
    cycle: CycleMode,
    running: bool,
    frame: usize,
    edit: Option<DurationEdit>,
}

impl Pomodoro {
    pub fn new(config: &PomodoroConfig) -> Self {
        let mut pomodoro = Pomodoro {
            work_secs: config.work_secs,
            rest_secs: config.rest_secs,
            progressive_step_secs: config.progressive_step_secs,
            current_work_secs: 0,
            remaining: 0,
            session: Session::Work,
            cycle: CycleMode::Standard,
            running: false,
            frame: 0,
            edit: None,
        };
        pomodoro.start_session(Session::Work);
        pomodoro
    }

    /// Restore saved durations and cycle mode, then load a fresh work session
    pub fn restore(&mut self, work_secs: u32, rest_secs: u32, cycle: CycleMode) {
        self.work_secs = work_secs;
        self.rest_secs = rest_secs;
        self.cycle = cycle;
        self.current_work_secs = 0;
        self.start_session(Session::Work);
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn cycle(&self) -> CycleMode {
        self.cycle
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Animation frame, 0..4
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn edit(&self) -> Option<&DurationEdit> {
        self.edit.as_ref()
    }

    /// Whether the duration editor is swallowing keys
    pub fn is_capturing(&self) -> bool {
        self.edit.is_some()
    }

    /// `MM:SS` of the remaining time
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    fn start_session(&mut self, session: Session) {
        self.session = session;
        self.running = false;
        self.edit = None;
        self.remaining = match session {
            Session::Work => {
                self.current_work_secs =
                    if self.cycle == CycleMode::Progressive && self.current_work_secs > 0 {
                        self.current_work_secs + self.progressive_step_secs
                    } else {
                        self.work_secs
                    };
                self.current_work_secs
            }
            Session::Rest => self.rest_secs,
        };
    }

    pub fn handle_key(&mut self, key: PomodoroKey) {
        if let Some(edit) = self.edit.as_mut() {
            match key {
                PomodoroKey::Char(c) if c.is_ascii_digit() => {
                    if edit.digits.len() < 4 {
                        edit.digits.push(c);
                    }
                }
                PomodoroKey::Backspace => {
                    edit.digits.pop();
                }
                PomodoroKey::Enter => {
                    let edit = self.edit.take();
                    if let Some((target, secs)) = edit.and_then(|e| Some((e.target, e.seconds()?)))
                    {
                        self.apply_duration(target, secs);
                    }
                }
                PomodoroKey::Esc | PomodoroKey::Char('b' | 'i' | 'o') => self.edit = None,
                PomodoroKey::Char(_) => {}
            }
            return;
        }

        match key {
            PomodoroKey::Char(c @ ('i' | 'o')) => {
                if self.cycle == CycleMode::Standard {
                    self.running = false;
                    self.edit = Some(DurationEdit {
                        target: if c == 'i' { Session::Work } else { Session::Rest },
                        digits: String::new(),
                    });
                }
            }
            PomodoroKey::Char(' ') => self.running = !self.running,
            PomodoroKey::Char('r') => self.start_session(self.session),
            PomodoroKey::Char('m') => {
                self.cycle = match self.cycle {
                    CycleMode::Standard => CycleMode::Progressive,
                    CycleMode::Progressive => CycleMode::Standard,
                };
                self.current_work_secs = 0;
                self.start_session(Session::Work);
            }
            _ => {}
        }
    }

    fn apply_duration(&mut self, target: Session, secs: u32) {
        log::debug!("{} duration set to {}s", target.label(), secs);
        match target {
            Session::Work => self.work_secs = secs,
            Session::Rest => self.rest_secs = secs,
        }
        if target == self.session {
            self.start_session(self.session);
        }
    }

    /// Advance one wall-clock second
    pub fn tick(&mut self) -> TickEvent {
        if !self.running {
            return TickEvent::Idle;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            self.frame = (self.frame + 1) % 4;
            return TickEvent::Counted;
        }
        let ended = self.session;
        log::info!("{} session finished", ended.label());
        self.start_session(ended.other());
        TickEvent::SessionEnded(ended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn timer() -> Pomodoro {
        Pomodoro::new(&PomodoroConfig::default())
    }

    fn type_keys(p: &mut Pomodoro, s: &str) {
        for c in s.chars() {
            p.handle_key(PomodoroKey::Char(c));
        }
    }

    #[test]
    fn starts_paused_on_work() {
        let p = timer();
        assert_eq!(p.session(), Session::Work);
        assert_eq!(p.clock(), "25:00");
        assert!(!p.is_running());
        assert_eq!(p.cycle(), CycleMode::Standard);
    }

    #[test]
    fn ticks_only_while_running() {
        let mut p = timer();
        assert_eq!(p.tick(), TickEvent::Idle);
        assert_eq!(p.remaining(), 1500);
        p.handle_key(PomodoroKey::Char(' '));
        assert_eq!(p.tick(), TickEvent::Counted);
        assert_eq!(p.clock(), "24:59");
        assert_eq!(p.frame(), 1);
        p.handle_key(PomodoroKey::Char(' '));
        assert_eq!(p.tick(), TickEvent::Idle);
    }

    #[test]
    fn session_end_switches_and_pauses() {
        let mut p = timer();
        p.restore(1, 2, CycleMode::Standard);
        p.handle_key(PomodoroKey::Char(' '));
        assert_eq!(p.tick(), TickEvent::Counted);
        assert_eq!(p.tick(), TickEvent::SessionEnded(Session::Work));
        assert_eq!(p.session(), Session::Rest);
        assert_eq!(p.remaining(), 2);
        assert!(!p.is_running());
    }

    #[test]
    fn progressive_work_grows_each_cycle() {
        let mut p = timer();
        p.restore(60, 1, CycleMode::Standard);
        p.progressive_step_secs = 30;
        p.handle_key(PomodoroKey::Char('m'));
        assert_eq!(p.cycle(), CycleMode::Progressive);
        assert_eq!(p.remaining(), 60);

        // Run work to the end, then rest to the end
        p.handle_key(PomodoroKey::Char(' '));
        while p.session() == Session::Work {
            p.tick();
        }
        p.handle_key(PomodoroKey::Char(' '));
        while p.session() == Session::Rest {
            p.tick();
        }
        assert_eq!(p.remaining(), 90);

        p.handle_key(PomodoroKey::Char('m'));
        assert_eq!(p.cycle(), CycleMode::Standard);
        assert_eq!(p.remaining(), 60);
    }

    #[test]
    fn restart_reloads_current_session() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char(' '));
        p.tick();
        p.tick();
        p.handle_key(PomodoroKey::Char('r'));
        assert_eq!(p.clock(), "25:00");
        assert!(!p.is_running());
    }

    #[test]
    fn editing_work_duration() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char(' '));
        p.handle_key(PomodoroKey::Char('i'));
        assert!(p.is_capturing());
        assert!(!p.is_running());
        type_keys(&mut p, "12x");
        assert_eq!(p.edit().unwrap().slots(), ['1', '2', '_', '_']);
        p.handle_key(PomodoroKey::Backspace);
        type_keys(&mut p, "2759");
        assert_eq!(p.edit().unwrap().cursor(), 4);
        p.handle_key(PomodoroKey::Enter);
        assert!(!p.is_capturing());
        assert_eq!(p.work_secs, 12 * 60 + 59);
        assert_eq!(p.clock(), "12:59");
    }

    #[test]
    fn seconds_are_capped() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char('o'));
        type_keys(&mut p, "0199");
        p.handle_key(PomodoroKey::Enter);
        assert_eq!(p.rest_secs, 119);
        // Work is current, so the clock is untouched
        assert_eq!(p.clock(), "25:00");
    }

    #[test]
    fn incomplete_or_cancelled_edit_changes_nothing() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char('i'));
        type_keys(&mut p, "12");
        p.handle_key(PomodoroKey::Enter);
        assert!(!p.is_capturing());
        assert_eq!(p.work_secs, 1500);

        for cancel in [
            PomodoroKey::Esc,
            PomodoroKey::Char('b'),
            PomodoroKey::Char('o'),
        ] {
            p.handle_key(PomodoroKey::Char('i'));
            type_keys(&mut p, "0100");
            p.handle_key(cancel);
            assert!(!p.is_capturing());
            assert_eq!(p.work_secs, 1500);
        }
    }

    #[test]
    fn progressive_mode_has_no_editor() {
        let mut p = timer();
        p.handle_key(PomodoroKey::Char('m'));
        p.handle_key(PomodoroKey::Char('i'));
        assert!(!p.is_capturing());
    }
}
