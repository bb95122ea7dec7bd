pub mod editor;
pub mod pomodoro;
pub mod rollover;

pub use editor::{EditMode, EditOutcome, EditorKey, EditorView, Interaction, ListEditor};
pub use pomodoro::{CycleMode, Pomodoro, PomodoroKey, Session, TickEvent};
