use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::Lists;
use crate::model::{AppConfig, Limits};
use crate::parse::parse_list;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App from habit and task CSV text, parked on the panel.
pub fn app_with_lists(habits: &str, tasks: &str) -> App {
    let limits = Limits::default();
    let lists = Lists {
        habits: parse_list(habits, limits).0,
        tasks: parse_list(tasks, limits).0,
    };
    App::new(lists, AppConfig::default(), PathBuf::from("/tmp/test-daybook"))
}

pub const HABITS_CSV: &str = "\
head_name,task_name,streak,done_today
\"Morning\",\"Drink water\",3,1
\"Morning\",\"Stretch\",0,0
\"Evening\",\"Read\",12,0
";

pub const TASKS_CSV: &str = "\
head_name,description,completed
\"\",\"Call mom\",0
\"Work\",\"Send report\",1
\"Work\",\"Book flights\",0
";
