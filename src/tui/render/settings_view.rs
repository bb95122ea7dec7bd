use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::config_io::CONFIG_FILE;
use crate::logging::log_dir;
use crate::tui::app::App;

fn mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Read-only summary of where things live and the active limits
pub fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default().fg(app.theme.text).bg(bg);

    let limits = app.config.limits;
    let rows = [
        ("Data directory", app.data_dir.display().to_string()),
        (
            "Config file",
            app.data_dir.join(CONFIG_FILE).display().to_string(),
        ),
        (
            "Limits",
            format!(
                "{} heads, {} items per head",
                limits.max_heads, limits.max_items_per_head
            ),
        ),
        (
            "Pomodoro",
            format!(
                "work {}, rest {}, step {}",
                mmss(app.pomodoro.work_secs),
                mmss(app.pomodoro.rest_secs),
                mmss(app.pomodoro.progressive_step_secs)
            ),
        ),
        (
            "Log",
            format!(
                "{} in {}",
                app.config.log.level,
                log_dir(&app.data_dir).display()
            ),
        ),
        (
            "Last rollover",
            app.last_rollover
                .map_or_else(|| "never".to_string(), |d| d.to_string()),
        ),
    ];

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "  Settings",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for (key, value) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", key), key_style),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("  Edit {} and restart to change these.", CONFIG_FILE),
        key_style,
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
