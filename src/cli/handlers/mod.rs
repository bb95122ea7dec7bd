use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::read_config;
use crate::io::{HABITS_FILE, TASKS_FILE, load_list, load_lists, roll_over_if_due};
use crate::model::{HabitItem, Limits, ListItem, TaskItem};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = cli.data_dir.as_path();

    match cli.command {
        None => crate::tui::run(data_dir, cli.log_level.as_deref()),
        Some(cmd) => {
            let limits = read_config(data_dir)?.limits;
            match cmd {
                Commands::Habits => {
                    cmd_list::<HabitItem>(&data_dir.join(HABITS_FILE), limits, json)
                }
                Commands::Tasks => {
                    cmd_list::<TaskItem>(&data_dir.join(TASKS_FILE), limits, json)
                }
                Commands::Rollover => cmd_rollover(data_dir, limits, json),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list<T: ListItem + Serialize>(
    path: &Path,
    limits: Limits,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let collection = load_list::<T>(path, limits)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(&collection))?);
    } else {
        for line in format_list(&collection) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_rollover(
    data_dir: &Path,
    limits: Limits,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let mut lists = load_lists(data_dir, limits);
    let today = Local::now().date_naive();
    roll_over_if_due(data_dir, &mut lists, today, true)?;

    if json {
        let out = RolloverJson {
            date: today.to_string(),
            habits: lists.habits.total_items(),
            tasks: lists.tasks.total_items(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "rolled over {} habits and {} tasks for {}",
            lists.habits.total_items(),
            lists.tasks.total_items(),
            today
        );
    }
    Ok(())
}
