use std::path::Path;

use chrono::NaiveDate;

use crate::io::marker::{read_last_update, write_last_update};
use crate::io::store_io::{HABITS_FILE, StorageError, TASKS_FILE, load_list_or_empty, save_list};
use crate::model::{Collection, HabitItem, Limits, TaskItem};
use crate::ops::rollover::{is_due, roll_over};

/// Both persisted lists
#[derive(Debug, Clone)]
pub struct Lists {
    pub habits: Collection<HabitItem>,
    pub tasks: Collection<TaskItem>,
}

/// Load both lists from the data directory; anything unreadable starts empty
pub fn load_lists(data_dir: &Path, limits: Limits) -> Lists {
    Lists {
        habits: load_list_or_empty(&data_dir.join(HABITS_FILE), limits),
        tasks: load_list_or_empty(&data_dir.join(TASKS_FILE), limits),
    }
}

/// Save both lists. Both writes are attempted; the first failure is returned.
pub fn save_lists(
    data_dir: &Path,
    habits: &Collection<HabitItem>,
    tasks: &Collection<TaskItem>,
) -> Result<(), StorageError> {
    let habits = save_list(&data_dir.join(HABITS_FILE), habits);
    let tasks = save_list(&data_dir.join(TASKS_FILE), tasks);
    for result in [&habits, &tasks] {
        if let Err(e) = result {
            log::error!("{}", e);
        }
    }
    habits.and(tasks)
}

/// Run the daily rollover when the marker is not today's date (or `force`).
///
/// The rollover is applied in memory, both lists are saved and the marker is
/// rewritten. Returns whether a rollover happened.
pub fn roll_over_if_due(
    data_dir: &Path,
    lists: &mut Lists,
    today: NaiveDate,
    force: bool,
) -> Result<bool, StorageError> {
    let last = read_last_update(data_dir);
    if !force && !is_due(last, today) {
        log::debug!("rollover already done for {}", today);
        return Ok(false);
    }
    log::info!(
        "daily rollover: last={} today={}",
        last.map_or_else(|| "never".to_string(), |d| d.to_string()),
        today
    );
    roll_over(&mut lists.habits);
    roll_over(&mut lists.tasks);
    let saved = save_lists(data_dir, &lists.habits, &lists.tasks);
    write_last_update(data_dir, today)?;
    saved.map(|()| true)
}
