use serde::{Deserialize, Serialize};

/// Maximum characters in a head name or a habit name
pub const NAME_MAX_LEN: usize = 47;
/// Maximum characters in a task description
pub const DESCRIPTION_MAX_LEN: usize = 127;

/// The capability set shared by every kind of entry the list editor manages.
///
/// Variant-specific policy lives in the associated constants so the editor,
/// cursor and persistence code can stay generic.
pub trait ListItem: Clone + std::fmt::Debug {
    /// Head 0 is an unnamed, undeletable, unselectable group of standalone items
    const RESERVED_HEAD: bool;
    /// Character bound for the item text
    const TEXT_LIMIT: usize;
    /// Key that deletes the selection in edit mode
    const DELETE_KEY: char;
    /// Persist the collection after every delete
    const SAVE_ON_DELETE: bool;
    /// Prompt shown when creating an item
    const PROMPT: &'static str;
    /// Module title shown above the list
    const TITLE: &'static str;
    /// First line of the persisted file
    const CSV_HEADER: &'static str;

    /// Build a fresh item from user-entered text
    fn create(text: String, id: u32) -> Self;

    /// Rebuild an item from persisted fields (everything after the head name)
    fn from_fields(fields: &[&str], id: u32) -> Self;

    /// Persisted fields (everything after the head name), already formatted
    fn to_fields(&self) -> Vec<String>;

    fn id(&self) -> u32;

    fn text(&self) -> &str;

    fn is_done(&self) -> bool;

    /// Flip the completion flag
    fn toggle(&mut self);

    /// One display line, without selection decoration
    fn line(&self) -> String;

    /// Called once per calendar day before anything else touches the item
    fn new_day(&mut self) {}
}

/// A recurring habit tracked per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitItem {
    pub id: u32,
    pub name: String,
    pub streak: u32,
    pub done_today: bool,
}

impl ListItem for HabitItem {
    const RESERVED_HEAD: bool = false;
    const TEXT_LIMIT: usize = NAME_MAX_LEN;
    const DELETE_KEY: char = 'd';
    const SAVE_ON_DELETE: bool = false;
    const PROMPT: &'static str = "Enter task name: ";
    const TITLE: &'static str = "Habits";
    const CSV_HEADER: &'static str = "head_name,task_name,streak,done_today";

    fn create(text: String, id: u32) -> Self {
        HabitItem {
            id,
            name: bounded(&text, NAME_MAX_LEN),
            streak: 0,
            done_today: false,
        }
    }

    fn from_fields(fields: &[&str], id: u32) -> Self {
        let name = fields.first().copied().unwrap_or_default();
        HabitItem {
            id,
            name: bounded(name, NAME_MAX_LEN),
            streak: fields.get(1).map_or(0, |f| leading_number(f)),
            done_today: fields.get(2).is_some_and(|f| leading_number(f) != 0),
        }
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            quoted(&self.name),
            self.streak.to_string(),
            u8::from(self.done_today).to_string(),
        ]
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn text(&self) -> &str {
        &self.name
    }

    fn is_done(&self) -> bool {
        self.done_today
    }

    fn toggle(&mut self) {
        self.done_today = !self.done_today;
        if self.done_today {
            self.streak += 1;
        } else {
            self.streak = self.streak.saturating_sub(1);
        }
    }

    fn line(&self) -> String {
        format!(
            "[{}] {} ({})",
            if self.done_today { 'X' } else { ' ' },
            self.name,
            self.streak
        )
    }

    fn new_day(&mut self) {
        if !self.done_today {
            self.streak = 0;
        }
        self.done_today = false;
    }
}

/// A one-off task, optionally grouped under a named head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: u32,
    pub description: String,
    pub completed: bool,
}

impl ListItem for TaskItem {
    const RESERVED_HEAD: bool = true;
    const TEXT_LIMIT: usize = DESCRIPTION_MAX_LEN;
    const DELETE_KEY: char = 'x';
    const SAVE_ON_DELETE: bool = true;
    const PROMPT: &'static str = "Enter task description: ";
    const TITLE: &'static str = "Tasks";
    const CSV_HEADER: &'static str = "head_name,description,completed";

    fn create(text: String, id: u32) -> Self {
        TaskItem {
            id,
            description: bounded(&text, DESCRIPTION_MAX_LEN),
            completed: false,
        }
    }

    fn from_fields(fields: &[&str], id: u32) -> Self {
        let description = fields.first().copied().unwrap_or_default();
        TaskItem {
            id,
            description: bounded(description, DESCRIPTION_MAX_LEN),
            completed: fields.get(1).is_some_and(|f| leading_number(f) != 0),
        }
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            quoted(&self.description),
            u8::from(self.completed).to_string(),
        ]
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn text(&self) -> &str {
        &self.description
    }

    fn is_done(&self) -> bool {
        self.completed
    }

    fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    fn line(&self) -> String {
        format!(
            "[{}] {}",
            if self.completed { 'X' } else { ' ' },
            self.description
        )
    }
}

/// Drop double quotes and clip `s` to at most `max` characters
pub fn bounded(s: &str, max: usize) -> String {
    s.chars().filter(|&c| c != '"').take(max).collect()
}

/// Wrap a field in double quotes for the persisted format
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Leading decimal digits of `s` as a number; anything else reads as 0.
pub fn leading_number(s: &str) -> u32 {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
