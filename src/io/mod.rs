pub mod config_io;
pub mod data_dir;
pub mod marker;
pub mod state;
pub mod store_io;

pub use data_dir::{Lists, load_lists, roll_over_if_due, save_lists};
pub use store_io::{HABITS_FILE, StorageError, TASKS_FILE, load_list, load_list_or_empty, save_list};
