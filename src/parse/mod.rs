pub mod list_csv;
pub mod record;

pub use list_csv::{parse_list, serialize_list};
pub use record::split_record;
