use chrono::NaiveDate;

use crate::model::{Collection, ListItem};

/// Apply the once-per-day reset to every item in the collection
pub fn roll_over<T: ListItem>(collection: &mut Collection<T>) {
    for item in collection.items_mut() {
        item.new_day();
    }
}

/// A rollover is due when the last recorded date is missing or not today
pub fn is_due(last: Option<NaiveDate>, today: NaiveDate) -> bool {
    last != Some(today)
}
