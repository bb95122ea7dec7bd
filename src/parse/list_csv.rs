use crate::model::item::quoted;
use crate::model::{Collection, Limits, ListItem};
use crate::parse::record::split_record;

/// Parse a list file from its source text.
///
/// The first line is the header and is skipped unread. Each further line is
/// `head,text,...`; a row with empty text only declares its head. Returns the
/// collection and the number of rows that were dropped.
pub fn parse_list<T: ListItem>(source: &str, limits: Limits) -> (Collection<T>, usize) {
    let mut collection = Collection::new(limits);
    let mut dropped = 0;
    let max_fields = T::CSV_HEADER.split(',').count();

    for (number, line) in source.lines().enumerate().skip(1) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let fields = split_record(line, max_fields);
        if fields.len() < 2 {
            log::warn!("line {}: expected at least 2 fields, skipping", number + 1);
            dropped += 1;
            continue;
        }

        let head_name = fields[0];
        let head = if T::RESERVED_HEAD && head_name.is_empty() {
            0
        } else if let Some(existing) = collection.find_head(head_name) {
            existing
        } else {
            match collection.add_head(head_name) {
                Ok(head) => head,
                Err(e) => {
                    log::warn!("line {}: head {:?} not added: {}", number + 1, head_name, e);
                    dropped += 1;
                    continue;
                }
            }
        };

        if fields[1].is_empty() {
            continue;
        }
        let id = collection.head(head).map_or(1, |h| h.len() as u32 + 1);
        let item = T::from_fields(&fields[1..], id);
        if let Err(e) = collection.insert_item(head, usize::MAX, item) {
            log::warn!("line {}: item dropped: {}", number + 1, e);
            dropped += 1;
        }
    }

    (collection, dropped)
}

/// Serialize a collection back to the list file format.
///
/// Empty heads are written as one placeholder row so they survive a reload;
/// the reserved standalone head never is.
pub fn serialize_list<T: ListItem>(collection: &Collection<T>) -> String {
    let mut out = String::new();
    out.push_str(T::CSV_HEADER);
    out.push('\n');

    let columns = T::CSV_HEADER.split(',').count();
    for (index, head) in collection.heads().iter().enumerate() {
        let name = quoted(&head.name);
        if head.is_empty() {
            if collection.is_reserved(index) {
                continue;
            }
            out.push_str(&name);
            out.push_str(",\"\"");
            for _ in 2..columns {
                out.push_str(",0");
            }
            out.push('\n');
            continue;
        }
        for item in head.items() {
            out.push_str(&name);
            for field in item.to_fields() {
                out.push(',');
                out.push_str(&field);
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{HabitItem, TaskItem};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_habits() {
        let source = "head_name,task_name,streak,done_today\n\
\"Health\",\"Water\",3,1\n\
\"Health\",\"Gym\",0,0\n\
\"Mind\",\"\",0,0\n";
        let (c, dropped) = parse_list::<HabitItem>(source, Limits::default());
        assert_eq!(dropped, 0);
        assert_eq!(c.head_count(), 2);
        assert_eq!(c.head(0).unwrap().name, "Health");
        assert_eq!(c.head(1).unwrap().name, "Mind");
        assert!(c.head(1).unwrap().is_empty());
        let water = c.item(0, 0).unwrap();
        assert_eq!(
            (water.name.as_str(), water.streak, water.done_today, water.id),
            ("Water", 3, true, 1)
        );
        assert_eq!(c.item(0, 1).unwrap().id, 2);
    }

    #[test]
    fn parse_tasks_routes_unnamed_rows_to_standalone_head() {
        let source = "head_name,description,completed\r\n\
\"\",\"Buy milk\",0\r\n\
\"Work\",\"Report\",1\r\n\
\r\n\
\"\",\"Call mom\",0\r\n";
        let (c, dropped) = parse_list::<TaskItem>(source, Limits::default());
        assert_eq!(dropped, 0);
        assert_eq!(c.head_count(), 2);
        let standalone: Vec<&str> = c
            .head(0)
            .unwrap()
            .items()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(standalone, vec!["Buy milk", "Call mom"]);
        assert!(c.item(1, 0).unwrap().completed);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let source = "head_name,task_name,streak,done_today\n\
\"Health\"\n\
\"Health\",\"Water\",abc,\n";
        let (c, dropped) = parse_list::<HabitItem>(source, Limits::default());
        assert_eq!(dropped, 1);
        let water = c.item(0, 0).unwrap();
        assert_eq!((water.streak, water.done_today), (0, false));
    }

    #[test]
    fn limits_drop_overflow() {
        let limits = Limits {
            max_heads: 1,
            max_items_per_head: 2,
        };
        let source = "head_name,task_name,streak,done_today\n\
\"A\",\"1\",0,0\n\
\"A\",\"2\",0,0\n\
\"A\",\"3\",0,0\n\
\"B\",\"4\",0,0\n";
        let (c, dropped) = parse_list::<HabitItem>(source, limits);
        assert_eq!(dropped, 2);
        assert_eq!(c.head_count(), 1);
        assert_eq!(c.head(0).unwrap().len(), 2);
    }

    #[test]
    fn empty_source_or_header_only() {
        let (c, _) = parse_list::<TaskItem>("", Limits::default());
        assert_eq!(c.head_count(), 1);
        let header = "head_name,task_name,streak,done_today\n";
        let (c, _) = parse_list::<HabitItem>(header, Limits::default());
        assert_eq!(c.head_count(), 0);
    }

    #[test]
    fn serialize_habits_with_placeholder() {
        let mut c: Collection<HabitItem> = Collection::new(Limits::default());
        c.add_head("Health").unwrap();
        c.add_head("Mind").unwrap();
        c.create_item(0, 0, "Water".into()).unwrap();
        c.item_mut(0, 0).unwrap().toggle();
        assert_snapshot!(serialize_list(&c), @r#"
        head_name,task_name,streak,done_today
        "Health","Water",1,1
        "Mind","",0,0
        "#);
    }

    #[test]
    fn serialize_tasks_skips_empty_standalone_head() {
        let mut c: Collection<TaskItem> = Collection::new(Limits::default());
        c.add_head("Work").unwrap();
        c.create_item(1, 0, "Report".into()).unwrap();
        c.add_head("Home").unwrap();
        assert_snapshot!(serialize_list(&c), @r#"
        head_name,description,completed
        "Work","Report",0
        "Home","",0
        "#);

        c.create_item(0, 0, "Buy milk".into()).unwrap();
        assert!(
            serialize_list(&c)
                .starts_with("head_name,description,completed\n\"\",\"Buy milk\",0\n")
        );
    }

    #[test]
    fn save_of_load_reproduces_source() {
        let source = "head_name,description,completed\n\
\"\",\"Buy milk\",0\n\
\"Work\",\"Report\",1\n\
\"Work\",\"Call Bob, then Ann\",0\n\
\"Home\",\"\",0\n";
        let (c, _) = parse_list::<TaskItem>(source, Limits::default());
        assert_eq!(serialize_list(&c), source);
    }
}
