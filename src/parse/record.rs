/// Split one line of the list format into at most `max_fields` fields.
///
/// A field starting with `"` runs to the next `"` (the quotes are dropped);
/// any other field runs to the next `,`. A trailing separator does not open
/// an extra empty field.
pub fn split_record(line: &str, max_fields: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line;
    while !rest.is_empty() && fields.len() < max_fields {
        let field;
        if let Some(quoted) = rest.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => {
                    field = &quoted[..end];
                    rest = &quoted[end + 1..];
                }
                None => {
                    field = quoted;
                    rest = "";
                }
            }
        } else {
            let end = rest.find(',').unwrap_or(rest.len());
            field = &rest[..end];
            rest = &rest[end..];
        }
        rest = rest.strip_prefix(',').unwrap_or(rest);
        fields.push(field);
    }
    fields
}
