use crate::domain::row::Row;
use crate::domain::section::LocatedSection;

/// Appends `rows` to the table of a located section, leaving every byte
/// outside the section body untouched.
pub fn splice(document: &str, located: &LocatedSection, rows: &[Row]) -> String {
    if rows.is_empty() {
        return document.to_string();
    }

    let newline = if document.contains("\r\n") { "\r\n" } else { "\n" };
    let body = located.body_text(document);
    let table = body.trim_end();
    let trailing = &body[table.len()..];

    let mut section = String::with_capacity(body.len() + rows.len() * 64);
    section.push_str(table);
    if !table.is_empty() {
        section.push_str(newline);
    }
    let rendered = rows.iter().map(Row::render).collect::<Vec<_>>();
    section.push_str(&rendered.join(newline));
    if trailing.contains('\n') {
        section.push_str(trailing);
    } else {
        section.push_str(newline);
    }

    let mut updated = String::with_capacity(document.len() + section.len() - body.len());
    updated.push_str(&document[..located.body.start]);
    if !located.heading_text(document).ends_with('\n') {
        updated.push_str(newline);
    }
    updated.push_str(&section);
    updated.push_str(&document[located.body.end..]);
    updated
}
