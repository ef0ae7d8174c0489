use std::ops::Range;

/// The three fixed sections of a standup ticket body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Agenda,
    WillDo,
    Tbd,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Agenda => "agenda",
            Section::WillDo => "will-do",
            Section::Tbd => "tbd",
        }
    }

    /// Prefix of the heading line that opens the section.
    pub fn heading_marker(&self) -> &'static str {
        match self {
            Section::Agenda => "## 1.",
            Section::WillDo => "## 2.",
            Section::Tbd => "## 3.",
        }
    }

    pub fn first_column_label(&self) -> &'static str {
        match self {
            Section::Agenda => "No",
            Section::WillDo => "What",
            Section::Tbd => "Content",
        }
    }

    fn runs_to_end(&self) -> bool {
        matches!(self, Section::Tbd)
    }
}

/// Byte offsets of a section found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSection {
    pub section: Section,
    pub heading: Range<usize>,
    pub body: Range<usize>,
}

impl LocatedSection {
    pub fn heading_text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.heading.clone()]
    }

    pub fn body_text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.body.clone()]
    }
}

pub fn locate(document: &str, section: Section) -> Option<LocatedSection> {
    let mut offset = 0;
    let mut lines = document.split_inclusive('\n');

    let heading = loop {
        let line = lines.next()?;
        let start = offset;
        offset += line.len();
        if line.trim_start().starts_with(section.heading_marker()) {
            break start..offset;
        }
    };

    let body_start = offset;
    let mut body_end = document.len();
    if !section.runs_to_end() {
        for line in lines {
            if is_boundary(line) {
                body_end = offset;
                break;
            }
            offset += line.len();
        }
    }

    Some(LocatedSection {
        section,
        heading,
        body: body_start..body_end,
    })
}

/// Next value of the sequential index column, derived from the rows present.
pub fn next_ordinal(body: &str, first_column_label: &str) -> usize {
    let rows = body
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .filter(|line| !is_separator_row(line) && !is_header_row(line, first_column_label))
        .count();
    rows + 1
}

/// Heading, horizontal rule, or the `<br />` spacer placed between sections.
fn is_boundary(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#')
        || (trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-'))
        || matches!(trimmed, "<br />" | "<br/>" | "<br>")
}

fn is_separator_row(line: &str) -> bool {
    line.contains("---")
        && cells(line).all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
}

fn is_header_row(line: &str, first_column_label: &str) -> bool {
    cells(line)
        .next()
        .is_some_and(|cell| cell.eq_ignore_ascii_case(first_column_label))
}

fn cells(line: &str) -> impl Iterator<Item = &str> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(str::trim)
}
