use crate::domain::text::{PLACEHOLDER, clean, escape_cell, extract_mentions};

/// Sub-labels that split an agenda comment into separate rows, in row order.
pub const AGENDA_LABELS: [&str; 3] = ["오늘 할 일", "예상되는 이슈", "작일 회고"];

/// How an untagged comment is turned into agenda rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgendaMode {
    /// One row per sub-label, whether or not the label is present.
    #[default]
    Split,
    /// One row holding the whole comment.
    Single,
}

impl AgendaMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "split" => Some(AgendaMode::Split),
            "single" => Some(AgendaMode::Single),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn render(&self) -> String {
        let cells = self
            .0
            .iter()
            .map(|cell| escape_cell(cell))
            .collect::<Vec<_>>();
        format!("| {} |", cells.join(" | "))
    }
}

pub fn agenda_rows(mode: AgendaMode, author: &str, comment: &str, next_ordinal: usize) -> Vec<Row> {
    let mentions = extract_mentions(comment);
    match mode {
        AgendaMode::Split => AGENDA_LABELS
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let content = sub_field(comment, label).map_or_else(|| PLACEHOLDER.to_string(), clean);
                Row(vec![
                    (next_ordinal + index).to_string(),
                    label.to_string(),
                    author.to_string(),
                    mentions.clone(),
                    content,
                    PLACEHOLDER.to_string(),
                    PLACEHOLDER.to_string(),
                ])
            })
            .collect(),
        AgendaMode::Single => vec![Row(vec![
            next_ordinal.to_string(),
            clean(comment),
            author.to_string(),
            mentions,
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ])],
    }
}

pub fn will_do_row(author: &str, text: &str) -> Row {
    let [what, goal, due] = pipe_fields::<3>(text);
    Row(vec![what, author.to_string(), goal, due])
}

pub fn tbd_row(text: &str) -> Row {
    Row(pipe_fields::<5>(text).to_vec())
}

/// Splits on `|` into at most `N` cleaned fields; the last field keeps any extra pipes.
fn pipe_fields<const N: usize>(text: &str) -> [String; N] {
    let mut segments = text.splitn(N, '|');
    std::array::from_fn(|_| {
        segments
            .next()
            .map_or_else(|| PLACEHOLDER.to_string(), clean)
    })
}

/// Text following `[label]` up to the next known label or the end of the comment.
fn sub_field<'a>(comment: &'a str, label: &str) -> Option<&'a str> {
    let tag = format!("[{label}]");
    let start = comment.find(&tag)? + tag.len();
    let rest = &comment[start..];
    let end = AGENDA_LABELS
        .iter()
        .filter_map(|other| rest.find(&format!("[{other}]")))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &Row) -> Vec<&str> {
        row.0.iter().map(String::as_str).collect()
    }

    #[test]
    fn splits_agenda_by_sub_label() {
        let rows = agenda_rows(
            AgendaMode::Split,
            "alice",
            "[오늘 할 일] Review PR\n[예상되는 이슈] Flaky test",
            1,
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(
            cells(&rows[0]),
            ["1", "오늘 할 일", "alice", "-", "Review PR", "-", "-"]
        );
        assert_eq!(
            cells(&rows[1]),
            ["2", "예상되는 이슈", "alice", "-", "Flaky test", "-", "-"]
        );
        assert_eq!(cells(&rows[2]), ["3", "작일 회고", "alice", "-", "-", "-", "-"]);
    }

    #[test]
    fn sub_labels_are_parsed_independently_of_order() {
        let comment = "[작일 회고] shipped @carol\n[오늘 할 일] line one\nline two";
        let rows = agenda_rows(AgendaMode::Split, "bob", comment, 4);
        assert_eq!(rows[0].0[0], "4");
        assert_eq!(rows[0].0[4], "line one<br>line two");
        assert_eq!(rows[1].0[4], "-");
        assert_eq!(rows[2].0[0], "6");
        assert_eq!(rows[2].0[4], "shipped @carol");
        assert!(rows.iter().all(|row| row.0[3] == "carol"));
    }

    #[test]
    fn unlabelled_agenda_still_emits_placeholder_rows() {
        let rows = agenda_rows(AgendaMode::Split, "alice", "just chatting", 1);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.0[4] == "-"));
    }

    #[test]
    fn single_mode_keeps_whole_comment() {
        let rows = agenda_rows(AgendaMode::Single, "alice", "Need review\nfrom @bob", 7);
        assert_eq!(
            rows.iter().map(Row::render).collect::<Vec<_>>(),
            ["| 7 | Need review<br>from @bob | alice | bob | - | - | - |"]
        );
    }

    #[test]
    fn will_do_maps_segments_positionally() {
        let row = will_do_row("bob", " Ship feature | Unblock release | 2025-01-10");
        assert_eq!(
            row.render(),
            "| Ship feature | bob | Unblock release | 2025-01-10 |"
        );
        assert_eq!(will_do_row("bob", "").render(), "| - | bob | - | - |");
        assert_eq!(will_do_row("bob", "Only what").render(), "| Only what | bob | - | - |");
    }

    #[test]
    fn tbd_defaults_missing_segments() {
        let row = tbd_row(" Pick a name | low priority");
        assert_eq!(
            cells(&row),
            ["Pick a name", "low priority", "-", "-", "-"]
        );
    }

    #[test]
    fn extra_pipes_stay_in_last_field_escaped() {
        let row = will_do_row("bob", "a | b | c | d");
        assert_eq!(row.render(), "| a | bob | b | c \\| d |");
    }

    #[test]
    fn parses_agenda_mode() {
        assert_eq!(AgendaMode::from_str("Split"), Some(AgendaMode::Split));
        assert_eq!(AgendaMode::from_str(" single "), Some(AgendaMode::Single));
        assert_eq!(AgendaMode::from_str("both"), None);
    }
}
