use crate::domain::comment::ClassifiedComment;
use crate::domain::identity::DisplayNames;
use crate::domain::row::{AgendaMode, Row, agenda_rows, tbd_row, will_do_row};
use crate::domain::section::{Section, locate, next_ordinal};
use crate::domain::splice::splice;

#[derive(Debug, Clone, Default)]
pub struct StandupOptions {
    pub agenda_mode: AgendaMode,
    pub display_names: DisplayNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StandupUpdate {
    Updated {
        body: String,
        section: Section,
        rows_added: usize,
    },
    /// The target section is missing from the document.
    Unchanged { section: Section },
}

impl StandupUpdate {
    pub fn section(&self) -> Section {
        match self {
            StandupUpdate::Updated { section, .. } | StandupUpdate::Unchanged { section } => {
                *section
            }
        }
    }
}

/// Appends the rows described by one comment to the matching table.
pub fn apply_comment(
    document: &str,
    author: &str,
    comment: &str,
    options: &StandupOptions,
) -> StandupUpdate {
    let author = options.display_names.resolve(author);
    let classified = ClassifiedComment::classify(comment);
    let section = match classified {
        ClassifiedComment::Agenda(_) => Section::Agenda,
        ClassifiedComment::WillDo(_) => Section::WillDo,
        ClassifiedComment::Tbd(_) => Section::Tbd,
    };

    let Some(located) = locate(document, section) else {
        return StandupUpdate::Unchanged { section };
    };

    let rows: Vec<Row> = match classified {
        ClassifiedComment::Agenda(text) => {
            let ordinal = next_ordinal(
                located.body_text(document),
                section.first_column_label(),
            );
            agenda_rows(options.agenda_mode, author, text, ordinal)
        }
        ClassifiedComment::WillDo(text) => vec![will_do_row(author, text)],
        ClassifiedComment::Tbd(text) => vec![tbd_row(text)],
    };

    StandupUpdate::Updated {
        body: splice(document, &located, &rows),
        section,
        rows_added: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    const TICKET: &str = "# Weekly sync\n\
\n\
## 1. 안건\n\
| No | 안건 | 제안자 | 답변자 | 답변 | 피드백 | 결과 |\n\
|---|---|---|---|---|---|---|\n\
\n\
## 2. Will do\n\
| What | Who | Goal | Due |\n\
|---|---|---|---|\n\
\n\
## 3. TBD\n\
| Content | Note | Kind | Decision maker | Discussant |\n\
|---|---|---|---|---|\n";

    fn updated_body(update: StandupUpdate) -> String {
        match update {
            StandupUpdate::Updated { body, .. } => body,
            StandupUpdate::Unchanged { section } => panic!("{} not updated", section.as_str()),
        }
    }

    #[test]
    fn agenda_comment_appends_three_rows() {
        let update = apply_comment(
            TICKET,
            "alice",
            "[오늘 할 일] Review PR\n[예상되는 이슈] Flaky test",
            &StandupOptions::default(),
        );
        assert!(matches!(
            update,
            StandupUpdate::Updated {
                section: Section::Agenda,
                rows_added: 3,
                ..
            }
        ));

        let expected = TICKET.replacen(
            "|---|---|---|---|---|---|---|\n",
            "|---|---|---|---|---|---|---|\n\
| 1 | 오늘 할 일 | alice | - | Review PR | - | - |\n\
| 2 | 예상되는 이슈 | alice | - | Flaky test | - | - |\n\
| 3 | 작일 회고 | alice | - | - | - | - |\n",
            1,
        );
        assert_eq!(updated_body(update), expected);
    }

    #[test]
    fn ordinals_continue_after_existing_rows() {
        let options = StandupOptions::default();
        let first = updated_body(apply_comment(TICKET, "alice", "[오늘 할 일] a", &options));
        let second = updated_body(apply_comment(&first, "bob", "[작일 회고] b", &options));
        assert!(second.contains("| 4 | 오늘 할 일 | bob | - | - | - | - |\n"));
        assert!(second.contains("| 6 | 작일 회고 | bob | - | b | - | - |\n"));
    }

    #[test]
    fn will_do_comment_appends_one_row() {
        let update = apply_comment(
            TICKET,
            "bob",
            "[Will do] Ship feature | Unblock release | 2025-01-10",
            &StandupOptions::default(),
        );
        let body = updated_body(update);
        assert!(body.contains(
            "|---|---|---|---|\n| Ship feature | bob | Unblock release | 2025-01-10 |\n\n## 3. TBD"
        ));
    }

    #[test]
    fn tbd_comment_appends_one_row() {
        let body = updated_body(apply_comment(
            TICKET,
            "carol",
            "[TBD] Pick a name | low priority",
            &StandupOptions::default(),
        ));
        assert!(body.ends_with("|---|---|---|---|---|\n| Pick a name | low priority | - | - | - |\n"));
    }

    #[test]
    fn rows_join_their_table_on_br_separated_template() {
        let ticket = "## 1. 아젠다/결과/피드백\n\
| no | 아젠다 | 제안자 | 답변자 | 답변 내용 | 피드백 | 결과 |\n\
|---|---|---|---|---|---|---|\n\
| 1 | x | alice | - | - | - | - |\n\
\n\
<br />\n\
\n\
## 2. Will do\n\
| 무엇을 | 누가 | 목표/목적 | 언제까지 |\n\
|---|---|---|---|\n\
\n\
<br />\n\
\n\
## 3. TBD\n\
| 내용 | 비고 | 종류 | 의사 결정자 | 논의 대상자 |\n\
|---|---|---|---|---|\n";
        let options = StandupOptions::default();

        let body = updated_body(apply_comment(ticket, "bob", "[Will do] Ship | Goal | Fri", &options));
        assert!(body.contains("|---|---|---|---|\n| Ship | bob | Goal | Fri |\n\n<br />\n\n## 3. TBD"));

        let body = updated_body(apply_comment(&body, "bob", "[오늘 할 일] Plan", &options));
        assert!(body.contains(
            "| 1 | x | alice | - | - | - | - |\n\
| 2 | 오늘 할 일 | bob | - | Plan | - | - |\n\
| 3 | 예상되는 이슈 | bob | - | - | - | - |\n\
| 4 | 작일 회고 | bob | - | - | - | - |\n\
\n<br />\n\n## 2. Will do"
        ));
    }

    #[test]
    fn missing_section_leaves_document_unchanged() {
        let document = "## 1. 안건\n| No | 안건 |\n|---|---|\n";
        let update = apply_comment(document, "bob", "[TBD] later", &StandupOptions::default());
        assert_eq!(update, StandupUpdate::Unchanged { section: Section::Tbd });
    }

    #[test]
    fn display_names_replace_author_handles() {
        let options = StandupOptions {
            agenda_mode: AgendaMode::Single,
            display_names: DisplayNames::new(BTreeMap::from([(
                "bob-gh".to_string(),
                "Bob".to_string(),
            )])),
        };
        let body = updated_body(apply_comment(TICKET, "bob-gh", "Ask @alice about CI", &options));
        assert!(body.contains("| 1 | Ask @alice about CI | Bob | alice | - | - | - |\n"));
    }
}
