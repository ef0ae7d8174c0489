pub const WILL_DO_TAG: &str = "[Will do]";
pub const TBD_TAG: &str = "[TBD]";

/// A comment routed to the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedComment<'a> {
    Agenda(&'a str),
    WillDo(&'a str),
    Tbd(&'a str),
}

impl<'a> ClassifiedComment<'a> {
    pub fn classify(comment: &'a str) -> Self {
        if let Some(rest) = comment.strip_prefix(WILL_DO_TAG) {
            ClassifiedComment::WillDo(rest)
        } else if let Some(rest) = comment.strip_prefix(TBD_TAG) {
            ClassifiedComment::Tbd(rest)
        } else {
            ClassifiedComment::Agenda(comment)
        }
    }
}
