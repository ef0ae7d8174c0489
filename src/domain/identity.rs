use std::collections::BTreeMap;

/// Maps platform handles to the names shown in the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNames(BTreeMap<String, String>);

impl DisplayNames {
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self(names)
    }

    /// Unknown handles resolve to themselves.
    pub fn resolve<'a>(&'a self, handle: &'a str) -> &'a str {
        self.0.get(handle).map(String::as_str).unwrap_or(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_handles_and_passes_through_others() {
        let names = DisplayNames::new(BTreeMap::from([(
            "alice-dev".to_string(),
            "Alice".to_string(),
        )]));
        assert_eq!(names.resolve("alice-dev"), "Alice");
        assert_eq!(names.resolve("bob"), "bob");
        assert_eq!(DisplayNames::default().resolve("carol"), "carol");
    }
}
