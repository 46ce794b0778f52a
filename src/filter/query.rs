/// Separator between OR-groups. Runs of separators collapse, so `a||b`
/// means the same as `a|b`.
pub const GROUP_SEPARATOR: char = '|';

/// Prefix marking a negation term.
pub const NEGATION_PREFIX: char = '!';

/// One OR-group: all inclusion terms must appear somewhere in the record,
/// and no negation term may appear anywhere in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Group {
    fn parse(raw: &str) -> Option<Self> {
        let mut group = Group::default();
        for term in raw.split_whitespace() {
            match term.strip_prefix(NEGATION_PREFIX) {
                Some("") => {}
                Some(bare) => group.exclude.push(bare.to_lowercase()),
                None => group.include.push(term.to_lowercase()),
            }
        }
        if group.include.is_empty() && group.exclude.is_empty() {
            None
        } else {
            Some(group)
        }
    }

    /// `haystacks` are the record's lowercased cell strings; missing cells
    /// are simply absent.
    fn matches(&self, haystacks: &[String]) -> bool {
        let excluded = self
            .exclude
            .iter()
            .any(|needle| haystacks.iter().any(|h| h.contains(needle.as_str())));
        if excluded {
            return false;
        }
        self.include
            .iter()
            .all(|needle| haystacks.iter().any(|h| h.contains(needle.as_str())))
    }
}

/// A parsed filter query.
///
/// Parsing is total: any input text yields a query, and text that carries no
/// terms yields the empty query, which matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    groups: Vec<Group>,
}

impl Query {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            groups: raw.split(GROUP_SEPARATOR).filter_map(Group::parse).collect(),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Test already-lowercased cell strings against the query.
    #[must_use]
    pub fn matches_lowercase(&self, haystacks: &[String]) -> bool {
        self.is_empty() || self.groups.iter().any(|g| g.matches(haystacks))
    }

    /// Test raw cell strings against the query, case-insensitively.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, cells: &[S]) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystacks: Vec<String> = cells.iter().map(|c| c.as_ref().to_lowercase()).collect();
        self.matches_lowercase(&haystacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_splits_groups_and_terms() {
        let q = Query::parse("Wall !Ext | door  fire");
        assert_eq!(
            q.groups(),
            [
                Group {
                    include: vec!["wall".into()],
                    exclude: vec!["ext".into()],
                },
                Group {
                    include: vec!["door".into(), "fire".into()],
                    exclude: vec![],
                },
            ]
        );
    }

    #[test]
    fn double_separator_is_a_single_separator() {
        assert_eq!(Query::parse("doors||walls"), Query::parse("doors|walls"));
        assert_eq!(Query::parse("doors||walls").groups().len(), 2);
    }

    #[test]
    fn blank_queries_are_empty() {
        for raw in ["", "   ", "|", "||", " | ! |", "!"] {
            assert!(Query::parse(raw).is_empty(), "{raw:?} should be empty");
        }
    }

    #[test]
    fn inclusion_needs_every_term_in_some_cell() {
        let q = Query::parse("wall walls");
        assert!(q.matches(&["Wall-A", "Walls"]));
        assert!(!q.matches(&["Wall-A", "Doors"]));
        assert!(!Query::parse("wall door").matches(&["Wall-A", "Walls"]));
    }

    #[test]
    fn negation_checks_every_cell() {
        let q = Query::parse("!c");
        assert!(q.matches(&["Wall-A", "Walls"]));
        assert!(!q.matches(&["Wall-C", "Walls"]));
        assert!(!q.matches(&["Door-B", "Doors", "Concrete"]));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(Query::parse("LEVEL").matches(&["level 2"]));
        assert!(Query::parse("level").matches(&["LEVEL 2"]));
        assert!(!Query::parse("!LEVEL").matches(&["level 2"]));
    }

    #[test]
    fn no_cells_fail_inclusion_and_pass_negation() {
        let none: [&str; 0] = [];
        assert!(!Query::parse("x").matches(&none));
        assert!(Query::parse("!x").matches(&none));
    }

    #[test]
    fn odd_input_never_panics() {
        for raw in ["!!", "!|!", "(((", "\\", "ä!ö|", "|||a|||", "\t!\n"] {
            let q = Query::parse(raw);
            let _ = q.matches(&["anything"]);
        }
        assert!(Query::parse("!!").matches(&["abc"]));
        assert!(!Query::parse("!!").matches(&["a!b"]));
    }
}
