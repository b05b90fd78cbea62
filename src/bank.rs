use crate::errors::BankError;

/// One term/definition pair from a study set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEntry {
    pub term: String,
    pub definition: String,
}

/// An immutable, validated collection of term/definition pairs.
///
/// `load` is the only constructor, so every `CardBank` in circulation can
/// produce both true and false quiz items for every term it contains: there
/// are at least two entries, at least two distinct terms, and at least one
/// pair of differing definitions.
#[derive(Clone, Debug)]
pub struct CardBank {
    entries: Vec<CardEntry>,
}

impl CardBank {
    pub fn load(rows: Vec<(String, String)>) -> Result<Self, BankError> {
        if rows.len() < 2 {
            return Err(BankError::TooFewEntries(rows.len()));
        }

        let first_term = &rows[0].0;
        if rows.iter().all(|(term, _)| term == first_term) {
            return Err(BankError::NoOtherTerms);
        }

        let first_definition = &rows[0].1;
        if rows.iter().all(|(_, definition)| definition == first_definition) {
            return Err(BankError::NoDefinitionVariety);
        }

        let entries = rows
            .into_iter()
            .map(|(term, definition)| CardEntry { term, definition })
            .collect();

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions belonging to entries whose term differs from `term`, the
    /// pool of plausible wrong answers. Duplicates are kept and entry order
    /// is preserved. Non-empty for every term in the bank.
    pub fn definitions_excluding_term(&self, term: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.term != term)
            .map(|entry| entry.definition.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(t, d)| (t.to_string(), d.to_string()))
            .collect()
    }

    #[test]
    fn load_keeps_entry_order() {
        let bank = CardBank::load(rows(&[("A", "x"), ("B", "y")])).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.entries()[0].term, "A");
        assert_eq!(bank.entries()[1].definition, "y");
    }

    #[test]
    fn single_entry_is_rejected() {
        let err = CardBank::load(rows(&[("A", "x")])).unwrap_err();
        assert_eq!(err, BankError::TooFewEntries(1));
    }

    #[test]
    fn empty_bank_is_rejected() {
        let err = CardBank::load(Vec::new()).unwrap_err();
        assert_eq!(err, BankError::TooFewEntries(0));
    }

    #[test]
    fn identical_definitions_are_rejected() {
        let err = CardBank::load(rows(&[("A", "x"), ("B", "x"), ("C", "x")])).unwrap_err();
        assert_eq!(err, BankError::NoDefinitionVariety);
    }

    #[test]
    fn single_term_is_rejected_even_with_varied_definitions() {
        let err = CardBank::load(rows(&[("A", "x"), ("A", "y")])).unwrap_err();
        assert_eq!(err, BankError::NoOtherTerms);
    }

    #[test]
    fn excluding_a_term_keeps_duplicate_definitions() {
        let bank = CardBank::load(rows(&[("A", "x"), ("B", "y"), ("C", "x")])).unwrap();

        let mut wrong = bank.definitions_excluding_term("A");
        wrong.sort_unstable();
        assert_eq!(wrong, vec!["x", "y"]);

        assert_eq!(bank.definitions_excluding_term("B"), vec!["x", "x"]);
    }

    #[test]
    fn excluding_covers_repeated_terms() {
        let bank = CardBank::load(rows(&[("A", "x"), ("A", "y"), ("B", "z")])).unwrap();
        assert_eq!(bank.definitions_excluding_term("A"), vec!["z"]);
        assert_eq!(bank.definitions_excluding_term("B"), vec!["x", "y"]);
    }
}
