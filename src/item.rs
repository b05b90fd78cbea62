use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::bank::CardBank;

/// One quiz prompt: a term paired with a definition that is either its own
/// or borrowed from another term. Replaced wholesale on every draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizItem {
    pub term: String,
    pub shown_definition: String,
    pub is_true_statement: bool,
    pub correct_definition: String,
}

/// Draws quiz items from a bank using an injected random source, so a seeded
/// session replays the same item sequence.
pub struct ItemGenerator<R: Rng> {
    rng: R,
}

impl ItemGenerator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ItemGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ItemGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly picks an entry and a truth flag. A false statement shows a
    /// definition drawn from the other terms' entries; when definitions
    /// repeat across terms the shown text can coincide with the correct one,
    /// and the item is still false. The truth flag is authoritative, not the
    /// text.
    pub fn draw(&mut self, bank: &CardBank) -> QuizItem {
        let entry = bank
            .entries()
            .choose(&mut self.rng)
            .expect("a loaded bank is never empty");
        let is_true_statement = self.rng.random_bool(0.5);

        let shown_definition = if is_true_statement {
            entry.definition.clone()
        } else {
            let wrong = bank.definitions_excluding_term(&entry.term);
            (*wrong
                .choose(&mut self.rng)
                .expect("a loaded bank has at least two distinct terms"))
            .to_string()
        };

        QuizItem {
            term: entry.term.clone(),
            shown_definition,
            is_true_statement,
            correct_definition: entry.definition.clone(),
        }
    }
}
