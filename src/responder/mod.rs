pub mod classifier;
pub mod table;

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

pub use classifier::{classify, Category};

/// Keyword-matched replies for when no completion API is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponder;

impl CannedResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, input: &str) -> String {
        self.respond_with(input, &mut rand::rng()).to_string()
    }

    /// Same as [`respond`](Self::respond) with a caller-supplied random source.
    pub fn respond_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> &'static str {
        let category = classify(input);
        debug!("Canned responder matched category '{}'", category);

        let candidates = table::replies(category);
        candidates
            .choose(rng)
            .or_else(|| table::replies(Category::Default).first())
            .copied()
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn always_returns_something() {
        let responder = CannedResponder::new();
        for input in ["", "   ", "hello", "how do I reach you?", "🦀🦀🦀"] {
            assert!(!responder.respond(input).is_empty(), "input {:?}", input);
        }
    }

    #[test]
    fn single_candidate_categories_are_deterministic() {
        let responder = CannedResponder::new();
        let expected = table::replies(Category::Contact)[0];
        assert_eq!(responder.respond("what's your email?"), expected);
        assert_eq!(responder.respond("EMAIL"), expected);
    }

    #[test]
    fn multi_candidate_choice_stays_in_category() {
        let responder = CannedResponder::new();
        let mut rng = StdRng::seed_from_u64(7);
        let greetings = table::replies(Category::Greeting);
        for _ in 0..20 {
            let reply = responder.respond_with("hey", &mut rng);
            assert!(greetings.contains(&reply));
        }
    }

    #[test]
    fn unknown_input_gets_default_reply() {
        let responder = CannedResponder::new();
        assert_eq!(
            responder.respond("xyzzy"),
            table::replies(Category::Default)[0]
        );
    }
}
