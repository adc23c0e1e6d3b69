//! Character-level Markov chains.
//!
//! Trained on a word list, the chains map every `prefix_length`-character
//! window to the characters that followed it (or the end of the word), then
//! walk those distributions to produce new words that sound like the corpus.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::error::CorpusError;

/// What may follow a prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Transition {
    Letter(char),
    EndOfWord,
}

/// Trained chains, ready to generate words.
#[derive(Clone, Debug)]
pub struct MarkovChains {
    prefix_length: usize,
    /// One entry per usable corpus word, so frequent openings are drawn more often.
    starts: Vec<String>,
    /// Prefix -> next symbol -> probability. Counts until normalized.
    table: BTreeMap<String, BTreeMap<Transition, f64>>,
}

impl MarkovChains {
    fn empty(prefix_length: usize) -> Self {
        Self {
            prefix_length,
            starts: Vec::new(),
            table: BTreeMap::new(),
        }
    }

    /// Train chains on `words`, skipping words no longer than `prefix_length`
    /// characters. Fails if no word is usable.
    pub fn train<S: AsRef<str>>(words: &[S], prefix_length: usize) -> Result<Self, CorpusError> {
        let mut chains = Self::empty(prefix_length);
        for word in words {
            chains.analyze(word.as_ref());
        }
        if chains.starts.is_empty() || prefix_length == 0 {
            return Err(CorpusError::NoUsableWords { prefix_length });
        }
        chains.normalize();
        log::debug!(
            "trained chains on {} words: {} prefixes, {} start prefixes",
            chains.starts.len(),
            chains.table.len(),
            chains.start_prefixes().len()
        );
        Ok(chains)
    }

    fn analyze(&mut self, word: &str) {
        let k = self.prefix_length;
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= k {
            return;
        }
        self.starts.push(chars[..k].iter().collect());
        for i in k..chars.len() {
            let prefix: String = chars[i - k..i].iter().collect();
            self.add(prefix, Transition::Letter(chars[i]));
        }
        let last: String = chars[chars.len() - k..].iter().collect();
        self.add(last, Transition::EndOfWord);
    }

    fn add(&mut self, prefix: String, next: Transition) {
        *self.table.entry(prefix).or_default().entry(next).or_insert(0.0) += 1.0;
    }

    // Turn counts into probabilities summing to 1 per prefix.
    fn normalize(&mut self) {
        for transitions in self.table.values_mut() {
            let total: f64 = transitions.values().sum();
            for weight in transitions.values_mut() {
                *weight /= total;
            }
        }
    }

    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Distinct prefixes a generated word may start with.
    pub fn start_prefixes(&self) -> BTreeSet<&str> {
        self.starts.iter().map(String::as_str).collect()
    }

    /// Probability distribution following `prefix`, if the prefix was seen.
    pub fn transitions(&self, prefix: &str) -> Option<&BTreeMap<Transition, f64>> {
        self.table.get(prefix)
    }

    /// Every letter the chains can ever emit.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut letters: BTreeSet<char> = self.starts.iter().flat_map(|s| s.chars()).collect();
        for transitions in self.table.values() {
            for next in transitions.keys() {
                if let Transition::Letter(c) = next {
                    letters.insert(*c);
                }
            }
        }
        letters
    }

    /// Generate one word.
    ///
    /// Starts from a random start prefix, then repeatedly draws the next
    /// symbol from the current prefix's distribution, sliding the prefix by
    /// one character each time, until the end-of-word marker comes up.
    pub fn generate(&self, rng: &mut impl Rng) -> String {
        let mut word = String::new();
        let mut prefix: Vec<char> = self.starts[rng.gen_range(0..self.starts.len())]
            .chars()
            .collect();
        loop {
            let key: String = prefix.iter().collect();
            match self.draw(&key, rng) {
                Transition::EndOfWord => {
                    word.extend(prefix.iter());
                    break;
                }
                Transition::Letter(c) => {
                    word.push(prefix.remove(0));
                    prefix.push(c);
                }
            }
        }
        word
    }

    fn draw(&self, prefix: &str, rng: &mut impl Rng) -> Transition {
        let Some(transitions) = self.table.get(prefix) else {
            return Transition::EndOfWord;
        };
        let roll: f64 = rng.gen();
        let mut covered = 0.0;
        let mut last = Transition::EndOfWord;
        for (next, probability) in transitions {
            covered += probability;
            last = *next;
            if roll <= covered {
                return *next;
            }
        }
        // Rounding can leave the cumulative mass a hair below 1
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_start_prefixes() {
        let chains = MarkovChains::train(&["anna", "anne", "anton"], 2).unwrap();
        let starts: Vec<&str> = chains.start_prefixes().into_iter().collect();
        assert_eq!(starts, vec!["an"]);
    }

    #[test]
    fn test_distributions_sum_to_one() {
        let chains = MarkovChains::train(&["anna", "anne", "anton", "bernard"], 2).unwrap();
        for prefix in ["an", "nn", "nt", "er"] {
            let total: f64 = chains.transitions(prefix).unwrap().values().sum();
            assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", prefix, total);
        }
    }

    #[test]
    fn test_transition_counts() {
        let chains = MarkovChains::train(&["anna", "anne", "anton"], 2).unwrap();
        let after_an = chains.transitions("an").unwrap();
        // "an" is followed by 'n' twice and 't' once
        assert!((after_an[&Transition::Letter('n')] - 2.0 / 3.0).abs() < 1e-9);
        assert!((after_an[&Transition::Letter('t')] - 1.0 / 3.0).abs() < 1e-9);
        // Final windows end words
        assert_eq!(chains.transitions("na").unwrap()[&Transition::EndOfWord], 1.0);
        assert_eq!(chains.transitions("on").unwrap()[&Transition::EndOfWord], 1.0);
    }

    #[test]
    fn test_generated_names_follow_corpus() {
        let chains = MarkovChains::train(&["anna", "anne", "anton"], 2).unwrap();
        let alphabet = chains.alphabet();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let name = chains.generate(&mut rng);
            assert!(name.starts_with("an"), "{} does not start with 'an'", name);
            assert!(name.chars().all(|c| alphabet.contains(&c)), "{} has unknown letters", name);
        }
    }

    #[test]
    fn test_single_word_corpus_reproduces_word() {
        let chains = MarkovChains::train(&["orion"], 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(chains.generate(&mut rng), "orion");
        }
    }

    #[test]
    fn test_deterministic_under_seed() {
        let corpus = ["aldebaran", "altair", "antares", "arcturus", "bellatrix", "betelgeuse"];
        let chains = MarkovChains::train(&corpus, 2).unwrap();
        let mut rng1 = ChaCha8Rng::seed_from_u64(1234);
        let mut rng2 = ChaCha8Rng::seed_from_u64(1234);
        let names1: Vec<String> = (0..50).map(|_| chains.generate(&mut rng1)).collect();
        let names2: Vec<String> = (0..50).map(|_| chains.generate(&mut rng2)).collect();
        assert_eq!(names1, names2);
    }

    #[test]
    fn test_short_words_are_skipped() {
        let chains = MarkovChains::train(&["ab", "abc"], 2).unwrap();
        assert_eq!(chains.start_prefixes().len(), 1);

        let err = MarkovChains::train(&["ab", "c", ""], 2).unwrap_err();
        assert!(matches!(err, CorpusError::NoUsableWords { prefix_length: 2 }));
    }

    #[test]
    fn test_multibyte_characters() {
        let chains = MarkovChains::train(&["élan", "éloi"], 2).unwrap();
        let starts: Vec<&str> = chains.start_prefixes().into_iter().collect();
        assert_eq!(starts, vec!["él"]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let name = chains.generate(&mut rng);
        assert!(name.starts_with("él"));
    }
}
