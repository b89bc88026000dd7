// crates/driftscope-core/src/sentence.rs
//
// Synthetic sentence generator.
//
// Produces fixed-length English sentences from disjoint word-category
// pools: subject, verb, adverb, object in fixed syntactic order, then
// connector/extra-phrase pairs until 15 tokens are reached.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Number of whitespace-separated tokens in every generated sentence.
pub const SENTENCE_TOKENS: usize = 15;

const SUBJECTS: &[&str] = &[
    "The cat",
    "A dog",
    "The scientist",
    "My friend",
    "The teacher",
    "The artist",
    "A child",
    "The engineer",
    "The musician",
    "The writer",
];

const VERBS: &[&str] = &[
    "runs", "jumps", "thinks", "creates", "explores", "discovers", "builds", "writes", "plays",
    "teaches",
];

const ADVERBS: &[&str] = &[
    "quickly",
    "carefully",
    "passionately",
    "enthusiastically",
    "thoughtfully",
    "creatively",
    "diligently",
    "joyfully",
    "peacefully",
    "energetically",
];

const OBJECTS: &[&str] = &[
    "in the garden",
    "through the forest",
    "about life",
    "beautiful art",
    "new technologies",
    "hidden treasures",
    "amazing structures",
    "wonderful stories",
    "sweet music",
    "important lessons",
];

const CONNECTORS: &[&str] = &["and", "while", "because", "although", "when", "as"];

const EXTRA_PHRASES: &[&str] = &[
    "every day",
    "in the morning",
    "with great care",
    "for hours",
    "without stopping",
    "with friends",
    "under the stars",
    "near the ocean",
    "in the city",
    "around the world",
];

/// Generator for random fixed-length sentences.
///
/// The RNG is injectable: `from_seed` gives fully reproducible output
/// for tests, `new` draws from OS entropy.
pub struct SentenceGenerator {
    rng: StdRng,
}

impl SentenceGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed. Same seed, same sentences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate one sentence of exactly `SENTENCE_TOKENS` tokens.
    pub fn generate(&mut self) -> String {
        let mut words: Vec<&str> = Vec::with_capacity(SENTENCE_TOKENS + 2);

        // Fixed syntactic prefix: subject, verb, adverb, object.
        words.extend(self.pick(SUBJECTS).split_whitespace());
        words.extend(self.pick(VERBS).split_whitespace());
        words.extend(self.pick(ADVERBS).split_whitespace());
        words.extend(self.pick(OBJECTS).split_whitespace());

        // Alternate connector + extra phrase until long enough.
        while words.len() < SENTENCE_TOKENS {
            words.extend(self.pick(CONNECTORS).split_whitespace());
            words.extend(self.pick(EXTRA_PHRASES).split_whitespace());
        }

        words.truncate(SENTENCE_TOKENS);
        words.join(" ")
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        // Pools are compile-time constants with at least one entry.
        *pool.choose(&mut self.rng).expect("word pool is non-empty")
    }
}

impl Default for SentenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
