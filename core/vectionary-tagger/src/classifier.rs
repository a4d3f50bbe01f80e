use std::collections::{HashMap, HashSet};

use vectionary_protocol::{starts_uppercase, strip_punctuation, Category, Lexicon, WordClasses};

/// Table-driven part-of-speech fallback.
///
/// Lookup is case-insensitive on the punctuation-stripped word, except for the
/// proper-noun list and the bigram table which compare the stripped word as written.
#[derive(Debug, Clone)]
pub struct Classifier {
    classes: HashMap<String, WordClasses>,
    proper_nouns: HashSet<String>,
    bigrams: Vec<(String, String)>,
    lexicon: Lexicon,
}

impl Classifier {
    pub fn new(lexicon: Lexicon) -> Self {
        let mut classes: HashMap<String, WordClasses> = HashMap::new();
        let lists = [
            (&lexicon.function_words, WordClasses::FUNCTION),
            (&lexicon.verbs, WordClasses::VERB),
            (&lexicon.adjectives, WordClasses::ADJECTIVE),
            (&lexicon.adverbs, WordClasses::ADVERB),
        ];
        for (words, class) in lists {
            for word in words {
                *classes.entry(word.to_lowercase()).or_insert_with(WordClasses::empty) |= class;
            }
        }

        let proper_nouns = lexicon.proper_nouns.iter().cloned().collect();
        let bigrams = lexicon
            .bigrams
            .iter()
            .map(|b| (b.first.clone(), b.second.clone()))
            .collect();

        Self { classes, proper_nouns, bigrams, lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Closed lists the word belongs to.
    pub fn word_classes(&self, raw_word: &str) -> WordClasses {
        let key = strip_punctuation(raw_word).to_lowercase();
        let mut classes = self.classes.get(&key).copied().unwrap_or_else(WordClasses::empty);
        if self.proper_nouns.contains(strip_punctuation(raw_word)) {
            classes |= WordClasses::PROPER_NOUN;
        }
        classes
    }

    /// Tags one word. First match wins:
    /// function list, verb list, adjective list, adverb list, capitalized proper
    /// noun, then noun.
    ///
    /// A sentence-initial capitalized word only counts as a proper noun when it is
    /// in the proper-noun list. A word completing a bigram with `previous` is a
    /// proper noun regardless of the lists. Pure punctuation matches nothing and
    /// ends up a noun like any other unlisted word.
    pub fn classify(&self, raw_word: &str, position: usize, previous: Option<&str>) -> Category {
        let stripped = strip_punctuation(raw_word);
        if let Some(previous) = previous {
            if self.is_bigram(strip_punctuation(previous), stripped) {
                return Category::ProperNoun;
            }
        }

        let classes = self.word_classes(raw_word);
        if let Some(category) = classes.first_match() {
            return category;
        }

        if starts_uppercase(raw_word) && (position != 0 || classes.contains(WordClasses::PROPER_NOUN)) {
            return Category::ProperNoun;
        }

        Category::Noun
    }

    /// Tags a whole word sequence, then forces every known bigram to proper nouns.
    pub fn classify_words(&self, words: &[&str]) -> Vec<Category> {
        let mut categories: Vec<Category> = words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let previous = i.checked_sub(1).map(|p| words[p]);
                self.classify(word, i, previous)
            })
            .collect();

        self.apply_bigrams(words, &mut categories);
        categories
    }

    /// Second pass over a tagged sequence: both halves of a bigram become proper nouns.
    pub fn apply_bigrams(&self, words: &[&str], categories: &mut [Category]) {
        for i in 1..words.len().min(categories.len()) {
            if self.is_bigram(strip_punctuation(words[i - 1]), strip_punctuation(words[i])) {
                categories[i - 1] = Category::ProperNoun;
                categories[i] = Category::ProperNoun;
            }
        }
    }

    pub fn is_bigram(&self, first: &str, second: &str) -> bool {
        self.bigrams.iter().any(|(a, b)| a == first && b == second)
    }

    /// Maps a remote tag label onto the taxonomy (lexicon aliases, then built-ins).
    pub fn category_for_label(&self, label: &str) -> Category {
        self.lexicon.category_for_label(label)
    }
}
