//! Tokenizing raw category values into counted words.

use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Input Values
// =============================================================================

/// One raw category value.
///
/// Text is split into tokens; any other value is a single token equal to its
/// display form.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValue {
    Text(String),
    Identity(String),
}

impl From<&str> for CategoryValue {
    fn from(value: &str) -> Self {
        CategoryValue::Text(value.to_string())
    }
}

impl From<String> for CategoryValue {
    fn from(value: String) -> Self {
        CategoryValue::Text(value)
    }
}

impl From<&String> for CategoryValue {
    fn from(value: &String) -> Self {
        CategoryValue::Text(value.clone())
    }
}

macro_rules! identity_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for CategoryValue {
            fn from(value: $ty) -> Self {
                CategoryValue::Identity(value.to_string())
            }
        })*
    };
}

identity_from!(i32, i64, u32, u64, usize, f32, f64, bool, char);

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Text(s) | CategoryValue::Identity(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Stop Words
// =============================================================================

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Words removed before counting. Matching ignores case.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StopWords {
    #[default]
    None,
    /// Built-in English list.
    Default,
    Custom(Vec<String>),
    /// Built-in list plus extra words.
    DefaultAnd(Vec<String>),
}

impl StopWords {
    fn lowercase_set(&self) -> Vec<String> {
        let builtin = || DEFAULT_STOP_WORDS.iter().map(|w| w.to_string());
        let list: Vec<String> = match self {
            StopWords::None => Vec::new(),
            StopWords::Default => builtin().collect(),
            StopWords::Custom(words) => words.clone(),
            StopWords::DefaultAnd(words) => builtin().chain(words.iter().cloned()).collect(),
        };
        list.into_iter().map(|w| w.to_lowercase()).collect()
    }
}

// =============================================================================
// Reducer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeOptions {
    /// Split text values on whitespace. When off, each trimmed value is one
    /// phrase.
    pub split_words: bool,
    pub strip_punctuation: bool,
    pub stop_words: StopWords,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            split_words: true,
            strip_punctuation: false,
            stop_words: StopWords::None,
        }
    }
}

impl TokenizeOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub text: String,
    pub count: u32,
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '…' | '“' | '”' | '‘' | '’' | '«' | '»' | '—' | '–' | '¿' | '¡' | '·'
        )
}

/// Counts tokens across `values`, in order of first appearance.
/// Matching is exact and case-sensitive.
pub fn reduce_words<I, V>(values: I, options: &TokenizeOptions) -> Vec<WordCount>
where
    I: IntoIterator<Item = V>,
    V: Into<CategoryValue>,
{
    let stop_words = options.stop_words.lowercase_set();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut words: Vec<WordCount> = Vec::new();

    let mut push = |token: &str| {
        let token: String = if options.strip_punctuation {
            token.chars().filter(|c| !is_punctuation(*c)).collect()
        } else {
            token.to_string()
        };
        if token.is_empty() {
            return;
        }
        if !stop_words.is_empty() && stop_words.contains(&token.to_lowercase()) {
            return;
        }
        match index.get(&token) {
            Some(&i) => words[i].count += 1,
            None => {
                index.insert(token.clone(), words.len());
                words.push(WordCount {
                    text: token,
                    count: 1,
                });
            }
        }
    };

    for value in values {
        let value: CategoryValue = value.into();
        match value {
            CategoryValue::Text(text) if options.split_words => {
                text.split_whitespace().for_each(&mut push);
            }
            CategoryValue::Text(text) => push(text.trim()),
            CategoryValue::Identity(id) => push(id.as_str()),
        }
    }

    words
}

/// Keeps the `max` most frequent words, most frequent first. Ties keep their
/// first-appearance order.
pub fn top_words(mut words: Vec<WordCount>, max: usize) -> Vec<WordCount> {
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(max);
    words
}
