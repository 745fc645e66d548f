//! Text preprocessing and tokenization for the vectorizer.
//!
//! All text is normalized the same way before counting: lowercase, strip
//! punctuation, collapse whitespace. Tokens are whitespace-separated runs of
//! at least [`MIN_TOKEN_CHARS`] word characters, optionally filtered against
//! a stop-word list.

/// Minimum characters for a token to count. Single letters and digits carry
/// no signal for resume matching.
pub const MIN_TOKEN_CHARS: usize = 2;

/// English stop words, alphabetically sorted so [`StopWordFilter`] can
/// binary-search it. This is the classic information-retrieval list most
/// vectorizer libraries ship as their built-in `english` set.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are", "around",
    "as", "at", "back", "be", "became", "because", "become", "becomes",
    "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but",
    "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt",
    "cry", "de", "describe", "detail", "do", "done", "down", "due", "during",
    "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty",
    "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire",
    "first", "five", "for", "former", "formerly", "forty", "found", "four",
    "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby",
    "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how",
    "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest",
    "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly",
    "least", "less", "ltd", "made", "many", "may", "me", "meanwhile", "might",
    "mill", "mine", "more", "moreover", "most", "mostly", "move", "much",
    "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
    "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems",
    "serious", "several", "she", "should", "show", "side", "since", "sincere",
    "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take",
    "ten", "than", "that", "the", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to",
    "together", "too", "top", "toward", "towards", "twelve", "twenty", "two",
    "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Which stop-word list to apply during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWordFilter {
    /// Keep every token.
    #[default]
    None,
    /// Filter the built-in [`ENGLISH_STOP_WORDS`] list.
    English,
}

impl StopWordFilter {
    /// Resolves a configured name (`"none"` or `"english"`).
    pub fn from_name(name: &str) -> Option<StopWordFilter> {
        match name {
            "none" => Some(StopWordFilter::None),
            "english" => Some(StopWordFilter::English),
            _ => None,
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        match self {
            StopWordFilter::None => false,
            StopWordFilter::English => ENGLISH_STOP_WORDS.binary_search(&token).is_ok(),
        }
    }
}

/// Normalizes text before tokenization: lowercase, drop every character that
/// is neither alphanumeric, `_`, nor whitespace, collapse whitespace runs to
/// a single space, trim.
///
/// Punctuation is removed rather than replaced, so hyphenated or dotted
/// compounds merge into one token (`state-of-the-art` becomes
/// `stateoftheart`, `node.js` becomes `nodejs`).
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

/// Splits preprocessed text into tokens of at least [`MIN_TOKEN_CHARS`]
/// characters, minus any configured stop words.
pub fn tokenize(text: &str, stop_words: StopWordFilter) -> Vec<String> {
    preprocess(text)
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !stop_words.is_stop_word(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_lowercases_and_strips_punctuation() {
        assert_eq!(preprocess("Hello, World!"), "hello world");
    }

    #[test]
    fn preprocess_merges_hyphenated_compounds() {
        assert_eq!(preprocess("state-of-the-art"), "stateoftheart");
        assert_eq!(preprocess("Node.js & C++"), "nodejs c");
    }

    #[test]
    fn preprocess_collapses_and_trims_whitespace() {
        assert_eq!(preprocess("  a\t\tb \n c  "), "a b c");
        assert_eq!(preprocess("   "), "");
    }

    #[test]
    fn tokenize_drops_short_tokens() {
        let tokens = tokenize("a b cd 5 years", StopWordFilter::None);
        assert_eq!(tokens, vec!["cd", "years"]);
    }

    #[test]
    fn tokenize_keeps_underscores_and_digits() {
        let tokens = tokenize("snake_case v2 2024", StopWordFilter::None);
        assert_eq!(tokens, vec!["snake_case", "v2", "2024"]);
    }

    #[test]
    fn english_filter_removes_stop_words() {
        let tokens = tokenize("the quick brown fox", StopWordFilter::English);
        assert_eq!(tokens, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn none_filter_keeps_stop_words() {
        let tokens = tokenize("the quick fox", StopWordFilter::None);
        assert_eq!(tokens, vec!["the", "quick", "fox"]);
    }

    #[test]
    fn stop_word_list_is_sorted_for_binary_search() {
        for pair in ENGLISH_STOP_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "out of order: {} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn stop_word_membership_spot_checks() {
        let filter = StopWordFilter::English;
        for word in ["a", "the", "whence", "yourselves", "amoungst"] {
            assert!(filter.is_stop_word(word), "{} should be a stop word", word);
        }
        for word in ["python", "developer", "experience"] {
            assert!(!filter.is_stop_word(word), "{} should not be a stop word", word);
        }
    }

    #[test]
    fn from_name_resolves_known_lists() {
        assert_eq!(StopWordFilter::from_name("none"), Some(StopWordFilter::None));
        assert_eq!(
            StopWordFilter::from_name("english"),
            Some(StopWordFilter::English)
        );
        assert_eq!(StopWordFilter::from_name("klingon"), None);
    }
}
