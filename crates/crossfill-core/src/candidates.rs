//! Normalization and cleaning of raw candidate words.
//!
//! Candidate lists gathered from reference sources are noisy: mixed case, punctuation,
//! plural forms, filler words, or words lifted straight from the clue. [`clean`] turns
//! such a list into answer-shaped words of a given length.

use std::collections::BTreeSet;

use crate::Dictionary;

/// Words never accepted as answers: common English function words and web noise.
///
/// Sorted, so it can be binary searched.
pub const STOPWORDS: &[&str] = &[
    "A", "ABOUT", "ABOVE", "AFTER", "AGAIN", "AGAINST", "AIN", "ALL", "AM", "AN", "AND", "ANY",
    "ARE", "AREN", "AS", "AT", "BE", "BECAUSE", "BEEN", "BEFORE", "BEING", "BELOW", "BETWEEN",
    "BOTH", "BUT", "BY", "CAN", "COM", "COULDN", "D", "DID", "DIDN", "DO", "DOES", "DOESN",
    "DOING", "DON", "DOWN", "DURING", "EACH", "FEW", "FOR", "FROM", "FURTHER", "HAD", "HADN",
    "HAS", "HASN", "HAVE", "HAVEN", "HAVING", "HE", "HER", "HERE", "HERS", "HERSELF", "HIM",
    "HIMSELF", "HIS", "HOW", "I", "IF", "IN", "INTO", "IS", "ISN", "IT", "ITS", "ITSELF",
    "JUST", "LIST", "LL", "M", "MA", "ME", "MIGHTN", "MORE", "MOST", "MUSTN", "MY", "MYSELF",
    "NEEDN", "NO", "NOR", "NOT", "NOW", "O", "OF", "OFF", "ON", "ONCE", "ONLY", "OR", "OTHER",
    "OUR", "OURS", "OURSELVES", "OUT", "OVER", "OWN", "RE", "S", "SAME", "SHAN", "SHE",
    "SHOULD", "SHOULDN", "SO", "SOME", "SUCH", "T", "THAN", "THAT", "THE", "THEIR", "THEIRS",
    "THEM", "THEMSELVES", "THEN", "THERE", "THESE", "THEY", "THIS", "THOSE", "THROUGH", "TO",
    "TOO", "UNDER", "UNTIL", "UP", "VE", "VERY", "WAS", "WASN", "WE", "WERE", "WEREN", "WHAT",
    "WHEN", "WHERE", "WHICH", "WHILE", "WHO", "WHOM", "WHY", "WILL", "WITH", "WON", "WOULDN",
    "WWW", "Y", "YOU", "YOUR", "YOURS", "YOURSELF", "YOURSELVES",
];

/// Options for [`clean`].
#[derive(Debug, Clone)]
#[expect(clippy::struct_excessive_bools)]
pub struct CleanOptions {
    /// Also offer each word ending in `S` without that `S`.
    pub singular_variants: bool,
    /// Drop words from [`STOPWORDS`].
    pub exclude_stopwords: bool,
    /// Drop words that appear verbatim in the clue text.
    pub exclude_clue_words: bool,
    /// Also offer each word with every clue word cut out of it, so `ICECREAM` for the
    /// clue "Ice ..." yields `CREAM`.
    pub strip_clue_words: bool,
    /// Drop words the dictionary oracle does not know, when one is given.
    pub require_dictionary_word: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            singular_variants: true,
            exclude_stopwords: true,
            exclude_clue_words: true,
            strip_clue_words: true,
            require_dictionary_word: false,
        }
    }
}

/// Strips everything but ASCII letters and uppercases the rest.
///
/// # Examples
///
/// ```
/// use crossfill_core::candidates::normalize;
///
/// assert_eq!(normalize("Ice-cream!"), "ICECREAM");
/// assert_eq!(normalize("café"), "CAF");
/// ```
#[must_use]
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Cleans raw candidates for a clue with answers of `length` letters.
///
/// Words are normalized, optionally expanded with singular variants and with variants
/// that have clue words cut out, filtered, and finally restricted to `length` letters.
///
/// # Examples
///
/// ```
/// use crossfill_core::candidates::{CleanOptions, clean};
///
/// let words = clean(
///     "Small feline",
///     3,
///     ["cats", "Small", "the", "dog's", "kitten"],
///     &CleanOptions::default(),
///     None::<&std::collections::HashSet<String>>,
/// );
/// assert_eq!(words.into_iter().collect::<Vec<_>>(), ["CAT", "DOG"]);
/// ```
#[must_use]
pub fn clean<I, S, D>(
    clue_text: &str,
    length: usize,
    candidates: I,
    options: &CleanOptions,
    dictionary: Option<&D>,
) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    D: Dictionary + ?Sized,
{
    let clue_words = clue_text
        .split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect::<BTreeSet<_>>();

    let mut words = BTreeSet::new();
    for raw in candidates {
        let word = normalize(raw.as_ref());
        if let Some(singular) = word.strip_suffix('S').filter(|_| options.singular_variants) {
            words.insert(singular.to_owned());
        }
        words.insert(word);
    }

    if options.strip_clue_words {
        let stripped = words
            .iter()
            .filter(|word| !clue_words.contains(*word))
            .flat_map(|word| {
                clue_words
                    .iter()
                    .filter(|clue_word| word.contains(clue_word.as_str()))
                    .map(|clue_word| word.replace(clue_word.as_str(), ""))
            })
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>();
        words.extend(stripped);
    }

    words.retain(|word| {
        word.len() == length
            && !(options.exclude_stopwords && STOPWORDS.binary_search(&word.as_str()).is_ok())
            && !(options.exclude_clue_words && clue_words.contains(word))
            && !(options.require_dictionary_word && dictionary.is_some_and(|d| !d.contains(word)))
    });
    words
}
