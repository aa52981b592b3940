//! Character-frequency statistics over breed names.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::CatBreed;

/// Number of characters shown on the statistics screen.
pub const TOP_CHARACTERS: usize = 3;

/// Rank the letters of `names` by frequency and return the top `k`.
///
/// Names are concatenated in order, normalized to NFC and split into
/// extended grapheme clusters, so `"e\u{301}"` and `"é"` are the same
/// letter. A cluster is a letter when its first scalar is alphabetic. Case is
/// not folded: `"a"` and `"A"` are separate buckets. Equal counts keep the
/// order in which the letters first appear.
pub fn top_frequent_characters<S: AsRef<str>>(names: &[S], k: usize) -> Vec<(String, usize)> {
    let text: String = names.iter().flat_map(|name| name.as_ref().nfc()).collect();

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(&str, usize)> = Vec::new();

    for letter in text.graphemes(true).filter(|cluster| is_letter(cluster)) {
        match positions.get(letter) {
            Some(&index) => tally[index].1 += 1,
            None => {
                positions.insert(letter, tally.len());
                tally.push((letter, 1));
            }
        }
    }

    // Stable sort: ties stay in first-occurrence order.
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .take(k)
        .map(|(letter, count)| (letter.to_string(), count))
        .collect()
}

fn is_letter(cluster: &str) -> bool {
    cluster.chars().next().is_some_and(char::is_alphabetic)
}

/// Source of the figures shown on the statistics screen.
pub trait StatisticsProvider {
    fn top_frequent_characters(&self, names: &[&str], k: usize) -> Vec<(String, usize)>;

    fn total_count(&self, breeds: &[CatBreed]) -> usize {
        breeds.len()
    }
}

/// Default provider: plain letter tally.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterFrequency;

impl StatisticsProvider for CharacterFrequency {
    fn top_frequent_characters(&self, names: &[&str], k: usize) -> Vec<(String, usize)> {
        top_frequent_characters(names, k)
    }
}

/// Summary of the currently visible breeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BreedStatistics {
    pub visible_count: usize,
    pub top_characters: Vec<(String, usize)>,
}

impl BreedStatistics {
    pub fn from_breeds(breeds: &[CatBreed]) -> Self {
        Self::with_provider(&CharacterFrequency, breeds)
    }

    pub fn with_provider<P: StatisticsProvider + ?Sized>(provider: &P, breeds: &[CatBreed]) -> Self {
        let names: Vec<&str> = breeds.iter().map(|breed| breed.name.as_str()).collect();
        Self {
            visible_count: provider.total_count(breeds),
            top_characters: provider.top_frequent_characters(&names, TOP_CHARACTERS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breed(name: &str) -> CatBreed {
        CatBreed {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: String::new(),
            image: None,
        }
    }

    fn ranked(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
        expected
            .iter()
            .map(|(letter, count)| (letter.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_case_sensitive_tally() {
        let top = top_frequent_characters(&["Abyssinian", "American Bobtail"], 3);

        // i: 4, then n and a at 3 each; 'n' appears first. 'A' only 2.
        assert_eq!(top, ranked(&[("i", 4), ("n", 3), ("a", 3)]));
        assert!(!top.iter().any(|(letter, _)| letter == "A"));
    }

    #[test]
    fn test_upper_and_lower_are_distinct_buckets() {
        let top = top_frequent_characters(&["AaA"], 3);
        assert_eq!(top, ranked(&[("A", 2), ("a", 1)]));
    }

    #[test]
    fn test_empty_input() {
        let names: [&str; 0] = [];
        assert!(top_frequent_characters(&names, 3).is_empty());
        assert!(top_frequent_characters(&["", " - "], 3).is_empty());
    }

    #[test]
    fn test_fewer_letters_than_k() {
        let top = top_frequent_characters(&["Oo"], 3);
        assert_eq!(top, ranked(&[("O", 1), ("o", 1)]));
    }

    #[test]
    fn test_ties_follow_first_occurrence() {
        let top = top_frequent_characters(&["dcba", "abcd"], 3);
        assert_eq!(top, ranked(&[("d", 2), ("c", 2), ("b", 2)]));
    }

    #[test]
    fn test_non_letters_dropped_and_unicode_letters_kept() {
        let top = top_frequent_characters(&["Ée-é 2é"], 3);
        assert_eq!(top, ranked(&[("é", 2), ("É", 1), ("e", 1)]));
    }

    #[test]
    fn test_decomposed_accent_counts_as_one_letter() {
        let top = top_frequent_characters(&["Cafe\u{301}", "Re\u{301}x"], 3);
        assert_eq!(top, ranked(&[("é", 2), ("C", 1), ("a", 1)]));
    }

    #[test]
    fn test_composed_and_decomposed_share_a_bucket() {
        let top = top_frequent_characters(&["\u{e9}", "e\u{301}"], 3);
        assert_eq!(top, ranked(&[("\u{e9}", 2)]));
    }

    #[test]
    fn test_cluster_without_precomposed_form_stays_whole() {
        let top = top_frequent_characters(&["g\u{303}g\u{303}g"], 3);
        assert_eq!(top, ranked(&[("g\u{303}", 2), ("g", 1)]));
    }

    #[test]
    fn test_k_zero() {
        assert!(top_frequent_characters(&["abc"], 0).is_empty());
    }

    #[test]
    fn test_breed_statistics_counts_visible_breeds() {
        let breeds = vec![breed("Bengal"), breed("Bombay")];
        let stats = BreedStatistics::from_breeds(&breeds);

        assert_eq!(stats.visible_count, 2);
        assert_eq!(stats.top_characters, ranked(&[("B", 2), ("a", 2), ("e", 1)]));
    }
}
