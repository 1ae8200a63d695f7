//! String similarity scorers over normalized keys, all in [0, 1].

use std::collections::BTreeSet;

use filmloc_core::Scorer;

/// Score `a` against `b` with the given metric. Empty input scores 0.
pub fn similarity(scorer: Scorer, a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    match scorer {
        Scorer::TokenSort => token_sort_ratio(a, b),
        Scorer::TokenSet => token_set_ratio(a, b),
        Scorer::Levenshtein => strsim::normalized_levenshtein(a, b),
        Scorer::JaroWinkler => strsim::jaro_winkler(a, b),
    }
}

/// Edit similarity after sorting tokens, so word order does not matter.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compares the shared tokens against each side's full token set and keeps
/// the best score. A string whose tokens are all contained in the other
/// scores 1.0.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a_set: BTreeSet<&str> = a.split_whitespace().collect();
    let b_set: BTreeSet<&str> = b.split_whitespace().collect();

    let shared = join(a_set.intersection(&b_set).copied());
    let a_rest = join(a_set.difference(&b_set).copied());
    let b_rest = join(b_set.difference(&a_set).copied());

    let with_a = concat(&shared, &a_rest);
    let with_b = concat(&shared, &b_rest);

    if shared.is_empty() {
        return strsim::normalized_levenshtein(&with_a, &with_b);
    }

    [
        strsim::normalized_levenshtein(&shared, &with_a),
        strsim::normalized_levenshtein(&shared, &with_b),
        strsim::normalized_levenshtein(&with_a, &with_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_scores_one() {
        for scorer in [
            Scorer::TokenSort,
            Scorer::TokenSet,
            Scorer::Levenshtein,
            Scorer::JaroWinkler,
        ] {
            assert_eq!(similarity(scorer, "600 octavia st", "600 octavia st"), 1.0);
        }
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(similarity(Scorer::Levenshtein, "", ""), 0.0);
        assert_eq!(similarity(Scorer::TokenSet, "coit tower", ""), 0.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(token_sort_ratio("embarcadero mission st", "mission st embarcadero"), 1.0);
        let typo = token_sort_ratio("1100 california st", "1101 california st");
        assert!(typo > 0.9 && typo < 1.0);
    }

    #[test]
    fn test_token_set_subset_scores_one() {
        assert_eq!(token_set_ratio("coit tower telegraph hill", "coit tower"), 1.0);
    }

    #[test]
    fn test_token_set_disjoint_is_low() {
        assert!(token_set_ratio("financial district", "ferry building") < 0.5);
    }

    #[test]
    fn test_scores_in_range() {
        let pairs = [
            ("mission st embarcadero and front", "100 mission st"),
            ("a", "zzzz"),
            ("golden gate bridge", "golden gate park"),
        ];
        for (a, b) in pairs {
            for scorer in [Scorer::TokenSort, Scorer::TokenSet, Scorer::JaroWinkler] {
                let s = similarity(scorer, a, b);
                assert!((0.0..=1.0).contains(&s), "{} {:?} {:?} = {}", scorer, a, b, s);
            }
        }
    }
}
