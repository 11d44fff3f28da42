use std::collections::HashMap;

use super::models::SentimentRecord;

/// Most frequent keywords across `records`, at most `n`.
///
/// Case-sensitive exact matching. Equal counts keep first-occurrence order.
pub fn top_keywords(records: &[SentimentRecord], n: usize) -> Vec<String> {
    rank_keywords(records.iter().map(|r| r.keywords.as_slice()), n)
}

/// Same ranking over bare keyword lists.
pub fn rank_keywords<'a, I>(keyword_lists: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for keyword in keyword_lists.into_iter().flatten() {
        match index.get(keyword.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(keyword.as_str(), counts.len());
                counts.push((keyword.as_str(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(keyword, _)| keyword.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn rank(raw: &[&[&str]], n: usize) -> Vec<String> {
        let owned = lists(raw);
        rank_keywords(owned.iter().map(Vec::as_slice), n)
    }

    #[test]
    fn test_ties_break_by_first_occurrence() {
        assert_eq!(rank(&[&["a", "b"], &["a"], &["c", "a"]], 2), vec!["a", "b"]);
    }

    #[test]
    fn test_higher_count_wins_over_earlier_occurrence() {
        assert_eq!(
            rank(&[&["x", "y"], &["y"], &["z", "y", "z"]], 3),
            vec!["y", "z", "x"]
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(rank(&[&["Rust", "rust", "rust"]], 5), vec!["rust", "Rust"]);
    }

    #[test]
    fn test_short_and_empty_inputs() {
        assert_eq!(rank(&[&["only"]], 10), vec!["only"]);
        assert!(rank(&[], 3).is_empty());
        assert!(rank(&[&[], &[]], 3).is_empty());
        assert!(rank(&[&["a"]], 0).is_empty());
    }
}
