use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Ordering rule used to compare installed and published version strings.
///
/// `Lexicographic` compares the raw strings byte by byte, so `"10.0"` sorts
/// before `"9.0"`. It is the default because it matches how previously
/// shipped builds decided. `Semantic` splits on `.` and compares numeric
/// segments as numbers of any length, padding the shorter version with zeros;
/// it has to be selected explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOrdering {
    #[default]
    Lexicographic,
    Semantic,
}

impl VersionOrdering {
    #[must_use]
    pub fn compare(self, installed: &str, remote: &str) -> Ordering {
        match self {
            Self::Lexicographic => installed.cmp(remote),
            Self::Semantic => compare_segments(installed, remote),
        }
    }
}

/// Compare `installed` against `remote` with the given ordering.
#[must_use]
pub fn compare_versions(installed: &str, remote: &str, ordering: VersionOrdering) -> Ordering {
    ordering.compare(installed, remote)
}

fn compare_segments(left: &str, right: &str) -> Ordering {
    let left: Vec<&str> = left.split('.').collect();
    let right: Vec<&str> = right.split('.').collect();

    for i in 0..left.len().max(right.len()) {
        let a = left.get(i).copied().unwrap_or("0");
        let b = right.get(i).copied().unwrap_or("0");

        let ordering = compare_segment(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Segments with a leading digit run sort before segments without one. Digit
/// runs compare by magnitude, then the remaining suffix compares as text.
fn compare_segment(a: &str, b: &str) -> Ordering {
    let (a_digits, a_suffix) = split_numeric_prefix(a);
    let (b_digits, b_suffix) = split_numeric_prefix(b);

    match (a_digits.is_empty(), b_digits.is_empty()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => a.cmp(b),
        (false, false) => {
            compare_digit_runs(a_digits, b_digits).then_with(|| a_suffix.cmp(b_suffix))
        }
    }
}

fn split_numeric_prefix(segment: &str) -> (&str, &str) {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(end)
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{VersionOrdering, compare_versions};

    #[test]
    fn lexicographic_is_default() {
        assert_eq!(VersionOrdering::default(), VersionOrdering::Lexicographic);
    }

    #[test]
    fn lexicographic_comparison() {
        let lex = VersionOrdering::Lexicographic;
        assert_eq!(compare_versions("2.1.0", "2.1.0", lex), Ordering::Equal);
        assert_eq!(compare_versions("2.1.0", "2.2.0", lex), Ordering::Less);
        assert_eq!(compare_versions("3.0.0", "2.9.0", lex), Ordering::Greater);
        assert_eq!(compare_versions("1.2", "1.2.0", lex), Ordering::Less);
    }

    #[test]
    fn lexicographic_orders_multi_digit_segments_as_text() {
        assert_eq!(
            compare_versions("10.0", "9.0", VersionOrdering::Lexicographic),
            Ordering::Less
        );
        assert_eq!(
            compare_versions("1.10.0", "1.9.0", VersionOrdering::Lexicographic),
            Ordering::Less
        );
    }

    #[test]
    fn semantic_comparison() {
        let sem = VersionOrdering::Semantic;
        assert_eq!(compare_versions("10.0", "9.0", sem), Ordering::Greater);
        assert_eq!(compare_versions("1.10.0", "1.9.0", sem), Ordering::Greater);
        assert_eq!(compare_versions("2.1.0", "2.2.0", sem), Ordering::Less);
        assert_eq!(compare_versions("3.0.0", "2.9.0", sem), Ordering::Greater);
    }

    #[test]
    fn semantic_pads_missing_segments_with_zero() {
        let sem = VersionOrdering::Semantic;
        assert_eq!(compare_versions("1.2", "1.2.0", sem), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.0.0", sem), Ordering::Equal);
        assert_eq!(compare_versions("1.2", "1.2.1", sem), Ordering::Less);
    }

    #[test]
    fn semantic_falls_back_to_text_for_non_numeric_segments() {
        let sem = VersionOrdering::Semantic;
        assert_eq!(compare_versions("1.0.b", "1.0.a", sem), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.0", sem), Ordering::Equal);
    }

    #[test]
    fn semantic_mixed_segments_are_consistent() {
        let sem = VersionOrdering::Semantic;
        assert_eq!(compare_versions("2", "10", sem), Ordering::Less);
        assert_eq!(compare_versions("1a", "2", sem), Ordering::Less);
        assert_eq!(compare_versions("1a", "10", sem), Ordering::Less);
        assert_eq!(compare_versions("1", "1a", sem), Ordering::Less);
        assert_eq!(compare_versions("1.9", "1.beta", sem), Ordering::Less);
    }

    #[test]
    fn semantic_handles_numbers_beyond_u64() {
        let sem = VersionOrdering::Semantic;
        assert_eq!(
            compare_versions("1.99999999999999999999", "1.100000000000000000000", sem),
            Ordering::Less
        );
        assert_eq!(
            compare_versions("1.000000000000000000000042", "1.42", sem),
            Ordering::Equal
        );
    }

    #[test]
    fn ordering_deserializes_from_snake_case() {
        let ordering: VersionOrdering =
            serde_json::from_str("\"semantic\"").expect("ordering name should parse");
        assert_eq!(ordering, VersionOrdering::Semantic);
    }
}
