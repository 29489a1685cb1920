//! Prefix matching between the typed buffer and the target word
//!
//! Both sides go through [`normalize`] before any comparison.

/// Uppercase and collapse every run of whitespace into a single space.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            in_space = false;
            out.extend(ch.to_uppercase());
        }
    }
    out
}

/// True if `input` could still grow into `target`. Empty input always matches.
pub fn is_partial_match(input: &str, target: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    normalize(target).starts_with(&normalize(input))
}

/// True if `input` spells out the whole `target`.
pub fn is_complete_match(input: &str, target: &str) -> bool {
    normalize(input) == normalize(target)
}

/// Number of leading characters of `target` that `input` typed correctly.
///
/// Counting stops at the first mismatch, so the renderer can colour the
/// matched letters and flag the next one.
pub fn matched_prefix_len(input: &str, target: &str) -> usize {
    let input = normalize(input);
    let target = normalize(target);
    input
        .chars()
        .zip(target.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_and_collapses() {
        assert_eq!(normalize("new   york"), "NEW YORK");
        assert_eq!(normalize("a\t\n b"), "A B");
        assert_eq!(normalize("москва"), "МОСКВА");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_partial_match() {
        assert!(is_partial_match("", "MOSCOW"));
        assert!(is_partial_match("mos", "MOSCOW"));
        assert!(is_partial_match("MOSCOW", "MOSCOW"));
        assert!(!is_partial_match("MX", "MOSCOW"));
        assert!(!is_partial_match("MOSCOWS", "MOSCOW"));
    }

    #[test]
    fn test_partial_match_collapses_spaces_in_input() {
        assert!(is_partial_match("NEW  ", "NEW YORK"));
        assert!(is_partial_match("new  y", "New York"));
        assert!(!is_partial_match(" ", "NEW YORK"));
    }

    #[test]
    fn test_complete_match() {
        assert!(is_complete_match("moscow", "MOSCOW"));
        assert!(is_complete_match("NEW   YORK", "new york"));
        assert!(!is_complete_match("MOSCO", "MOSCOW"));
    }

    #[test]
    fn test_matched_prefix_len_stops_at_first_mismatch() {
        assert_eq!(matched_prefix_len("", "MOSCOW"), 0);
        assert_eq!(matched_prefix_len("MOS", "MOSCOW"), 3);
        assert_eq!(matched_prefix_len("MOX", "MOSCOW"), 2);
        assert_eq!(matched_prefix_len("XOS", "MOSCOW"), 0);
        assert_eq!(matched_prefix_len("MOSCOWXX", "MOSCOW"), 6);
    }
}
