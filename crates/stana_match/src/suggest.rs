//! "Did you mean" suggestions for unknown operator names.
//!
//! A pure function over the candidate set: no registry access, no hidden
//! state, deterministic (sorted, deduplicated) output.

/// Levenshtein edit distance between two strings.
///
/// Two-row dynamic programming; operates on characters, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Candidate names within edit distance 2 of `name`, sorted and deduplicated.
pub fn suggest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    const MAX_DISTANCE: usize = 2;

    let mut close: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| edit_distance(name, candidate) <= MAX_DISTANCE)
        .map(str::to_string)
        .collect();
    close.sort();
    close.dedup();
    close
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_basics() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("call", "call"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn suggestions_are_sorted_and_deduplicated() {
        let candidates = ["call", "cell", "var", "call", "ternary"];
        assert_eq!(suggest("cal", candidates), vec!["call", "cell", "var"]);
    }

    #[test]
    fn distant_names_are_not_suggested() {
        assert_eq!(suggest("zzzzzz", ["call", "new", "and"]), Vec::<String>::new());
    }
}
