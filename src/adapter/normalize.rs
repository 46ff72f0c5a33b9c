//! Argument-shape rewrites for the restricted engine
//!
//! The restricted engine supports a single default value and cannot honor
//! an initial input buffer and a default at the same time. These rewrites
//! degrade the general request shape into that model while keeping every
//! candidate reachable.

/// Fold an ordered default sequence into the candidate list.
///
/// The defaults are placed first, in their own order, followed by the
/// remaining candidates with any entry duplicated from the default
/// sequence removed. The remainder keeps its original relative order.
///
/// # Arguments
/// * `defaults` - Non-empty ordered default sequence
/// * `candidates` - Materialized candidate list
///
/// # Returns
/// * `Vec<String>` - Rewritten candidate list
pub(crate) fn merge_default_list(defaults: &[String], candidates: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = defaults.to_vec();
    merged.extend(candidates.into_iter().filter(|c| !defaults.contains(c)));
    merged
}

/// Move `default` to the front of the candidate list.
///
/// Every other occurrence of the value is removed; the value is inserted
/// at the front even when it was not listed. Used when both a default and
/// an initial input are present: the default survives as the first
/// candidate while the default slot itself is cleared.
///
/// # Arguments
/// * `candidates` - Candidate list to rewrite in place
/// * `default` - The default value being promoted
pub(crate) fn promote_default(candidates: &mut Vec<String>, default: &str) {
    candidates.retain(|c| c != default);
    candidates.insert(0, default.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_default_list() {
        let defaults = strings(&["d1", "d2"]);
        let candidates = strings(&["a", "d2", "b"]);

        assert_eq!(
            merge_default_list(&defaults, candidates),
            strings(&["d1", "d2", "a", "b"])
        );
    }

    #[test]
    fn test_merge_default_list_keeps_remainder_order() {
        let defaults = strings(&["x"]);
        let candidates = strings(&["c", "b", "x", "a"]);

        assert_eq!(
            merge_default_list(&defaults, candidates),
            strings(&["x", "c", "b", "a"])
        );
    }

    #[test]
    fn test_merge_default_list_preserves_unrelated_duplicates() {
        let defaults = strings(&["d"]);
        let candidates = strings(&["a", "a", "d"]);

        assert_eq!(
            merge_default_list(&defaults, candidates),
            strings(&["d", "a", "a"])
        );
    }

    #[test]
    fn test_promote_default_moves_to_front() {
        let mut candidates = strings(&["a", "d", "b"]);
        promote_default(&mut candidates, "d");
        assert_eq!(candidates, strings(&["d", "a", "b"]));
    }

    #[test]
    fn test_promote_default_removes_every_duplicate() {
        let mut candidates = strings(&["d", "a", "d", "b"]);
        promote_default(&mut candidates, "d");
        assert_eq!(candidates, strings(&["d", "a", "b"]));
    }

    #[test]
    fn test_promote_default_inserts_when_absent() {
        let mut candidates = strings(&["a", "b"]);
        promote_default(&mut candidates, "d");
        assert_eq!(candidates, strings(&["d", "a", "b"]));
    }
}
