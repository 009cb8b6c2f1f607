//! AC-3 domain reduction.

use std::collections::{BTreeSet, VecDeque};

use crossfill_core::Domains;

use crate::constraint::{Constraint, ConstraintGraph, letter_at};

/// Counters collected by one [`establish_arc_consistency`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ac3Stats {
    /// Number of arcs taken off the worklist.
    pub arcs_processed: usize,
    /// Number of revisions that removed at least one word.
    pub revisions: usize,
    /// Total number of words removed.
    pub removed: usize,
    /// Number of domains that became empty.
    pub wiped_out: usize,
}

/// Removes from the owner's domain every word with no support in the partner's domain.
///
/// A word is supported if some partner word has the same letter at the shared cell.
/// Nothing happens when either domain is empty or missing. Returns the number of
/// removed words.
pub fn revise(constraint: &Constraint, domains: &mut Domains) -> usize {
    let supported = match domains.get(constraint.other) {
        Some(other) if !other.is_empty() => other
            .iter()
            .filter_map(|w| letter_at(w, constraint.other_index))
            .collect::<BTreeSet<_>>(),
        _ => return 0,
    };
    match domains.get_mut(constraint.owner) {
        Some(owner) if !owner.is_empty() => owner.retain(|w| {
            letter_at(w, constraint.owner_index).is_some_and(|c| supported.contains(&c))
        }),
        _ => 0,
    }
}

/// Runs AC-3 over `domains` until no constraint can remove anything.
///
/// All constraints start on the worklist in build order. Whenever a revision shrinks a
/// domain, every constraint whose partner is that clue goes back on the worklist unless
/// it is already queued. Arcs touching an empty domain are dropped, so a wiped-out clue
/// never empties its neighbours.
///
/// Running it again on the result removes nothing.
///
/// # Examples
///
/// ```
/// use crossfill_core::{ClueId, Puzzle};
/// use crossfill_solver::{ConstraintGraph, establish_arc_consistency};
///
/// let mut puzzle = Puzzle::from_layout_slots("#.#\n...\n#.#".parse()?);
/// puzzle.set_candidates(ClueId::across(1), ["cat", "dog"])?;
/// puzzle.set_candidates(ClueId::down(1), ["ten", "cab"])?;
///
/// let graph = ConstraintGraph::from_puzzle(&puzzle);
/// let mut domains = puzzle.domains().clone();
/// let stats = establish_arc_consistency(&graph, &mut domains);
///
/// assert_eq!(stats.removed, 2);
/// assert!(domains.get(ClueId::across(1)).unwrap().contains("CAT"));
/// assert!(domains.get(ClueId::down(1)).unwrap().contains("CAB"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn establish_arc_consistency(graph: &ConstraintGraph, domains: &mut Domains) -> Ac3Stats {
    let mut stats = Ac3Stats::default();
    let mut queue = (0..graph.len()).collect::<VecDeque<_>>();
    let mut queued = vec![true; graph.len()];

    while let Some(index) = queue.pop_front() {
        queued[index] = false;
        stats.arcs_processed += 1;
        let constraint = &graph.constraints()[index];
        if domains.is_empty_for(constraint.owner) || domains.is_empty_for(constraint.other) {
            continue;
        }

        let removed = revise(constraint, domains);
        if removed == 0 {
            continue;
        }
        stats.revisions += 1;
        stats.removed += removed;
        if domains.is_empty_for(constraint.owner) {
            stats.wiped_out += 1;
            log::debug!(
                "{} lost every candidate against {}",
                constraint.owner,
                constraint.other
            );
        }
        for &next in graph.indices_targeting(constraint.owner) {
            if !queued[next] {
                queued[next] = true;
                queue.push_back(next);
            }
        }
    }

    log::trace!("ac3 finished: {stats:?}");
    stats
}

#[cfg(test)]
mod tests {
    use crossfill_core::ClueId;
    use proptest::prelude::*;

    use crate::testing::Ac3Tester;

    const CROSS: &str = "#.#\n...\n#.#";

    #[test]
    fn test_prunes_unsupported_words() {
        Ac3Tester::new(CROSS)
            .candidates("A1", &["CAT", "DOG"])
            .candidates("D1", &["TEN", "CAB"])
            .reduce()
            .assert_domain("A1", &["CAT"])
            .assert_domain("D1", &["CAB"])
            .assert_sound()
            .assert_idempotent();
    }

    #[test]
    fn test_empty_partner_never_prunes() {
        Ac3Tester::new(CROSS)
            .candidates("A1", &["CAT", "DOG"])
            .reduce()
            .assert_domain("A1", &["CAT", "DOG"])
            .assert_domain("D1", &[]);
    }

    #[test]
    fn test_wipe_out_stops_propagation() {
        // A1 loses everything against D1; its neighbours keep their words.
        let tester = Ac3Tester::new("...\n.#.\n...")
            .candidates("A1", &["ABC"])
            .candidates("D1", &["XYZ"])
            .candidates("A2", &["ZZZ"])
            .reduce();
        let stats = tester.stats();
        assert!(stats.wiped_out >= 1);
        assert!(tester.domains().is_empty_for(ClueId::across(1)));
        assert!(!tester.domains().is_empty_for(ClueId::down(1)));
        assert!(!tester.domains().is_empty_for(ClueId::across(2)));
    }

    #[test]
    fn test_propagation_chain() {
        // A1 pins D1 to its first letter C; D1 then pins A2 through row 2.
        Ac3Tester::new("...\n.#.\n...")
            .candidates("A1", &["CAR"])
            .candidates("D1", &["CUT", "BUS", "COT"])
            .candidates("A2", &["TEA", "SEA", "PEA"])
            .reduce()
            .assert_domain("D1", &["COT", "CUT"])
            .assert_domain("A2", &["TEA"])
            .assert_sound()
            .assert_idempotent();
    }

    fn words(length: usize) -> impl Strategy<Value = Vec<String>> {
        let word = proptest::string::string_regex(&format!("[ABC]{{{length}}}")).unwrap();
        prop::collection::vec(word, 0..5)
    }

    fn as_str(words: &[String]) -> Vec<&str> {
        words.iter().map(String::as_str).collect()
    }

    proptest! {
        #[test]
        fn prop_reduction_is_sound_and_stable(
            a1 in words(3),
            a2 in words(2),
            d1 in words(3),
            d2 in words(2),
        ) {
            // two long and two short clues around a black corner
            Ac3Tester::new("...\n..#\n.##")
                .candidates("A1", &as_str(&a1))
                .candidates("A2", &as_str(&a2))
                .candidates("D1", &as_str(&d1))
                .candidates("D2", &as_str(&d2))
                .reduce()
                .assert_sound()
                .assert_shrunk_only()
                .assert_idempotent();
        }
    }
}
