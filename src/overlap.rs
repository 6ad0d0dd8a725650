use std::collections::BTreeMap;

use crate::Match;

/// Tie-break used when overlapping matches are excluded.
///
/// Either way the result is a set of pairwise disjoint matches ordered by
/// start offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlapPolicy {
    /// Scan left to right; at each start keep the longest match, then skip
    /// everything that begins before it ends.
    #[default]
    LeftmostLongest,
    /// Keep the longest matches first (leftmost among equal lengths), then
    /// fill the gaps with shorter ones that fit.
    LongestFirst,
}

/// Reduces `matches` to a non-overlapping subset according to `policy`.
pub(crate) fn remove_overlaps<V>(
    matches: Vec<Match<V>>,
    policy: OverlapPolicy,
) -> Vec<Match<V>> {
    match policy {
        OverlapPolicy::LeftmostLongest => leftmost_longest(matches),
        OverlapPolicy::LongestFirst => longest_first(matches),
    }
}

#[inline]
fn span<V>(m: &Match<V>) -> usize {
    m.end - m.start
}

fn leftmost_longest<V>(mut matches: Vec<Match<V>>) -> Vec<Match<V>> {
    // Stable sort: equal spans keep scan order.
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(span(b).cmp(&span(a))));

    let mut kept = Vec::with_capacity(matches.len());
    let mut frontier = 0;
    for m in matches {
        if m.start >= frontier {
            frontier = m.end;
            kept.push(m);
        }
    }
    kept
}

fn longest_first<V>(mut matches: Vec<Match<V>>) -> Vec<Match<V>> {
    matches.sort_by(|a, b| span(b).cmp(&span(a)).then(a.start.cmp(&b.start)));

    // Kept spans are disjoint, so the last one starting before `m.end` is the
    // only one that can reach into `m`.
    let mut taken: BTreeMap<usize, usize> = BTreeMap::new();
    let mut kept = Vec::new();
    for m in matches {
        let clear = taken
            .range(..m.end)
            .next_back()
            .is_none_or(|(_, &end)| end <= m.start);
        if clear {
            taken.insert(m.start, m.end);
            kept.push(m);
        }
    }
    kept.sort_by_key(|m| m.start);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans<V>(matches: &[Match<V>]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start(), m.end())).collect()
    }

    fn ushers() -> Vec<Match<&'static str>> {
        // Scan order for {he, she, his, hers} over "ushers".
        vec![
            Match::new(1, 4, "she"),
            Match::new(2, 4, "he"),
            Match::new(2, 6, "hers"),
        ]
    }

    #[test]
    fn empty_input() {
        let none: Vec<Match<u8>> = vec![];
        assert!(remove_overlaps(none.clone(), OverlapPolicy::LeftmostLongest).is_empty());
        assert!(remove_overlaps(none, OverlapPolicy::LongestFirst).is_empty());
    }

    #[test]
    fn leftmost_longest_ushers() {
        let kept = remove_overlaps(ushers(), OverlapPolicy::LeftmostLongest);
        assert_eq!(kept, vec![Match::new(1, 4, "she")]);
    }

    #[test]
    fn longest_first_ushers() {
        let kept = remove_overlaps(ushers(), OverlapPolicy::LongestFirst);
        assert_eq!(kept, vec![Match::new(2, 6, "hers")]);
    }

    #[test]
    fn leftmost_longest_prefers_longer_at_same_start() {
        // "ab" [0,2), "abc" [0,3), "cd" [2,4), "d" [3,4)
        let matches = vec![
            Match::new(0, 2, "ab"),
            Match::new(0, 3, "abc"),
            Match::new(2, 4, "cd"),
            Match::new(3, 4, "d"),
        ];
        let kept = remove_overlaps(matches, OverlapPolicy::LeftmostLongest);
        assert_eq!(spans(&kept), vec![(0, 3), (3, 4)]);
        assert_eq!(kept[0].value(), &"abc");
        assert_eq!(kept[1].value(), &"d");
    }

    #[test]
    fn leftmost_longest_is_greedy_not_optimal() {
        // "ab" at 0 blocks "bcde" at 1 even though the latter is longer.
        let matches = vec![Match::new(0, 2, 'x'), Match::new(1, 5, 'y')];
        let kept = remove_overlaps(matches, OverlapPolicy::LeftmostLongest);
        assert_eq!(spans(&kept), vec![(0, 2)]);
    }

    #[test]
    fn longest_first_fills_gaps() {
        let matches = vec![
            Match::new(0, 2, 'a'),
            Match::new(1, 5, 'b'),
            Match::new(5, 6, 'c'),
            Match::new(6, 8, 'd'),
            Match::new(7, 9, 'e'),
        ];
        let kept = remove_overlaps(matches, OverlapPolicy::LongestFirst);
        // 'b', then 'd' among the length-2 spans, then 'c' in the gap.
        assert_eq!(spans(&kept), vec![(1, 5), (5, 6), (6, 8)]);
    }

    #[test]
    fn adjacent_matches_do_not_overlap() {
        let matches = vec![Match::new(0, 2, 1), Match::new(2, 4, 2), Match::new(4, 6, 3)];
        for policy in [OverlapPolicy::LeftmostLongest, OverlapPolicy::LongestFirst] {
            let kept = remove_overlaps(matches.clone(), policy);
            assert_eq!(spans(&kept), vec![(0, 2), (2, 4), (4, 6)]);
        }
    }

    #[test]
    fn identical_spans_keep_first_in_scan_order() {
        let matches = vec![Match::new(0, 2, "first"), Match::new(0, 2, "second")];
        for policy in [OverlapPolicy::LeftmostLongest, OverlapPolicy::LongestFirst] {
            let kept = remove_overlaps(matches.clone(), policy);
            assert_eq!(kept, vec![Match::new(0, 2, "first")]);
        }
    }
}
