use std::collections::BTreeMap;

use clinexam_core::{Node, Snapshot};

/// Percentage of answered leaves in the snapshot, 0 when it has none.
///
/// This is an approximation: a `false` flag and a zero number count as
/// unanswered even when the examiner deliberately recorded them.
pub fn compute_progress(snapshot: &Snapshot) -> u8 {
    let (answered, total) = tally(snapshot.root());
    if total == 0 {
        return 0;
    }
    (100.0 * answered as f64 / total as f64).round() as u8
}

/// `(answered, total)` leaf counts under one branch.
fn tally(branch: &BTreeMap<String, Node>) -> (usize, usize) {
    branch.values().fold((0, 0), |(answered, total), node| match node {
        Node::Leaf(leaf) => (answered + usize::from(leaf.is_answered()), total + 1),
        Node::Branch(children) => {
            let (a, t) = tally(children);
            (answered + a, total + t)
        }
    })
}
