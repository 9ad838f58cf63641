//! First-writer-wins accumulation of candidates across strategies.

use std::collections::HashSet;

use crate::models::field::FieldCandidate;

/// Accepted candidates plus the set of labels already claimed.
#[derive(Debug, Default)]
pub struct Accumulator {
    claimed: HashSet<String>,
    fields: Vec<FieldCandidate>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a candidate with exactly this label was already accepted.
    pub fn is_claimed(&self, label: &str) -> bool {
        self.claimed.contains(label)
    }

    /// Accept `candidate` unless its label is already claimed.
    /// Returns whether it was accepted.
    pub fn offer(&mut self, candidate: FieldCandidate) -> bool {
        if !self.claimed.insert(candidate.label.clone()) {
            return false;
        }
        self.fields.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Accepted candidates, highest confidence first. Ties keep insertion order.
    pub fn into_sorted(self) -> Vec<FieldCandidate> {
        let mut fields = self.fields;
        fields.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        fields
    }
}
