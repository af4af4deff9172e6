use serde::Serialize;
use std::collections::HashMap;

use crate::core::table::OrderedTable;

/// Part identifier -> uppercase nucleotide sequence
pub type PartSequences = HashMap<String, String>;

/// Construct identifier -> ordered part identifiers
pub type ConstructParts = OrderedTable<Vec<String>>;

/// Construct identifier -> concatenated nucleotide sequence
pub type ConstructSequences = OrderedTable<String>;

/// An assembly plan derived from an SBOL document.
///
/// `construct_parts` and `construct_sequences` share the same keys in the
/// same order: the order of composite component definitions in the source
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyPlan {
    pub part_sequences: PartSequences,
    pub construct_parts: ConstructParts,
    pub construct_sequences: ConstructSequences,
}

impl AssemblyPlan {
    /// Number of constructs in the plan
    #[must_use]
    pub fn construct_count(&self) -> usize {
        self.construct_parts.len()
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.part_sequences.len()
    }

    /// Part identifiers sorted alphabetically, for stable output
    #[must_use]
    pub fn sorted_part_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.part_sequences.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate constructs in document order as `(id, parts, sequence)`
    pub fn constructs(&self) -> impl Iterator<Item = (&str, &[String], &str)> {
        self.construct_parts.iter().map(move |(id, parts)| {
            let sequence = self
                .construct_sequences
                .get(id)
                .map_or("", String::as_str);
            (id, parts.as_slice(), sequence)
        })
    }

    /// Split into `(part_sequences, construct_parts, construct_sequences)`
    #[must_use]
    pub fn into_parts(self) -> (PartSequences, ConstructParts, ConstructSequences) {
        (
            self.part_sequences,
            self.construct_parts,
            self.construct_sequences,
        )
    }
}

/// Lowercase hex MD5 of a sequence, uppercased first
#[must_use]
pub fn sequence_md5(sequence: &str) -> String {
    let digest = md5::compute(sequence.to_uppercase().as_bytes());
    format!("{digest:x}")
}
