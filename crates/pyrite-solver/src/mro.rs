//! C3 linearization (the algorithm Python itself uses for its MRO).
//!
//! Grounded on the teacher's interface/class hierarchy resolution
//! (`generic_checker.rs`/`tests/class_hierarchy_tests.rs` walk a
//! single-inheritance-plus-interfaces lattice); generalized here to
//! Python's real multiple inheritance, which needs the actual C3 merge
//! rather than the teacher's simpler linear base-chain walk.

use crate::intern::TypeInterner;
use crate::types::ClassId;
#[cfg(test)]
use crate::types::ClassData;

#[derive(Debug, PartialEq, Eq)]
pub enum MroError {
    /// No consistent linearization exists (e.g. `class C(A, B)` where `A`
    /// and `B` disagree on a shared ancestor's relative order).
    Inconsistent,
}

/// Compute the C3 linearization for `class_id`, given its already-resolved
/// `bases` in declaration order. `object`'s own MRO is always `[object]`
/// and must already be present in the interner with an empty `bases` list.
pub fn linearize(interner: &TypeInterner, class_id: ClassId, bases: &[ClassId]) -> Result<Vec<ClassId>, MroError> {
    if bases.is_empty() {
        return Ok(vec![class_id]);
    }

    let mut sequences: Vec<Vec<ClassId>> = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        sequences.push(interner.lookup_class(*base).mro);
    }
    sequences.push(bases.to_vec());

    let mut merged = merge(sequences)?;
    merged.insert(0, class_id);
    Ok(merged)
}

/// The C3 merge step: repeatedly pick the head of the first sequence that
/// doesn't appear in the tail of any other sequence, remove it everywhere,
/// and repeat until every sequence is empty.
fn merge(mut sequences: Vec<Vec<ClassId>>) -> Result<Vec<ClassId>, MroError> {
    let mut result = Vec::new();

    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(result);
        }

        let candidate = sequences.iter().find_map(|seq| {
            let head = seq[0];
            let appears_in_tail = sequences.iter().any(|other| other[1..].contains(&head));
            if appears_in_tail { None } else { Some(head) }
        });

        let Some(candidate) = candidate else {
            return Err(MroError::Inconsistent);
        };

        result.push(candidate);
        for seq in &mut sequences {
            seq.retain(|id| *id != candidate);
        }
    }
}

#[cfg(test)]
#[path = "../tests/mro_tests.rs"]
mod tests;
