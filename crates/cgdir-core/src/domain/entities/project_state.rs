use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::{DomainError, RejectionReason},
    value_objects::{MAX_INDEX, sequence_name, shot_name},
};

/// Sequence/shot layout and notes of a project.
///
/// Invariant: `shot_counts.len() == sequence_count`. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    sequence_count: usize,
    shot_counts: Vec<usize>,
    notes: String,
}

impl ProjectState {
    pub fn new(shot_counts: Vec<usize>, notes: impl Into<String>) -> Result<Self, DomainError> {
        if shot_counts.len() > MAX_INDEX {
            return Err(DomainError::IndexOutOfRange {
                kind: "sequence",
                index: shot_counts.len(),
                max: MAX_INDEX,
            });
        }
        if let Some(&count) = shot_counts.iter().find(|&&count| count > MAX_INDEX) {
            return Err(DomainError::IndexOutOfRange {
                kind: "shot",
                index: count,
                max: MAX_INDEX,
            });
        }

        Ok(Self {
            sequence_count: shot_counts.len(),
            shot_counts,
            notes: notes.into(),
        })
    }

    /// Build from an explicit count, checking it against the shot list.
    pub fn with_sequence_count(
        sequence_count: usize,
        shot_counts: Vec<usize>,
        notes: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if shot_counts.len() != sequence_count {
            return Err(DomainError::InconsistentState {
                sequence_count,
                shot_entries: shot_counts.len(),
            });
        }
        Self::new(shot_counts, notes)
    }

    pub fn empty() -> Self {
        Self {
            sequence_count: 0,
            shot_counts: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn sequence_count(&self) -> usize {
        self.sequence_count
    }

    pub fn shot_counts(&self) -> &[usize] {
        &self.shot_counts
    }

    /// Shot count of sequence `index` (0-based).
    pub fn shot_count(&self, index: usize) -> Option<usize> {
        self.shot_counts.get(index).copied()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn total_shots(&self) -> usize {
        self.shot_counts.iter().sum()
    }

    /// Same layout with different notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Non-destructive change between two project states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    /// Brand-new sequences, in index order.
    pub new_sequences: Vec<String>,
    /// New shots inside sequences that already existed, as
    /// `(sequence, shot)` pairs.
    pub new_shots: Vec<(String, String)>,
    pub notes_changed: bool,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.new_sequences.is_empty() && self.new_shots.is_empty() && !self.notes_changed
    }

    /// Review text listing every pending change.
    pub fn summary(&self) -> String {
        let mut out = String::from("The following changes will be made:\n\n");

        if !self.new_sequences.is_empty() {
            out.push_str("New Sequences:\n");
            for sequence in &self.new_sequences {
                let _ = writeln!(out, "{sequence}");
            }
            out.push('\n');
        }

        if !self.new_shots.is_empty() {
            out.push_str("New Shots:\n");
            for (sequence, shot) in &self.new_shots {
                let _ = writeln!(out, "{sequence}/{shot}");
            }
            out.push('\n');
        }

        if self.notes_changed {
            out.push_str("Project notes will be updated.\n");
        }

        out
    }
}

/// Computes the [`Delta`] between a recorded and a requested state.
pub struct ProjectStateDiffer;

impl ProjectStateDiffer {
    /// Compare `original` against `requested`.
    ///
    /// Removal checks run first and short-circuit: fewer sequences, then
    /// fewer shots in any existing sequence (lowest index first).
    pub fn diff(original: &ProjectState, requested: &ProjectState) -> Result<Delta, RejectionReason> {
        if requested.sequence_count < original.sequence_count {
            return Err(RejectionReason::SequenceRemoval {
                original: original.sequence_count,
                requested: requested.sequence_count,
            });
        }

        for (index, (&before, &after)) in original
            .shot_counts
            .iter()
            .zip(&requested.shot_counts)
            .enumerate()
        {
            if after < before {
                return Err(RejectionReason::ShotRemoval {
                    sequence: sequence_name(index + 1),
                    original: before,
                    requested: after,
                });
            }
        }

        let new_sequences = (original.sequence_count + 1..=requested.sequence_count)
            .map(sequence_name)
            .collect();

        let new_shots = original
            .shot_counts
            .iter()
            .zip(&requested.shot_counts)
            .enumerate()
            .flat_map(|(index, (&before, &after))| {
                let sequence = sequence_name(index + 1);
                (before + 1..=after).map(move |shot| (sequence.clone(), shot_name(shot)))
            })
            .collect();

        Ok(Delta {
            new_sequences,
            new_shots,
            notes_changed: requested.notes != original.notes,
        })
    }
}
