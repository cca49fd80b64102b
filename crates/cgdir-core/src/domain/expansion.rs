//! Sequence/shot expansion of a scaffold template.
//!
//! The template carries one literal sequence (`seq_0001`) holding one
//! literal shot (`sh_0001`) below `work/sequences` and `renders/sequences`.
//! That shot's contents are the reusable unit: every synthesized shot of a
//! root references the same immutable [`Children`] value instead of a deep
//! copy. Writers must go through the `&mut` accessors on [`ScaffoldNode`],
//! which copy on write, so the sharing is never observable.

use std::sync::Arc;

use crate::domain::{
    entities::scaffold::{Children, ScaffoldNode},
    error::DomainError,
    value_objects::{sequence_name, shot_name},
};

/// Roots that carry a `sequences` folder, in creation order.
pub const SEQUENCE_ROOTS: [&str; 2] = ["work", "renders"];

/// Folder below each root holding the sequences.
pub const SEQUENCES_DIR: &str = "sequences";

/// Literal template sequence name.
pub const TEMPLATE_SEQUENCE: &str = "seq_0001";

/// Literal template shot name.
pub const TEMPLATE_SHOT: &str = "sh_0001";

/// Template shot contents for one root.
#[derive(Debug, Clone)]
struct ShotTemplate {
    root: &'static str,
    contents: Arc<Children>,
}

/// Replicates the template shot for a requested sequence layout.
#[derive(Debug, Clone)]
pub struct SequenceExpander {
    templates: Vec<ShotTemplate>,
}

impl SequenceExpander {
    /// Capture the template shot of every sequence root.
    pub fn from_template(template: &ScaffoldNode) -> Result<Self, DomainError> {
        let templates = SEQUENCE_ROOTS
            .iter()
            .map(|&root| {
                let shot = template
                    .get(&[root, SEQUENCES_DIR, TEMPLATE_SEQUENCE, TEMPLATE_SHOT])
                    .ok_or_else(|| DomainError::MissingTemplateNode {
                        path: format!("{root}/{SEQUENCES_DIR}/{TEMPLATE_SEQUENCE}/{TEMPLATE_SHOT}"),
                    })?;
                Ok(ShotTemplate {
                    root,
                    contents: shot.shared_children(),
                })
            })
            .collect::<Result<_, DomainError>>()?;

        Ok(Self { templates })
    }

    /// A shot node named `name` referencing the template contents of `root`.
    pub fn shot_node(&self, root: &str, name: impl Into<String>) -> Option<ScaffoldNode> {
        self.templates
            .iter()
            .find(|t| t.root == root)
            .map(|t| ScaffoldNode::with_shared_children(name, Arc::clone(&t.contents)))
    }

    /// Sequence node with shots `sh_0001..=sh_{shot_count}`, all sharing the
    /// template contents of `root`.
    pub fn sequence_node(&self, root: &str, index: usize, shot_count: usize) -> Option<ScaffoldNode> {
        let template = self.templates.iter().find(|t| t.root == root)?;
        let shots: Children = (1..=shot_count)
            .map(|shot| {
                let name = shot_name(shot);
                let node = ScaffoldNode::with_shared_children(name.clone(), Arc::clone(&template.contents));
                (name, node)
            })
            .collect();

        let mut sequence = ScaffoldNode::new(sequence_name(index));
        sequence.set_children(shots);
        Some(sequence)
    }

    /// Replace the template sequence under every root with sequences
    /// `seq_0001..=seq_{n}`, where `n = shot_counts.len()` and sequence `i`
    /// gets `shot_counts[i - 1]` shots.
    ///
    /// The literal template sequence is always removed first, so with no
    /// sequences requested only synthesized names can reach disk.
    pub fn expand(&self, mut tree: ScaffoldNode, shot_counts: &[usize]) -> Result<ScaffoldNode, DomainError> {
        for template in &self.templates {
            let sequences = tree
                .get_mut(&[template.root, SEQUENCES_DIR])
                .ok_or_else(|| DomainError::MissingTemplateNode {
                    path: format!("{}/{SEQUENCES_DIR}", template.root),
                })?;

            sequences.remove_child(TEMPLATE_SEQUENCE);

            for (offset, &shot_count) in shot_counts.iter().enumerate() {
                if let Some(sequence) = self.sequence_node(template.root, offset + 1, shot_count) {
                    sequences.insert_child(sequence);
                }
            }
        }

        Ok(tree)
    }

    /// The template with the literal sequence removed from every root.
    pub fn base_tree(&self, tree: ScaffoldNode) -> Result<ScaffoldNode, DomainError> {
        self.expand(tree, &[])
    }
}
