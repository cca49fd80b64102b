//! Scaffold outline model and parser.
//!
//! An outline is an indented list of folder names:
//!
//! ```text
//! JOB#_ProjectName
//! -- work
//! |  -- sequences
//! |  |  -- seq_0001
//! |  |  |  -- sh_0001
//! -- renders
//! ```
//!
//! Depth is the number of `|  ` indent markers before the entry and the
//! name is whatever follows the last `--` branch marker.
//!
//! Parsing goes through [`ScaffoldBuilder`], an arena of nodes plus a stack
//! of open-ancestor indices. The arena is frozen into an immutable
//! [`ScaffoldNode`] tree once the last line has been consumed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

/// Name of the synthetic root, matching the placeholder line at the top of
/// the outline.
pub const ROOT_PLACEHOLDER: &str = "JOB#_ProjectName";

/// Indent marker, repeated once per nesting level.
pub const INDENT_MARKER: &str = "|  ";

/// Branch marker preceding the folder name.
pub const BRANCH_MARKER: &str = "--";

/// Children of a node keyed by folder name.
pub type Children = BTreeMap<String, ScaffoldNode>;

/// One folder in a scaffold tree.
///
/// The children map sits behind an [`Arc`] so that one subtree can be
/// referenced by many parents (every synthesized shot points at the same
/// template shot contents). Shared contents are never mutated in place:
/// every `&mut` accessor goes through [`Arc::make_mut`], which detaches
/// the node from other holders before the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldNode {
    name: String,
    children: Arc<Children>,
}

impl ScaffoldNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Arc::new(Children::new()),
        }
    }

    /// Synthetic root named after the template placeholder.
    pub fn root() -> Self {
        Self::new(ROOT_PLACEHOLDER)
    }

    /// A node whose contents are shared with every other holder of
    /// `children`.
    pub fn with_shared_children(name: impl Into<String>, children: Arc<Children>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> impl Iterator<Item = &ScaffoldNode> {
        self.children.values()
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn child(&self, name: &str) -> Option<&ScaffoldNode> {
        self.children.get(name)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk down by folder names.
    pub fn get(&self, path: &[&str]) -> Option<&ScaffoldNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Handle to this node's contents, for sharing with other parents.
    pub fn shared_children(&self) -> Arc<Children> {
        Arc::clone(&self.children)
    }

    /// `true` if both nodes reference the same contents.
    pub fn shares_children_with(&self, other: &ScaffoldNode) -> bool {
        Arc::ptr_eq(&self.children, &other.children)
    }

    /// Insert (or replace) a child, returning the node it displaced.
    pub fn insert_child(&mut self, child: ScaffoldNode) -> Option<ScaffoldNode> {
        Arc::make_mut(&mut self.children).insert(child.name.clone(), child)
    }

    pub fn remove_child(&mut self, name: &str) -> Option<ScaffoldNode> {
        if !self.children.contains_key(name) {
            return None;
        }
        Arc::make_mut(&mut self.children).remove(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut ScaffoldNode> {
        if !self.children.contains_key(name) {
            return None;
        }
        Arc::make_mut(&mut self.children).get_mut(name)
    }

    /// Mutable walk down by folder names, detaching shared contents along
    /// the way.
    pub fn get_mut(&mut self, path: &[&str]) -> Option<&mut ScaffoldNode> {
        let mut node = self;
        for name in path {
            node = node.child_mut(name)?;
        }
        Some(node)
    }

    /// Replace all children at once.
    pub fn set_children(&mut self, children: Children) {
        self.children = Arc::new(children);
    }

    /// Number of folders below this node.
    pub fn directory_count(&self) -> usize {
        self.children()
            .map(|child| 1 + child.directory_count())
            .sum()
    }

    /// Every folder below this node as a path relative to it, parents
    /// before children.
    pub fn relative_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(self.directory_count());
        collect_paths(self, Path::new(""), &mut paths);
        paths
    }

    /// Indented rendering in the outline format.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.name);
        out.push('\n');
        write_outline(self, 0, &mut out);
        out
    }
}

fn collect_paths(node: &ScaffoldNode, base: &Path, out: &mut Vec<PathBuf>) {
    for child in node.children() {
        let path = base.join(child.name());
        out.push(path.clone());
        collect_paths(child, &path, out);
    }
}

fn write_outline(node: &ScaffoldNode, depth: usize, out: &mut String) {
    for child in node.children() {
        out.push_str(&INDENT_MARKER.repeat(depth));
        out.push_str(BRANCH_MARKER);
        out.push(' ');
        out.push_str(child.name());
        out.push('\n');
        write_outline(child, depth + 1, out);
    }
}

// ============================================================================
// Arena builder
// ============================================================================

/// Index of a node inside a [`ScaffoldBuilder`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Slot {
    name: String,
    children: BTreeMap<String, NodeId>,
}

/// Where [`ScaffoldBuilder::push`] actually placed an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: NodeId,
    /// Depth the entry landed at.
    pub depth: usize,
    /// `true` if the requested depth skipped a level and was clamped.
    pub clamped: bool,
}

/// Incremental tree builder.
///
/// Holds the nodes in an arena and an ordered list of open ancestors, one
/// per depth level, with the root at position 0. Before every insert the
/// list is truncated to `depth + 1`, which closes every branch deeper than
/// the new entry's parent.
#[derive(Debug)]
pub struct ScaffoldBuilder {
    arena: Vec<Slot>,
    open: Vec<NodeId>,
}

impl ScaffoldBuilder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            arena: vec![Slot {
                name: root_name.into(),
                children: BTreeMap::new(),
            }],
            open: vec![NodeId(0)],
        }
    }

    /// Open ancestors, root first.
    pub fn open_ancestors(&self) -> &[NodeId] {
        &self.open
    }

    /// Close every branch deeper than `depth`, so the top of the open list
    /// becomes the parent for an entry at `depth`.
    ///
    /// Never pops the root. Returns the effective depth, which is smaller
    /// than `depth` when the list was already too short.
    pub fn truncate_to(&mut self, depth: usize) -> usize {
        self.open.truncate(depth + 1);
        self.open.len() - 1
    }

    /// Add an entry at `depth` below the current top of the open list.
    ///
    /// A sibling with the same name is replaced by the new, empty entry.
    pub fn push(&mut self, depth: usize, name: impl Into<String>) -> Placement {
        let effective = self.truncate_to(depth);
        let parent = self.open[effective];
        let name = name.into();

        let id = NodeId(self.arena.len());
        self.arena.push(Slot {
            name: name.clone(),
            children: BTreeMap::new(),
        });
        self.arena[parent.0].children.insert(name, id);
        self.open.push(id);

        Placement {
            id,
            depth: effective,
            clamped: effective < depth,
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id.0).map(|slot| slot.name.as_str())
    }

    /// Freeze the arena into an immutable tree.
    ///
    /// Slots displaced by a duplicate sibling are unreachable and dropped.
    pub fn build(self) -> ScaffoldNode {
        assemble(&self.arena, NodeId(0))
    }
}

impl Default for ScaffoldBuilder {
    fn default() -> Self {
        Self::new(ROOT_PLACEHOLDER)
    }
}

fn assemble(arena: &[Slot], id: NodeId) -> ScaffoldNode {
    let slot = &arena[id.0];
    let children = slot
        .children
        .iter()
        .map(|(name, child)| (name.clone(), assemble(arena, *child)))
        .collect();
    ScaffoldNode::with_shared_children(slot.name.clone(), Arc::new(children))
}

// ============================================================================
// Parser
// ============================================================================

/// One non-blank outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub name: String,
}

/// Converts outline text into a [`ScaffoldNode`] tree.
///
/// Never fails: malformed lines are placed as well as possible and logged.
pub struct ScaffoldParser;

impl ScaffoldParser {
    pub fn parse(text: &str) -> ScaffoldNode {
        let mut builder = ScaffoldBuilder::default();

        for (number, line) in text.lines().enumerate() {
            let Some(entry) = Self::parse_line(line) else {
                continue;
            };

            let placement = builder.push(entry.depth, entry.name);
            if placement.clamped {
                warn!(
                    line = number + 1,
                    requested = entry.depth,
                    placed = placement.depth,
                    "Outline skips an indentation level; entry attached to the deepest open folder"
                );
            }
        }

        builder.build()
    }

    /// Split one line into depth and name. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Option<OutlineEntry> {
        if line.trim().is_empty() {
            return None;
        }

        let (prefix, name) = match line.rfind(BRANCH_MARKER) {
            Some(at) => (&line[..at], &line[at + BRANCH_MARKER.len()..]),
            None => (line, line),
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(OutlineEntry {
            depth: prefix.matches(INDENT_MARKER).count(),
            name: name.to_owned(),
        })
    }
}
