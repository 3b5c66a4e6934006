//! Comment thread model: traversal over arbitrary-depth reply trees plus the
//! local UI state the reply interface needs (collapse/expand per node, a
//! single reply target, draft building).
//!
//! Trees are immutable once fetched. A posted reply is incorporated by
//! re-fetching the whole tree through a refresh token bump, never by local
//! splicing, so server-assigned ids and ordering stay authoritative.

use crate::api::{Comment, NewComment};
use std::collections::HashSet;

/// Maximum comment body length, clamped before submission. The server
/// re-validates; the clamp only keeps the payload honest.
pub const MAX_COMMENT_LEN: usize = 100;

/// One comment paired with its depth in the tree, produced by `flatten`.
///
#[derive(Debug, PartialEq, Eq)]
pub struct FlatComment<'a> {
    pub comment: &'a Comment,
    pub depth: usize,
}

impl FlatComment<'_> {
    /// Whether a view should render a collapse/expand affordance for this
    /// node. Leaves render none.
    pub fn has_expand_affordance(&self) -> bool {
        !self.comment.children.is_empty()
    }
}

/// Preorder traversal with an explicit stack; tree depth is server-supplied
/// and therefore untrusted, so no call-stack recursion. Children are visited
/// in insertion order.
///
pub fn visit<'a, F>(nodes: &'a [Comment], mut f: F)
where
    F: FnMut(&'a Comment, usize),
{
    let mut stack: Vec<(&Comment, usize)> = nodes.iter().rev().map(|c| (c, 0)).collect();
    while let Some((comment, depth)) = stack.pop() {
        f(comment, depth);
        for child in comment.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

/// Flatten the tree into render order, each node tagged with its depth.
///
pub fn flatten(nodes: &[Comment]) -> Vec<FlatComment<'_>> {
    let mut flat = vec![];
    visit(nodes, |comment, depth| flat.push(FlatComment { comment, depth }));
    flat
}

/// Total number of comments in the tree.
///
pub fn count(nodes: &[Comment]) -> usize {
    let mut n = 0;
    visit(nodes, |_, _| n += 1);
    n
}

/// Locate a comment anywhere in the tree by id.
///
pub fn find(nodes: &[Comment], id: i64) -> Option<&Comment> {
    let mut stack: Vec<&Comment> = nodes.iter().rev().collect();
    while let Some(comment) = stack.pop() {
        if comment.id == id {
            return Some(comment);
        }
        stack.extend(comment.children.iter().rev());
    }
    None
}

/// Local UI state over one fetched comment tree. Collapse state is per node
/// and independent of siblings and ancestors; replies start collapsed. At
/// most one node is the reply target at a time.
///
pub struct CommentThread {
    comments: Vec<Comment>,
    expanded: HashSet<i64>,
    reply_target: Option<i64>,
}

impl CommentThread {
    pub fn new(comments: Vec<Comment>) -> Self {
        CommentThread {
            comments,
            expanded: HashSet::new(),
            reply_target: None,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip one node's collapse state, leaving every other node alone.
    pub fn toggle(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    /// Point the pending reply at a node, or at the top level with `None`.
    /// Returns false (and leaves the target unchanged) if the id is not in
    /// the tree.
    pub fn set_reply_target(&mut self, id: Option<i64>) -> bool {
        match id {
            Some(id) if find(&self.comments, id).is_none() => false,
            target => {
                self.reply_target = target;
                true
            }
        }
    }

    pub fn reply_target(&self) -> Option<&Comment> {
        self.reply_target.and_then(|id| find(&self.comments, id))
    }

    /// Build the submission payload for the pending reply. `parent_id` is
    /// the reply target's id, or null for a top-level comment; the body is
    /// clamped to `MAX_COMMENT_LEN` characters.
    pub fn draft(&self, contents: &str) -> NewComment {
        let clamped = match contents.char_indices().nth(MAX_COMMENT_LEN) {
            Some((byte_index, _)) => &contents[..byte_index],
            None => contents,
        };
        NewComment {
            contents: clamped.to_string(),
            parent_id: self.reply_target,
        }
    }
}
