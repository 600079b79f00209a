//! Structured documentation comments.
//!
//! Comment parsing is the job of an external collaborator; this module only
//! defines the parsed shape the converter attaches to reflections, and the
//! [`CommentSource`] boundary through which comments are requested per
//! symbol or declaration.

use crate::semantic::{DeclId, SemanticGraph, SymbolId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A single block tag inside a documentation comment (`@param x ...`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTag {
    /// Tag name including the `@` prefix (e.g. `@returns`, `@param`).
    pub tag: String,
    /// Optional subject name (`x` in `@param x`).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Tag body text.
    pub content: String,
}

impl CommentTag {
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        CommentTag {
            tag: tag.into(),
            name: None,
            content: content.into(),
        }
    }
}

/// A parsed documentation comment: summary text, block tags, and the set of
/// bare modifier tags (`@enum`, `@namespace`, `@class`, `@internal`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub block_tags: Vec<CommentTag>,
    #[serde(skip_serializing_if = "IndexSet::is_empty", default)]
    pub modifier_tags: IndexSet<String>,
}

impl Comment {
    pub fn from_summary(summary: impl Into<String>) -> Self {
        Comment {
            summary: summary.into(),
            ..Comment::default()
        }
    }

    /// Check for a bare modifier tag such as `@enum`.
    pub fn has_modifier(&self, tag: &str) -> bool {
        self.modifier_tags.contains(tag)
    }

    /// Find the first block tag with the given name.
    pub fn get_tag(&self, tag: &str) -> Option<&CommentTag> {
        self.block_tags.iter().find(|t| t.tag == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.block_tags.is_empty() && self.modifier_tags.is_empty()
    }
}

/// Boundary to the comment-parsing collaborator.
///
/// The converter requests a structured comment per symbol or per
/// declaration; how comments were discovered and parsed is not its concern.
pub trait CommentSource {
    /// The comment documenting a symbol, if any.
    fn comment_for_symbol(&self, graph: &SemanticGraph, symbol: SymbolId) -> Option<Comment>;

    /// The comment attached to one specific declaration of a symbol.
    fn comment_for_decl(&self, graph: &SemanticGraph, decl: DeclId) -> Option<Comment> {
        let _ = (graph, decl);
        None
    }
}

/// Default comment source: reads the pre-parsed comments stored on the
/// semantic graph itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphComments;

impl CommentSource for GraphComments {
    fn comment_for_symbol(&self, graph: &SemanticGraph, symbol: SymbolId) -> Option<Comment> {
        graph.comment(symbol).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_lookup() {
        let mut comment = Comment::from_summary("A thing.");
        comment.modifier_tags.insert("@enum".to_string());

        assert!(comment.has_modifier("@enum"));
        assert!(!comment.has_modifier("@class"));
        assert!(!comment.is_empty());
    }

    #[test]
    fn test_tag_lookup() {
        let mut comment = Comment::default();
        comment.block_tags.push(CommentTag::new("@returns", "the value"));

        assert_eq!(comment.get_tag("@returns").map(|t| t.content.as_str()), Some("the value"));
        assert!(comment.get_tag("@param").is_none());
    }
}
