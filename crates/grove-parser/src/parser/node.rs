//! Syntax node kinds and the arena that stores finished nodes.

use serde::Serialize;
use smallvec::SmallVec;

/// Kind of a syntax tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    SourceFile,

    // Path expressions
    /// A primary followed by at least one path element.
    PathExpression,
    /// `receiver.name`, `receiver?.name`, `receiver*.name`, `receiver.&name`
    PathPropertyReference,
    /// `receiver(args)`, `receiver(args) { }` or `receiver { }`
    PathMethodCall,
    /// `receiver[args]`
    PathIndexProperty,
    /// The name selected by a property reference.
    PathProperty,

    // Primary expressions
    ReferenceExpression,
    Literal,
    ParenthesizedExpression,
    ListOrMapLiteral,
    StringConstructor,
    /// `${ ... }` inside an interpolated string.
    StringInjection,

    // Arguments and closures
    NamedArgument,
    ClosableBlock,
    ParameterList,
    Parameter,

    /// Error marker: zero-width at a recovery point, or wrapping skipped tokens.
    Error,
}

impl NodeKind {
    #[must_use]
    pub const fn is_path_element(self) -> bool {
        matches!(
            self,
            NodeKind::PathPropertyReference | NodeKind::PathMethodCall | NodeKind::PathIndexProperty
        )
    }
}

/// Index of a node in the [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A child of a node: either a nested node or a token (by index into the token vector).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SyntaxElement {
    Node(NodeIndex),
    Token(u32),
}

/// A finished syntax node.
///
/// `token_start..token_end` is the half-open range of token indices the
/// node spans. Zero-width nodes (recovery errors) have `token_start == token_end`.
#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub children: SmallVec<[SyntaxElement; 4]>,
    pub parent: NodeIndex,
    pub token_start: u32,
    pub token_end: u32,
}

/// Arena-based storage for syntax nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1);
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
