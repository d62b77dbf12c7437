//! Marker-based tree builder.
//!
//! The parser never builds nodes directly. It appends events to a flat log
//! while it consumes tokens, and `TreeBuilder::build` turns the log into a
//! [`NodeArena`] once parsing is over. Open spans are tracked with markers:
//!
//! - [`Marker::done`] closes the span as a node of the given kind.
//! - [`Marker::drop`] discards the span; its children splice into the parent.
//! - [`Marker::precede`] opens a new span that will become the parent of the
//!   preceded one. The new `Start` event is appended at the end of the log and
//!   linked from the preceded `Start` through `forward_parent`, so wrapping a
//!   finished chain prefix never shifts existing events.

use smallvec::SmallVec;

use super::node::{Node, NodeArena, NodeIndex, NodeKind, SyntaxElement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    /// `kind` is `None` while the marker is open, and stays `None` if it is dropped.
    Start {
        kind: Option<NodeKind>,
        forward_parent: Option<u32>,
    },
    /// The next token, in source order.
    Token,
    /// A zero-width error node at the current position.
    Error,
    Finish,
}

impl Event {
    const TOMBSTONE: Event = Event::Start {
        kind: None,
        forward_parent: None,
    };
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    events: Vec<Event>,
    open_markers: u32,
}

/// An open span of the token stream.
#[must_use = "a marker must be completed with `done` or discarded with `drop`"]
#[derive(Debug)]
pub struct Marker {
    pos: u32,
}

/// A span that was closed as a node.
#[derive(Clone, Copy, Debug)]
pub struct CompletedMarker {
    pos: u32,
    kind: NodeKind,
}

impl Marker {
    /// Close the span from this marker to the current position as a `kind` node.
    pub fn done<B: AsMut<TreeBuilder>>(self, p: &mut B, kind: NodeKind) -> CompletedMarker {
        p.as_mut().complete(self.pos, kind);
        CompletedMarker {
            pos: self.pos,
            kind,
        }
    }

    /// Discard the marker without producing a node.
    pub fn drop<B: AsMut<TreeBuilder>>(self, p: &mut B) {
        p.as_mut().abandon(self.pos);
    }

    /// Open a marker that becomes the parent of this one.
    pub fn precede<B: AsMut<TreeBuilder>>(&self, p: &mut B) -> Marker {
        p.as_mut().precede(self.pos)
    }
}

impl CompletedMarker {
    /// Open a marker that becomes the parent of the completed node.
    pub fn precede<B: AsMut<TreeBuilder>>(self, p: &mut B) -> Marker {
        p.as_mut().precede(self.pos)
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }
}

impl AsMut<TreeBuilder> for TreeBuilder {
    fn as_mut(&mut self) -> &mut TreeBuilder {
        self
    }
}

impl TreeBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            open_markers: 0,
        }
    }

    pub fn start(&mut self) -> Marker {
        let pos = self.next_pos();
        self.events.push(Event::TOMBSTONE);
        self.open_markers += 1;
        Marker { pos }
    }

    pub fn token(&mut self) {
        self.events.push(Event::Token);
    }

    pub fn error(&mut self) {
        self.events.push(Event::Error);
    }

    pub fn open_markers(&self) -> u32 {
        self.open_markers
    }

    fn next_pos(&self) -> u32 {
        u32::try_from(self.events.len()).unwrap_or(u32::MAX)
    }

    fn complete(&mut self, pos: u32, new_kind: NodeKind) {
        if let Some(Event::Start { kind, .. }) = self.events.get_mut(pos as usize) {
            debug_assert!(kind.is_none(), "marker completed twice");
            *kind = Some(new_kind);
        }
        self.events.push(Event::Finish);
        self.open_markers -= 1;
    }

    /// The `Start` stays in the log as a tombstone: a preceded marker may
    /// still point at it through `forward_parent`.
    fn abandon(&mut self, pos: u32) {
        debug_assert!(
            matches!(
                self.events.get(pos as usize),
                Some(Event::Start { kind: None, .. })
            ),
            "dropped marker was already completed"
        );
        self.open_markers -= 1;
    }

    /// The new marker is inserted between `pos` and any parent `pos` already had.
    fn precede(&mut self, pos: u32) -> Marker {
        let new_pos = self.next_pos();
        let previous_parent = match self.events.get_mut(pos as usize) {
            Some(Event::Start { forward_parent, .. }) => forward_parent.replace(new_pos),
            _ => None,
        };
        self.events.push(Event::Start {
            kind: None,
            forward_parent: previous_parent,
        });
        self.open_markers += 1;
        Marker { pos: new_pos }
    }

    /// Replay the event log into an arena. Returns the arena and its outermost node.
    pub fn build(mut self) -> (NodeArena, NodeIndex) {
        debug_assert_eq!(self.open_markers, 0, "unresolved markers at end of parse");

        struct OpenNode {
            kind: NodeKind,
            token_start: u32,
            children: SmallVec<[SyntaxElement; 4]>,
        }

        let mut arena = NodeArena::with_capacity(self.events.len() / 2);
        let mut stack: Vec<OpenNode> = Vec::new();
        let mut root = NodeIndex::NONE;
        let mut next_token = 0u32;
        let mut forward_kinds: SmallVec<[NodeKind; 4]> = SmallVec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::TOMBSTONE) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    forward_kinds.extend(kind);
                    let mut next = forward_parent;
                    while let Some(parent) = next {
                        next = match self
                            .events
                            .get_mut(parent as usize)
                            .map(|event| std::mem::replace(event, Event::TOMBSTONE))
                        {
                            Some(Event::Start {
                                kind,
                                forward_parent,
                            }) => {
                                forward_kinds.extend(kind);
                                forward_parent
                            }
                            _ => None,
                        };
                    }
                    // Outermost first.
                    for kind in forward_kinds.drain(..).rev() {
                        stack.push(OpenNode {
                            kind,
                            token_start: next_token,
                            children: SmallVec::new(),
                        });
                    }
                }
                Event::Finish => {
                    let Some(open) = stack.pop() else {
                        continue;
                    };
                    let index = NodeIndex(u32::try_from(arena.len()).unwrap_or(u32::MAX - 1));
                    for child in &open.children {
                        if let SyntaxElement::Node(child) = *child
                            && let Some(node) = arena.get_mut(child)
                        {
                            node.parent = index;
                        }
                    }
                    arena.add(Node {
                        kind: open.kind,
                        children: open.children,
                        parent: NodeIndex::NONE,
                        token_start: open.token_start,
                        token_end: next_token,
                    });
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(SyntaxElement::Node(index)),
                        None => root = index,
                    }
                }
                Event::Token => {
                    if let Some(top) = stack.last_mut() {
                        top.children.push(SyntaxElement::Token(next_token));
                    }
                    next_token += 1;
                }
                Event::Error => {
                    let index = arena.add(Node {
                        kind: NodeKind::Error,
                        children: SmallVec::new(),
                        parent: NodeIndex::NONE,
                        token_start: next_token,
                        token_end: next_token,
                    });
                    if let Some(top) = stack.last_mut() {
                        top.children.push(SyntaxElement::Node(index));
                    }
                }
            }
        }

        (arena, root)
    }
}
