use std::fmt;

use tracing::trace;

use crate::handlers::BoxedHandler;

struct Element<I: ?Sized, R> {
    type_id: String,
    handler: BoxedHandler<I, R>,
}

/// An immutable, ordered chain of handlers
///
/// Handlers are owned by the chain in traversal order; the successor of the
/// element at index `n` is the element at `n + 1` and the last element has
/// none. The topology is fixed once the chain exists: the only way to get a
/// `Chain` is [`ChainAssembly::publish`], and nothing relinks it afterwards.
pub struct Chain<I: ?Sized, R> {
    elements: Vec<Element<I, R>>,
}

/// Outcome of a traversal, with the link that produced the result
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal<'a, R> {
    /// Position and type id of the responsible handler, if any
    pub handled_by: Option<(usize, &'a str)>,
    pub result: Option<R>,
}

impl<'a, R> Traversal<'a, R> {
    pub fn is_handled(&self) -> bool {
        self.handled_by.is_some()
    }
}

impl<I: ?Sized, R> Chain<I, R> {
    /// Run `input` through the chain and return the first responsible
    /// handler's result, or `None` when no handler claims it
    pub fn process(&self, input: &I) -> Option<R> {
        self.head().process(input)
    }

    /// Like [`process`](Self::process), also reporting who handled the input
    pub fn process_traced(&self, input: &I) -> Traversal<'_, R> {
        self.head().process_traced(input)
    }

    pub fn head(&self) -> Link<'_, I, R> {
        Link {
            chain: self,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    // Always false for a published chain; kept for the `len` pairing.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Type ids in traversal order
    pub fn type_ids(&self) -> Vec<&str> {
        self.iter().map(|link| link.type_id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Link<'_, I, R>> {
        (0..self.elements.len()).map(move |index| Link { chain: self, index })
    }
}

impl<I: ?Sized, R> fmt::Debug for Chain<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("handlers", &self.type_ids())
            .finish()
    }
}

/// A position in a chain: one handler plus its successor reference
pub struct Link<'a, I: ?Sized, R> {
    chain: &'a Chain<I, R>,
    index: usize,
}

// Manual impls: derives would require `I: Clone` / `R: Clone`.
impl<I: ?Sized, R> Clone for Link<'_, I, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized, R> Copy for Link<'_, I, R> {}

impl<'a, I: ?Sized, R> Link<'a, I, R> {
    fn element(&self) -> &'a Element<I, R> {
        &self.chain.elements[self.index]
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn type_id(&self) -> &'a str {
        &self.element().type_id
    }

    /// Successor link, `None` at the end of the chain
    pub fn next(&self) -> Option<Link<'a, I, R>> {
        let index = self.index + 1;
        (index < self.chain.elements.len()).then_some(Link {
            chain: self.chain,
            index,
        })
    }

    pub fn is_responsible(&self, input: &I) -> bool {
        self.element().handler.is_responsible(input)
    }

    pub fn execute(&self, input: &I) -> Option<R> {
        self.element().handler.execute(input)
    }

    /// Default traversal starting at this link
    ///
    /// Executes this handler when it is responsible, otherwise delegates to
    /// the successor. Falling off the end yields `None`, which means
    /// "unhandled" and is not an error.
    pub fn process(&self, input: &I) -> Option<R> {
        self.process_traced(input).result
    }

    pub fn process_traced(&self, input: &I) -> Traversal<'a, R> {
        let mut current = Some(*self);

        while let Some(link) = current {
            if link.is_responsible(input) {
                trace!(position = link.index, type_id = link.type_id(), "Handler responsible");
                return Traversal {
                    handled_by: Some((link.index, link.type_id())),
                    result: link.execute(input),
                };
            }
            current = link.next();
        }

        trace!(handlers = self.chain.len(), "Input not handled by any handler");
        Traversal {
            handled_by: None,
            result: None,
        }
    }
}

impl<I: ?Sized, R> fmt::Debug for Link<'_, I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("position", &self.index)
            .field("type_id", &self.type_id())
            .finish()
    }
}

/// Staging buffer the builder links handlers into
///
/// Nothing inside an assembly is observable until [`publish`](Self::publish)
/// hands out the finished chain, so a build that fails halfway simply drops
/// the assembly and every handler created so far.
pub(crate) struct ChainAssembly<I: ?Sized, R> {
    elements: Vec<Element<I, R>>,
}

impl<I: ?Sized, R> ChainAssembly<I, R> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Link `handler` as the successor of the current tail
    ///
    /// The first handler set becomes the head.
    pub(crate) fn set_next(&mut self, type_id: impl Into<String>, handler: BoxedHandler<I, R>) {
        self.elements.push(Element {
            type_id: type_id.into(),
            handler,
        });
    }

    /// Finished chain, or `None` when nothing was linked
    pub(crate) fn publish(self) -> Option<Chain<I, R>> {
        if self.elements.is_empty() {
            return None;
        }
        Some(Chain {
            elements: self.elements,
        })
    }
}
