use std::fmt;

/// Boxed handler as stored inside a built chain
pub type BoxedHandler<I, R> = Box<dyn Handler<I, R>>;

/// A single chain element able to conditionally process an input
///
/// `execute` is only called by the engine after `is_responsible` returned
/// `true` for the same input in the same traversal step, so implementations
/// need not re-check. Keep `is_responsible` free of side effects: the engine
/// relies on it to decide where traversal stops.
///
/// Handlers are `Send + Sync` so every built chain can be shared between
/// threads without a second, thread-local chain type. The cost is that a
/// handler cannot keep `Cell`/`RefCell` state; use an atomic or a `Mutex`
/// instead. Whatever interior state a handler mutates remains its own
/// business to keep consistent.
pub trait Handler<I: ?Sized, R>: Send + Sync {
    /// Whether this handler takes ownership of `input`
    fn is_responsible(&self, input: &I) -> bool;

    /// Process an input this handler claimed
    fn execute(&self, input: &I) -> Option<R>;
}

impl<I: ?Sized, R, H: Handler<I, R> + ?Sized> Handler<I, R> for Box<H> {
    fn is_responsible(&self, input: &I) -> bool {
        (**self).is_responsible(input)
    }

    fn execute(&self, input: &I) -> Option<R> {
        (**self).execute(input)
    }
}

/// Handler assembled from a predicate and an execute closure
///
/// Mostly useful for global initializers and tests where declaring a struct
/// per handler is noise.
pub struct FnHandler<P, E> {
    responsible: P,
    execute: E,
}

impl<P, E> FnHandler<P, E> {
    pub fn new(responsible: P, execute: E) -> Self {
        Self {
            responsible,
            execute,
        }
    }
}

impl<I, R, P, E> Handler<I, R> for FnHandler<P, E>
where
    I: ?Sized,
    P: Fn(&I) -> bool + Send + Sync,
    E: Fn(&I) -> Option<R> + Send + Sync,
{
    fn is_responsible(&self, input: &I) -> bool {
        (self.responsible)(input)
    }

    fn execute(&self, input: &I) -> Option<R> {
        (self.execute)(input)
    }
}

impl<P, E> fmt::Debug for FnHandler<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}
