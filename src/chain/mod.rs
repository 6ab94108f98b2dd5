//! Chain construction and traversal
//!
//! A chain is built once from a set of handler descriptors and then
//! traversed for every input: the first handler that declares itself
//! responsible executes, everything after it is skipped. Inputs nobody
//! claims come back as `None`.
//!
//! ## Key Components
//!
//! - [`ChainBuilder`] - orders, instantiates and links handlers
//! - [`Chain`] / [`Link`] - the immutable result and its traversal engine
//! - [`Descriptor`] - what the builder consumes
//! - [`InstantiationStrategy`] - how a descriptor becomes a handler
//!   ([`DefaultConstruct`], [`GlobalInitializer`], [`PerTypeInitializer`])
//! - [`HandlerFactory`] - per-type constructor and initializer table
//!
//! ## Example
//!
//! ```rust,ignore
//! use corchain::chain::{ChainBuilder, Descriptor, HandlerFactory};
//!
//! let mut factory = HandlerFactory::<str, String>::new();
//! factory.register_default::<IntegerHandler>("integer");
//!
//! let chain = ChainBuilder::new()
//!     .build_from_descriptors(vec![Descriptor::new("integer")], &factory)?
//!     .expect("at least one descriptor");
//! let routed = chain.process("42");
//! ```

mod builder;
mod descriptor;
mod engine;
mod error;
mod strategy;

pub use builder::{BuildOptions, ChainBuilder, EmptyChainPolicy, TieBreak};
pub use descriptor::Descriptor;
pub use engine::{Chain, Link, Traversal};
pub use error::{BoxError, BuildError, InstantiationError};
pub use strategy::{
    Binding, Constructor, DefaultConstruct, GlobalInitializer, HandlerFactory, Initializer,
    InitializerAccessor, InstantiationStrategy, PerTypeInitializer,
};
