//! Handler trait and the built-in handler set
//!
//! ## Key Components
//!
//! - [`Handler`] - what every chain element implements
//! - [`FnHandler`] - handler assembled from two closures
//! - [`builtin_factory`] - factory table for the text-routing handlers
//!   registered under [`BUILTIN_NAMESPACE`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use corchain::handlers::Handler;
//!
//! struct Even;
//!
//! impl Handler<u64, String> for Even {
//!     fn is_responsible(&self, input: &u64) -> bool {
//!         input % 2 == 0
//!     }
//!
//!     fn execute(&self, input: &u64) -> Option<String> {
//!         Some(format!("{input} is even"))
//!     }
//! }
//! ```

mod builtin;
mod traits;

pub use builtin::{
    BUILTIN_NAMESPACE, BlankHandler, CatchAllHandler, IntegerHandler, KeywordHandler, UrlHandler,
    builtin_factory,
};
pub use traits::{BoxedHandler, FnHandler, Handler};
