//! Generation chains
//!
//! A chain composes one of the static prompt templates with a model
//! invocation and returns the raw text response. The executor and iterator
//! variants wrap the invocation in an agent loop over the lookup tools.

pub mod agent;
pub mod executor;
pub mod iterator;
pub mod simple;

pub use executor::ExecutorChain;
pub use iterator::IteratorChain;
pub use simple::SimpleChain;

/// Fixed model identifier used by every chain.
pub const DEFAULT_MODEL: &str = "gpt-4";
