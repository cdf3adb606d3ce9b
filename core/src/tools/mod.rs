//! Lookup tools used by the agent chains during generation

pub mod base;
pub mod builtin;

pub use base::{definition_for, query_from_input, LookupTool};
pub use builtin::{PackageInfoTool, PackageSearchTool, WebSearchTool};
