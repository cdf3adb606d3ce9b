//! Built-in lookup tools

pub mod package_info;
pub mod package_search;
pub mod web_search;

pub use package_info::PackageInfoTool;
pub use package_search::PackageSearchTool;
pub use web_search::WebSearchTool;

/// Default npm registry endpoint shared by the package tools.
pub(crate) const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
