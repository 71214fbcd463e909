//! # Module Graph Construction
//!
//! This module turns module paths into the two structures every diagram is
//! rendered from.
//!
//! ## Components
//!
//! - **ModuleResolver**: Resolves a module path into a shared [`Module`]
//!   graph through a [`ModuleLookup`](crate::lookup::ModuleLookup), caching
//!   results across calls and dropping edges that close a cycle
//! - **PathTreeBuilder**: Folds the paths of a resolved graph into a
//!   namespace tree of [`PathNode`]s used for visual clustering
//!
//! ## Example
//!
//! ```
//! use modgraph::graph::{ModuleResolver, PathTreeBuilder, dependency_paths};
//! use modgraph::lookup::StaticLookup;
//!
//! # fn main() -> Result<(), modgraph::error::ModGraphError> {
//! let lookup = StaticLookup::from_pairs([
//!     (":app", vec![":core:data"]),
//!     (":core:data", vec![]),
//! ]);
//!
//! let mut resolver = ModuleResolver::new(lookup);
//! let app = resolver.resolve(":app")?;
//!
//! let tree = PathTreeBuilder::build(app.path(), dependency_paths(&app));
//! assert!(tree.child("app").unwrap().is_target());
//! assert_eq!(
//!     tree.child("core").unwrap().child("data").unwrap().path(),
//!     Some(":core:data")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! [`Module`]: crate::core::Module

mod resolver;
mod tree;

pub use resolver::ModuleResolver;
pub use tree::{PathNode, PathTreeBuilder, dependency_paths};
