//! Three-tier configuration resolution for tarot builds.
//!
//! Library defaults are merged with project options into a validated base
//! configuration, then each entry's overrides are merged over that base:
//!
//! ```
//! use std::path::Path;
//! use tarot_config::{BuildMode, Entries, RawOptions, Resolver};
//!
//! let resolver = Resolver::new("/work").with_probe(|_: &Path| true);
//! let entries = Entries::new().with("bundle", "index.js");
//! let resolved = resolver
//!     .resolve(&RawOptions::default(), &entries, BuildMode::Development)
//!     .unwrap();
//! assert_eq!(resolved[0].script_output_name, "bundle.js");
//! ```

pub mod assets;
pub mod defaults;
pub mod discovery;
pub mod entry;
pub mod error;
pub mod merge;
pub mod mode;
pub mod options;
pub mod project;
pub mod resolved;
pub mod resolver;
pub mod tsconfig;
pub mod validation;

pub use defaults::Defaults;
pub use entry::{Entries, EntryOptions, EntrySpec, RawEntries};
pub use error::*;
pub use mode::BuildMode;
pub use options::{ArtifactDescriptor, CopyDirective, CopyPattern, RawOptions};
pub use project::ProjectConfig;
pub use resolved::{BaseConfiguration, ResolvedConfiguration, ResolvedOptions};
pub use resolver::Resolver;

// Re-export discovery and validation
pub use discovery::{apply_env, discover, load_from, ConfigDiscovery};
pub use validation::{FsProbe, PathProbe};
