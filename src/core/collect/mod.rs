//! Pre-pass collection over a parsed module.
//!
//! Before class expressions are evaluated, one cheap pass over the module
//! gathers everything resolution needs up front:
//! - which local names are recognized class-joiners or variant-builder
//!   factories (from import declarations plus the configured allow-lists)
//! - module-level `const`/`let` declarations, so identifiers resolve the same
//!   whether the declaration sits above or below its use site
//! - which names are ever assigned, making their bindings unresolvable
//! - suppression comments (`twlint-disable-next-line`)

pub mod builders;
pub mod module_scope;
pub mod suppressions;

pub use builders::{BuilderKind, BuilderRegistry};
pub use module_scope::{collect_assigned_names, collect_module_scope};
pub use suppressions::Suppressions;
