pub mod builder;
pub mod evaluator;
pub mod literal;
pub mod occurrence;
pub mod scope;

pub use builder::analyze_factory_definition;
pub use evaluator::Evaluator;
pub use occurrence::{BranchAlloc, BranchTag, ClassOccurrence, ClassValue, ConditionalId};
pub use scope::{DeclEntry, ScopeStack};
