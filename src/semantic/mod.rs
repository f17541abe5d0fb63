pub mod scope_table;
pub mod visitor;

pub use scope_table::ScopeTable;
pub use visitor::{AstVisitor, NodeCounter};
