/**
 * query module
 *
 * - pattern: triple patterns, basic graph patterns, prepared queries
 * - binding: variable assignments
 * - engine: left-deep join evaluation with ordering and limit
 * - parser: minimal SELECT text form
 * - catalog: canned catalog queries
 */

pub mod binding;
pub mod catalog;
pub mod engine;
pub mod parser;
pub mod pattern;

pub use binding::Binding;
pub use catalog::CatalogQuery;
pub use engine::{instances_of, QueryEngine};
pub use parser::{parse_query, QueryParser};
pub use pattern::{BasicGraphPattern, Direction, OrderBy, PreparedQuery, TermPattern, TriplePattern};
