/**
 * model module
 *
 * - term: IRIs, typed literals and the object-position term
 * - triple: owned statements and borrowed views into the store
 */

pub mod term;
pub mod triple;

pub use term::{Datatype, Iri, Literal, Term};
pub use triple::{Triple, TripleRef};
