//! Contract Tests - Graph Invariant Protection
//!
//! This file aggregates all contract test modules.
//! Contract tests verify invariants that MUST NEVER BREAK.

// Contract test modules
mod contracts {
    // Triple store set semantics
    mod store {
        include!("store_contracts.rs");
    }

    // Identifier normalization
    mod normalizer {
        include!("normalizer_contracts.rs");
    }

    // Record-to-triples mapping
    mod mapping {
        include!("mapping_contracts.rs");
    }

    // Pattern query evaluation
    mod query {
        include!("query_contracts.rs");
    }
}
