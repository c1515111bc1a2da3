//! Test support for swagspec: a seeded fuzz generator for specification documents and
//! the differential oracle that runs fuzzed documents, and rewrites of their encodings,
//! through both decoders.

pub mod fuzz;
pub mod mutate;
pub mod oracle;

pub use fuzz::{Fuzz, FuzzConfig, FuzzFuncs, Fuzzer};
pub use mutate::{Mutator, Perturbation};
pub use oracle::{Divergence, Failure, Invariant};
