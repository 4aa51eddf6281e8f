//! Sparse labeled training-data serialization.
//!
//! One example per line: a signed integer label followed by ascending
//! 1-based `index:value` pairs. Single examples carry one vector's
//! block; pair examples carry the difference of two vectors, merged by
//! offset.

pub mod libsvm;
pub mod writer;

pub use libsvm::{write_example, write_pair_example};
pub use writer::ExampleWriter;
