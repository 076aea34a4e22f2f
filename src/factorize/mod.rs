//! Term-document matrix construction and iterative factorization
//!
//! ## Submodules
//!
//! - [`tdmatrix`] — tf-idf weighted terms × documents matrix
//! - [`nmf`] — seeded non-negative factorization, one update per call

pub mod nmf;
pub mod tdmatrix;

pub use nmf::NonnegativeFactorization;
pub use tdmatrix::TermDocumentMatrix;
