//! The single-pass tabular transformation: header combining, data-window
//! selection and key-domain collection, driven by the streaming rewriter.

pub mod domains;
pub mod header;
pub mod rewrite;
pub mod window;

pub use rewrite::{transform, TransformResult};
