//! Composite transformers.
//!
//! # Available Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Chain transformers sequentially |
//! | [`Wrapper`] | Delegate to one transformer built from a prototype |
//!
//! Both accept the `transformer_args` override: a list of per-stage option
//! maps for [`Pipeline`], a single option map for [`Wrapper`].

#[allow(clippy::module_inception)]
pub mod pipeline;
mod wrapper;

pub use pipeline::Pipeline;
pub use wrapper::Wrapper;
