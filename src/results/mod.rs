//! results — estimation output consumed by post-estimation analysis.
//!
//! Purpose
//! -------
//! Provide the read-only containers that sit between the Gibbs sampler and
//! everything downstream. Analysis code (impulse responses, variance
//! decompositions, diagnostics) depends on these types only, never on the
//! sampler itself.
//!
//! Key behaviors
//! -------------
//! - [`BvarResults`] owns the `(y, x)` data, the retained draws and the run
//!   metadata, and validates their consistency at construction.
//! - [`MultiChainResults`] groups independent chains, computes split R̂ per
//!   coefficient and pools draws.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shape and count mismatches are configuration errors raised when a
//!   container is built, not when it is analysed.

pub mod container;
pub mod diagnostics;

pub use self::container::{BvarResults, SamplerMetadata};
pub use self::diagnostics::MultiChainResults;

pub mod prelude {
    pub use super::container::{BvarResults, SamplerMetadata};
    pub use super::diagnostics::MultiChainResults;
}
