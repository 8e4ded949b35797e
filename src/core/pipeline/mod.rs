//! # Pipeline Module
//!
//! Orchestrates one run of the identical image finder.
//!
//! ## Pipeline Stages
//! 1. **Scan** - List recognized images directly inside the folder
//! 2. **Fingerprint** - Digest canonical pixels of every image
//! 3. **Group** - Collect names sharing a fingerprint
//! 4. **Report / Clean** - Pick keepers, then optionally remove the rest
//!
//! ## Parallelism
//! Fingerprinting runs on the rayon pool unless disabled; results are
//! gathered back into scan order so output does not depend on scheduling.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, SkippedImage};
