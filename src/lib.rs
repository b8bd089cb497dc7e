//! Public library API for rendering decoded manifests as pruned source literals.

/// Schema registry, manifest decoding, and the literal renderer.
pub mod manifest;
