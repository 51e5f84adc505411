// crates/darkframe-media/src/helpers/mod.rs
//
// Internal helpers shared across probe.rs and export.rs.
// Not part of the public API.

pub(crate) mod process;
