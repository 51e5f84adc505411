// crates/darkframe-core/src/helpers/mod.rs

pub mod time;
