// Adapters layer: concrete implementations for external systems (files, input formats).

pub mod loader;
pub mod sample;
pub mod storage;
