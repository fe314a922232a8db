//! Custom sound validation adapters

mod fs;

pub use fs::FsSoundValidator;
