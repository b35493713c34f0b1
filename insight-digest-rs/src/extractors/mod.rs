//! Extractors that derive display content from analysis records

pub mod bullets;

pub use bullets::*;
