//! Analytics domain activities

mod load_summary;

pub use load_summary::load_summary;
