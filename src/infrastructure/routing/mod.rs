//! Audio routing module

mod process;

pub use process::ProcessRouting;
