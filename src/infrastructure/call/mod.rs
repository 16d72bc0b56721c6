//! Call-control module

mod command;

pub use command::{CallControlError, CommandCallControl};
