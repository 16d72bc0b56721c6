//! Call action domain module

mod action;

pub use action::{CallAction, ACCEPT_CALL, ALL_ACTIONS, DECLINE_CALL, PLAY_NOTIFICATION_AND_ACCEPT};
