//! Newsletter subscription: field rules, domain completion, the subscriber
//! counter and the controller tying them to the form

mod controller;
mod counter;
mod suggestion;
mod validation;

pub use controller::{FollowUp, SubscriptionController};

#[cfg(test)]
pub use controller::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use counter::{format_count, parse_count};
