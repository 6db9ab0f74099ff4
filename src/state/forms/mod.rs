//! Form domain layer
//!
//! Type-safe field values and the subscription form built from them.

mod field;
mod subscription_form;

pub use field::{CategoryOption, FormField};
pub use subscription_form::{Focus, SubscriptionForm};
