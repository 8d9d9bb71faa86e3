//! Listing controller: the `Loading → Ready | Error` state machine that owns
//! the current page of one listing.
//!
//! The controller never writes the URL and never renders. It reads parameters
//! from a [`FilterStore`](crate::filters::FilterStore) (through
//! [`ListingController::bind`] or explicit calls) and publishes
//! [`ListingSnapshot`]s on a watch channel.

mod controller;
mod state;

pub use controller::{ListingController, Refresh};
pub use state::{ListingSnapshot, ListingStatus};
