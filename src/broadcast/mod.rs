//! Change notification fan-out.
//!
//! After any successful commit the contact service publishes a single
//! "contacts changed" signal to every currently connected subscriber.
//! Delivery is best-effort per subscriber; subscribers re-fetch state on
//! receipt.

mod hub;

pub use hub::{ChangeBroadcaster, ChangeSignal, Subscription, DEFAULT_BUFFER};
