//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services orchestrate the auth primitives and the database.

mod timeline;

pub use timeline::{LoginOutcome, MAX_TWEET_CHARS, TimelineService};
