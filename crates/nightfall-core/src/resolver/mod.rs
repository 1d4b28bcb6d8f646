//! Resolvers turn recorded choices into state changes.
//!
//! Three resolvers run at different points of the cycle:
//!
//! - [`ActionResolver`]: one recorded turn; runs the role's `resolve` hook,
//!   which may only write to the night accumulator
//! - [`NightResolver`]: once per night, after the last turn; the only place
//!   where pending kills and revivals change life flags
//! - [`DayTransition`]: win check, then `restore` hooks in reverse turn order
//!
//! # Invariants
//!
//! - Kills proposed during the night never change a life flag before
//!   [`NightResolver::resolve`] runs.
//! - Role hook failures are logged and never abort a resolver.

mod action;
mod day;
mod night;

pub use action::ActionResolver;
pub use day::{DayOutcome, DayTransition};
pub use night::{NightResolver, NightSummary};
