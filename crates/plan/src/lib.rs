//! Milestone Plans
//!
//! Canned milestone lists per goal category, used to seed a new goal's
//! milestones at creation time.

#![warn(missing_docs)]

pub mod builtin;

pub use builtin::{builtin_plan, PlanRegistry};
