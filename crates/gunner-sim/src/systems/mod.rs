//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state: enemies live in components, run counters in the engine.

pub mod cleanup;
pub mod hit_resolution;
pub mod lifecycle;
pub mod snapshot;
pub mod spawn_scheduler;
