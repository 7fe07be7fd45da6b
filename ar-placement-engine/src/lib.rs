//! Browser-hosted AR furniture placement.
//!
//! A proxy box for the chosen furniture archetype rides on a tracked marker
//! until the user locks it into the world frame. The page owns the controls
//! and the tracker and talks to the engine over [`rpc`].

pub mod engine;
pub mod error;
pub mod furniture;
pub mod placement;
pub mod rpc;
