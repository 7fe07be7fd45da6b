use bevy::prelude::*;

/// Root of the world frame. Everything in the AR scene hangs off this node.
#[derive(Component)]
pub struct WorldRoot;

/// Node driven by the external marker tracker.
#[derive(Component)]
pub struct MarkerAnchor;

/// The furniture proxy box the user places.
#[derive(Component)]
pub struct TrackedFurniture;

/// Native overlay text mirroring the lock toggle label.
#[derive(Component)]
pub struct LockIndicatorText;
