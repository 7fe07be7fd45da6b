use bevy::prelude::*;

/// Order of the placement pipeline within `Update`.
///
/// - `Ingest`: page messages and shortcuts become events
/// - `Apply`: selection, control values and marker poses land on the scene
/// - `Lock`: toggles see everything applied earlier in the frame
/// - `Publish`: readouts reflect the final state
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Ingest,
    Apply,
    Lock,
    Publish,
}

/// Chain the sets. Every plugin that schedules into them calls this, so any
/// subset of plugins gets the same order.
pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Ingest,
            FrameSet::Apply,
            FrameSet::Lock,
            FrameSet::Publish,
        )
            .chain(),
    );
}
