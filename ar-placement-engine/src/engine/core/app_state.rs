use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the furniture catalog.
    #[default]
    Loading,
    /// Catalog installed, scene spawned, input accepted.
    Running,
}

pub fn announce_running() {
    info!("→ Catalog installed, transitioning to Running state");
}
