use bevy::prelude::*;
use bevy::window::{CompositeAlphaMode, PresentMode};

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            composite_alpha_mode: CompositeAlphaMode::PreMultiplied,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "AR Furniture Placement".into(),
            composite_alpha_mode: CompositeAlphaMode::Auto,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
