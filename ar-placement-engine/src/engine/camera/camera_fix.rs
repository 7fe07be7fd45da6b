//! Work around the AR layer sizing its canvas before the camera feed exists.
//!
//! Every camera initialisation schedules one synthetic window `resize`
//! `CAMERA_RESIZE_DELAY_MS` later and forces the video element to cover the
//! viewport. Triggers are independent: two initialisations produce two
//! resizes.

use crate::engine::core::frame_sets::{FrameSet, configure_frame_sets};
use crate::error::PlacementError;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use constants::timing::CAMERA_RESIZE_DELAY_MS;
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Fired when the page reports the AR camera is up.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CameraInitialized;

/// Fired when a scheduled resize goes out.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResizeDispatched;

/// Pending one-shot resize timers.
#[derive(Resource, Debug, Default)]
pub struct DeferredResizeQueue {
    pending: Vec<Timer>,
    dispatched: u32,
}

impl DeferredResizeQueue {
    pub fn schedule(&mut self, delay: Duration) {
        self.pending.push(Timer::new(delay, TimerMode::Once));
    }

    /// Advance every timer and drop the finished ones. Returns how many
    /// fired.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        let before = self.pending.len();
        self.pending.retain_mut(|timer| !timer.tick(delta).finished());
        let fired = (before - self.pending.len()) as u32;
        self.dispatched += fired;
        fired
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total resizes dispatched since startup.
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }
}

pub struct CameraFixPlugin;

impl Plugin for CameraFixPlugin {
    fn build(&self, app: &mut App) {
        // Ticking before scheduling keeps a fresh timer from firing in the
        // frame it was created in.
        configure_frame_sets(app);
        app.init_resource::<DeferredResizeQueue>()
            .add_event::<CameraInitialized>()
            .add_event::<ResizeDispatched>()
            .add_systems(
                Update,
                (tick_deferred_resizes, schedule_resize_on_camera_init)
                    .chain()
                    .in_set(FrameSet::Apply),
            );
    }
}

pub fn schedule_resize_on_camera_init(
    mut events: EventReader<CameraInitialized>,
    mut queue: ResMut<DeferredResizeQueue>,
) {
    for _ in events.read() {
        queue.schedule(Duration::from_millis(CAMERA_RESIZE_DELAY_MS));
        debug!("Camera resize scheduled in {CAMERA_RESIZE_DELAY_MS}ms");

        if let Err(error) = apply_video_styles() {
            error!("Failed to apply video styles: {error}");
        }
    }
}

pub fn tick_deferred_resizes(
    time: Res<Time>,
    mut queue: ResMut<DeferredResizeQueue>,
    mut dispatched: EventWriter<ResizeDispatched>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if queue.pending() == 0 {
        return;
    }

    for _ in 0..queue.tick(time.delta()) {
        if let Err(error) = dispatch_window_resize() {
            error!("Error triggering camera resize fix: {error}");
        }
        rpc_interface.send_notification("resize", serde_json::json!({}));
        dispatched.write(ResizeDispatched);
    }
}

#[cfg(target_arch = "wasm32")]
fn dispatch_window_resize() -> Result<(), String> {
    let window = web_sys::window().ok_or("window unavailable")?;
    let event = web_sys::Event::new("resize").map_err(|e| format!("{e:?}"))?;
    window
        .dispatch_event(&event)
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn dispatch_window_resize() -> Result<(), String> {
    Ok(())
}

/// Stretch the AR camera feed to cover the viewport.
#[cfg(target_arch = "wasm32")]
fn apply_video_styles() -> Result<(), PlacementError> {
    use constants::ui::AR_VIDEO_ELEMENT_ID;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(PlacementError::MissingHandle("document"))?;
    let video = document
        .get_element_by_id(AR_VIDEO_ELEMENT_ID)
        .ok_or(PlacementError::MissingHandle("AR video element"))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| PlacementError::MissingHandle("AR video element"))?;

    video
        .style()
        .set_property("object-fit", "cover")
        .map_err(|_| PlacementError::MissingHandle("AR video element style"))
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_video_styles() -> Result<(), PlacementError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(CAMERA_RESIZE_DELAY_MS);

    #[test]
    fn fires_once_after_delay() {
        let mut queue = DeferredResizeQueue::default();
        queue.schedule(DELAY);

        assert_eq!(queue.tick(Duration::ZERO), 0);
        assert_eq!(queue.tick(DELAY - Duration::from_millis(1)), 0);
        assert_eq!(queue.tick(Duration::from_millis(1)), 1);
        assert_eq!(queue.tick(DELAY * 4), 0);
        assert_eq!(queue.dispatched(), 1);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn retriggers_schedule_independent_resizes() {
        let mut queue = DeferredResizeQueue::default();
        queue.schedule(DELAY);
        queue.tick(Duration::from_millis(300));
        queue.schedule(DELAY);

        assert_eq!(queue.tick(Duration::from_millis(200)), 1);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.tick(Duration::from_millis(300)), 1);
        assert_eq!(queue.dispatched(), 2);
    }
}
