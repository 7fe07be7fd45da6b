/// Delay between the camera initialisation event and the synthetic resize.
pub const CAMERA_RESIZE_DELAY_MS: u64 = 500;
