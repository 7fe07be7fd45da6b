/// Deferred resize and video styling after the AR camera starts.
pub mod camera_fix;
