pub const FURNITURE_SELECTOR_ID: &str = "furniture-selector";
pub const SCALE_X_ID: &str = "scale-x";
pub const SCALE_Y_ID: &str = "scale-y";
pub const SCALE_Z_ID: &str = "scale-z";
pub const ROTATION_X_ID: &str = "rot-x";
pub const ROTATION_Y_ID: &str = "rot-y";
pub const ROTATION_Z_ID: &str = "rot-z";
pub const LOCK_TOGGLE_ID: &str = "lock-toggle";
pub const MEASUREMENT_DISPLAY_ID: &str = "measurement-display";

/// AR.js injects the camera feed into this element.
pub const AR_VIDEO_ELEMENT_ID: &str = "arjs-video";

pub const LOCK_LABEL_UNLOCKED: &str = "Lock Placement";
pub const LOCK_LABEL_LOCKED: &str = "Unlock Placement";
/// Style class applied to the lock toggle while world-anchored.
pub const LOCKED_STYLE_CLASS: &str = "locked";
