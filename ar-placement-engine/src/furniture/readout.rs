use super::controls::ControlValues;
use super::measurement::{
    dimension_label_text, effective_dimensions, format_measurements, label_offset,
};
use super::selection::FurnitureSelection;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use constants::render_settings::{LABEL_COLOR, LABEL_SCALE};
use constants::ui::MEASUREMENT_DISPLAY_ID;

/// Native overlay text mirroring the page's measurement display.
#[derive(Component)]
pub struct MeasurementDisplayText;

/// Recompute the readout and dimension label whenever the selection or any
/// control changes, and push both to the page.
pub fn publish_measurements(
    controls: Res<ControlValues>,
    selection: Res<FurnitureSelection>,
    mut displays: Query<&mut Text, With<MeasurementDisplayText>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !controls.is_changed() && !selection.is_changed() {
        return;
    }

    let spec = selection.spec();
    let dimensions = effective_dimensions(spec, controls.scale);
    let readout = format_measurements(dimensions);

    for mut text in &mut displays {
        text.0 = readout.clone();
    }

    rpc_interface.send_notification(
        "measurements_updated",
        serde_json::json!({
            "element_id": MEASUREMENT_DISPLAY_ID,
            "text": readout,
            "width": dimensions.x,
            "height": dimensions.y,
            "depth": dimensions.z,
        }),
    );

    let offset = label_offset(spec.height);
    rpc_interface.send_notification(
        "dimension_label_updated",
        serde_json::json!({
            "furniture_type": selection.furniture_type(),
            "text": dimension_label_text(spec.display_name(), spec.size()),
            "position": [offset.x, offset.y, offset.z],
            "scale": [LABEL_SCALE.x, LABEL_SCALE.y, LABEL_SCALE.z],
            "color": LABEL_COLOR.to_srgba().to_hex(),
            "align": "center",
        }),
    );
}
