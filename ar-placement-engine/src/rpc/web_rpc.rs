use crate::engine::assets::furniture_catalog::FurnitureCatalog;
use crate::engine::camera::camera_fix::CameraInitialized;
use crate::engine::core::frame_sets::{FrameSet, configure_frame_sets};
use crate::error::PlacementError;
use crate::furniture::controls::{ControlId, ControlInput};
use crate::furniture::selection::FurnitureSelected;
use crate::placement::components::TrackedFurniture;
use crate::placement::lock::PlacementLock;
use crate::placement::systems::{MarkerPoseUpdate, ToggleLockRequest, lock_state_json};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing queue for the page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Report a failed operation to the page.
    pub fn send_error(&mut self, operation: &str, error: &PlacementError) {
        self.send_notification(
            "placement_error",
            serde_json::json!({
                "operation": operation,
                "kind": error.kind(),
                "message": error.to_string(),
            }),
        );
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications queued since the last flush.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses queued since the last flush.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the page bridge.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(FrameSet::Ingest),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, page bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership moves to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages received by the page listener, waiting for the next frame.
#[derive(Resource)]
pub struct MessageQueue(pub std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing one raw message from the page.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// A page request translated into engine terms.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementCommand {
    SelectFurniture(String),
    SetControl(ControlInput),
    ToggleLock,
    MarkerPose(MarkerPoseUpdate),
    CameraInit,
    GetCatalog,
    GetPlacementState,
}

/// Validate a request and map it onto a command.
pub fn parse_command(request: &RpcRequest) -> Result<PlacementCommand, RpcError> {
    if request.jsonrpc != "2.0" {
        return Err(RpcError::invalid_request("Expected jsonrpc \"2.0\""));
    }

    match request.method.as_str() {
        "select_furniture" => {
            #[derive(Deserialize)]
            struct SelectParams {
                #[serde(rename = "type")]
                furniture_type: String,
            }
            let params = serde_json::from_value::<SelectParams>(request.params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'type' parameter"))?;
            Ok(PlacementCommand::SelectFurniture(params.furniture_type))
        }
        "set_control" => {
            #[derive(Deserialize)]
            struct ControlParams {
                control: String,
                value: serde_json::Value,
            }
            let params = serde_json::from_value::<ControlParams>(request.params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'control' and 'value' parameters"))?;
            let control = ControlId::from_element_id(&params.control).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown control: {}", params.control))
            })?;
            let raw = match params.value {
                serde_json::Value::String(raw) => raw,
                other => other.to_string(),
            };
            Ok(PlacementCommand::SetControl(ControlInput { control, raw }))
        }
        "toggle_lock" => Ok(PlacementCommand::ToggleLock),
        "marker_pose" => {
            #[derive(Deserialize)]
            struct PoseParams {
                position: [f32; 3],
                #[serde(default)]
                rotation: [f32; 3],
                #[serde(default = "default_visible")]
                visible: bool,
            }
            let params = serde_json::from_value::<PoseParams>(request.params.clone())
                .map_err(|_| RpcError::invalid_params("Expected 'position' as [x, y, z]"))?;
            Ok(PlacementCommand::MarkerPose(MarkerPoseUpdate {
                translation: Vec3::from_array(params.position),
                rotation_degrees: Vec3::from_array(params.rotation),
                visible: params.visible,
            }))
        }
        "camera_init" => Ok(PlacementCommand::CameraInit),
        "get_catalog" => Ok(PlacementCommand::GetCatalog),
        "get_placement_state" => Ok(PlacementCommand::GetPlacementState),
        _ => Err(RpcError::method_not_found(&request.method)),
    }
}

fn default_visible() -> bool {
    true
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    catalog: Option<Res<FurnitureCatalog>>,
    locks: Query<&PlacementLock, With<TrackedFurniture>>,
    mut selections: EventWriter<FurnitureSelected>,
    mut control_inputs: EventWriter<ControlInput>,
    mut toggles: EventWriter<ToggleLockRequest>,
    mut marker_poses: EventWriter<MarkerPoseUpdate>,
    mut camera_events: EventWriter<CameraInitialized>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    None,
                    RpcError::parse_error(&parse_error.to_string()),
                ));
                continue;
            }
        };

        let result = parse_command(&request).and_then(|command| {
            debug!("RPC command: {:?}", command);
            match command {
                PlacementCommand::SelectFurniture(furniture_type) => {
                    let ack = serde_json::json!({ "success": true, "type": furniture_type });
                    selections.write(FurnitureSelected { furniture_type });
                    Ok(ack)
                }
                PlacementCommand::SetControl(input) => {
                    let ack = serde_json::json!({
                        "success": true,
                        "control": input.control.element_id(),
                    });
                    control_inputs.write(input);
                    Ok(ack)
                }
                PlacementCommand::ToggleLock => {
                    toggles.write(ToggleLockRequest);
                    Ok(serde_json::json!({ "success": true }))
                }
                PlacementCommand::MarkerPose(update) => {
                    marker_poses.write(update);
                    Ok(serde_json::json!({ "success": true }))
                }
                PlacementCommand::CameraInit => {
                    camera_events.write(CameraInitialized);
                    Ok(serde_json::json!({ "success": true }))
                }
                PlacementCommand::GetCatalog => catalog
                    .as_deref()
                    .map(FurnitureCatalog::to_json)
                    .ok_or_else(|| RpcError::internal_error("Catalog not loaded yet")),
                PlacementCommand::GetPlacementState => locks
                    .single()
                    .map(|lock| lock_state_json(lock.anchor()))
                    .map_err(|_| RpcError::from(PlacementError::MissingHandle("tracked object"))),
            }
        });

        // Requests without an ID are notifications and get no reply.
        let Some(id) = request.id else {
            if let Err(error) = result {
                warn!("RPC notification '{}' rejected: {}", request.method, error.message);
            }
            continue;
        };

        let response = match result {
            Ok(result_value) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result_value),
                error: None,
                id: Some(id),
            },
            Err(error) => {
                warn!("RPC request '{}' failed: {}", request.method, error.message);
                create_error_response(Some(id), error)
            }
        };
        rpc_interface.queue_response(response);
    }
}

fn create_error_response(id: Option<serde_json::Value>, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id,
    }
}

/// Send queued notifications and responses to the page.
pub fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the hosting window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize message: {}", e);
                return;
            }
        };
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        // A top-level page is its own parent.
        let target = window.parent().ok().flatten().unwrap_or(window);
        if let Err(e) = target.post_message(&JsValue::from_str(&json), "*") {
            error!("Failed to send message to page: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No page to talk to on native builds.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    fn new(code: i32, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn parse_error(message: &str) -> Self {
        Self::new(-32700, message)
    }

    pub fn invalid_request(message: &str) -> Self {
        Self::new(-32600, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            data: Some(serde_json::json!({ "method": method })),
            ..Self::new(-32601, "Method not found")
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(-32602, message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new(-32603, message)
    }
}

impl From<PlacementError> for RpcError {
    fn from(error: PlacementError) -> Self {
        let code = match error {
            PlacementError::InvalidSelection(_) | PlacementError::UnparsableInput { .. } => -32602,
            PlacementError::MissingHandle(_) | PlacementError::InvalidCatalog { .. } => -32603,
        };
        Self {
            data: Some(serde_json::json!({ "kind": error.kind() })),
            ..Self::new(code, &error.to_string())
        }
    }
}
