use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::assets::anchor_registry::AnchorRegistry;
use crate::engine::core::session::WalkthroughSession;
use crate::engine::input::controllers::ControllerEvent;
use crate::engine::input::head_pose::HeadPoseEvent;
use crate::engine::scene::lighting::ToggleLightEvent;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::engine::systems::presentation::XrSessionEvent;
use crate::error::WalkthroughError;

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

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC layer between the XR page and the engine.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register XR bridge listener: {:?}", e);
            }
        }
        None => error!("Window object not available, XR bridge disabled"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
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

/// A decoded bridge call.
#[derive(Debug, Clone, PartialEq)]
enum BridgeCommand {
    XrSession(XrSessionEvent),
    Controller(ControllerEvent),
    HeadPose(HeadPoseEvent),
    ToggleLight,
    GetBoardState,
    GetFps,
}

/// Engine state the bridge answers queries from.
#[derive(SystemParam)]
struct BridgeState<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    session: Res<'w, WalkthroughSession>,
    registry: Res<'w, AnchorRegistry>,
}

/// Engine events the bridge can raise.
#[derive(SystemParam)]
struct BridgeEvents<'w> {
    sessions: EventWriter<'w, XrSessionEvent>,
    controllers: EventWriter<'w, ControllerEvent>,
    head_poses: EventWriter<'w, HeadPoseEvent>,
    lights: EventWriter<'w, ToggleLightEvent>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    state: BridgeState,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut bridge_events: BridgeEvents,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let result = parse_bridge_command(&request.method, &request.params).map(|command| {
                    execute_bridge_command(command, &state, &mut bridge_events)
                });

                match request.id {
                    Some(id) => rpc_interface.queue_response(create_response(id, result)),
                    None => {
                        if let Err(error) = result {
                            warn!("Dropped XR bridge call '{}': {}", request.method, error.message);
                        }
                    }
                }
            }
            Err(parse_error) => {
                warn!("Malformed XR bridge message: {}", parse_error);
            }
        }
    }
}

fn bridge_params<T: DeserializeOwned>(
    method: &str,
    params: &serde_json::Value,
) -> Result<T, WalkthroughError> {
    serde_json::from_value(params.clone())
        .map_err(|e| WalkthroughError::InvalidBridgeParams(format!("{method}: {e}")))
}

fn parse_head_pose(params: &serde_json::Value) -> Result<HeadPoseEvent, WalkthroughError> {
    #[derive(Deserialize)]
    struct HeadPoseParams {
        orientation: [f32; 4],
        position: Option<[f32; 3]>,
    }

    let pose = bridge_params::<HeadPoseParams>("head_pose", params)?;
    let orientation = Quat::from_array(pose.orientation);
    if !orientation.is_finite() || orientation.length_squared() < f32::EPSILON {
        return Err(WalkthroughError::InvalidBridgeParams(
            "head_pose: orientation is not a rotation".to_string(),
        ));
    }

    Ok(HeadPoseEvent {
        orientation: orientation.normalize(),
        position: pose.position.map(Vec3::from_array),
    })
}

/// Map a method name and its params to a bridge command.
fn parse_bridge_command(
    method: &str,
    params: &serde_json::Value,
) -> Result<BridgeCommand, RpcError> {
    let command = match method {
        "xr_session" => bridge_params(method, params).map(BridgeCommand::XrSession),
        "controller_event" => bridge_params(method, params).map(BridgeCommand::Controller),
        "head_pose" => parse_head_pose(params).map(BridgeCommand::HeadPose),
        "toggle_light" => Ok(BridgeCommand::ToggleLight),
        "get_board_state" => Ok(BridgeCommand::GetBoardState),
        "get_fps" => Ok(BridgeCommand::GetFps),
        _ => return Err(RpcError::method_not_found(method)),
    };

    command.map_err(|e| RpcError::invalid_params(&e.to_string()))
}

fn execute_bridge_command(
    command: BridgeCommand,
    state: &BridgeState,
    bridge_events: &mut BridgeEvents,
) -> serde_json::Value {
    match command {
        BridgeCommand::XrSession(event) => {
            info!("XR session presenting: {}", event.presenting);
            bridge_events.sessions.write(event);
            serde_json::json!({ "success": true })
        }
        BridgeCommand::Controller(event) => {
            bridge_events.controllers.write(event);
            serde_json::json!({ "success": true })
        }
        BridgeCommand::HeadPose(event) => {
            bridge_events.head_poses.write(event);
            serde_json::json!({ "success": true })
        }
        BridgeCommand::ToggleLight => {
            bridge_events.lights.write(ToggleLightEvent);
            serde_json::json!({ "success": true })
        }
        BridgeCommand::GetBoardState => {
            let shown = state.session.board.currently_shown();
            let name = shown
                .and_then(|key| state.registry.get(key))
                .map(|anchor| anchor.name.as_str());
            serde_json::json!({ "shown": shown, "name": name })
        }
        BridgeCommand::GetFps => {
            serde_json::json!({ "fps": smoothed_fps(&state.diagnostics).unwrap_or(0.0) as f32 })
        }
    }
}

fn create_response(
    id: serde_json::Value,
    result: Result<serde_json::Value, RpcError>,
) -> RpcResponse {
    match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    }
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
