use crate::engine::assets::bounds::SceneBounds;
use crate::engine::camera::camera_mode::CameraMode;
use crate::engine::core::app_state::AppState;
use crate::engine::gifts::registry::GiftRegistry;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

const JSONRPC_VERSION: &str = "2.0";

fn jsonrpc_version() -> String {
    JSONRPC_VERSION.to_string()
}

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure. Structured-clone replies from the host
/// may omit `jsonrpc`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    #[serde(default = "jsonrpc_version")]
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

/// Body of a response to one of our own requests.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcPayload {
    Json(serde_json::Value),
    /// Raw bytes posted as an `ArrayBuffer`/`Uint8Array` result.
    Binary(Vec<u8>),
}

/// Fired when the host answers a request sent with [`WebRpcInterface::send_request`].
#[derive(Event, Debug, Clone)]
pub struct RpcResponseReceived {
    pub id: u64,
    pub method: String,
    pub outcome: Result<RpcPayload, RpcError>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles request-response patterns in both directions and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
    outgoing_requests: Vec<RpcRequest>,
    next_request_id: u64,
    pending_requests: HashMap<u64, String>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue a request to the host. The answer arrives as [`RpcResponseReceived`] with the returned id.
    pub fn send_request(&mut self, method: &str, params: serde_json::Value) -> u64 {
        self.next_request_id += 1;
        let id = self.next_request_id;

        self.pending_requests.insert(id, method.to_string());
        self.outgoing_requests.push(RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(serde_json::json!(id)),
        });

        #[cfg(not(target_arch = "wasm32"))]
        warn!("RPC request '{}' queued without a host page; it will not be answered", method);

        id
    }

    /// Number of requests still waiting for an answer.
    pub fn pending_count(&self) -> usize {
        self.pending_requests.len()
    }

    fn is_pending(&self, id: u64) -> bool {
        self.pending_requests.contains_key(&id)
    }

    /// Remove a pending request, returning its method name if it was outstanding.
    fn resolve_pending(&mut self, id: u64) -> Option<String> {
        self.pending_requests.remove(&id)
    }

    /// Queue response for transmission to the host.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<RpcResponseReceived>()
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

/// Raw message as received from the host window.
#[derive(Debug, Clone)]
pub enum HostMessage {
    Text(String),
    Binary { id: u64, bytes: Vec<u8> },
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<HostMessage>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let data = event.data();
        let message = match data.as_string() {
            Some(text) => host_text(text),
            None => structured_message(binary_response(&data), || {
                js_sys::JSON::stringify(&data).ok().map(String::from)
            }),
        };

        if let Some(message) = message {
            if let Ok(mut queue) = queue_clone.lock() {
                queue.push(message);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available; RPC listener not installed");
        return;
    };

    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Queue RPC-shaped text; other page traffic is ignored. Malformed JSON-RPC
/// still gets through so it can be answered with a parse error.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn host_text(text: String) -> Option<HostMessage> {
    (text.contains("jsonrpc") || text.contains("\"id\"")).then_some(HostMessage::Text(text))
}

/// Structured-clone objects: a binary result is taken as raw bytes, anything
/// else (error replies, JSON byte arrays) goes down the text path serialized.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn structured_message(
    binary: Option<HostMessage>,
    serialized: impl FnOnce() -> Option<String>,
) -> Option<HostMessage> {
    binary.or_else(|| serialized().and_then(host_text))
}

/// Extract `{ id, result: ArrayBuffer | Uint8Array }` responses posted as structured objects.
#[cfg(target_arch = "wasm32")]
fn binary_response(data: &JsValue) -> Option<HostMessage> {
    let id = js_sys::Reflect::get(data, &JsValue::from_str("id"))
        .ok()?
        .as_f64()? as u64;
    let result = js_sys::Reflect::get(data, &JsValue::from_str("result")).ok()?;

    let bytes = if let Some(array) = result.dyn_ref::<js_sys::Uint8Array>() {
        array.to_vec()
    } else if result.is_instance_of::<js_sys::ArrayBuffer>() {
        js_sys::Uint8Array::new(&result).to_vec()
    } else {
        return None;
    };

    Some(HostMessage::Binary { id, bytes })
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<HostMessage>>>);

/// Event representing incoming RPC message from the host.
#[derive(Event)]
struct IncomingRpcMessage {
    content: HostMessage,
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

    for message in messages {
        message_events.write(IncomingRpcMessage { content: message });
    }
}

/// Classified text message from the host.
#[derive(Debug)]
enum ParsedMessage {
    Request(RpcRequest),
    Response(RpcResponse),
    /// Unusable message, answered with `error` under `id` (null when unknown).
    Invalid {
        id: serde_json::Value,
        error: RpcError,
    },
}

/// Requests carry a `method`; everything else with an `id` is a response.
fn parse_text_message(content: &str) -> ParsedMessage {
    let value: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            return ParsedMessage::Invalid {
                id: serde_json::Value::Null,
                error: RpcError::parse_error(&e.to_string()),
            };
        }
    };

    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
    let invalid = |message: String| ParsedMessage::Invalid {
        id: id.clone(),
        error: RpcError::invalid_request(&message),
    };

    if !value.is_object() {
        return invalid("message must be a JSON object".to_string());
    }

    if value.get("method").is_some() {
        match serde_json::from_value::<RpcRequest>(value) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => ParsedMessage::Request(request),
            Ok(request) => invalid(format!("unsupported jsonrpc version '{}'", request.jsonrpc)),
            Err(e) => invalid(e.to_string()),
        }
    } else if value.get("id").is_some() {
        match serde_json::from_value::<RpcResponse>(value) {
            Ok(response) => ParsedMessage::Response(response),
            Err(e) => invalid(e.to_string()),
        }
    } else {
        invalid("message has neither a method nor an id".to_string())
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    gifts: Option<Res<GiftRegistry>>,
    camera_mode: Option<Res<CameraMode>>,
    app_state: Option<Res<State<AppState>>>,
    bounds: Option<Res<SceneBounds>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut responses: EventWriter<RpcResponseReceived>,
) {
    for event in events.read() {
        match &event.content {
            HostMessage::Binary { id, bytes } => {
                route_response(
                    &mut rpc_interface,
                    &mut responses,
                    *id,
                    Ok(RpcPayload::Binary(bytes.clone())),
                );
            }
            HostMessage::Text(content) => match parse_text_message(content) {
                ParsedMessage::Request(request) => {
                    debug!("Processing RPC method: {}", request.method);
                    let status = GameStatus {
                        gifts: gifts.as_deref(),
                        camera_mode: camera_mode.as_deref().copied(),
                        app_state: app_state.as_deref().map(|s| *s.get()),
                        bounds: bounds.as_deref(),
                    };
                    if let Some(response) = handle_rpc_request(&request, &diagnostics, &status) {
                        rpc_interface.queue_response(response);
                    }
                }
                ParsedMessage::Response(response) => {
                    let Some(id) = response.id.as_ref().and_then(|id| id.as_u64()) else {
                        warn!("Dropping RPC response without numeric id");
                        continue;
                    };
                    let outcome = match (response.error, response.result) {
                        (Some(error), _) => Err(error),
                        (None, Some(result)) => Ok(RpcPayload::Json(result)),
                        (None, None) => Ok(RpcPayload::Json(serde_json::Value::Null)),
                    };
                    route_response(&mut rpc_interface, &mut responses, id, outcome);
                }
                ParsedMessage::Invalid { id, error } => {
                    warn!("Rejecting RPC message: {}", error);
                    // A garbled reply to one of our requests fails that request.
                    match id.as_u64().filter(|id| rpc_interface.is_pending(*id)) {
                        Some(id) => route_response(&mut rpc_interface, &mut responses, id, Err(error)),
                        None => rpc_interface.queue_response(error_response(id, error)),
                    }
                }
            },
        }
    }
}

fn route_response(
    rpc_interface: &mut WebRpcInterface,
    responses: &mut EventWriter<RpcResponseReceived>,
    id: u64,
    outcome: Result<RpcPayload, RpcError>,
) {
    match rpc_interface.resolve_pending(id) {
        Some(method) => {
            responses.write(RpcResponseReceived {
                id,
                method,
                outcome,
            });
        }
        None => warn!("Ignoring RPC response for unknown request id {}", id),
    }
}

/// Read-only game state exposed to `get_game_status`.
struct GameStatus<'a> {
    gifts: Option<&'a GiftRegistry>,
    camera_mode: Option<CameraMode>,
    app_state: Option<AppState>,
    bounds: Option<&'a SceneBounds>,
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    status: &GameStatus,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    if !matches!(
        request.params,
        serde_json::Value::Null | serde_json::Value::Object(_) | serde_json::Value::Array(_)
    ) {
        return Some(error_response(
            id,
            RpcError::invalid_params("params must be an object or an array"),
        ));
    }

    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(diagnostics),
        "get_game_status" => handle_get_game_status(status),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(error_response(id, RpcError::method_not_found(&request.method)));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(error_response(id, error)),
    }
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

fn handle_get_game_status(status: &GameStatus) -> Result<serde_json::Value, RpcError> {
    let state = status
        .app_state
        .ok_or_else(|| RpcError::internal_error("Application state not initialised"))?;

    let (remaining, total) = status
        .gifts
        .map_or((0, 0), |gifts| (gifts.remaining(), gifts.total()));

    Ok(serde_json::json!({
        "state": state.label(),
        "gifts_remaining": remaining,
        "gifts_total": total,
        "camera_mode": status.camera_mode.map(|mode| mode.label()),
        "bounds": status.bounds,
    }))
}

fn error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: jsonrpc_version(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

/// Send queued notifications, requests and responses to the host.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for request in rpc_interface.outgoing_requests.drain(..) {
        send_message_to_parent(&request);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
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
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn parse_error(message: &str) -> Self {
        Self {
            code: -32700,
            message: format!("Parse error: {}", message),
            data: None,
        }
    }

    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

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

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}
