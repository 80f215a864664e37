use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::DeviceReady;
use crate::tools::placement::events::{HotspotTapped, PlacementNoticeEvent};
use crate::tools::placement::lifecycle::LifecyclePhase;
use crate::tools::placement::session::{PlacementNotice, PlacementSession};
use crate::tools::session_reset::{ResetRequested, SecondaryViewEvent};

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

/// Resource managing bidirectional RPC communication between the overlay UI
/// and Bevy. Handles both request-response patterns and notification
/// broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the overlay without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the overlay.
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
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_placement_notices,
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
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the overlay.
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

/// Side effect a request asks the engine to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RpcAction {
    RequestReset,
    DeviceReady { proceed: bool },
    SecondaryView(SecondaryViewEvent),
}

/// What `get_phase` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PhaseSnapshot {
    phase: LifecyclePhase,
    rescan: bool,
    resetting: bool,
    cover_visible: bool,
}

impl PhaseSnapshot {
    fn of(session: &PlacementSession) -> Self {
        Self {
            phase: session.phase(),
            rescan: session.lifecycle().is_rescan(),
            resetting: session.coordinator().is_active(),
            cover_visible: session.cover().is_visible(),
        }
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    session: Option<Res<PlacementSession>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut resets: EventWriter<ResetRequested>,
    mut device: EventWriter<DeviceReady>,
    mut views: EventWriter<SecondaryViewEvent>,
) {
    let snapshot = session.as_deref().map(PhaseSnapshot::of);

    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
                continue;
            }
        };

        debug!("Processing RPC method: {}", request.method);
        let (result, action) = dispatch(&request, snapshot);

        match action {
            Some(RpcAction::RequestReset) => {
                resets.write(ResetRequested);
            }
            Some(RpcAction::DeviceReady { proceed }) => {
                device.write(DeviceReady { proceed });
            }
            Some(RpcAction::SecondaryView(view)) => {
                views.write(view);
            }
            None => {}
        }

        // Only requests with IDs get a response.
        if let Some(id) = request.id {
            rpc_interface.queue_response(create_response(id, result));
        }
    }
}

/// Map a request to its result and the action it triggers.
fn dispatch(
    request: &RpcRequest,
    snapshot: Option<PhaseSnapshot>,
) -> (Result<serde_json::Value, RpcError>, Option<RpcAction>) {
    match request.method.as_str() {
        "request_reset" => (
            Ok(serde_json::json!({ "accepted": true })),
            Some(RpcAction::RequestReset),
        ),
        "device_ready" => match handle_device_ready(&request.params) {
            Ok(proceed) => (
                Ok(serde_json::json!({ "proceed": proceed })),
                Some(RpcAction::DeviceReady { proceed }),
            ),
            Err(e) => (Err(e), None),
        },
        "secondary_view_opened" => (
            Ok(serde_json::json!({ "success": true })),
            Some(RpcAction::SecondaryView(SecondaryViewEvent::Opened)),
        ),
        "secondary_view_closed" => (
            Ok(serde_json::json!({ "success": true })),
            Some(RpcAction::SecondaryView(SecondaryViewEvent::Closed)),
        ),
        "get_phase" => (handle_get_phase(snapshot), None),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            (
                Err(RpcError::method_not_found(&request.method)),
                None,
            )
        }
    }
}

fn handle_device_ready(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(serde::Deserialize)]
    struct DeviceReadyParams {
        proceed: bool,
    }

    serde_json::from_value::<DeviceReadyParams>(params.clone())
        .map(|p| p.proceed)
        .map_err(|_| RpcError::invalid_params("Expected boolean 'proceed' parameter"))
}

fn handle_get_phase(snapshot: Option<PhaseSnapshot>) -> Result<serde_json::Value, RpcError> {
    let snapshot =
        snapshot.ok_or_else(|| RpcError::internal_error("Placement session not started"))?;

    Ok(serde_json::json!({
        "phase": snapshot.phase.as_str(),
        "rescan": snapshot.rescan,
        "resetting": snapshot.resetting,
        "cover_visible": snapshot.cover_visible,
    }))
}

/// Notification method and payload for a session notice, if it is public.
fn notice_to_notification(notice: PlacementNotice) -> Option<(&'static str, serde_json::Value)> {
    match notice {
        PlacementNotice::PhaseChanged { phase, rescan } => Some((
            "placement_phase_changed",
            serde_json::json!({ "phase": phase.as_str(), "rescan": rescan }),
        )),
        PlacementNotice::SurfaceStable => Some(("surface_stable", serde_json::json!({}))),
        PlacementNotice::CoverChanged { visible } => {
            Some(("cover_state", serde_json::json!({ "visible": visible })))
        }
        PlacementNotice::DisposeDecorations => None,
    }
}

fn forward_placement_notices(
    mut notices: EventReader<PlacementNoticeEvent>,
    mut tapped: EventReader<HotspotTapped>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for PlacementNoticeEvent(notice) in notices.read() {
        if let Some((method, params)) = notice_to_notification(*notice) {
            rpc_interface.send_notification(method, params);
        }
    }

    for HotspotTapped { id } in tapped.read() {
        rpc_interface.send_notification("hotspot_tapped", serde_json::json!({ "id": id }));
    }
}

fn create_response(
    id: serde_json::Value,
    result: Result<serde_json::Value, RpcError>,
) -> RpcResponse {
    match result {
        Ok(value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(value),
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

/// Send queued notifications and responses to the overlay.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (overlay UI).
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

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(serde_json::json!(1)),
        }
    }

    #[test]
    fn request_reset_dispatches_reset_action() {
        let (result, action) = dispatch(&request("request_reset", serde_json::Value::Null), None);

        assert!(result.is_ok());
        assert_eq!(action, Some(RpcAction::RequestReset));
    }

    #[test]
    fn device_ready_requires_proceed_flag() {
        let (result, action) =
            dispatch(&request("device_ready", serde_json::json!({ "proceed": false })), None);
        assert_eq!(result.unwrap()["proceed"], false);
        assert_eq!(action, Some(RpcAction::DeviceReady { proceed: false }));

        let (result, action) = dispatch(&request("device_ready", serde_json::json!({})), None);
        assert_eq!(result.unwrap_err().code, -32602);
        assert_eq!(action, None);
    }

    #[test]
    fn get_phase_reports_snapshot() {
        let snapshot = PhaseSnapshot {
            phase: LifecyclePhase::Scanning,
            rescan: true,
            resetting: true,
            cover_visible: true,
        };

        let (result, _) = dispatch(&request("get_phase", serde_json::Value::Null), Some(snapshot));
        let value = result.unwrap();

        assert_eq!(value["phase"], "scanning");
        assert_eq!(value["rescan"], true);
    }

    #[test]
    fn get_phase_before_session_is_an_internal_error() {
        let (result, _) = dispatch(&request("get_phase", serde_json::Value::Null), None);

        assert_eq!(result.unwrap_err().code, -32603);
    }

    #[test]
    fn unknown_method_is_not_found() {
        let (result, action) = dispatch(&request("tool_selection", serde_json::Value::Null), None);

        assert_eq!(result.unwrap_err().code, -32601);
        assert_eq!(action, None);
    }

    #[test]
    fn params_may_be_omitted() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"request_reset"}"#).unwrap();

        assert!(parsed.id.is_none());
        assert_eq!(dispatch(&parsed, None).1, Some(RpcAction::RequestReset));
    }

    #[test]
    fn notices_map_to_notifications() {
        let (method, params) = notice_to_notification(PlacementNotice::PhaseChanged {
            phase: LifecyclePhase::Placed,
            rescan: true,
        })
        .unwrap();
        assert_eq!(method, "placement_phase_changed");
        assert_eq!(params, serde_json::json!({ "phase": "placed", "rescan": true }));

        let (method, params) =
            notice_to_notification(PlacementNotice::CoverChanged { visible: false }).unwrap();
        assert_eq!(method, "cover_state");
        assert_eq!(params["visible"], false);

        assert!(notice_to_notification(PlacementNotice::DisposeDecorations).is_none());
    }
}
