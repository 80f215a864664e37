//! JSON-RPC 2.0 communication layer for the AR overlay UI.
//!
//! Implements bidirectional messaging between the Bevy engine and the overlay UI via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Overlay (Parent Window) <──postMessage──> Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Add a method case in `dispatch()` returning the JSON result and, if the
//! request changes engine state, an `RpcAction`. `handle_rpc_messages()`
//! turns actions into ECS events so the placement systems stay the only
//! writers of the session:
//!
//! ```rust,ignore
//! "your_method_name" => (
//!     Ok(serde_json::json!({ "success": true })),
//!     Some(RpcAction::YourAction),
//! ),
//! ```
//!
//! Requests without an `id` are performed but get no response.
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the overlay:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", serde_json::json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! - `request_reset`: start a full session reset (ignored while one runs)
//! - `device_ready { proceed }`: device/permission verdict gating the session
//! - `secondary_view_opened`: suppress gestures while a panorama is shown
//! - `secondary_view_closed`: reset the session after the panorama closes
//! - `get_phase`: current phase, rescan flag, reset and cover state
//!
//! ## Notifications
//!
//! - `placement_phase_changed { phase, rescan }`
//! - `surface_stable`
//! - `cover_state { visible }`
//! - `hotspot_tapped { id }`

/// JSON-RPC 2.0 bidirectional communication system for the overlay UI.
///
/// Handles request-response patterns, notifications and WASM message listeners.
pub mod web_rpc;
