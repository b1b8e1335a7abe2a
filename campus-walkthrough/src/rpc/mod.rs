//! JSON-RPC 2.0 bridge between the WebXR page and the engine.
//!
//! The page owns the XR session and forwards what the engine cannot read
//! itself from inside the canvas: session start and end, controller select
//! and connection changes, and the head pose. Messages travel over iframe
//! `postMessage`.
//!
//! ```text
//! XR page (parent window)  <──postMessage──>  Engine (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        ├─ Notification (no ID) ───────────────> │  dispatched, no reply
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Incoming Methods
//!
//! - `xr_session` `{ presenting: bool }`
//! - `controller_event` `{ index, event: "selectstart" | "selectend" | "connected" | "disconnected" }`
//! - `head_pose` `{ orientation: [x, y, z, w], position?: [x, y, z] }`, relative to the dolly
//! - `toggle_light`
//! - `get_board_state` returns `{ shown, name }`
//! - `get_fps` returns `{ fps }`
//!
//! ## Outgoing Notifications
//!
//! - `loading_progress`: per-asset progress, then `{ complete: true }`
//! - `board_changed`: `{ shown, name, info }` or `{ shown: null }`
//! - `light_toggled`: `{ on }`
//! - `fps_update`: `{ fps }`
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 message types, the postMessage listener and method dispatch.
pub mod web_rpc;
