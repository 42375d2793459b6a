//! JSON-RPC 2.0 bridge between the game and the page hosting it.
//!
//! The game runs in an iframe and talks to its parent window via `postMessage`.
//! Traffic flows both ways:
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Sleigh Run (iframe)
//!        │                                            │
//!        │ <──────────── Request getGltf (with ID) ───┤
//!        ├─ Response (GLB bytes, same ID) ──────────> │
//!        │                                            │
//!        ├─ Request get_game_status (with ID) ──────> │
//!        │ <────────────────── Response (with ID) ────┤
//!        │                                            │
//!        │ <────────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Outgoing requests
//!
//! `WebRpcInterface::send_request()` returns the request id. The matching response
//! is delivered as an `RpcResponseReceived` event. A result posted as an
//! `ArrayBuffer` or `Uint8Array` arrives as `RpcPayload::Binary`; anything else as JSON.
//!
//! ## Served methods
//!
//! - `get_fps`: current smoothed frame rate
//! - `get_game_status`: load state, gifts remaining and total, camera mode, city bounds
//!
//! Unknown methods answer `-32601`. Unparseable text answers `-32700`, malformed
//! messages `-32600` and scalar params `-32602`.
//!
//! ## Notifications sent
//!
//! - `loading_progress`: `{ stage }` as each loading step completes
//! - `scene_ready`: the city is composed and playable
//! - `scene_load_failed`: `{ message }`
//! - `gift_collected`: `{ index, remaining, total }`
//! - `fps_update`: `{ fps }`, every half second

/// JSON-RPC 2.0 messages, the outgoing queue and the wasm message listener.
pub mod web_rpc;
