//! Relay wire protocol
//!
//! Every frame on the wire is a JSON object with an `event` name and an
//! optional `data` payload. Unknown event names fail frame parsing and
//! are dropped by the read loop without closing the connection.

mod events;
mod frames;
mod payloads;

pub use events::EventKind;
pub use frames::{Frame, FrameError};
pub use payloads::{AckPayload, BindPayload, DeliveryStatus, ReceivePayload, RelayPayload};
