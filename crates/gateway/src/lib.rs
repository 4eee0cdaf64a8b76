//! VWAP Gateway
//!
//! Gateway layer between the scheduling core and the outside world. Provides:
//! - The update-notification message ([`Update`]) the execution driver consumes
//! - Transport abstraction (tokio channels, with traits for future transports)
//! - Simulator adapters for the bar series and the target-position primitive
//!
//! ## Architecture
//!
//! ```text
//! Market data / account (live or simulated)
//!         │
//!    ┌────▼────┐
//!    │ Gateway │   bars + position changes
//!    └────┬────┘
//!         │ Update stream (single ordered channel)
//!    ┌────▼────┐
//!    │ Driver  │ ── set_target_volume ──► TargetPosition
//!    └─────────┘
//! ```
//!
//! ## Transport
//!
//! Uses a bounded tokio mpsc channel: updates are delivered in order and never
//! dropped (a lagging consumer applies back-pressure instead). The
//! `Publisher`/`Subscriber` traits allow plugging in other transports.

pub mod adapters;
pub mod error;
pub mod messages;
pub mod transport;

// Re-export commonly used types
pub use error::{GatewayError, TransportError};
pub use messages::update::Update;
pub use transport::{
    Publisher, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
};
