//! Financial Dashboard Client
//!
//! Headless client for a backend financial-aggregation API:
//! - Routes all backend communication through one gateway chokepoint
//! - Classifies failures into typed categories (auth-required with a login
//!   redirect, invalid session, HTTP error, transport error)
//! - Types the net-worth / summary wire shapes and their pure transforms
//! - Keeps an append-only chat transcript with error-to-text mapping
//! - Accepts an injected speech-capture capability for voice input
//!
//! Rendering (layout, charting, real browser speech APIs) is the embedding
//! front end's concern; everything here is testable without a UI.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod speech;

pub use error::{GatewayError, Result};

// Re-export common types
pub use config::GatewayConfig;
pub use dashboard::{DashboardLoader, LoadOutcome, LoginRedirect};
pub use gateway::BackendGateway;
pub use models::*;
pub use session::ChatSession;
pub use speech::{CaptureEvent, SpeechCapture, VoiceChat, VoiceState};
