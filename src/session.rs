//! Chat session over the backend gateway
//!
//! Holds the append-only message transcript and the client-generated
//! identifier correlating dashboard and chat requests. Nothing here is
//! persisted; the log lives for the session and grows monotonically.

use tracing::{info, warn};

use crate::error::GatewayError;
use crate::gateway::BackendGateway;
use crate::models::{ChatMessage, MessageSender};

/// Derive a stable UUID from an arbitrary seed string.
///
/// Lets callers correlate requests under a deterministic id when they carry
/// an external identifier that is not itself a UUID.
pub fn stable_uuid_from_seed(seed: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

/// One chat conversation with the financial agent.
///
/// `&mut self` on [`send`](Self::send) enforces a single outstanding send
/// at a time; messages append strictly in response order.
pub struct ChatSession {
    user_id: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// New session with a freshly generated user id.
    pub fn new() -> Self {
        Self::for_user(uuid::Uuid::new_v4().to_string())
    }

    /// New session correlated under an existing user id. Non-UUID ids are
    /// mapped to a stable UUID so the backend sees a consistent identity.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        let raw = user_id.into();
        let user_id = match uuid::Uuid::parse_str(&raw) {
            Ok(id) => id.to_string(),
            Err(_) => stable_uuid_from_seed(&raw).to_string(),
        };

        Self {
            user_id,
            messages: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Full transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Send one user message to the agent.
    ///
    /// The user line is appended immediately; exactly one further line is
    /// appended for the outcome: the agent's reply on success, or a system
    /// line carrying human-readable error text on failure. `AuthRequired`
    /// is deliberately surfaced as a login link in the transcript rather
    /// than a navigation action, since redirecting mid-conversation would
    /// be disruptive.
    pub async fn send(&mut self, gateway: &BackendGateway, text: &str) -> &ChatMessage {
        self.messages
            .push(ChatMessage::new(MessageSender::User, text));

        match gateway.send_chat(text, &self.user_id).await {
            Ok(reply) => {
                info!("Agent reply received");
                self.messages
                    .push(ChatMessage::new(MessageSender::Agent, reply.response));
            }
            Err(e) => {
                warn!("Chat send failed: {}", e);
                self.messages
                    .push(ChatMessage::new(MessageSender::System, error_to_chat_text(&e)));
            }
        }

        self.messages.last().expect("transcript cannot be empty after send")
    }

    /// Append a locally generated line (e.g. a voice-capture failure
    /// notice) without a backend round trip.
    pub fn append_local(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a classified gateway failure to the inline text shown in the chat.
pub fn error_to_chat_text(error: &GatewayError) -> String {
    match error {
        GatewayError::AuthRequired { login_url } => format!(
            "Please sign in with your financial data provider to continue: {}",
            login_url
        ),
        GatewayError::InvalidSession(message) => {
            format!("Your session is no longer valid: {}", message)
        }
        GatewayError::Http { message, .. } => message.clone(),
        GatewayError::Transport(_) => {
            "Could not reach the financial service. Please try again.".to_string()
        }
        GatewayError::MalformedResponse(_) => {
            "The financial service returned an unexpected response.".to_string()
        }
    }
}
