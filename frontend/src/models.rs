use serde::{Deserialize, Serialize};

/// A correspondent entry from `/api/chat-users/` (also the `/api/me/` shape).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatUser {
    pub id: String,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub department: Option<String>,
    pub is_it_staff: bool,
    pub dark_mode: bool,
}

/// One message as the server returns it. `is_sender` is computed server-side
/// relative to the session user; rendering trusts it and never infers sides.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub message: String,
    pub timestamp: String,
    pub is_read: bool,
    pub is_sender: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub ticket_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub deadline: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

// ── Response envelopes ────────────────────────────────────────────────────────
// Every AJAX endpoint answers `{ success, ... }`; failures put the reason in
// `error`. Payload fields default so both shapes deserialize into one struct.

#[derive(Clone, Debug, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatUsersResponse {
    pub success: bool,
    #[serde(default)]
    pub users: Vec<ChatUser>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<ChatUser>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DarkModeResponse {
    pub success: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TicketsResponse {
    pub success: bool,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TicketResponse {
    pub success: bool,
    #[serde(default)]
    pub ticket: Option<Ticket>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_read_response_preserves_server_order_and_sides() {
        let json = r#"{
            "success": true,
            "messages": [
                {"id": "1", "sender": "admin", "receiver": "jdoe", "message": "hello",
                 "timestamp": "2025-08-01T09:00:00Z", "is_read": true, "is_sender": false},
                {"id": "2", "sender": "jdoe", "receiver": "admin", "message": "hi there",
                 "timestamp": "2025-08-01T09:00:05Z", "is_read": true, "is_sender": true},
                {"id": "3", "sender": "admin", "receiver": "jdoe", "message": "how can I help?",
                 "timestamp": "2025-08-01T09:00:10Z", "is_read": false, "is_sender": false}
            ]
        }"#;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.messages.len(), 3);
        let ids: Vec<&str> = parsed.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        let sides: Vec<bool> = parsed.messages.iter().map(|m| m.is_sender).collect();
        assert_eq!(sides, [false, true, false]);
    }

    #[test]
    fn message_bodies_stay_plain_text() {
        // Bodies are rendered as text nodes, so whatever markup the server
        // relays must survive parsing byte-for-byte and display literally.
        let json = r#"{"success": true, "messages": [
            {"id": "1", "sender": "a", "receiver": "b",
             "message": "<script>alert(1)</script>",
             "timestamp": "2025-08-01T09:00:00Z", "is_read": false, "is_sender": true}
        ]}"#;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.messages[0].message, "<script>alert(1)</script>");
    }

    #[test]
    fn failure_envelope_deserializes_without_payload_fields() {
        let parsed: SendMessageResponse =
            serde_json::from_str(r#"{"success": false, "error": "Missing required fields"}"#)
                .unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("Missing required fields"));

        let read: MessagesResponse =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert!(!read.success);
        assert!(read.messages.is_empty());
    }
}
