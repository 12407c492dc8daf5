use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Users ─────────────────────────────────────────────────────────────────────

/// Full user row, including credential columns. Never serialized directly;
/// the wire shape is [`UserView`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub full_name: String,
    pub department: Option<String>,
    pub is_it_staff: bool,
    pub dark_mode: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub department: Option<String>,
    pub is_it_staff: bool,
    pub dark_mode: bool,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            department: u.department.clone(),
            is_it_staff: u.is_it_staff,
            dark_mode: u.dark_mode,
        }
    }
}

// ── Sessions ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl ChatMessage {
    pub fn new(sender_id: String, receiver_id: String, message: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id,
            receiver_id,
            message,
            timestamp: Utc::now(),
            is_read: false,
        }
    }
}

/// A conversation row joined with both usernames, as read back from the store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_username: String,
    pub receiver_username: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// Wire shape of a single message. `is_sender` is computed relative to the
/// requesting user; clients render from it and never infer it themselves.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub is_sender: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Option<String>,
    pub message: Option<String>,
}

// ── Tickets ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Hardware,
    Software,
    Network,
    Access,
    Other,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Hardware => "hardware",
            TicketCategory::Software => "software",
            TicketCategory::Network => "network",
            TicketCategory::Access => "access",
            TicketCategory::Other => "other",
        }
    }
}

impl TryFrom<String> for TicketCategory {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "hardware" => Ok(TicketCategory::Hardware),
            "software" => Ok(TicketCategory::Software),
            "network" => Ok(TicketCategory::Network),
            "access" => Ok(TicketCategory::Access),
            "other" => Ok(TicketCategory::Other),
            other => Err(format!("Unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }
}

impl TryFrom<String> for TicketPriority {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            other => Err(format!("Unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Escalated,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Escalated => "escalated",
        }
    }
}

impl TryFrom<String> for TicketStatus {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            "escalated" => Ok(TicketStatus::Escalated),
            other => Err(format!("Unknown status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: String,
    pub ticket_id: String,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_by: String,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(
        ticket_id: String,
        title: String,
        description: String,
        category: TicketCategory,
        priority: TicketPriority,
        created_by: String,
        deadline: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ticket_id,
            title,
            description,
            category,
            priority,
            status: TicketStatus::Open,
            created_by,
            deadline,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct TicketFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub category: Option<TicketCategory>,
}

// ── Auth ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ── Response envelopes ────────────────────────────────────────────────────────
// The AJAX endpoints always answer with a `success` flag; failures carry a
// human-readable `error` string alongside it.

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct ChatUsersResponse {
    pub success: bool,
    pub users: Vec<UserView>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: MessagePayload,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<MessagePayload>,
}

#[derive(Debug, Serialize)]
pub struct DarkModeResponse {
    pub success: bool,
    pub dark_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct TicketsResponse {
    pub success: bool,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub success: bool,
    pub ticket: Ticket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_status_round_trips_through_snake_case() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(
            TicketStatus::try_from("in_progress".to_string()).unwrap(),
            TicketStatus::InProgress
        );
        assert!(TicketStatus::try_from("bogus".to_string()).is_err());
    }

    #[test]
    fn message_payload_carries_the_sender_flag() {
        let payload = MessagePayload {
            id: "m1".into(),
            sender: "alice".into(),
            receiver: "bob".into(),
            message: "hello".into(),
            timestamp: Utc::now(),
            is_read: false,
            is_sender: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["is_sender"], serde_json::json!(true));
        assert_eq!(json["sender"], serde_json::json!("alice"));
    }

    #[test]
    fn error_envelope_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Missing required fields")).unwrap();
        assert_eq!(json["success"], serde_json::json!(false));
        assert_eq!(json["error"], serde_json::json!("Missing required fields"));
    }
}
