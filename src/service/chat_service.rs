use crate::db::message_repository::MessageRepository;
use crate::db::user_repository::UserRepository;
use crate::errors::AppError;
use crate::models::{ChatMessage, ConversationMessage, MessagePayload, SendMessageRequest, User, UserView};

const MAX_MESSAGE_LENGTH: usize = 8000;

#[derive(Clone)]
pub struct ChatService {
    user_repo: UserRepository,
    message_repo: MessageRepository,
}

impl ChatService {
    pub fn new(user_repo: UserRepository, message_repo: MessageRepository) -> Self {
        Self {
            user_repo,
            message_repo,
        }
    }

    /// Users the caller may message, for the correspondent picker.
    pub async fn chat_partners(&self, current: &User) -> Result<Vec<UserView>, AppError> {
        let partners = self.user_repo.chat_partners(current).await?;
        Ok(partners.iter().map(UserView::from).collect())
    }

    pub async fn send_message(
        &self,
        current: &User,
        request: SendMessageRequest,
    ) -> Result<MessagePayload, AppError> {
        let (receiver_id, text) = validate_send(&request)?;

        let receiver = self
            .user_repo
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", receiver_id))?;

        let message = ChatMessage::new(current.id.clone(), receiver.id.clone(), text.to_string());
        self.message_repo.save(&message).await?;

        Ok(MessagePayload {
            id: message.id,
            sender: current.username.clone(),
            receiver: receiver.username,
            message: message.message,
            timestamp: message.timestamp,
            is_read: message.is_read,
            is_sender: true,
        })
    }

    /// The full conversation with `other_id`, oldest first. Messages the
    /// caller received in it are marked read as a side effect, so the rows
    /// returned already reflect the new read state.
    pub async fn conversation_with(
        &self,
        current: &User,
        other_id: &str,
    ) -> Result<Vec<MessagePayload>, AppError> {
        let other = self
            .user_repo
            .find_by_id(other_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", other_id))?;

        self.message_repo.mark_read(&current.id, &other.id).await?;
        let rows = self
            .message_repo
            .conversation_between(&current.id, &other.id)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| to_payload(row, &current.id))
            .collect())
    }

    pub async fn toggle_dark_mode(&self, current: &User) -> Result<bool, AppError> {
        self.user_repo.toggle_dark_mode(&current.id).await
    }
}

/// Checks the send request the way the original endpoint did: both fields
/// present and non-empty, with a length cap on the body.
fn validate_send(request: &SendMessageRequest) -> Result<(&str, &str), AppError> {
    let receiver_id = request.receiver_id.as_deref().unwrap_or_default();
    let text = request.message.as_deref().unwrap_or_default();
    if receiver_id.is_empty() || text.is_empty() {
        return Err(AppError::MissingFields);
    }
    if text.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::FieldTooLong {
            field_name: "message".to_string(),
            max_length: MAX_MESSAGE_LENGTH,
            actual_length: text.len(),
        });
    }
    Ok((receiver_id, text))
}

/// Flattens a stored conversation row into the wire shape. `is_sender` is
/// relative to the requesting user, never inferred by clients.
fn to_payload(row: ConversationMessage, current_user_id: &str) -> MessagePayload {
    MessagePayload {
        is_sender: row.sender_id == current_user_id,
        id: row.id,
        sender: row.sender_username,
        receiver: row.receiver_username,
        message: row.message,
        timestamp: row.timestamp,
        is_read: row.is_read,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(receiver_id: Option<&str>, message: Option<&str>) -> SendMessageRequest {
        SendMessageRequest {
            receiver_id: receiver_id.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn validate_send_rejects_missing_or_empty_fields() {
        for req in [
            request(None, Some("hi")),
            request(Some("u1"), None),
            request(Some(""), Some("hi")),
            request(Some("u1"), Some("")),
        ] {
            assert!(matches!(validate_send(&req), Err(AppError::MissingFields)));
        }
    }

    #[test]
    fn validate_send_caps_message_length() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        let req = request(Some("u1"), Some(&long));
        assert!(matches!(
            validate_send(&req),
            Err(AppError::FieldTooLong { .. })
        ));
    }

    #[test]
    fn validate_send_accepts_well_formed_requests() {
        let req = request(Some("u1"), Some("hello"));
        let (receiver, text) = validate_send(&req).unwrap();
        assert_eq!(receiver, "u1");
        assert_eq!(text, "hello");
    }

    fn row(sender_id: &str) -> ConversationMessage {
        ConversationMessage {
            id: "m1".into(),
            sender_id: sender_id.into(),
            receiver_id: "other".into(),
            sender_username: "alice".into(),
            receiver_username: "bob".into(),
            message: "hello".into(),
            timestamp: Utc::now(),
            is_read: false,
        }
    }

    #[test]
    fn payload_sender_flag_is_relative_to_the_requester() {
        assert!(to_payload(row("me"), "me").is_sender);
        assert!(!to_payload(row("someone-else"), "me").is_sender);
    }
}
