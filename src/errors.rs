use thiserror::Error;

/// Top-level application error. All variants carry a human-readable message;
/// the AJAX endpoints relay it verbatim in their `error` field.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Database errors ──────────────────────────────────────────────────────
    #[error("Database query failed: {message}")]
    DatabaseQueryFailed {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{entity_type} with id '{id}' not found")]
    RecordNotFound { entity_type: String, id: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Missing required fields")]
    MissingFields,

    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong {
        field_name: String,
        max_length: usize,
        actual_length: usize,
    },

    // ── Authentication errors ────────────────────────────────────────────────
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn db_query(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::DatabaseQueryFailed {
            message: message.into(),
            source,
        }
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        AppError::RecordNotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::RecordNotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingFields | AppError::EmptyField { .. } | AppError::FieldTooLong { .. }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized | AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_matches_wire_contract() {
        assert_eq!(
            AppError::MissingFields.to_string(),
            "Missing required fields"
        );
    }

    #[test]
    fn classification_helpers() {
        assert!(AppError::MissingFields.is_validation());
        assert!(AppError::not_found("User", "42").is_not_found());
        assert!(AppError::Unauthorized.is_unauthorized());
        assert!(!AppError::Unexpected("boom".into()).is_validation());
    }
}
