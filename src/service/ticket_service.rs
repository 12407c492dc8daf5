use crate::db::ticket_repository::TicketRepository;
use crate::errors::AppError;
use crate::models::{CreateTicketRequest, Ticket, TicketFilter, User};

const MAX_TITLE_LENGTH: usize = 200;

#[derive(Clone)]
pub struct TicketService {
    ticket_repo: TicketRepository,
}

impl TicketService {
    pub fn new(ticket_repo: TicketRepository) -> Self {
        Self { ticket_repo }
    }

    pub async fn create(
        &self,
        current: &User,
        request: CreateTicketRequest,
    ) -> Result<Ticket, AppError> {
        validate_create(&request)?;

        let number = self.ticket_repo.next_display_number().await?;
        let ticket = Ticket::new(
            format_ticket_id(number),
            request.title.trim().to_string(),
            request.description.trim().to_string(),
            request.category,
            request.priority,
            current.id.clone(),
            request.deadline,
        );
        self.ticket_repo.save(&ticket).await?;
        Ok(ticket)
    }

    /// Newest-first listing. IT staff see every ticket, everyone else only
    /// their own (the dashboard scoping rule).
    pub async fn list(&self, current: &User, filter: &TicketFilter) -> Result<Vec<Ticket>, AppError> {
        let created_by = if current.is_it_staff {
            None
        } else {
            Some(current.id.as_str())
        };
        self.ticket_repo.search(created_by, filter).await
    }
}

fn validate_create(request: &CreateTicketRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::EmptyField {
            field_name: "title".to_string(),
        });
    }
    if request.description.trim().is_empty() {
        return Err(AppError::EmptyField {
            field_name: "description".to_string(),
        });
    }
    if request.title.len() > MAX_TITLE_LENGTH {
        return Err(AppError::FieldTooLong {
            field_name: "title".to_string(),
            max_length: MAX_TITLE_LENGTH,
            actual_length: request.title.len(),
        });
    }
    Ok(())
}

/// Display ids follow the original numbering scheme: `JIAI-00042`.
fn format_ticket_id(number: i64) -> String {
    format!("JIAI-{number:05}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TicketCategory, TicketPriority};

    fn request(title: &str, description: &str) -> CreateTicketRequest {
        CreateTicketRequest {
            title: title.to_string(),
            description: description.to_string(),
            category: TicketCategory::Other,
            priority: TicketPriority::Medium,
            deadline: None,
        }
    }

    #[test]
    fn display_id_is_zero_padded() {
        assert_eq!(format_ticket_id(1), "JIAI-00001");
        assert_eq!(format_ticket_id(42), "JIAI-00042");
        assert_eq!(format_ticket_id(123456), "JIAI-123456");
    }

    #[test]
    fn create_requires_title_and_description() {
        assert!(matches!(
            validate_create(&request("", "desc")),
            Err(AppError::EmptyField { .. })
        ));
        assert!(matches!(
            validate_create(&request("   ", "desc")),
            Err(AppError::EmptyField { .. })
        ));
        assert!(matches!(
            validate_create(&request("title", " \n")),
            Err(AppError::EmptyField { .. })
        ));
        assert!(validate_create(&request("title", "desc")).is_ok());
    }

    #[test]
    fn create_caps_title_length() {
        let long = "t".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(
            validate_create(&request(&long, "desc")),
            Err(AppError::FieldTooLong { .. })
        ));
    }
}
