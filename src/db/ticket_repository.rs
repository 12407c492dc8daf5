use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::error;

use crate::errors::AppError;
use crate::models::{Ticket, TicketCategory, TicketFilter, TicketPriority, TicketStatus};

#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Next value of the display-id sequence (`JIAI-xxxxx` numbering).
    pub async fn next_display_number(&self) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT nextval('ticket_display_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to advance ticket sequence: {e}");
                AppError::db_query("Failed to allocate ticket id", e)
            })?;
        Ok(n)
    }

    pub async fn save(&self, ticket: &Ticket) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tickets (id, ticket_id, title, description, category, priority, status, \
                                  created_by, deadline, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&ticket.id)
        .bind(&ticket.ticket_id)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.category.as_str())
        .bind(ticket.priority.as_str())
        .bind(ticket.status.as_str())
        .bind(&ticket.created_by)
        .bind(ticket.deadline)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save ticket {}: {e}", ticket.ticket_id);
            AppError::db_query("Failed to save ticket", e)
        })?;
        Ok(())
    }

    /// Newest-first ticket listing. `created_by` of `None` means no ownership
    /// scoping (IT staff see everything); each filter applies only when set.
    pub async fn search(
        &self,
        created_by: Option<&str>,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, AppError> {
        let rows = sqlx::query(
            "SELECT id, ticket_id, title, description, category, priority, status, \
                    created_by, deadline, created_at, updated_at
             FROM tickets
             WHERE ($1::text IS NULL OR created_by = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR priority = $3)
               AND ($4::text IS NULL OR category = $4)
               AND ($5::text IS NULL
                    OR ticket_id ILIKE '%' || $5 || '%'
                    OR title ILIKE '%' || $5 || '%'
                    OR description ILIKE '%' || $5 || '%')
             ORDER BY created_at DESC",
        )
        .bind(created_by)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.search.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to search tickets: {e}");
            AppError::db_query("Failed to search tickets", e)
        })?;

        rows.into_iter().map(Self::row_to_ticket).collect()
    }

    fn row_to_ticket(row: PgRow) -> Result<Ticket, AppError> {
        let get = |name: &str, e: sqlx::Error| AppError::db_query(format!("Failed to read {name}"), e);
        let category: String = row.try_get("category").map_err(|e| get("category", e))?;
        let priority: String = row.try_get("priority").map_err(|e| get("priority", e))?;
        let status: String = row.try_get("status").map_err(|e| get("status", e))?;
        Ok(Ticket {
            id: row.try_get("id").map_err(|e| get("id", e))?,
            ticket_id: row.try_get("ticket_id").map_err(|e| get("ticket_id", e))?,
            title: row.try_get("title").map_err(|e| get("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| get("description", e))?,
            category: TicketCategory::try_from(category)
                .map_err(|e| AppError::Unexpected(format!("Unknown ticket category: {e}")))?,
            priority: TicketPriority::try_from(priority)
                .map_err(|e| AppError::Unexpected(format!("Unknown ticket priority: {e}")))?,
            status: TicketStatus::try_from(status)
                .map_err(|e| AppError::Unexpected(format!("Unknown ticket status: {e}")))?,
            created_by: row.try_get("created_by").map_err(|e| get("created_by", e))?,
            deadline: row.try_get("deadline").map_err(|e| get("deadline", e))?,
            created_at: row.try_get("created_at").map_err(|e| get("created_at", e))?,
            updated_at: row.try_get("updated_at").map_err(|e| get("updated_at", e))?,
        })
    }
}
