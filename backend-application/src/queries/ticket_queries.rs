use backend_domain::ports::ItemKey;
use backend_domain::{TicketAggregate, TicketId};

use crate::{AppError, AppState};

pub async fn get_ticket(state: &AppState, ticket_id: &TicketId) -> Result<TicketAggregate, AppError> {
    let item = state
        .store
        .get_item(
            &state.config.tables.ticket_log,
            &ItemKey::new("ticketId", ticket_id.0.clone()),
        )
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(serde_json::from_value(item)?)
}
