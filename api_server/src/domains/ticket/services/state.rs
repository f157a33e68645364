// Ticket domain state
use crate::domains::ticket::services::TicketService;
use crate::shared::database::Repositories;

#[derive(Clone)]
pub struct TicketState {
    pub ticket_service: TicketService,
}

impl TicketState {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            ticket_service: TicketService::new(repositories.tickets.clone()),
        }
    }
}
