pub mod event;
pub mod order;
pub mod registration;
pub mod ticket;

pub use event::Event;
pub use order::EventTicketOrder;
pub use registration::EventRegistration;
pub use ticket::{Ticket, TicketType, TicketWithEvent};
