//! Value Objects - Immutable, identity-less domain primitives

mod contact_number;
mod session_id;
mod whatsapp_id;

pub use contact_number::{CONTACT_SERVER, ContactAddress, ContactNumber};
pub use session_id::SessionId;
pub use whatsapp_id::WhatsAppId;
