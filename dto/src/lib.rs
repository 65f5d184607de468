pub mod client;
pub mod client_status;
pub mod dates;
pub mod error;
pub mod mapping;
pub mod measurement;
pub mod membership_status;
pub mod membership_term;
pub mod page;
pub mod payment;
