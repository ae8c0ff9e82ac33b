//! Outbound adapters implementing the driven ports.
//!
//! Only PostgreSQL persistence lives here. Adapters translate between domain
//! types and storage rows and contain no business rules.

pub mod persistence;
