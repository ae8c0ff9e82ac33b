//! Inbound adapters translating HTTP requests into domain port calls.
//!
//! Framework types stay here; handlers only see the driving ports held in
//! [`http::state::HttpState`].

pub mod http;
