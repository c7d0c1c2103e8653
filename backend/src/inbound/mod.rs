//! Inbound adapters that translate external requests into domain port calls.
//!
//! Only HTTP is exposed today; framework types stay inside [`http`].

pub mod http;
