//! Session-scoped conversational memory.

pub mod store;
