//! Services for business logic

pub mod connections;

pub use connections::ConnectionStore;
