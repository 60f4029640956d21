//! API handlers for the LendFriend backend

pub mod connections;
pub mod credit_score;
pub mod loan_status;
pub mod underwriting;

pub use connections::{create_connection, delete_connection, list_connections};
pub use credit_score::{get_credit_score, post_credit_score};
pub use loan_status::evaluate_loan_status;
pub use underwriting::evaluate_underwriting;
