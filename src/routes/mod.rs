//! Route definitions for the LendFriend API

mod connections;
mod credit_score;
mod loan_status;
mod underwriting;

pub use connections::connection_routes;
pub use credit_score::credit_score_routes;
pub use loan_status::loan_status_routes;
pub use underwriting::underwriting_routes;
