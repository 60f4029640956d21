//! Credit scoring and underwriting core
//!
//! Pure, stateless computations: revenue normalization, credit score
//! calculation, funding underwriting, and loan payment-status evaluation.
//! Callers are responsible for persistence and for sourcing the inputs.

pub mod engine;
pub mod loan_status;
pub mod normalizer;
pub mod underwriting;

pub use engine::{calculate_credit_score, CreditScoreResult, ScoreBreakdown};
pub use loan_status::{calculate_expected_repayment, calculate_loan_status, LoanStatusInfo, PaymentStatus};
pub use normalizer::{NormalizerRegistry, RevenueSource};
pub use underwriting::{evaluate_funding_request, RiskLevel, UnderwritingResult};
