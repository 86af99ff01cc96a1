pub mod cash_flow;
pub mod credit_score;
pub mod investment;
pub mod loans;
