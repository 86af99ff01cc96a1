pub mod roi;
pub mod valuation;
