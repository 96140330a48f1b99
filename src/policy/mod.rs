mod auto;
mod cap;

pub use auto::{auto_request, candidate_amount, spend_headroom, AutoRequest};
pub use cap::{grant, monthly_reimbursed, remaining_cap, CapGrant};
