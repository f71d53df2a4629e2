mod decision;
mod risk_engine;

pub use decision::{aggregate, Signals};
pub use risk_engine::RiskEngine;
