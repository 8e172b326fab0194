//! Accumulated mold risk: persisted state, the accumulator and the
//! classifier.

pub mod accumulator;
pub mod level;
pub mod state;

pub use accumulator::{RiskEngine, Step, Transition, hours_between, update};
pub use level::{RiskLevel, get_risk_level, get_risk_recommendations};
pub use state::{MoldRiskState, RiskPhase, StateRepresentation};
