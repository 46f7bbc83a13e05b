pub mod decision;

pub use decision::{DecisionLoop, LoopMetrics, LoopStep};
