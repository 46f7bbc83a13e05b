pub mod features;
pub mod goal;

pub use features::{FeatureVectorBuilder, Observation, OBS_LEN};
pub use goal::GoalMemory;
