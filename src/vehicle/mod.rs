pub mod geometry;
pub mod mass;
pub mod stack;
pub mod stage;

pub use geometry::{Boattail, NoseShape, RocketGeometry, SurfaceRoughness};
pub use mass::RocketMass;
pub use stack::StageStack;
pub use stage::{IgnitionTrigger, SeparationTrigger, Stage};
