//! Multi-stage definition: geometry + motor + ignition/separation triggers
//! (§3 `Stage`, §4.7 "Multi-stage triggers").

use crate::motor::Motor;
use crate::vehicle::geometry::RocketGeometry;
use crate::vehicle::mass::RocketMass;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IgnitionTrigger {
    Liftoff,
    Separation,
    Delay(f64),
    Altitude(f64),
    Apogee,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeparationTrigger {
    Burnout { delay: f64 },
    Timer(f64),
    Altitude(f64),
    Velocity(f64),
    Command,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub geometry: RocketGeometry,
    pub mass: RocketMass,
    pub motor: Motor,
    pub ignition_trigger: IgnitionTrigger,
    pub separation_trigger: SeparationTrigger,
    /// Distance from the base of the full stack to this stage's nose tip, m.
    pub stack_position: f64,

    #[serde(default)]
    pub ignited: bool,
    #[serde(default)]
    pub burned_out: bool,
    #[serde(default)]
    pub separated: bool,
    #[serde(default)]
    pub ignition_time: Option<f64>,
    #[serde(default)]
    pub separation_time: Option<f64>,
}

impl Stage {
    pub fn new(
        name: impl Into<String>,
        geometry: RocketGeometry,
        mass: RocketMass,
        motor: Motor,
        ignition_trigger: IgnitionTrigger,
        separation_trigger: SeparationTrigger,
        stack_position: f64,
    ) -> Self {
        Self {
            name: name.into(),
            geometry,
            mass,
            motor,
            ignition_trigger,
            separation_trigger,
            stack_position,
            ignited: false,
            burned_out: false,
            separated: false,
            ignition_time: None,
            separation_time: None,
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.dry_mass + self.motor.loaded_mass()
    }

    pub fn dry_mass(&self) -> f64 {
        self.mass.dry_mass + self.motor.dry_mass
    }
}
