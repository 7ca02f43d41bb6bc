pub mod body;
pub mod constants;
pub mod ground;
pub mod input;
pub mod interpolation;
pub mod layers;
pub mod locomotion;
pub mod look;
pub mod math;
pub mod movement;
pub mod physics;
pub mod scheduler;
pub mod settings;
pub mod slide;

pub use body::{BodyCommand, BodyHandle, Commands};
pub use ground::{GroundContact, GroundProbe, RayHit};
pub use input::{ButtonState, InputSnapshot, LookDelta};
pub use interpolation::SpeedLerp;
pub use layers::{Layer, LayerMask};
pub use locomotion::{Locomotion, LocomotionConfig};
pub use look::{LookAngles, Orientation};
pub use math::{Quat, Vec3};
pub use movement::{MovementController, MovementState};
pub use physics::{ColliderShapeDef, PhysicsError, PhysicsWorld, WorldStaticDef};
pub use scheduler::{DeferredAction, FixedStep, Scheduler};
pub use settings::{LocomotionSettings, LookSettings, SettingsError, SlideSettings};
pub use slide::{SlideController, SlideEnd};
