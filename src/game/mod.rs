//=========================================================================
// Game
//=========================================================================
//
// Gameplay state for the flashlight exploration loop.
//
// Architecture:
// ```text
//   FrameInput ──> GameSession::tick(dt)
//                    ├─ PlayerController ──> dyn MovementResolver
//                    │                        ├─ CapsuleResolver (spatial)
//                    │                        └─ PlanarResolver  (planar)
//                    ├─ Flashlight (battery drain / toggle / recharge)
//                    └─ PickupField (proximity scan / collect)
//                  ──> FrameSnapshot ──> FrameSink*
// ```
//
// Everything here is single-threaded and owned by the logic thread; the
// session is the only writer and sinks only ever see snapshots.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collision;
pub mod config;
pub mod flashlight;
pub mod level;
pub mod pickup;
pub mod planar;
pub mod player;
pub mod session;
pub mod snapshot;

//=== Public API ==========================================================

pub use collision::{Capsule, CapsuleResolver, MovementResolver};
pub use config::{GameConfig, LightProfile, Variant};
pub use flashlight::Flashlight;
pub use level::{Collider, Level, PickupSpawn, WorldBounds};
pub use pickup::{Pickup, PickupField, PickupId};
pub use planar::PlanarResolver;
pub use player::{LightPose, PlayerController};
pub use session::GameSession;
pub use snapshot::{ChannelSink, FrameSink, FrameSnapshot, HudLog, HudState, PickupView};
