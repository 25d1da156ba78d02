//=========================================================================
// Dimlight Library Root
//
// A first-person exploration core: walk a dim level, keep a draining
// flashlight alive, collect batteries that recharge it.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose the gameplay state machine (`game`) for headless use and tests
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use dimlight::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread systems (input latching, orchestration).
// `game` holds the session, collision resolvers, battery and pickups; it
// can be driven without a window by calling `GameSession::tick` directly.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit window/event loop and is not public API.
// `engine` wires platform, logic thread and game together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
