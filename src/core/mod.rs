//=========================================================================
// Core Systems Orchestrator
//
// Runs the game on the logic (non-platform) thread at a fixed tick rate.
//
// Per tick:
// ```text
//   EventCollector::collect_frame()      platform batches, shutdown check
//        ↓
//   InputSystem::update(batches)         latched FrameInput
//        ↓
//   GameSession::tick(input, 1 / tps)    input → movement → drain → scan
//        ↓
//   FrameSink::publish(&snapshot)        every registered sink, in order
//        ↓
//   sleep for the rest of the tick
// ```
//
// Notes:
// The orchestrator owns every piece of mutable game state. The platform
// thread only ever talks to it through PlatformEvent messages, and sinks
// only ever see finished snapshots.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::game::{FrameSink, FrameSnapshot, GameConfig, GameSession};
use input::{ActionMapper, InputEvent, InputSystem};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== Module Declarations =================================================

pub mod input;
pub(crate) mod platform_bridge;

//=== CoreSystemsOrchestrator =============================================

/// Owns input, game session and sinks for the logic thread.
pub(crate) struct CoreSystemsOrchestrator {
    input: InputSystem,
    session: GameSession,
    sinks: Vec<Box<dyn FrameSink>>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Builds the session immediately; the logic thread is not started.
    pub(crate) fn new(
        config: GameConfig,
        mapper: ActionMapper,
        sinks: Vec<Box<dyn FrameSink>>,
    ) -> Self {
        Self {
            input: InputSystem::new(mapper),
            session: GameSession::new(config),
            sinks,
        }
    }

    //--- tick() -----------------------------------------------------------

    /// Runs one tick over this frame's input batches and publishes the result.
    pub(crate) fn tick(&mut self, batches: &[Vec<InputEvent>], dt: f32) -> FrameSnapshot {
        let input = self.input.update(batches);
        let snapshot = self.session.tick(&input, dt);

        for sink in &mut self.sinks {
            sink.publish(&snapshot);
        }
        snapshot
    }

    //--- spawn_core_thread() ----------------------------------------------

    /// Spawns the logic thread ticking at `tps` until the platform closes.
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run_loop(EventCollector::new(receiver), tps))
    }

    fn run_loop(mut self, mut collector: EventCollector, tps: f64) {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        info!(
            target: "core",
            "Core thread running (TPS: {}, sinks: {})",
            tps,
            self.sinks.len()
        );

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ---------------------------
            if collector.collect_frame() == TickControl::Exit {
                break;
            }

            //--- Step 2: Input, simulation, publication -------------------
            self.tick(collector.batches(), dt);

            //--- Step 3: Maintain fixed pacing ----------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            } else {
                debug!(
                    target: "core",
                    "Tick {} overran by {:?}",
                    self.session.tick_count(),
                    elapsed - frame_duration
                );
            }
        }

        info!(
            target: "core",
            "Core thread exiting after {} ticks (battery {:.1}%)",
            self.session.tick_count(),
            self.session.flashlight().battery()
        );
    }

    //--- Queries ----------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::game::ChannelSink;
    use crossbeam_channel::{bounded, unbounded};
    use std::sync::{Arc, Mutex};

    const DT: f32 = 1.0 / 60.0;

    fn orchestrator(sinks: Vec<Box<dyn FrameSink>>) -> CoreSystemsOrchestrator {
        CoreSystemsOrchestrator::new(GameConfig::spatial(), ActionMapper::with_defaults(), sinks)
    }

    //=====================================================================
    // Tick Tests
    //=====================================================================

    #[test]
    fn tick_applies_input_to_session() {
        let mut core = orchestrator(vec![]);

        let snap = core.tick(&[vec![InputEvent::KeyDown { key: KeyCode::KeyW }]], DT);
        assert!(snap.position.z < 8.0);
        assert!(snap.has_interacted);
        assert_eq!(snap.tick, 1);

        let held = core.tick(&[], DT);
        assert!(held.position.z < snap.position.z, "held key keeps moving");
    }

    #[test]
    fn toggle_key_flips_flashlight_once() {
        let mut core = orchestrator(vec![]);
        let press = vec![InputEvent::KeyDown { key: KeyCode::KeyF }];

        assert!(!core.tick(&[press.clone()], DT).flashlight_on);
        assert!(!core.tick(&[press], DT).flashlight_on, "repeat is not an edge");
        assert!(!core.session().flashlight().is_on());
    }

    #[test]
    fn sinks_see_every_snapshot_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = {
            let seen = Arc::clone(&seen);
            move |s: &FrameSnapshot| seen.lock().unwrap().push(s.tick)
        };
        let mut core = orchestrator(vec![Box::new(record)]);

        for _ in 0..3 {
            core.tick(&[], DT);
        }
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    //=====================================================================
    // Thread Tests
    //=====================================================================

    #[test]
    fn core_thread_ticks_and_exits_on_window_close() {
        let (snap_tx, snap_rx) = unbounded();
        let core = orchestrator(vec![Box::new(ChannelSink::new(snap_tx))]);

        let (tx, rx) = bounded(16);
        let handle = core.spawn_core_thread(rx, 240.0);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key: KeyCode::KeyW }],
            continuous: vec![],
        })
        .unwrap();

        // Idle ticks may publish before the key press lands.
        let moved = loop {
            let snap = snap_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("core thread should publish snapshots");
            if snap.position.z < 8.0 {
                break snap;
            }
        };
        assert!(moved.has_interacted);

        tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().expect("core thread should exit cleanly");
    }

    #[test]
    fn core_thread_exits_on_disconnect() {
        let core = orchestrator(vec![]);
        let (tx, rx) = bounded::<PlatformEvent>(4);
        let handle = core.spawn_core_thread(rx, 240.0);

        drop(tx);
        handle.join().expect("core thread should exit cleanly");
    }
}
