//=========================================================================
// Frame Snapshots
//=========================================================================
//
// Immutable per-tick view of the game, handed to read-only consumers.
//
// Architecture:
// ```text
//   GameSession::tick() ──> FrameSnapshot ──┬─> FrameSink (renderer)
//                                           ├─> HudLog (HUD text via log)
//                                           └─> ChannelSink (other thread)
// ```
//
// Consumers never see the session itself, only the snapshot built after
// the tick finished mutating state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{Sender, TrySendError};
use glam::Vec3;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::config::Variant;
use super::pickup::{Pickup, PickupId};
use super::player::LightPose;

//=== PickupView ==========================================================

/// Pickup as seen by renderers: used pickups stay visible as husks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupView {
    pub id: PickupId,
    pub position: Vec3,
    pub used: bool,
}

impl From<&Pickup> for PickupView {
    fn from(pickup: &Pickup) -> Self {
        Self {
            id: pickup.id(),
            position: pickup.position(),
            used: pickup.is_used(),
        }
    }
}

//=== FrameSnapshot =======================================================

/// Complete game state after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub variant: Variant,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub battery: f32,
    pub flashlight_on: bool,
    pub light: LightPose,
    pub nearby_pickup: Option<PickupId>,
    pub pickups: Vec<PickupView>,
    pub pointer_locked: bool,
    /// Set after the first key or button press; gates ambient audio.
    pub has_interacted: bool,
}

impl FrameSnapshot {
    pub fn hud(&self) -> HudState {
        HudState {
            battery_percent: self.battery.round() as u8,
            flashlight_on: self.flashlight_on,
            pointer_locked: self.pointer_locked,
            collect_prompt: self.nearby_pickup.is_some(),
        }
    }
}

//=== HudState ============================================================

/// The subset of a snapshot the HUD displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    pub battery_percent: u8,
    pub flashlight_on: bool,
    pub pointer_locked: bool,
    pub collect_prompt: bool,
}

impl fmt::Display for HudState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Battery {}% | Flashlight {} | {}",
            self.battery_percent,
            if self.flashlight_on { "On" } else { "Off" },
            if self.pointer_locked {
                "Pointer locked, press Esc to release"
            } else {
                "Click the scene to lock pointer"
            }
        )?;
        if self.collect_prompt {
            write!(f, " | Press E to collect battery")?;
        }
        Ok(())
    }
}

//=== FrameSink ===========================================================

/// Read-only consumer of frame snapshots.
///
/// Runs on the logic thread; implementations must not block.
pub trait FrameSink: Send {
    fn publish(&mut self, snapshot: &FrameSnapshot);
}

impl<F> FrameSink for F
where
    F: FnMut(&FrameSnapshot) + Send,
{
    fn publish(&mut self, snapshot: &FrameSnapshot) {
        self(snapshot)
    }
}

//=== HudLog ==============================================================

/// Logs the HUD line whenever it changes.
#[derive(Debug, Default)]
pub struct HudLog {
    last: Option<HudState>,
}

impl HudLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for HudLog {
    fn publish(&mut self, snapshot: &FrameSnapshot) {
        let hud = snapshot.hud();
        if self.last != Some(hud) {
            info!(target: "game::hud", "{}", hud);
            self.last = Some(hud);
        }
    }
}

//=== ChannelSink =========================================================

/// Forwards snapshots to another thread without blocking.
///
/// A full channel drops the snapshot (the consumer only needs the latest).
/// A disconnected channel is reported once and then ignored.
pub struct ChannelSink {
    sender: Sender<FrameSnapshot>,
    dropped: u64,
    closed: bool,
}

impl ChannelSink {
    pub fn new(sender: Sender<FrameSnapshot>) -> Self {
        Self {
            sender,
            dropped: 0,
            closed: false,
        }
    }

    /// Snapshots dropped because the consumer fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSink for ChannelSink {
    fn publish(&mut self, snapshot: &FrameSnapshot) {
        if self.closed {
            return;
        }
        match self.sender.try_send(snapshot.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "game", "Snapshot consumer disconnected at tick {}", snapshot.tick);
                self.closed = true;
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};

    fn snapshot(tick: u64) -> FrameSnapshot {
        FrameSnapshot {
            tick,
            variant: Variant::Spatial,
            position: Vec3::new(0.0, 1.6, 8.0),
            yaw: 0.0,
            pitch: 0.0,
            battery: 99.6,
            flashlight_on: true,
            light: LightPose {
                position: Vec3::new(0.0, 1.6, 8.0),
                direction: Vec3::NEG_Z,
                intensity: 2.2,
                range: 12.0,
                angle: 0.45,
            },
            nearby_pickup: None,
            pickups: vec![],
            pointer_locked: false,
            has_interacted: false,
        }
    }

    //=====================================================================
    // HUD Tests
    //=====================================================================

    #[test]
    fn hud_rounds_battery_and_formats() {
        let hud = snapshot(0).hud();
        assert_eq!(hud.battery_percent, 100);
        assert_eq!(
            hud.to_string(),
            "Battery 100% | Flashlight On | Click the scene to lock pointer"
        );
    }

    #[test]
    fn hud_shows_collect_prompt_when_nearby() {
        let mut snap = snapshot(0);
        snap.nearby_pickup = Some(PickupId(1));
        snap.pointer_locked = true;
        snap.flashlight_on = false;

        let text = snap.hud().to_string();
        assert!(text.contains("Flashlight Off"));
        assert!(text.contains("press Esc to release"));
        assert!(text.ends_with("Press E to collect battery"));
    }

    #[test]
    fn hud_log_tracks_changes() {
        let mut sink = HudLog::new();
        sink.publish(&snapshot(0));
        assert_eq!(sink.last, Some(snapshot(0).hud()));

        let mut later = snapshot(1);
        later.battery = 50.0;
        sink.publish(&later);
        assert_eq!(sink.last.map(|h| h.battery_percent), Some(50));
    }

    //=====================================================================
    // ChannelSink Tests
    //=====================================================================

    #[test]
    fn channel_sink_forwards_snapshots() {
        let (tx, rx) = unbounded();
        let mut sink = ChannelSink::new(tx);

        sink.publish(&snapshot(1));
        sink.publish(&snapshot(2));

        assert_eq!(rx.try_recv().unwrap().tick, 1);
        assert_eq!(rx.try_recv().unwrap().tick, 2);
    }

    #[test]
    fn channel_sink_drops_when_full() {
        let (tx, rx) = bounded(1);
        let mut sink = ChannelSink::new(tx);

        sink.publish(&snapshot(1));
        sink.publish(&snapshot(2));

        assert_eq!(sink.dropped(), 1);
        assert_eq!(rx.try_recv().unwrap().tick, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_closes_on_disconnect() {
        let (tx, rx) = unbounded();
        let mut sink = ChannelSink::new(tx);
        drop(rx);

        sink.publish(&snapshot(1));
        assert!(sink.is_closed());
        sink.publish(&snapshot(2));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |s: &FrameSnapshot| seen.push(s.tick);
            sink.publish(&snapshot(7));
        }
        assert_eq!(seen, vec![7]);
    }
}
