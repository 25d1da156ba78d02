//=========================================================================
// Dimlight Engine
//
// Main entry point: wires the window, the logic thread and the game.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns logic thread
//         ├─ with_channel_capacity()    runs platform
//         ├─ with_config()              blocks until exit
//         ├─ with_bindings()
//         └─ with_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::input::ActionMapper;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::game::{FrameSink, GameConfig, HudLog};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Game**: [`GameConfig::spatial`]
/// - **Bindings**: [`ActionMapper::with_defaults`]
/// - **HUD log**: enabled
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use dimlight::EngineBuilder;
///
/// EngineBuilder::new().build().run();
/// ```
///
/// Top-down variant with a custom sink:
/// ```no_run
/// use dimlight::EngineBuilder;
/// use dimlight::game::{FrameSnapshot, GameConfig};
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_config(GameConfig::planar())
///     .with_sink(|snapshot: &FrameSnapshot| {
///         if snapshot.battery <= 0.0 {
///             println!("lights out at tick {}", snapshot.tick);
///         }
///     })
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: GameConfig,
    bindings: ActionMapper,
    sinks: Vec<Box<dyn FrameSink>>,
    hud_log: bool,
    title: String,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: GameConfig::default(),
            bindings: ActionMapper::with_defaults(),
            sinks: Vec::new(),
            hud_log: true,
            title: String::from("Dimlight"),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Every tick advances the game by exactly `1 / tps` seconds.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Selects the game variant and its tunables.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default key bindings.
    pub fn with_bindings(mut self, bindings: ActionMapper) -> Self {
        self.bindings = bindings;
        self
    }

    /// Registers a snapshot consumer. Sinks run in registration order.
    pub fn with_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Enables or disables logging HUD changes.
    pub fn with_hud_log(mut self, enabled: bool) -> Self {
        self.hud_log = enabled;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builds the engine; the game session is created here.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, variant: {:?})",
            self.tps,
            self.channel_capacity,
            self.config.variant()
        );

        let mut sinks = self.sinks;
        if self.hud_log {
            sinks.insert(0, Box::new(HudLog::new()));
        }

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.config, self.bindings, sinks),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            title: self.title,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Dimlight runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem → GameSession → FrameSinks
///   │
///   └─► Platform (Event Loop)
///         └─► Window, pointer lock, input batching
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    title: String,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` is sent, the logic thread exits
    ///    and is joined
    ///
    /// Platform errors and a panicking logic thread are logged, not
    /// propagated.
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.title);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
