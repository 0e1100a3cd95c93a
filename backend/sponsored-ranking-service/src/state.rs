use crate::config::{Config, SeedMode};
use crate::services::rotation::{RotationLayer, RotationSeed};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared state for HTTP handlers.
///
/// The only mutable piece is the request counter used by
/// `SeedMode::PerRequest`.
pub struct AppState {
    pub config: Config,
    pub rotation: RotationLayer,
    request_counter: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rotation = RotationLayer::new(config.default_strategy);
        Self {
            config,
            rotation,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Seed for a request: the explicit value when given, otherwise derived
    /// from the configured seed mode.
    pub fn resolve_seed(&self, explicit: Option<u64>, now: DateTime<Utc>) -> RotationSeed {
        match (explicit, self.config.seed_mode) {
            (Some(seed), _) => RotationSeed::new(seed),
            (None, SeedMode::PerRequest) => {
                RotationSeed::new(self.request_counter.fetch_add(1, Ordering::Relaxed))
            }
            (None, _) => self.clock_seed(now),
        }
    }

    /// Seed the next ranking request would get, without consuming it.
    ///
    /// Used by read-only endpoints so they do not advance the live rotation.
    pub fn peek_seed(&self, explicit: Option<u64>, now: DateTime<Utc>) -> RotationSeed {
        match (explicit, self.config.seed_mode) {
            (Some(seed), _) => RotationSeed::new(seed),
            (None, SeedMode::PerRequest) => {
                RotationSeed::new(self.request_counter.load(Ordering::Relaxed))
            }
            (None, _) => self.clock_seed(now),
        }
    }

    fn clock_seed(&self, now: DateTime<Utc>) -> RotationSeed {
        match self.config.seed_mode {
            SeedMode::Epoch => RotationSeed::for_epoch(now, self.config.rotation_epoch_seconds),
            _ => RotationSeed::for_instant(now, self.offset()),
        }
    }

    fn offset(&self) -> FixedOffset {
        self.config
            .rotation_offset()
            .unwrap_or_else(|| Utc.fix())
    }
}
