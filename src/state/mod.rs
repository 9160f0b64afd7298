pub mod latency;
pub mod seat_map;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use dashmap::DashMap;
use tokio::sync::{Mutex, OnceCell, OwnedMutexGuard, RwLock};
use tracing::info;

use crate::config::AppConfig;

use self::seat_map::{SeatId, SeatMap};

pub type SharedState = Arc<AppState>;

/// Central application state: the seat map, the simulated outcome toggle and per-seat locks.
pub struct AppState {
    config: AppConfig,
    seats: OnceCell<RwLock<SeatMap>>,
    /// Flipped on every otherwise valid booking attempt; drives the simulated failures.
    last_booking_attempt_succeeded: AtomicBool,
    seat_locks: DashMap<SeatId, Arc<Mutex<()>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The seat map is generated lazily on first access.
    pub fn new(config: AppConfig) -> SharedState {
        Self::build(config, OnceCell::new())
    }

    /// Construct a state whose seat map is already known instead of generated.
    pub fn with_seat_map(config: AppConfig, seat_map: SeatMap) -> SharedState {
        Self::build(config, OnceCell::from(RwLock::new(seat_map)))
    }

    fn build(config: AppConfig, seats: OnceCell<RwLock<SeatMap>>) -> SharedState {
        Arc::new(Self {
            config,
            seats,
            last_booking_attempt_succeeded: AtomicBool::new(false),
            seat_locks: DashMap::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Seat map shared by every request, generating it on the first call.
    pub async fn seat_map(&self) -> &RwLock<SeatMap> {
        self.seats
            .get_or_init(|| async {
                let map = SeatMap::generate(
                    self.config.layout(),
                    self.config.prebooking,
                    &mut rand::rng(),
                );
                info!(
                    seats = map.len(),
                    booked = map.booked_count(),
                    "generated seat map"
                );
                RwLock::new(map)
            })
            .await
    }

    /// True once the seat map has been generated.
    pub fn is_seat_map_initialized(&self) -> bool {
        self.seats.initialized()
    }

    /// Flip the outcome toggle and return the value it held before.
    ///
    /// `true` means the previous valid attempt was let through, so this one must fail.
    pub fn flip_booking_outcome(&self) -> bool {
        self.last_booking_attempt_succeeded
            .fetch_xor(true, Ordering::SeqCst)
    }

    /// Exclusive access to a single seat, used when bookings run in atomic mode.
    ///
    /// Returns `None` for identifiers outside the seat map, so the lock registry never holds
    /// more entries than there are seats.
    pub async fn lock_seat(&self, id: SeatId) -> Option<OwnedMutexGuard<()>> {
        if self.seat_map().await.read().await.get(&id).is_none() {
            return None;
        }
        let lock = self.seat_locks.entry(id).or_default().clone();
        Some(lock.lock_owned().await)
    }

    /// Number of per-seat locks created so far.
    pub fn seat_lock_count(&self) -> usize {
        self.seat_locks.len()
    }
}
