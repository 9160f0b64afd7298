//! Seat identifiers, the in-memory seat map and the generator that fills it.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use tracing::warn;

/// Number of rows addressable with a single uppercase letter.
pub const MAX_ROWS: u8 = 26;

/// Letter used to render the row at `index` (`0 -> 'A'`).
pub fn row_letter(index: u8) -> Option<char> {
    (index < MAX_ROWS).then(|| char::from(b'A' + index))
}

/// Inverse of [`row_letter`].
pub fn row_index(letter: char) -> Option<u8> {
    letter
        .is_ascii_uppercase()
        .then(|| letter as u8 - b'A')
}

/// Address of a seat, rendered as `"<row letter>-<seat number>"` (e.g. `C-7`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct SeatId {
    row: u8,
    number: u16,
}

impl SeatId {
    /// Build an identifier from a 0-based row index and a 1-based seat number.
    pub fn new(row: u8, number: u16) -> Result<Self, SeatIdError> {
        if row >= MAX_ROWS {
            return Err(SeatIdError::RowOutOfRange(row));
        }
        if number == 0 {
            return Err(SeatIdError::ZeroSeatNumber);
        }
        Ok(Self { row, number })
    }

    /// 0-based row index.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// 1-based seat number within the row.
    pub fn number(&self) -> u16 {
        self.number
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `new` and `from_str` keep the row below MAX_ROWS.
        let letter = row_letter(self.row).unwrap_or('?');
        write!(f, "{letter}-{}", self.number)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (row, number) = value
            .split_once('-')
            .ok_or_else(|| SeatIdError::Malformed(value.to_string()))?;

        let mut letters = row.chars();
        let row = match (letters.next(), letters.next()) {
            (Some(letter), None) => {
                row_index(letter).ok_or_else(|| SeatIdError::Malformed(value.to_string()))?
            }
            _ => return Err(SeatIdError::Malformed(value.to_string())),
        };

        // Only the canonical rendering is accepted: "A-01" names no seat.
        if number.is_empty()
            || number.starts_with('0')
            || !number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(SeatIdError::Malformed(value.to_string()));
        }
        let number = number
            .parse::<u16>()
            .map_err(|_| SeatIdError::Malformed(value.to_string()))?;

        Self::new(row, number)
    }
}

/// Reasons a seat identifier can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeatIdError {
    /// Not of the form `<uppercase letter>-<digits without leading zero>`.
    #[error("malformed seat identifier `{0}`")]
    Malformed(String),
    /// Row beyond `Z`.
    #[error("row index {0} cannot be rendered as a single letter")]
    RowOutOfRange(u8),
    /// Seat number `0`.
    #[error("seat numbers start at 1")]
    ZeroSeatNumber,
}

/// A single seat: its price and whether someone already holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub price: i64,
    pub is_booked: bool,
}

/// Dimensions and pricing of the theater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLayout {
    pub num_of_rows: u8,
    pub seats_per_row: u16,
    pub base_price: i64,
    pub price_increment_per_row: i64,
}

impl SeatLayout {
    /// Price of every seat in the row at `row_index`.
    pub fn price_for_row(&self, row_index: u8) -> i64 {
        self.base_price + i64::from(row_index) * self.price_increment_per_row
    }

    /// Total number of seats in the layout.
    pub fn capacity(&self) -> usize {
        usize::from(self.num_of_rows) * usize::from(self.seats_per_row)
    }
}

/// How seats are marked as booked when the map is first generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PrebookingPolicy {
    /// Each seat is booked independently with the given probability.
    Probability { probability: f64 },
    /// Exactly `count` distinct seats are booked, picked at random.
    FixedCount { count: usize },
}

impl Default for PrebookingPolicy {
    fn default() -> Self {
        PrebookingPolicy::Probability { probability: 0.4 }
    }
}

/// Every seat of the theater keyed by identifier, in row-major order.
#[derive(Debug, Clone)]
pub struct SeatMap {
    layout: SeatLayout,
    seats: IndexMap<SeatId, Seat>,
}

impl SeatMap {
    /// Build a map where no seat is booked yet.
    ///
    /// Rows beyond [`MAX_ROWS`] are silently dropped since they have no letter; the
    /// configuration layer refuses such layouts before they get here.
    pub fn unbooked(layout: SeatLayout) -> Self {
        let mut seats = IndexMap::with_capacity(layout.capacity());
        for row in 0..layout.num_of_rows.min(MAX_ROWS) {
            let price = layout.price_for_row(row);
            for number in 1..=layout.seats_per_row {
                seats.insert(
                    SeatId { row, number },
                    Seat {
                        price,
                        is_booked: false,
                    },
                );
            }
        }
        Self { layout, seats }
    }

    /// Generate a fresh map and pre-book seats according to `policy`.
    pub fn generate<R: Rng>(
        layout: SeatLayout,
        policy: PrebookingPolicy,
        rng: &mut R,
    ) -> Self {
        let mut map = Self::unbooked(layout);
        match policy {
            PrebookingPolicy::Probability { probability } => {
                map.prebook_with_probability(probability, rng)
            }
            PrebookingPolicy::FixedCount { count } => map.prebook_exactly(count, rng),
        }
        map
    }

    fn prebook_with_probability<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        for seat in self.seats.values_mut() {
            seat.is_booked = rng.random_bool(probability);
        }
    }

    /// Rejection sampling: draw a random seat, retry when it is already booked.
    fn prebook_exactly<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let capacity = self.seats.len();
        if capacity == 0 {
            return;
        }
        let target = if count > capacity {
            warn!(
                requested = count,
                capacity, "more pre-booked seats requested than exist; booking every seat"
            );
            capacity
        } else {
            count
        };

        let mut booked = 0;
        while booked < target {
            let row = rng.random_range(0..self.layout.num_of_rows.min(MAX_ROWS));
            let number = rng.random_range(1..=self.layout.seats_per_row);
            if let Some(seat) = self.seats.get_mut(&SeatId { row, number }) {
                if !seat.is_booked {
                    seat.is_booked = true;
                    booked += 1;
                }
            }
        }
    }

    /// Layout the map was generated from.
    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    /// Look up a seat.
    pub fn get(&self, id: &SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    /// Look up a seat for mutation.
    pub fn get_mut(&mut self, id: &SeatId) -> Option<&mut Seat> {
        self.seats.get_mut(id)
    }

    /// Iterate over seats in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeatId, &Seat)> {
        self.seats.iter()
    }

    /// Number of seats in the map.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// True when the layout holds no seat at all.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Number of seats currently booked.
    pub fn booked_count(&self) -> usize {
        self.seats.values().filter(|seat| seat.is_booked).count()
    }
}
