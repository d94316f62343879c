//! Slot registry — the six tracked storage compartments.
//!
//! Each slot holds an optional food icon and a remaining-days counter.
//! `remaining_days == 0` means "expires today / expired"; a freshly booted
//! slot that was never configured also reads 0 and is reported as expired
//! from the first day rollover onwards.  That ambiguity is intentional and
//! matches the deployed behaviour.

use core::fmt;

// ---------------------------------------------------------------------------
// Slot identity
// ---------------------------------------------------------------------------

/// Index of one of the six rack compartments (0–5).
///
/// Construction is range-checked; "no slot selected" is expressed as
/// `Option<SlotIndex>` rather than an out-of-range sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Total number of slots in the rack.
    pub const COUNT: usize = 6;

    /// Range-checked constructor.
    pub fn new(raw: u8) -> Option<Self> {
        ((raw as usize) < Self::COUNT).then_some(Self(raw))
    }

    /// Constructor for values already quantized into `[0, COUNT)`.
    /// Clamps to the last slot as a guard against float edge cases.
    pub fn clamped(raw: u8) -> Self {
        Self(raw.min(Self::COUNT as u8 - 1))
    }

    /// Zero-based array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Grid column on the display (two slots per column).
    pub const fn column(self) -> u8 {
        self.0 / 2
    }

    /// Grid row on the display.
    pub const fn row(self) -> u8 {
        self.0 % 2
    }

    /// Iterate all slots in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Food icons
// ---------------------------------------------------------------------------

/// The eight selectable food icons.
/// Discriminants match the selector quantization order and the asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FoodIcon {
    Watermelon = 0,
    Apple = 1,
    Banana = 2,
    Blueberry = 3,
    Kiwi = 4,
    Lime = 5,
    Peach = 6,
    Strawberry = 7,
}

impl FoodIcon {
    /// Total number of icons — the selector is quantized over this many levels.
    pub const COUNT: usize = 8;

    /// Convert a quantized selector value back to an icon.  Panics on
    /// out-of-range in debug builds; clamps to `Strawberry` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Watermelon,
            1 => Self::Apple,
            2 => Self::Banana,
            3 => Self::Blueberry,
            4 => Self::Kiwi,
            5 => Self::Lime,
            6 => Self::Peach,
            7 => Self::Strawberry,
            _ => {
                debug_assert!(false, "invalid icon index: {idx}");
                Self::Strawberry
            }
        }
    }

    /// Asset base name on the SD card (`/sd/<name>.bmp`).
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Watermelon => "watermelon",
            Self::Apple => "apple",
            Self::Banana => "banana",
            Self::Blueberry => "blueberry",
            Self::Kiwi => "kiwi",
            Self::Lime => "lime",
            Self::Peach => "peach",
            Self::Strawberry => "strawberry",
        }
    }
}

// ---------------------------------------------------------------------------
// Expiry classification
// ---------------------------------------------------------------------------

/// Warning bar colour classification, recomputed at each day rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// No warning bar.
    None,
    /// Expires tomorrow (counter just reached zero).
    Orange,
    /// Expired today (counter was already zero).
    Red,
}

/// Result of ageing a single slot by one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// Counter decremented and still above zero; carries the new value.
    Counting(u8),
    /// Counter decremented to exactly zero this day.
    ExpiresTomorrow,
    /// Counter was already zero — re-raised every day until re-set.
    ExpiredToday,
}

impl DayOutcome {
    /// Warning classification implied by this outcome.
    pub const fn warning(self) -> Warning {
        match self {
            Self::Counting(_) => Warning::None,
            Self::ExpiresTomorrow => Warning::Orange,
            Self::ExpiredToday => Warning::Red,
        }
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One tracked compartment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slot {
    /// Committed food icon; `None` until the user finishes a SettingIcon phase.
    pub food: Option<FoodIcon>,
    /// Days until expiry.  0 = expires today / expired / never configured.
    pub remaining_days: u8,
}

impl Slot {
    /// Apply the daily decrement/classification rule to this slot.
    pub fn age_one_day(&mut self) -> DayOutcome {
        if self.remaining_days > 0 {
            self.remaining_days -= 1;
            if self.remaining_days == 0 {
                DayOutcome::ExpiresTomorrow
            } else {
                DayOutcome::Counting(self.remaining_days)
            }
        } else {
            DayOutcome::ExpiredToday
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Owner of the six slots.  Mutated only by the single control loop.
#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    slots: [Slot; SlotIndex::COUNT],
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotIndex) -> &Slot {
        &self.slots[slot.index()]
    }

    pub fn get_mut(&mut self, slot: SlotIndex) -> &mut Slot {
        &mut self.slots[slot.index()]
    }

    /// Age every slot by one simulated day, in index order.
    ///
    /// Total walk: all six slots are visited every rollover, so an expired
    /// slot re-raises its outcome each day until the user re-configures it.
    pub fn roll_over_day(&mut self) -> heapless::Vec<(SlotIndex, DayOutcome), { SlotIndex::COUNT }> {
        let mut outcomes = heapless::Vec::new();
        for slot in SlotIndex::all() {
            let outcome = self.slots[slot.index()].age_one_day();
            // Capacity equals the slot count, push cannot fail.
            let _ = outcomes.push((slot, outcome));
        }
        outcomes
    }
}
