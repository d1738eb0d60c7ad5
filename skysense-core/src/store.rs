use crate::ForecastSeries;
use std::fmt;

/// One of the two named forecast holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    City1,
    City2,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::City1 => "City 1",
            Slot::City2 => "City 2",
        }
    }

    pub const fn all() -> &'static [Slot] {
        &[Slot::City1, Slot::City2]
    }

    const fn index(self) -> usize {
        match self {
            Slot::City1 => 0,
            Slot::City2 => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest fetched forecast per slot. Setting a slot drops what it held before.
#[derive(Debug, Default)]
pub struct ForecastStore {
    slots: [Option<ForecastSeries>; 2],
}

impl ForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: Slot, series: ForecastSeries) {
        tracing::debug!(%slot, city = %series.city, days = series.len(), "slot updated");
        self.slots[slot.index()] = Some(series);
    }

    pub fn get(&self, slot: Slot) -> Option<&ForecastSeries> {
        self.slots[slot.index()].as_ref()
    }

    /// Both slots, only when both hold data.
    pub fn pair(&self) -> Option<(&ForecastSeries, &ForecastSeries)> {
        Some((self.get(Slot::City1)?, self.get(Slot::City2)?))
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
