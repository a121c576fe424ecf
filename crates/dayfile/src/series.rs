//! Typed column views over a parsed day record.
//!
//! A series decodes one column into 96 optional integers: temperature
//! tenths, rain hundredths or events. All aggregates skip missing slots.

use aeolus_values::{TimeMode, SLOTS_PER_DAY};

use crate::error::SeriesError;
use crate::record::{ColumnKind, DayRecord};

/// A closed slot-index range marking where a series' sensor is untrusted.
///
/// Used by [`DaySeries::merge`] to blank values recorded around a sensor
/// handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    /// First slot of the range.
    pub first: usize,
    /// Last slot of the range, inclusive.
    pub last: usize,
}

impl SlotRange {
    /// Returns whether `slot` lies inside the range.
    pub fn contains(&self, slot: usize) -> bool {
        self.first <= slot && slot <= self.last
    }

    /// An empty range matching no slot.
    pub fn none() -> Self {
        Self { first: 1, last: 0 }
    }
}

/// One decoded measurement column of a single day.
#[derive(Debug, Clone)]
pub struct DaySeries {
    time_mode: TimeMode,
    kind: ColumnKind,
    name: String,
    last: usize,
    values: Vec<Option<i32>>,
}

impl DaySeries {
    /// Decodes the column of the given type and id from a day record.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NoSuchColumn`] when the record declares no
    /// matching column.
    pub fn extract(record: &DayRecord, kind: ColumnKind, id: u32) -> Result<Self, SeriesError> {
        let column = record
            .find_column(kind, id)
            .ok_or(SeriesError::NoSuchColumn {
                kind: kind.token(),
                id,
            })?;
        let values: Vec<Option<i32>> = (0..SLOTS_PER_DAY)
            .map(|slot| record.decode_value(slot, column))
            .collect();
        Ok(Self {
            time_mode: record.time_mode(),
            kind,
            name: record.columns()[column].name.clone(),
            last: record.last_slot(),
            values,
        })
    }

    /// Returns the time-base mode the series was recorded under.
    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    /// Returns the column type.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the series has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the index of the last slot that was populated in the source
    /// record.
    pub fn last_slot(&self) -> usize {
        self.last
    }

    /// Returns the decoded value at `slot`.
    pub fn get(&self, slot: usize) -> Option<i32> {
        self.values.get(slot).copied().flatten()
    }

    /// Returns all decoded values in slot order.
    pub fn values(&self) -> &[Option<i32>] {
        &self.values
    }

    /// Returns whether no slot holds a valid value.
    pub fn all_missing(&self) -> bool {
        self.values.iter().all(|v| v.is_none())
    }

    /// Returns the slot index of the maximum value; the latest slot wins
    /// ties.
    ///
    /// When every slot is missing the result is 0, indistinguishable from
    /// a genuine maximum at slot 0. Check [`DaySeries::all_missing`] first.
    pub fn index_of_max(&self) -> usize {
        let mut index = 0;
        let mut best: Option<i32> = None;
        for (i, v) in self.values.iter().enumerate() {
            if let Some(v) = *v {
                if best.map_or(true, |b| v >= b) {
                    best = Some(v);
                    index = i;
                }
            }
        }
        index
    }

    /// Returns the slot index of the minimum value; the latest slot wins
    /// ties. Same all-missing caveat as [`DaySeries::index_of_max`].
    pub fn index_of_min(&self) -> usize {
        let mut index = 0;
        let mut best: Option<i32> = None;
        for (i, v) in self.values.iter().enumerate() {
            if let Some(v) = *v {
                if best.map_or(true, |b| v <= b) {
                    best = Some(v);
                    index = i;
                }
            }
        }
        index
    }

    /// Returns the mean over valid slots, or `None` when all are missing.
    pub fn average(&self) -> Option<i32> {
        let mut sum = 0i64;
        let mut count = 0i64;
        for v in self.values.iter().flatten() {
            sum += i64::from(*v);
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some((sum / count) as i32)
    }

    /// Returns the total over valid slots, or `None` when all are missing.
    /// Mainly useful for rain columns.
    pub fn sum(&self) -> Option<i64> {
        let mut sum = 0i64;
        let mut any = false;
        for v in self.values.iter().flatten() {
            sum += i64::from(*v);
            any = true;
        }
        any.then_some(sum)
    }

    /// Returns a plot upper bound in tenths for the given calendar month.
    ///
    /// Each month has a fixed base bound; the bound grows by 50 when the
    /// day's maximum exceeds it and shrinks by 50 when the day's minimum
    /// falls more than 300 tenths below it.
    pub fn plot_ceiling(&self, month: u8) -> i32 {
        // Base bounds in tenths, January through December.
        #[rustfmt::skip]
        const BASE: [i32; 12] = [
            100, 100, 150, 200, 250, 300, 300, 300, 250, 200, 150, 100,
        ];
        let base = BASE[usize::from(month.clamp(1, 12)) - 1];

        if let Some(max) = self.get(self.index_of_max()) {
            if max > base {
                return base + 50;
            }
        }
        if let Some(min) = self.get(self.index_of_min()) {
            if min < base - 300 {
                return base - 50;
            }
        }
        base
    }

    /// Merges two same-mode series slot by slot.
    ///
    /// Both valid takes the lower value. A value present in only one
    /// series is kept unless its slot falls inside the window supplied
    /// with that series, which marks where its sensor is untrusted.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::TimeBaseMismatch`] when modes or slot counts
    /// differ.
    pub fn merge(
        name: impl Into<String>,
        a: &DaySeries,
        window_a: &SlotRange,
        b: &DaySeries,
        window_b: &SlotRange,
    ) -> Result<DaySeries, SeriesError> {
        if a.time_mode != b.time_mode || a.len() != b.len() {
            return Err(SeriesError::TimeBaseMismatch);
        }

        let values: Vec<Option<i32>> = (0..a.len())
            .map(|i| match (a.values[i], b.values[i]) {
                (Some(x), Some(y)) => Some(x.min(y)),
                (Some(x), None) => (!window_a.contains(i)).then_some(x),
                (None, Some(y)) => (!window_b.contains(i)).then_some(y),
                (None, None) => None,
            })
            .collect();
        let last = values.iter().rposition(|v| v.is_some()).unwrap_or(0);

        Ok(DaySeries {
            time_mode: a.time_mode,
            kind: a.kind,
            name: name.into(),
            last,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: Vec<Option<i32>>) -> DaySeries {
        let last = values.iter().rposition(|v| v.is_some()).unwrap_or(0);
        DaySeries {
            time_mode: TimeMode::SlotEnd,
            kind: ColumnKind::Temperature,
            name: "Aussen".to_string(),
            last,
            values,
        }
    }

    fn padded(head: &[Option<i32>]) -> Vec<Option<i32>> {
        let mut v = head.to_vec();
        v.resize(SLOTS_PER_DAY, None);
        v
    }

    #[test]
    fn max_tie_break_keeps_latest() {
        let s = series(padded(&[Some(10), Some(10), Some(5)]));
        assert_eq!(s.index_of_max(), 1);
    }

    #[test]
    fn min_tie_break_keeps_latest() {
        let s = series(padded(&[Some(5), Some(10), Some(5)]));
        assert_eq!(s.index_of_min(), 2);
    }

    #[test]
    fn all_missing_extrema_report_slot_zero() {
        let s = series(padded(&[]));
        assert!(s.all_missing());
        assert_eq!(s.index_of_max(), 0);
        assert_eq!(s.index_of_min(), 0);
        assert_eq!(s.average(), None);
        assert_eq!(s.sum(), None);
    }

    #[test]
    fn average_skips_missing() {
        let s = series(padded(&[Some(10), None, Some(20)]));
        assert_eq!(s.average(), Some(15));
    }

    #[test]
    fn sum_skips_missing() {
        let s = series(padded(&[Some(25), None, Some(100)]));
        assert_eq!(s.sum(), Some(125));
    }

    #[test]
    fn merge_takes_lower_of_two_valid() {
        let a = series(padded(&[Some(5), Some(9)]));
        let b = series(padded(&[Some(7), Some(3)]));
        let m = DaySeries::merge("m", &a, &SlotRange::none(), &b, &SlotRange::none()).unwrap();
        assert_eq!(m.get(0), Some(5));
        assert_eq!(m.get(1), Some(3));
        assert_eq!(m.get(2), None);
    }

    #[test]
    fn merge_drops_singletons_inside_own_window() {
        let a = series(padded(&[Some(5), None]));
        let b = series(padded(&[None, Some(3)]));
        let wa = SlotRange { first: 0, last: 0 };
        let wb = SlotRange { first: 1, last: 1 };
        let m = DaySeries::merge("m", &a, &wa, &b, &wb).unwrap();
        assert!(m.all_missing());
    }

    #[test]
    fn merge_keeps_singletons_outside_window() {
        let a = series(padded(&[Some(5), None]));
        let b = series(padded(&[None, Some(3)]));
        let m = DaySeries::merge("m", &a, &SlotRange::none(), &b, &SlotRange::none()).unwrap();
        assert_eq!(m.get(0), Some(5));
        assert_eq!(m.get(1), Some(3));
    }

    #[test]
    fn merge_rejects_mode_mismatch() {
        let a = series(padded(&[Some(1)]));
        let mut b = series(padded(&[Some(2)]));
        b.time_mode = TimeMode::SlotStart;
        assert_eq!(
            DaySeries::merge("m", &a, &SlotRange::none(), &b, &SlotRange::none()).unwrap_err(),
            SeriesError::TimeBaseMismatch
        );
    }

    #[test]
    fn plot_ceiling_follows_base_table() {
        // January base is 100 tenths.
        let mild = series(padded(&[Some(50)]));
        assert_eq!(mild.plot_ceiling(1), 100);

        let warm = series(padded(&[Some(120)]));
        assert_eq!(warm.plot_ceiling(1), 150);

        let cold = series(padded(&[Some(-250)]));
        assert_eq!(cold.plot_ceiling(1), 50);

        // Just at the thresholds: no adjustment.
        let edge_high = series(padded(&[Some(100)]));
        assert_eq!(edge_high.plot_ceiling(1), 100);
        let edge_low = series(padded(&[Some(-200)]));
        assert_eq!(edge_low.plot_ceiling(1), 100);
    }

    #[test]
    fn plot_ceiling_all_missing_gives_base() {
        let s = series(padded(&[]));
        assert_eq!(s.plot_ceiling(7), 300);
    }

    #[test]
    fn slot_range_contains() {
        let w = SlotRange { first: 3, last: 5 };
        assert!(!w.contains(2));
        assert!(w.contains(3));
        assert!(w.contains(5));
        assert!(!w.contains(6));
        assert!(!SlotRange::none().contains(0));
    }
}
