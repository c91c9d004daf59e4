//! Timed operations and schedules.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::time::{Duration, Timestamp};

/// An operation with the absolute time it starts and how long it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Start time.
    pub time: Timestamp,
    /// Run time on the device.
    pub duration: Duration,
    /// The operation being applied.
    pub operation: Operation,
}

impl ScheduledOperation {
    /// Create a scheduled operation.
    pub fn new(time: Timestamp, duration: Duration, operation: Operation) -> Self {
        Self {
            time,
            duration,
            operation,
        }
    }

    /// Create a zero-duration scheduled operation.
    pub fn at(time: Timestamp, operation: Operation) -> Self {
        Self::new(time, Duration::ZERO, operation)
    }

    /// Time the operation finishes (saturating).
    pub fn end_time(&self) -> Timestamp {
        Timestamp::from_picos(
            self.time
                .raw_picos()
                .saturating_add(self.duration.raw_picos()),
        )
    }

    /// Check whether two operations share a qubit while both are running.
    fn collides_with(&self, other: &ScheduledOperation) -> bool {
        let overlaps = self.time < other.end_time() && other.time < self.end_time();
        overlaps
            && self
                .operation
                .qubits
                .iter()
                .any(|q| other.operation.acts_on(q))
    }
}

/// Operations ordered by start time.
///
/// Operations starting at the same time keep the order they were included in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    scheduled_operations: Vec<ScheduledOperation>,
    /// Longest duration included so far; bounds how far back an operation
    /// still running at a given time can have started.
    #[serde(skip)]
    max_duration: Duration,
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            scheduled_operations: Vec<ScheduledOperation>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Schedule::from_operations(raw.scheduled_operations).map_err(serde::de::Error::custom)
    }
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule by including each operation in turn.
    pub fn from_operations(
        operations: impl IntoIterator<Item = ScheduledOperation>,
    ) -> IrResult<Self> {
        let mut schedule = Self::new();
        for op in operations {
            schedule.include(op)?;
        }
        Ok(schedule)
    }

    /// Add an operation, keeping the schedule ordered by start time.
    ///
    /// Fails if the operation overlaps in time with an already scheduled
    /// operation on one of the same qubits.
    pub fn include(&mut self, op: ScheduledOperation) -> IrResult<()> {
        if let Some(existing) = self
            .window(op.time, op.end_time())
            .iter()
            .find(|existing| existing.collides_with(&op))
        {
            return Err(IrError::OverlappingOperation {
                operation: op.operation.name().to_string(),
                time: op.time,
                existing: existing.operation.name().to_string(),
                existing_time: existing.time,
            });
        }
        let index = self
            .scheduled_operations
            .partition_point(|existing| existing.time <= op.time);
        self.max_duration = self.max_duration.max(op.duration);
        self.scheduled_operations.insert(index, op);
        Ok(())
    }

    /// Operations that may be running at some point in `[start, end]`.
    fn window(&self, start: Timestamp, end: Timestamp) -> &[ScheduledOperation] {
        let earliest = start
            .raw_picos()
            .saturating_sub(self.max_duration.raw_picos());
        let lo = self
            .scheduled_operations
            .partition_point(|s| s.time.raw_picos() < earliest);
        let hi = self.scheduled_operations.partition_point(|s| s.time <= end);
        &self.scheduled_operations[lo..hi.max(lo)]
    }

    /// The scheduled operations in time order.
    pub fn scheduled_operations(&self) -> &[ScheduledOperation] {
        &self.scheduled_operations
    }

    /// Iterate over the scheduled operations in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledOperation> {
        self.scheduled_operations.iter()
    }

    /// Operations running at `time`, including zero-length operations at `time`.
    pub fn query(&self, time: Timestamp) -> impl Iterator<Item = &ScheduledOperation> {
        self.window(time, time)
            .iter()
            .filter(move |s| s.time == time || time < s.end_time())
    }

    /// Number of scheduled operations.
    pub fn len(&self) -> usize {
        self.scheduled_operations.len()
    }

    /// Check if the schedule has no operations.
    pub fn is_empty(&self) -> bool {
        self.scheduled_operations.is_empty()
    }

    /// Time the last operation finishes.
    pub fn end_time(&self) -> Timestamp {
        self.scheduled_operations
            .iter()
            .map(ScheduledOperation::end_time)
            .max()
            .unwrap_or(Timestamp::ZERO)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledOperation;
    type IntoIter = std::slice::Iter<'a, ScheduledOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::qubit::GridQubit;

    fn x_on(row: i32, col: i32) -> Operation {
        Operation::single(Gate::x_pow(1.0), GridQubit::new(row, col))
    }

    #[test]
    fn test_include_keeps_time_order() {
        let mut schedule = Schedule::new();
        schedule
            .include(ScheduledOperation::at(Timestamp::from_picos(300), x_on(0, 0)))
            .unwrap();
        schedule
            .include(ScheduledOperation::at(Timestamp::from_picos(100), x_on(0, 1)))
            .unwrap();
        schedule
            .include(ScheduledOperation::at(Timestamp::from_picos(300), x_on(0, 2)))
            .unwrap();

        let times: Vec<u64> = schedule.iter().map(|s| s.time.raw_picos()).collect();
        assert_eq!(times, vec![100, 300, 300]);
        // Ties keep insertion order.
        assert_eq!(schedule.scheduled_operations()[1].operation, x_on(0, 0));
        assert_eq!(schedule.scheduled_operations()[2].operation, x_on(0, 2));
    }

    #[test]
    fn test_overlap_on_same_qubit_rejected() {
        let mut schedule = Schedule::new();
        let d = Duration::from_picos(50);
        schedule
            .include(ScheduledOperation::new(Timestamp::from_picos(0), d, x_on(0, 0)))
            .unwrap();

        let err = schedule
            .include(ScheduledOperation::new(Timestamp::from_picos(25), d, x_on(0, 0)))
            .unwrap_err();
        assert!(matches!(err, IrError::OverlappingOperation { .. }));

        // Back-to-back and other-qubit operations are fine.
        schedule
            .include(ScheduledOperation::new(Timestamp::from_picos(50), d, x_on(0, 0)))
            .unwrap();
        schedule
            .include(ScheduledOperation::new(Timestamp::from_picos(25), d, x_on(1, 0)))
            .unwrap();
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_overlap_found_behind_shorter_operations() {
        let mut schedule = Schedule::new();
        schedule
            .include(ScheduledOperation::new(
                Timestamp::ZERO,
                Duration::from_picos(1_000),
                x_on(0, 0),
            ))
            .unwrap();
        for t in (100..1_000).step_by(100) {
            schedule
                .include(ScheduledOperation::new(
                    Timestamp::from_picos(t),
                    Duration::from_picos(10),
                    x_on(1, 0),
                ))
                .unwrap();
        }

        let late = ScheduledOperation::at(Timestamp::from_picos(950), x_on(0, 0));
        assert!(matches!(
            schedule.include(late),
            Err(IrError::OverlappingOperation { existing_time, .. })
                if existing_time == Timestamp::ZERO
        ));

        // An earlier insertion that runs into a later operation.
        let early = ScheduledOperation::new(
            Timestamp::from_picos(95),
            Duration::from_picos(20),
            x_on(1, 0),
        );
        assert!(schedule.include(early).is_err());
    }

    #[test]
    fn test_collision_window_is_bounded() {
        let schedule = Schedule::from_operations((0..1_000u64).map(|t| {
            ScheduledOperation::new(
                Timestamp::from_picos(t * 10),
                Duration::from_picos(20),
                x_on(0, t as i32),
            )
        }))
        .unwrap();

        let window = schedule.window(Timestamp::from_picos(5_000), Timestamp::from_picos(5_000));
        assert!(window.len() <= 3);
        assert_eq!(schedule.query(Timestamp::from_picos(5_005)).count(), 2);
    }

    #[test]
    fn test_query_and_end_time() {
        let schedule = Schedule::from_operations([
            ScheduledOperation::new(Timestamp::from_picos(0), Duration::from_picos(100), x_on(0, 0)),
            ScheduledOperation::at(Timestamp::from_picos(40), x_on(1, 1)),
        ])
        .unwrap();

        assert_eq!(schedule.query(Timestamp::from_picos(40)).count(), 2);
        assert_eq!(schedule.query(Timestamp::from_picos(41)).count(), 1);
        assert_eq!(schedule.query(Timestamp::from_picos(100)).count(), 0);
        assert_eq!(schedule.end_time(), Timestamp::from_picos(100));
        assert_eq!(Schedule::new().end_time(), Timestamp::ZERO);
    }
}
