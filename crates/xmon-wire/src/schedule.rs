//! Schedule ⇄ wire record sequence mapping.
//!
//! On the wire every record carries `incremental_delay_picoseconds`: the
//! first record's delay is its absolute start time, every later delay is the
//! difference between consecutive absolute start times. Delays are computed
//! from absolute times, never from a running sum, so they cannot drift.

use tracing::{debug, instrument};
use xmon_ir::{Schedule, ScheduledOperation, Timestamp};

use crate::device::DeviceModel;
use crate::error::{WireError, WireResult};
use crate::gate::GateCodec;
use crate::param::{ParameterCodec, RawParameterCodec};
use crate::record::WireRecord;

/// Encodes schedules as ordered wire records and decodes them back.
#[derive(Debug, Clone, Default)]
pub struct ScheduleCodec<P = RawParameterCodec> {
    gates: GateCodec<P>,
}

impl ScheduleCodec {
    /// Create a codec using the default parameter encoding.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ParameterCodec> ScheduleCodec<P> {
    /// Create a codec around an existing gate codec.
    pub fn with_gate_codec(gates: GateCodec<P>) -> Self {
        Self { gates }
    }

    /// The gate codec used per operation.
    pub fn gate_codec(&self) -> &GateCodec<P> {
        &self.gates
    }

    /// Encode a schedule, one record per operation in schedule order.
    pub fn encode(&self, schedule: &Schedule) -> WireResult<Vec<WireRecord>> {
        self.encode_operations(schedule.scheduled_operations())
    }

    /// Encode scheduled operations given in non-decreasing time order.
    ///
    /// Fails with [`WireError::OutOfOrderSchedule`] if an operation starts
    /// before its predecessor.
    #[instrument(skip_all, fields(operations = operations.len()))]
    pub fn encode_operations(
        &self,
        operations: &[ScheduledOperation],
    ) -> WireResult<Vec<WireRecord>> {
        let records = operations
            .iter()
            .enumerate()
            .scan(None, |previous: &mut Option<Timestamp>, (index, op)| {
                let delay = incremental_delay(index, *previous, op.time);
                *previous = Some(op.time);
                Some(delay.and_then(|picos| {
                    self.gates
                        .encode(&op.operation)
                        .map(|record| record.with_delay(picos))
                }))
            })
            .collect::<WireResult<Vec<_>>>()?;

        debug!("Encoded {} scheduled operations", records.len());
        Ok(records)
    }

    /// Rebuild a schedule from records, placing each operation on `device`.
    ///
    /// Absolute times are the running sum of the records' delays, starting
    /// at zero; a missing delay counts as zero.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn decode<D: DeviceModel>(&self, device: &D, records: &[WireRecord]) -> WireResult<Schedule> {
        let timed = records
            .iter()
            .enumerate()
            .scan(Timestamp::ZERO, |elapsed, (index, record)| {
                let time = elapsed
                    .raw_picos()
                    .checked_add(record.delay_picos())
                    .map(Timestamp::from_picos)
                    .ok_or(WireError::TimestampOverflow { index });
                if let Ok(t) = time {
                    *elapsed = t;
                }
                Some(time.map(|t| (t, record)))
            })
            .collect::<WireResult<Vec<_>>>()?;

        let mut schedule = Schedule::new();
        for (time, record) in timed {
            let operation = device.reconstruct_operation(&self.gates, record)?;
            let duration = device.duration_of(&operation)?;
            schedule.include(ScheduledOperation::new(time, duration, operation))?;
        }

        debug!(
            "Decoded schedule with {} operations ending at {}",
            schedule.len(),
            schedule.end_time()
        );
        Ok(schedule)
    }
}

/// Delay of the operation at `index` given its predecessor's start time.
fn incremental_delay(
    index: usize,
    previous: Option<Timestamp>,
    current: Timestamp,
) -> WireResult<u64> {
    match previous {
        None => Ok(current.raw_picos()),
        Some(previous) => current
            .checked_duration_since(previous)
            .map(|d| d.raw_picos())
            .ok_or(WireError::OutOfOrderSchedule {
                index,
                previous,
                current,
            }),
    }
}
