//! Property-based round-trip tests for the schedule and result codecs.
//!
//! - schedule → records → schedule reproduces every operation and time
//! - results → bytes → results reproduces every bit

use ndarray::{Array2, ArrayD};
use proptest::prelude::*;
use xmon_ir::{
    Gate, GridQubit, MeasurementGate, Operation, Parameter, Schedule, ScheduledOperation,
    Timestamp,
};
use xmon_wire::{ScheduleCodec, UnconstrainedDevice, pack_results, unpack_results};

/// Parameters that survive a JSON round trip exactly.
fn arb_parameter() -> impl Strategy<Value = Parameter> {
    prop_oneof![
        (-256i32..256).prop_map(|n| Parameter::constant(f64::from(n) / 64.0)),
        "[a-z]{1,4}".prop_map(Parameter::symbol),
    ]
}

fn arb_qubit() -> impl Strategy<Value = GridQubit> {
    (0i32..4, 0i32..4).prop_map(|(row, col)| GridQubit::new(row, col))
}

/// Phases that hit the fixed X and Y axes often.
fn arb_phase() -> impl Strategy<Value = Parameter> {
    prop_oneof![
        Just(Parameter::constant(0.0)),
        Just(Parameter::constant(0.5)),
        arb_parameter(),
    ]
}

/// Operations the gate codec can encode.
fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (arb_phase(), arb_parameter(), arb_qubit()).prop_map(|(p, e, q)| Operation {
            gate: Gate::PhasedXPow {
                phase_exponent: p,
                exponent: e,
            },
            qubits: vec![q],
        }),
        (arb_parameter(), arb_qubit()).prop_map(|(e, q)| Operation::single(Gate::x_pow(e), q)),
        (arb_parameter(), arb_qubit()).prop_map(|(e, q)| Operation::single(Gate::y_pow(e), q)),
        (arb_parameter(), arb_parameter(), arb_qubit())
            .prop_map(|(p, e, q)| Operation::single(Gate::phased_x(p, e), q)),
        (arb_parameter(), arb_qubit()).prop_map(|(e, q)| Operation::single(Gate::z_pow(e), q)),
        (arb_parameter(), arb_qubit(), arb_qubit())
            .prop_map(|(e, a, b)| Operation::two(Gate::cz_pow(e), a, b)),
        (
            "[a-z]{1,6}",
            prop::collection::vec((arb_qubit(), any::<bool>()), 1..=4),
            any::<bool>()
        )
            .prop_map(|(key, targets, masked)| {
                let (qubits, mask): (Vec<_>, Vec<_>) = targets.into_iter().unzip();
                let mut gate = MeasurementGate::new(key);
                if masked {
                    gate = gate.with_invert_mask(mask);
                }
                Operation::new(gate, qubits)
            }),
    ]
}

/// Zero-duration operations at sorted absolute times.
fn arb_schedule() -> impl Strategy<Value = Schedule> {
    prop::collection::vec((0u64..1_000_000_000, arb_operation()), 0..=12).prop_map(|ops| {
        Schedule::from_operations(
            ops.into_iter()
                .map(|(picos, op)| ScheduledOperation::at(Timestamp::from_picos(picos), op)),
        )
        .expect("zero-duration operations never overlap")
    })
}

/// `(key, repetitions × width)` matrices with distinct keys.
fn arb_results() -> impl Strategy<Value = Vec<(String, Array2<bool>)>> {
    (0usize..=9, 1usize..=4).prop_flat_map(|(repetitions, num_keys)| {
        prop::collection::vec(0usize..=11, num_keys).prop_flat_map(move |widths| {
            let matrices: Vec<_> = widths
                .into_iter()
                .map(|w| {
                    prop::collection::vec(any::<bool>(), repetitions * w).prop_map(move |bits| {
                        Array2::from_shape_vec((repetitions, w), bits)
                            .expect("length matches shape")
                    })
                })
                .collect();
            matrices.prop_map(|ms| {
                ms.into_iter()
                    .enumerate()
                    .map(|(i, m)| (format!("k{i}"), m))
                    .collect()
            })
        })
    })
}

proptest! {
    #[test]
    fn test_schedule_round_trip(schedule in arb_schedule()) {
        let codec = ScheduleCodec::new();
        let records = codec.encode(&schedule).unwrap();
        prop_assert_eq!(records.len(), schedule.len());

        let decoded = codec.decode(&UnconstrainedDevice, &records).unwrap();
        prop_assert_eq!(decoded, schedule);
    }

    #[test]
    fn test_schedule_round_trip_through_json(schedule in arb_schedule()) {
        let codec = ScheduleCodec::new();
        let json: Vec<serde_json::Value> = codec
            .encode(&schedule)
            .unwrap()
            .iter()
            .map(|r| r.to_json().unwrap())
            .collect();
        let text = serde_json::to_string(&json).unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        let records: Vec<_> = parsed
            .iter()
            .map(|v| xmon_wire::WireRecord::from_json(v).unwrap())
            .collect();
        let decoded = codec.decode(&UnconstrainedDevice, &records).unwrap();
        prop_assert_eq!(decoded, schedule);
    }

    #[test]
    fn test_delays_sum_to_absolute_times(schedule in arb_schedule()) {
        let records = ScheduleCodec::new().encode(&schedule).unwrap();
        let mut elapsed = 0u64;
        for (record, op) in records.iter().zip(schedule.iter()) {
            elapsed += record.delay_picos();
            prop_assert_eq!(elapsed, op.time.raw_picos());
        }
    }

    #[test]
    fn test_results_round_trip(results in arb_results()) {
        let repetitions = results[0].1.nrows();
        let input: Vec<(String, ArrayD<bool>)> = results
            .iter()
            .map(|(k, m)| (k.clone(), m.clone().into_dyn()))
            .collect();
        let layout: Vec<(String, usize)> = results
            .iter()
            .map(|(k, m)| (k.clone(), m.ncols()))
            .collect();

        let packed = pack_results(&input).unwrap();
        let total_bits: usize = repetitions * layout.iter().map(|(_, w)| w).sum::<usize>();
        prop_assert_eq!(packed.len(), total_bits.div_ceil(8));

        let unpacked = unpack_results(&packed, repetitions, &layout).unwrap();
        prop_assert_eq!(unpacked.into_inner(), results);
    }
}
