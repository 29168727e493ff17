//! End-to-end scenarios through the public engine API.
//!
//! Uses the `test-support` helpers so every draw and every payload call is
//! observable.

use callpath::batch::{BatchOptions, run_batch};
use callpath::core::random::SeededRandom;
use callpath::core::types::PathId;
use callpath::driver::ExecutionDriver;
use callpath::io::config::ReseedPolicy;
use callpath::io::pacing::NoPause;
use callpath::paths::context::PathContext;
use callpath::paths::recursive::{E_DEPTHS, K_DEPTHS, e_countdown, k_countdown};
use callpath::paths::registry::Registry;
use callpath::test_support::{CountingPayload, RecordingAux, ScriptedRandom};

#[test]
fn batch_of_five_over_standard_registry() {
    let registry = Registry::standard();
    let payload = CountingPayload::new();
    let aux = RecordingAux::new();
    let mut driver = ExecutionDriver::new(
        &registry,
        &payload,
        &aux,
        Box::new(SeededRandom::from_seed(77)),
        Box::new(SeededRandom::from_seed(78)),
    );
    let options = BatchOptions {
        runs: 5,
        reseed: ReseedPolicy::Never,
        base_seed: 0,
    };

    let outcome = run_batch(&mut driver, &options, &mut NoPause, |_| {}).expect("batch");

    assert_eq!(registry.count(), 13);
    assert_eq!(outcome.records.len(), 5);
    assert!(outcome.records.iter().all(|r| r.path.index() < 13));
    assert_eq!(outcome.usage.total(), 5);
    assert_eq!(payload.calls(), 5);
}

#[test]
fn every_path_by_id_delivers_once_per_run() {
    let registry = Registry::standard();
    for path in registry.iter() {
        let payload = CountingPayload::new();
        let aux = RecordingAux::new();
        let mut driver = ExecutionDriver::new(
            &registry,
            &payload,
            &aux,
            Box::new(ScriptedRandom::empty()),
            Box::new(SeededRandom::from_seed(path.id.index() as u64)),
        );
        for seq in 1..=3 {
            let record = driver.run_path(seq, path.id).expect("registered");
            assert_eq!(record.payload_calls, 1, "{}", path.name);
        }
        assert_eq!(payload.calls(), 3, "{}", path.name);
    }
}

#[test]
fn forced_branch_left_alpha_route() {
    let registry = Registry::standard();
    let payload = CountingPayload::new();
    let aux = RecordingAux::new();
    let mut driver = ExecutionDriver::new(
        &registry,
        &payload,
        &aux,
        Box::new(ScriptedRandom::empty()),
        Box::new(ScriptedRandom::new(vec![1, 1])),
    );

    let record = driver.run_path(1, PathId::new(12)).expect("registered");

    assert_eq!(
        &record.frames[1..],
        &[
            "path_m::level1",
            "path_m::level2_left",
            "path_m::level3",
            "path_m::level4",
            "path_m::alpha",
        ]
    );
    assert_eq!(payload.calls(), 1);
}

#[test]
fn recursion_terminates_for_every_depth() {
    type Countdown = fn(&mut PathContext<'_>, u32);
    let bodies: [(Countdown, u32, &str); 2] = [
        (e_countdown, *E_DEPTHS.end(), "path_e::recurse"),
        (k_countdown, *K_DEPTHS.end(), "path_k::recurse"),
    ];
    for (body, max, frame) in bodies {
        for depth in 0..=max {
            let payload = CountingPayload::new();
            let aux = RecordingAux::new();
            let mut rng = ScriptedRandom::empty();
            let mut cx = PathContext::new(&payload, &aux, &mut rng);
            body(&mut cx, depth);
            let trace = cx.finish();
            assert_eq!(trace.entries(frame), depth as usize + 1);
            assert_eq!(payload.calls(), 1);
        }
    }
}
