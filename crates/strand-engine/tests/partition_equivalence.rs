//! The partition strategy and worker count are performance knobs only:
//! every cell reads the previous-tick field, so any division of the
//! work produces the same arithmetic per cell and identical results.

use strand_engine::{CasterConfig, PartitionStrategy, Simulation};
use strand_test_utils::{constant_table, two_zone_machine};

fn sim(partition: PartitionStrategy, workers: usize) -> Simulation {
    let config = CasterConfig {
        rows: 6,
        cols: 5,
        window_capacity: 16,
        workers,
        partition,
        max_dt: 0.25,
        realtime: false,
        ..CasterConfig::default()
    };
    Simulation::new(config, constant_table(), two_zone_machine()).unwrap()
}

fn assert_fields_identical(a: &Simulation, b: &Simulation) {
    let fa = a.field();
    let fb = b.field();
    assert_eq!(fa.size(), fb.size());
    for z in 0..fa.size() {
        for y in 0..fa.rows() {
            for x in 0..fa.cols() {
                let va = fa.get(z, y, x);
                let vb = fb.get(z, y, x);
                assert_eq!(
                    va.to_bits(),
                    vb.to_bits(),
                    "cell ({z}, {y}, {x}): {va} vs {vb}"
                );
            }
        }
    }
}

#[test]
fn quadrant_and_range_runs_are_bit_identical() {
    let mut eight_quadrant = sim(PartitionStrategy::Quadrant, 8);
    let mut one_range = sim(PartitionStrategy::Range, 1);
    for _ in 0..400 {
        let ma = eight_quadrant.tick().unwrap();
        let mb = one_range.tick().unwrap();
        assert_eq!(ma.dt, mb.dt);
        assert_eq!(ma.phase, mb.phase);
    }
    assert!(eight_quadrant.field().size() > 0);
    assert_fields_identical(&eight_quadrant, &one_range);
}

#[test]
fn worker_count_does_not_change_range_results() {
    let mut narrow = sim(PartitionStrategy::Range, 2);
    let mut wide = sim(PartitionStrategy::Range, 8);
    for _ in 0..250 {
        narrow.tick().unwrap();
        wide.tick().unwrap();
    }
    assert_fields_identical(&narrow, &wide);
}
