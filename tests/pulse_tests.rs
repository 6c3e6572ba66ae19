// Host-side tests for pulses travelling along graph edges.

use glam::Vec3;
use neural_backdrop::core::constants::{PULSE_HIDDEN_POSITION, PULSE_SPEED_MIN, PULSE_SPEED_SPAN};
use neural_backdrop::core::{random_speed, Edge, Pulse, PulseAnimator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn line_points() -> Vec<Vec3> {
    vec![
        Vec3::ZERO,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
    ]
}

#[test]
fn seeded_pulses_reference_existing_points() {
    let mut rng = StdRng::seed_from_u64(1);
    let anim = PulseAnimator::new(24, 150, 1.0, &mut rng);
    assert_eq!(anim.len(), 24);
    assert_eq!(anim.positions().len(), 24);
    for p in anim.pulses() {
        assert!(p.endpoints.0 < 150 && p.endpoints.1 < 150);
        assert!((0.0..1.0).contains(&p.t));
        assert!(p.speed >= PULSE_SPEED_MIN && p.speed <= PULSE_SPEED_MIN + PULSE_SPEED_SPAN);
    }
    assert!(anim.positions().iter().all(|&p| p == PULSE_HIDDEN_POSITION));
}

#[test]
fn all_pulses_hide_when_there_are_no_edges() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut anim = PulseAnimator::new(8, 3, 1.0, &mut rng);
    let before: Vec<Pulse> = anim.pulses().to_vec();
    anim.advance(&[], &line_points(), &mut rng);
    assert!(anim.positions().iter().all(|&p| p == PULSE_HIDDEN_POSITION));
    // Progress is frozen while hidden.
    assert_eq!(anim.pulses(), &before[..]);
}

#[test]
fn pulse_interpolates_between_its_endpoints() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut anim = PulseAnimator::from_pulses(
        vec![Pulse {
            endpoints: (0, 1),
            t: 0.25,
            speed: 0.25,
        }],
        1.0,
    );
    anim.advance(&[Edge::new(0, 1)], &line_points(), &mut rng);
    assert_eq!(anim.pulses()[0].t, 0.5);
    assert!((anim.positions()[0] - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn finished_pulse_rebinds_to_a_live_edge() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut anim = PulseAnimator::from_pulses(
        vec![Pulse {
            endpoints: (0, 2),
            t: 0.99,
            speed: 0.05,
        }],
        1.0,
    );
    let edges = [Edge::new(1, 2)];
    anim.advance(&edges, &line_points(), &mut rng);
    let p = anim.pulses()[0];
    assert_eq!(p.endpoints, (1, 2));
    assert_eq!(p.t, 0.0);
    assert!(p.speed >= PULSE_SPEED_MIN && p.speed <= PULSE_SPEED_MIN + PULSE_SPEED_SPAN);
    assert_eq!(anim.positions()[0], Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn unfinished_pulse_keeps_a_stale_edge() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut anim = PulseAnimator::from_pulses(
        vec![Pulse {
            endpoints: (0, 2),
            t: 0.5,
            speed: 0.1,
        }],
        1.0,
    );
    anim.advance(&[Edge::new(0, 1)], &line_points(), &mut rng);
    assert_eq!(anim.pulses()[0].endpoints, (0, 2));
    assert!((anim.positions()[0] - Vec3::new(2.4, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn out_of_range_endpoints_are_hidden() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut anim = PulseAnimator::from_pulses(
        vec![Pulse {
            endpoints: (0, 99),
            t: 0.1,
            speed: 0.01,
        }],
        1.0,
    );
    anim.advance(&[Edge::new(0, 1)], &line_points(), &mut rng);
    assert_eq!(anim.positions()[0], PULSE_HIDDEN_POSITION);
}

#[test]
fn progress_stays_in_unit_interval_over_time() {
    let mut rng = StdRng::seed_from_u64(7);
    let points = line_points();
    let edges = [Edge::new(0, 1), Edge::new(1, 2)];
    let mut anim = PulseAnimator::new(16, points.len(), 1.0, &mut rng);
    for _ in 0..2000 {
        anim.advance(&edges, &points, &mut rng);
        for (p, pos) in anim.pulses().iter().zip(anim.positions()) {
            assert!((0.0..1.0).contains(&p.t));
            assert!(pos.x >= -1e-6 && pos.x <= 4.0 + 1e-6);
        }
    }
}

#[test]
fn random_speed_scales_with_motion() {
    let mut a = StdRng::seed_from_u64(8);
    let mut b = StdRng::seed_from_u64(8);
    let full = random_speed(1.0, &mut a);
    let slow = random_speed(0.25, &mut b);
    assert!((full * 0.25 - slow).abs() < 1e-7);
}
