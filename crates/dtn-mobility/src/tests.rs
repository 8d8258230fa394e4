//! Unit tests for dtn-mobility.

use dtn_core::{NodeId, NodeRng, Position};

use crate::{Area, LinearMobility, Mobility, RandomWaypoint, Stationary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn square(side: f64) -> Area {
    Area::sized(side, side).unwrap()
}

fn close(a: Position, b: Position) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

// ── Area ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod area {
    use super::*;

    #[test]
    fn degenerate_area_rejected() {
        assert!(Area::sized(0.0, 10.0).is_err());
        assert!(Area::new(Position::new(5.0, 5.0), Position::new(1.0, 10.0)).is_err());
    }

    #[test]
    fn random_points_stay_inside() {
        let a = square(100.0);
        let mut rng = NodeRng::new(1, NodeId(1));
        for _ in 0..200 {
            assert!(a.contains(a.random_point(&mut rng)));
        }
    }
}

// ── Stationary ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stationary {
    use super::*;

    #[test]
    fn never_moves() {
        let mut m = Stationary(Position::new(3.0, 4.0));
        m.move_by(1_000.0);
        assert_eq!(m.current_position(), Position::new(3.0, 4.0));
    }
}

// ── LinearMobility ────────────────────────────────────────────────────────────

#[cfg(test)]
mod linear {
    use super::*;

    #[test]
    fn unbounded_drift() {
        let mut m = LinearMobility::new(Position::new(0.0, 0.0), 2.0, -1.0);
        m.move_by(5.0);
        assert!(close(m.current_position(), Position::new(10.0, -5.0)));
    }

    #[test]
    fn reflects_off_far_wall() {
        // 10 m/s for 2 s from x=95 in a 100 m box → 115 → bounced to 85.
        let mut m = LinearMobility::bounded(Position::new(95.0, 50.0), 10.0, 0.0, square(100.0)).unwrap();
        m.move_by(2.0);
        assert!(close(m.current_position(), Position::new(85.0, 50.0)));
        assert_eq!(m.velocity(), (-10.0, 0.0));
    }

    #[test]
    fn reflects_off_near_wall() {
        let mut m = LinearMobility::bounded(Position::new(5.0, 5.0), 0.0, -10.0, square(100.0)).unwrap();
        m.move_by(1.0);
        assert!(close(m.current_position(), Position::new(5.0, 5.0)));
        assert_eq!(m.velocity(), (0.0, 10.0));
    }

    #[test]
    fn large_overshoot_stays_inside() {
        let area = square(100.0);
        let mut m = LinearMobility::bounded(Position::new(50.0, 50.0), 737.0, -419.0, area).unwrap();
        for _ in 0..50 {
            m.move_by(3.3);
            assert!(area.contains(m.current_position()), "escaped to {}", m.current_position());
        }
    }

    #[test]
    fn double_bounce_keeps_direction() {
        // 250 m in a 100 m box from x=0: out to 100, back to 0, out to 50.
        let mut m = LinearMobility::bounded(Position::new(0.0, 0.0), 250.0, 0.0, square(100.0)).unwrap();
        m.move_by(1.0);
        assert!(close(m.current_position(), Position::new(50.0, 0.0)));
        assert_eq!(m.velocity().0, 250.0);
    }

    #[test]
    fn start_outside_area_rejected() {
        assert!(LinearMobility::bounded(Position::new(-1.0, 0.0), 1.0, 1.0, square(10.0)).is_err());
    }
}

// ── RandomWaypoint ────────────────────────────────────────────────────────────

#[cfg(test)]
mod waypoint {
    use super::*;

    fn rwp(seed: u64) -> RandomWaypoint {
        RandomWaypoint::new(
            Position::new(50.0, 50.0),
            square(1_000.0),
            1.0,
            5.0,
            NodeRng::new(seed, NodeId(1)),
        )
        .unwrap()
    }

    #[test]
    fn invalid_speed_rejected() {
        let rng = NodeRng::new(0, NodeId(1));
        assert!(RandomWaypoint::new(Position::new(1.0, 1.0), square(10.0), 0.0, 1.0, rng.clone()).is_err());
        assert!(RandomWaypoint::new(Position::new(1.0, 1.0), square(10.0), 3.0, 1.0, rng).is_err());
    }

    #[test]
    fn step_never_exceeds_speed_budget() {
        let mut m = rwp(7);
        for _ in 0..500 {
            let before = m.current_position();
            m.move_by(1.0);
            let moved = before.distance(m.current_position());
            assert!(moved <= 5.0 + 1e-9, "moved {moved} m in 1 s");
        }
    }

    #[test]
    fn stays_inside_area() {
        let area = square(1_000.0);
        let mut m = rwp(11);
        for _ in 0..2_000 {
            m.move_by(10.0);
            assert!(area.contains(m.current_position()));
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = rwp(3);
        let mut b = rwp(3);
        for _ in 0..100 {
            a.move_by(2.0);
            b.move_by(2.0);
            assert_eq!(a.current_position(), b.current_position());
        }
    }

    #[test]
    fn picks_new_waypoint_on_arrival() {
        let mut m = rwp(5);
        let first = m.target();
        // Enough time to cross the whole area at minimum speed.
        m.move_by(2_000.0);
        assert_ne!(m.target(), first);
    }
}
