//! Unit tests for ps-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ModelId, ReceptorId, ZoneId};

    #[test]
    fn index_roundtrip() {
        let id = ReceptorId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ReceptorId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ModelId::INVALID.0, u16::MAX);
        assert_eq!(ZoneId::default(), ZoneId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::distance;
    use crate::{CoreError, DistanceMetric, Point};

    #[test]
    fn metrics() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b, DistanceMetric::Euclidean), 5.0);
        assert_eq!(a.distance(b, DistanceMetric::Manhattan), 7.0);
        assert_eq!(a.distance(b, DistanceMetric::AdjustedManhattan), 5.5);
    }

    #[test]
    fn metric_by_name() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 1.0);
        assert_eq!(distance(a, b, "adj manhattan").unwrap(), 2.0);
        assert_eq!(distance(a, b, "Manhattan").unwrap(), 3.0);
    }

    #[test]
    fn unknown_metric_fails() {
        let err = distance(Point::ORIGIN, Point::ORIGIN, "chebyshev").unwrap_err();
        assert!(matches!(err, CoreError::UnknownMetric(ref m) if m == "chebyshev"));
    }

    #[test]
    fn step_toward_partial_and_exact() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(a.step_toward(b, 4.0), Point::new(4.0, 0.0));
        assert_eq!(a.step_toward(b, 10.0), b);
        assert_eq!(a.step_toward(b, 25.0), b);
    }

    #[test]
    fn copies_are_independent() {
        let base = Point::new(1.0, 2.0);
        let mut loc = base;
        loc.x += 5.0;
        assert_eq!(base, Point::new(1.0, 2.0));
        assert_ne!(loc, base);
    }

    #[test]
    fn finite_rejects_nan() {
        assert!(Point::finite(f64::NAN, 0.0).is_err());
        assert!(Point::finite(1.0, 2.0).is_ok());
    }
}

#[cfg(test)]
mod hull {
    use crate::{convex_hull, CoreError, Point, Polygon};

    #[test]
    fn square_with_interior_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(
            hull,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn collinear_edge_points_are_kept() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(0.0, 1.0),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.len(), 6);
        assert!(hull.contains(&Point::new(1.0, 0.0)));
        assert!(hull.contains(&Point::new(0.0, 1.0)));
    }

    #[test]
    fn contains_every_input_point() {
        let pts: Vec<Point> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.37;
                Point::new(10.0 * t.cos() * (1.0 + (i % 3) as f64), 7.0 * t.sin())
            })
            .collect();
        let hull = Polygon::new(convex_hull(&pts).unwrap()).unwrap();
        for p in &pts {
            assert!(hull.covers(*p), "{p} escaped the hull");
        }
    }

    #[test]
    fn too_few_points() {
        let err = convex_hull(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, CoreError::Degenerate(_)));
    }

    #[test]
    fn all_collinear() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        assert!(convex_hull(&pts).is_err());
    }

    #[test]
    fn duplicates_collapse() {
        let p = Point::new(3.0, 3.0);
        assert!(convex_hull(&[p, p, p, p]).is_err());
    }
}

#[cfg(test)]
mod polygon {
    use crate::{Bbox, Point, Polygon};

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn contains_and_covers() {
        let sq = unit_square();
        assert!(sq.contains(Point::new(0.5, 0.5)));
        assert!(!sq.contains(Point::new(1.5, 0.5)));
        assert!(sq.covers(Point::new(1.0, 0.5)));
        assert!(sq.covers(Point::new(0.0, 0.0)));
        assert!(!sq.covers(Point::new(1.0 + 1e-6, 0.5)));
    }

    #[test]
    fn area_and_bbox() {
        let sq = unit_square();
        assert!((sq.area() - 1.0).abs() < 1e-12);
        assert_eq!(sq.bbox(), Bbox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
    }

    #[test]
    fn inset_collapses_to_midline() {
        let b = Bbox::new(Point::new(0.0, 0.0), Point::new(10.0, 2.0));
        let i = b.inset(3.0);
        assert_eq!(i.min, Point::new(3.0, 1.0));
        assert_eq!(i.max, Point::new(7.0, 1.0));
    }

    #[test]
    fn clamp_into_box() {
        let b = Bbox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(b.clamp(Point::new(-3.0, 12.0)), Point::new(0.0, 10.0));
    }

    #[test]
    fn zero_area_rejected() {
        assert!(Polygon::new(vec![Point::ORIGIN, Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_elapsed_scales_with_delta() {
        let mut clock = SimClock::new(0.5);
        for _ in 0..4 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(4));
        assert_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn config_end_tick() {
        let cfg = SimConfig { total_ticks: 50, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(50));
        assert_eq!(cfg.make_clock().time_delta, 1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_streams_are_deterministic() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        for _ in 0..10 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn agents_do_not_share_streams() {
        let mut a = AgentRng::new(7, AgentId(1));
        let mut b = AgentRng::new(7, AgentId(2));
        let xs: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.unit()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn uniform_and_jitter_bounds() {
        let mut rng = SimRng::new(11);
        for _ in 0..200 {
            let u = rng.uniform(-2.0, 5.0);
            assert!((-2.0..5.0).contains(&u));
            let j = rng.jitter(1.0);
            assert!((-1.0..=1.0).contains(&j));
        }
        assert_eq!(rng.jitter(0.0), 0.0);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
    }
}

#[cfg(test)]
mod role {
    use crate::{CoreError, OperatingDomain, Signature, SkillLevel, Team};

    #[test]
    fn parse_labels() {
        assert_eq!("Air".parse::<OperatingDomain>().unwrap(), OperatingDomain::Air);
        assert_eq!("basic".parse::<SkillLevel>().unwrap(), SkillLevel::Basic);
        assert_eq!("very_large".parse::<Signature>().unwrap(), Signature::VeryLarge);
        assert_eq!("red".parse::<Team>().unwrap(), Team::Traveller);
    }

    #[test]
    fn unknown_skill_fails() {
        let err = "expert".parse::<SkillLevel>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownVariant { kind: "skill level", .. }));
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(Signature::VeryLarge.to_string(), "very_large");
        assert_eq!(OperatingDomain::Surface.to_string(), "surface");
    }
}
