//! Unit tests for the tessellation pipeline.

#[cfg(test)]
mod helpers {
    use ps_core::{ModelId, Point, ZoneId};
    use ps_spatial::{NoiseParams, OperatingArea, SpatialGrid, TransitionTable};

    use crate::{PatrolZone, ZoneSeed};

    pub fn rect_area() -> OperatingArea {
        OperatingArea::trapezoid(400.0, 200.0, 0.0).unwrap()
    }

    pub fn grid_for(area: &OperatingArea) -> SpatialGrid {
        let table = TransitionTable::new(&[vec![1.0]]).unwrap();
        SpatialGrid::new(area, 10.0, 0.0, table, 0, NoiseParams::default()).unwrap()
    }

    pub fn seed(model: u16, strength: f64) -> ZoneSeed {
        ZoneSeed { model: ModelId(model), raw_strength: strength, radius: 10.0 }
    }

    pub fn zone_at(i: u32, p: Point, strength: f64) -> PatrolZone {
        let mut z = PatrolZone::new(ZoneId(i), &seed(0, strength), p);
        z.strength = strength;
        z
    }
}

#[cfg(test)]
mod relax {
    use ps_core::{Bbox, DistanceMetric, Point, SimRng};

    use super::helpers::{rect_area, seed, zone_at};
    use crate::relax::{normalize_strength, pressure, relax_step, seed_zones};
    use crate::TessellationError;

    #[test]
    fn seeds_land_inside_the_area() {
        let area = ps_spatial::OperatingArea::trapezoid(1_000.0, 100.0, 20.0).unwrap();
        let seeds: Vec<_> = (0..20).map(|i| seed(0, 1.0 + i as f64)).collect();
        let zones = seed_zones(&area, &seeds, 10_000, &mut SimRng::new(9)).unwrap();
        assert_eq!(zones.len(), 20);
        assert!(zones.iter().all(|z| area.contains(z.position)));
    }

    #[test]
    fn seeding_gives_up_after_attempt_budget() {
        let err = seed_zones(&rect_area(), &[seed(0, 1.0)], 0, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, TessellationError::Seeding { attempts: 0 }));
    }

    #[test]
    fn normalized_strength_sums_to_budget() {
        let mut zones = vec![
            zone_at(0, Point::ORIGIN, 3.0),
            zone_at(1, Point::ORIGIN, 1.0),
        ];
        let budget = (4_500.0f64 * 600.0).sqrt();
        normalize_strength(&mut zones, budget).unwrap();
        let total: f64 = zones.iter().map(|z| z.strength).sum();
        assert!((total - budget).abs() < 1e-9);
        assert!((zones[0].strength / zones[1].strength - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_strength_is_rejected() {
        let mut zones = vec![zone_at(0, Point::ORIGIN, 0.0)];
        assert!(normalize_strength(&mut zones, 10.0).is_err());
    }

    #[test]
    fn pressure_pushes_away_when_overlapping() {
        let mut rng = SimRng::new(0);
        let own = Point::new(100.0, 100.0);
        let other = Point::new(110.0, 100.0);
        // adj-manhattan d = 5, combined 20 → push 3 × separation.
        let p = pressure(own, 10.0, other, 10.0, DistanceMetric::AdjustedManhattan, 0.0, &mut rng);
        assert_eq!(p, Point::new(70.0, 100.0));
    }

    #[test]
    fn pressure_is_zero_when_apart() {
        let mut rng = SimRng::new(0);
        let own = Point::new(0.0, 0.0);
        let p = pressure(own, 1.0, Point::new(0.0, 50.0), 1.0, DistanceMetric::AdjustedManhattan, 1.0, &mut rng);
        assert_eq!(p, own);
    }

    #[test]
    fn self_pressure_only_jitters() {
        let mut rng = SimRng::new(4);
        let own = Point::new(10.0, 10.0);
        let p = pressure(own, 5.0, own, 5.0, DistanceMetric::AdjustedManhattan, 1.0, &mut rng);
        assert!((p.x - own.x).abs() <= 1.0 && (p.y - own.y).abs() <= 1.0);
        let still = pressure(own, 5.0, own, 5.0, DistanceMetric::AdjustedManhattan, 0.0, &mut rng);
        assert_eq!(still, own);
    }

    #[test]
    fn equal_zones_move_apart_symmetrically() {
        let s = 40.0;
        let a = Point::new(480.0, 500.0);
        let b = Point::new(520.0, 500.0);
        // adj-manhattan distance 20 < 2S.
        let mut zones = vec![zone_at(0, a, s), zone_at(1, b, s)];
        let bounds = Bbox::new(Point::new(0.0, 0.0), Point::new(1_000.0, 1_000.0));
        relax_step(&mut zones, bounds, DistanceMetric::AdjustedManhattan, 0.0, &mut SimRng::new(0));

        let (na, nb) = (zones[0].position, zones[1].position);
        assert!(na.x < a.x && nb.x > b.x, "zones did not separate: {na} {nb}");
        assert!((((na.x + nb.x) / 2.0) - 500.0).abs() < 1e-9);
        assert!(((a.x - na.x) - (nb.x - b.x)).abs() < 1e-9);
        assert_eq!(na.y, 500.0);
        assert_eq!(nb.y, 500.0);
    }

    #[test]
    fn relaxation_clamps_to_bounds() {
        let mut zones = vec![
            zone_at(0, Point::new(1.0, 5.0), 500.0),
            zone_at(1, Point::new(3.0, 5.0), 500.0),
        ];
        let bounds = Bbox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        relax_step(&mut zones, bounds, DistanceMetric::Euclidean, 1.0, &mut SimRng::new(2));
        assert!(zones.iter().all(|z| bounds.contains(z.position)));
        assert_eq!(zones[0].position.x, 0.0);
        assert_eq!(zones[1].position.x, 10.0);
    }
}

#[cfg(test)]
mod assign {
    use ps_core::{DistanceMetric, Point, ReceptorId};

    use super::helpers::{grid_for, rect_area, zone_at};
    use crate::assign::{assign_receptors, score};

    #[test]
    fn every_in_zone_receptor_is_assigned_once() {
        let area = rect_area();
        let mut grid = grid_for(&area);
        let mut zones = vec![
            zone_at(0, Point::new(95.0, 100.0), 1.0),
            zone_at(1, Point::new(295.0, 100.0), 1.0),
        ];
        assign_receptors(&mut zones, &mut grid, DistanceMetric::AdjustedManhattan);

        let assigned: usize = zones.iter().map(|z| z.receptors.len()).sum();
        assert_eq!(assigned, grid.in_zone().count());
        for r in grid.receptors() {
            assert_eq!(r.zone.is_some(), r.in_zone);
        }
        // Equal strengths split the in-area columns evenly.
        assert_eq!(zones[0].receptors.len(), zones[1].receptors.len());
    }

    #[test]
    fn stronger_zone_claims_more() {
        let area = rect_area();
        let mut grid = grid_for(&area);
        let mut zones = vec![
            zone_at(0, Point::new(100.0, 100.0), 4.0),
            zone_at(1, Point::new(300.0, 100.0), 1.0),
        ];
        assign_receptors(&mut zones, &mut grid, DistanceMetric::Euclidean);
        assert!(zones[0].receptors.len() > zones[1].receptors.len());
        let r = grid.lookup(Point::new(210.0, 100.0)).unwrap();
        assert_eq!(r.zone, Some(zones[0].id));
    }

    #[test]
    fn score_is_zero_for_matching_shares() {
        let area = rect_area();
        let mut grid = grid_for(&area);
        let mut zones = vec![
            zone_at(0, Point::new(95.0, 100.0), 1.0),
            zone_at(1, Point::new(295.0, 100.0), 1.0),
        ];
        assign_receptors(&mut zones, &mut grid, DistanceMetric::Euclidean);
        assert!(score(&zones).abs() < 1e-12);

        zones[0].strength = 3.0;
        // Shares 0.5/0.5 against strength shares 0.75/0.25.
        assert!((score(&zones) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn score_shares_count_only_assigned_receptors() {
        let mut zones = vec![
            zone_at(0, Point::new(95.0, 100.0), 1.0),
            zone_at(1, Point::new(295.0, 100.0), 3.0),
        ];
        zones[0].receptors = vec![ReceptorId(0)];
        zones[1].receptors = vec![ReceptorId(1), ReceptorId(2), ReceptorId(3)];
        // 1/4 and 3/4 of the four assigned receptors, whatever the grid size.
        assert!(score(&zones).abs() < 1e-12);
    }
}

#[cfg(test)]
mod sweep {
    use ps_core::{Point, Polygon};

    use super::helpers::{grid_for, rect_area, zone_at};
    use crate::sweep::{boustrophedon, build_coverage};
    use crate::TessellationError;

    fn square(side: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
        .unwrap()
    }

    #[test]
    fn zig_zag_over_square() {
        let path = boustrophedon(&square(100.0), 10.0);
        assert_eq!(path.len(), 25);
        // First line runs up, second runs down.
        assert_eq!(path[0], Point::new(10.0, 10.0));
        assert_eq!(path[4], Point::new(10.0, 90.0));
        assert_eq!(path[5], Point::new(30.0, 90.0));
        assert_eq!(path[9], Point::new(30.0, 10.0));
        // Consecutive waypoints are one step apart.
        for w in path.windows(2) {
            assert!((w[0].euclidean(w[1]) - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sweep_points_stay_inside_hull() {
        let tri = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0), Point::new(0.0, 200.0)]).unwrap();
        let path = boustrophedon(&tri, 10.0);
        assert!(!path.is_empty());
        assert!(path.iter().all(|p| tri.covers(*p)));
        assert!(path.len() < 25 * 4);
    }

    #[test]
    fn tiny_zone_falls_back_to_hull_vertices() {
        let area = rect_area();
        let grid = grid_for(&area);
        let mut zone = zone_at(0, Point::new(50.0, 50.0), 1.0);
        zone.radius = 500.0;
        zone.receptors = [(50.0, 50.0), (60.0, 50.0), (50.0, 60.0)]
            .iter()
            .map(|&(x, y)| grid.lookup(Point::new(x, y)).unwrap().id)
            .collect();
        build_coverage(&mut zone, &grid).unwrap();
        assert_eq!(zone.coverage.len(), 3);
        assert_eq!(zone.coverage.to_vec(), zone.hull);
    }

    #[test]
    fn collinear_zone_is_degenerate() {
        let area = rect_area();
        let grid = grid_for(&area);
        let mut zone = zone_at(3, Point::new(50.0, 50.0), 1.0);
        zone.receptors = [(50.0, 50.0), (60.0, 50.0), (70.0, 50.0)]
            .iter()
            .map(|&(x, y)| grid.lookup(Point::new(x, y)).unwrap().id)
            .collect();
        let err = build_coverage(&mut zone, &grid).unwrap_err();
        assert!(matches!(err, TessellationError::ZoneHull { zone, .. } if zone.0 == 3));
    }
}

#[cfg(test)]
mod engine {
    use ps_core::{Polygon, SimRng};

    use super::helpers::{grid_for, rect_area, seed};
    use crate::{tessellate, TessellationParams};

    #[test]
    fn end_to_end() {
        let area = rect_area();
        let mut grid = grid_for(&area);
        let seeds = vec![seed(0, 2.0), seed(0, 2.0), seed(1, 1.0)];
        let params = TessellationParams { iterations: 20, ..TessellationParams::default() };
        let t = tessellate(&area, &mut grid, &seeds, &params, &mut SimRng::new(42)).unwrap();

        assert_eq!(t.zones.len(), 3);
        let total: f64 = t.zones.iter().map(|z| z.strength).sum();
        assert!((total - area.strength_budget()).abs() < 1e-9);
        let assigned: usize = t.zones.iter().map(|z| z.receptors.len()).sum();
        assert_eq!(assigned, grid.in_zone().count());

        for z in &t.zones {
            assert!(z.hull.len() >= 3);
            assert!(z.coverage.len() >= 2);
            let hull = Polygon::new(z.hull.clone()).unwrap();
            assert!(z.coverage.iter().all(|p| hull.covers(*p)));
            assert!(area.bbox().contains(z.position));
        }
        assert!(t.score >= 0.0 && t.score <= 2.0);
    }

    #[test]
    fn same_seed_same_zones() {
        let area = rect_area();
        let seeds = vec![seed(0, 1.0), seed(0, 1.0)];
        let params = TessellationParams { iterations: 10, ..TessellationParams::default() };
        let run = |s| {
            let mut grid = grid_for(&area);
            tessellate(&area, &mut grid, &seeds, &params, &mut SimRng::new(s)).unwrap()
        };
        let (a, b) = (run(7), run(7));
        for (za, zb) in a.zones.iter().zip(&b.zones) {
            assert_eq!(za.position, zb.position);
            assert_eq!(za.coverage, zb.coverage);
        }
    }

    #[test]
    fn no_seeds_no_zones() {
        let area = rect_area();
        let mut grid = grid_for(&area);
        let t = tessellate(&area, &mut grid, &[], &TessellationParams::default(), &mut SimRng::new(0)).unwrap();
        assert!(t.zones.is_empty());
    }
}
