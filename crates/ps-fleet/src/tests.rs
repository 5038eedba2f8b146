//! Unit tests for ps-fleet.

#[cfg(test)]
mod helpers {
    use ps_config::{ModelSpec, RoleSpec};
    use ps_core::{OperatingDomain, Signature, SkillLevel, Team};

    pub fn cutter(quantity: u32) -> ModelSpec {
        ModelSpec {
            name:             "cutter".into(),
            team:             Team::Searcher,
            radius:           5.0,
            quantity,
            speed:            10.0,
            endurance:        100.0,
            maintenance_time: 2.0,
            color:            "steelblue".into(),
            role:             RoleSpec::Searcher { skill: SkillLevel::Basic, domain: OperatingDomain::Surface },
        }
    }

    pub fn smuggler(quantity: u32) -> ModelSpec {
        ModelSpec {
            name:             "smuggler".into(),
            team:             Team::Traveller,
            radius:           0.0,
            quantity,
            speed:            25.0,
            endurance:        f64::INFINITY,
            maintenance_time: 0.0,
            color:            "crimson".into(),
            role:             RoleSpec::Traveller { air: Signature::Small, surface: Signature::Medium },
        }
    }
}

#[cfg(test)]
mod plan {
    use super::helpers::{cutter, smuggler};
    use crate::{concurrent_zones, FleetError};

    #[test]
    fn zones_from_transit_and_endurance() {
        let mut spec = cutter(9);
        spec.endurance = 2_000.0;
        spec.maintenance_time = 20.0;
        // ingress 500: downtime 120, uptime 100, three agents per zone.
        assert_eq!(concurrent_zones(&spec, 400.0, -100.0).unwrap(), 3);
    }

    #[test]
    fn round_trip_beyond_endurance_is_rejected() {
        let mut spec = cutter(9);
        spec.endurance = 1_000.0;
        let err = concurrent_zones(&spec, 400.0, -100.0).unwrap_err();
        assert!(matches!(err, FleetError::NonPositiveUptime { .. }));
    }

    #[test]
    fn unlimited_endurance_mans_one_zone_per_agent() {
        assert_eq!(concurrent_zones(&smuggler(4), 400.0, -100.0).unwrap(), 4);
    }
}

#[cfg(test)]
mod pool {
    use ps_core::{AgentId, ModelId, Point, Tick, ZoneId};
    use ps_spatial::Route;

    use super::helpers::{cutter, smuggler};
    use crate::{Fleet, FleetError, PoolCounts};

    fn patrol() -> Vec<Route> {
        vec![Route::new(vec![Point::new(10.0, 0.0), Point::new(20.0, 0.0)])]
    }

    #[test]
    fn fleet_starts_all_inactive() {
        let exit = Point::new(-5.0, 5.0);
        let (fleet, store, rngs) = Fleet::from_models(&[cutter(3), smuggler(2)], Point::ORIGIN, exit, 1);
        assert_eq!(store.len(), 5);
        assert_eq!(rngs.len(), 5);
        assert_eq!(fleet.counts()[0].1, PoolCounts { active: 0, inactive: 3, maintenance: 0 });
        assert_eq!(fleet.counts()[1].1, PoolCounts { active: 0, inactive: 2, maintenance: 0 });
        assert_eq!(store.get(AgentId(3)).unwrap().base, exit);
        assert_eq!(store.get(AgentId(0)).unwrap().base, Point::ORIGIN);
        fleet.check_conservation().unwrap();
    }

    #[test]
    fn deploys_in_ascending_id_order() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[cutter(3)], Point::ORIGIN, Point::ORIGIN, 1);
        fleet.deploy(&mut store, [(ZoneId(0), ModelId(0))], &patrol(), Tick::ZERO, 1.0).unwrap();
        assert_eq!(fleet.active_searchers(), vec![AgentId(0)]);
        assert_eq!(store.get(AgentId(0)).unwrap().location, Point::new(10.0, 0.0));
        assert_eq!(store.get(AgentId(0)).unwrap().zone, Some(ZoneId(0)));
    }

    #[test]
    fn empty_inactive_list_is_fatal() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[cutter(1)], Point::ORIGIN, Point::ORIGIN, 1);
        let routes = patrol();
        let pool = fleet.pool_mut(ModelId(0)).unwrap();
        pool.activate_next(&mut store, Some(ZoneId(0)), routes[0].clone(), Tick::ZERO, 1.0).unwrap();
        let err = pool.activate_next(&mut store, Some(ZoneId(0)), routes[0].clone(), Tick::ZERO, 1.0).unwrap_err();
        assert!(matches!(err, FleetError::NoInactiveAgents { .. }));
    }

    #[test]
    fn unknown_zone_route_is_an_error() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[cutter(1)], Point::ORIGIN, Point::ORIGIN, 1);
        let err = fleet.deploy(&mut store, [(ZoneId(4), ModelId(0))], &patrol(), Tick::ZERO, 1.0).unwrap_err();
        assert!(matches!(err, FleetError::UnknownZone(ZoneId(4))));
    }

    #[test]
    fn patrol_relief_cycle_keeps_zone_manned() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[cutter(3)], Point::ORIGIN, Point::ORIGIN, 1);
        let routes = patrol();
        fleet.deploy(&mut store, [(ZoneId(0), ModelId(0))], &routes, Tick::ZERO, 1.0).unwrap();

        for t in 1..80_u64 {
            fleet.maintenance_phase(&mut store, 1.0).unwrap();
            fleet.pool_mut(ModelId(0)).unwrap().searcher_phase(&mut store, &routes, 0.1, Tick(t), 1.0).unwrap();
            fleet.check_conservation().unwrap();

            let pool = fleet.pool(ModelId(0)).unwrap();
            assert!(!pool.active.is_empty(), "zone unmanned at tick {t}");
            for &id in &pool.maintenance {
                let a = store.get(id).unwrap();
                assert_eq!(a.location, a.base);
            }
            if t == 6 {
                // Agent 0 called for relief at (20, 0) with 40 left.
                assert_eq!(pool.active, vec![AgentId(0), AgentId(1)]);
            }
            if t == 9 {
                assert_eq!(pool.active, vec![AgentId(1)]);
                assert_eq!(pool.maintenance, vec![AgentId(0)]);
            }
        }
        // Two agents are enough to keep one zone on this short route.
        assert!(fleet.pool(ModelId(0)).unwrap().inactive.contains(&AgentId(2)));
    }
}

#[cfg(test)]
mod transit {
    use ps_core::{AgentId, ModelId, Point, Tick};

    use super::helpers::smuggler;
    use crate::{Fleet, FleetError};

    #[test]
    fn crossing_ends_at_exit_and_recirculates() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[smuggler(1)], Point::ORIGIN, Point::ORIGIN, 1);
        let pool = fleet.pool_mut(ModelId(0)).unwrap();
        let id = pool.enter(&mut store, Point::new(100.0, 0.0), Tick(0)).unwrap().unwrap();

        for t in 0..3_u64 {
            assert!(pool.transit_phase(&mut store, Tick(t), 1.0).unwrap().is_empty());
        }
        assert_eq!(store.get(id).unwrap().location, Point::new(25.0, 0.0));

        let events = pool.transit_phase(&mut store, Tick(3), 1.0).unwrap();
        assert_eq!(events.len(), 1);
        assert!(!events[0].detected);
        assert_eq!(events[0].time_in_system, 3.0);
        assert_eq!(pool.maintenance, vec![id]);

        pool.maintenance_phase(&mut store, 1.0).unwrap();
        assert_eq!(pool.inactive, vec![id]);
    }

    #[test]
    fn entry_without_inactive_traveller_is_skipped() {
        let (mut fleet, mut store, _) = Fleet::from_models(&[smuggler(1)], Point::ORIGIN, Point::ORIGIN, 1);
        let pool = fleet.pool_mut(ModelId(0)).unwrap();
        assert!(pool.enter(&mut store, Point::new(100.0, 0.0), Tick(0)).unwrap().is_some());
        assert!(pool.enter(&mut store, Point::new(100.0, 5.0), Tick(0)).unwrap().is_none());
        pool.check_conservation().unwrap();
    }

    #[test]
    fn detected_traveller_is_withdrawn() {
        let exit = Point::new(-100.0, 0.0);
        let (mut fleet, mut store, _) = Fleet::from_models(&[smuggler(2)], Point::ORIGIN, exit, 1);
        let pool = fleet.pool_mut(ModelId(0)).unwrap();
        let id = pool.enter(&mut store, Point::new(400.0, 0.0), Tick(2)).unwrap().unwrap();

        let ev = pool.withdraw(&mut store, id, AgentId(9), Tick(5), 1.0).unwrap();
        assert!(ev.detected);
        assert_eq!(ev.detected_by, Some(AgentId(9)));
        assert_eq!(ev.time_in_system, 3.0);
        assert!(pool.active.is_empty());
        assert!(pool.inactive.contains(&id));
        assert_eq!(store.get(id).unwrap().location, exit);

        let again = pool.withdraw(&mut store, id, AgentId(9), Tick(5), 1.0).unwrap_err();
        assert!(matches!(again, FleetError::NotActive { .. }));
    }
}
