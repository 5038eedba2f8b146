//! Zone planning: how many zones a searcher model can keep continuously
//! manned given its transit, endurance and maintenance figures.

use ps_config::ModelSpec;

use crate::{FleetError, FleetResult};

/// Zones `spec` can hold concurrently.
///
/// With `ingress = area_width + |base_x|` (base to the far edge):
///
/// ```text
/// downtime = maintenance + 2·ingress / speed
/// uptime   = (endurance − 2·ingress) / speed
/// required = ⌈downtime / uptime⌉ + 1       agents per zone
/// zones    = ⌊quantity / required⌋
/// ```
///
/// A model whose endurance does not even cover the round trip has no
/// uptime and is rejected.
pub fn concurrent_zones(spec: &ModelSpec, area_width: f64, base_x: f64) -> FleetResult<u32> {
    let ingress = area_width + base_x.abs();
    let downtime = spec.maintenance_time + 2.0 * ingress / spec.speed;
    let uptime = (spec.endurance - 2.0 * ingress) / spec.speed;
    if !(uptime > 0.0) {
        return Err(FleetError::NonPositiveUptime { model: spec.name.clone(), uptime });
    }
    let required = (downtime / uptime).ceil() + 1.0;
    Ok((f64::from(spec.quantity) / required).floor() as u32)
}
