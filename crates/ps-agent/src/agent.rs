//! The agent record and its lifecycle state machine.
//!
//! An agent is always in exactly one of three states, mirrored by the fleet
//! pool that holds its id:
//!
//! ```text
//!  inactive ──activate──▶ active ──(arrives at base while returning)──▶ maintenance
//!     ▲                                                                    │
//!     └────────────────────(maintenance timer reaches zero)────────────────┘
//! ```
//!
//! Endurance is a distance budget.  It shrinks by the distance actually
//! travelled and is restored in full when maintenance completes.

use tracing::debug;

use ps_core::{AgentId, ModelId, OperatingDomain, Point, Signature, SkillLevel, Tick, ZoneId};
use ps_spatial::Route;

use crate::{AgentError, AgentResult};

/// Waypoints one agent may consume in a single movement call before the
/// route is declared degenerate.
pub const MAX_ROUTE_HOPS: u32 = 1_000;

// ── Role ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Searcher { skill: SkillLevel, domain: OperatingDomain },
    Traveller { air: Signature, surface: Signature },
}

impl Role {
    #[inline]
    pub fn is_searcher(self) -> bool {
        matches!(self, Role::Searcher { .. })
    }
}

/// What a movement call ended with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The travel budget was spent (or the route is empty).
    CompletedTurn,
    /// The agent reached its base while returning and is now in maintenance.
    EnteredBase,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:                    AgentId,
    pub model:                 ModelId,
    pub endurance:             f64,
    pub remaining_endurance:   f64,
    pub speed:                 f64,
    pub maintenance_time:      f64,
    pub remaining_maintenance: f64,
    pub base:                  Point,
    pub location:              Point,
    pub route:                 Route,
    pub zone:                  Option<ZoneId>,
    pub returning:             bool,
    pub called_replacement:    bool,
    pub role:                  Role,
    /// Tick of the latest activation.
    pub deployed_at:           Tick,
}

impl Agent {
    /// A fresh agent parked at `base` with full endurance.
    pub fn new(
        id: AgentId,
        model: ModelId,
        endurance: f64,
        speed: f64,
        maintenance_time: f64,
        base: Point,
        role: Role,
    ) -> Self {
        Self {
            id,
            model,
            endurance,
            remaining_endurance: endurance,
            speed,
            maintenance_time,
            remaining_maintenance: 0.0,
            base,
            location: base,
            route: Route::default(),
            zone: None,
            returning: false,
            called_replacement: false,
            role,
            deployed_at: Tick::ZERO,
        }
    }

    #[inline]
    pub fn is_searcher(&self) -> bool {
        self.role.is_searcher()
    }

    #[inline]
    pub fn distance_to_base(&self) -> f64 {
        self.location.euclidean(self.base)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Take over `route` for `zone` and start moving at once.
    ///
    /// The route is the agent's own copy; cycling it never affects the
    /// zone's template or any other agent.
    pub fn activate(&mut self, zone: Option<ZoneId>, route: Route, dt: f64) -> AgentResult<MoveOutcome> {
        debug!(agent = %self.id, zone = ?zone, "activate");
        self.zone = zone;
        self.route = route;
        self.returning = false;
        self.called_replacement = false;
        self.move_through_route(dt)
    }

    /// Spend this tick's travel budget (`speed × dt`) along the route.
    ///
    /// A waypoint farther away than the remaining budget is approached by
    /// linear interpolation; a reachable one is consumed (cycled to the back)
    /// and travel continues with the leftover.  Landing on the base while
    /// returning ends the call with [`MoveOutcome::EnteredBase`].
    pub fn move_through_route(&mut self, dt: f64) -> AgentResult<MoveOutcome> {
        let mut budget = self.speed * dt;
        let mut hops = 0_u32;

        while budget > 0.0 {
            let Some(goal) = self.route.next_point() else {
                break;
            };
            let gap = self.location.euclidean(goal);

            if gap > budget {
                self.location = self.location.step_toward(goal, budget);
                self.remaining_endurance -= budget;
                budget = 0.0;
            } else {
                self.location = goal;
                self.remaining_endurance -= gap;
                budget -= gap;
                if self.returning && goal == self.base {
                    self.enter_base();
                    return Ok(MoveOutcome::EnteredBase);
                }
                self.route.cycle();
            }

            hops += 1;
            if hops > MAX_ROUTE_HOPS {
                return Err(AgentError::Convergence {
                    agent:    self.id,
                    location: self.location,
                    route:    self.route.to_vec(),
                });
            }
        }
        Ok(MoveOutcome::CompletedTurn)
    }

    /// Head straight home.  Calling it again while returning changes nothing.
    pub fn return_to_base(&mut self) {
        if self.returning {
            return;
        }
        debug!(agent = %self.id, remaining = self.remaining_endurance, "return to base");
        self.returning = true;
        self.route = Route::single(self.base);
    }

    /// Arrive home and start the maintenance timer.
    pub fn enter_base(&mut self) {
        debug!(agent = %self.id, maintenance = self.maintenance_time, "entered base");
        self.location = self.base;
        self.remaining_maintenance = self.maintenance_time;
        self.returning = false;
        self.called_replacement = false;
        self.route.clear();
        self.zone = None;
    }

    /// Pull the agent out of play without a maintenance stop, e.g. a
    /// traveller that was detected.  It is parked at base, ready to redeploy.
    pub fn recall(&mut self) {
        debug!(agent = %self.id, at = %self.location, "recalled");
        self.location = self.base;
        self.remaining_endurance = self.endurance;
        self.remaining_maintenance = 0.0;
        self.returning = false;
        self.called_replacement = false;
        self.route.clear();
        self.zone = None;
    }

    /// Count maintenance down by `dt`, floored at zero.  Returns `true` once
    /// the timer is exhausted; endurance is then restored in full.
    pub fn update_maintenance(&mut self, dt: f64) -> bool {
        self.remaining_maintenance = (self.remaining_maintenance - dt).max(0.0);
        if self.remaining_maintenance == 0.0 {
            self.remaining_endurance = self.endurance;
            true
        } else {
            false
        }
    }

    // ── Triggers ──────────────────────────────────────────────────────────

    /// Turn for home when `remaining_endurance < (1 + margin) × distance_to_base`.
    /// Returns `true` only on the call that starts the return.
    pub fn check_if_need_to_return(&mut self, margin: f64) -> bool {
        if self.returning {
            return false;
        }
        if self.remaining_endurance < (1.0 + margin) * self.distance_to_base() {
            self.return_to_base();
            return true;
        }
        false
    }

    /// Latches once per sortie when
    /// `remaining_endurance < (2 + margin) × distance_to_base`.
    pub fn check_if_need_replacement(&mut self, margin: f64) -> bool {
        if self.called_replacement {
            return false;
        }
        if self.remaining_endurance < (2.0 + margin) * self.distance_to_base() {
            debug!(agent = %self.id, zone = ?self.zone, "replacement requested");
            self.called_replacement = true;
            return true;
        }
        false
    }

    /// An agent with maintenance left must be sitting at its base.
    pub fn check_base_invariant(&self) -> AgentResult<()> {
        if self.remaining_maintenance > 0.0 && self.location != self.base {
            return Err(AgentError::OutOfBase {
                agent:     self.id,
                location:  self.location,
                base:      self.base,
                remaining: self.remaining_maintenance,
            });
        }
        Ok(())
    }
}
