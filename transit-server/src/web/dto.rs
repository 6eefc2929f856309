//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ItineraryStep, Preference, RouteResult};
use crate::network::TimeProfile;
use crate::planner::{Comparison, JourneyPlan, SolverKind};
use crate::stops::StopMatch;

/// Query for stop name autocomplete.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search query
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StopSearchResult {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<StopMatch> for StopSearchResult {
    fn from(m: StopMatch) -> Self {
        Self {
            name: m.name,
            lon: m.location.x(),
            lat: m.location.y(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopSearchResult>,
}

/// Request to plan a journey.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Origin stop name
    pub origin: String,

    /// Destination stop name
    pub destination: String,

    /// Departure in HH:MM format (defaults to now)
    pub departure: Option<String>,

    /// Preference name or alias (defaults to balanced)
    pub preference: Option<String>,

    /// Solver to run (defaults to exact)
    pub solver: Option<SolverKind>,
}

/// Explicit objective weights.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsRequest {
    pub time: f64,
    pub cost: f64,
    pub transit: f64,
}

/// Request to run both solvers on one trip.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub origin: String,
    pub destination: String,

    /// Departure in HH:MM format (defaults to now)
    pub departure: Option<String>,

    /// Preference name or alias; ignored when `weights` is set
    pub preference: Option<String>,

    pub weights: Option<WeightsRequest>,
}

#[derive(Debug, Serialize)]
pub struct NodeResult {
    pub stop: String,
    pub corridor: String,
}

/// One itinerary step.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepResult {
    Travel {
        corridor: String,
        from: String,
        to: String,
        via: Vec<String>,
        from_coord: Option<[f64; 2]>,
        to_coord: Option<[f64; 2]>,
    },
    Transfer {
        stop: String,
        from_corridor: String,
        to_corridor: String,
        coord: Option<[f64; 2]>,
    },
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub path: Vec<NodeResult>,
    pub itinerary: Vec<StepResult>,
    pub total_time_minutes: f64,
    pub total_distance_km: f64,
    pub transit_count: u32,
    pub cost: f64,

    /// `[lon, lat]` pairs for drawing the route
    pub coordinates: Vec<[f64; 2]>,

    /// Set when the route is drawn as straight lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_fallback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OriginResult {
    pub stop: String,
    pub walk_distance_km: f64,
    pub walk_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub route: RouteResponse,
    pub origin: OriginResult,
    pub initial_wait_minutes: f64,
    pub ride_minutes: f64,
    pub total_minutes: f64,
    pub congested_minutes: f64,
    pub fare: u32,
    pub preference: Preference,
    pub departure: String,
    pub time_profile: &'static str,
    pub solver: SolverKind,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub exact: RouteResponse,
    pub exact_ms: f64,
    pub slime_mould: RouteResponse,
    pub slime_mould_ms: f64,

    /// Percent by which the metaheuristic cost exceeds the optimum
    pub gap_percent: Option<f64>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

fn pair(c: geo::Coord<f64>) -> [f64; 2] {
    [c.x, c.y]
}

impl From<&ItineraryStep> for StepResult {
    fn from(step: &ItineraryStep) -> Self {
        match step {
            ItineraryStep::Travel(seg) => StepResult::Travel {
                corridor: seg.corridor.to_string(),
                from: seg.from.clone(),
                to: seg.to.clone(),
                via: seg.via.clone(),
                from_coord: seg.from_coord.map(pair),
                to_coord: seg.to_coord.map(pair),
            },
            ItineraryStep::Transfer(t) => StepResult::Transfer {
                stop: t.stop.clone(),
                from_corridor: t.from_corridor.to_string(),
                to_corridor: t.to_corridor.to_string(),
                coord: t.coord.map(pair),
            },
        }
    }
}

impl RouteResponse {
    pub fn from_route(route: &RouteResult) -> Self {
        Self {
            path: route
                .path
                .iter()
                .map(|n| NodeResult {
                    stop: n.stop().to_string(),
                    corridor: n.corridor().to_string(),
                })
                .collect(),
            itinerary: route.itinerary.iter().map(StepResult::from).collect(),
            total_time_minutes: route.total_time_hours * 60.0,
            total_distance_km: route.total_distance_km,
            transit_count: route.transit_count,
            cost: route.cost,
            coordinates: route.display_coordinates.iter().copied().map(pair).collect(),
            projection_fallback: route.projection_fallback.clone(),
        }
    }
}

impl JourneyResponse {
    pub fn from_plan(plan: &JourneyPlan) -> Self {
        Self {
            route: RouteResponse::from_route(&plan.route),
            origin: OriginResult {
                stop: plan.origin.stop.clone(),
                walk_distance_km: plan.origin.distance_km,
                walk_minutes: plan.origin.walk_minutes,
            },
            initial_wait_minutes: plan.initial_wait_minutes,
            ride_minutes: plan.ride_minutes,
            total_minutes: plan.total_minutes,
            congested_minutes: plan.congested_minutes,
            fare: plan.fare,
            preference: plan.preference,
            departure: plan.departure.to_string(),
            time_profile: TimeProfile::for_departure(&plan.departure).as_str(),
            solver: plan.solver,
        }
    }
}

impl CompareResponse {
    pub fn from_comparison(cmp: &Comparison) -> Self {
        Self {
            exact: RouteResponse::from_route(&cmp.exact),
            exact_ms: cmp.exact_elapsed.as_secs_f64() * 1000.0,
            slime_mould: RouteResponse::from_route(&cmp.slime),
            slime_mould_ms: cmp.slime_elapsed.as_secs_f64() * 1000.0,
            gap_percent: cmp.gap_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CorridorId, Departure, Node, TransferStep, TravelSegment};
    use crate::walkable::WalkOrigin;
    use geo::Coord;

    fn corridor(s: &str) -> CorridorId {
        CorridorId::parse(s).unwrap()
    }

    fn make_route() -> RouteResult {
        let mut ride = TravelSegment::new(corridor("1"), "Kota");
        ride.to = "Harmoni".into();
        ride.via = vec!["Glodok".into()];
        ride.from_coord = Some(Coord { x: 106.81, y: -6.13 });

        RouteResult {
            path: vec![
                Node::new("Kota", corridor("1")),
                Node::new("Glodok", corridor("1")),
                Node::new("Harmoni", corridor("1")),
                Node::new("Harmoni", corridor("2")),
            ],
            itinerary: vec![
                ItineraryStep::Travel(ride),
                ItineraryStep::Transfer(TransferStep {
                    stop: "Harmoni".into(),
                    from_corridor: corridor("1"),
                    to_corridor: corridor("2"),
                    coord: None,
                }),
            ],
            total_time_hours: 0.5,
            total_distance_km: 4.2,
            transit_count: 1,
            cost: 0.675,
            display_coordinates: vec![Coord { x: 106.81, y: -6.13 }, Coord { x: 106.82, y: -6.16 }],
            projection_fallback: None,
        }
    }

    #[test]
    fn route_response_from_route() {
        let response = RouteResponse::from_route(&make_route());

        assert_eq!(response.path.len(), 4);
        assert_eq!(response.path[3].corridor, "2");
        assert_eq!(response.total_time_minutes, 30.0);
        assert_eq!(response.coordinates[0], [106.81, -6.13]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["itinerary"][0]["type"], "travel");
        assert_eq!(json["itinerary"][0]["via"][0], "Glodok");
        assert_eq!(json["itinerary"][1]["type"], "transfer");
        assert_eq!(json["itinerary"][1]["coord"], serde_json::Value::Null);
        assert!(json.get("projection_fallback").is_none());
    }

    #[test]
    fn journey_response_fields() {
        let plan = JourneyPlan {
            route: make_route(),
            origin: WalkOrigin::direct("Kota"),
            initial_wait_minutes: 5.0,
            ride_minutes: 30.0,
            total_minutes: 35.0,
            congested_minutes: 54.0,
            fare: 2000,
            preference: Preference::MinTransit,
            departure: Departure::from_hm(6, 30).unwrap(),
            solver: SolverKind::SlimeMould,
        };

        let json = serde_json::to_value(JourneyResponse::from_plan(&plan)).unwrap();
        assert_eq!(json["departure"], "06:30");
        assert_eq!(json["fare"], 2000);
        assert_eq!(json["preference"], "min_transit");
        assert_eq!(json["solver"], "slime_mould");
        assert_eq!(json["time_profile"], "normal");
        assert_eq!(json["origin"]["walk_minutes"], 0.0);
    }

    #[test]
    fn plan_request_defaults() {
        let req: PlanRouteRequest =
            serde_json::from_str(r#"{"origin": "Kota", "destination": "Blok M"}"#).unwrap();
        assert!(req.departure.is_none());
        assert!(req.solver.is_none());

        let req: PlanRouteRequest = serde_json::from_str(
            r#"{"origin": "Kota", "destination": "Blok M", "solver": "sma", "preference": "cepat"}"#,
        )
        .unwrap();
        assert_eq!(req.solver, Some(SolverKind::SlimeMould));
        assert_eq!(req.preference.as_deref(), Some("cepat"));
    }
}
