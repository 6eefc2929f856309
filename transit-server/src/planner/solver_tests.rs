//! Scenario tests running both solvers end to end.

use super::*;
use crate::domain::{CorridorFeature, CorridorId, ItineraryStep, Node, Preference, StopFeature, Weights};
use crate::network::{GraphParams, TransitGraph, build_graph, edge_cost};
use crate::stops::StopDirectory;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn corridor(s: &str) -> CorridorId {
    CorridorId::parse(s).unwrap()
}

fn node(stop: &str, c: &str) -> Node {
    Node::new(stop, corridor(c))
}

fn weights(time: f64, cost: f64, transit: f64) -> Weights {
    Weights::new(time, cost, transit).unwrap()
}

fn slime_config(seed: u64) -> SlimeConfig {
    SlimeConfig::new(20, 30, 0.03).with_seed(seed)
}

fn empty_directory() -> StopDirectory {
    StopDirectory::from_features(&[])
}

/// A@1 - B@1, transfer B@1 - B@2, B@2 - C@2.
fn three_stops() -> TransitGraph {
    let mut g = TransitGraph::new();
    g.add_travel(&node("A", "1"), &node("B", "1"), 0.2, 2.0);
    g.add_transfer(&node("B", "1"), &node("B", "2"), 5.0 / 60.0);
    g.add_travel(&node("B", "2"), &node("C", "2"), 0.3, 3.0);
    g
}

/// Two parallel corridors over P0..P4 with transfers at every stop.
/// Corridor 1 is quick at the ends, corridor 2 in the middle.
fn ladder() -> TransitGraph {
    let mut g = TransitGraph::new();
    let one = [0.1, 0.6, 0.6, 0.1];
    let two = [0.5, 0.1, 0.1, 0.5];
    for i in 0..4 {
        let (a, b) = (format!("P{i}"), format!("P{}", i + 1));
        g.add_travel(&node(&a, "1"), &node(&b, "1"), one[i], 1.0);
        g.add_travel(&node(&a, "2"), &node(&b, "2"), two[i], 1.0);
    }
    for i in 0..5 {
        let s = format!("P{i}");
        g.add_transfer(&node(&s, "1"), &node(&s, "2"), 0.05);
    }
    g
}

/// Slow direct corridor A-Z, or a quick trip with one change at B.
fn direct_or_change() -> TransitGraph {
    let mut g = TransitGraph::new();
    g.add_travel(&node("A", "1"), &node("Z", "1"), 1.5, 15.0);
    g.add_travel(&node("A", "1"), &node("B", "1"), 0.1, 1.0);
    g.add_transfer(&node("B", "1"), &node("B", "2"), 0.05);
    g.add_travel(&node("B", "2"), &node("Z", "2"), 0.1, 1.0);
    g.add_transfer(&node("Z", "1"), &node("Z", "2"), 0.05);
    g
}

fn edge_sum(g: &TransitGraph, path: &[Node], w: &Weights) -> f64 {
    path.windows(2)
        .map(|pair| {
            let (a, b) = (g.index_of(&pair[0]).unwrap(), g.index_of(&pair[1]).unwrap());
            edge_cost(&pair[0], &pair[1], g.edge_between(a, b).unwrap(), w)
        })
        .sum()
}

// ============================================================================
// Three-node scenario
// ============================================================================

#[test]
fn exact_three_stop_route() {
    let g = three_stops();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);

    let result = planner
        .solve_exact("A", "C", &Preference::Balanced.weights())
        .unwrap();

    assert_eq!(
        result.path,
        vec![node("A", "1"), node("B", "1"), node("B", "2"), node("C", "2")]
    );
    assert_eq!(result.transit_count, 1);
    assert!((result.total_time_hours - (0.5 + 5.0 / 60.0)).abs() < 1e-9);
    assert!((result.total_distance_km - 5.0).abs() < 1e-9);
    assert_eq!(
        result.itinerary.iter().filter(|s| s.is_transfer()).count(),
        1
    );
}

#[test]
fn slime_three_stop_route() {
    let g = three_stops();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let config = slime_config(7);
    let mut rng = config.rng();

    let result = planner
        .solve_metaheuristic("A", "C", &Preference::Balanced.weights(), &config, &mut rng)
        .unwrap();

    assert_eq!(
        result.path,
        vec![node("A", "1"), node("B", "1"), node("B", "2"), node("C", "2")]
    );
    assert_eq!(result.transit_count, 1);
}

// ============================================================================
// Cost model agreement
// ============================================================================

#[test]
fn reported_cost_matches_edge_sum() {
    let g = ladder();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let w = weights(0.6, 0.1, 0.3);

    let exact = planner.solve_exact("P0", "P4", &w).unwrap();
    assert!((exact.cost - edge_sum(&g, &exact.path, &w)).abs() < 1e-9);

    // Transfer penalties alone account for the transit term.
    let penalties = edge_sum(&g, &exact.path, &weights(0.0, 0.0, 1.0));
    assert!((penalties - f64::from(exact.transit_count)).abs() < 1e-9);
}

#[test]
fn exact_never_worse_than_slime() {
    let g = ladder();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let w = weights(0.6, 0.1, 0.3);

    let exact = planner.solve_exact("P0", "P4", &w).unwrap();
    for seed in 0..5 {
        let config = slime_config(seed);
        let mut rng = config.rng();
        let slime = planner
            .solve_metaheuristic("P0", "P4", &w, &config, &mut rng)
            .unwrap();
        assert!(exact.cost <= slime.cost + 1e-9, "seed {seed}");
    }
}

#[test]
fn ladder_optimum_uses_both_corridors() {
    let g = ladder();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);

    // Time-only: 0.1 + 0.05 + 0.1 + 0.1 + 0.05 + 0.1 = 0.5 beats 1.4 or 1.2.
    let result = planner.solve_exact("P0", "P4", &weights(1.0, 0.0, 0.0)).unwrap();
    assert!((result.cost - 0.5).abs() < 1e-9);
    assert_eq!(result.transit_count, 2);
}

#[test]
fn exact_cost_is_deterministic() {
    let g = ladder();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let w = Preference::Balanced.weights();

    let first = planner.solve_exact("P0", "P4", &w).unwrap();
    for _ in 0..3 {
        let again = planner.solve_exact("P0", "P4", &w).unwrap();
        assert!((again.cost - first.cost).abs() < 1e-12);
    }
}

// ============================================================================
// Preferences
// ============================================================================

#[test]
fn transit_weight_avoids_changes() {
    let g = direct_or_change();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);

    let min_transit = planner
        .solve_exact("A", "Z", &weights(0.1, 0.1, 0.8))
        .unwrap();
    assert_eq!(min_transit.transit_count, 0);
    assert_eq!(min_transit.path, vec![node("A", "1"), node("Z", "1")]);

    let fastest = planner
        .solve_exact("A", "Z", &Preference::Fastest.weights())
        .unwrap();
    assert_eq!(fastest.transit_count, 1);
    assert!(fastest.total_time_hours < min_transit.total_time_hours);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn disconnected_components_fail() {
    let mut g = TransitGraph::new();
    g.add_travel(&node("A", "1"), &node("B", "1"), 0.1, 1.0);
    g.add_travel(&node("C", "2"), &node("D", "2"), 0.1, 1.0);
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let w = Preference::Balanced.weights();

    assert!(matches!(
        planner.solve_exact("A", "D", &w),
        Err(RouteError::NoFeasibleSolution(_))
    ));

    let config = slime_config(3);
    let mut rng = config.rng();
    assert!(matches!(
        planner.solve_metaheuristic("A", "D", &w, &config, &mut rng),
        Err(RouteError::NoFeasibleSolution(_))
    ));
}

#[test]
fn unknown_stops_are_reported_by_role() {
    let g = three_stops();
    let d = empty_directory();
    let planner = RoutePlanner::new(&g, &d, &[]);
    let w = Preference::Balanced.weights();

    let err = planner.solve_exact("Nowhere", "C", &w).unwrap_err();
    assert_eq!(
        err,
        RouteError::EndpointNotFound {
            role: Endpoint::Origin,
            stop: "Nowhere".to_string()
        }
    );

    let config = slime_config(1);
    let mut rng = config.rng();
    let err = planner
        .solve_metaheuristic("A", "Nowhere", &w, &config, &mut rng)
        .unwrap_err();
    assert!(matches!(
        err,
        RouteError::EndpointNotFound {
            role: Endpoint::Destination,
            ..
        }
    ));
}

// ============================================================================
// Built network with geometry
// ============================================================================

fn crossing() -> (Vec<StopFeature>, Vec<CorridorFeature>) {
    let stops = vec![
        StopFeature::new("West", 106.80, -6.20),
        StopFeature::new("Centre", 106.82, -6.20),
        StopFeature::new("East", 106.84, -6.20),
        StopFeature::new("North", 106.82, -6.18),
        StopFeature::new("South", 106.82, -6.22),
    ];
    let corridors = vec![
        CorridorFeature::new(
            corridor("1"),
            &[(106.80, -6.20), (106.82, -6.20), (106.84, -6.20)],
        ),
        CorridorFeature::new(
            corridor("2"),
            &[(106.82, -6.22), (106.82, -6.20), (106.82, -6.18)],
        ),
    ];
    (stops, corridors)
}

#[test]
fn built_network_route_with_geometry() {
    let (stops, corridors) = crossing();
    let g = build_graph(&stops, &corridors, &GraphParams::default()).unwrap();
    let d = StopDirectory::from_features(&stops);
    let planner = RoutePlanner::new(&g, &d, &corridors);

    let result = planner
        .solve_exact("West", "North", &Preference::Balanced.weights())
        .unwrap();

    assert_eq!(
        result.path,
        vec![
            node("West", "1"),
            node("Centre", "1"),
            node("Centre", "2"),
            node("North", "2"),
        ]
    );
    assert_eq!(result.transit_count, 1);
    assert!(result.projection_fallback.is_none());

    let coords: Vec<(f64, f64)> = result.display_coordinates.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(
        coords,
        vec![(106.80, -6.20), (106.82, -6.20), (106.82, -6.18)]
    );

    match &result.itinerary[1] {
        ItineraryStep::Transfer(t) => assert_eq!(t.stop, "Centre"),
        other => panic!("expected transfer, got {other:?}"),
    }
}

#[test]
fn comparison_on_built_network() {
    let (stops, corridors) = crossing();
    let g = build_graph(&stops, &corridors, &GraphParams::default()).unwrap();
    let d = StopDirectory::from_features(&stops);
    let planner = RoutePlanner::new(&g, &d, &corridors);
    let config = slime_config(42);
    let mut rng = StdRng::seed_from_u64(42);

    let cmp = compare_solvers(
        &planner,
        "West",
        "South",
        &Preference::Balanced.weights(),
        &config,
        &mut rng,
    )
    .unwrap();

    assert!(cmp.exact.cost <= cmp.slime.cost + 1e-9);
    let gap = cmp.gap_percent.unwrap();
    assert!(gap >= -1e-6);
}

// ============================================================================
// Properties
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Accepted slime-mould paths follow edges, never repeat a node and
        /// cost no less than the exact optimum.
        #[test]
        fn slime_paths_are_valid(seed in any::<u64>(), time in 0.0f64..1.0, transit in 0.0f64..1.0) {
            let g = ladder();
            let d = empty_directory();
            let planner = RoutePlanner::new(&g, &d, &[]);
            let w = weights(time, 0.1, transit);
            let config = SlimeConfig::new(10, 15, 0.03).with_seed(seed);
            let mut rng = config.rng();

            let slime = planner.solve_metaheuristic("P0", "P4", &w, &config, &mut rng).unwrap();
            let exact = planner.solve_exact("P0", "P4", &w).unwrap();

            let idx: Vec<_> = slime.path.iter().map(|n| g.index_of(n).unwrap()).collect();
            prop_assert!(g.is_walk(&idx));
            let unique: std::collections::HashSet<_> = idx.iter().collect();
            prop_assert_eq!(unique.len(), idx.len());
            prop_assert_eq!(slime.origin_stop(), Some("P0"));
            prop_assert_eq!(slime.destination_stop(), Some("P4"));
            prop_assert!(exact.cost <= slime.cost + 1e-9);
        }
    }
}
