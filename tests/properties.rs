use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use dogs_mapcolor::color::{checker, CheckerResult, Graph};
use dogs_mapcolor::geometry::{Point, Segment};
use dogs_mapcolor::planar::generate_planar_graph;
use dogs_mapcolor::search::{solve, solve_min_conflicts};

fn unit() -> impl Strategy<Value = f64> { 0.0f64..1.0 }

fn point() -> impl Strategy<Value = Point> {
    (unit(), unit()).prop_map(|(x,y)| Point::new(x, y))
}

fn assert_planar(g:&Graph) -> Result<(), TestCaseError> {
    let edges = g.edges();
    for (i,(a,b)) in edges.iter().enumerate() {
        for (c,d) in edges.iter().skip(i+1) {
            prop_assert!(!g.segment(*a, *b).intersects(&g.segment(*c, *d)));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn intersection_is_symmetric(p1 in point(), p2 in point(), p3 in point(), p4 in point()) {
        let a = Segment::new(p1, p2);
        let b = Segment::new(p3, p4);
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn shared_endpoint_never_crosses(p1 in point(), p2 in point(), p3 in point()) {
        prop_assert!(!Segment::new(p1, p2).intersects(&Segment::new(p1, p3)));
        prop_assert!(!Segment::new(p1, p2).intersects(&Segment::new(p3, p2)));
    }

    #[test]
    fn generated_graphs_are_planar(seed in any::<u64>(), n in 1usize..40) {
        let g = generate_planar_graph(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(g.nb_vertices(), n);
        for v in g.vertices() {
            prop_assert!(g.degree(v) <= n-1);
        }
        assert_planar(&g)?;
    }

    #[test]
    fn forward_checking_solutions_are_valid(seed in any::<u64>(), n in 1usize..20, k in 1usize..5) {
        let g = generate_planar_graph(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        let sol = solve(&g, k, "forward_checking").unwrap();
        if sol.found {
            prop_assert!(matches!(checker(&g, &sol.colors, k), CheckerResult::Ok(c) if c <= k));
        } else {
            prop_assert!(sol.colors.iter().all(|c| c.is_none()));
        }
    }

    #[test]
    fn systematic_methods_agree(seed in any::<u64>(), n in 1usize..9, k in 1usize..4) {
        let g = generate_planar_graph(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        let plain = solve(&g, k, "plain").unwrap();
        let fc = solve(&g, k, "forward_checking").unwrap();
        let mac = solve(&g, k, "mac").unwrap();
        prop_assert_eq!(plain.found, fc.found);
        prop_assert_eq!(fc.found, mac.found);
    }

    #[test]
    fn min_conflicts_solutions_are_valid(seed in any::<u64>(), n in 1usize..20, k in 1usize..5) {
        let g = generate_planar_graph(n, &mut StdRng::seed_from_u64(seed)).unwrap();
        let sol = solve_min_conflicts(&g, k, &mut fastrand::Rng::with_seed(seed)).unwrap();
        if sol.found {
            prop_assert!(matches!(checker(&g, &sol.colors, k), CheckerResult::Ok(_)));
            // a coloring found by local search proves that systematic search finds one too
            prop_assert!(solve(&g, k, "mac").unwrap().found);
        }
    }
}

#[test]
fn generated_graphs_are_planar_for_reference_sizes() {
    for (seed, n) in [(11, 5), (12, 20), (13, 100)].iter() {
        let g = generate_planar_graph(*n, &mut StdRng::seed_from_u64(*seed)).unwrap();
        let edges = g.edges();
        for (i,(a,b)) in edges.iter().enumerate() {
            for (c,d) in edges.iter().skip(i+1) {
                assert!(!g.segment(*a, *b).intersects(&g.segment(*c, *d)));
            }
        }
    }
}

#[test]
fn generated_maps_are_four_colorable() {
    for seed in 0..3 {
        let g = generate_planar_graph(25, &mut StdRng::seed_from_u64(seed)).unwrap();
        let sol = solve(&g, 4, "mac").unwrap();
        assert!(sol.found);
        assert_eq!(checker(&g, &sol.colors, 4), CheckerResult::Ok(sol.nb_colors()));
    }
}
