//! Tests for the method catalogue, shared search context and engine dispatch

#[cfg(test)]
mod tests {
    use hamcycle_adjacency::algorithm::search::{
        Decomposition, Method, SearchContext, Strategy, Verdict, decide, decide_on,
    };
    use hamcycle_adjacency::algorithm::timeout::{Deadline, Timeout, TimeoutGuard};
    use hamcycle_adjacency::analysis::hamiltonian::is_hamiltonian_cycle;
    use hamcycle_adjacency::graph::edge_state::Color;
    use hamcycle_adjacency::graph::multigraph::{
        EdgeId, EdgeSet, Multigraph, Orientation, cycle_edge_set,
    };
    use std::time::{Duration, Instant};

    fn lapsed() -> Deadline {
        let started = Instant::now().checked_sub(Duration::from_secs(1)).unwrap();
        Deadline::new(started, Duration::from_millis(1))
    }

    fn assert_valid(decomposition: &Decomposition, x: &[usize], y: &[usize]) {
        let n = x.len();
        let orientation = decomposition.orientation;
        assert!(is_hamiltonian_cycle(&decomposition.z, n, orientation));
        assert!(is_hamiltonian_cycle(&decomposition.w, n, orientation));

        let mut ids: Vec<EdgeId> = decomposition
            .z_edges
            .iter()
            .chain(&decomposition.w_edges)
            .copied()
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..2 * n).map(EdgeId).collect::<Vec<_>>());

        for pairs in [&decomposition.z, &decomposition.w] {
            let set: EdgeSet = pairs
                .iter()
                .map(|&(a, b)| orientation.normalize(a, b))
                .collect();
            assert_ne!(set, cycle_edge_set(orientation, x));
            assert_ne!(set, cycle_edge_set(orientation, y));
        }
    }

    // Tests methods are numbered as on the command line
    // Verified by reordering the method table
    #[test]
    fn test_method_numbering() {
        for (index, method) in Method::ALL.iter().enumerate() {
            assert_eq!(method.index(), index);
            assert_eq!(Method::from_index(index), Some(*method));
        }
        assert_eq!(Method::from_index(4), None);

        let first = Method::ALL.first().copied();
        assert_eq!(
            first,
            Some(Method::new(Orientation::Directed, Strategy::SimplePath))
        );
        assert_eq!(
            Method::from_index(3),
            Some(Method::new(Orientation::Undirected, Strategy::ChainFixing))
        );
    }

    // Tests method titles used in reports and warnings
    // Verified by dropping the orientation from the title
    #[test]
    fn test_method_titles() {
        assert_eq!(
            Method::new(Orientation::Directed, Strategy::SimplePath).title(),
            "Simple path for directed cycles"
        );
        assert_eq!(
            Method::new(Orientation::Undirected, Strategy::ChainFixing).to_string(),
            "Chain edge fixing for undirected cycles"
        );
        assert_eq!(Strategy::ChainFixing.label(), "Chain edge fixing");
    }

    // Tests both strategies find a valid decomposition of K5
    // Verified by accepting colourings equal to an input cycle
    #[test]
    fn test_decide_undirected_k5() {
        let x = [1, 2, 3, 4, 5];
        let y = [1, 3, 5, 2, 4];
        for strategy in [Strategy::SimplePath, Strategy::ChainFixing] {
            let method = Method::new(Orientation::Undirected, strategy);
            let verdict = decide(method, &x, &y, TimeoutGuard::unbounded()).unwrap();

            let decomposition = verdict.decomposition().unwrap();
            assert_valid(decomposition, &x, &y);
            assert!(verdict.is_decomposable());
        }
    }

    // Tests a directed pair with a known decomposition
    // Verified by reversing the direction of W edges
    #[test]
    fn test_decide_directed_decomposable() {
        let x = [1, 3, 5, 4, 6, 2];
        let y = [1, 5, 2, 4, 3, 6];
        for strategy in [Strategy::SimplePath, Strategy::ChainFixing] {
            let method = Method::new(Orientation::Directed, strategy);
            let verdict = decide(method, &x, &y, TimeoutGuard::unbounded()).unwrap();

            assert_valid(verdict.decomposition().unwrap(), &x, &y);
        }
    }

    // Tests pairs without a different decomposition are refuted
    // Verified by accepting the input cycles as output
    #[test]
    fn test_decide_not_decomposable() {
        let cases: [(&[usize], &[usize], Orientation); 4] = [
            (&[1, 2, 3], &[1, 3, 2], Orientation::Directed),
            (&[1, 2, 3], &[1, 3, 2], Orientation::Undirected),
            (&[1, 2, 3, 4], &[1, 3, 2, 4], Orientation::Undirected),
            (&[1, 2, 3, 4, 5], &[1, 3, 5, 2, 4], Orientation::Directed),
        ];
        for (x, y, orientation) in cases {
            for strategy in [Strategy::SimplePath, Strategy::ChainFixing] {
                let method = Method::new(orientation, strategy);
                assert_eq!(
                    decide(method, x, y, TimeoutGuard::unbounded()),
                    Ok(Verdict::NotDecomposable),
                    "{method} on {x:?} / {y:?}"
                );
            }
        }
    }

    // Tests degenerate multigraphs are refuted without searching
    // Verified by removing the degree check
    #[test]
    fn test_decide_on_degenerate_graphs() {
        let tiny = Multigraph::from_cycles(Orientation::Undirected, &[1, 2], &[2, 1]);
        let broken = Multigraph::from_cycles(Orientation::Directed, &[1, 2, 7], &[1, 3, 2]);
        let expired = TimeoutGuard::new(Some(lapsed()), None);

        for strategy in [Strategy::SimplePath, Strategy::ChainFixing] {
            assert_eq!(
                decide_on(&tiny, strategy, expired),
                Ok(Verdict::NotDecomposable)
            );
            assert_eq!(
                decide_on(&broken, strategy, expired),
                Ok(Verdict::NotDecomposable)
            );
        }
    }

    // Tests expired deadlines abort both strategies with the right reason
    // Verified by skipping the guard check on entry
    #[test]
    fn test_decide_reports_timeouts() {
        let x = [1, 2, 3, 4, 5];
        let y = [1, 3, 5, 2, 4];
        let single = TimeoutGuard::new(Some(lapsed()), None);
        let batch = TimeoutGuard::new(None, Some(lapsed()));

        for method in Method::ALL {
            assert_eq!(decide(method, &x, &y, single), Err(Timeout::SingleTest));
            assert_eq!(decide(method, &x, &y, batch), Err(Timeout::AllTests));
        }
    }

    // Tests context predicates on empty and complete colourings
    // Verified by accepting a colouring equal to X
    #[test]
    fn test_search_context_predicates() {
        let graph = Multigraph::from_cycles(Orientation::Directed, &[1, 2, 3, 4], &[1, 3, 2, 4]);
        let mut ctx = SearchContext::new(&graph, TimeoutGuard::unbounded());

        assert_eq!(ctx.vertex_count(), 4);
        assert_eq!(ctx.orientation(), Orientation::Directed);
        assert!(!ctx.is_complete());
        assert!(!ctx.accepts_closure());
        assert!(ctx.pairs(Color::Z).is_empty());
        assert!(!ctx.has_premature_cycle(Color::Z));
        assert_eq!(ctx.enter(), Ok(()));
        assert_eq!(ctx.stats.nodes, 1);

        for i in 0..8 {
            let color = if i < 4 { Color::Z } else { Color::W };
            ctx.tracker.fix(EdgeId(i), color);
        }
        assert!(ctx.is_complete());
        assert!(!ctx.accepts_closure());
        assert_eq!(ctx.decomposition().z, vec![(1, 2), (2, 3), (3, 4), (4, 1)]);
    }

    // Tests a short cycle in one colour is flagged as premature
    // Verified by ignoring the length bound
    #[test]
    fn test_premature_cycle() {
        let graph = Multigraph::from_cycles(Orientation::Directed, &[1, 2, 3, 4], &[2, 1, 4, 3]);
        let mut ctx = SearchContext::new(&graph, TimeoutGuard::unbounded());

        ctx.tracker.fix(EdgeId(0), Color::W);
        ctx.tracker.fix(EdgeId(4), Color::W);
        assert_eq!(ctx.pairs(Color::W), vec![(1, 2), (2, 1)]);
        assert!(ctx.has_premature_cycle(Color::W));
        assert!(!ctx.has_premature_cycle(Color::Z));
    }

    // Tests decomposition orders start at vertex one
    // Verified by returning edges in arena order
    #[test]
    fn test_decomposition_orders() {
        let method = Method::new(Orientation::Undirected, Strategy::ChainFixing);
        let verdict = decide(
            method,
            &[1, 2, 3, 4, 5],
            &[1, 3, 5, 2, 4],
            TimeoutGuard::unbounded(),
        )
        .unwrap();
        let decomposition = verdict.decomposition().unwrap();

        for order in [decomposition.z_order(), decomposition.w_order()] {
            let order = order.unwrap();
            assert_eq!(order.len(), 5);
            assert_eq!(order.first(), Some(&1));
        }
    }
}
