use petgraph::algo::{is_cyclic_directed, toposort};
use proptest::prelude::*;
use retro_core::graph::{Graph, ParseError, is_acyclic, parse, validate};
use retro_core::solve::{Label, solve, solve_traced};

use generators::*;

/// Labels computed independently: walk a petgraph topological order
/// backwards and apply the win/lose rule directly.
fn oracle_labels(graph: &Graph) -> Vec<Label> {
    let digraph = graph.to_digraph();
    let order = toposort(&digraph, None).expect("generated graph is acyclic");
    let mut labels = vec![Label::Lose; graph.node_count()];
    for idx in order.into_iter().rev() {
        let node = idx.index();
        let wins = graph
            .successors(node)
            .iter()
            .any(|&succ| labels[succ] == Label::Lose);
        labels[node] = if wins { Label::Win } else { Label::Lose };
    }
    labels
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn labels_match_oracle((n, edges) in arb_dag()) {
        let graph = parse(&to_text(n, &edges)).expect("generated input parses");
        let expected = oracle_labels(&graph);
        let dag = validate(graph).expect("generated graph is acyclic");
        let labels = solve(&dag);
        prop_assert_eq!(labels.as_slice(), expected.as_slice());
    }

    #[test]
    fn label_rule_holds_at_every_node((n, edges) in arb_dag()) {
        let dag = validate(Graph::from_edges(n, edges).expect("valid")).expect("acyclic");
        let labels = solve(&dag);
        prop_assert_eq!(labels.len(), n);
        for node in dag.graph().nodes() {
            let has_losing_move = dag
                .graph()
                .successors(node)
                .iter()
                .any(|&succ| labels.get(succ) == Some(Label::Lose));
            prop_assert_eq!(labels.get(node) == Some(Label::Win), has_losing_move);
        }
    }

    #[test]
    fn terminals_always_lose((n, edges) in arb_dag()) {
        let dag = validate(Graph::from_edges(n, edges).expect("valid")).expect("acyclic");
        let labels = solve(&dag);
        for node in dag.graph().nodes().filter(|&v| dag.graph().out_degree(v) == 0) {
            prop_assert_eq!(labels.get(node), Some(Label::Lose));
        }
    }

    #[test]
    fn solving_twice_is_stable((n, edges) in arb_dag()) {
        let dag = validate(Graph::from_edges(n, edges).expect("valid")).expect("acyclic");
        let (traced, trace) = solve_traced(&dag);
        prop_assert_eq!(&traced, &solve(&dag));
        prop_assert_eq!(trace.steps.len(), n);

        let mut finalized = trace.finalize_order();
        finalized.sort_unstable();
        prop_assert_eq!(finalized, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn edge_list_reparses_to_same_graph((n, edges) in arb_digraph()) {
        let graph = Graph::from_edges(n, edges).expect("valid");
        let reparsed = parse(&graph.to_edge_list()).expect("serialized graph parses");
        prop_assert_eq!(&reparsed, &graph);
        prop_assert_eq!(reparsed.content_hash(), graph.content_hash());
    }

    #[test]
    fn acyclicity_agrees_with_petgraph((n, edges) in arb_digraph()) {
        let graph = Graph::from_edges(n, edges).expect("valid");
        let cyclic = is_cyclic_directed(&graph.to_digraph());
        prop_assert_eq!(is_acyclic(&graph), !cyclic);

        match validate(graph) {
            Ok(_) => prop_assert!(!cyclic),
            Err(found) => {
                prop_assert!(cyclic);
                prop_assert!(found.cycle.len() >= 3);
                prop_assert_eq!(found.cycle.first(), found.cycle.last());
            }
        }
    }

    #[test]
    fn repeated_edge_is_rejected((n, edges) in arb_dag(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!edges.is_empty());
        let (from, to) = edges[pick.index(edges.len())];
        let mut with_duplicate = edges.clone();
        with_duplicate.push((from, to));

        prop_assert_eq!(
            parse(&to_text(n, &with_duplicate)).unwrap_err(),
            ParseError::DuplicateEdge { from, to }
        );
    }

    #[test]
    fn self_loop_is_rejected((n, edges) in arb_dag(), pick in any::<prop::sample::Index>()) {
        prop_assume!(n > 0);
        let node = pick.index(n);
        let mut with_loop = edges.clone();
        with_loop.push((node, node));

        prop_assert_eq!(
            parse(&to_text(n, &with_loop)).unwrap_err(),
            ParseError::SelfLoop { node }
        );
    }
}
