/*!
# Randomized Container Checks

Mirrors random multigraphs against a naive multiplicity matrix and asserts
that the container bookkeeping (edge counts, degrees, adjacency queries)
agrees after insertions and removals. The macro is instantiated once per
orientation mode.
*/

macro_rules! test_graph_ops {
    ($env:ident, $directed:literal) => {
        #[cfg(test)]
        mod $env {
            use crate::{
                edge::NumEdges,
                graph::{Graph, Mode},
            };
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            fn mode() -> Mode {
                if $directed {
                    Mode::new().directed()
                } else {
                    Mode::new()
                }
            }

            /// Random endpoint pairs over labels `0..n`. Duplicates are
            /// kept so parallel instances get exercised.
            fn random_edges<R: Rng>(rng: &mut R, n: i32, m: usize) -> Vec<(i32, i32)> {
                (0..m)
                    .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
                    .collect_vec()
            }

            /// Multiplicity matrix of the edge list, mirrored for the
            /// undirected mode (loops stay single entries).
            fn counts_of(edges: &[(i32, i32)], n: i32) -> Vec<Vec<NumEdges>> {
                let mut counts = vec![vec![0; n as usize]; n as usize];
                for &(u, v) in edges {
                    counts[u as usize][v as usize] += 1;
                    if !$directed && u != v {
                        counts[v as usize][u as usize] += 1;
                    }
                }
                counts
            }

            #[test]
            fn random_insertions_match_mirror() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [10i32, 20, 50] {
                    for m in [n as usize * 2, n as usize * 5] {
                        let edges = random_edges(rng, n, m);

                        let mut graph = Graph::new(mode());
                        for u in 0..n {
                            graph.add_vertex(u);
                        }
                        for &(u, v) in &edges {
                            graph.add_edge(u, v).unwrap();
                        }

                        let counts = counts_of(&edges, n);

                        assert_eq!(graph.number_of_vertices(), n as u32);
                        assert_eq!(graph.number_of_edges(), m as NumEdges);
                        assert_eq!(
                            graph.vertices().map(|v| *v.label()).collect_vec(),
                            (0..n).collect_vec()
                        );

                        for u in 0..n {
                            let row: NumEdges = counts[u as usize].iter().sum();
                            assert_eq!(graph.out_degree_of(&u).unwrap(), row);

                            for v in 0..n {
                                assert_eq!(
                                    graph.contains_edge(&u, &v),
                                    counts[u as usize][v as usize] > 0
                                );
                                assert_eq!(
                                    graph.edges_between(&u, &v).count() as NumEdges,
                                    counts[u as usize][v as usize]
                                );
                            }

                            if $directed {
                                let col: NumEdges =
                                    (0..n).map(|v| counts[v as usize][u as usize]).sum();
                                assert_eq!(graph.in_degree_of(&u).unwrap(), col);
                            }
                        }

                        if $directed {
                            let in_sum: NumEdges =
                                (0..n).map(|u| graph.in_degree_of(&u).unwrap()).sum();
                            assert_eq!(in_sum, graph.number_of_edges());
                        }
                    }
                }
            }

            #[test]
            fn random_removals_match_mirror() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                for n in [10i32, 20, 50] {
                    let edges = random_edges(rng, n, n as usize * 4);

                    let mut graph = Graph::new(mode());
                    for &(u, v) in &edges {
                        graph.add_edge(u, v).unwrap();
                    }
                    let mut counts = counts_of(&edges, n);
                    let mut m = graph.number_of_edges();

                    for _ in 0..(n as usize * 2) {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);

                        let expected = counts[u as usize][v as usize];
                        assert_eq!(graph.remove_edge(&u, &v) as NumEdges, expected);

                        counts[u as usize][v as usize] = 0;
                        if !$directed {
                            counts[v as usize][u as usize] = 0;
                        }
                        m -= expected;
                        assert_eq!(graph.number_of_edges(), m);
                    }

                    for u in 0..n {
                        graph.remove_vertex(&u);
                    }
                    assert!(graph.is_empty());
                    assert_eq!(graph.number_of_edges(), 0);
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
