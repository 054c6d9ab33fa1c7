use treedist::DistError;
use treedist::distance::{AdjacencyMatrix, DistanceMatrix, prune_branches, tree_to_matrix};
use treedist::model::{BranchLength, NodeMap, Tree, VertexIndex};
use treedist::newick::parse_str;

const EPSILON: f64 = 1e-9;

fn leaf_named(tree: &Tree, label: &str) -> VertexIndex {
    tree.leaves()
        .into_iter()
        .find(|&leaf| tree.vertex(leaf).label() == Some(label))
        .unwrap()
}

fn assert_symmetric(matrix: &DistanceMatrix) {
    for &a in matrix.members() {
        for &b in matrix.members() {
            assert_eq!(matrix.get(a, b), matrix.get(b, a));
        }
    }
}

// --- TESTS NODE MAP & ADJACENCY ---
#[test]
fn test_node_map_links() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0);").unwrap();
    let node_map = NodeMap::from_tree(&tree);
    let root = tree.root().index();
    let a = leaf_named(&tree, "A");
    let c = leaf_named(&tree, "C");

    assert_eq!(node_map.len(), tree.num_vertices());
    assert_eq!(node_map.get(root), (None, None));
    assert_eq!(node_map.get(c), (Some(root), Some(4.0)));
    assert_eq!(node_map.get(a).1, Some(1.0));
}

#[test]
fn test_adjacency_is_symmetric() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,(C:4.0,D:0.5,E:0.0):1.5);").unwrap();
    let adjacency = AdjacencyMatrix::from_tree(&tree).unwrap();

    assert_eq!(adjacency.num_vertices(), tree.num_vertices());
    assert_eq!(adjacency.num_edges(), tree.num_vertices() - 1);
    for vertex in 0..tree.num_vertices() {
        for &(neighbour, length) in adjacency.neighbours(vertex) {
            assert_eq!(adjacency.distance(neighbour, vertex), Some(length));
        }
    }
}

#[test]
fn test_missing_branch_length() {
    let tree = parse_str("(A,B);").unwrap();
    let err = AdjacencyMatrix::from_tree(&tree).unwrap_err();
    assert!(matches!(err, DistError::MissingBranchLength { ref vertex } if vertex == "L_A"));
}

// --- TESTS DISTANCE MATRIX ---
#[test]
fn test_star_topology() {
    let tree = parse_str("(A:1.0,B:2.0,C:3.0);").unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    let (a, b, c) = (leaf_named(&tree, "A"), leaf_named(&tree, "B"), leaf_named(&tree, "C"));

    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.get(a, b), Some(3.0));
    assert_eq!(matrix.get(a, c), Some(4.0));
    assert_eq!(matrix.get(b, c), Some(5.0));
    assert_eq!(matrix.get(a, a), None);
    assert!(matrix.is_complete());
}

#[test]
fn test_symmetry_and_direct_edges() {
    let tree = parse_str("(((A:1,B:2):0.5,C:3):1,(D:0.25,E:4):2,F:6);").unwrap();
    let matrix = tree_to_matrix(&tree, true).unwrap();
    assert_symmetric(&matrix);

    // Every parent-child pair has exactly the branch length as distance
    for vertex in tree.vertices() {
        for edge in tree.edges(vertex.index()) {
            let length = edge.branch_length.map(|bl| *bl);
            assert_eq!(matrix.get(vertex.index(), edge.child), length);
        }
    }
}

#[test]
fn test_additivity() {
    let tree = parse_str("(((A:1,B:2):0.5,C:3):1,(D:0.25,E:4):2,F:6);").unwrap();
    let matrix = tree_to_matrix(&tree, true).unwrap();
    let members = matrix.members();

    // d(a,b) <= d(a,c) + d(c,b), with equality where c lies on the path
    for &a in members {
        for &b in members {
            for &c in members {
                if a == b || b == c || a == c {
                    continue;
                }
                let direct = matrix.get(a, b).unwrap();
                let detour = matrix.get(a, c).unwrap() + matrix.get(c, b).unwrap();
                assert!(direct <= detour + EPSILON);
            }
        }
    }

    let (a, b, d) = (leaf_named(&tree, "A"), leaf_named(&tree, "B"), leaf_named(&tree, "D"));
    let parent_of_a = tree.vertex(a).parent().unwrap();
    let via_parent = matrix.get(a, parent_of_a).unwrap() + matrix.get(parent_of_a, b).unwrap();
    assert!((matrix.get(a, b).unwrap() - via_parent).abs() < EPSILON);
    assert!((matrix.get(a, d).unwrap() - 4.75).abs() < EPSILON);
}

#[test]
fn test_row_order_is_text_order() {
    let tree = parse_str("((C:1,A:1):1,B:1);").unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    let labels: Vec<_> = matrix
        .members()
        .iter()
        .map(|&v| tree.vertex(v).label().unwrap())
        .collect();
    assert_eq!(labels, ["C", "A", "B"]);
}

#[test]
fn test_zero_length_branches() {
    let tree = parse_str("((A:0,B:0):0,C:0);").unwrap();
    let matrix = tree_to_matrix(&tree, false).unwrap();
    assert!(matrix.is_complete());
    assert_eq!(matrix.get(leaf_named(&tree, "A"), leaf_named(&tree, "C")), Some(0.0));
}

/// `((...(L0:1,L1:1):1,...):1,L<depth>:1);`, nested `depth` clades deep.
fn caterpillar(depth: usize) -> Tree {
    let mut newick = "(".repeat(depth);
    newick.push_str("L0:1");
    for i in 1..=depth {
        newick.push_str(&format!(",L{i}:1):1"));
    }
    newick.truncate(newick.len() - 2);
    newick.push(';');
    parse_str(&newick).unwrap()
}

#[test]
fn test_deep_caterpillar_adjacency() {
    let depth = 2_000;
    let tree = caterpillar(depth);
    assert_eq!(tree.num_leaves(), depth + 1);
    let adjacency = AdjacencyMatrix::from_tree(&tree).unwrap();
    assert_eq!(adjacency.num_edges(), tree.num_vertices() - 1);
}

#[test]
fn test_deep_caterpillar_matrix() {
    let depth = 600;
    let tree = caterpillar(depth);
    let matrix = tree_to_matrix(&tree, false).unwrap();

    assert_eq!(matrix.len(), depth + 1);
    assert!(matrix.is_complete());
    let deepest = leaf_named(&tree, "L0");
    let shallowest = leaf_named(&tree, &format!("L{depth}"));
    assert_eq!(matrix.get(deepest, shallowest), Some((depth + 1) as f64));
    assert_eq!(matrix.get(deepest, leaf_named(&tree, "L1")), Some(2.0));
}

// --- TESTS PRUNING ---
#[test]
fn test_prune_branches() {
    let tree = parse_str("((A:1,B:2):3,(C:4,D:5):6);").unwrap();
    let full = tree_to_matrix(&tree, true).unwrap();
    assert_eq!(full.len(), tree.num_vertices());

    let pruned = prune_branches(&full, &tree, false);
    assert_eq!(pruned.len(), 4);
    assert!(pruned.has_only_leaves(&tree));
    assert_eq!(pruned, tree_to_matrix(&tree, false).unwrap());

    let (a, d) = (leaf_named(&tree, "A"), leaf_named(&tree, "D"));
    assert_eq!(pruned.get(a, d), full.get(a, d));
    assert_eq!(pruned.get(a, d), Some(15.0));

    // Idempotent, and passing through with branches included
    assert_eq!(prune_branches(&pruned, &tree, false), pruned);
    assert_eq!(prune_branches(&full, &tree, true), full);
}

// --- TESTS DISCONNECTED INPUT ---
#[test]
fn test_disconnected_leaf() {
    let mut tree = Tree::new();
    let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A");
    let b = tree.add_leaf(Some(BranchLength::new(2.0)), "B");
    tree.add_leaf(Some(BranchLength::new(3.0)), "Orphan");
    let root = tree.add_root(vec![a, b]);
    assert!(!tree.is_valid());

    let err = tree_to_matrix(&tree, false).unwrap_err();
    match err {
        DistError::DisconnectedGraph {
            from,
            to,
            unreachable_pairs,
        } => {
            assert_eq!(from, format!("B_{root}"));
            assert_eq!(to, "L_Orphan");
            assert_eq!(unreachable_pairs, 3);
        }
        other => panic!("expected DisconnectedGraph, got {other:?}"),
    }
}
