use crate::graph::ScheduleDag;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Every source-to-sink chain of critical tasks.
///
/// Depth-first from each critical task without predecessors, following only critical
/// successors. Uses an explicit stack of `(node, depth)` over one shared path buffer.
pub fn enumerate_critical_paths(dag: &ScheduleDag) -> Vec<Vec<NodeIndex>> {
    let mut paths = Vec::new();

    let sources = dag
        .graph
        .node_indices()
        .filter(|ix| dag.node(*ix).is_critical() && dag.predecessors(*ix).is_empty());

    for source in sources {
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut stack = vec![(source, 0usize)];

        while let Some((ix, depth)) = stack.pop() {
            path.truncate(depth);
            path.push(ix);

            let successors = dag.successors(ix);
            if successors.is_empty() {
                paths.push(path.clone());
                continue;
            }
            // Reversed so the first declared successor is explored first.
            for succ in successors.into_iter().rev() {
                if dag.node(succ).is_critical() {
                    stack.push((succ, depth + 1));
                }
            }
        }
    }
    paths
}

/// Union of consecutive pairs across all paths.
pub fn critical_edges(paths: &[Vec<NodeIndex>]) -> HashSet<(NodeIndex, NodeIndex)> {
    paths
        .iter()
        .flat_map(|path| path.windows(2).map(|pair| (pair[0], pair[1])))
        .collect()
}
