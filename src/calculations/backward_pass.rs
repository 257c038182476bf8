use crate::graph::ScheduleDag;
use petgraph::graph::NodeIndex;

/// Latest start/finish, walking the topological order in reverse.
///
/// Sinks finish at the project's earliest completion (the largest earliest finish);
/// every other task must finish before its tightest successor starts.
pub struct BackwardPass<'a> {
    dag: &'a mut ScheduleDag,
    order: &'a [NodeIndex],
}

impl<'a> BackwardPass<'a> {
    pub fn new(dag: &'a mut ScheduleDag, order: &'a [NodeIndex]) -> Self {
        Self { dag, order }
    }

    /// Returns the project's earliest completion time.
    pub fn execute(self) -> f64 {
        let project_finish = self
            .dag
            .graph
            .node_weights()
            .map(|node| node.earliest_finish)
            .fold(0.0, f64::max);

        for &ix in self.order.iter().rev() {
            let successors = self.dag.successors(ix);
            let latest_finish = if successors.is_empty() {
                project_finish
            } else {
                successors
                    .iter()
                    .map(|succ| self.dag.node(*succ).latest_start)
                    .fold(f64::INFINITY, f64::min)
            };

            let node = self.dag.node_mut(ix);
            node.latest_finish = latest_finish;
            node.latest_start = latest_finish - node.duration.expected();
        }
        project_finish
    }
}
