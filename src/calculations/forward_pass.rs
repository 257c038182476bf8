use crate::graph::ScheduleDag;
use petgraph::graph::NodeIndex;

/// Earliest start/finish and accumulated path variance, in topological order.
pub struct ForwardPass<'a> {
    dag: &'a mut ScheduleDag,
    order: &'a [NodeIndex],
}

impl<'a> ForwardPass<'a> {
    pub fn new(dag: &'a mut ScheduleDag, order: &'a [NodeIndex]) -> Self {
        Self { dag, order }
    }

    pub fn execute(self) {
        for &ix in self.order {
            let mut earliest_start = 0.0;
            let mut path_variance = 0.0;

            // Among predecessors tied on driving the start, keep the larger variance.
            for pred_ix in self.dag.predecessors(ix) {
                let pred = self.dag.node(pred_ix);
                if pred.earliest_finish > earliest_start {
                    earliest_start = pred.earliest_finish;
                    path_variance = pred.path_variance;
                } else if pred.earliest_finish == earliest_start
                    && pred.path_variance > path_variance
                {
                    path_variance = pred.path_variance;
                }
            }

            let node = self.dag.node_mut(ix);
            node.earliest_start = earliest_start;
            node.path_variance = path_variance + node.duration.variance();
            node.earliest_finish = earliest_start + node.duration.expected();
        }
    }
}
