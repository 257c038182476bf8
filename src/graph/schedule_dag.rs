use crate::error::CpmError;
use crate::task::{TaskInput, TaskNode};
use log::warn;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Arena of task nodes keyed by `NodeIndex`, with one edge per dependency
/// (predecessor -> successor). Node indices follow input order.
#[derive(Debug, Clone)]
pub struct ScheduleDag {
    pub graph: DiGraph<TaskNode, ()>,
    pub id_to_index: HashMap<String, NodeIndex>,
}

impl ScheduleDag {
    /// Build and validate the dependency graph.
    ///
    /// Fails on a duplicated task id, or with the full sorted set of unknown successor
    /// ids. Repeated successors on one task collapse into a single edge.
    pub fn build(tasks: &[TaskInput]) -> Result<Self, CpmError> {
        let mut graph: DiGraph<TaskNode, ()> = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(tasks.len());

        // Add nodes first
        for task in tasks {
            if id_to_index.contains_key(&task.id) {
                warn!("duplicate task id '{}'", task.id);
                return Err(CpmError::DuplicateTask {
                    id: task.id.clone(),
                });
            }
            let node_ix = graph.add_node(TaskNode::new(task.id.clone(), task.duration()));
            id_to_index.insert(task.id.clone(), node_ix);
        }

        let missing: BTreeSet<&str> = tasks
            .iter()
            .flat_map(|task| task.successors.iter())
            .filter(|succ| !id_to_index.contains_key(succ.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            let missing: Vec<String> = missing.into_iter().map(ToOwned::to_owned).collect();
            warn!("missing successor tasks: {}", missing.join(", "));
            return Err(CpmError::MissingSuccessors { missing });
        }

        // Add edges: task -> successor
        for task in tasks {
            let from = id_to_index[&task.id];
            let mut seen = HashSet::with_capacity(task.successors.len());
            for succ in &task.successors {
                if seen.insert(succ.as_str()) {
                    graph.add_edge(from, id_to_index[succ], ());
                }
            }
        }

        Ok(Self { graph, id_to_index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node(&self, ix: NodeIndex) -> &TaskNode {
        &self.graph[ix]
    }

    pub fn node_mut(&mut self, ix: NodeIndex) -> &mut TaskNode {
        &mut self.graph[ix]
    }

    /// Successors in declaration order.
    pub fn successors(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_insertion_order(ix, Direction::Outgoing)
    }

    /// Predecessors in the order their edges were declared.
    pub fn predecessors(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_insertion_order(ix, Direction::Incoming)
    }

    // petgraph walks adjacency lists newest-first.
    fn neighbors_in_insertion_order(&self, ix: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(ix, dir).collect();
        out.reverse();
        out
    }

    /// Kahn's algorithm. Ready nodes are taken first-in first-out, seeded in input
    /// order, so the result is deterministic.
    pub fn topological_order(&self) -> Result<Vec<NodeIndex>, CpmError> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|ix| self.graph.neighbors_directed(ix, Direction::Incoming).count())
            .collect();

        let mut ready: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix.index()] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.node_count());
        while let Some(ix) = ready.pop_front() {
            order.push(ix);
            for succ in self.successors(ix) {
                let degree = &mut in_degree[succ.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(succ);
                }
            }
        }

        if order.len() < self.node_count() {
            warn!(
                "dependency cycle: ordered {} of {} tasks",
                order.len(),
                self.node_count()
            );
            return Err(CpmError::CycleDetected);
        }
        Ok(order)
    }
}
