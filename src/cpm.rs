//! Critical Path Method over three-point estimates.

use crate::calculations::backward_pass::BackwardPass;
use crate::calculations::critical_paths::{critical_edges, enumerate_critical_paths};
use crate::calculations::forward_pass::ForwardPass;
use crate::error::CpmError;
use crate::graph::ScheduleDag;
use crate::task::TaskInput;
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Scheduling result for one task. Numbers are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpmResult {
    pub id: String,
    pub expected_duration: f64,
    pub variance: f64,
    pub path_variance: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
    pub is_critical: bool,
}

/// A dependency edge, keyed `"<from> > <to>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpmEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub is_critical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPath {
    pub path: Vec<String>,
    pub expected_duration: f64,
    pub variance: f64,
    pub stddev: f64,
    /// expected ± 2σ
    pub confidence95: ConfidenceInterval,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpmOutput {
    pub tasks: Vec<CpmResult>,
    pub edges: Vec<CpmEdge>,
    pub critical_paths: Vec<CriticalPath>,
}

impl CpmOutput {
    pub fn task(&self, id: &str) -> Option<&CpmResult> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&CpmEdge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    /// Earliest overall completion, in working days.
    pub fn project_duration(&self) -> f64 {
        self.tasks
            .iter()
            .map(|t| t.earliest_finish)
            .fold(0.0, f64::max)
    }

    pub fn critical_task_ids(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.is_critical)
            .map(|t| t.id.as_str())
            .collect()
    }
}

/// Presentation rounding to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Run the forward and backward passes and enumerate critical paths.
///
/// Validation failures (duplicate id, unknown successor, cycle) return an error and
/// nothing is scheduled.
pub fn run_cpm(tasks: &[TaskInput]) -> Result<CpmOutput, CpmError> {
    let mut dag = ScheduleDag::build(tasks)?;
    let order = dag.topological_order()?;

    ForwardPass::new(&mut dag, &order).execute();
    let project_finish = BackwardPass::new(&mut dag, &order).execute();

    let paths = enumerate_critical_paths(&dag);
    let on_critical_path = critical_edges(&paths);

    let results = dag
        .graph
        .node_indices()
        .map(|ix| task_result(&dag, ix))
        .collect();

    let mut edges = Vec::new();
    for from in dag.graph.node_indices() {
        for to in dag.successors(from) {
            let (from_id, to_id) = (&dag.node(from).id, &dag.node(to).id);
            edges.push(CpmEdge {
                id: format!("{from_id} > {to_id}"),
                from: from_id.clone(),
                to: to_id.clone(),
                is_critical: on_critical_path.contains(&(from, to)),
            });
        }
    }

    let critical_paths: Vec<CriticalPath> =
        paths.iter().map(|path| path_summary(&dag, path)).collect();

    debug!(
        "cpm: {} tasks, {} edges, {} critical path(s), project finish {:.1}",
        dag.node_count(),
        edges.len(),
        critical_paths.len(),
        project_finish
    );

    Ok(CpmOutput {
        tasks: results,
        edges,
        critical_paths,
    })
}

fn task_result(dag: &ScheduleDag, ix: NodeIndex) -> CpmResult {
    let node = dag.node(ix);
    CpmResult {
        id: node.id.clone(),
        expected_duration: round1(node.duration.expected()),
        variance: round1(node.duration.variance()),
        path_variance: round1(node.path_variance),
        earliest_start: round1(node.earliest_start),
        earliest_finish: round1(node.earliest_finish),
        latest_start: round1(node.latest_start),
        latest_finish: round1(node.latest_finish),
        slack: round1(node.slack()),
        is_critical: node.is_critical(),
    }
}

fn path_summary(dag: &ScheduleDag, path: &[NodeIndex]) -> CriticalPath {
    let expected: f64 = path.iter().map(|ix| dag.node(*ix).duration.expected()).sum();
    let variance: f64 = path.iter().map(|ix| dag.node(*ix).duration.variance()).sum();
    let stddev = variance.sqrt();

    CriticalPath {
        path: path.iter().map(|ix| dag.node(*ix).id.clone()).collect(),
        expected_duration: round1(expected),
        variance: round1(variance),
        stddev: round1(stddev),
        confidence95: ConfidenceInterval {
            lower: round1(expected - 2.0 * stddev),
            upper: round1(expected + 2.0 * stddev),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(3.16666), 3.2);
        assert_eq!(round1(8.14), 8.1);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn diamond_with_equal_branches_has_two_paths() {
        let tasks = vec![
            TaskInput::new("A", 2.0, 2.0, 2.0).with_successors(["B", "C"]),
            TaskInput::new("B", 3.0, 3.0, 3.0).with_successors(["D"]),
            TaskInput::new("C", 3.0, 3.0, 3.0).with_successors(["D"]),
            TaskInput::new("D", 1.0, 1.0, 1.0),
        ];
        let out = run_cpm(&tasks).unwrap();
        let paths: Vec<Vec<String>> = out.critical_paths.iter().map(|p| p.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                vec!["A".to_string(), "B".into(), "D".into()],
                vec!["A".to_string(), "C".into(), "D".into()],
            ]
        );
        assert!(out.edges.iter().all(|e| e.is_critical));
    }

    #[test]
    fn tie_on_start_propagates_larger_variance() {
        // B and C both finish at 3; C carries the wider estimate.
        let tasks = vec![
            TaskInput::new("B", 3.0, 3.0, 3.0).with_successors(["D"]),
            TaskInput::new("C", 1.0, 3.0, 5.0).with_successors(["D"]),
            TaskInput::new("D", 1.0, 1.0, 1.0),
        ];
        let dag_out = run_cpm(&tasks).unwrap();
        let d = dag_out.task("D").unwrap();
        assert_eq!(d.earliest_start, 3.0);
        // C variance = (4/6)^2 = 0.444..
        assert_eq!(d.path_variance, 0.4);
    }
}
