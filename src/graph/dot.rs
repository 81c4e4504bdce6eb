use super::DependencyGraph;
use petgraph::dot::{Config, Dot};

/// Graphviz rendering of the dependency graph, one node per task labelled
/// `<id>: <name>`, edges from prerequisite to dependent.
pub fn render_dot(graph: &DependencyGraph) -> String {
    let (dag, _) = graph.to_petgraph();
    let labelled = dag.map(
        |_, task_id| match graph.task(*task_id) {
            Some(task) => format!("{}: {}", task.id, task.name),
            None => task_id.to_string(),
        },
        |_, _| "",
    );
    format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
}
