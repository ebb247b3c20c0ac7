use petgraph::graph::{DiGraph, NodeIndex};

struct Frame {
    node: NodeIndex,
    targets: Vec<NodeIndex>,
    next: usize,
}

/// Distinct successors of `node` in edge insertion order
fn targets<N, E>(graph: &DiGraph<N, E>, node: NodeIndex) -> Vec<NodeIndex> {
    // petgraph walks outgoing edges newest first
    let mut targets: Vec<NodeIndex> = graph.neighbors(node).collect();
    targets.reverse();
    let mut seen = Vec::with_capacity(targets.len());
    targets.retain(|target| {
        if seen.contains(target) {
            false
        } else {
            seen.push(*target);
            true
        }
    });
    targets
}

/// Cycles found by depth-first search from each unvisited node.
///
/// The walk is iterative and keeps an explicit on-stack set. Reaching a node
/// that is still on the stack closes a cycle, reported as the stack slice
/// from that node to the current one. Roots are taken in node order, so the
/// result is deterministic but not exhaustive: a cycle only reachable
/// through already visited nodes is not reported twice.
pub fn find_cycles<N: Clone, E>(graph: &DiGraph<N, E>) -> Vec<Vec<N>> {
    let count = graph.node_count();
    let mut visited = vec![false; count];
    let mut on_stack = vec![false; count];
    let mut path: Vec<NodeIndex> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut cycles = Vec::new();

    for root in graph.node_indices() {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        on_stack[root.index()] = true;
        path.push(root);
        frames.push(Frame {
            node: root,
            targets: targets(graph, root),
            next: 0,
        });

        while let Some(frame) = frames.last_mut() {
            let Some(&target) = frame.targets.get(frame.next) else {
                on_stack[frame.node.index()] = false;
                path.pop();
                frames.pop();
                continue;
            };
            frame.next += 1;

            if on_stack[target.index()] {
                if let Some(start) = path.iter().position(|node| *node == target) {
                    cycles.push(path[start..].iter().map(|node| graph[*node].clone()).collect());
                }
            } else if !visited[target.index()] {
                visited[target.index()] = true;
                on_stack[target.index()] = true;
                path.push(target);
                frames.push(Frame {
                    node: target,
                    targets: targets(graph, target),
                    next: 0,
                });
            }
        }
    }

    cycles
}
