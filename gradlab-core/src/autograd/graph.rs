use std::collections::HashSet;

use crate::tensor::Tensor;

/// Identifier of a node in the computation graph (address of its shared data).
pub type NodeId = usize;

/// Orders the graph reachable from `root` so that every node appears before
/// the inputs it was computed from.
///
/// The traversal is an iterative post-order DFS over `grad_fn` edges; the
/// post-order is reversed at the end. Each node is visited once even when
/// it feeds several downstream ops.
pub fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut post_order: Vec<Tensor> = Vec::new();
    // (node, inputs already pushed)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            post_order.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let inputs = node
            .grad_fn()
            .map(|grad_fn| grad_fn.inputs())
            .unwrap_or_default();
        stack.push((node, true));
        for input in inputs {
            if !visited.contains(&input.node_id()) {
                stack.push((input, false));
            }
        }
    }

    post_order.reverse();
    post_order
}
