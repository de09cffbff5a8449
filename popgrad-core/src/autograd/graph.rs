use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::autograd::{BackwardOp, Seed, TraceRecord};
use crate::error::PopGradError;
use crate::node::Node;
use crate::node_data::NodeData;

/// Identity of a node during a traversal: the address of its shared data.
///
/// Stable for as long as some `Node` handle keeps the allocation alive, which
/// the topological order itself guarantees for the whole traversal.
pub(crate) type NodeId = *const RefCell<NodeData>;

/// Returns every node reachable from `root` such that each node appears after
/// all of its parents (depth-first postorder, parents visited in operand order).
///
/// Shared ancestors are emitted once. Uses an explicit stack so that deep
/// chains do not exhaust the call stack.
pub fn topological_order(root: &Node) -> Vec<Node> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted_list: Vec<Node> = Vec::new();
    // (node, parents already scheduled)
    let mut stack: Vec<(Node, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted_list.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        let parents = node.parents();
        stack.push((node, true));
        for parent in parents.into_iter().rev() {
            if !visited.contains(&parent.node_id()) {
                stack.push((parent, false));
            }
        }
    }
    sorted_list
}

/// Runs reverse-mode autodiff from `root`.
///
/// The root's gradient buffer is overwritten with the seed. Every other node
/// reached by the traversal has the gradient produced during this call added
/// to its buffer, so repeated calls without a reset accumulate.
///
/// With `debug` set, each visited node is logged at debug level after its
/// backward rule ran.
///
/// # Errors
/// `ShapeMismatch` if an explicit seed does not match the root's size. Nothing
/// is written in that case.
pub fn backprop(root: &Node, seed: Seed, debug: bool) -> Result<(), PopGradError> {
    if debug {
        let mut log_node = |record: &TraceRecord| debug!("{}", record);
        run_backprop(root, &seed, Some(&mut log_node as &mut dyn FnMut(&TraceRecord)))
    } else {
        run_backprop(root, &seed, None)
    }
}

/// Same as [`backprop`], reporting each visited node to `hook`.
///
/// The hook only observes; it cannot influence the computed gradients.
pub fn backprop_with_hook<F>(root: &Node, seed: Seed, mut hook: F) -> Result<(), PopGradError>
where
    F: FnMut(&TraceRecord),
{
    run_backprop(root, &seed, Some(&mut hook as &mut dyn FnMut(&TraceRecord)))
}

/// Resets the gradient of every node reachable from `root` to zeros.
///
/// Constants are left untouched (they are always zero anyway).
pub fn zero_grad_graph(root: &Node) {
    for node in topological_order(root) {
        node.zero_grad();
    }
}

fn run_backprop(
    root: &Node,
    seed: &Seed,
    mut hook: Option<&mut dyn FnMut(&TraceRecord)>,
) -> Result<(), PopGradError> {
    let seed_grad = seed.resolve(root.numel())?;
    let sorted_nodes = topological_order(root);
    debug!(
        "backprop: {} nodes in topological order, seed policy {:?}",
        sorted_nodes.len(),
        seed
    );

    if root.requires_grad() {
        root.write_data().grad = seed_grad.clone();
    }

    // Gradient produced during this traversal only, keyed by node.
    let mut pending: HashMap<NodeId, Vec<f64>> = HashMap::new();
    pending.insert(root.node_id(), seed_grad);

    for node in sorted_nodes.iter().rev() {
        if let Some(upstream) = pending.remove(&node.node_id()) {
            if node.requires_grad() {
                propagate(node, &upstream, &mut pending)?;
            }
        }

        if let Some(hook) = hook.as_mut() {
            let record = {
                let guard = node.read_data();
                TraceRecord {
                    op: guard.op.to_string(),
                    value: guard.data.clone(),
                    grad: guard.grad.clone(),
                    parent_values: guard.parents.iter().map(|p| p.data()).collect(),
                }
            };
            hook(&record);
        }
    }

    Ok(())
}

/// Invokes `node`'s backward rule and accumulates the result into its parents.
fn propagate(
    node: &Node,
    upstream: &[f64],
    pending: &mut HashMap<NodeId, Vec<f64>>,
) -> Result<(), PopGradError> {
    let (parent_grads, parents) = {
        let guard = node.read_data();
        match guard.grad_fn.as_ref() {
            Some(op) => (op.backward(upstream)?, guard.parents.clone()),
            None => return Ok(()),
        }
    };

    if parent_grads.len() != parents.len() {
        return Err(PopGradError::InternalError(format!(
            "backward rule for op '{}' returned {} gradients for {} parents",
            node.op(),
            parent_grads.len(),
            parents.len()
        )));
    }

    for (parent, contribution) in parents.iter().zip(parent_grads) {
        if !parent.requires_grad() {
            continue;
        }
        if contribution.len() != parent.numel() {
            return Err(PopGradError::InternalError(format!(
                "backward rule for op '{}' produced a gradient of size {} for a parent of size {}",
                node.op(),
                contribution.len(),
                parent.numel()
            )));
        }

        parent.write_data().accumulate_grad(&contribution);

        match pending.entry(parent.node_id()) {
            Entry::Occupied(mut entry) => {
                entry
                    .get_mut()
                    .iter_mut()
                    .zip(&contribution)
                    .for_each(|(acc, c)| *acc += c);
            }
            Entry::Vacant(entry) => {
                entry.insert(contribution);
            }
        }
    }
    Ok(())
}
