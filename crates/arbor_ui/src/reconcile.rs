//! Reconciliation: turning declared contents into live subviews.
//!
//! The replacement subtree is staged entirely off-tree. Only once every
//! declared child has expanded and validated are the old subviews removed
//! and the staged nodes attached, so a failed rebuild leaves the tree
//! exactly as it was.

use crate::env::Environment;
use crate::error::ViewResult;
use crate::node::{Child, ViewNode};
use crate::tree::{NodeId, ViewTree};

/// A node expanded and validated but not yet attached.
struct Staged {
    node: ViewNode,
    env: Environment,
    children: Vec<Staged>,
}

impl ViewTree {
    /// Rebuilds the subviews of `id` from its declared contents.
    ///
    /// Returns the ids of every node discarded by the rebuild.
    pub fn rebuild(&mut self, id: NodeId) -> ViewResult<Vec<NodeId>> {
        let staged = {
            let node = self.node(id)?;
            let declared = node.view.content(&node.contents, node.env());
            stage(&declared, node.env())?
        };

        let old = std::mem::take(&mut self.node_mut(id)?.state.subviews);
        let mut discarded = Vec::new();
        for child in old {
            self.remove_subtree(child, &mut discarded);
        }

        let subviews = self.install(id, staged);
        let count = subviews.len();
        self.node_mut(id)?.state.subviews = subviews;
        self.stats.reconciliations += 1;

        tracing::debug!(
            node = %id,
            children = count,
            discarded = discarded.len(),
            "reconciled"
        );
        Ok(discarded)
    }

    fn install(&mut self, parent: NodeId, staged: Vec<Staged>) -> Vec<NodeId> {
        staged
            .into_iter()
            .enumerate()
            .map(|(index, Staged { node, env, children })| {
                let id = self.attach(node, Some(parent), index, env);
                let subviews = self.install(id, children);
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.state.subviews = subviews;
                }
                id
            })
            .collect()
    }
}

/// Expands `declared` under a parent environment, recursing into every
/// produced node's own content.
fn stage(declared: &[Child], parent_env: &Environment) -> ViewResult<Vec<Staged>> {
    let mut nodes = Vec::with_capacity(declared.len());
    for child in declared {
        child.expand_into(&mut nodes)?;
    }

    nodes
        .into_iter()
        .map(|node| {
            let env = parent_env.inherit(&node.config.env);
            let contents = node.view.content(&node.contents, &env);
            let children = stage(&contents, &env)?;
            Ok(Staged {
                node,
                env,
                children,
            })
        })
        .collect()
}
