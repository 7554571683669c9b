//! Parent/subtask composition for the tasks page.
//!
//! The record store hands back a flat task list where subtasks point at their
//! parent through `parent_id`; nesting is one level deep by contract. The
//! composer rebuilds the two-level view in a single pass. Children whose
//! parent id never shows up are not dropped: they land in
//! [`TaskTree::orphans`] so the page can render them as an unassigned bucket.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::Task;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentTask {
    #[serde(flatten)]
    pub task: Task,
    pub subtasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTree {
    pub parents: Vec<ParentTask>,
    /// Children whose `parent_id` matched no parent in the input.
    pub orphans: Vec<Task>,
}

impl TaskTree {
    /// Total tasks referenced by the tree, orphans included.
    pub fn len(&self) -> usize {
        let nested: usize = self.parents.iter().map(|p| 1 + p.subtasks.len()).sum();
        nested + self.orphans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty() && self.orphans.is_empty()
    }
}

/// Nest subtasks under their parents, preserving relative input order on
/// both levels. O(P + C): one grouping pass over children, one walk over
/// parents.
pub fn compose(tasks: &[Task]) -> TaskTree {
    let mut children_by_parent: HashMap<&str, Vec<&Task>> = HashMap::new();
    let mut parent_ids: HashSet<&str> = HashSet::new();
    for task in tasks {
        match task.parent_id.as_deref() {
            Some(parent_id) => children_by_parent.entry(parent_id).or_default().push(task),
            None => {
                parent_ids.insert(task.id.as_str());
            }
        }
    }

    let mut parents = Vec::new();
    for task in tasks {
        if task.parent_id.is_some() {
            continue;
        }
        let subtasks = children_by_parent
            .remove(task.id.as_str())
            .unwrap_or_default()
            .into_iter()
            .cloned()
            .collect();
        parents.push(ParentTask {
            task: task.clone(),
            subtasks,
        });
    }

    let orphans: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            task.parent_id
                .as_deref()
                .map(|parent_id| !parent_ids.contains(parent_id))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    if !orphans.is_empty() {
        log::warn!(
            "task tree: {} subtask(s) reference a missing parent",
            orphans.len()
        );
    }

    TaskTree { parents, orphans }
}
