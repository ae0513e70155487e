//! Dependency-aware ranking of assigned tasks.
//!
//! Builds a dependency graph from the tasks' dependency edges, counts open
//! blockers per task ("difficulty"), computes the longest chain of in-set
//! blockers leading to each task ("depth") with Kahn's algorithm, and ranks
//! tasks by `(difficulty, depth)` grouped under their parent tasks.
//!
//! The analysis is pure: no I/O, no shared state between calls.

use std::collections::{BTreeSet, HashMap, VecDeque};

use serde::Serialize;

use crate::types::enums::{DependencyKind, ExternalBlockerPolicy, Readiness};
use crate::types::task::Task;

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    pub external_blockers: ExternalBlockerPolicy,
}

/// Derived per-task view produced by [`analyze`].
#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo<'a> {
    pub task: &'a Task,
    /// Ids this task waits on (type-0 edges), in or out of the task set.
    pub blockers: BTreeSet<String>,
    /// Blockers that are not resolved yet.
    pub open_blockers: BTreeSet<String>,
    /// Ids that wait on this task (type-1 edges).
    pub dependents: BTreeSet<String>,
    pub difficulty: usize,
    pub depth: usize,
    /// Never reached in-degree zero: part of, or downstream of, a dependency cycle.
    pub cyclic: bool,
}

impl<'a> TaskInfo<'a> {
    pub fn id(&self) -> &'a str {
        let task: &'a Task = self.task;
        task.id.as_str()
    }

    pub fn is_ready(&self) -> bool {
        self.difficulty == 0
    }

    pub fn readiness(&self) -> Readiness {
        if self.cyclic {
            Readiness::Cyclic
        } else if self.is_ready() {
            Readiness::Ready
        } else {
            Readiness::Blocked
        }
    }

    pub fn sort_key(&self) -> (usize, usize) {
        (self.difficulty, self.depth)
    }
}

/// A task in ranked order together with its ranked subtasks.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTask<'a> {
    #[serde(flatten)]
    pub info: TaskInfo<'a>,
    pub subtasks: Vec<RankedTask<'a>>,
}

impl<'a> RankedTask<'a> {
    fn find(&self, id: &str) -> Option<&TaskInfo<'a>> {
        if self.info.id() == id {
            return Some(&self.info);
        }
        self.subtasks.iter().find_map(|s| s.find(id))
    }
}

/// Ranked, grouped view of a task set.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult<'a> {
    /// Tasks without a parent, ranked, each with its nested subtasks.
    pub parents: Vec<RankedTask<'a>>,
    /// Subtasks whose parent is not part of the task set, ranked.
    pub orphaned: Vec<RankedTask<'a>>,
    pub ready_count: usize,
    pub blocked_count: usize,
    pub cyclic_count: usize,
    #[serde(skip)]
    task_map: HashMap<&'a str, &'a Task>,
}

impl<'a> AnalysisResult<'a> {
    pub fn total(&self) -> usize {
        self.ready_count + self.blocked_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Look up a source task of the analyzed set by id.
    pub fn task(&self, id: &str) -> Option<&'a Task> {
        self.task_map.get(id).copied()
    }

    /// Find the ranked info of a task shown in the parent or orphaned groups.
    pub fn find(&self, id: &str) -> Option<&TaskInfo<'a>> {
        self.parents
            .iter()
            .chain(self.orphaned.iter())
            .find_map(|r| r.find(id))
    }
}

/// Analyze with the default options.
pub fn analyze(tasks: &[Task]) -> AnalysisResult<'_> {
    analyze_with(tasks, AnalyzeOptions::default())
}

pub fn analyze_with(tasks: &[Task], options: AnalyzeOptions) -> AnalysisResult<'_> {
    let (ordered, task_map) = index_tasks(tasks);

    let mut infos: Vec<TaskInfo<'_>> = ordered
        .into_iter()
        .map(|task| classify_edges(task, &task_map, options.external_blockers))
        .collect();

    let depths = compute_depths(&infos, &task_map);
    for info in &mut infos {
        match depths.get(info.id()) {
            Some(&depth) => info.depth = depth,
            None => {
                info.depth = 0;
                info.cyclic = true;
            }
        }
    }

    let ready_count = infos.iter().filter(|i| i.is_ready()).count();
    let blocked_count = infos.len() - ready_count;
    let cyclic_count = infos.iter().filter(|i| i.cyclic).count();

    let (parents, orphaned) = partition(infos, &task_map);

    AnalysisResult {
        parents,
        orphaned,
        ready_count,
        blocked_count,
        cyclic_count,
        task_map,
    }
}

/// Deduplicate by id (last write wins, first position kept) and index.
fn index_tasks(tasks: &[Task]) -> (Vec<&Task>, HashMap<&str, &Task>) {
    let mut ordered: Vec<&Task> = Vec::with_capacity(tasks.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());

    for task in tasks {
        match positions.get(task.id.as_str()) {
            Some(&pos) => ordered[pos] = task,
            None => {
                positions.insert(task.id.as_str(), ordered.len());
                ordered.push(task);
            }
        }
    }

    let task_map = ordered.iter().map(|t| (t.id.as_str(), *t)).collect();
    (ordered, task_map)
}

fn classify_edges<'a>(
    task: &'a Task,
    task_map: &HashMap<&'a str, &'a Task>,
    policy: ExternalBlockerPolicy,
) -> TaskInfo<'a> {
    let mut blockers = BTreeSet::new();
    let mut open_blockers = BTreeSet::new();
    let mut dependents = BTreeSet::new();

    for dependency in &task.dependencies {
        let (Some(kind), Some(target)) = (dependency.kind(), dependency.referenced_id()) else {
            continue;
        };
        match kind {
            DependencyKind::WaitingOn => {
                blockers.insert(target.to_string());
                let open = match task_map.get(target) {
                    Some(blocker) => !blocker.is_closed(),
                    None => policy == ExternalBlockerPolicy::Open,
                };
                if open {
                    open_blockers.insert(target.to_string());
                }
            }
            DependencyKind::Blocking => {
                dependents.insert(target.to_string());
            }
        }
    }

    TaskInfo {
        task,
        difficulty: open_blockers.len(),
        blockers,
        open_blockers,
        dependents,
        depth: 0,
        cyclic: false,
    }
}

/// Longest-path depth over in-set blockers. Only tasks that reach in-degree
/// zero are present in the returned map.
fn compute_depths<'a>(
    infos: &[TaskInfo<'a>],
    task_map: &HashMap<&'a str, &'a Task>,
) -> HashMap<&'a str, usize> {
    let mut in_degree: HashMap<&'a str, usize> = HashMap::with_capacity(infos.len());
    let mut waiting_on: HashMap<&'a str, Vec<&'a str>> = HashMap::new();

    for info in infos {
        let id = info.id();
        let mut degree = 0;
        for blocker in &info.blockers {
            if let Some((&blocker_id, _)) = task_map.get_key_value(blocker.as_str()) {
                degree += 1;
                waiting_on.entry(blocker_id).or_default().push(id);
            }
        }
        in_degree.insert(id, degree);
    }

    let mut depths: HashMap<&'a str, usize> = HashMap::with_capacity(infos.len());
    let mut queue: VecDeque<&'a str> = VecDeque::new();
    for info in infos {
        if in_degree.get(info.id()) == Some(&0) {
            depths.insert(info.id(), 0);
            queue.push_back(info.id());
        }
    }

    while let Some(current) = queue.pop_front() {
        let depth = depths.get(current).copied().unwrap_or(0);
        let Some(dependents) = waiting_on.get(current) else {
            continue;
        };
        for &dependent in dependents {
            let Some(remaining) = in_degree.get_mut(dependent) else {
                continue;
            };
            *remaining = remaining.saturating_sub(1);
            let entry = depths.entry(dependent).or_insert(0);
            *entry = (*entry).max(depth + 1);
            if *remaining == 0 {
                queue.push_back(dependent);
            }
        }
    }

    depths.retain(|id, _| in_degree.get(id) == Some(&0));
    depths
}

fn partition<'a>(
    infos: Vec<TaskInfo<'a>>,
    task_map: &HashMap<&'a str, &'a Task>,
) -> (Vec<RankedTask<'a>>, Vec<RankedTask<'a>>) {
    let mut top_level: Vec<usize> = Vec::new();
    let mut subtasks_by_parent: HashMap<&'a str, Vec<usize>> = HashMap::new();
    let mut parent_order: Vec<&'a str> = Vec::new();

    for (idx, info) in infos.iter().enumerate() {
        let task: &'a Task = info.task;
        match task.parent.as_deref() {
            None => top_level.push(idx),
            Some(parent_id) => {
                let siblings = subtasks_by_parent.entry(parent_id).or_insert_with(|| {
                    parent_order.push(parent_id);
                    Vec::new()
                });
                siblings.push(idx);
            }
        }
    }

    let orphan_indices: Vec<usize> = parent_order
        .iter()
        .filter(|parent_id| !task_map.contains_key(*parent_id))
        .filter_map(|parent_id| subtasks_by_parent.get(parent_id))
        .flatten()
        .copied()
        .collect();

    let mut slots: Vec<Option<TaskInfo<'a>>> = infos.into_iter().map(Some).collect();

    let mut parents: Vec<RankedTask<'a>> = top_level
        .into_iter()
        .filter_map(|idx| build_ranked(idx, &mut slots, &subtasks_by_parent))
        .collect();
    let mut orphaned: Vec<RankedTask<'a>> = orphan_indices
        .into_iter()
        .filter_map(|idx| build_ranked(idx, &mut slots, &subtasks_by_parent))
        .collect();

    // Parent chains that loop back on themselves never reach a root.
    for idx in 0..slots.len() {
        if let Some(ranked) = build_ranked(idx, &mut slots, &subtasks_by_parent) {
            orphaned.push(ranked);
        }
    }

    rank(&mut parents);
    rank(&mut orphaned);
    (parents, orphaned)
}

fn build_ranked<'a>(
    idx: usize,
    slots: &mut [Option<TaskInfo<'a>>],
    subtasks_by_parent: &HashMap<&'a str, Vec<usize>>,
) -> Option<RankedTask<'a>> {
    let info = slots.get_mut(idx)?.take()?;

    let mut subtasks: Vec<RankedTask<'a>> = subtasks_by_parent
        .get(info.id())
        .map(|children| {
            children
                .iter()
                .filter_map(|&child| build_ranked(child, slots, subtasks_by_parent))
                .collect()
        })
        .unwrap_or_default();
    rank(&mut subtasks);

    Some(RankedTask { info, subtasks })
}

/// Stable sort by `(difficulty, depth)`; exact ties keep input order.
fn rank(tasks: &mut [RankedTask<'_>]) {
    tasks.sort_by_key(|t| t.info.sort_key());
}
