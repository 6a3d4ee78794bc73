// Copyright 2025 Cowboy AI, LLC.

//! In-memory locator trees with move history

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

use super::mapper::{Resolution, ResourceLocatorInformation, ResourceLocatorMapper};
use crate::errors::{EngineError, EngineResult};
use crate::identifiers::{ContentUuid, LocatorScope, RouteId};
use crate::locator_path::LocatorPath;

/// What a route node points at
#[derive(Debug, Clone, PartialEq, Eq)]
enum RouteTarget {
    /// Active route of a content
    Content(ContentUuid),
    /// Superseded route of a content, pointing at its replacement
    History {
        content: ContentUuid,
        target: LocatorPath,
    },
    /// Intermediate node without content
    Placeholder,
}

#[derive(Debug, Clone)]
struct RouteNode {
    id: RouteId,
    target: RouteTarget,
    created: DateTime<Utc>,
    seq: u64,
}

type Tree = BTreeMap<LocatorPath, RouteNode>;

#[derive(Debug, Default)]
struct State {
    trees: HashMap<LocatorScope, Tree>,
    seq: u64,
}

impl State {
    fn node(&mut self, target: RouteTarget) -> RouteNode {
        self.seq += 1;
        RouteNode {
            id: RouteId::new(),
            target,
            created: Utc::now(),
            seq: self.seq,
        }
    }

    /// Replace the target of an existing node, stamping it as newly written
    fn retarget(&mut self, scope: &LocatorScope, path: &LocatorPath, target: RouteTarget) {
        self.seq += 1;
        let seq = self.seq;
        if let Some(node) = self.trees.get_mut(scope).and_then(|tree| tree.get_mut(path)) {
            node.target = target;
            node.created = Utc::now();
            node.seq = seq;
        }
    }

    fn insert(&mut self, scope: &LocatorScope, path: LocatorPath, target: RouteTarget) {
        let node = self.node(target);
        self.trees.entry(scope.clone()).or_default().insert(path, node);
    }

    fn ensure_ancestors(&mut self, scope: &LocatorScope, path: &LocatorPath) {
        for ancestor in path.ancestors() {
            let missing = self
                .trees
                .get(scope)
                .map_or(true, |tree| !tree.contains_key(&ancestor));
            if missing {
                self.insert(scope, ancestor, RouteTarget::Placeholder);
            }
        }
    }
}

fn active_path(tree: &Tree, content: ContentUuid) -> Option<LocatorPath> {
    tree.iter()
        .find(|(_, node)| node.target == RouteTarget::Content(content))
        .map(|(path, _)| path.clone())
}

fn subtree(tree: &Tree, root: &LocatorPath) -> Vec<(LocatorPath, RouteNode)> {
    tree.range(root.clone()..)
        .take_while(|(path, _)| path.starts_with(root))
        .map(|(path, node)| (path.clone(), node.clone()))
        .collect()
}

fn parse_non_root(path: &str) -> EngineResult<LocatorPath> {
    let parsed = LocatorPath::parse(path)?;
    if parsed.is_root() {
        return Err(EngineError::InvalidArgument(format!(
            "\"{path}\" addresses the whole locator tree"
        )));
    }
    Ok(parsed)
}

/// Locator store keeping one ordered tree per scope.
///
/// Superseded routes stay in the tree as history nodes pointing at the
/// route that replaced them, so old urls keep resolving to a moved signal.
#[derive(Debug, Default)]
pub struct TreeResourceLocatorMapper {
    state: RwLock<State>,
}

impl TreeResourceLocatorMapper {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes (active, history and placeholder) in a scope
    pub fn node_count(&self, scope: &LocatorScope) -> usize {
        self.state
            .read()
            .trees
            .get(scope)
            .map_or(0, BTreeMap::len)
    }
}

impl ResourceLocatorMapper for TreeResourceLocatorMapper {
    fn unique(&self, path: &str, scope: &LocatorScope) -> EngineResult<bool> {
        let path = LocatorPath::parse(path)?;
        if path.is_root() {
            return Ok(false);
        }
        let state = self.state.read();
        let occupied = state
            .trees
            .get(scope)
            .and_then(|tree| tree.get(&path))
            .is_some_and(|node| matches!(node.target, RouteTarget::Content(_)));
        Ok(!occupied)
    }

    fn get_unique_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<String> {
        let parsed = LocatorPath::parse(path)?;
        let Some(last) = parsed.last().map(str::to_string) else {
            return Err(EngineError::ResourceLocatorNotValid {
                path: path.to_string(),
            });
        };

        let mut candidate = parsed.clone();
        let mut counter = 1;
        while !self.unique(&candidate.to_string(), scope)? {
            counter += 1;
            candidate = parsed.with_last(format!("{last}-{counter}"));
        }
        Ok(candidate.to_string())
    }

    fn save(&self, content: ContentUuid, path: &str, scope: &LocatorScope) -> EngineResult<()> {
        let path = LocatorPath::parse(path)?;
        if path.is_root() {
            return Err(EngineError::ResourceLocatorNotValid {
                path: path.to_string(),
            });
        }

        let mut state = self.state.write();
        let tree = state.trees.entry(scope.clone()).or_default();
        if let Some(node) = tree.get(&path) {
            match node.target {
                RouteTarget::Content(existing) if existing == content => return Ok(()),
                RouteTarget::Content(existing) => {
                    return Err(EngineError::ResourceLocatorAlreadyExists {
                        path: path.to_string(),
                        conflicting: existing,
                    })
                }
                _ => {}
            }
        }

        let previous = active_path(tree, content);
        state.ensure_ancestors(scope, &path);
        state.insert(scope, path.clone(), RouteTarget::Content(content));
        if let Some(previous) = &previous {
            state.retarget(
                scope,
                previous,
                RouteTarget::History {
                    content,
                    target: path.clone(),
                },
            );
        }

        debug!(
            "Saved {} for content {} in {} (previous {:?})",
            path,
            content,
            scope,
            previous.map(|p| p.to_string())
        );
        Ok(())
    }

    fn load_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<String> {
        let state = self.state.read();
        state
            .trees
            .get(scope)
            .and_then(|tree| active_path(tree, content))
            .map(|path| path.to_string())
            .ok_or_else(|| EngineError::not_found(content.to_string()))
    }

    fn resolve(&self, path: &str, scope: &LocatorScope) -> EngineResult<Resolution> {
        let path = LocatorPath::parse(path)?;
        let state = self.state.read();
        let resolution = match state.trees.get(scope).and_then(|tree| tree.get(&path)) {
            Some(RouteNode {
                target: RouteTarget::Content(content),
                ..
            }) => Resolution::Found(*content),
            Some(RouteNode {
                target: RouteTarget::History { target, .. },
                ..
            }) => Resolution::Moved(target.to_string()),
            _ => Resolution::NotFound,
        };
        Ok(resolution)
    }

    fn load_history_by_content_uuid(
        &self,
        content: ContentUuid,
        scope: &LocatorScope,
    ) -> EngineResult<Vec<ResourceLocatorInformation>> {
        let state = self.state.read();
        let Some(tree) = state.trees.get(scope) else {
            return Ok(Vec::new());
        };

        let mut history: Vec<(&LocatorPath, &RouteNode)> = tree
            .iter()
            .filter(|(_, node)| match &node.target {
                RouteTarget::History { content: owner, .. } => *owner == content,
                _ => false,
            })
            .collect();
        history.sort_by(|(_, a), (_, b)| b.created.cmp(&a.created).then(b.seq.cmp(&a.seq)));

        Ok(history
            .into_iter()
            .map(|(path, node)| ResourceLocatorInformation {
                id: node.id,
                resource_locator: path.to_string(),
                content_uuid: content,
                created: node.created,
                is_history: true,
            })
            .collect())
    }

    fn move_path(&self, old_path: &str, new_path: &str, scope: &LocatorScope) -> EngineResult<()> {
        let old = parse_non_root(old_path)?;
        let new = parse_non_root(new_path)?;
        if old == new {
            return Ok(());
        }
        if new.starts_with(&old) {
            return Err(EngineError::InvalidArgument(format!(
                "cannot move {old} into its own subtree {new}"
            )));
        }

        let mut state = self.state.write();
        let tree = state
            .trees
            .get(scope)
            .ok_or_else(|| EngineError::not_found(old.to_string()))?;
        if !tree.contains_key(&old) {
            return Err(EngineError::not_found(old.to_string()));
        }

        let moved = subtree(tree, &old);
        let mut relocated = Vec::with_capacity(moved.len());
        for (path, node) in moved {
            let Some(target_path) = path.rebase(&old, &new) else {
                continue;
            };
            if let Some(existing) = tree.get(&target_path) {
                if let (RouteTarget::Content(occupant), RouteTarget::Content(content)) =
                    (&existing.target, &node.target)
                {
                    if occupant != content {
                        return Err(EngineError::ResourceLocatorAlreadyExists {
                            path: target_path.to_string(),
                            conflicting: *occupant,
                        });
                    }
                }
            }
            relocated.push((path, target_path, node));
        }

        // history elsewhere that led into the old subtree follows the move
        let redirected: Vec<(LocatorPath, ContentUuid, LocatorPath)> = tree
            .iter()
            .filter_map(|(path, node)| match &node.target {
                RouteTarget::History { content, target } if !path.starts_with(&old) => target
                    .rebase(&old, &new)
                    .map(|rebased| (path.clone(), *content, rebased)),
                _ => None,
            })
            .collect();

        state.ensure_ancestors(scope, &new);
        for (path, target_path, node) in &relocated {
            match &node.target {
                RouteTarget::Content(content) => {
                    state.insert(scope, target_path.clone(), RouteTarget::Content(*content));
                    state.retarget(
                        scope,
                        path,
                        RouteTarget::History {
                            content: *content,
                            target: target_path.clone(),
                        },
                    );
                }
                RouteTarget::History { content, target } => {
                    let target = target.rebase(&old, &new).unwrap_or_else(|| target.clone());
                    let history = RouteTarget::History {
                        content: *content,
                        target,
                    };
                    // an active locator at the target keeps its owner
                    let occupied = state
                        .trees
                        .get(scope)
                        .and_then(|tree| tree.get(target_path))
                        .is_some_and(|existing| {
                            matches!(existing.target, RouteTarget::Content(_))
                        });
                    if !occupied {
                        state.insert(scope, target_path.clone(), history.clone());
                    }
                    state.retarget(scope, path, history);
                }
                RouteTarget::Placeholder => {
                    let exists = state
                        .trees
                        .get(scope)
                        .is_some_and(|tree| tree.contains_key(target_path));
                    if !exists {
                        state.insert(scope, target_path.clone(), RouteTarget::Placeholder);
                    }
                }
            }
        }
        for (path, content, target) in redirected {
            state.retarget(scope, &path, RouteTarget::History { content, target });
        }

        info!(
            "Moved {} to {} in {} ({} nodes)",
            old,
            new,
            scope,
            relocated.len()
        );
        Ok(())
    }

    fn restore_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()> {
        let path = parse_non_root(path)?;
        let mut state = self.state.write();
        let tree = state
            .trees
            .get(scope)
            .ok_or_else(|| EngineError::not_found(path.to_string()))?;

        let content = match tree.get(&path).map(|node| &node.target) {
            Some(RouteTarget::Content(_)) => return Ok(()),
            Some(RouteTarget::History { content, .. }) => *content,
            _ => return Err(EngineError::not_found(path.to_string())),
        };
        let current = active_path(tree, content)
            .ok_or_else(|| EngineError::not_found(content.to_string()))?;

        // descendants of the current route whose mirror below `path` is
        // still history pointing at them flip back together
        let mirrored: Vec<(LocatorPath, LocatorPath, ContentUuid)> = subtree(tree, &current)
            .into_iter()
            .filter(|(descendant, _)| *descendant != current)
            .filter_map(|(descendant, node)| {
                let RouteTarget::Content(child) = node.target else {
                    return None;
                };
                let mirror = descendant.rebase(&current, &path)?;
                let points_back = tree.get(&mirror).is_some_and(|mirror_node| {
                    mirror_node.target
                        == RouteTarget::History {
                            content: child,
                            target: descendant.clone(),
                        }
                });
                points_back.then_some((descendant, mirror, child))
            })
            .collect();

        let redirected: Vec<(LocatorPath, ContentUuid, LocatorPath)> = tree
            .iter()
            .filter_map(|(history_path, node)| match &node.target {
                RouteTarget::History { content, target }
                    if *history_path != path
                        && !mirrored.iter().any(|(_, m, _)| m == history_path) =>
                {
                    target
                        .rebase(&current, &path)
                        .map(|rebased| (history_path.clone(), *content, rebased))
                }
                _ => None,
            })
            .collect();

        state.retarget(scope, &path, RouteTarget::Content(content));
        state.retarget(
            scope,
            &current,
            RouteTarget::History {
                content,
                target: path.clone(),
            },
        );
        for (descendant, mirror, child) in &mirrored {
            state.retarget(scope, mirror, RouteTarget::Content(*child));
            state.retarget(
                scope,
                descendant,
                RouteTarget::History {
                    content: *child,
                    target: mirror.clone(),
                },
            );
        }
        for (history_path, content, target) in redirected {
            state.retarget(scope, &history_path, RouteTarget::History { content, target });
        }

        info!(
            "Restored {} over {} in {} ({} descendants)",
            path,
            current,
            scope,
            mirrored.len()
        );
        Ok(())
    }

    fn delete_by_path(&self, path: &str, scope: &LocatorScope) -> EngineResult<()> {
        if path.trim().is_empty() {
            return Err(EngineError::InvalidArgument(
                "the path to delete must not be empty".to_string(),
            ));
        }
        let path = parse_non_root(path)?;

        let mut state = self.state.write();
        let tree = state
            .trees
            .get_mut(scope)
            .ok_or_else(|| EngineError::not_found(path.to_string()))?;
        if !tree.contains_key(&path) {
            return Err(EngineError::not_found(path.to_string()));
        }

        let before = tree.len();
        tree.retain(|node_path, node| {
            if node_path.starts_with(&path) {
                return false;
            }
            !matches!(
                &node.target,
                RouteTarget::History { target, .. } if target.starts_with(&path)
            )
        });

        info!(
            "Deleted {} in {} ({} nodes removed)",
            path,
            scope,
            before - tree.len()
        );
        Ok(())
    }
}
