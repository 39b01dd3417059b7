//! Item recipe graph.
//!
//! Provides [`RecipeGraph`], the build tree of the shop as a directed graph:
//! an edge runs from each component to the item it builds into. The graph is
//! derived locally from the `from` lists kept on cleaned Data Dragon items;
//! neither feed publishes it.

use crate::error::DataError;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Components and upgrades of items, keyed by item id.
///
/// # Examples
///
/// ```rust
/// use riftstat::data::recipe::RecipeGraph;
///
/// let mut graph = RecipeGraph::new();
/// // Pickaxe builds from Long Sword
/// graph.add_recipe("1037", "1036");
///
/// let order = graph.build_order(&["1037"]).unwrap();
/// assert_eq!(order, vec!["1036".to_string(), "1037".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl RecipeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from merged item data, using each item's `from` list.
    ///
    /// Components that are not themselves in `items` still become nodes.
    pub fn from_items(items: &Map<String, Value>) -> Self {
        let mut graph = Self::new();
        for (id, item) in items {
            graph.add_item(id);
            let components = item
                .get("from")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str);
            for component in components {
                graph.add_recipe(id, component);
            }
        }
        graph
    }

    /// Add an item if it is not in the graph yet.
    pub fn add_item(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(id.to_string());
            self.node_map.insert(id.to_string(), idx);
            idx
        }
    }

    /// Record that `upgrade` builds from `component`.
    ///
    /// Repeated components (two Long Swords) are stored once.
    pub fn add_recipe(&mut self, upgrade: &str, component: &str) {
        let upgrade_idx = self.add_item(upgrade);
        let component_idx = self.add_item(component);
        self.graph.update_edge(component_idx, upgrade_idx, ());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct components of `id`, sorted.
    pub fn direct_components(&self, id: &str) -> Vec<String> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Items `id` builds into, sorted.
    pub fn upgrades(&self, id: &str) -> Vec<String> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.node_map.get(id) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Every item needed to build `id`, at any depth, without duplicates.
    ///
    /// The item itself is not included. Unknown ids have no components.
    pub fn components(&self, id: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = self.direct_components(id);
        stack.reverse();

        while let Some(component) = stack.pop() {
            if component == id || !visited.insert(component.clone()) {
                continue;
            }
            let mut next = self.direct_components(&component);
            next.reverse();
            stack.extend(next);
            found.push(component);
        }
        found
    }

    /// Detect recipe cycles.
    ///
    /// # Errors
    ///
    /// [`DataError::RecipeCycle`] with the closed cycle path, e.g.
    /// `[A, B, A]`.
    pub fn detect_cycles(&self) -> Result<(), DataError> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();

        for node_idx in self.graph.node_indices() {
            if !visited.contains(&node_idx) {
                let mut cycle_path = Vec::new();
                if let Some(cycle) =
                    self.dfs_cycle_detect(node_idx, &mut visited, &mut rec_stack, &mut cycle_path)
                {
                    return Err(cycle);
                }
            }
        }
        Ok(())
    }

    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        rec_stack: &mut HashSet<NodeIndex>,
        cycle_path: &mut Vec<NodeIndex>,
    ) -> Option<DataError> {
        visited.insert(node);
        rec_stack.insert(node);
        cycle_path.push(node);

        for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&neighbor) {
                if let Some(cycle) = self.dfs_cycle_detect(neighbor, visited, rec_stack, cycle_path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&neighbor) {
                // neighbor is on the stack, so it is in cycle_path
                let start = cycle_path
                    .iter()
                    .position(|&idx| idx == neighbor)
                    .unwrap_or(0);
                let mut path: Vec<String> = cycle_path[start..]
                    .iter()
                    .map(|&idx| self.graph[idx].clone())
                    .collect();
                path.push(self.graph[neighbor].clone());
                return Some(DataError::RecipeCycle { path });
            }
        }

        rec_stack.remove(&node);
        cycle_path.pop();
        None
    }

    /// Order in which to buy `targets` and everything they build from:
    /// components always come before the items that use them.
    ///
    /// Unknown targets are included as standalone items.
    pub fn build_order(&self, targets: &[&str]) -> Result<Vec<String>, DataError> {
        let mut subgraph = Self::new();
        for &target in targets {
            subgraph.add_item(target);
            for component in self.components(target) {
                subgraph.add_item(&component);
            }
        }
        for edge in self.graph.raw_edges() {
            let component = &self.graph[edge.source()];
            let upgrade = &self.graph[edge.target()];
            if subgraph.contains(component) && subgraph.contains(upgrade) {
                subgraph.add_recipe(upgrade, component);
            }
        }

        subgraph.detect_cycles()?;
        match toposort(&subgraph.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .map(|idx| subgraph.graph[idx].clone())
                .collect()),
            Err(cycle) => Err(DataError::RecipeCycle {
                path: vec![subgraph.graph[cycle.node_id()].clone()],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shop() -> RecipeGraph {
        let items = json!({
            "1036": {"name": "Long Sword", "from": []},
            "1037": {"name": "Pickaxe"},
            "1038": {"name": "B. F. Sword"},
            "3133": {"name": "Caulfield's Warhammer", "from": ["1036", "1036"]},
            "3071": {"name": "Black Cleaver", "from": ["3133", "1028", "1036"]},
            "3031": {"name": "Infinity Edge", "from": ["1038", "1037", "1036"]}
        });
        RecipeGraph::from_items(items.as_object().unwrap())
    }

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|x| x == id).unwrap()
    }

    #[test]
    fn test_from_items_nodes() {
        let graph = shop();
        // 1028 only appears as a component
        assert!(graph.contains("1028"));
        assert_eq!(graph.len(), 7);
        assert_eq!(graph.direct_components("3133"), vec!["1036"]);
        assert_eq!(graph.upgrades("1036"), vec!["3031", "3071", "3133"]);
    }

    #[test]
    fn test_components_transitive_dedup() {
        let graph = shop();
        let mut components = graph.components("3071");
        components.sort();
        assert_eq!(components, vec!["1028", "1036", "3133"]);
        assert!(graph.components("1036").is_empty());
        assert!(graph.components("9999").is_empty());
    }

    #[test]
    fn test_build_order_components_first() {
        let graph = shop();
        let order = graph.build_order(&["3071"]).unwrap();
        assert_eq!(order.len(), 4);
        assert!(position(&order, "1036") < position(&order, "3133"));
        assert!(position(&order, "3133") < position(&order, "3071"));
        assert!(position(&order, "1028") < position(&order, "3071"));
        assert!(!order.contains(&"3031".to_string()));
    }

    #[test]
    fn test_build_order_multiple_targets() {
        let graph = shop();
        let order = graph.build_order(&["3031", "3133"]).unwrap();
        assert_eq!(order.len(), 5);
        assert!(position(&order, "1038") < position(&order, "3031"));
        assert!(position(&order, "1036") < position(&order, "3133"));
    }

    #[test]
    fn test_no_cycle() {
        assert!(shop().detect_cycles().is_ok());
    }

    #[test]
    fn test_cycle_path() {
        let mut graph = RecipeGraph::new();
        graph.add_recipe("B", "A");
        graph.add_recipe("C", "B");
        graph.add_recipe("A", "C");

        match graph.detect_cycles() {
            Err(DataError::RecipeCycle { path }) => {
                assert_eq!(path.len(), 4);
                assert_eq!(path[0], path[3]);
            }
            other => panic!("expected RecipeCycle, got {other:?}"),
        }
        assert!(graph.build_order(&["A"]).is_err());
    }

    #[test]
    fn test_self_cycle() {
        let mut graph = RecipeGraph::new();
        graph.add_recipe("A", "A");
        match graph.detect_cycles() {
            Err(DataError::RecipeCycle { path }) => assert_eq!(path, vec!["A", "A"]),
            other => panic!("expected RecipeCycle, got {other:?}"),
        }
    }
}
