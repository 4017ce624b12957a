use {
    num::Zero,
    std::{
        cmp::Ordering,
        collections::{hash_map::Entry, BinaryHeap, HashMap, HashSet},
        hash::Hash,
        ops::Add,
    },
};

/// A directed edge from `source` to `target`, traversable at `weight` cost
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge<V, C> {
    pub source: V,
    pub target: V,
    pub weight: C,
}

#[derive(Debug, PartialEq)]
pub enum GraphError<V> {
    /// An edge or a query referenced a node that was never registered. This is an
    /// internal-consistency error, not something input text can produce.
    NodeNotFound(V),

    /// The open set emptied before the end node was popped: no route exists. Callers are expected
    /// to handle this outcome, not crash on it.
    PathNotFound,
}

struct OpenSetElement<V, C>(V, C);

impl<V, C: Ord> PartialEq for OpenSetElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<V, C: Ord> PartialOrd for OpenSetElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Reverse the order so that cost is minimized when popping from the heap
        Some(other.1.cmp(&self.1))
    }
}

impl<V, C: Ord> Eq for OpenSetElement<V, C> {}

impl<V, C: Ord> Ord for OpenSetElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that cost is minimized when popping from the heap
        other.1.cmp(&self.1)
    }
}

struct PathState<V, C> {
    cost: C,
    previous: Option<Edge<V, C>>,
}

/// A weighted directed graph over explicitly registered nodes
///
/// Nodes are registered before edges may reference them. Once built, the graph is read-only:
/// queries take `&self`, so independent callers may share one graph freely.
#[derive(Clone, Debug)]
pub struct WeightedGraph<V, C> {
    nodes: HashSet<V>,
    edges: HashMap<V, Vec<Edge<V, C>>>,
}

impl<V: Clone + Eq + Hash, C> WeightedGraph<V, C> {
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
            edges: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: V) {
        self.nodes.insert(node);
    }

    #[inline]
    pub fn contains_node(&self, node: &V) -> bool {
        self.nodes.contains(node)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Outgoing edges of `node`, in insertion order
    pub fn edges(&self, node: &V) -> &[Edge<V, C>] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    /// Adds a directed edge, failing with `NodeNotFound` if either endpoint was never registered
    pub fn try_add_edge(&mut self, source: V, target: V, weight: C) -> Result<(), GraphError<V>> {
        if !self.nodes.contains(&source) {
            Err(GraphError::NodeNotFound(source))
        } else if !self.nodes.contains(&target) {
            Err(GraphError::NodeNotFound(target))
        } else {
            self.edges.entry(source.clone()).or_default().push(Edge {
                source,
                target,
                weight,
            });

            Ok(())
        }
    }
}

impl<V: Clone + Eq + Hash, C> Default for WeightedGraph<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Eq + Hash, C: PartialEq> PartialEq for WeightedGraph<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl<V: Clone + Eq + Hash, C: Add<Output = C> + Copy + Ord + Zero> WeightedGraph<V, C> {
    /// Finds a cheapest path from `start` to `end`, returning its total cost and its edges in
    /// traversal order
    ///
    /// Dijkstra's algorithm over a binary heap keyed by tentative distance, popping the cheapest
    /// unfinalized node and relaxing its outgoing edges. The search exits as soon as `end` is
    /// popped: with non-negative weights, no cheaper route to it can surface later. Stale heap
    /// entries are skipped via the visited set rather than re-keyed in place.
    ///
    /// Among equal-cost routes the edge sequence is unspecified; the cost is not.
    pub fn shortest_path(&self, start: V, end: V) -> Result<(C, Vec<Edge<V, C>>), GraphError<V>> {
        if !self.nodes.contains(&start) {
            return Err(GraphError::NodeNotFound(start));
        }

        if !self.nodes.contains(&end) {
            return Err(GraphError::NodeNotFound(end));
        }

        let mut path_states: HashMap<V, PathState<V, C>> =
            HashMap::with_capacity(self.nodes.len());
        let mut visited: HashSet<V> = HashSet::with_capacity(self.nodes.len());
        let mut open_set: BinaryHeap<OpenSetElement<V, C>> = BinaryHeap::new();

        path_states.insert(
            start.clone(),
            PathState {
                cost: C::zero(),
                previous: None,
            },
        );
        open_set.push(OpenSetElement(start, C::zero()));

        while let Some(OpenSetElement(node, cost)) = open_set.pop() {
            if node == end {
                return Ok((cost, Self::backtrack(&path_states, end)));
            }

            if !visited.insert(node.clone()) {
                continue;
            }

            for edge in self.edges(&node) {
                let target_cost: C = cost + edge.weight;

                match path_states.entry(edge.target.clone()) {
                    Entry::Occupied(mut entry) => {
                        if target_cost < entry.get().cost {
                            entry.insert(PathState {
                                cost: target_cost,
                                previous: Some(edge.clone()),
                            });
                            open_set.push(OpenSetElement(edge.target.clone(), target_cost));
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(PathState {
                            cost: target_cost,
                            previous: Some(edge.clone()),
                        });
                        open_set.push(OpenSetElement(edge.target.clone(), target_cost));
                    }
                }
            }
        }

        Err(GraphError::PathNotFound)
    }

    /// O(V²) variant of [`shortest_path`](Self::shortest_path) that scans the distance table for
    /// the cheapest unvisited node instead of keeping a heap. Only worthwhile for very small
    /// graphs; `shortest_path` is the primary entry point.
    pub fn shortest_path_linear_scan(
        &self,
        start: V,
        end: V,
    ) -> Result<(C, Vec<Edge<V, C>>), GraphError<V>> {
        if !self.nodes.contains(&start) {
            return Err(GraphError::NodeNotFound(start));
        }

        if !self.nodes.contains(&end) {
            return Err(GraphError::NodeNotFound(end));
        }

        let mut path_states: HashMap<V, PathState<V, C>> =
            HashMap::with_capacity(self.nodes.len());
        let mut visited: HashSet<V> = HashSet::with_capacity(self.nodes.len());

        path_states.insert(
            start,
            PathState {
                cost: C::zero(),
                previous: None,
            },
        );

        loop {
            let nearest: Option<(V, C)> = path_states
                .iter()
                .filter(|(node, _)| !visited.contains(*node))
                .min_by_key(|(_, path_state)| path_state.cost)
                .map(|(node, path_state)| (node.clone(), path_state.cost));

            let (node, cost): (V, C) = match nearest {
                Some(nearest) => nearest,
                None => return Err(GraphError::PathNotFound),
            };

            if node == end {
                return Ok((cost, Self::backtrack(&path_states, end)));
            }

            visited.insert(node.clone());

            for edge in self.edges(&node) {
                let target_cost: C = cost + edge.weight;

                if path_states
                    .get(&edge.target)
                    .map_or(true, |path_state: &PathState<V, C>| {
                        target_cost < path_state.cost
                    })
                {
                    path_states.insert(
                        edge.target.clone(),
                        PathState {
                            cost: target_cost,
                            previous: Some(edge.clone()),
                        },
                    );
                }
            }
        }
    }

    fn backtrack(path_states: &HashMap<V, PathState<V, C>>, end: V) -> Vec<Edge<V, C>> {
        let mut path: Vec<Edge<V, C>> = Vec::new();
        let mut node: V = end;

        while let Some(edge) = path_states
            .get(&node)
            .and_then(|path_state: &PathState<V, C>| path_state.previous.clone())
        {
            node = edge.source.clone();
            path.push(edge);
        }

        path.reverse();

        path
    }
}
