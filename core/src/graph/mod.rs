//! The module graph: an arena of nodes wired together by source slots.
//!
//! Nodes are addressed by [`NodeId`]s handed out by [`NoiseGraph::add`].
//! A node does not own its sources; several nodes may share one source, so
//! the graph is a DAG. Wiring that would close a cycle is rejected when it is
//! made. Evaluation recurses depth-first from the requested root.

mod description;
mod module;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use description::{GraphDescription, NodeDescription};
pub use module::{CustomGenerator, Module};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::kernel::linear_interp;
use crate::modifiers::blend_alpha;

/// Stable handle of a node inside one [`NoiseGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input coordinate of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Point {
    D3([f64; 3]),
    D6([f64; 6]),
}

impl Point {
    fn sample(self, generator: &dyn NoiseGenerator) -> f64 {
        match self {
            Point::D3([x, y, z]) => generator.get3(x, y, z),
            Point::D6([x, y, z, w, u, v]) => generator.get6(x, y, z, w, u, v),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: Option<String>,
    module: Module,
    sources: Vec<Option<NodeId>>,
}

impl Node {
    // Slots the current module reads. A module swapped in through
    // `module_mut` may need fewer than were allocated.
    fn wired(&self) -> &[Option<NodeId>] {
        let count = self.module.source_count().min(self.sources.len());
        &self.sources[..count]
    }

    // Sizes the slot list to the module's arity; dropped slots are gone,
    // new ones start unset.
    fn settle(&mut self) {
        self.sources.resize(self.module.source_count(), None);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphDescription", into = "GraphDescription")]
pub struct NoiseGraph {
    nodes: Vec<Node>,
}

impl NoiseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds an unwired node and returns its id.
    pub fn add(&mut self, module: impl Into<Module>) -> NodeId {
        self.push(None, module.into())
    }

    pub fn add_named(&mut self, name: impl Into<String>, module: impl Into<Module>) -> NodeId {
        self.push(Some(name.into()), module.into())
    }

    /// Adds a node and connects `sources` to its first slots, in order.
    pub fn add_with_sources(
        &mut self,
        module: impl Into<Module>,
        sources: &[NodeId],
    ) -> Result<NodeId, NoiseError> {
        let module = module.into();
        let count = module.source_count();
        if sources.len() > count {
            return Err(NoiseError::SourceIndexOutOfRange {
                kind: module.kind(),
                index: sources.len() - 1,
                count,
            });
        }
        for &source in sources {
            self.check_id(source)?;
        }
        // A fresh node has no parents, so none of these links can close a cycle.
        let id = self.push(None, module);
        for (slot, &source) in sources.iter().enumerate() {
            self.nodes[id.0].sources[slot] = Some(source);
        }
        Ok(id)
    }

    fn push(&mut self, name: Option<String>, module: Module) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!("added node {id} ({})", module.kind());
        self.nodes.push(Node {
            name,
            sources: vec![None; module.source_count()],
            module,
        });
        id
    }

    fn check_id(&self, id: NodeId) -> Result<(), NoiseError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(NoiseError::UnknownNode(id.0))
        }
    }

    /// Connects `source` to slot `index` of `node`, replacing any previous
    /// source. Rejects out-of-range slots and links that would make `node`
    /// reachable from itself. Every cache in the graph is dropped, since any
    /// node above `node` may now see a different value.
    pub fn set_source(
        &mut self,
        node: NodeId,
        index: usize,
        source: NodeId,
    ) -> Result<(), NoiseError> {
        self.check_id(node)?;
        self.check_id(source)?;

        let module = &self.nodes[node.0].module;
        let count = module.source_count();
        if index >= count {
            return Err(NoiseError::SourceIndexOutOfRange {
                kind: module.kind(),
                index,
                count,
            });
        }
        if self.reaches(source, node) {
            return Err(NoiseError::Cycle {
                node: node.0,
                source_node: source.0,
            });
        }

        let entry = &mut self.nodes[node.0];
        entry.settle();
        entry.sources[index] = Some(source);
        self.clear_caches();
        debug!("connected {source} to slot {index} of {node}");
        Ok(())
    }

    // Whether `target` is `from` or one of its (transitive) sources.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut stack = vec![from];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            stack.extend(self.nodes[id.0].wired().iter().flatten().copied());
        }
        false
    }

    pub fn source(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.nodes
            .get(node.0)
            .and_then(|n| n.wired().get(index).copied().flatten())
    }

    /// Number of sources `node` needs, or `None` for an unknown id.
    pub fn source_count(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(node.0).map(|n| n.module.source_count())
    }

    pub fn module(&self, node: NodeId) -> Option<&Module> {
        self.nodes.get(node.0).map(|n| &n.module)
    }

    /// Mutable access to a node's parameters. Every cache in the graph is
    /// dropped, since any value downstream of this node may change.
    ///
    /// The module may be replaced by one of another kind. Slots beyond the
    /// new kind's arity are disconnected; missing ones start unset.
    pub fn module_mut(&mut self, node: NodeId) -> Option<&mut Module> {
        self.clear_caches();
        for entry in &mut self.nodes {
            entry.settle();
        }
        let entry = self.nodes.get_mut(node.0)?;
        debug!("editing {node} ({})", entry.module.kind());
        Some(&mut entry.module)
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|n| n.name.as_deref())
    }

    pub fn set_name(&mut self, node: NodeId, name: impl Into<String>) -> Result<(), NoiseError> {
        self.check_id(node)?;
        self.nodes[node.0].name = Some(name.into());
        Ok(())
    }

    /// First node carrying `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name.as_deref() == Some(name))
            .map(NodeId)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn clear_caches(&self) {
        for node in &self.nodes {
            if let Some(cache) = node.module.as_cache() {
                cache.clear();
            }
        }
    }

    // Nodes reachable from `root`, root first, each listed once.
    fn reachable(&self, root: NodeId) -> Result<Vec<NodeId>, NoiseError> {
        self.check_id(root)?;
        let mut order = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            order.push(id);
            stack.extend(self.nodes[id.0].wired().iter().flatten().copied());
        }
        Ok(order)
    }

    /// Checks that every node reachable from `root` has all of its sources
    /// connected and valid parameters.
    pub fn validate(&self, root: NodeId) -> Result<(), NoiseError> {
        for id in self.reachable(root)? {
            let node = &self.nodes[id.0];
            node.module.validate()?;
            for index in 0..node.module.source_count() {
                if node.wired().get(index).copied().flatten().is_none() {
                    return Err(NoiseError::MissingSource { node: id.0, index });
                }
            }
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and also rejects nodes that cannot
    /// be evaluated in 6D.
    pub fn validate_6d(&self, root: NodeId) -> Result<(), NoiseError> {
        self.validate(root)?;
        for id in self.reachable(root)? {
            let module = &self.nodes[id.0].module;
            if !module.supports_6d() {
                return Err(NoiseError::Unsupported6d {
                    kind: module.kind(),
                });
            }
        }
        Ok(())
    }

    /// Value of `root` at (x, y, z).
    ///
    /// # Panics
    /// If `root` is unknown or a reachable node is missing a source.
    pub fn get3(&self, root: NodeId, x: f64, y: f64, z: f64) -> f64 {
        self.eval(root, Point::D3([x, y, z]))
    }

    /// Value of `root` at (x, y, z, w, u, v).
    ///
    /// # Panics
    /// As [`get3`](Self::get3), and when a reachable node is 3D-only.
    #[allow(clippy::too_many_arguments)]
    pub fn get6(&self, root: NodeId, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        self.eval(root, Point::D6([x, y, z, w, u, v]))
    }

    /// Borrowed view of `root` usable wherever a [`NoiseGenerator`] is.
    pub fn handle(&self, root: NodeId) -> GraphModule<'_> {
        GraphModule { graph: self, root }
    }

    fn source_id(&self, id: NodeId, node: &Node, index: usize) -> NodeId {
        match node.wired().get(index).copied().flatten() {
            Some(source) => source,
            None => panic!(
                "node {id} ({}) is missing source {index}",
                node.module.kind()
            ),
        }
    }

    fn eval(&self, id: NodeId, p: Point) -> f64 {
        let Some(node) = self.nodes.get(id.0) else {
            panic!("no node {id} in this graph");
        };
        let source = |index: usize| self.source_id(id, node, index);
        let src = |index: usize| self.eval(source(index), p);

        match (&node.module, p) {
            (Module::Billow(g), p) => p.sample(g),
            (Module::Constant(g), p) => p.sample(g),
            (Module::Perlin(g), p) => p.sample(g),
            (Module::RidgedMulti(g), p) => p.sample(g),
            (Module::Custom(g), p) => p.sample(&*g.0),
            (Module::Checkerboard, Point::D3(_)) => p.sample(&crate::generators::Checkerboard),
            (Module::Cylinders(g), Point::D3(_)) => p.sample(g),
            (Module::Spheres(g), Point::D3(_)) => p.sample(g),
            (Module::Voronoi(g), Point::D3(_)) => p.sample(g),

            (Module::Abs, _) => src(0).abs(),
            (Module::Add, _) => src(0) + src(1),
            (Module::Blend, _) => {
                let v0 = src(0);
                let v1 = src(1);
                linear_interp(v0, v1, blend_alpha(src(2)))
            }
            (Module::Cache(cache), p) => cache.get_or_eval(p, || src(0)),
            (Module::Clamp(m), _) => m.apply(src(0)),
            (Module::Curve(m), _) => m.apply(src(0)),
            (Module::Exponent(m), _) => m.apply(src(0)),
            (Module::Invert, _) => -src(0),
            (Module::Max, _) => src(0).max(src(1)),
            (Module::Min, _) => src(0).min(src(1)),
            (Module::Multiply, _) => src(0) * src(1),
            (Module::Power, _) => src(0).powf(src(1)),
            (Module::ScaleBias(m), _) => m.apply(src(0)),
            (Module::Select(m), _) => {
                let control = src(2);
                m.select(control, || src(0), || src(1))
            }
            (Module::Subtract, _) => src(0) - src(1),
            (Module::Terrace(m), _) => m.apply(src(0)),

            (Module::Displace, Point::D3([x, y, z])) => {
                let displaced = [x + src(1), y + src(2), z + src(3)];
                self.eval(source(0), Point::D3(displaced))
            }
            (Module::RotatePoint(m), Point::D3(xyz)) => {
                self.eval(source(0), Point::D3(m.apply(xyz)))
            }
            (Module::ScalePoint(m), Point::D3(xyz)) => {
                self.eval(source(0), Point::D3(m.apply(xyz)))
            }
            (Module::TranslatePoint(m), Point::D3(xyz)) => {
                self.eval(source(0), Point::D3(m.apply(xyz)))
            }
            (Module::Turbulence(m), Point::D3(xyz)) => {
                self.eval(source(0), Point::D3(m.apply(xyz)))
            }

            (module, Point::D6(_)) => panic!("{} cannot be evaluated in 6D", module.kind()),
        }
    }
}

/// A graph node viewed as a [`NoiseGenerator`].
#[derive(Debug, Clone, Copy)]
pub struct GraphModule<'a> {
    graph: &'a NoiseGraph,
    root: NodeId,
}

impl GraphModule<'_> {
    pub fn root(&self) -> NodeId {
        self.root
    }
}

impl NoiseGenerator for GraphModule<'_> {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.graph.get3(self.root, x, y, z)
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        self.graph.get6(self.root, x, y, z, w, u, v)
    }
}
