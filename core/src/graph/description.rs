use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{Module, NodeId, NoiseGraph};
use crate::error::NoiseError;

/// Serialized form of one node: its parameters and the ids wired to its
/// source slots, in slot order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub module: Module,
    #[serde(default)]
    pub sources: Vec<Option<NodeId>>,
}

/// Serialized form of a whole [`NoiseGraph`]. Node ids are positions in
/// `nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<NodeDescription>,
}

impl From<NoiseGraph> for GraphDescription {
    fn from(graph: NoiseGraph) -> Self {
        let nodes = graph
            .nodes
            .into_iter()
            .map(|mut node| {
                node.settle();
                NodeDescription {
                    name: node.name,
                    module: node.module,
                    sources: node.sources,
                }
            })
            .collect();
        Self { nodes }
    }
}

impl TryFrom<GraphDescription> for NoiseGraph {
    type Error = NoiseError;

    /// Rebuilds the graph, checking module parameters, source arities, ids
    /// and acyclicity the same way the editing API does.
    fn try_from(description: GraphDescription) -> Result<Self, Self::Error> {
        let mut graph = NoiseGraph::new();
        let mut wiring = Vec::with_capacity(description.nodes.len());
        for node in description.nodes {
            node.module.validate()?;
            let count = node.module.source_count();
            if node.sources.len() > count {
                return Err(NoiseError::SourceIndexOutOfRange {
                    kind: node.module.kind(),
                    index: node.sources.len() - 1,
                    count,
                });
            }
            let id = graph.push(node.name, node.module);
            wiring.push((id, node.sources));
        }

        for (id, sources) in wiring {
            for (index, source) in sources.into_iter().enumerate() {
                if let Some(source) = source {
                    graph.set_source(id, index, source)?;
                }
            }
        }
        debug!("rebuilt graph with {} nodes", graph.len());
        Ok(graph)
    }
}

impl NoiseGraph {
    /// Serializes the graph's structure and parameters.
    ///
    /// Fails on parameters [`from_ron`](Self::from_ron) would reject, such as
    /// a Terrace or Curve without enough control points, so every saved
    /// document loads back. Unwired slots are fine. Custom generators have no
    /// serialized form and make this fail too.
    pub fn to_ron(&self) -> Result<String, NoiseError> {
        for node in &self.nodes {
            node.module.validate()?;
        }
        let description = GraphDescription::from(self.clone());
        let text = ron::ser::to_string_pretty(&description, ron::ser::PrettyConfig::default())?;
        Ok(text)
    }

    pub fn from_ron(text: &str) -> Result<Self, NoiseError> {
        let description: GraphDescription = ron::from_str(text)?;
        let graph = NoiseGraph::try_from(description)?;
        info!("loaded graph with {} nodes", graph.len());
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphDescription, NodeDescription};
    use crate::error::NoiseError;
    use crate::generators::{Constant, Perlin, RidgedMulti};
    use crate::graph::{Module, NodeId, NoiseGraph};
    use crate::modifiers::{Cache, Curve, Terrace, Turbulence};

    fn sample_graph() -> (NoiseGraph, NodeId) {
        let mut g = NoiseGraph::new();
        let base = g.add_named("base", Perlin::new(3).with_frequency(1.5));
        let bias = g.add(Constant::new(0.25));
        let sum = g.add_with_sources(Module::Add, &[base, bias]).unwrap();
        let cache = g.add_with_sources(Cache::new(), &[sum]).unwrap();
        g.set_name(cache, "out").unwrap();
        (g, cache)
    }

    #[test]
    fn ron_round_trip() {
        let (g, out) = sample_graph();
        let text = g.to_ron().unwrap();
        let back = NoiseGraph::from_ron(&text).unwrap();
        assert_eq!(back.len(), g.len());
        assert_eq!(back.find("out"), Some(out));
        assert_eq!(back.find("base"), g.find("base"));
        for &(x, y, z) in &[(0.1, 0.2, 0.3), (-4.5, 2.0, 7.25)] {
            assert_eq!(back.get3(out, x, y, z), g.get3(out, x, y, z));
        }
    }

    #[test]
    fn custom_modules_do_not_serialize() {
        let mut g = NoiseGraph::new();
        g.add(Module::custom(Constant::new(1.0)));
        assert!(matches!(g.to_ron(), Err(NoiseError::Serialize(_))));
    }

    #[test]
    fn bad_text_is_a_parse_error() {
        assert!(matches!(
            NoiseGraph::from_ron("(nodes: ["),
            Err(NoiseError::Parse(_))
        ));
    }

    #[test]
    fn cyclic_description_is_rejected() {
        let description = GraphDescription {
            nodes: vec![
                NodeDescription {
                    name: None,
                    module: Module::Abs,
                    sources: vec![Some(NodeId(1))],
                },
                NodeDescription {
                    name: None,
                    module: Module::Invert,
                    sources: vec![Some(NodeId(0))],
                },
            ],
        };
        assert!(matches!(
            NoiseGraph::try_from(description),
            Err(NoiseError::Cycle { .. })
        ));
    }

    #[test]
    fn dangling_ids_are_rejected() {
        let description = GraphDescription {
            nodes: vec![NodeDescription {
                name: None,
                module: Module::Abs,
                sources: vec![Some(NodeId(5))],
            }],
        };
        assert!(matches!(
            NoiseGraph::try_from(description),
            Err(NoiseError::UnknownNode(5))
        ));
    }

    #[test]
    fn too_many_sources_are_rejected() {
        let description = GraphDescription {
            nodes: vec![
                NodeDescription {
                    name: None,
                    module: Constant::new(0.0).into(),
                    sources: vec![],
                },
                NodeDescription {
                    name: None,
                    module: Module::Abs,
                    sources: vec![Some(NodeId(0)), Some(NodeId(0))],
                },
            ],
        };
        assert!(matches!(
            NoiseGraph::try_from(description),
            Err(NoiseError::SourceIndexOutOfRange { index: 1, count: 1, .. })
        ));
    }

    #[test]
    fn loaded_modules_are_validated() {
        let text = r#"(nodes: [(module: Perlin((octave_count: 0)))])"#;
        assert!(matches!(
            NoiseGraph::from_ron(text),
            Err(NoiseError::InvalidOctaveCount { count: 0, .. })
        ));
    }

    #[test]
    fn loaded_terrace_needs_points() {
        let text = r#"(nodes: [(module: Terrace((control_points: [0.5])))])"#;
        assert!(matches!(
            NoiseGraph::from_ron(text),
            Err(NoiseError::NotEnoughControlPoints { needed: 2, count: 1 })
        ));
    }

    #[test]
    fn unloadable_parameters_are_not_saved() {
        let mut g = NoiseGraph::new();
        let c = g.add(Constant::new(0.0));
        let t = g.add_with_sources(Terrace::new(), &[c]).unwrap();
        assert!(matches!(
            g.to_ron(),
            Err(NoiseError::NotEnoughControlPoints { needed: 2, count: 0 })
        ));
        if let Some(Module::Terrace(terrace)) = g.module_mut(t) {
            terrace.make_control_points(2).unwrap();
        }
        g.add(Curve::new());
        assert!(matches!(
            g.to_ron(),
            Err(NoiseError::NotEnoughControlPoints { needed: 4, count: 0 })
        ));
    }

    #[test]
    fn swapped_module_round_trips() {
        let mut g = NoiseGraph::new();
        let c = g.add(Constant::new(-0.5));
        let node = g.add_with_sources(Module::Blend, &[c, c, c]).unwrap();
        if let Some(module) = g.module_mut(node) {
            *module = Module::Abs;
        }
        assert!(g.validate(node).is_ok());
        let back = NoiseGraph::from_ron(&g.to_ron().unwrap()).unwrap();
        assert_eq!(back.source(node, 0), Some(c));
        assert_eq!(back.get3(node, 0.0, 0.0, 0.0), 0.5);
    }

    #[test]
    fn octave_errors_match_across_generators() {
        for text in [
            r#"(nodes: [(module: RidgedMulti((octave_count: 0)))])"#,
            r#"(nodes: [(module: Turbulence((roughness: 31)))])"#,
        ] {
            assert!(matches!(
                NoiseGraph::from_ron(text),
                Err(NoiseError::InvalidOctaveCount { .. })
            ));
        }
    }

    #[test]
    fn turbulence_saves_its_parameters() {
        let mut g = NoiseGraph::new();
        let r = g.add(RidgedMulti::new(4));
        let t = g
            .add_with_sources(Turbulence::new(12).with_power(0.5), &[r])
            .unwrap();
        let text = g.to_ron().unwrap();
        assert!(text.contains("roughness"));
        let back = NoiseGraph::from_ron(&text).unwrap();
        for &(x, y, z) in &[(0.2, 0.4, 0.6), (-3.5, 1.25, 9.0)] {
            assert_eq!(back.get3(t, x, y, z), g.get3(t, x, y, z));
        }
    }

    #[test]
    fn partial_wiring_survives() {
        let mut g = NoiseGraph::new();
        let c = g.add(Constant::new(0.5));
        let mut terrace = Terrace::new();
        terrace.make_control_points(3).unwrap();
        let t = g.add(terrace);
        g.set_source(t, 0, c).unwrap();
        let _unwired = g.add(Module::Blend);
        let back = NoiseGraph::from_ron(&g.to_ron().unwrap()).unwrap();
        assert_eq!(back.source(t, 0), Some(c));
        assert_eq!(back.source(NodeId(2), 0), None);
    }
}
