//! Net Resolver: branch reduction and port derivation for one scope.
//!
//! Resolution never crosses a scope boundary. The nets passed in are those of
//! a single document, and only the blocks of that same document receive ports.

use std::collections::HashMap;

use log::{debug, trace};

use blockforest_core::{
    block::{Block, Ports},
    net::{Branch, Destination, Net},
};

/// A net after branch reduction: one source and all destinations in
/// first-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    src: Option<String>,
    dst: Option<Destination>,
}

impl Connection {
    /// Resolved source SID.
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Resolved destination(s).
    pub fn dst(&self) -> Option<&Destination> {
        self.dst.as_ref()
    }

    /// Returns `true` if the net resolved to neither a source nor a destination.
    pub fn is_empty(&self) -> bool {
        self.src.is_none() && self.dst.is_none()
    }
}

/// Reduces a net and its branch tree to a [`Connection`].
///
/// The net's own `Dst` comes first; branches are then walked depth-first in
/// declaration order, each branch's `Dst` entries before those of the
/// branches nested below it. A branch `Src` only fills in a net that has no source yet.
///
/// # Examples
///
/// ```
/// use blockforest_core::{net::{Branch, Destination, Net}, value::AttributeMap};
/// use blockforest_parser::resolve::reduce_net;
///
/// let to = |sid: &str| {
///     let dst = Destination::Single(sid.to_string());
///     Branch::new(None, Some(dst), Vec::new(), AttributeMap::new())
/// };
/// let net = Net::new(Some("1".to_string()), None, vec![to("2"), to("3")], AttributeMap::new());
///
/// let connection = reduce_net(&net);
/// assert_eq!(connection.src(), Some("1"));
/// assert_eq!(
///     connection.dst(),
///     Some(&Destination::Many(vec!["2".to_string(), "3".to_string()]))
/// );
/// ```
pub fn reduce_net(net: &Net) -> Connection {
    let mut connection = Connection {
        src: net.src().map(str::to_string),
        dst: net.dst().cloned(),
    };

    for branch in net.branches() {
        reduce_branch(branch, &mut connection);
    }

    connection
}

fn reduce_branch(branch: &Branch, connection: &mut Connection) {
    if let Some(src) = branch.src() {
        match connection.src.as_deref() {
            None => connection.src = Some(src.to_string()),
            Some(existing) if existing != src => {
                trace!(existing, ignored = src; "Branch source differs from net source");
            }
            Some(_) => {}
        }
    }

    for sid in branch.dst().into_iter().flatten() {
        Destination::merge(&mut connection.dst, sid.as_str());
    }

    for nested in branch.branches() {
        reduce_branch(nested, connection);
    }
}

/// Accumulated neighbors of one SID.
#[derive(Default)]
struct Neighbors<'a> {
    inputs: Vec<&'a str>,
    outputs: Vec<&'a str>,
}

/// Attaches resolved [`Ports`] to every block of a scope.
///
/// For each net, in document order: every destination is appended to the
/// source block's outputs, and the source is appended once to the inputs of
/// each distinct destination block. Blocks without a SID, or that no net
/// touches, get empty ports.
pub fn resolve_ports(blocks: Vec<Block>, nets: &[Net]) -> Vec<Block> {
    let connections: Vec<Connection> = nets.iter().map(reduce_net).collect();

    let mut neighbors: HashMap<&str, Neighbors> = HashMap::new();
    for connection in &connections {
        if connection.is_empty() {
            trace!("Skipping net without endpoints");
            continue;
        }

        let (Some(src), Some(dst)) = (connection.src(), connection.dst()) else {
            continue;
        };

        neighbors
            .entry(src)
            .or_default()
            .outputs
            .extend(dst.iter().map(String::as_str));

        let mut seen: Vec<&str> = Vec::with_capacity(dst.len());
        for target in dst.iter().map(String::as_str) {
            if !seen.contains(&target) {
                seen.push(target);
                neighbors.entry(target).or_default().inputs.push(src);
            }
        }
    }

    debug!(blocks = blocks.len(), nets = nets.len(); "Resolved scope ports");

    blocks
        .into_iter()
        .map(|block| {
            let ports = block
                .sid()
                .and_then(|sid| neighbors.get(sid))
                .map(|entry| {
                    Ports::new(
                        entry.inputs.iter().map(|sid| sid.to_string()).collect(),
                        entry.outputs.iter().map(|sid| sid.to_string()).collect(),
                    )
                })
                .unwrap_or_default();
            block.with_ports(ports)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use blockforest_core::value::AttributeMap;

    use super::*;

    fn block(sid: &str) -> Block {
        let mut attributes = AttributeMap::new();
        attributes.insert("SID".to_string(), sid.into());
        Block::new(attributes)
    }

    fn branch(dst: Option<&str>, nested: Vec<Branch>) -> Branch {
        Branch::new(
            None,
            dst.map(|sid| Destination::Single(sid.to_string())),
            nested,
            AttributeMap::new(),
        )
    }

    fn net(src: Option<&str>, dst: Option<&str>, branches: Vec<Branch>) -> Net {
        Net::new(
            src.map(str::to_string),
            dst.map(|sid| Destination::Single(sid.to_string())),
            branches,
            AttributeMap::new(),
        )
    }

    fn outputs(block: &Block) -> Vec<&str> {
        block.ports().outputs().iter().map(String::as_str).collect()
    }

    fn inputs(block: &Block) -> Vec<&str> {
        block.ports().inputs().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_reduce_depth_first_order() {
        // 1 -> [2 -> [3, 4], 5], with the net's own Dst 6 first
        let net = net(
            Some("1"),
            Some("6"),
            vec![
                branch(Some("2"), vec![branch(Some("3"), vec![]), branch(Some("4"), vec![])]),
                branch(Some("5"), vec![]),
            ],
        );

        let connection = reduce_net(&net);
        let dst: Vec<_> = connection.dst().unwrap().iter().map(String::as_str).collect();
        assert_eq!(dst, ["6", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_reduce_branch_source_fills_missing() {
        let with_src = Branch::new(
            Some("9".to_string()),
            Some(Destination::Single("2".to_string())),
            Vec::new(),
            AttributeMap::new(),
        );
        let net = net(None, None, vec![with_src]);

        let connection = reduce_net(&net);
        assert_eq!(connection.src(), Some("9"));
        assert_eq!(connection.dst(), Some(&Destination::Single("2".to_string())));
    }

    #[test]
    fn test_reduce_merges_every_branch_destination() {
        let fan_out = Branch::new(
            None,
            Some(Destination::Single("2".to_string()).promote("3")),
            vec![branch(Some("4"), vec![])],
            AttributeMap::new(),
        );
        let net = net(Some("1"), None, vec![fan_out]);

        let connection = reduce_net(&net);
        let dst: Vec<_> = connection.dst().unwrap().iter().map(String::as_str).collect();
        assert_eq!(dst, ["2", "3", "4"]);
    }

    #[test]
    fn test_reduce_keeps_net_source() {
        let with_src = Branch::new(
            Some("9".to_string()),
            Some(Destination::Single("2".to_string())),
            Vec::new(),
            AttributeMap::new(),
        );
        let net = net(Some("1"), None, vec![with_src]);

        assert_eq!(reduce_net(&net).src(), Some("1"));
    }

    #[test]
    fn test_point_to_point() {
        let blocks = resolve_ports(
            vec![block("S1"), block("S2")],
            &[net(Some("S1"), Some("S2"), vec![])],
        );

        assert_eq!(outputs(&blocks[0]), ["S2"]);
        assert!(inputs(&blocks[0]).is_empty());
        assert_eq!(inputs(&blocks[1]), ["S1"]);
        assert!(outputs(&blocks[1]).is_empty());
    }

    #[test]
    fn test_fan_out() {
        let blocks = resolve_ports(
            vec![block("S1"), block("S2"), block("S3")],
            &[net(
                Some("S1"),
                None,
                vec![branch(Some("S2"), vec![]), branch(Some("S3"), vec![])],
            )],
        );

        assert_eq!(outputs(&blocks[0]), ["S2", "S3"]);
        assert_eq!(inputs(&blocks[1]), ["S1"]);
        assert_eq!(inputs(&blocks[2]), ["S1"]);
    }

    #[test]
    fn test_accumulates_in_net_order() {
        let blocks = resolve_ports(
            vec![block("A"), block("B"), block("C")],
            &[
                net(Some("A"), Some("C"), vec![]),
                net(Some("B"), Some("C"), vec![]),
                net(Some("A"), Some("B"), vec![]),
            ],
        );

        assert_eq!(outputs(&blocks[0]), ["C", "B"]);
        assert_eq!(inputs(&blocks[1]), ["A"]);
        assert_eq!(inputs(&blocks[2]), ["A", "B"]);
    }

    #[test]
    fn test_malformed_nets_contribute_nothing() {
        let blocks = resolve_ports(
            vec![block("A"), block("B")],
            &[
                net(None, None, vec![branch(None, vec![])]),
                net(Some("A"), None, vec![]),
                net(None, Some("B"), vec![]),
            ],
        );

        assert_eq!(blocks[0].ports(), &Ports::default());
        assert_eq!(blocks[1].ports(), &Ports::default());
    }

    #[test]
    fn test_duplicate_destination_adds_single_input() {
        let blocks = resolve_ports(
            vec![block("A"), block("B")],
            &[net(Some("A"), Some("B"), vec![branch(Some("B"), vec![])])],
        );

        assert_eq!(outputs(&blocks[0]), ["B", "B"]);
        assert_eq!(inputs(&blocks[1]), ["A"]);
    }
}
