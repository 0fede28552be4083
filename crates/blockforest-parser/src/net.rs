//! Parsing of `Line` and `Branch` elements into raw [`Net`]s.
//!
//! Endpoint text is reduced to bare SIDs here, at every level, so nothing
//! downstream ever sees a `#<port>` suffix.

use log::trace;
use roxmltree::Node;

use blockforest_core::{
    net::{Branch, Destination, Net, strip_port_suffix},
    value::{AttributeMap, Value},
};

use crate::normalize::{element_text, parameter_name};

/// Bare SID of an endpoint reference, or `None` if nothing is left after
/// stripping the port suffix.
fn endpoint(node: Node) -> Option<String> {
    let sid = strip_port_suffix(element_text(node));
    (!sid.is_empty()).then(|| sid.to_string())
}

/// Parses one `Line` element.
///
/// Repeated `Dst` parameters are merged with [`Destination::merge`], on the
/// line itself and on every branch below it.
pub(crate) fn parse_net(line: Node) -> Net {
    let mut src = None;
    let mut dst = None;
    let mut branches = Vec::new();
    let mut attributes = AttributeMap::new();

    for child in line.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "P" => match parameter_name(child) {
                Some("Src") => src = endpoint(child),
                Some("Dst") => {
                    if let Some(sid) = endpoint(child) {
                        Destination::merge(&mut dst, sid);
                    }
                }
                Some(name) => {
                    attributes.insert(name.to_string(), Value::from(element_text(child)));
                }
                None => {}
            },
            "Branch" => branches.push(parse_branch(child)),
            other => trace!(tag = other; "Ignoring unknown line child"),
        }
    }

    Net::new(src, dst, branches, attributes)
}

/// Parses one `Branch` element and everything nested below it.
fn parse_branch(node: Node) -> Branch {
    let mut src = None;
    let mut dst = None;
    let mut branches = Vec::new();
    let mut attributes = AttributeMap::new();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "P" => match parameter_name(child) {
                Some("Src") => src = endpoint(child),
                Some("Dst") => {
                    if let Some(sid) = endpoint(child) {
                        Destination::merge(&mut dst, sid);
                    }
                }
                Some(name) => {
                    attributes.insert(name.to_string(), Value::from(element_text(child)));
                }
                None => {}
            },
            "Branch" => branches.push(parse_branch(child)),
            other => trace!(tag = other; "Ignoring unknown branch child"),
        }
    }

    Branch::new(src, dst, branches, attributes)
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn parse(text: &str) -> Net {
        let doc = Document::parse(text).unwrap();
        parse_net(doc.root_element())
    }

    #[test]
    fn test_simple_line() {
        let net = parse(
            r#"<Line><P Name="ZOrder">1</P><P Name="Src">5#out:1</P><P Name="Dst">6#in:1</P></Line>"#,
        );

        assert_eq!(net.src(), Some("5"));
        assert_eq!(net.dst(), Some(&Destination::Single("6".to_string())));
        assert!(net.branches().is_empty());
        assert_eq!(net.attributes().get("ZOrder"), Some(&Value::from("1")));
    }

    #[test]
    fn test_nested_branches_strip_suffix() {
        let net = parse(
            r#"<Line>
                <P Name="Src">B1#1</P>
                <Branch>
                    <P Name="Points">[10, 0]</P>
                    <Branch><P Name="Dst">B2#1</P></Branch>
                    <Branch><P Name="Dst">B3#2</P></Branch>
                </Branch>
            </Line>"#,
        );

        assert_eq!(net.src(), Some("B1"));
        assert!(net.dst().is_none());
        let outer = &net.branches()[0];
        assert_eq!(outer.dst(), None);
        assert_eq!(outer.attributes().get("Points"), Some(&Value::from("[10, 0]")));
        assert_eq!(
            outer.branches()[0].dst(),
            Some(&Destination::Single("B2".to_string()))
        );
        assert_eq!(
            outer.branches()[1].dst(),
            Some(&Destination::Single("B3".to_string()))
        );
    }

    #[test]
    fn test_empty_endpoints_are_absent() {
        let net = parse(r#"<Line><P Name="Src"></P><P Name="Dst">#in:1</P></Line>"#);

        assert!(net.src().is_none());
        assert!(net.dst().is_none());
    }

    #[test]
    fn test_repeated_line_destinations_promote() {
        let net = parse(r#"<Line><P Name="Src">1</P><P Name="Dst">2</P><P Name="Dst">3</P></Line>"#);

        assert_eq!(
            net.dst(),
            Some(&Destination::Many(vec!["2".to_string(), "3".to_string()]))
        );
    }

    #[test]
    fn test_repeated_branch_destinations_promote() {
        let net = parse(
            r#"<Line>
                <P Name="Src">1</P>
                <Branch><P Name="Dst">2#in:1</P><P Name="Dst">3#in:1</P><P Name="Dst"></P></Branch>
            </Line>"#,
        );

        assert_eq!(
            net.branches()[0].dst(),
            Some(&Destination::Many(vec!["2".to_string(), "3".to_string()]))
        );
    }
}
