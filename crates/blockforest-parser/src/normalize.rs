//! Record normalization helpers.
//!
//! These turn the heterogeneous children of a `Block` element (`P`, `Mask`,
//! `Port`) into entries of a uniform [`AttributeMap`].

use log::{debug, trace};
use roxmltree::Node;

use blockforest_core::{
    block::keys,
    value::{AttributeMap, Value},
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    scope::DocumentContext,
};

/// Returns the first element child of `node` with the given tag name.
pub(crate) fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name(tag))
}

/// Text content of an element, or the empty string.
pub(crate) fn element_text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("")
}

/// The element's own XML attributes, in document order.
pub(crate) fn element_attributes(node: Node) -> AttributeMap {
    node.attributes()
        .map(|attr| (attr.name().to_string(), Value::from(attr.value())))
        .collect()
}

/// Declared name of a `P` element: its `Name` attribute, falling back to the
/// first attribute it carries.
pub(crate) fn parameter_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute("Name")
        .or_else(|| node.attributes().next().map(|attr| attr.value()))
}

/// Merges a `P` element into `attributes`. A later parameter with the same
/// name overwrites the earlier value in place.
pub(crate) fn merge_parameter(attributes: &mut AttributeMap, parameter: Node) {
    match parameter_name(parameter) {
        Some(name) => {
            attributes.insert(name.to_string(), Value::from(element_text(parameter)));
        }
        None => trace!(range:? = parameter.range(); "Skipping parameter without a name"),
    }
}

/// Flattens the `P` children of the `position`-th `Port` element (1-based).
///
/// The first port uses keys `Port_<name>`, later ports `Port<position>_<name>`.
pub(crate) fn flatten_port(attributes: &mut AttributeMap, port: Node, position: usize) {
    let prefix = if position == 1 {
        "Port_".to_string()
    } else {
        format!("Port{position}_")
    };

    for parameter in port
        .children()
        .filter(|child| child.is_element() && child.has_tag_name("P"))
    {
        if let Some(name) = parameter_name(parameter) {
            attributes.insert(
                format!("{prefix}{name}"),
                Value::from(element_text(parameter)),
            );
        }
    }
}

/// Builds the normalized mask record `{Type, Help, Parameter}`.
///
/// `Type`, `Help` and `MaskParameter` are each optional. A `MaskParameter`
/// without a `Value` child is an error.
pub(crate) fn mask_record(mask: Node, ctx: &DocumentContext) -> Result<AttributeMap> {
    let mut record = AttributeMap::new();

    if let Some(mask_type) = child_element(mask, "Type") {
        record.insert(
            keys::MASK_TYPE.to_string(),
            Value::from(element_text(mask_type)),
        );
    }

    if let Some(help) = child_element(mask, "Help") {
        record.insert(keys::MASK_HELP.to_string(), Value::from(element_text(help)));
    }

    let mut parameters = mask
        .children()
        .filter(|child| child.is_element() && child.has_tag_name("MaskParameter"));

    if let Some(parameter) = parameters.next() {
        let value = child_element(parameter, "Value").ok_or_else(|| {
            ctx.error(
                Diagnostic::error(format!(
                    "mask parameter `{}` has no `Value`",
                    parameter_name(parameter).unwrap_or("<unnamed>")
                ))
                .with_code(ErrorCode::E100)
                .with_label(parameter.range().into(), "declared here")
                .with_help("add a `<Value>` element to the mask parameter"),
            )
        })?;

        let mut parameter_record = element_attributes(parameter);
        parameter_record.insert(keys::MASK_VALUE.to_string(), Value::from(element_text(value)));
        record.insert(
            keys::MASK_PARAMETER.to_string(),
            Value::Map(parameter_record),
        );
    }

    let ignored = parameters.count();
    if ignored > 0 {
        debug!(ignored; "Only the first mask parameter is kept");
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn ctx(text: &str) -> DocumentContext<'_> {
        DocumentContext::new("test.xml", text)
    }

    #[test]
    fn test_element_attributes_keep_document_order() {
        let doc = Document::parse(r#"<Block BlockType="Gain" Name="K" SID="3"/>"#).unwrap();

        let attributes = element_attributes(doc.root_element());
        let keys: Vec<_> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["BlockType", "Name", "SID"]);
    }

    #[test]
    fn test_merge_parameter_overwrites_in_place() {
        let doc = Document::parse(
            r#"<Block><P Name="Gain">1</P><P Name="Sample">-1</P><P Name="Gain">2</P><P/></Block>"#,
        )
        .unwrap();
        let mut attributes = AttributeMap::new();

        for parameter in doc.root_element().children().filter(|n| n.is_element()) {
            merge_parameter(&mut attributes, parameter);
        }

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get_index(0), Some((&"Gain".to_string(), &Value::from("2"))));
        assert_eq!(attributes.get("Sample"), Some(&Value::from("-1")));
    }

    #[test]
    fn test_parameter_name_falls_back_to_first_attribute() {
        let doc = Document::parse(r#"<P Key="Operator">AND</P>"#).unwrap();

        assert_eq!(parameter_name(doc.root_element()), Some("Operator"));
    }

    #[test]
    fn test_flatten_port_prefixes() {
        let doc = Document::parse(
            r#"<Block><Port><P Name="PortNumber">1</P></Port><Port><P Name="PortNumber">2</P></Port></Block>"#,
        )
        .unwrap();
        let mut attributes = AttributeMap::new();

        for (idx, port) in doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("Port"))
            .enumerate()
        {
            flatten_port(&mut attributes, port, idx + 1);
        }

        assert_eq!(attributes.get("Port_PortNumber"), Some(&Value::from("1")));
        assert_eq!(attributes.get("Port2_PortNumber"), Some(&Value::from("2")));
    }

    #[test]
    fn test_mask_record_optional_fields() {
        let text = r#"<Mask><Help>Scales input</Help></Mask>"#;
        let doc = Document::parse(text).unwrap();

        let record = mask_record(doc.root_element(), &ctx(text)).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Help"), Some(&Value::from("Scales input")));
    }

    #[test]
    fn test_mask_record_full() {
        let text = r#"<Mask>
            <Type>Scaler</Type>
            <Help>h</Help>
            <MaskParameter Name="k" Type="edit"><Value>3</Value></MaskParameter>
            <MaskParameter Name="ignored" Type="edit"><Value>4</Value></MaskParameter>
        </Mask>"#;
        let doc = Document::parse(text).unwrap();

        let record = mask_record(doc.root_element(), &ctx(text)).unwrap();
        let parameter = record.get("Parameter").and_then(Value::as_map).unwrap();
        assert_eq!(record.get("Type"), Some(&Value::from("Scaler")));
        assert_eq!(parameter.get("Name"), Some(&Value::from("k")));
        assert_eq!(parameter.get("Type"), Some(&Value::from("edit")));
        assert_eq!(parameter.get("Value"), Some(&Value::from("3")));
    }

    #[test]
    fn test_mask_parameter_without_value_is_fatal() {
        let text = r#"<Mask><MaskParameter Name="k"/></Mask>"#;
        let doc = Document::parse(text).unwrap();

        let err = mask_record(doc.root_element(), &ctx(text)).unwrap_err();
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E100));
        assert!(err.diagnostic().message().contains("`k`"));
        assert_eq!(err.document().map(|d| d.name()), Some("test.xml"));
    }
}
