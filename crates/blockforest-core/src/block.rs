//! Normalized block records.
//!
//! A [`Block`] is a generic [`AttributeMap`] plus the structure the model
//! builder attaches to it: nested `children` for subsystem references, the
//! nested scope's raw nets and the resolved [`Ports`]. Typed accessors such as
//! [`Block::sid`] and [`Block::block_type`] are thin views over the bag.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Serialize;

use crate::{
    net::Net,
    value::{AttributeMap, Value},
};

/// Well-known attribute keys.
pub mod keys {
    /// Scope-local block identifier.
    pub const SID: &str = "SID";
    /// Display name.
    pub const NAME: &str = "Name";
    /// Block type tag.
    pub const BLOCK_TYPE: &str = "BlockType";
    /// Back-reference to the enclosing block.
    pub const PARENT_SID: &str = "Parent_SID";
    /// Normalized mask record.
    pub const MASK: &str = "Mask";
    /// Mask type, inside the mask record.
    pub const MASK_TYPE: &str = "Type";
    /// Mask help text, inside the mask record.
    pub const MASK_HELP: &str = "Help";
    /// Mask parameter record, inside the mask record.
    pub const MASK_PARAMETER: &str = "Parameter";
    /// Mask parameter value, inside the mask parameter record.
    pub const MASK_VALUE: &str = "Value";
}

/// `Parent_SID` of blocks in the root scope.
pub const ROOT_PARENT_SID: &str = "root";

/// Typed view of the open-ended `BlockType` tag.
///
/// Unrecognized tags are preserved in [`BlockType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    Inport,
    Outport,
    SubSystem,
    Logic,
    RelationalOperator,
    Constant,
    If,
    BusCreator,
    BusSelector,
    Other(String),
}

impl BlockType {
    /// Returns the tag as written in model documents.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Inport => "Inport",
            BlockType::Outport => "Outport",
            BlockType::SubSystem => "SubSystem",
            BlockType::Logic => "Logic",
            BlockType::RelationalOperator => "RelationalOperator",
            BlockType::Constant => "Constant",
            BlockType::If => "If",
            BlockType::BusCreator => "BusCreator",
            BlockType::BusSelector => "BusSelector",
            BlockType::Other(tag) => tag,
        }
    }
}

impl FromStr for BlockType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Inport" => BlockType::Inport,
            "Outport" => BlockType::Outport,
            "SubSystem" => BlockType::SubSystem,
            "Logic" => BlockType::Logic,
            "RelationalOperator" => BlockType::RelationalOperator,
            "Constant" => BlockType::Constant,
            "If" => BlockType::If,
            "BusCreator" => BlockType::BusCreator,
            "BusSelector" => BlockType::BusSelector,
            other => BlockType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved neighbors of a block within its own scope.
///
/// `inputs` lists the source SID of every net that ends at the block;
/// `outputs` lists every destination SID of nets that start at it. Both are
/// in source document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ports {
    #[serde(rename = "In")]
    inputs: Vec<String>,
    #[serde(rename = "Out")]
    outputs: Vec<String>,
}

impl Ports {
    pub fn new(inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self { inputs, outputs }
    }

    /// Upstream neighbor SIDs.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Downstream neighbor SIDs.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

/// Read-only view of a block's mask record.
#[derive(Debug, Clone, Copy)]
pub struct Mask<'a>(&'a AttributeMap);

impl<'a> Mask<'a> {
    /// The mask's `Type`, if declared.
    pub fn mask_type(&self) -> Option<&'a str> {
        self.0.get(keys::MASK_TYPE).and_then(Value::as_text)
    }

    /// The mask's `Help`, if declared.
    pub fn help(&self) -> Option<&'a str> {
        self.0.get(keys::MASK_HELP).and_then(Value::as_text)
    }

    /// The mask parameter record: its attributes plus `Value`.
    pub fn parameter(&self) -> Option<&'a AttributeMap> {
        self.0.get(keys::MASK_PARAMETER).and_then(Value::as_map)
    }

    /// Shorthand for the mask parameter's `Value`.
    pub fn parameter_value(&self) -> Option<&'a str> {
        self.parameter()
            .and_then(|parameter| parameter.get(keys::MASK_VALUE))
            .and_then(Value::as_text)
    }

    /// The underlying record.
    pub fn attributes(&self) -> &'a AttributeMap {
        self.0
    }
}

/// One diagram element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(flatten)]
    attributes: AttributeMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    child_nets: Vec<Net>,
    ports: Ports,
}

impl Block {
    /// Create a block from its normalized attributes.
    pub fn new(attributes: AttributeMap) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Attach the blocks and nets of the nested scope this block references.
    pub fn with_children(mut self, children: Vec<Block>, child_nets: Vec<Net>) -> Self {
        self.children = children;
        self.child_nets = child_nets;
        self
    }

    /// Set the `Parent_SID` back-reference.
    pub fn with_parent_sid(mut self, parent_sid: impl Into<String>) -> Self {
        self.attributes.insert(
            keys::PARENT_SID.to_string(),
            Value::Text(parent_sid.into()),
        );
        self
    }

    /// Attach the resolved ports.
    pub fn with_ports(mut self, ports: Ports) -> Self {
        self.ports = ports;
        self
    }

    /// All normalized attributes.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Look up a text attribute by name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_text)
    }

    /// Scope-local identifier.
    pub fn sid(&self) -> Option<&str> {
        self.text(keys::SID)
    }

    /// Display name.
    pub fn name(&self) -> Option<&str> {
        self.text(keys::NAME)
    }

    /// Typed block type, if the block declares one.
    pub fn block_type(&self) -> Option<BlockType> {
        self.text(keys::BLOCK_TYPE).and_then(|tag| tag.parse().ok())
    }

    /// SID of the enclosing block, or [`ROOT_PARENT_SID`].
    pub fn parent_sid(&self) -> Option<&str> {
        self.text(keys::PARENT_SID)
    }

    /// The mask record, if the block carries one.
    pub fn mask(&self) -> Option<Mask<'_>> {
        self.attribute(keys::MASK).and_then(Value::as_map).map(Mask)
    }

    /// Blocks of the nested scope, in document order.
    pub fn children(&self) -> &[Block] {
        &self.children
    }

    /// Raw nets of the nested scope.
    pub fn child_nets(&self) -> &[Net] {
        &self.child_nets
    }

    /// Resolved neighbors within the owning scope.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Returns `true` if this block owns a nested scope.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
