//! Plain-text and JSON exports of a [`Model`].
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`BlockforestError::Export`] at the crate boundary.
//!
//! [`BlockforestError::Export`]: crate::BlockforestError::Export

use std::fmt::Write;

use blockforest_core::block::{Block, keys};

use crate::{config::OutputFormat, model::Model};

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The model could not be serialized.
    Serialize(serde_json::Error),
    /// Writing to the output buffer failed.
    Format(std::fmt::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
            Self::Format(err) => write!(f, "Format error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

/// Renders `model` in the given format.
pub fn render(model: &Model, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Outline => outline(model),
        OutputFormat::Json => json(model),
    }
}

/// Indented outline of the block forest, one block per line.
///
/// Each line shows the block's name, type and SID, followed by its resolved
/// inputs and outputs when it has any. Children are indented by two spaces
/// per level.
///
/// ```text
/// Controller (SubSystem, SID 2) in: 1 out: 3
///   in (Inport, SID 4) out: 6
/// ```
pub fn outline(model: &Model) -> Result<String, Error> {
    let mut out = String::new();
    for block in model.roots() {
        write_block(&mut out, block, 0).map_err(Error::Format)?;
    }
    Ok(out)
}

fn write_block(out: &mut String, block: &Block, depth: usize) -> std::fmt::Result {
    write!(
        out,
        "{:indent$}{} ({}, SID {})",
        "",
        block.name().unwrap_or("<unnamed>"),
        block.text(keys::BLOCK_TYPE).unwrap_or("?"),
        block.sid().unwrap_or("?"),
        indent = depth * 2
    )?;

    let ports = block.ports();
    if !ports.inputs().is_empty() {
        write!(out, " in: {}", ports.inputs().join(", "))?;
    }
    if !ports.outputs().is_empty() {
        write!(out, " out: {}", ports.outputs().join(", "))?;
    }
    writeln!(out)?;

    for child in block.children() {
        write_block(out, child, depth + 1)?;
    }
    Ok(())
}

/// Pretty-printed JSON of the whole model.
pub fn json(model: &Model) -> Result<String, Error> {
    serde_json::to_string_pretty(model).map_err(Error::Serialize)
}

#[cfg(test)]
mod tests {
    use blockforest_core::{block::Ports, value::AttributeMap};

    use super::*;

    fn block(sid: &str, name: &str, block_type: &str) -> Block {
        let mut attributes = AttributeMap::new();
        attributes.insert("BlockType".to_string(), block_type.into());
        attributes.insert("Name".to_string(), name.into());
        attributes.insert("SID".to_string(), sid.into());
        Block::new(attributes)
    }

    fn model() -> Model {
        let inner = block("4", "in", "Inport")
            .with_ports(Ports::new(Vec::new(), vec!["6".to_string()]));
        let controller = block("2", "Controller", "SubSystem")
            .with_ports(Ports::new(vec!["1".to_string()], vec!["3".to_string()]))
            .with_children(vec![inner], Vec::new());
        Model::new(vec![controller], Vec::new())
    }

    #[test]
    fn test_outline() {
        assert_eq!(
            outline(&model()).unwrap(),
            "Controller (SubSystem, SID 2) in: 1 out: 3\n  in (Inport, SID 4) out: 6\n"
        );
    }

    #[test]
    fn test_outline_placeholders() {
        let model = Model::new(vec![Block::new(AttributeMap::new())], Vec::new());

        assert_eq!(outline(&model).unwrap(), "<unnamed> (?, SID ?)\n");
    }

    #[test]
    fn test_json_structure() {
        let text = json(&model()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let controller = &value["roots"][0];
        assert_eq!(controller["SID"], "2");
        assert_eq!(controller["ports"]["In"][0], "1");
        assert_eq!(controller["children"][0]["Name"], "in");
        assert_eq!(value["nets"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_render_dispatch() {
        let model = model();

        assert_eq!(
            render(&model, OutputFormat::Outline).unwrap(),
            outline(&model).unwrap()
        );
        assert_eq!(render(&model, OutputFormat::Json).unwrap(), json(&model).unwrap());
    }
}
