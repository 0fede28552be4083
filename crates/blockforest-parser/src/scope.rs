//! Scope Parser: one document's blocks and nets, recursing into subsystems.

use log::{debug, info, trace};
use roxmltree::{Document, Node};

use blockforest_core::{
    block::{Block, ROOT_PARENT_SID, keys},
    net::Net,
    value::AttributeMap,
};

use crate::{
    ParseConfig, Scope,
    error::{Diagnostic, ErrorCode, ParseError, Result, SourceDocument},
    net::parse_net,
    normalize::{element_attributes, flatten_port, mask_record, merge_parameter},
    resolve::resolve_ports,
    source::DocumentSource,
    span::Span,
};

/// The document currently being parsed, for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentContext<'d> {
    name: &'d str,
    text: &'d str,
}

impl<'d> DocumentContext<'d> {
    pub(crate) fn new(name: &'d str, text: &'d str) -> Self {
        Self { name, text }
    }

    /// Wraps a diagnostic whose labels point into this document.
    pub(crate) fn error(&self, diagnostic: Diagnostic) -> ParseError {
        ParseError::in_document(diagnostic, SourceDocument::new(self.name, self.text))
    }
}

/// Where a subsystem reference was made, for labeling lookup failures.
#[derive(Debug, Clone, Copy)]
struct Reference<'d> {
    ctx: DocumentContext<'d>,
    span: Span,
}

/// Recursive parser over a [`DocumentSource`].
///
/// Tracks the chain of documents currently being resolved so that a
/// subsystem referencing one of its ancestors fails instead of recursing
/// forever.
pub(crate) struct ScopeParser<'s, S: DocumentSource + ?Sized> {
    source: &'s S,
    config: &'s ParseConfig,
    active: Vec<String>,
}

impl<'s, S: DocumentSource + ?Sized> ScopeParser<'s, S> {
    pub(crate) fn new(source: &'s S, config: &'s ParseConfig) -> Self {
        Self {
            source,
            config,
            active: Vec::new(),
        }
    }

    /// Parses the root document; its blocks get [`ROOT_PARENT_SID`].
    pub(crate) fn parse_root(&mut self, name: &str) -> Result<Scope> {
        self.parse_document(name, ROOT_PARENT_SID, None)
    }

    fn parse_document(
        &mut self,
        name: &str,
        parent_sid: &str,
        reference: Option<Reference>,
    ) -> Result<Scope> {
        if self.active.iter().any(|active| active == name) {
            return Err(self.cycle_error(name, reference));
        }

        let source = self.source;
        let Some(text) = source.lookup(name) else {
            return Err(missing_document_error(name, reference));
        };

        let document = Document::parse(text).map_err(|err| {
            let pos = err.pos();
            DocumentContext::new(name, text).error(
                Diagnostic::error(format!("document `{name}` is not well-formed XML: {err}"))
                    .with_code(ErrorCode::E002)
                    .with_label(Span::at_text_pos(text, pos.row, pos.col), "here"),
            )
        })?;

        info!(document = name, depth = self.active.len(); "Parsing scope");
        self.active.push(name.to_string());
        let ctx = DocumentContext::new(name, text);
        let scope = self.parse_scope(document.root_element(), parent_sid, &ctx);
        self.active.pop();

        scope
    }

    /// Parses the `Block` and `Line` children of a scope element and resolves
    /// the scope's ports.
    fn parse_scope(
        &mut self,
        element: Node,
        parent_sid: &str,
        ctx: &DocumentContext,
    ) -> Result<Scope> {
        let mut blocks = Vec::new();
        let mut nets: Vec<Net> = Vec::new();

        for child in element.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "Block" => blocks.push(self.parse_block(child, ctx)?.with_parent_sid(parent_sid)),
                "Line" => nets.push(parse_net(child)),
                other => trace!(tag = other; "Ignoring scope element"),
            }
        }

        debug!(
            document = ctx.name,
            blocks = blocks.len(),
            nets = nets.len();
            "Parsed scope"
        );

        let blocks = resolve_ports(blocks, &nets);
        Ok(Scope::new(blocks, nets))
    }

    /// Normalizes one `Block` element into a [`Block`] record.
    fn parse_block(&mut self, node: Node, ctx: &DocumentContext) -> Result<Block> {
        let mut attributes = element_attributes(node);
        let sid = node.attribute("SID").unwrap_or_default();
        let mut nested: Option<Scope> = None;
        let mut mask: Option<AttributeMap> = None;
        let mut ports = 0;

        for child in node.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "P" => merge_parameter(&mut attributes, child),
                "Mask" if mask.is_none() => {
                    let record = mask_record(child, ctx)?;
                    attributes.insert(keys::MASK.to_string(), record.clone().into());
                    mask = Some(record);
                }
                "System" if nested.is_none() => {
                    nested = Some(self.parse_system(child, sid, ctx)?);
                }
                "Port" => {
                    ports += 1;
                    flatten_port(&mut attributes, child, ports);
                }
                other => trace!(sid, tag = other; "Ignoring block element"),
            }
        }

        // A `P` named `Mask` never replaces the mask record.
        if let Some(record) = mask {
            attributes.insert(keys::MASK.to_string(), record.into());
        }

        let block = Block::new(attributes);
        Ok(match nested {
            Some(scope) => {
                let (children, child_nets) = scope.into_parts();
                block.with_children(children, child_nets)
            }
            None => block,
        })
    }

    /// Resolves a `System` element: a reference to another document, or an
    /// inline scope when it carries no attributes.
    fn parse_system(&mut self, system: Node, sid: &str, ctx: &DocumentContext) -> Result<Scope> {
        let reference = system
            .attribute("Ref")
            .or_else(|| system.attributes().next().map(|attr| attr.value()));

        match reference {
            Some(reference) => {
                let name = self.config.document_name(reference);
                debug!(sid, document = name.as_str(); "Resolving subsystem reference");
                let origin = Reference {
                    ctx: *ctx,
                    span: system.range().into(),
                };
                self.parse_document(&name, sid, Some(origin))
            }
            None => {
                debug!(sid; "Parsing inline subsystem");
                self.parse_scope(system, sid, ctx)
            }
        }
    }

    fn cycle_error(&self, name: &str, reference: Option<Reference>) -> ParseError {
        let start = self
            .active
            .iter()
            .position(|active| active == name)
            .unwrap_or_default();
        let chain = self.active[start..]
            .iter()
            .map(String::as_str)
            .chain([name])
            .collect::<Vec<_>>()
            .join(" -> ");

        let diagnostic = Diagnostic::error(format!("subsystem reference cycle: {chain}"))
            .with_code(ErrorCode::E003)
            .with_help("a subsystem document must not reference one of its ancestors");

        match reference {
            Some(reference) => reference.ctx.error(
                diagnostic.with_label(reference.span, format!("references `{name}` again")),
            ),
            None => ParseError::new(diagnostic),
        }
    }
}

fn missing_document_error(name: &str, reference: Option<Reference>) -> ParseError {
    match reference {
        Some(reference) => reference.ctx.error(
            Diagnostic::error(format!("subsystem document `{name}` not found"))
                .with_code(ErrorCode::E001)
                .with_label(reference.span, "referenced here")
                .with_help("check that the archive contains the referenced document"),
        ),
        None => ParseError::new(
            Diagnostic::error(format!("root document `{name}` not found"))
                .with_code(ErrorCode::E001),
        ),
    }
}
