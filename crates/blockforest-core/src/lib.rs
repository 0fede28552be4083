//! Blockforest Core Types and Definitions
//!
//! This crate provides the foundational types for reconstructed block diagram
//! models. It includes:
//!
//! - **Values**: Open-ended attribute bags ([`value::Value`], [`value::AttributeMap`])
//! - **Blocks**: Normalized block records with typed views ([`block::Block`])
//! - **Nets**: Raw connection declarations and fan-out branches ([`net`] module)
//! - **Query**: Depth-first lookup over a block forest ([`query::find_block`])

pub mod block;
pub mod net;
pub mod query;
pub mod value;
