//! Example: Building a model from in-memory documents
//!
//! This example demonstrates the basic workflow of:
//! 1. Collecting the model's XML documents in a map
//! 2. Building a model with a default-configured ModelBuilder
//! 3. Querying blocks and printing the outline export

use std::collections::HashMap;

use blockforest::{ModelBuilder, export};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut documents = HashMap::new();
    documents.insert(
        "system_root.xml".to_string(),
        r#"<System>
            <Block BlockType="Inport" Name="request" SID="1"/>
            <Block BlockType="SubSystem" Name="Router" SID="2">
                <System Ref="system_2"/>
            </Block>
            <Block BlockType="Outport" Name="primary" SID="3"/>
            <Block BlockType="Outport" Name="fallback" SID="4"/>
            <Line><P Name="Src">1#out:1</P><P Name="Dst">2#in:1</P></Line>
            <Line>
                <P Name="Src">2#out:1</P>
                <Branch><P Name="Dst">3#in:1</P></Branch>
                <Branch><P Name="Dst">4#in:1</P></Branch>
            </Line>
        </System>"#
            .to_string(),
    );
    documents.insert(
        "system_2.xml".to_string(),
        r#"<System>
            <Block BlockType="Inport" Name="in" SID="5"/>
            <Block BlockType="Outport" Name="out" SID="6"/>
            <Line><P Name="Src">5#out:1</P><P Name="Dst">6#in:1</P></Line>
        </System>"#
            .to_string(),
    );

    let builder = ModelBuilder::default();
    let model = builder.build(&documents)?;

    println!("Blocks across all scopes: {}", model.block_count());
    if let Some(router) = model.find_block("Name", "Router") {
        println!("Router outputs: {:?}", router.ports().outputs());
    }

    println!("\n{}", export::outline(&model)?);

    Ok(())
}
