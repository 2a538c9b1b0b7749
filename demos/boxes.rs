//! Boxes demo: lay out a small dashboard and print one frame.
//!
//! Run with: cargo run --example boxes
//! Set `RUST_LOG=debug` to see the layout and paint passes.

use boxgrid::{Engine, EngineConfig, NodeId, StylePatch};

fn card(engine: &mut Engine, parent: NodeId, title: &str, style: &str) -> boxgrid::Result<NodeId> {
    let tree = engine.tree_mut();
    let card = tree.create_element("card");
    tree.set_style(card, &StylePatch::parse(style))?;
    tree.set_element_text(card, title)?;
    tree.append(parent, card)?;
    Ok(card)
}

fn main() -> boxgrid::Result<()> {
    env_logger::init();

    let config = EngineConfig::from_terminal().unwrap_or_default();
    // leave room for the shell prompt
    let config = config.with_size(config.columns, config.rows.saturating_sub(1).min(16));
    let mut engine = Engine::new(config);
    let root = engine.root();
    engine.tree_mut().set_style(
        root,
        &StylePatch::parse("flex-direction: column; padding: 1; row-gap: 1"),
    )?;

    let header = card(
        &mut engine,
        root,
        "boxgrid: styled boxes on a character grid",
        "border: double; border-color: cyan; color: white; padding-left: 1",
    )?;
    engine.tree_mut().set_style(header, &StylePatch::parse("height: 1"))?;

    let row = engine.tree_mut().create_element("row");
    engine
        .tree_mut()
        .set_style(row, &StylePatch::parse("flex-direction: row; column-gap: 2; flex-grow: 1"))?;
    engine.tree_mut().append(root, row)?;

    card(
        &mut engine,
        row,
        "Round corners and a truecolor background that wraps long text by character.",
        "flex-grow: 1; border: round; background-color: #1e3a5f; color: #f0f0f0",
    )?;
    card(
        &mut engine,
        row,
        "Bold border, named colors.",
        "flex-grow: 1; border: bold; border-color: yellow; color: green",
    )?;
    card(
        &mut engine,
        row,
        "Only two edges.",
        "width: 16; border-left: solid; border-bottom: solid; border-color: magenta",
    )?;

    let mut stdout = std::io::stdout();
    engine.render_to(&mut stdout)
}
