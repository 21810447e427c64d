//! Example: live element children over a small document
//!
//! Run with `RUST_LOG=trace` to see view rebuilds.

use fos_dom_traversal::{Document, DomResult, NodeOperations, ParentNode};
use tracing_subscriber::EnvFilter;

fn main() -> DomResult<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new("about:blank")?;
    let body = doc.body().unwrap_or(doc.tree.root());

    let tree = doc.tree_mut();
    let list = tree.create_element("ul");
    tree.set_attribute(list, "id", "items")?;
    tree.append_child(body, list)?;
    for i in 0..3 {
        let li = tree.create_element("li");
        let text = tree.create_text(&format!("Item {}", i));
        tree.append_child(li, text)?;
        tree.append_child(list, li)?;
    }

    let list = doc.get_element_by_id("items").unwrap_or(list);
    println!("ul has {} element children", doc.tree.children(list).length());

    if let Some(first) = doc.tree.first_element_child(list) {
        doc.tree.remove(first)?;
    }
    println!("after removal: {}", doc.tree.children(list).length());

    Ok(())
}
