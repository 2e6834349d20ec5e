//! Printers: plain edge list and JSON.

use owo_colors::OwoColorize;

use cdt_gies::GraphExport;

pub struct EdgePrinter {
    pub color: bool,
}

impl EdgePrinter {
    pub fn render(&self, graph: &GraphExport) -> String {
        let mut out = String::new();
        for (from, to) in &graph.edges {
            if self.color {
                out.push_str(&format!("{} {} {}\n", from.cyan(), "->".dimmed(), to.green()));
            } else {
                out.push_str(&format!("{} -> {}\n", from, to));
            }
        }
        // Isolated nodes would otherwise vanish from the listing.
        for node in &graph.nodes {
            if !graph.edges.iter().any(|(a, b)| a == node || b == node) {
                out.push_str(&format!("{}\n", node));
            }
        }
        out
    }

    pub fn print(&self, graph: &GraphExport) {
        print!("{}", self.render(graph));
    }
}

pub struct JsonPrinter;

impl JsonPrinter {
    pub fn print(&self, graph: &GraphExport) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(graph)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_listing_keeps_isolated_nodes() {
        let graph = GraphExport {
            nodes: vec!["A".into(), "B".into(), "C".into()],
            edges: vec![("A".into(), "B".into())],
        };
        let text = EdgePrinter { color: false }.render(&graph);
        assert_eq!(text, "A -> B\nC\n");
    }
}
