//! Terminal rendering of markdown replies

use colored::Colorize;
use markdown::mdast::{self, Node};
use markdown::{ParseOptions, to_mdast};

const RULE_WIDTH: usize = 40;

/// Render markdown as styled terminal text.
///
/// Text that fails to parse is returned unchanged.
pub fn render_markdown(text: &str) -> String {
    let root = match to_mdast(text, &ParseOptions::gfm()) {
        Ok(node) => node,
        Err(_) => return text.to_string(),
    };

    let blocks = match root {
        Node::Root(root) => root.children,
        other => vec![other],
    };

    blocks
        .iter()
        .map(render_block)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(node: &Node) -> String {
    match node {
        Node::Heading(heading) => {
            let text = render_inline(&heading.children);
            match heading.depth {
                1 => text.bold().underline().to_string(),
                2 => text.bold().to_string(),
                depth => format!("{} {}", "#".repeat(depth as usize), text)
                    .bold()
                    .to_string(),
            }
        }
        Node::Paragraph(paragraph) => render_inline(&paragraph.children),
        Node::Code(code) => render_code(code),
        Node::List(list) => render_list(list, 0).join("\n"),
        Node::Blockquote(quote) => quote
            .children
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n\n")
            .lines()
            .map(|line| format!("{} {}", "│".dimmed(), line.italic()))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::ThematicBreak(_) => "─".repeat(RULE_WIDTH).dimmed().to_string(),
        Node::Html(html) => html.value.trim().to_string(),
        Node::Table(table) => render_table(table),
        other => render_inline(std::slice::from_ref(other)),
    }
}

fn render_code(code: &mdast::Code) -> String {
    let mut lines = vec![
        format!("```{}", code.lang.as_deref().unwrap_or(""))
            .dimmed()
            .to_string(),
    ];
    lines.extend(code.value.lines().map(|line| format!("  {}", line.yellow())));
    lines.push("```".dimmed().to_string());
    lines.join("\n")
}

fn render_list(list: &mdast::List, depth: usize) -> Vec<String> {
    let indent = "  ".repeat(depth);
    let start = list.start.unwrap_or(1);
    let mut lines = Vec::new();

    for (i, node) in list.children.iter().enumerate() {
        let Node::ListItem(item) = node else {
            continue;
        };
        let bullet = if list.ordered {
            format!("{}.", start + i as u32)
        } else {
            "-".to_string()
        };

        let mut first = true;
        for child in &item.children {
            if let Node::List(nested) = child {
                lines.extend(render_list(nested, depth + 1));
                continue;
            }
            for line in render_block(child).lines() {
                if first {
                    lines.push(format!("{}{} {}", indent, bullet.cyan(), line));
                    first = false;
                } else {
                    lines.push(format!("{}  {}", indent, line));
                }
            }
        }
        if first {
            lines.push(format!("{}{}", indent, bullet.cyan()));
        }
    }

    lines
}

fn render_table(table: &mdast::Table) -> String {
    table
        .children
        .iter()
        .filter_map(|row| match row {
            Node::TableRow(row) => Some(
                row.children
                    .iter()
                    .map(|cell| match cell {
                        Node::TableCell(cell) => render_inline(&cell.children),
                        _ => String::new(),
                    })
                    .collect::<Vec<_>>()
                    .join(" │ "),
            ),
            _ => None,
        })
        .enumerate()
        .map(|(i, line)| if i == 0 { line.bold().to_string() } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_inline(nodes: &[Node]) -> String {
    let mut out = String::new();

    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::Strong(strong) => out.push_str(&render_inline(&strong.children).bold().to_string()),
            Node::Emphasis(emphasis) => {
                out.push_str(&render_inline(&emphasis.children).italic().to_string())
            }
            Node::Delete(delete) => {
                out.push_str(&render_inline(&delete.children).strikethrough().to_string())
            }
            Node::InlineCode(code) => out.push_str(&code.value.yellow().to_string()),
            Node::Link(link) => {
                let label = render_inline(&link.children);
                let plain = plain_text(&link.children);
                out.push_str(&label.cyan().underline().to_string());
                if plain != link.url && plain != link.url.trim_start_matches("mailto:") {
                    out.push_str(&format!(" ({})", link.url).dimmed().to_string());
                }
            }
            Node::Image(image) => {
                out.push_str(if image.alt.is_empty() {
                    &image.url
                } else {
                    &image.alt
                });
            }
            Node::Break(_) => out.push('\n'),
            Node::Html(html) => out.push_str(&html.value),
            Node::Paragraph(paragraph) => out.push_str(&render_inline(&paragraph.children)),
            _ => {}
        }
    }

    out
}

fn plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => text.value.clone(),
            Node::InlineCode(code) => code.value.clone(),
            Node::Strong(strong) => plain_text(&strong.children),
            Node::Emphasis(emphasis) => plain_text(&emphasis.children),
            Node::Delete(delete) => plain_text(&delete.children),
            _ => String::new(),
        })
        .collect()
}
