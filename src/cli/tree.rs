use core::fmt::{self, Write as _};
use std::collections::VecDeque;
use std::{ascii, fs, io::Write as _};

use anyhow::{Context, Result};
use huffpack::{WeightedNode, build_weighted_tree, frequency_table};

use crate::cli::{CliError, TreeArgs, TreeFormat};

pub fn tree(args: TreeArgs) -> Result<()> {
    let input = fs::read(&args.input).with_context(|| format!("failed to read input file {}", args.input.display()))?;

    let Some(root) = build_weighted_tree(&frequency_table(&input)) else {
        eprintln!("{} is empty, there is no tree to print", args.input.display());
        return Ok(());
    };

    let rendered = match args.format {
        TreeFormat::Text => render_text(&root).map_err(CliError::from)?,
        TreeFormat::Dot => render_dot(&root).map_err(CliError::from)?,
        TreeFormat::Json => serde_json::to_string_pretty(&root).map_err(CliError::from)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end()).map_err(CliError::from)?;
    Ok(())
}

fn label(value: u8) -> String {
    ascii::escape_default(value).to_string()
}

/// One node per line, two spaces of indent per level. Leaves show their code.
fn render_text(root: &WeightedNode) -> Result<String, fmt::Error> {
    fn walk(node: &WeightedNode, depth: usize, code: &mut String, out: &mut String) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            WeightedNode::Leaf { value, weight } => {
                writeln!(out, "{indent}'{}' x{weight} [{code}]", label(*value))
            }
            WeightedNode::Internal { weight, left, right } => {
                writeln!(out, "{indent}({weight})")?;
                code.push('0');
                walk(left, depth + 1, code, out)?;
                code.pop();
                code.push('1');
                walk(right, depth + 1, code, out)?;
                code.pop();
                Ok(())
            }
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut String::new(), &mut out)?;
    Ok(out)
}

/// Graphviz digraph with breadth-first node ids and `0`/`1` edge labels.
fn render_dot(root: &WeightedNode) -> Result<String, fmt::Error> {
    let mut out = String::from("digraph huffman {\n");
    let mut queue = VecDeque::from([(root, 0usize)]);
    let mut next_id = 1usize;

    while let Some((node, id)) = queue.pop_front() {
        match node {
            WeightedNode::Leaf { value, weight } => {
                writeln!(out, "\t{id} [label=\"'{}' x{weight}\", shape=box];", label(*value))?;
            }
            WeightedNode::Internal { weight, left, right } => {
                let (left_id, right_id) = (next_id, next_id + 1);
                next_id += 2;
                queue.push_back((left.as_ref(), left_id));
                queue.push_back((right.as_ref(), right_id));
                writeln!(out, "\t{id} [label=\"{weight}\"];")?;
                writeln!(out, "\t{id} -> {left_id} [label=\"0\"];")?;
                writeln!(out, "\t{id} -> {right_id} [label=\"1\"];")?;
            }
        }
    }

    out.push_str("}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_world() -> WeightedNode {
        build_weighted_tree(&frequency_table(b"hello world")).unwrap()
    }

    #[test]
    fn text_lists_codes() {
        let text = render_text(&hello_world()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "(11)");
        assert_eq!(lines.len(), 15);
        assert!(lines.contains(&"    'l' x3 [10]"));
        assert!(lines.contains(&"        ' ' x1 [1100]"));
        assert!(lines.contains(&"      'o' x2 [111]"));
    }

    #[test]
    fn lone_leaf_has_an_empty_code() {
        let root = build_weighted_tree(&frequency_table(b"aaaa")).unwrap();
        assert_eq!(render_text(&root).unwrap(), "'a' x4 []\n");
    }

    #[test]
    fn dot_numbers_nodes_breadth_first() {
        let dot = render_dot(&hello_world()).unwrap();
        assert!(dot.starts_with("digraph huffman {\n\t0 [label=\"11\"];\n"));
        assert!(dot.contains("\t0 -> 1 [label=\"0\"];"));
        assert!(dot.contains("\t0 -> 2 [label=\"1\"];"));
        assert!(dot.contains("\t5 [label=\"'l' x3\", shape=box];"));
        assert_eq!(dot.matches("->").count(), 14);
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn dot_of_a_lone_leaf_is_a_single_box() {
        let root = build_weighted_tree(&frequency_table(b"zz")).unwrap();
        assert_eq!(
            render_dot(&root),
            Ok("digraph huffman {\n\t0 [label=\"'z' x2\", shape=box];\n}\n".to_owned())
        );
    }

    #[test]
    fn labels_escape_quotes_and_controls() {
        assert_eq!(label(b'"'), "\\\"");
        assert_eq!(label(b'\n'), "\\n");
        assert_eq!(label(0xff), "\\xff");
    }
}
