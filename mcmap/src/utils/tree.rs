//! Tree rendering for NBT documents

use console::Style;
use mcmap_nbt::{Compound, NbtFile, Tag, TagKind};

/// A node in a displayed tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    /// Inline value shown after the name
    pub value: Option<String>,
    pub children: Vec<TreeNode>,
}

/// Types of nodes in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Root,
    Compound,
    List,
    Array,
    Value,
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: String, node_type: NodeType) -> Self {
        Self {
            name,
            node_type,
            value: None,
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the inline value
    pub fn with_value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }

    /// Build the tree of a whole document
    pub fn from_document(file: &NbtFile) -> Self {
        let name = if file.name.is_empty() {
            "(root)".to_string()
        } else {
            file.name.clone()
        };
        compound_children(TreeNode::new(name, NodeType::Root), &file.root)
    }

    /// Build the tree of one named tag
    pub fn from_tag(name: &str, tag: &Tag) -> Self {
        let label = format!("{name}: {}", tag.kind());
        let node = TreeNode::new(label, NodeType::for_kind(tag.kind())).with_value(tag.summary());
        match tag {
            Tag::Compound(compound) => compound_children(node, compound),
            Tag::List(list) => list.iter().enumerate().fold(node, |node, (i, item)| {
                node.add_child(TreeNode::from_tag(&format!("[{i}]"), item))
            }),
            _ => node,
        }
    }
}

fn compound_children(node: TreeNode, compound: &Compound) -> TreeNode {
    compound
        .iter()
        .fold(node, |node, (name, tag)| node.add_child(TreeNode::from_tag(name, tag)))
}

impl NodeType {
    /// Get emoji icon for node type
    pub fn icon(&self) -> &'static str {
        match self {
            NodeType::Root => "📁",
            NodeType::Compound => "📦",
            NodeType::List => "📋",
            NodeType::Array => "💾",
            NodeType::Value => "🏷️",
        }
    }

    /// Get color style for node type
    pub fn style(&self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                NodeType::Root => Style::new().bold().cyan(),
                NodeType::Compound => Style::new().blue(),
                NodeType::List => Style::new().magenta(),
                NodeType::Array => Style::new().yellow(),
                NodeType::Value => Style::new().green(),
            }
        }
    }

    /// Node type a tag kind is displayed as
    pub fn for_kind(kind: TagKind) -> Self {
        match kind {
            TagKind::Compound => NodeType::Compound,
            TagKind::List => NodeType::List,
            TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray => NodeType::Array,
            _ => NodeType::Value,
        }
    }
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

/// Render a single node and its children
fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let icon = node.node_type.icon();
    let style = node.node_type.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    output.push_str(&format!(
        "{}{}{} {}",
        prefix,
        connector,
        icon,
        style.apply_to(&node.name)
    ));
    if let Some(value) = &node.value {
        let value_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        output.push_str(&format!(" = {}", value_style.apply_to(value)));
    }
    output.push('\n');

    if !node.children.is_empty() {
        let new_prefix = if depth == 0 {
            String::new()
        } else {
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };

        for (i, child) in node.children.iter().enumerate() {
            let is_last_child = i == node.children.len() - 1;
            render_node(
                child,
                output,
                &new_prefix,
                is_last_child,
                depth + 1,
                options,
            );
        }
    }
}
