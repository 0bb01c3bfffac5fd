//! Lark CLI
//!
//! Parse an HTML document or fragment and print the resulting tree.
//!
//! Usage:
//!   lark <file>                     Print the DOM tree
//!   lark <file> --json              Print the DOM tree as JSON
//!   lark <file> --tokens            Print the token stream
//!   lark --html 'a<b>' --tokens --fragment title
//!   lark --html '<td>x' --fragment tr

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lark_dom::{DomTree, NodeId, NodeType};
use lark_html::{ParseError, ParserSettings, format_tree, parse_document, parse_fragment, tokenize};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};

#[derive(Parser, Debug)]
#[command(name = "lark")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    lark ./index.html

    # Parse inline HTML and report up to 20 parse errors
    lark --html '<p>1<b>2<i>3</b>4</i>5' --max-errors 20

    # Parse a fragment in the context of a <tr> element
    lark --html '<td>a<td>b' --fragment tr

    # Tokenize as the contents of a <textarea>
    lark --html 'a<b>c' --tokens --fragment textarea

    # Dump the tree as JSON
    lark --json ./index.html
"#)]
struct Cli {
    /// Path to the HTML file to parse
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Parse as a fragment in the context of this element
    #[arg(short, long, value_name = "TAG")]
    fragment: Option<String>,

    /// Load parser settings from a JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of parse errors to report (overrides the config file)
    #[arg(short, long, value_name = "N")]
    max_errors: Option<usize>,

    /// Base URI stored on the document (overrides the config file)
    #[arg(long, value_name = "URI")]
    base_uri: Option<String>,

    /// Parse with the scripting flag enabled
    #[arg(long)]
    scripting: bool,

    /// Output the tree as JSON
    #[arg(short, long, conflicts_with = "tokens")]
    json: bool,

    /// Print the token stream instead of building a tree
    #[arg(short, long)]
    tokens: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let html = load_input(&cli)?;
    let settings = load_settings(&cli)?;
    log::debug!("parsing {} characters with {settings:?}", html.chars().count());

    if cli.tokens {
        return print_tokens(&html, cli.fragment.as_deref(), &settings);
    }

    let (tree, roots, errors) = if let Some(ref context) = cli.fragment {
        let parsed = parse_fragment(&html, context, &settings)
            .with_context(|| format!("Cannot parse fragment in context {context:?}"))?;
        (parsed.tree, parsed.nodes, parsed.errors)
    } else {
        let parsed = parse_document(&html, &settings).context("Cannot parse document")?;
        (parsed.tree, vec![NodeId::ROOT], parsed.errors)
    };

    if cli.json {
        let output = json!({
            "quirksMode": tree.quirks_mode(),
            "nodes": roots.iter().map(|&id| node_to_json(&tree, id)).collect::<Vec<_>>(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_outline(&tree, &roots);
        print_errors(&errors);
    }

    Ok(())
}

/// Read the input from `--html` or the file argument.
fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
    } else {
        anyhow::bail!("Nothing to parse: pass a file path or --html")
    }
}

/// Build parser settings from the config file, then apply flag overrides.
fn load_settings(cli: &Cli) -> Result<ParserSettings> {
    let mut settings = if let Some(ref path) = cli.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?
    } else {
        ParserSettings::default()
    };

    if let Some(max_errors) = cli.max_errors {
        settings.max_errors = max_errors;
    }
    if let Some(ref base_uri) = cli.base_uri {
        settings.base_uri = Some(base_uri.clone());
    }
    if cli.scripting {
        settings.scripting = true;
    }
    Ok(settings)
}

/// Print the token stream. With a fragment context the tokenizer starts in
/// the state the tree builder would pick for that element.
fn print_tokens(html: &str, context: Option<&str>, settings: &ParserSettings) -> Result<()> {
    let stream = tokenize(html, context, settings)
        .with_context(|| format!("Cannot tokenize in context {context:?}"))?;
    for token in &stream.tokens {
        println!("{token}");
    }
    print_errors(&stream.errors);
    Ok(())
}

fn print_outline(tree: &DomTree, roots: &[NodeId]) {
    println!("{}", "=== DOM Tree ===".bold());
    for &id in roots {
        print!("{}", format_tree(tree, id));
    }
}

fn print_errors(errors: &[ParseError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{}", "=== Parse Errors ===".bold());
    for error in errors {
        println!(
            "  {} {}",
            format!("{:>6}", error.position).yellow(),
            error.message.red()
        );
    }
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let mut obj = Map::new();
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };

    let _ = match &node.node_type {
        NodeType::Document(data) => {
            let _ = obj.insert("type".to_string(), json!("document"));
            obj.insert("baseUri".to_string(), json!(data.base_uri))
        }
        NodeType::Doctype(doctype) => {
            let _ = obj.insert("type".to_string(), json!("doctype"));
            let _ = obj.insert("name".to_string(), json!(doctype.name));
            let _ = obj.insert("publicId".to_string(), json!(doctype.public_id));
            obj.insert("systemId".to_string(), json!(doctype.system_id))
        }
        NodeType::Element(data) => {
            let _ = obj.insert("type".to_string(), json!("element"));
            let _ = obj.insert("tagName".to_string(), json!(data.tag_name));
            let attrs: Map<String, Value> = data
                .attrs
                .iter()
                .map(|(name, value)| (name.to_string(), json!(value)))
                .collect();
            obj.insert("attributes".to_string(), Value::Object(attrs))
        }
        NodeType::Text(text) => {
            let _ = obj.insert("type".to_string(), json!("text"));
            obj.insert("content".to_string(), json!(text))
        }
        NodeType::Data(data) => {
            let _ = obj.insert("type".to_string(), json!("data"));
            obj.insert("content".to_string(), json!(data))
        }
        NodeType::Comment(data) => {
            let _ = obj.insert("type".to_string(), json!("comment"));
            obj.insert("content".to_string(), json!(data))
        }
        NodeType::ProcessingInstruction(data) => {
            let _ = obj.insert("type".to_string(), json!("processingInstruction"));
            obj.insert("content".to_string(), json!(data))
        }
    };

    let children = tree.children(id);
    if !children.is_empty() {
        let children: Vec<Value> = children.iter().map(|&child| node_to_json(tree, child)).collect();
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
