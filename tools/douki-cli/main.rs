use clap::Parser;
use douki::layout::resolve_height;
use douki::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

/// Project a task specification into its laid-out node graph and report it.
#[derive(Parser)]
#[command(name = "douki-cli")]
struct Args {
    /// Path to the task specification JSON file ({ steps, parameters, output })
    spec: String,

    /// Path to an external action listing JSON file; builtin catalog if omitted
    #[arg(long)]
    catalog: Option<String>,

    /// Also print the per-node autocompletion references
    #[arg(long)]
    references: bool,
}

// Matches the on-disk task spec format. Only used here for loading.
#[derive(Deserialize)]
struct RawTaskSpec {
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default)]
    parameters: Option<Value>,
    #[serde(default)]
    output: Option<Value>,
}

fn read_json(path: &str) -> std::result::Result<Value, SpecLoadError> {
    let content = fs::read_to_string(path).map_err(|source| SpecLoadError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn main() -> douki::prelude::Result<()> {
    let args = Args::parse();

    let raw = read_json(&args.spec)?;
    let spec: RawTaskSpec = serde_json::from_value(raw)?;

    let catalog = match &args.catalog {
        Some(path) => ActionCatalog::from_listing(&read_json(path)?)?,
        None => ActionCatalog::builtin(),
    };
    let catalog = Arc::new(catalog);

    let nodes = align(
        project(
            &spec.steps,
            spec.parameters.as_ref(),
            spec.output.as_ref(),
            &catalog,
        ),
        FIXED_X,
        VERTICAL_SPACING,
    );
    let edges = rebuild_edges(&nodes);

    println!("Nodes ({}):", nodes.len());
    for node in &nodes {
        let summary = match &node.data {
            NodeData::Parameter(data) => format!("{} section(s)", data.sections.len()),
            NodeData::Action(data) => {
                let step = &data.step;
                let missing = step.missing_required_inputs(&catalog);
                if missing.is_empty() {
                    format!("action '{}'", step.action)
                } else {
                    format!("action '{}', missing required: {}", step.action, missing.join(", "))
                }
            }
            NodeData::Output(data) => format!(
                "{} link(s), {} text snippet(s)",
                data.output.links.len(),
                data.output.text.len()
            ),
        };
        println!(
            "  {:<24} y={:>7.1} h={:>6.1}  {}",
            node.rf_id,
            node.position.y,
            resolve_height(node),
            summary
        );
    }

    println!("Edges ({}):", edges.len());
    for edge in &edges {
        println!("  {} -> {}", edge.source, edge.target);
    }

    if args.references {
        let references = collect_references(&nodes);
        println!("References:");
        for node in &nodes {
            if let Some(refs) = references.get(&node.rf_id) {
                println!("  {}:", node.rf_id);
                for entry in refs {
                    println!("    {}", entry);
                }
            }
        }
    }

    Ok(())
}
