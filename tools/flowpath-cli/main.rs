use clap::{Parser, Subcommand};
use flowpath::prelude::*;
use std::fs;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect and edit integration-flow documents by path
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Raise the log level to debug (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional JSON catalog merged over the default processor catalog
    #[arg(long, global = true)]
    catalog: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and print the visualization graph of a document
    Graph {
        file: String,
        /// Only the subtree rooted at this path
        #[arg(long)]
        path: Option<String>,
    },
    /// Print the value stored at a path
    Resolve { file: String, path: String },
    /// Remove the node at a path and print the resulting document
    Remove {
        file: String,
        path: String,
        /// Write the result back to the file
        #[arg(short, long)]
        in_place: bool,
    },
    /// Print the edits the editor offers for a processor
    Capabilities {
        processor: String,
        /// Resolve for the root of a flow
        #[arg(long)]
        root: bool,
    },
    /// Print the expression held by the object at a path
    Expression { file: String, path: String },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = Arc::new(build_context(cli.catalog.as_deref()));
    match cli.command {
        Command::Graph { file, path } => {
            let editor = load_editor(&context, &file);
            let graph = match path {
                Some(path) => editor
                    .build_subgraph(&parse_path(&path))
                    .unwrap_or_else(|| exit_with_error(&format!("Nothing stored at '{}'", path))),
                None => editor.build_graph(),
            };
            if cli.json {
                print_json(&graph);
            } else {
                print!("{}", graph);
                println!("{} node(s), entity '{}'", graph.len(), graph.entity_id());
            }
        }
        Command::Resolve { file, path } => {
            let editor = load_editor(&context, &file);
            match editor.resolve(&parse_path(&path)) {
                Some(value) => print_json(value),
                None => exit_with_error(&format!("Nothing stored at '{}'", path)),
            }
        }
        Command::Remove {
            file,
            path,
            in_place,
        } => {
            let mut editor = load_editor(&context, &file);
            let outcome = editor
                .remove(&parse_path(&path))
                .unwrap_or_else(|e| exit_with_error(&format!("Remove failed: {}", e)));
            if !outcome.is_applied() {
                exit_with_error(&format!("Nothing stored at '{}'", path));
            }
            let output = serde_json::to_string_pretty(editor.document().value())
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize document: {}", e)));
            if in_place {
                fs::write(&file, output)
                    .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", file, e)));
                println!("Removed '{}' from '{}'", path, file);
            } else {
                println!("{}", output);
            }
        }
        Command::Capabilities { processor, root } => {
            let role = if root { PathRole::Root } else { PathRole::Interior };
            let interaction = context.capabilities_of(&processor, role);
            if cli.json {
                print_json(&interaction);
            } else {
                println!("{} ({:?})", processor, role);
                print_interaction(&interaction);
            }
        }
        Command::Expression { file, path } => {
            let editor = load_editor(&context, &file);
            let expression = editor.parse_expression(&parse_path(&path));
            if cli.json {
                print_json(&expression);
            } else {
                match (&expression.language, expression.expression_text()) {
                    (Some(language), Some(text)) => println!("{}: {}", language, text),
                    (Some(language), None) => println!("{}: {:?}", language, expression.model),
                    (None, _) => println!("No expression at '{}'", path),
                }
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn build_context(catalog_path: Option<&str>) -> EditorContext {
    let builder = EditorContext::builder();
    let builder = match catalog_path {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read catalog file '{}': {}", path, e))
            });
            builder
                .with_catalog_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)))
        }
        None => builder,
    };
    builder.build()
}

fn load_editor(context: &Arc<EditorContext>, file: &str) -> FlowEditor {
    let json = fs::read_to_string(file)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read flow file '{}': {}", file, e)));
    let document = FlowDocument::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow document: {}", e)));
    FlowEditor::new(Arc::clone(context), document)
}

fn parse_path(raw: &str) -> Path {
    raw.parse()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid path '{}': {}", raw, e)))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn print_interaction(interaction: &NodeInteraction) {
    let rows = [
        ("previous step", interaction.can_have_previous_step),
        ("next step", interaction.can_have_next_step),
        ("children", interaction.can_have_children),
        ("special children", interaction.can_have_special_children),
        ("replace", interaction.can_replace_step),
        ("remove step", interaction.can_remove_step),
        ("remove flow", interaction.can_remove_flow),
        ("disable", interaction.can_be_disabled),
    ];
    for (name, allowed) in rows {
        println!("  {:<18} {}", name, if allowed { "yes" } else { "no" });
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
