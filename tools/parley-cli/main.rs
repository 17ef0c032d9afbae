use clap::{Parser, Subcommand, ValueEnum};
use parley::prelude::*;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Output encoding for `clean`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Json,
    Binary,
}

/// Validate, clean and walk dialogue flows from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional engine config JSON (placeholders, WhatsApp number)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print diagnostics for a flow and check that it can be saved
    Check {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Write the cleaned flow that would be persisted
    Clean {
        /// Path to the flow JSON file
        flow_path: String,
        /// Where to write the cleaned flow
        out_path: String,
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatCli,
    },
    /// Walk a flow interactively, the way a visitor would
    Walk {
        /// Path to the flow JSON file; the starter flow is used when omitted
        flow_path: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parley=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Check { flow_path } => run_check(&flow_path),
        Command::Clean {
            flow_path,
            out_path,
            format,
        } => run_clean(&flow_path, &out_path, format),
        Command::Walk { flow_path } => run_walk(flow_path.as_deref(), &config),
    }
}

fn load_graph(path: &str) -> FlowGraph {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read flow file '{}': {}", path, e)));
    WireFlow::from_json(&json)
        .and_then(IntoFlow::into_flow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow '{}': {}", path, e)))
}

fn run_check(flow_path: &str) {
    let graph = load_graph(flow_path);
    println!(
        "Loaded {} steps (flow is {})",
        graph.len(),
        if graph.is_active { "active" } else { "inactive" }
    );

    let diagnostics = lint(&graph);
    if diagnostics.is_empty() {
        println!("  -> No warnings");
    }
    for diagnostic in &diagnostics {
        let marker = if diagnostic.blocks_save() { "error" } else { "warning" };
        println!("  -> {}: {}", marker, diagnostic);
    }

    match validate_with_report(&graph) {
        Ok((cleaned, report)) => {
            println!("\nFlow can be saved: {} steps kept.", cleaned.len());
            if !report.is_clean() {
                println!(
                    "  -> Dropped steps: [{}], dropped options: {}",
                    report.dropped_nodes.join(", "),
                    report.dropped_options
                );
            }
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn run_clean(flow_path: &str, out_path: &str, format: FormatCli) {
    let graph = load_graph(flow_path);
    let cleaned = validate(&graph).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let store_format = match format {
        FormatCli::Json => StoreFormat::Json,
        FormatCli::Binary => StoreFormat::Binary,
    };
    let bytes = store_format
        .encode(&WireFlow::from(cleaned.graph()))
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    fs::write(out_path, bytes)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", out_path, e)));
    println!("Wrote cleaned flow ({} steps) to '{}'", cleaned.len(), out_path);
}

fn run_walk(flow_path: Option<&str>, config: &EngineConfig) {
    let graph = flow_path.map(load_graph).unwrap_or_else(FlowGraph::starter);
    let cleaned = validate(&graph).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let mut navigator = Navigator::new(&cleaned);

    println!("--- Parley Walk Mode ---");
    println!("Enter an option number, 'b' to go back, 'r' to restart, 'q' to quit.");

    loop {
        let Some(view) = navigator.view() else {
            exit_with_error("current step disappeared from the flow");
        };
        println!("\n[{}] {}", view.id, view.text);
        for option in &view.options {
            println!("  {}: {}", option.index + 1, option.label);
        }

        let input = prompt_for_input("Choice");
        match input.as_str() {
            "q" => break,
            "b" => {
                if !navigator.back() {
                    println!("Already at the start.");
                }
            }
            "r" => navigator.reset(),
            other => {
                let Some(index) = other.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                    println!("Invalid choice.");
                    continue;
                };
                match navigator.select(index) {
                    Ok(Transition::Moved { .. }) => {}
                    Ok(Transition::Effect(Effect::OpenWhatsApp)) => match config.whatsapp_url() {
                        Some(url) => println!("  -> Would open {}", url),
                        None => println!("  -> Would open WhatsApp (no number configured)"),
                    },
                    Ok(Transition::Effect(Effect::Navigate { path })) => {
                        println!("  -> Would navigate to {}", path)
                    }
                    Err(e) => println!("  -> {}", e),
                }
            }
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    io::stdout()
        .flush()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to flush stdout: {}", e)));
    match io::stdin().read_line(&mut line) {
        Ok(0) => "q".to_string(),
        Ok(_) => line.trim().to_string(),
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
