use clap::{Parser, Subcommand};
use codegen::GenerationSupport;
use sourcegen::{GenerationPlan, RendererRegistry};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "sourcegen")]
#[command(about = "Render Java sources and resources from a TOML generation plan")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every unit of a plan
    Render {
        /// Path to the plan file
        #[arg(short, long)]
        plan: PathBuf,
        /// Base directory for generated files, overriding the plan's layout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the rendered units instead of writing files
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// List the unit kinds that can be rendered
    Kinds,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let registry = RendererRegistry::with_builtin();

    match cli.command {
        Commands::Render { plan, out, stdout } => {
            render(&registry, &plan, out, stdout)?;
        }
        Commands::Kinds => {
            list_kinds(&registry);
        }
    }

    Ok(())
}

fn render(
    registry: &RendererRegistry,
    plan_path: &Path,
    out: Option<PathBuf>,
    to_stdout: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut plan = GenerationPlan::load(plan_path)?;
    info!(
        "Loaded plan {} with {} unit(s)",
        plan_path.display(),
        plan.units.len()
    );

    if to_stdout {
        let stdout = io::stdout();
        registry.render_plan(&plan, &mut stdout.lock())?;
        return Ok(());
    }

    if let Some(out) = out {
        plan.layout.base_dir = out;
    }
    let support = GenerationSupport::new(plan.layout.clone())?;
    for path in registry.write_plan(&plan, &support)? {
        println!("{}", path.display());
    }

    Ok(())
}

fn list_kinds(registry: &RendererRegistry) {
    println!("Available unit kinds:");
    for kind in registry.kinds() {
        println!("  - {}", kind);
    }
}
