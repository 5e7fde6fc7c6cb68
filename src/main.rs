mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pages;
mod pdf;
mod transform;
mod validate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit with 1 like every other failure; --help and --version exit 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);
    let reversed = cli.reversed_ranges;

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(reversed).await?;
        }
        Commands::DeletePages {
            input,
            output,
            pages,
        } => {
            let written = commands::delete::run(&input, &output, &pages, reversed)?;
            println!("✓ Deleted pages {} from {}", pages, input.display());
            println!(
                "  Saved {} page(s) to {}",
                written.page_count,
                written.path.display()
            );
        }
        Commands::InsertPages {
            base,
            source,
            output,
            position,
            pages,
        } => {
            let written =
                commands::insert::run(&base, &source, &output, position, &pages, reversed)?;
            println!(
                "✓ Inserted pages {} from {} into {} at position {}",
                pages,
                source.display(),
                base.display(),
                position
            );
            println!(
                "  Saved {} page(s) to {}",
                written.page_count,
                written.path.display()
            );
        }
        Commands::MergePdfs { output, inputs } => {
            let written = commands::merge::run(&inputs, &output)?;
            let names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
            println!("✓ Merged {} PDF files", inputs.len());
            println!("  Files: {}", names.join(", "));
            println!(
                "  Saved {} page(s) to {}",
                written.page_count,
                written.path.display()
            );
        }
        Commands::ReorderPages {
            input,
            output,
            order,
        } => {
            let written = commands::reorder::run(&input, &output, &order, reversed)?;
            println!("✓ Reordered pages in {}", input.display());
            println!("  New order: {}", order);
            println!(
                "  Saved {} page(s) to {}",
                written.page_count,
                written.path.display()
            );
        }
        Commands::RotatePages {
            input,
            output,
            pages,
            angle,
        } => {
            let written = commands::rotate::run(&input, &output, &pages, angle, reversed)?;
            println!(
                "✓ Rotated pages {} by {}° in {}",
                pages,
                angle,
                input.display()
            );
            println!("  Saved to: {}", written.path.display());
        }
        Commands::SplitPdf {
            input,
            output_dir,
            spec,
        } => {
            let written = commands::split::run(&input, &output_dir, &spec, reversed)?;
            println!(
                "✓ Split {} into {} file(s)",
                input.display(),
                written.len()
            );
            println!("  Saved to: {}", output_dir.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pdfedit=debug" } else { "pdfedit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
