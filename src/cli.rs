use crate::page_range::ReversedRange;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfedit")]
#[command(about = "Delete, insert, merge, reorder, rotate and split PDF pages")]
#[command(version)]
pub struct Cli {
    /// How to read a range whose start comes after its end, like "5-2"
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = ReversedRange::Empty,
        env = "PDFEDIT_REVERSED_RANGES"
    )]
    pub reversed_ranges: ReversedRange,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Delete pages from a PDF
    #[command(alias = "delete_pages")]
    DeletePages {
        /// PDF file to delete pages from
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Pages to delete (e.g., "1,3-5")
        pages: String,
    },

    /// Insert pages from one PDF into another
    #[command(alias = "insert_pages")]
    InsertPages {
        /// PDF file to insert into
        base: PathBuf,

        /// PDF file to take pages from
        source: PathBuf,

        /// Output file
        output: PathBuf,

        /// Number of base pages that come before the inserted ones (0 prepends)
        #[arg(allow_negative_numbers = true)]
        position: i64,

        /// Source pages to insert, in order (e.g., "3,1-2" or "all")
        pages: String,
    },

    /// Combine multiple PDFs into one
    #[command(alias = "merge_pdfs")]
    MergePdfs {
        /// Output file
        output: PathBuf,

        /// PDF files to merge, in order
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,
    },

    /// Write pages in a new order, leaving out pages that aren't listed
    #[command(alias = "reorder_pages")]
    ReorderPages {
        /// PDF file to reorder
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// New page order (e.g., "2,1,3-5")
        order: String,
    },

    /// Rotate pages by a multiple of 90 degrees
    #[command(alias = "rotate_pages")]
    RotatePages {
        /// PDF file to rotate pages in
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Pages to rotate (e.g., "1,3-5" or "all")
        pages: String,

        /// Clockwise angle: 90, 180, 270, or -90
        #[arg(allow_negative_numbers = true)]
        angle: i64,
    },

    /// Split a PDF into several files
    #[command(alias = "split_pdf")]
    SplitPdf {
        /// PDF file to split
        input: PathBuf,

        /// Output directory
        output_dir: PathBuf,

        /// "single", page ranges (e.g., "1-3,4-6"), or pages per part (e.g., "3")
        spec: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_angle() {
        let cli = Cli::try_parse_from(["pdfedit", "rotate_pages", "in.pdf", "out.pdf", "all", "-90"])
            .unwrap();
        match cli.command {
            Commands::RotatePages { angle, pages, .. } => {
                assert_eq!(angle, -90);
                assert_eq!(pages, "all");
            }
            _ => panic!("expected rotate-pages"),
        }
    }

    #[test]
    fn test_merge_needs_two_inputs() {
        assert!(Cli::try_parse_from(["pdfedit", "merge-pdfs", "out.pdf", "a.pdf"]).is_err());
        let cli =
            Cli::try_parse_from(["pdfedit", "merge_pdfs", "out.pdf", "a.pdf", "b.pdf"]).unwrap();
        match cli.command {
            Commands::MergePdfs { output, inputs } => {
                assert_eq!(output, PathBuf::from("out.pdf"));
                assert_eq!(inputs.len(), 2);
            }
            _ => panic!("expected merge-pdfs"),
        }
    }

    #[test]
    fn test_reversed_ranges_flag() {
        let cli = Cli::try_parse_from([
            "pdfedit",
            "reorder-pages",
            "in.pdf",
            "out.pdf",
            "5-1",
            "--reversed-ranges",
            "reverse",
        ])
        .unwrap();
        assert_eq!(cli.reversed_ranges, ReversedRange::Reverse);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
