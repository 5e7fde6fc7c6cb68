use anyhow::Result;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::{self, Written};
use crate::page_range::ReversedRange;
use crate::pdf::PdfDocument;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeletePagesRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to delete (e.g., '1,3-5')")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InsertPagesRequest {
    #[schemars(description = "Path to the PDF file to insert into")]
    pub base: String,
    #[schemars(description = "Path to the PDF file to take pages from")]
    pub source: String,
    #[schemars(description = "Number of base pages placed before the inserted pages (0 prepends)")]
    pub position: i64,
    #[schemars(description = "Source pages to insert, in order (e.g., '3,1-2' or 'all')")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MergeRequest {
    #[schemars(description = "Paths of the PDF files to merge, in order (at least two)")]
    pub inputs: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReorderPagesRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "New page order (e.g., '3,1,2'); pages not listed are dropped")]
    pub order: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RotatePagesRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to rotate (e.g., '1,3-5' or 'all')")]
    pub pages: String,
    #[schemars(description = "Clockwise angle: 90, 180, 270, or -90")]
    pub angle: i64,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Directory for the split files")]
    pub output_dir: String,
    #[schemars(description = "'single', page ranges like '1-3,4-6', or pages per part like '3'")]
    pub spec: String,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
    reversed: ReversedRange,
}

impl PdfServer {
    pub fn new(reversed: ReversedRange) -> Self {
        Self {
            tool_router: Self::tool_router(),
            reversed,
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new(ReversedRange::default())
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        to_json(PdfDocument::open(&path).map(|doc| PageCountResult {
            page_count: doc.page_count(),
            path,
        }))
    }

    #[tool(description = "Delete pages from a PDF and save the rest to a new file")]
    fn pdf_delete_pages(&self, Parameters(req): Parameters<DeletePagesRequest>) -> String {
        to_json(
            commands::delete::run(&req.path, &req.output, &req.pages, self.reversed)
                .map(OutputResult::from),
        )
    }

    #[tool(description = "Insert pages from a source PDF into a base PDF at a position and save to a new file")]
    fn pdf_insert_pages(&self, Parameters(req): Parameters<InsertPagesRequest>) -> String {
        to_json(
            commands::insert::run(
                &req.base,
                &req.source,
                &req.output,
                req.position,
                &req.pages,
                self.reversed,
            )
            .map(OutputResult::from),
        )
    }

    #[tool(description = "Merge several PDFs, in order, into one file")]
    fn pdf_merge(&self, Parameters(req): Parameters<MergeRequest>) -> String {
        to_json(commands::merge::run(&req.inputs, &req.output).map(OutputResult::from))
    }

    #[tool(description = "Write the listed pages of a PDF, in the listed order, to a new file. Pages not listed are left out.")]
    fn pdf_reorder_pages(&self, Parameters(req): Parameters<ReorderPagesRequest>) -> String {
        to_json(
            commands::reorder::run(&req.path, &req.output, &req.order, self.reversed)
                .map(OutputResult::from),
        )
    }

    #[tool(description = "Rotate pages of a PDF by 90, 180, 270, or -90 degrees and save to a new file")]
    fn pdf_rotate_pages(&self, Parameters(req): Parameters<RotatePagesRequest>) -> String {
        to_json(
            commands::rotate::run(&req.path, &req.output, &req.pages, req.angle, self.reversed)
                .map(OutputResult::from),
        )
    }

    #[tool(description = "Split a PDF into one file per page ('single'), per range ('1-3,4-6'), or per N pages ('3')")]
    fn pdf_split(&self, Parameters(req): Parameters<SplitRequest>) -> String {
        to_json(
            commands::split::run(&req.path, &req.output_dir, &req.spec, self.reversed)
                .map(|parts| parts.into_iter().map(OutputResult::from).collect::<Vec<_>>()),
        )
    }
}

fn to_json<T: Serialize>(result: Result<T>) -> String {
    match result {
        Ok(value) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("Error: {}", e))
        }
        Err(e) => format!("Error: {:#}", e),
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: usize,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OutputResult {
    pub output_path: String,
    pub page_count: usize,
}

impl From<Written> for OutputResult {
    fn from(written: Written) -> Self {
        OutputResult {
            output_path: written.path.display().to_string(),
            page_count: written.page_count,
        }
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page editing tools. Use pdf_page_count to inspect a document, then \
                 pdf_delete_pages, pdf_insert_pages, pdf_merge, pdf_reorder_pages, \
                 pdf_rotate_pages, or pdf_split to write new PDFs. Page ranges are 1-based \
                 and comma-separated, like '1,3-5'."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(reversed: ReversedRange) -> Result<()> {
    let server = PdfServer::new(reversed);
    info!("serving MCP over stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{tags, write_test_pdf};

    #[test]
    fn test_tools_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_test_pdf(dir.path(), "in.pdf", 3, "A");
        let output = dir.path().join("out.pdf");
        let server = PdfServer::default();

        let response = server.pdf_rotate_pages(Parameters(RotatePagesRequest {
            path: input.display().to_string(),
            pages: "2".to_string(),
            angle: 90,
            output: output.display().to_string(),
        }));
        let result: OutputResult = serde_json::from_str(&response).unwrap();
        assert_eq!(result.page_count, 3);
        assert_eq!(tags(&output), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_tool_errors_are_reported() {
        let server = PdfServer::default();
        let response = server.pdf_page_count(Parameters(PathRequest {
            path: "/no/such/file.pdf".to_string(),
        }));
        assert!(response.starts_with("Error: File not found"));

        let response = server.pdf_merge(Parameters(MergeRequest {
            inputs: vec!["/no/such/file.pdf".to_string()],
            output: "/tmp/never.pdf".to_string(),
        }));
        assert!(response.starts_with("Error: At least two input files"));
    }
}
