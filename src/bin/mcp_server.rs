//! Pokedoku MCP Server
//!
//! A Model Context Protocol server over stdio that exposes name
//! normalization, classification, evolution analysis and guess validation
//! as tools.

use std::borrow::Cow;
use std::sync::Arc;

use pokedoku::config::Config;
use pokedoku::errors::PokedokuError;
use pokedoku::service::PokedexService;
use pokedoku::tool_interface::*;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorCode, ErrorData as McpError},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

#[derive(Clone)]
pub struct PokedokuService {
    tool_router: ToolRouter<PokedokuService>,
    pokedex: Arc<PokedexService>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NameRequest {
    #[schemars(description = "Pokemon name as displayed or typed, e.g. 'Mr. Mime' or 'Charizard Mega X'")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyRequest {
    #[schemars(description = "Pokemon name to classify")]
    pub name: String,
    #[schemars(description = "Generation slug of the species, e.g. 'generation-iv'")]
    pub generation: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeRequest {
    #[schemars(description = "Evolution chain payload as JSON text (REST or GraphQL shape)")]
    pub chain: String,
    #[schemars(description = "Pokemon to locate in the chain")]
    pub target: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DebugChainRequest {
    #[schemars(description = "Evolution chain payload as JSON text")]
    pub chain: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ValidateGuessRequest {
    #[schemars(description = "Species record as JSON text: name, types, generation and legendary/mythical/baby flags")]
    pub record: String,
    #[schemars(description = "Row criterion as JSON text, e.g. '{\"kind\": \"type\", \"value\": \"Fire\"}'")]
    pub row: String,
    #[schemars(description = "Column criterion as JSON text")]
    pub col: String,
    #[schemars(description = "Evolution chain payload as JSON text; needed for stage and evolution criteria")]
    pub chain: Option<String>,
}

fn tool_error(context: &str, error: PokedokuError) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(format!("{context}: {error}")),
        data: None,
    }
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl PokedokuService {
    pub fn new(pokedex: PokedexService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            pokedex: Arc::new(pokedex),
        }
    }

    #[tool(description = "Normalize a Pokemon name and show its base form, display name and sprite")]
    async fn normalize_name(
        &self,
        Parameters(request): Parameters<NameRequest>,
    ) -> Result<CallToolResult, McpError> {
        text_result(normalize_report(&self.pokedex, &request.name))
    }

    #[tool(description = "Classify a Pokemon: regional and battle forms, special categories, region")]
    async fn classify_pokemon(
        &self,
        Parameters(request): Parameters<ClassifyRequest>,
    ) -> Result<CallToolResult, McpError> {
        classify_report(&self.pokedex, &request.name, request.generation.as_deref())
            .map_err(|e| tool_error("Error classifying Pokemon", e))
            .and_then(text_result)
    }

    #[tool(description = "Find a Pokemon's stage and evolution method within an evolution chain")]
    async fn analyze_evolution(
        &self,
        Parameters(request): Parameters<AnalyzeRequest>,
    ) -> Result<CallToolResult, McpError> {
        analyze_report(&self.pokedex, &request.chain, &request.target)
            .map_err(|e| tool_error("Error analyzing evolution", e))
            .and_then(text_result)
    }

    #[tool(description = "Show the flattened view, size, depth and validation of an evolution chain")]
    async fn debug_chain(
        &self,
        Parameters(request): Parameters<DebugChainRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug_chain_report(&request.chain)
            .map_err(|e| tool_error("Error reading evolution chain", e))
            .and_then(text_result)
    }

    #[tool(description = "Check a guessed Pokemon against a row and a column criterion")]
    async fn validate_guess(
        &self,
        Parameters(request): Parameters<ValidateGuessRequest>,
    ) -> Result<CallToolResult, McpError> {
        validate_guess_report(
            &self.pokedex,
            &request.record,
            &request.row,
            &request.col,
            request.chain.as_deref(),
        )
        .map_err(|e| tool_error("Error validating guess", e))
        .and_then(text_result)
    }

    #[tool(description = "Show hit and miss counters of the lookup caches")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        cache_stats_report(&self.pokedex)
            .map_err(|e| tool_error("Error reading cache stats", e))
            .and_then(text_result)
    }

    #[tool(description = "Drop every cached lookup")]
    async fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        self.pokedex.clear_cache();
        text_result("Caches cleared.".to_string())
    }
}

#[tool_handler]
impl ServerHandler for PokedokuService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    log::info!("Pokedoku MCP Server starting...");

    let config = Config::load();
    let service = PokedokuService::new(PokedexService::from_config(&config)?);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    log::info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    log::info!("Pokedoku MCP Server exiting: {quit_reason:?}");
    Ok(())
}
