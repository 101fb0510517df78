use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use terraform_mcp_server::{ServerConfig, ToolsetRegistry, create_server};

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

#[derive(Parser)]
#[command(name = "terraform-mcp-server")]
#[command(about = "MCP server for HCP Terraform and Terraform Enterprise")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server (for use in mcp.json)
    Stdio {
        #[command(flatten)]
        config: ServerConfig,
    },
    /// Run as an MCP streamable HTTP server
    Http {
        /// Bind address, e.g. 0.0.0.0:8080
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
        #[command(flatten)]
        config: ServerConfig,
    },
    /// Print every known tool, its toolset and whether it is enabled
    ListTools {
        #[command(flatten)]
        config: ServerConfig,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("terraform_mcp_server=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stdio { config } => {
            info!(address = %config.address, "Starting MCP stdio server");

            let server = create_server(&config)?;

            // Run as an MCP stdio server. McpServer implements ServerHandler.
            let service = server
                .as_ref()
                .clone()
                .serve(stdio())
                .await
                .inspect_err(|e| tracing::error!("serving error: {:?}", e))?;

            // Block until the MCP session ends.
            service.waiting().await?;
            info!("MCP stdio server session ended");
        }
        Commands::Http { bind, config } => {
            info!(address = %config.address, "Starting MCP HTTP server on {}", bind);

            let server = create_server(&config)?;
            terraform_mcp_server::server::start_mcp_http(server, &bind).await?;
        }
        Commands::ListTools { config } => {
            let toolsets = ToolsetRegistry::builtin();
            let resolved = config.resolve_enablement(&toolsets);
            let server = create_server(&config)?;
            let registry = server.tool_registry();

            println!("Enabled: {}", resolved.enablement);
            if !resolved.rejected.is_empty() {
                println!("Ignored: {}", resolved.rejected.join(", "));
            }
            println!();
            println!("{:<45} {:<18} {:<8} {:<8}", "TOOL", "TOOLSET", "ENABLED", "HANDLER");
            println!("{}", "-".repeat(82));

            for name in toolsets.all_tool_names() {
                let toolset = toolsets
                    .toolset_of(name)
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let enabled = if resolved.enablement.allows(&toolsets, name) {
                    "yes"
                } else {
                    "no"
                };
                let handler = if registry.contains(name) { "yes" } else { "no" };
                println!("{:<45} {:<18} {:<8} {:<8}", name, toolset, enabled, handler);
            }
        }
    }

    Ok(())
}
