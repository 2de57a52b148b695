use clap::{Parser, Subcommand};
use harness::git::{self, GitAdapter, GitTool, GIT_TOOL_NAME};
use harness::{AdapterConfig, ExecutionContext, ToolRegistry};
use protocol::types::ToolCall;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Run git operations through a tool-calling interface")]
struct Cli {
    /// Working directory used when a call has no explicit path
    #[arg(long, global = true)]
    working_dir: Option<PathBuf>,
    /// TOML file with adapter settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Per-call timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools
    Tools,
    /// Print a tool definition as JSON
    Schema {
        #[arg(long, default_value = GIT_TOOL_NAME)]
        tool: String,
    },
    /// Run one tool call with a JSON argument object
    Call {
        /// Arguments, e.g. '{"operation":"status"}'
        #[arg(short, long)]
        args: String,
        #[arg(long, default_value = GIT_TOOL_NAME)]
        tool: String,
        /// Print the structured result instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Read a tool call from stdin and print the response as JSON
    Invoke,
    /// Check that git can be run
    Check,
    /// Find the repository root containing a path
    Root {
        /// Defaults to the working directory
        path: Option<PathBuf>,
    },
    /// Strip credentials from a repository URL
    Sanitize { url: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut tool_registry = ToolRegistry::new();
    tool_registry.register(Box::new(GitTool::new(config.clone())));

    match cli.command {
        Commands::Tools => list_tools(&tool_registry),
        Commands::Schema { tool } => print_schema(&tool_registry, &tool)?,
        Commands::Call { args, tool, json } => {
            let ctx = call_context(&config);
            call(&tool_registry, &ctx, &tool, &args, json).await?;
        }
        Commands::Invoke => {
            let ctx = call_context(&config);
            invoke(&tool_registry, &ctx).await?;
        }
        Commands::Check => check(&config).await?,
        Commands::Root { path } => {
            let start = path.unwrap_or_else(|| config.working_dir.clone());
            println!("{}", git::find_root(start)?.display());
        }
        Commands::Sanitize { url } => println!("{}", git::sanitize_url(&url)),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AdapterConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AdapterConfig::load(path)?,
        None => AdapterConfig::default(),
    };
    if let Some(dir) = &cli.working_dir {
        config = config.with_working_dir(dir);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config.validate()?;
    Ok(config)
}

/// Context for one call: cancelled on Ctrl-C, bounded by the configured timeout.
fn call_context(config: &AdapterConfig) -> ExecutionContext {
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            on_signal.cancel();
        }
    });

    let ctx = ExecutionContext::with_token(token);
    match config.timeout {
        Some(timeout) => ctx.with_timeout(timeout),
        None => ctx,
    }
}

fn list_tools(tool_registry: &ToolRegistry) {
    println!("Available tools:");
    let tools = tool_registry.list_tools();

    if tools.is_empty() {
        println!("  No tools registered.");
    } else {
        for tool_name in tools {
            if let Some(tool) = tool_registry.get_tool(tool_name) {
                let def = tool.definition();
                println!("  - {}: {}", def.function.name, def.function.description);
            }
        }
    }
}

fn print_schema(
    tool_registry: &ToolRegistry,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let tool = tool_registry
        .get_tool(name)
        .ok_or_else(|| format!("Tool not found: {}", name))?;
    println!("{}", serde_json::to_string_pretty(&tool.definition())?);
    Ok(())
}

async fn call(
    tool_registry: &ToolRegistry,
    ctx: &ExecutionContext,
    tool: &str,
    raw_args: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let args: serde_json::Value = serde_json::from_str(raw_args)?;

    match tool_registry.execute(tool, ctx, args).await {
        Ok(output) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&output.result)?);
            } else {
                println!("{}", output.summary);
            }
            Ok(())
        }
        Err(e) => {
            error!("Tool execution failed: {}", e);
            if let Some(result) = e.result() {
                eprintln!("{}", serde_json::to_string_pretty(&result)?);
            }
            Err(e.into())
        }
    }
}

async fn invoke(
    tool_registry: &ToolRegistry,
    ctx: &ExecutionContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let call: ToolCall = serde_json::from_str(&input)?;

    info!(tool = %call.function.name, id = %call.id, "Handling tool call");
    let response = tool_registry.handle_call(ctx, call).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn check(config: &AdapterConfig) -> Result<(), Box<dyn std::error::Error>> {
    match GitAdapter::new(config.clone()).check_tool_available().await {
        Ok(()) => {
            println!("✓ {} is available.", config.git_program);
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", e);
            Err(e.into())
        }
    }
}
