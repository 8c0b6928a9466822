use facet::Facet;
use figue as args;
use tracing_subscriber::EnvFilter;

mod client;
mod config;
mod error;

use error::CliError;

/// Dump and compare Cassandra table schemas.
#[derive(Facet, Debug)]
struct Cli {
    /// Show version information
    #[facet(args::named, args::short = 'V')]
    version: bool,

    /// Server to retrieve schema from. Defaults to the configured server, then 127.0.0.1
    #[facet(default, args::named, args::short = 's')]
    server: Option<String>,

    /// Command to run (default: schema)
    #[facet(default, args::subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Facet, Debug)]
#[repr(u8)]
enum Commands {
    /// Print every keyspace, table and column type as JSON
    Schema,
    /// Print the primary key of one table
    Key {
        /// Keyspace name
        #[facet(args::named)]
        keyspace: String,
        /// Table name
        #[facet(args::named)]
        table: String,
    },
    /// Compare one table between two servers
    Diff {
        /// Keyspace name
        #[facet(args::named)]
        keyspace: String,
        /// Table name
        #[facet(args::named)]
        table: String,
        /// Server to compare against
        #[facet(args::named)]
        other: String,
    },
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args_ref: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

    let result: Result<Cli, _> = args::from_slice(&args_ref);

    let cli = match result {
        Ok(cli) => cli,
        Err(err) if err.is_help_request() => {
            print!("{}", err.help_text().unwrap_or(""));
            return;
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if cli.version {
        println!("csm {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_logging();

    if let Err(err) = run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only carries the rendered schema.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("csm=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = config::load()?;
    if let Some((_, path)) = &config {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    let config = config.map(|(config, _)| config);
    let server = config::resolve_server(cli.server.as_deref(), config.as_ref());

    match cli.command.unwrap_or(Commands::Schema) {
        Commands::Schema => {
            let rows = client::fetch_schema_columns(&server).await?;
            let tree = csm::SchemaTree::build(&rows)?;
            println!("Schema for '{}'", server);
            println!("{}", facet_json::to_string_pretty(&tree));
        }
        Commands::Key { keyspace, table } => {
            let rows = client::fetch_schema_columns(&server).await?;
            let rows = client::table_rows(&rows, &keyspace, &table);
            if rows.is_empty() {
                return Err(CliError::TableNotFound {
                    server,
                    keyspace,
                    table,
                });
            }
            let key = csm::PrimaryKey::reconstruct(&rows)?;
            println!("{}.{}", keyspace, table);
            println!("  {}", key.to_cql());
            if let Some(order) = key.clustering_order_cql() {
                println!("  {}", order);
            }
        }
        Commands::Diff {
            keyspace,
            table,
            other,
        } => {
            let other = config::with_port(&other, config::port(config.as_ref()));
            let (rows, other_rows) = tokio::try_join!(
                client::fetch_schema_columns(&server),
                client::fetch_schema_columns(&other),
            )?;

            let tree = csm::SchemaTree::build(&rows)?;
            let other_tree = csm::SchemaTree::build(&other_rows)?;

            let lookup = |tree: &csm::SchemaTree, server: &str| {
                tree.table(&keyspace, &table)
                    .cloned()
                    .ok_or_else(|| CliError::TableNotFound {
                        server: server.to_string(),
                        keyspace: keyspace.clone(),
                        table: table.clone(),
                    })
            };
            let columns = lookup(&tree, &server)?;
            let other_columns = lookup(&other_tree, &other)?;

            let diff = csm::table_diff(&columns, &other_columns);
            println!("{}.{}: '{}' vs '{}'", keyspace, table, server, other);
            println!("{}", diff);
        }
    }

    Ok(())
}
