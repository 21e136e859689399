//! `jtree` CLI: print, query and report on JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print a document compactly (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | jtree print --strict
//!
//! # Match a path expression, one result per line
//! jtree match 'items/[]/{id,name}' -i catalog.json
//!
//! # Bare string results, numeric strings coerced
//! jtree match 'items/[]/price' --short --to-real -i catalog.json
//!
//! # Flatten a name/children hierarchy with a size key per leaf
//! jtree match 'name...children...size' -i flare.json
//!
//! # Package report, hierarchical package names
//! jtree report --hier -i flare.json
//!
//! # Type of the document root
//! jtree type -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jtree_core::report::{package_report, ReportOptions, ReportRow};
use jtree_core::{Config, Document, Tree};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jtree",
    version,
    about = "Print, query and report on JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trace parse failures and every match step on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress parse and match diagnostics
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print it back
    Print {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print the results of a path expression, one per line
    Match {
        /// Path expression, e.g. `items/[0,2]/{id,name}`
        expr: String,
        /// Print the type name of each result instead of its value
        #[arg(long = "type")]
        show_type: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Name/value rows grouped by package over a name/children hierarchy
    Report {
        /// Qualify each package with its ancestor packages
        #[arg(long)]
        hier: bool,
        /// Field holding child nodes
        #[arg(long, default_value = "children")]
        hier_name: String,
        /// Field naming a node
        #[arg(long, default_value = "name")]
        hier_key: String,
        /// Field holding a leaf's value
        #[arg(long, default_value = "size")]
        hier_value: String,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print the type name of the document root
    Type {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// JSON file with configuration defaults; flags override it
    #[arg(long)]
    config: Option<String>,
    /// Reject text after the root and print bare true/false/null
    #[arg(long)]
    strict: bool,
    /// Accept single-quoted strings
    #[arg(long)]
    single_quote: bool,
    /// Print without brackets, siblings separated by spaces
    #[arg(long)]
    flat: bool,
    /// Print as CSV
    #[arg(long)]
    csv: bool,
    /// HTML-escape printed text
    #[arg(long)]
    html: bool,
    /// Print bare scalar payloads
    #[arg(long)]
    short: bool,
    /// Print numeric strings as numbers
    #[arg(long)]
    to_real: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug, cli.quiet);

    match cli.command {
        Commands::Print { common } => {
            let doc = build_document(&common, cli.debug, cli.quiet)?;
            let tree = parse_input(&doc, &common)?;
            write_output(common.output.as_deref(), &format!("{}\n", doc.print(tree.root())))?;
        }
        Commands::Match {
            expr,
            show_type,
            common,
        } => {
            let doc = build_document(&common, cli.debug, cli.quiet)?;
            let tree = parse_input(&doc, &common)?;
            let results = doc
                .match_values(tree.root(), &expr)
                .with_context(|| format!("Match failed: {}", expr))?;

            let mut out = String::new();
            for result in &results {
                if show_type {
                    out.push_str(result.type_name());
                } else {
                    out.push_str(&doc.print_matched(result));
                }
                out.push('\n');
            }
            write_output(common.output.as_deref(), &out)?;
        }
        Commands::Report {
            hier,
            hier_name,
            hier_key,
            hier_value,
            common,
        } => {
            let doc = build_document(&common, cli.debug, cli.quiet)?;
            let tree = parse_input(&doc, &common)?;
            let options = ReportOptions {
                children: hier_name,
                key: hier_key,
                value: hier_value,
                hierarchical: hier,
            };
            let rows = package_report(tree.root(), &options);
            let out: String = rows.iter().map(|row| format_row(row, hier)).collect();
            write_output(common.output.as_deref(), &out)?;
        }
        Commands::Type { common } => {
            let doc = build_document(&common, cli.debug, cli.quiet)?;
            let tree = parse_input(&doc, &common)?;
            write_output(
                common.output.as_deref(),
                &format!("{}\n", tree.root().type_name()),
            )?;
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the level picked by `--debug`/`--quiet`.
fn init_logging(debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .init();
}

/// Start from `--config` (or defaults) and switch on every flag given.
fn build_document(args: &CommonArgs, debug: bool, quiet: bool) -> Result<Document> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str::<Config>(&text)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => Config::default(),
    };

    let flags = [
        (debug, &mut config.debug),
        (quiet, &mut config.quiet),
        (args.strict, &mut config.strict),
        (args.single_quote, &mut config.allow_single_quote),
        (args.flat, &mut config.print_flat),
        (args.csv, &mut config.print_csv),
        (args.html, &mut config.print_html),
        (args.short, &mut config.print_short),
        (args.to_real, &mut config.string_to_real),
    ];
    for (set, field) in flags {
        if set {
            *field = true;
        }
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(Document::new(config))
}

fn parse_input(doc: &Document, args: &CommonArgs) -> Result<Tree> {
    let text = read_input(args.input.as_deref())?;
    doc.parse(&text).context("Parse failed")
}

/// `package/name\tvalue` when hierarchical, `name\tvalue\tpackage` otherwise.
fn format_row(row: &ReportRow, hier: bool) -> String {
    if !hier {
        return format!("{}\t{}\t{}\n", row.name, row.value, row.package);
    }
    if row.package.is_empty() {
        format!("{}\t{}\n", row.name, row.value)
    } else {
        format!("{}/{}\t{}\n", row.package, row.name, row.value)
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
