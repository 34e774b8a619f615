//! Tidewear CLI - browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse women's products in size M, cheapest first
//! tw-cli browse --gender womens --size M --sort price
//!
//! # Show a product page
//! tw-cli catalog show 12
//!
//! # Add two of product 12 in its first size and color
//! tw-cli cart add 12 --qty 2
//!
//! # Show the cart with US express shipping
//! tw-cli cart show --destination US --method express
//!
//! # Complete the order
//! tw-cli checkout
//! ```
//!
//! Configuration comes from `TIDEWEAR_*` environment variables (see
//! `tidewear_storefront::config`). Logs go to stderr; `RUST_LOG` controls
//! verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tidewear_core::{Destination, ProductId, Quantity, ShippingMethod, SortKey};
use tidewear_storefront::catalog::{CatalogLoader, FileSource, Readiness};
use tidewear_storefront::config::{LogFormat, StorefrontConfig};
use tidewear_storefront::store::FileStore;
use tidewear_storefront::{Result, ShopSession};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "tw-cli")]
#[command(author, version, about = "Tidewear storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Filter and sort the catalog
    Browse(BrowseArgs),
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Complete the order and empty the cart
    Checkout(ShippingArgs),
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load the catalog into the local store (uses the cache if present)
    Load {
        /// Discard the cached catalog and read the source again
        #[arg(long)]
        refresh: bool,
    },
    /// List every product
    List,
    /// Show the featured products from the home page
    Featured,
    /// Show a product page
    Show {
        /// Product id
        id: ProductId,
    },
}

#[derive(Args)]
struct BrowseArgs {
    /// Gender to include (repeatable)
    #[arg(long)]
    gender: Vec<String>,

    /// Category to include (repeatable)
    #[arg(long)]
    category: Vec<String>,

    /// Size to include (repeatable)
    #[arg(long)]
    size: Vec<String>,

    /// Color to include (repeatable)
    #[arg(long)]
    color: Vec<String>,

    /// Sort order (`name`, `price`, `category`)
    #[arg(long, default_value = "name")]
    sort: SortKey,
}

#[derive(Args)]
struct ShippingArgs {
    /// Shipping method (`standard`, `express`, `priority`); defaults to config
    #[arg(long)]
    method: Option<ShippingMethod>,

    /// Destination (`CA`, `US`, `INT`); defaults to config
    #[arg(long)]
    destination: Option<Destination>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the order summary
    Show(ShippingArgs),
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Size (defaults to the product's first size)
        #[arg(long)]
        size: Option<String>,

        /// Color name (defaults to the product's first color)
        #[arg(long)]
        color: Option<String>,

        /// Quantity to add
        #[arg(long, default_value = "1", value_parser = parse_quantity)]
        qty: Quantity,
    },
    /// Change the quantity of a cart line
    Set {
        /// Line number as shown by `cart show`
        #[arg(value_parser = parse_line)]
        line: usize,

        /// New quantity
        #[arg(value_parser = parse_quantity)]
        qty: Quantity,
    },
    /// Remove a cart line
    Remove {
        /// Line number as shown by `cart show`
        #[arg(value_parser = parse_line)]
        line: usize,
    },
    /// Remove every line
    Clear,
}

/// Parse a quantity, rejecting non-numeric and non-positive input.
fn parse_quantity(s: &str) -> std::result::Result<Quantity, String> {
    Quantity::parse(s).map_err(|e| e.to_string())
}

/// Parse a 1-based line number into a 0-based index.
fn parse_line(s: &str) -> std::result::Result<usize, String> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| format!("invalid line number: {s} (lines start at 1)"))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = StorefrontConfig::from_env();

    // Initialize tracing
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result = config
        .map_err(Into::into)
        .and_then(|config| run(cli, &config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Open the shopper session and make sure the catalog is loaded.
///
/// With `refresh`, the cached catalog is dropped before the session parses
/// it, so a damaged cache can always be replaced from the source.
fn open_session(config: &StorefrontConfig, refresh: bool) -> Result<ShopSession<FileStore>> {
    let mut store = FileStore::open(&config.data_dir)?;
    if refresh {
        tracing::info!(path = %config.catalog_path.display(), "Refreshing catalog");
        CatalogLoader::invalidate(&mut store)?;
    }

    let mut session = ShopSession::open(store)?.with_config(config);

    if session.readiness() == Readiness::NotReady {
        session.load_catalog(&FileSource::new(&config.catalog_path))?;
    }
    Ok(session)
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<()> {
    let refresh = matches!(
        cli.command,
        Commands::Catalog {
            action: CatalogAction::Load { refresh: true }
        }
    );
    let mut session = open_session(config, refresh)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Load { .. } => commands::catalog::load(&session),
            CatalogAction::List => commands::catalog::list(&session)?,
            CatalogAction::Featured => commands::catalog::featured(&session)?,
            CatalogAction::Show { id } => commands::catalog::show(&session, id)?,
        },
        Commands::Browse(args) => commands::browse::run(&mut session, args)?,
        Commands::Cart { action } => match action {
            CartAction::Show(shipping) => {
                commands::apply_shipping(&mut session, &shipping);
                commands::cart::show(&session)?;
            }
            CartAction::Add {
                id,
                size,
                color,
                qty,
            } => commands::cart::add(&mut session, id, size.as_deref(), color.as_deref(), qty)?,
            CartAction::Set { line, qty } => commands::cart::set(&mut session, line, qty)?,
            CartAction::Remove { line } => commands::cart::remove(&mut session, line)?,
            CartAction::Clear => commands::cart::clear(&mut session)?,
        },
        Commands::Checkout(shipping) => {
            commands::apply_shipping(&mut session, &shipping);
            commands::checkout::run(&mut session)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use tidewear_storefront::store::{CART_KEY, CATALOG_KEY, KeyValueStore};

    use super::*;

    const CATALOG: &str = r#"[{"id":1,"name":"Tee","gender":"womens","category":"Tops","price":20,"sizes":["M"],"color":[{"name":"Red"}]}]"#;

    /// Config over a temp dir, with a one-product catalog source.
    fn config(tmp: &TempDir) -> StorefrontConfig {
        let catalog_path = tmp.path().join("products.json");
        fs::write(&catalog_path, CATALOG).unwrap();
        StorefrontConfig {
            data_dir: tmp.path().join("store"),
            catalog_path,
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_parse_line_is_one_based() {
        assert_eq!(parse_line("1").unwrap(), 0);
        assert_eq!(parse_line("3").unwrap(), 2);
        assert!(parse_line("0").is_err());
        assert!(parse_line("x").is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_bad_input() {
        assert_eq!(parse_quantity("2").unwrap().get(), 2);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("lots").is_err());
    }

    #[test]
    fn test_cli_parses_browse_filters() {
        let cli = Cli::try_parse_from([
            "tw-cli", "browse", "--gender", "womens", "--size", "M", "--size", "L", "--sort",
            "price",
        ])
        .unwrap();
        let Commands::Browse(args) = cli.command else {
            panic!("expected browse command");
        };
        assert_eq!(args.gender, vec!["womens"]);
        assert_eq!(args.size, vec!["M", "L"]);
        assert_eq!(args.sort, SortKey::Price);
    }

    #[test]
    fn test_cli_rejects_unknown_destination() {
        let result = Cli::try_parse_from(["tw-cli", "checkout", "--destination", "MX"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_refresh_replaces_damaged_catalog_cache() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp);
        let mut store = FileStore::open(&config.data_dir).unwrap();
        store
            .set(
                CATALOG_KEY,
                r#"[{"id":1,"name":"x","price":1,"sizes":[],"color":[]}]"#,
            )
            .unwrap();

        assert!(open_session(&config, false).is_err());

        let session = open_session(&config, true).unwrap();
        assert_eq!(session.readiness(), Readiness::Ready);
        assert_eq!(session.catalog().len(), 1);
        assert_eq!(session.store().get(CATALOG_KEY).unwrap().unwrap(), CATALOG);
    }

    #[test]
    fn test_clear_recovers_from_damaged_cart() {
        let tmp = TempDir::new().unwrap();
        let config = config(&tmp);
        let mut store = FileStore::open(&config.data_dir).unwrap();
        store
            .set(
                CART_KEY,
                r#"[{"id":1,"size":"M","color":"Red","quantity":0}]"#,
            )
            .unwrap();

        let mut session = open_session(&config, false).unwrap();
        assert!(session.cart().is_empty());
        session.clear_cart().unwrap();

        let reopened = open_session(&config, false).unwrap();
        assert!(reopened.cart().is_empty());
        assert_eq!(reopened.store().get(CART_KEY).unwrap().unwrap(), "[]");
    }
}
