//! Dessert Lab CLI - catalog browsing and store management tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog the way the storefront does
//! dl-cli catalog list --search chocolate --sort price-low --page 1
//!
//! # Manage products
//! dl-cli products list --search tart
//! dl-cli products add --name "Opera Cake" --description "Layered" --price 320 --img-url https://...
//! dl-cli products delete 64f0c2a91e8d
//!
//! # Manage orders
//! dl-cli orders list --status Pending
//! dl-cli orders complete 64f0c2a91e8d
//! dl-cli orders cancel 64f0c2a91e8d
//!
//! # Manage users
//! dl-cli users list --search jane
//! dl-cli users delete 64f0c2a91e8d
//! ```
//!
//! # Environment Variables
//!
//! - `DESSERT_LAB_API_URL` - Base URL of the REST backend (required)
//! - `DESSERT_LAB_ADMIN_TOKEN` - Bearer token for the admin endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dl-cli")]
#[command(author, version, about = "Dessert Lab management tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List catalog products with search/sort/pagination
    List {
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order: name, price-low, price-high
        #[arg(long, default_value = "name")]
        sort: String,

        /// 1-based page index
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products (server-paginated)
    List {
        /// Name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// 1-based page index
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Add a product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Catalog description
        #[arg(long)]
        description: String,

        /// Unit price in rupees
        #[arg(long)]
        price: String,

        /// Image URL
        #[arg(long)]
        img_url: String,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders (server-paginated, status-filtered)
    List {
        /// Status filter: Pending, completed, cancelled (omit for all)
        #[arg(long)]
        status: Option<String>,

        /// 1-based page index
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Mark a pending order completed
    Complete {
        /// Order id
        id: String,
    },
    /// Cancel a pending order
    Cancel {
        /// Order id
        id: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users (server-paginated)
    List {
        /// First-name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// 1-based page index
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Delete a user
    Delete {
        /// User id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { search, sort, page } => {
                commands::catalog::list(&search, &sort, page).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductAction::List { search, page } => {
                commands::products::list(&search, page).await?;
            }
            ProductAction::Add {
                name,
                description,
                price,
                img_url,
            } => {
                commands::products::add(&name, &description, &price, &img_url).await?;
            }
            ProductAction::Delete { id } => {
                commands::products::delete(&id).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List { status, page } => {
                commands::orders::list(status.as_deref(), page).await?;
            }
            OrderAction::Complete { id } => {
                commands::orders::transition(&id, dessert_lab_admin::orders::OrderAction::Complete)
                    .await?;
            }
            OrderAction::Cancel { id } => {
                commands::orders::transition(&id, dessert_lab_admin::orders::OrderAction::Cancel)
                    .await?;
            }
        },
        Commands::Users { action } => match action {
            UserAction::List { search, page } => {
                commands::users::list(&search, page).await?;
            }
            UserAction::Delete { id } => {
                commands::users::delete(&id).await?;
            }
        },
    }

    Ok(())
}
