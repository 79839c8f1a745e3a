mod console;
mod shop;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use qkart_client::StorefrontClient;
use qkart_core::SessionStore;
use qkart_storefront::{Authenticator, Storefront, UserAction};
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleNotifier;

#[derive(Debug, Parser)]
#[command(name = "qkart")]
#[command(about = "QKart storefront from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the full catalog
    Products,
    /// Search the catalog
    Search { query: String },
    /// Show the cart of the logged-in user
    Cart,
    /// Add a product to the cart
    Add { product_id: String },
    /// Set the quantity of a product in the cart (0 removes it)
    SetQty {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "QKART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "QKART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Interactive shop with live, debounced search
    Shop,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = qkart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let client = Arc::new(StorefrontClient::from_config(&config)?);
    let store = SessionStore::new(&config.session_path);
    let mut notifier = ConsoleNotifier::default();

    match cli.command.unwrap_or(Commands::Products) {
        Commands::Products => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            page.mount(&mut notifier).await;
            println!("{}", page.render());
        }
        Commands::Search { query } => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            page.mount(&mut notifier).await;
            page.search_now(&query, &mut notifier).await;
            println!("{}", page.render());
        }
        Commands::Cart => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            if !page.session().is_authenticated() {
                anyhow::bail!("not logged in; run `qkart login` first");
            }
            page.mount(&mut notifier).await;
            println!("{}", page.render());
        }
        Commands::Add { product_id } => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            page.mount(&mut notifier).await;
            page.dispatch(UserAction::AddToCart(product_id), &mut notifier)
                .await;
            println!("{}", page.render());
        }
        Commands::SetQty { product_id, qty } => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            page.mount(&mut notifier).await;
            page.dispatch(UserAction::SetQuantity { product_id, qty }, &mut notifier)
                .await;
            println!("{}", page.render());
        }
        Commands::Login { username, password } => {
            let auth = Authenticator::new(client, store);
            if let Some(session) = auth.login(&username, &password, &mut notifier).await {
                println!("logged in as {}", session.username().unwrap_or(&username));
            }
        }
        Commands::Register { username, password } => {
            let auth = Authenticator::new(client, store);
            auth.register(&username, &password, &mut notifier).await;
        }
        Commands::Logout => {
            let auth = Authenticator::new(client, store);
            auth.logout(&mut notifier);
            println!("logged out");
        }
        Commands::Shop => {
            let mut page = Storefront::new(client, store, config.search_debounce());
            shop::run_shop(&mut page, &mut notifier).await?;
        }
    }

    if notifier.errors() > 0 {
        anyhow::bail!("{} request(s) failed", notifier.errors());
    }
    Ok(())
}
