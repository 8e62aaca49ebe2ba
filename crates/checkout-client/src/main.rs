//! ShopSmart command-line shell
//!
//! Each invocation performs one user action. The session token is kept on
//! disk so the workflow can be continued across invocations.

use anyhow::{Context, Result};
use checkout_client::views::order::format_amount;
use checkout_client::{
    Config, FixedLocation, GeolocationResolver, HttpBackend, NoticeLevel, Route, SessionStore,
    Shell, View,
};
use clap::{Parser, Subcommand};
use shopsmart_common::PaymentStatus;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shopsmart")]
#[command(about = "Build a shopping list, find nearby shops and check out")]
struct Cli {
    /// Backend base URL (overrides SHOPSMART_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides SHOPSMART_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "SHOPSMART_PASSWORD")]
        password: String,
    },

    /// Create an account
    Register {
        name: String,
        email: String,
        #[arg(long, env = "SHOPSMART_PASSWORD")]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show your shopping lists
    Lists,

    /// Create a shopping list
    CreateList { title: String },

    /// Show the items of a list
    Items { list_id: String },

    /// Add an item to a list
    AddItem {
        list_id: String,
        name: String,
        /// Quantity; anything below 1 or non-numeric becomes 1
        #[arg(long)]
        qty: Option<String>,
        /// Preferred brand
        #[arg(long)]
        brand: Option<String>,
    },

    /// Remove an item from a list
    RemoveItem { list_id: String, item_id: String },

    /// Find shops that can fulfil a list
    FindShops {
        list_id: String,
        /// Select the Nth result (1-based) instead of the first
        #[arg(long)]
        pick: Option<usize>,
        /// Place an order with the selected shop
        #[arg(long)]
        order: bool,
    },

    /// Show an order
    Order { order_id: String },

    /// Simulate a payment outcome for an order
    Pay {
        order_id: String,
        #[arg(long, value_parser = parse_status)]
        status: PaymentStatus,
    },

    /// Navigate to a path such as /list/<id> and show the result
    Open { path: String },
}

fn parse_status(s: &str) -> std::result::Result<PaymentStatus, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging on stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checkout_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    info!("Backend: {}", config.api_url);
    info!("Session file: {}", config.session_file.display());

    let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to create HTTP client")?;
    let resolver = match config.location {
        Some(coordinate) => {
            GeolocationResolver::new(Arc::new(FixedLocation(coordinate)), config.geo_timeout())
        }
        None => GeolocationResolver::unavailable(),
    };
    let session = SessionStore::open(&config.session_file);

    let mut shell = Shell::new(Arc::new(backend), session, resolver);
    let result = run(&mut shell, cli.command).await;

    for notice in shell.drain_notices() {
        match notice.level {
            NoticeLevel::Success => println!("✓ {}", notice.message),
            NoticeLevel::Error => eprintln!("✗ {}", notice.message),
        }
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            // Already reported through notices; keep the detail in the log
            info!("Action ended without success: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Navigate to `route`; report and return false if the guard sent us elsewhere
async fn enter(shell: &mut Shell, route: Route) -> shopsmart_common::Result<bool> {
    let wanted = std::mem::discriminant(&route);
    let landed = shell.navigate(route).await?;
    if std::mem::discriminant(landed) == wanted {
        return Ok(true);
    }

    match landed {
        Route::Login => eprintln!("Not signed in. Run `shopsmart login <email>` first."),
        Route::Dashboard => eprintln!("Already signed in. Run `shopsmart logout` first."),
        other => eprintln!("Redirected to {}", other),
    }
    Ok(false)
}

async fn run(shell: &mut Shell, command: Commands) -> shopsmart_common::Result<()> {
    match command {
        Commands::Login { email, password } => {
            if enter(shell, Route::Login).await? {
                shell.login(&email, &password).await?;
            }
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            if enter(shell, Route::Register).await? {
                shell.register(&name, &email, &password).await?;
            }
        }
        Commands::Logout => {
            shell.logout().await?;
            println!("Signed out");
        }
        Commands::Lists => {
            if enter(shell, Route::Dashboard).await? {
                print_view(shell);
            }
        }
        Commands::CreateList { title } => {
            if enter(shell, Route::Dashboard).await? {
                let list = shell.create_list(&title).await?;
                println!("{}  {}", list.id, list.title);
            }
        }
        Commands::Items { list_id } => {
            if enter(shell, Route::ListDetail { list_id }).await? {
                print_view(shell);
            }
        }
        Commands::AddItem {
            list_id,
            name,
            qty,
            brand,
        } => {
            if enter(shell, Route::ListDetail { list_id }).await? {
                shell
                    .add_item(&name, qty.as_deref(), brand.as_deref())
                    .await?;
                print_view(shell);
            }
        }
        Commands::RemoveItem { list_id, item_id } => {
            if enter(shell, Route::ListDetail { list_id }).await? {
                shell.remove_item(&item_id).await?;
                print_view(shell);
            }
        }
        Commands::FindShops {
            list_id,
            pick,
            order,
        } => {
            if enter(shell, Route::ListDetail { list_id }).await? {
                shell.find_shops().await?;
                if let Some(n) = pick {
                    if !shell.select_vendor_at(n.saturating_sub(1))? {
                        eprintln!("No shop #{}; keeping the first match", n);
                    }
                }
                print_view(shell);
                if order {
                    shell.place_order().await?;
                    print_view(shell);
                }
            }
        }
        Commands::Order { order_id } => {
            if enter(shell, Route::OrderSummary { order_id }).await? {
                print_view(shell);
            }
        }
        Commands::Pay { order_id, status } => {
            if enter(shell, Route::Payment { order_id }).await? {
                shell.simulate_payment(status).await?;
                print_view(shell);
            }
        }
        Commands::Open { path } => {
            shell.open(&path).await?;
            print_view(shell);
        }
    }

    Ok(())
}

fn print_view(shell: &Shell) {
    println!("[{}]", shell.route());

    match shell.view() {
        View::Blank | View::Login | View::Register => {}
        View::Dashboard(dashboard) => {
            if dashboard.lists().is_empty() {
                println!("No lists yet");
            }
            for list in dashboard.lists() {
                match list.created_at {
                    Some(at) => println!("{}  {}  ({})", list.id, list.title, at.format("%Y-%m-%d")),
                    None => println!("{}  {}", list.id, list.title),
                }
            }
        }
        View::ListDetail(detail) => {
            if detail.items().is_empty() {
                println!("No items yet");
            }
            for item in detail.items() {
                match &item.brand_preference {
                    Some(brand) if !brand.is_empty() => {
                        println!("{}  {} x{}  [{}]", item.id, item.name, item.quantity, brand)
                    }
                    _ => println!("{}  {} x{}", item.id, item.name, item.quantity),
                }
            }
        }
        View::VendorResults(discovery) => {
            let count = discovery.my_items().len();
            println!("{} item{}", count, if count == 1 { "" } else { "s" });

            let selected = discovery.selected().map(|m| m.vendor.id.as_str());
            for (i, m) in discovery.matches().iter().enumerate() {
                let marker = if Some(m.vendor.id.as_str()) == selected { "*" } else { " " };
                println!(
                    "{} {}. {} ({} km)  coverage {}%  total {}  items {}",
                    marker,
                    i + 1,
                    m.vendor.name,
                    m.vendor.distance_km,
                    m.coverage_pct,
                    format_amount(m.total_cost),
                    m.available.len()
                );
                if !m.tags.is_empty() {
                    println!("     {}", m.tags.join(", "));
                }
                if !m.missing.is_empty() {
                    let missing: Vec<&str> = m.missing.iter().map(|x| x.name.as_str()).collect();
                    println!("     missing: {}", missing.join(", "));
                }
            }
        }
        View::OrderSummary(summary) => {
            if let Some(order) = summary.order() {
                println!("Order {}", order.id);
                for line in &order.items {
                    println!(
                        "  {} x{}  {}",
                        line.name,
                        line.quantity,
                        format_amount(line.line_total())
                    );
                }
                println!("  Total  {}", format_amount(order.total_cost));
            }
        }
        View::Payment(payment) => println!("Payment for order {}", payment.order_id()),
    }
}
