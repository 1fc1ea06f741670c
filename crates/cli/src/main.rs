//! Grocer CLI - Drive the storefront core from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! grocer cart show
//!
//! # Add one unit of product 3, then set it to 2 units
//! grocer cart add 3
//! grocer cart update 3 2
//!
//! # Price of product 3 now, or at a given time
//! grocer price 3
//! grocer price 3 --at 2026-12-24T18:00:00Z
//!
//! # Review product 3 as user 7
//! grocer review add 3 --author 7 --rating 4 --comment "Crisp and fresh"
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, update, remove, clear
//! - `price` - Effective price and sale status of a product
//! - `review` - List, add, edit, delete reviews (recomputes the rating)

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grocer_core::{ProductId, ReviewId, UserId};
use grocer_storefront::config::StorefrontConfig;
use grocer_storefront::error::{self, StorefrontError};

mod commands;

#[derive(Parser)]
#[command(name = "grocer")]
#[command(author, version, about = "Grocer storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the persisted shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show the effective price of a product
    Price {
        /// Product ID
        product: ProductId,

        /// Evaluation time (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Manage product reviews
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product: ProductId,
    },
    /// Set the quantity of a product (0 or less removes it)
    Update {
        /// Product ID
        product: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product: ProductId,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List reviews of a product
    List {
        /// Product ID
        product: ProductId,
    },
    /// Add a review
    Add {
        /// Product ID
        product: ProductId,

        /// Reviewing user ID
        #[arg(short, long)]
        author: UserId,

        /// Star rating (1-5)
        #[arg(short, long)]
        rating: u8,

        /// Review text
        #[arg(short, long, default_value = "")]
        comment: String,
    },
    /// Replace a review's rating and comment
    Edit {
        /// Product ID
        product: ProductId,

        /// Review ID
        review: ReviewId,

        /// Star rating (1-5)
        #[arg(short, long)]
        rating: u8,

        /// Review text
        #[arg(short, long, default_value = "")]
        comment: String,
    },
    /// Delete a review
    Delete {
        /// Product ID
        product: ProductId,

        /// Review ID
        review: ReviewId,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grocer=info,grocer_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            error::report(&StorefrontError::from(e));
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config) {
        error::report(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), StorefrontError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(config),
            CartAction::Add { product } => commands::cart::add(config, product),
            CartAction::Update { product, quantity } => {
                commands::cart::update(config, product, quantity)
            }
            CartAction::Remove { product } => commands::cart::remove(config, product),
            CartAction::Clear => commands::cart::clear(config),
        },
        Commands::Price { product, at } => {
            commands::price::show(config, product, at.unwrap_or_else(Utc::now))
        }
        Commands::Review { action } => match action {
            ReviewAction::List { product } => commands::review::list(config, product),
            ReviewAction::Add {
                product,
                author,
                rating,
                comment,
            } => commands::review::add(config, product, author, rating, &comment),
            ReviewAction::Edit {
                product,
                review,
                rating,
                comment,
            } => commands::review::edit(config, product, review, rating, &comment),
            ReviewAction::Delete { product, review } => {
                commands::review::delete(config, product, review)
            }
        },
    }
}
