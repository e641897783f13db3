use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalogue_review_client::{
    config::AppConfig,
    dto::{products::ProductQuery, reviews::ReviewForm},
    error::AppError,
    services::{
        product_service::{self, Refresh},
        review_service,
    },
    state::AppState,
    view,
};

/// Browse the product catalogue and manage reviews
#[derive(Parser, Debug)]
#[command(name = "catalogue", version)]
#[command(about = "Browse products and manage reviews", long_about = None)]
struct Cli {
    /// Base URL of the catalogue API (overrides CATALOGUE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List one page of products
    List(ListArgs),
    /// List product categories
    Categories,
    /// Show a product with its reviews
    Show {
        /// Product id
        id: String,
    },
    /// Add, edit or delete reviews
    #[command(subcommand)]
    Review(ReviewCommand),
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Page size (defaults to CATALOGUE_PAGE_SIZE)
    #[arg(long)]
    limit: Option<u32>,

    /// Only products in this category
    #[arg(long)]
    category: Option<String>,

    /// Full-text search; takes precedence over --category
    #[arg(long)]
    search: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Add a review to a product
    Add {
        product_id: i64,
        #[arg(long, default_value = "")]
        author: String,
        /// Star to select, 1 to 5
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Edit an existing review; omitted fields are kept
    Edit {
        product_id: i64,
        review_id: i64,
        #[arg(long, default_value = "")]
        author: String,
        /// Star to select, 1 to 5
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Delete a review
    Delete { product_id: i64, review_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,catalogue_review_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match cli.api_url.as_deref() {
        Some(url) => AppConfig::from_env()?.with_base_url(url)?,
        None => AppConfig::from_env()?,
    };
    tracing::debug!(api = %config.api_base_url, "using catalogue API");
    let state = AppState::new(&config)?;

    match cli.command {
        Commands::List(args) => {
            let limit = args.limit.unwrap_or(config.page_size);
            let mut query = ProductQuery::new(args.page, limit);
            query.category = args.category;
            query.search = args.search;
            let query = query.normalize();
            let (page, limit) = (query.page, query.limit);
            // Failures are rendered from state.
            let _ = product_service::list_products(&state, query).await;
            println!("{}", view::render_product_list(&state.snapshot().await, page, limit));
        }
        Commands::Categories => {
            let _ = product_service::list_categories(&state).await;
            println!("{}", view::render_categories(&state.snapshot().await));
        }
        Commands::Show { id } => {
            let Some(id) = parse_product_id(&id) else {
                println!("{}", view::render_not_found(&format!("/products/{id}")));
                return Ok(());
            };
            let loaded =
                product_service::load_product_with_reviews(&state, id, Refresh::IfMissing).await;
            println!(
                "{}",
                view::render_loaded_product(&state.snapshot().await, id, &loaded)
            );
        }
        Commands::Review(command) => run_review(&state, command).await,
    }

    println!("\n{}", view::render_footer());
    Ok(())
}

async fn run_review(state: &AppState, command: ReviewCommand) {
    let product_id = match &command {
        ReviewCommand::Add { product_id, .. }
        | ReviewCommand::Edit { product_id, .. }
        | ReviewCommand::Delete { product_id, .. } => *product_id,
    };
    let loaded =
        product_service::load_product_with_reviews(state, product_id, Refresh::IfMissing).await;
    if loaded.is_err() {
        println!(
            "{}",
            view::render_loaded_product(&state.snapshot().await, product_id, &loaded)
        );
        return;
    }

    let result = match command {
        ReviewCommand::Add {
            author,
            rating,
            comment,
            ..
        } => review_service::submit_review(state, review_form(author, rating, comment))
            .await
            .map(|review| format!("Added review #{}", review.id)),
        ReviewCommand::Edit {
            review_id,
            author,
            rating,
            comment,
            ..
        } => review_service::edit_review(state, review_id, review_form(author, rating, comment))
            .await
            .map(|review| format!("Updated review #{}", review.id)),
        ReviewCommand::Delete { review_id, .. } => review_service::delete_review(state, review_id)
            .await
            .map(|()| format!("Deleted review #{review_id}")),
    };

    match result {
        Ok(message) => println!("{message}\n"),
        Err(err) if err.is_local() => println!("{err}\n"),
        Err(AppError::NotFound) => println!("Review not found\n"),
        Err(_) => {}
    }
    println!("{}", view::render_product_page(&state.snapshot().await));
}

/// `rating` is the star clicked in the picker, 1-based; 0 leaves it unselected.
fn review_form(author: String, rating: u8, comment: String) -> ReviewForm {
    let mut form = ReviewForm::new(author, 0, comment);
    if let Some(index) = rating.checked_sub(1) {
        form.pick_star(usize::from(index));
    }
    form
}

fn parse_product_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id >= 1)
}
