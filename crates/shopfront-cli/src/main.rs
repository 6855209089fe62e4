use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use shopfront_cli::seeder::{self, SeedConfig};
use shopfront_config::DatabaseConfig;
use shopfront_core::hash_password;
use shopfront_db::{PgPool, init_db_pool};
use shopfront_models::{CreateUserDto, UserId};
use validator::Validate;

#[derive(Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Shopfront CLI - Administrative tools for Shopfront", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake categories, products, and customers
    Seed {
        /// Number of categories to create
        #[arg(short = 'c', long, default_value = "5")]
        categories: usize,

        /// Number of products per category
        #[arg(long, default_value = "20")]
        products: usize,

        /// Number of customer accounts
        #[arg(long, default_value = "50")]
        customers: usize,
    },
    /// Clear all seeded data (keeps admins and hand-made catalog rows)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&pool, username, email, password).await,
        Commands::Seed {
            categories,
            products,
            customers,
        } => {
            let config = SeedConfig::new(categories)
                .with_products(products)
                .with_customers(customers);
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let dto = CreateUserDto {
        username,
        email,
        password,
    };
    dto.validate()?;

    let user_id = create_admin(pool, &dto).await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {user_id}");
    println!("   Username: {}", dto.username);
    println!("   Email: {}", dto.email);
    Ok(())
}

async fn create_admin(db: &PgPool, dto: &CreateUserDto) -> anyhow::Result<UserId> {
    let password_hash = hash_password(&dto.password).map_err(|e| e.error)?;

    let user_id: Option<UserId> = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, role_id)
         SELECT $1, $2, $3, id FROM roles WHERE name = 'admin'
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(&dto.username)
    .bind(&dto.email)
    .bind(&password_hash)
    .fetch_optional(db)
    .await?;

    match user_id {
        Some(id) => Ok(id),
        None => bail!("A user with this username or email already exists"),
    }
}
