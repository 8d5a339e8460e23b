use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use showroom::net::api::{ApiClient, AuthBackend};
use showroom::net::types::{LoginRequest, PageParams, User};
use showroom::{ApiError, ClientConfig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing credentials; pass --email/--password or set SHOWROOM_EMAIL/SHOWROOM_PASSWORD")]
    MissingCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "showroom", about = "Showroom storefront API CLI")]
struct Cli {
    /// API base URL, e.g. `http://localhost:3000/api/v1`.
    #[arg(long, env = "SHOWROOM_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "SHOWROOM_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "SHOWROOM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the signed-in user.
    Whoami,
    /// Sign in and print the resulting user.
    Login {
        #[arg(long)]
        remember_me: bool,
    },
    /// Sign in, then sign out again.
    Logout,
    Products(ProductsCommand),
    Users(UsersCommand),
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        PageParams { page: args.page, limit: args.limit }
    }
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List(PageArgs),
    Get { id: String },
    Delete { id: String },
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List(PageArgs),
    Get {
        id: String,
    },
    Restore {
        id: String,
    },
    Revoke {
        id: String,
    },
    Blacklist {
        id: String,
    },
    Delete {
        id: String,
        /// Remove the record instead of soft-deleting it.
        #[arg(long)]
        permanent: bool,
    },
}

struct CliContext {
    client: ApiClient,
    email: Option<String>,
    password: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    tracing::debug!(api_url = %config.api_url, "using API");

    let ctx = CliContext { client: ApiClient::new(config)?, email: cli.email, password: cli.password };

    match cli.command {
        Command::Whoami => run_whoami(&ctx).await,
        Command::Login { remember_me } => run_login(&ctx, remember_me).await,
        Command::Logout => run_logout(&ctx).await,
        Command::Products(products) => run_products(&ctx, products).await,
        Command::Users(users) => run_users(&ctx, users).await,
    }
}

async fn sign_in(ctx: &CliContext, remember_me: bool) -> Result<(), CliError> {
    let (Some(email), Some(password)) = (ctx.email.clone(), ctx.password.clone()) else {
        return Err(CliError::MissingCredentials);
    };
    ctx.client.login(&LoginRequest { email, password, remember_me }).await?;
    Ok(())
}

/// Sign in when credentials were supplied; cookies carry the session for
/// the rest of the process.
async fn sign_in_if_configured(ctx: &CliContext) -> Result<(), CliError> {
    if ctx.email.is_some() && ctx.password.is_some() {
        sign_in(ctx, false).await?;
    }
    Ok(())
}

async fn current_user(ctx: &CliContext) -> Result<User, CliError> {
    let response = ctx.client.me().await?;
    response.into_ok_data().map(User::from).ok_or(CliError::NotSignedIn)
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    sign_in_if_configured(ctx).await?;
    print_json(&current_user(ctx).await?)
}

async fn run_login(ctx: &CliContext, remember_me: bool) -> Result<(), CliError> {
    sign_in(ctx, remember_me).await?;
    let user = current_user(ctx).await?;
    eprintln!("signed in as {} ({})", user.full_name(), user.role);
    print_json(&user)
}

async fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    sign_in(ctx, false).await?;
    ctx.client.logout().await?;
    println!("ok");
    Ok(())
}

async fn run_products(ctx: &CliContext, products: ProductsCommand) -> Result<(), CliError> {
    sign_in_if_configured(ctx).await?;
    match products.command {
        ProductsSubcommand::List(page) => print_json(&ctx.client.list_products(page.into()).await?),
        ProductsSubcommand::Get { id } => print_json(&ctx.client.get_product(&id).await?),
        ProductsSubcommand::Delete { id } => {
            ctx.client.delete_product(&id).await?;
            eprintln!("deleted product: {id}");
            Ok(())
        }
    }
}

async fn run_users(ctx: &CliContext, users: UsersCommand) -> Result<(), CliError> {
    sign_in_if_configured(ctx).await?;
    match users.command {
        UsersSubcommand::List(page) => print_json(&ctx.client.list_users(page.into()).await?),
        UsersSubcommand::Get { id } => print_json(&ctx.client.get_user(&id).await?),
        UsersSubcommand::Restore { id } => print_json(&ctx.client.restore_user(&id).await?),
        UsersSubcommand::Revoke { id } => print_json(&ctx.client.revoke_access(&id).await?),
        UsersSubcommand::Blacklist { id } => print_json(&ctx.client.blacklist_user(&id).await?),
        UsersSubcommand::Delete { id, permanent } => {
            if permanent {
                ctx.client.delete_user_permanent(&id).await?;
            } else {
                ctx.client.delete_user(&id).await?;
            }
            eprintln!("deleted user: {id}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
