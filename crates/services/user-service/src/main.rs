//! User Service - admin CLI for the user directory.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, ObjectId, UpdateUser, UserResponse, UserType};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User directory management")]
struct Cli {
    /// Password salt for new users (overrides SALT from the environment)
    #[arg(long, global = true)]
    salt: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    Create(NewUserArgs),
    /// Return the user with this email, creating it when missing
    FindOrCreate(NewUserArgs),
    /// Look up a user by id or email
    Find {
        #[arg(long, conflicts_with = "email", required_unless_present = "email")]
        id: Option<ObjectId>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Update profile fields of a user
    Update {
        #[arg(long)]
        id: ObjectId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long = "type")]
        user_type: Option<UserType>,
    },
    /// Manage a user's favorite offers
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommands,
    },
    /// Check database connectivity
    Ping,
}

#[derive(Args)]
struct NewUserArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    avatar: Option<String>,
    #[arg(long = "type", default_value = "regular")]
    user_type: UserType,
}

impl From<NewUserArgs> for CreateUser {
    fn from(args: NewUserArgs) -> Self {
        CreateUser {
            email: args.email,
            name: args.name,
            password: args.password,
            avatar_path: args.avatar,
            user_type: args.user_type,
        }
    }
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// Add an offer to the favorites
    Add {
        #[arg(long)]
        id: ObjectId,
        #[arg(long)]
        offer: ObjectId,
    },
    /// Remove an offer from the favorites
    Remove {
        #[arg(long)]
        id: ObjectId,
        #[arg(long)]
        offer: ObjectId,
    },
    /// List favorite offer ids
    List {
        #[arg(long)]
        id: ObjectId,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = UserServiceConfig::from_env();
    if let Some(salt) = cli.salt.clone() {
        config.salt = salt;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run(cli.command, &config).await {
        eprintln!("{}: {}", err.code(), err.user_message());
        std::process::exit(exit_code(&err));
    }
}

async fn run(command: Commands, config: &UserServiceConfig) -> AppResult<()> {
    let (db, directory) = user_service_lib::connect(config).await?;

    match command {
        Commands::Create(args) => {
            let user = directory.create(args.into(), &config.salt).await?;
            print_json(&UserResponse::from(user))
        }
        Commands::FindOrCreate(args) => {
            let user = directory.find_or_create(args.into(), &config.salt).await?;
            print_json(&UserResponse::from(user))
        }
        Commands::Find { id, email } => {
            let user = match (id, email) {
                (Some(id), _) => directory.find_by_id(id).await?,
                (None, Some(email)) => directory.find_by_email(&email).await?,
                (None, None) => return Err(AppError::validation("Either --id or --email is required")),
            };
            print_json(&UserResponse::from(user.ok_or_not_found()?))
        }
        Commands::Update {
            id,
            name,
            avatar,
            user_type,
        } => {
            let update = UpdateUser {
                name,
                avatar_path: avatar,
                user_type,
            };
            if update.is_empty() {
                return Err(AppError::validation("Nothing to update"));
            }
            let user = directory.update_by_id(id, update).await?;
            print_json(&UserResponse::from(user.ok_or_not_found()?))
        }
        Commands::Favorites { action } => match action {
            FavoritesCommands::Add { id, offer } => {
                directory.add_to_favorites(id, offer).await?;
                print_favorites(&directory, id).await
            }
            FavoritesCommands::Remove { id, offer } => {
                directory.remove_from_favorites(id, offer).await?;
                print_favorites(&directory, id).await
            }
            FavoritesCommands::List { id } => print_favorites(&directory, id).await,
        },
        Commands::Ping => {
            db.ping().await?;
            print_json("ok")
        }
    }
}

/// Exit status: 2 for bad input or missing records, 1 for everything else.
fn exit_code(err: &AppError) -> i32 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}

async fn print_favorites(directory: &impl UserService, id: ObjectId) -> AppResult<()> {
    let favorites: Vec<String> = directory
        .get_favorites(id)
        .await?
        .into_iter()
        .map(ObjectId::to_hex)
        .collect();

    print_json(&favorites)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_separates_input_errors() {
        assert_eq!(exit_code(&AppError::validation("Nothing to update")), 2);
        assert_eq!(exit_code(&AppError::NotFound), 2);
        assert_eq!(exit_code(&AppError::conflict("Email")), 2);
        assert_eq!(exit_code(&AppError::internal("hash failed")), 1);
    }
}
