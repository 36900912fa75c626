use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use hotelgenie::prelude::*;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "session-cli")]
#[command(about = "Sign in to a HotelGenie backend and inspect the session")]
struct Args {
    /// Backend base URL
    #[arg(long, env = "HOTELGENIE_API_BASE", default_value = "http://localhost:8080")]
    api_base: String,

    /// Where the session is persisted
    #[arg(long, env = "HOTELGENIE_STORE", default_value = hotelgenie::DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the stored session and show the menu
    Status,
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Create a client account
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Ask the route guard about a path
    Open { path: String },
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Prints redirects instead of following them.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: Route) {
        println!("-> {route}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    hotelgenie::init_tracing();
    let args = Args::parse();
    tracing::debug!(api_base = %args.api_base, store = %args.store.display(), "session-cli starting");

    // The process exits right after each command, so delayed redirects
    // would never fire.
    let app = HotelGenieBuilder::new()
        .base_url(args.api_base)
        .store_path(args.store)
        .session_config(SessionConfig {
            logout_redirect_delay: Duration::ZERO,
            registration_redirect_delay: Duration::ZERO,
            ..SessionConfig::default()
        })
        .build(PrintNavigator)?;

    match args.command {
        Command::Status => {
            let state = app.start().await;
            println!("session: {state}");
            print_menu(&app);
        }
        Command::Login { email, password } => {
            match app.sign_in(&LoginForm::new(email, password)).await {
                Ok(_) => print_menu(&app),
                Err(e) => fail(&e),
            }
        }
        Command::Register {
            name,
            email,
            password,
        } => match app
            .sign_up(&RegistrationForm::new(name, email, password))
            .await
        {
            Ok(()) => println!("Registration successful! Please sign in."),
            Err(e) => fail(&e),
        },
        Command::Logout => app.logout().await,
        Command::Open { path } => {
            app.start().await;
            match app.guard_path(&path)? {
                Decision::Allow => println!("{path}: allowed"),
                Decision::Pending => println!("{path}: session not determined"),
                Decision::Redirect(to) => println!("{path}: redirected to {to}"),
            }
        }
    }

    Ok(())
}

fn print_menu(app: &HotelGenie<PrintNavigator>) {
    for entry in app.nav_entries() {
        println!("  {entry}");
    }
}

fn fail(err: &HotelGenieError) -> ! {
    tracing::debug!(error = %err, "command failed");
    eprintln!("{}", err.user_message());
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    /// Reads the declared default of `id`, independent of the environment.
    fn default_of(id: &str) -> String {
        let command = Args::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == id)
            .expect("argument exists");
        arg.get_default_values()[0].to_string_lossy().into_owned()
    }

    #[test]
    fn test_args_defaults() {
        assert_eq!(default_of("api_base"), "http://localhost:8080");
        assert_eq!(default_of("store"), hotelgenie::DEFAULT_STORE_PATH);

        let args = Args::try_parse_from(["session-cli", "status"]).unwrap();
        assert!(matches!(args.command, Command::Status));
    }

    #[test]
    fn test_args_flags_override_environment() {
        let args = Args::try_parse_from([
            "session-cli",
            "--api-base",
            "http://api.test",
            "--store",
            "/tmp/s.json",
            "logout",
        ])
        .unwrap();
        assert_eq!(args.api_base, "http://api.test");
        assert_eq!(args.store, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_args_login_positional() {
        let args = Args::try_parse_from([
            "session-cli",
            "--api-base",
            "http://api.test",
            "login",
            "guest@hotel.com",
            "hunter22",
        ])
        .unwrap();
        assert_eq!(args.api_base, "http://api.test");
        match args.command {
            Command::Login { email, password } => {
                assert_eq!(email, "guest@hotel.com");
                assert_eq!(password, "hunter22");
            }
            other => panic!("expected login, got {other:?}"),
        }
    }

    #[test]
    fn test_args_missing_subcommand_is_error() {
        assert!(Args::try_parse_from(["session-cli"]).is_err());
    }
}
