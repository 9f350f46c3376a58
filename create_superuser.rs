//! Bootstrap an admin account.
//!
//! ```text
//! create_superuser <username> <email> <password>
//! ```
//!
//! Uses the same `DATABASE_URL` and bcrypt settings as the server.

use ffcodex_auth::backend::auth::{accounts, RegisterRequest};
use ffcodex_auth::backend::server::create_state;
use ffcodex_auth::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, email, password] = args.as_slice() else {
        eprintln!("usage: create_superuser <username> <email> <password>");
        std::process::exit(2);
    };

    let config = AppConfig::from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = create_state(config).await?;
    let request = RegisterRequest {
        username: username.clone(),
        email: email.clone(),
        password: password.clone(),
    };

    match accounts::create_superuser(&state, request).await {
        Ok(user) => {
            println!("Superuser {} created with id {}", user.username, user.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not create superuser: {}", e.message());
            std::process::exit(1);
        }
    }
}
