use petzone_admin::bootstrap;
use petzone_admin::config::Config;
use petzone_admin::domain::ports::dialogs::{Confirmer, Notifier};
use petzone_admin::infrastructure::dialogs::{StaticConfirmer, TracingNotifier};
use petzone_admin::infrastructure::observability;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init()?;

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let client = bootstrap::build_api_client(&config)?;
    let auth = bootstrap::build_auth_service(client.clone(), &config);

    if std::env::args().nth(1).as_deref() == Some("logout") {
        auth.logout().await?;
        return Ok(());
    }

    // Reuse the stored session, otherwise sign in with the configured account
    let session = match auth.restore().await? {
        Some(session) => {
            tracing::info!("Restored session for {}", session.user.email);
            session
        }
        None => {
            let (Some(email), Some(password)) = (&config.email, &config.password) else {
                tracing::error!("No stored session; set PETZONE_EMAIL and PETZONE_PASSWORD to sign in");
                return Err("not signed in".into());
            };
            auth.login(email, password).await?
        }
    };

    let notifier = Arc::new(TracingNotifier) as Arc<dyn Notifier>;
    // Headless runs never confirm destructive actions
    let confirmer = Arc::new(StaticConfirmer::decline_all()) as Arc<dyn Confirmer>;
    let screens = bootstrap::build_screens(client, &config, session, notifier, confirmer);

    let loaded = screens.refresh_all().await;
    tracing::info!(
        pets = screens.pets.rows().await.len(),
        pet_types = screens.pet_types.rows().await.len(),
        users = screens.users.rows().await.len(),
        vlogs = screens.vlogs.rows().await.len(),
        "Loaded {}/5 screens",
        loaded
    );

    Ok(())
}
