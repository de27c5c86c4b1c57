//! Log in and print a one-shot dashboard summary.
//!
//! ```sh
//! HOMEGENIE_EMAIL=admin@example.com HOMEGENIE_PASSWORD=secret \
//!     cargo run --example dashboard_summary
//! ```
//!
//! Base URLs come from HOMEGENIE_USER_SERVICE_URL /
//! HOMEGENIE_MAINTENANCE_SERVICE_URL, defaulting to the local dev ports.

use std::sync::Arc;

use homegenie_client::{
    ClientConfig, FileSessionStorage, HttpClient, RequestListModel, SessionStore, StatusFilter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let storage = FileSessionStorage::in_dir(std::env::temp_dir().join("homegenie"));
    let session = Arc::new(SessionStore::new(&config, Box::new(storage)));

    // reuse a persisted session when one is present
    let user = match session.restore() {
        Some(user) => user,
        None => {
            let email = std::env::var("HOMEGENIE_EMAIL")?;
            let password = std::env::var("HOMEGENIE_PASSWORD")?;
            session.login(&email, &password).await?
        }
    };
    println!("logged in as {} ({})", user.full_name, user.role);

    let http = HttpClient::new(&config, Arc::clone(&session));
    let mut model = RequestListModel::new(http, user);
    model.load_all().await;

    if let Some(notice) = model.take_notice() {
        eprintln!("warning: {}", notice.message);
    }

    if let Some(stats) = model.statistics() {
        println!(
            "tickets: {} total / {} pending / {} in progress / {} completed / {} critical",
            stats.total, stats.pending, stats.in_progress, stats.completed, stats.critical
        );
    }

    for request in model.filtered(StatusFilter::All) {
        let assignee = request
            .assigned_to
            .and_then(|id| model.resolve_technician(id))
            .unwrap_or("unassigned");
        println!(
            "#{:<4} [{}] {} ({})",
            request.id,
            request.status.as_str(),
            request.title,
            assignee
        );
    }

    Ok(())
}
