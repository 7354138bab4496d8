//! Headless demo of the todo orchestrator.
//!
//! Loads the configured owner's todos from the resource at
//! `TODOFLOW_API_URL` and prints the resulting view. Settings may also come
//! from a `.env` file in the working directory.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todoflow::{Config, ListAction, ListEnvironment, ListReducer, ListState, ListStore, ListView};
use todoflow_client::HttpTodoApi;
use todoflow_core::environment::NoFocus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todoflow=info,todoflow_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let owner = match config.owner() {
        Ok(owner) => owner,
        Err(warning) => {
            println!("{warning}");
            return Ok(());
        },
    };

    let api = HttpTodoApi::with_timeout(&config.api_url, config.request_timeout())
        .context("building HTTP client")?;
    tracing::info!(api_url = %api.base_url(), %owner, "Starting");

    let env = ListEnvironment::new(Arc::new(api), Arc::new(NoFocus), owner)
        .with_notice_ttl(config.notice_ttl());
    let store = ListStore::new(ListState::new(), ListReducer::new(), env);

    store
        .send(ListAction::Load)
        .await
        .wait_with_timeout(config.request_timeout() + Duration::from_secs(1))
        .await
        .context("waiting for todos")?;

    render(&store.state(ListState::view).await);
    Ok(())
}

fn render(view: &ListView) {
    println!("todos\n");
    for item in &view.items {
        let mark = if item.completed { 'x' } else { ' ' };
        println!("  [{mark}] {}", item.title);
    }

    if view.has_todos {
        println!("\n{} | filter: {}", view.items_left_label, view.filter);
    }
    if let Some(notice) = view.notice {
        println!("\n! {notice}");
    }
}
