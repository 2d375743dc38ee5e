use std::{env, net::SocketAddr};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use dealflow::api::{ApiClient, login};
use dealflow::models::Credentials;
use dealflow::session::SessionContext;
use dealflow::state::AppState;
use dealflow::storage::{load_session, persist_session, resolve_session_path};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let base_url =
        env::var("DEALFLOW_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let http = reqwest::Client::new();

    let session_path = resolve_session_path();
    if let Some(parent) = session_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let session = match load_session(&session_path).await {
        Some(session) => {
            info!("using cached session for {}", session.user.email);
            session
        }
        None => {
            let credentials = Credentials {
                email: env::var("DEALFLOW_EMAIL")
                    .map_err(|_| "DEALFLOW_EMAIL must be set when no session is cached")?,
                password: env::var("DEALFLOW_PASSWORD")
                    .map_err(|_| "DEALFLOW_PASSWORD must be set when no session is cached")?,
            };
            let auth = login(&http, &base_url, &credentials).await?;
            let session = SessionContext::from(auth);
            persist_session(&session_path, &session).await.map_err(|err| err.message)?;
            info!("logged in as {}", session.user.email);
            session
        }
    };

    let state = AppState::new(ApiClient::new(http, base_url, session));
    let app = dealflow::router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("dashboard listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
