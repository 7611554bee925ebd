mod args;
mod config;
mod dirs;

use std::fs;
use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use billing_app::AppState;
use http_api::HttpState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let config = config::load_or_create().map_err(io::Error::other)?;
    if config.created {
        println!(
            "Created config at {} (default port {}).",
            config.paths.file.display(),
            config.config.port
        );
    }

    let data_dir = dirs::resolve_data_dir().map_err(io::Error::other)?;
    if data_dir.matched_existing {
        println!("Using existing data dir: {}", data_dir.dir.display());
    } else {
        println!("Using data dir: {}", data_dir.dir.display());
    }
    fs::create_dir_all(&data_dir.dir)?;

    let port = args.port.unwrap_or(config.config.port);

    let app_state = AppState::new(dirs::db_path(&data_dir.dir));
    let is_fresh_db = app_state.is_fresh_db();
    if let Err(err) = app_state.setup_db() {
        return Err(io::Error::other(format!("failed to initialize database: {}", err)).into());
    }
    if is_fresh_db {
        println!(
            "Initialized new database at {}",
            app_state.config.db_path.display()
        );
    }

    let context = AppContext {
        app_state,
        app_data_dir: data_dir.dir,
    };

    let state = HttpState::new(context);
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    let url = format!("http://127.0.0.1:{actual_port}");

    if used_fallback {
        eprintln!("Configured port {port} was unavailable; using {actual_port} for this run.");
    }

    println!("Water billing service is running at {url}");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
