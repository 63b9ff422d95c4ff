use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use std::path::PathBuf;

use api::{
    bootstrap,
    jwt::{JwtConfig, JwtService},
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::{AdminRepository, OrderRepository, ProductRepository, UserRepository},
    routes,
    state::AppState,
};

/// Server configuration
#[derive(Debug, Clone)]
struct ServerConfig {
    /// Port to listen on
    port: u16,
    /// Directory for uploaded images
    uploads_dir: PathBuf,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: listen port (default: 5000)
    /// - `UPLOADS_DIR`: directory for uploaded images (default: "uploads")
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let uploads_dir = std::env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self { port, uploads_dir }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Thekua storefront backend");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config);

    let server_config = ServerConfig::from_env();
    tokio::fs::create_dir_all(&server_config.uploads_dir).await?;

    let admin_repository = AdminRepository::new(pool.clone());

    // Explicit admin provisioning, guarded by ADMIN_BOOTSTRAP
    let bootstrap_config = bootstrap::BootstrapConfig::from_env()?;
    if bootstrap::ensure_admin(&admin_repository, &bootstrap_config).await? {
        info!("Admin account provisioned");
    }

    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        admin_repository,
        product_repository: ProductRepository::new(pool.clone()),
        order_repository: OrderRepository::new(pool),
        rate_limiter: RateLimiter::new(RateLimiterConfig::default()),
        uploads_dir: server_config.uploads_dir.clone(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Thekua backend listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
