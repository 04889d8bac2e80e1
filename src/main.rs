use application::AdminApp;
use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Digilex Admin Console");
    println!("Learning-support administration with:");
    println!("  ✅ User directory with live snapshots");
    println!("  ✅ Dual-write account provisioning with rollback");
    println!("  ✅ Field-level validation");
    println!("  ✅ Learning content management");
    println!();

    // Load configuration from environment variables
    let config = Config::from_env()?;
    println!("📇 Directory backend: {:?}", config.backend);
    println!("📚 Collection: {}", config.directory.collection_name);
    println!();

    let app = AdminApp::from_config(&config);

    let users = app.users.list_users().await?;
    println!("🎯 Admin console initialized! {} users in the directory", users.len());
    println!("🌐 API Server is available separately at: http://{}", config.server.bind_address());

    // Keep the application running
    println!("\n⏳ Service running... (Press Ctrl+C to stop)");
    tokio::signal::ctrl_c().await?;
    println!("\n👋 Shutting down Digilex admin console");

    Ok(())
}
