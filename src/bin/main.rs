use financial_dashboard_client::{
    BackendGateway, ChatSession, DashboardLoader, GatewayConfig, LoadOutcome,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Financial dashboard client starting");

    let config = GatewayConfig::from_env();
    info!(base_url = %config.base_url, "Using backend");
    let gateway = BackendGateway::new(config)?;

    let mut session = ChatSession::new();
    let user_id = session.user_id().to_string();

    // Load the dashboard
    match DashboardLoader::load(&gateway, &user_id).await {
        LoadOutcome::Loaded(summary) => {
            println!("\n=== FINANCIAL SUMMARY ===");
            println!(
                "Net worth:   {}",
                summary
                    .net_worth
                    .total_net_worth_value
                    .clone()
                    .unwrap_or_default()
            );
            println!("Assets:      {:.2}", summary.net_worth.total_assets());
            println!("Liabilities: {:.2}", summary.net_worth.total_liabilities());

            println!("\nBreakdown:");
            for (label, amount) in summary.net_worth.grouped() {
                println!("  {:<20} {:.2}", label, amount);
            }

            if let Some(score) = summary.credit_score() {
                println!("\nCredit score: {}", score);
            }

            let mf_rows = summary.mf_rows();
            if !mf_rows.is_empty() {
                println!("Mutual fund holdings: {}", mf_rows.len());
            }
        }
        LoadOutcome::RedirectToLogin(mut redirect) => {
            println!("Sign-in required before your data can be shown.");
            if let Some(url) = redirect.take_url() {
                println!("Complete login at: {}", url);
            }
            return Ok(());
        }
        LoadOutcome::Failed(e) => {
            eprintln!("Dashboard load failed: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    }

    // One chat turn against the same session
    let question = "How's my net worth looking this month?";
    println!("\n=== CHAT ===");
    println!("you> {}", question);
    let reply = session.send(&gateway, question).await;
    println!("{}> {}", reply.sender, reply.text);

    Ok(())
}
