use address_validator::{Address, AddressValidatorManager, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validates one address given on the command line.
///
/// ```text
/// address-validator "1 Apple Park Way, Cupertino, CA, 95014"
/// ```
///
/// The driver and its credentials come from the environment (or `.env`), see
/// [`Config::from_env`]. Prints the result summary followed by the candidates as JSON,
/// and exits with status 1 when the result is an error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "address_validator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if line.trim().is_empty() {
        anyhow::bail!("usage: address-validator \"street, city, state, zip\"");
    }

    let config = Config::from_env()?;
    let manager = AddressValidatorManager::from_config(&config);

    let address = Address::parse(&line);
    let result = manager.validate(&address).await?;

    println!("{}", result);
    println!("{}", serde_json::to_string_pretty(result.addresses())?);

    if result.is_error() {
        std::process::exit(1);
    }

    Ok(())
}
