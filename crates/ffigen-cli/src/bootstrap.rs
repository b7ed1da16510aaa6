use anyhow::Context;
use ffigen_config::FfigenConfig;

/// Load `.env` from the working directory (or a parent) and the layered
/// configuration.
pub fn load_config() -> anyhow::Result<FfigenConfig> {
    FfigenConfig::load_with_dotenv().context("failed to load ffigen configuration")
}
