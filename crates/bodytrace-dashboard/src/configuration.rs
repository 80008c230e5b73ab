use std::{
    convert::{TryFrom, TryInto},
    path::PathBuf,
};

use bodytrace_shared::const_config::client::{
    CLIENT_DEFAULT_PAGE_SIZE, CLIENT_DEFAULT_SERVER_ADDRESS,
};
use serde_aux::field_attributes::deserialize_number_from_string;

const DEFAULT_SESSION_FILE: &str = "session.json";
const DEFAULT_EXPORT_FOLDER: &str = "exports";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub client: ClientSettings,
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_address: String,
    /// Where the logged in session is kept between runs
    pub session_file: PathBuf,
    /// Downloaded CSV and result spreadsheets are written here
    pub export_folder: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_page_size: u32,
}

/// Configuration files are optional for the client, every setting has a
/// default
pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir()?;
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    get_configuration_from(base_path.join("configuration"), environment)
}

fn get_configuration_from(
    configuration_directory: PathBuf,
    environment: Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("client.server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .set_default("client.session_file", DEFAULT_SESSION_FILE)?
        .set_default("client.export_folder", DEFAULT_EXPORT_FOLDER)?
        .set_default("client.default_page_size", i64::from(CLIENT_DEFAULT_PAGE_SIZE))?
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_CLIENT__SERVER_ADDRESS=https://example.com` would set `client.server_address`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Configuration>()?)
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
