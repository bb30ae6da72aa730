use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub address: String,
}

/// Where the registration, shadow and connectivity records live.
/// All three share one Redis deployment and are separated by key prefix.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_address")]
    pub address: String,
    #[serde(default = "default_registration_prefix")]
    pub registration_prefix: String,
    #[serde(default = "default_shadow_prefix")]
    pub shadow_prefix: String,
    #[serde(default = "default_connectivity_prefix")]
    pub connectivity_prefix: String,
}

/// The upstream gateway authenticates callers and forwards the subject
/// in `header`.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_header")]
    pub header: String,
}

fn default_store_address() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_registration_prefix() -> String {
    "registration".to_string()
}

fn default_shadow_prefix() -> String {
    "shadow".to_string()
}

fn default_connectivity_prefix() -> String {
    "connectivity".to_string()
}

fn default_identity_header() -> String {
    "x-identity-subject".to_string()
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("DEVICE_STATUS").separator("__"))
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.http.address.is_empty() {
            anyhow::bail!("http.address must not be empty");
        }
        if self.store.address.is_empty() {
            anyhow::bail!("store.address must not be empty");
        }
        for (name, prefix) in [
            ("store.registration_prefix", &self.store.registration_prefix),
            ("store.shadow_prefix", &self.store.shadow_prefix),
            ("store.connectivity_prefix", &self.store.connectivity_prefix),
        ] {
            if prefix.is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }
        if self.identity.header.is_empty() {
            anyhow::bail!("identity.header must not be empty");
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: default_store_address(),
            registration_prefix: default_registration_prefix(),
            shadow_prefix: default_shadow_prefix(),
            connectivity_prefix: default_connectivity_prefix(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            header: default_identity_header(),
        }
    }
}
