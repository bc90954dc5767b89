use envconfig::Envconfig;
use lazy_static::lazy_static;

#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    /// Default tracing level used when `RUST_LOG` is not set.
    #[envconfig(from = "FLATGROUP_LOG_LEVEL", default = "info")]
    pub log_level: String,
    /// Number of values to reserve up front in a new store.
    #[envconfig(from = "FLATGROUP_VALUES_CAPACITY", default = "0")]
    pub values_capacity: usize,
    /// Number of groups to reserve up front in a new store.
    #[envconfig(from = "FLATGROUP_GROUPS_CAPACITY", default = "0")]
    pub groups_capacity: usize,
}

impl Config {
    pub fn init() -> Config {
        Config::init_from_env().expect("Failed to load config")
    }

    pub fn try_init() -> Result<Config, envconfig::Error> {
        Config::init_from_env()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            values_capacity: 0,
            groups_capacity: 0,
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::init();
}
