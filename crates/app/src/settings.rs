use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use stockfeed_core::config::AppConfig;

/// 环境变量前缀，如 `STOCKFEED__ALPHA_VANTAGE__API_KEY`
const ENV_PREFIX: &str = "STOCKFEED";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为底层默认值。
/// 2. 叠加可选的 `{dir}/default.toml` 与 `{dir}/local.toml`。
/// 3. 叠加 `STOCKFEED__SECTION__KEY` 形式的环境变量。
///
/// # Arguments
/// * `dir` - 配置文件目录，文件缺失不报错。
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::from(dir.join("default.toml")).required(false))
        .add_source(File::from(dir.join("local.toml")).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.alpha_vantage.window_days, 100);
        assert_eq!(config.database.data_dir, "data");
    }

    #[test]
    fn test_local_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9000\n\n[alpha_vantage]\nwindow_days = 30\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("local.toml"), "[server]\nport = 9100\n").unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.alpha_vantage.window_days, 30);
        assert_eq!(config.alpha_vantage.timeout_secs, 10);
    }
}
