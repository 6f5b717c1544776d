use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub alpha_vantage: AlphaVantageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub data_dir: String,
}

/// Alpha Vantage 接入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphaVantageConfig {
    // 调用凭证，同时用于错误信息脱敏
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    // 保留的尾部日历天数
    pub window_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub dir: String,
    pub level: String,
}

impl AppConfig {
    /// 服务监听地址，如 `0.0.0.0:8080`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                data_dir: "data".to_string(),
            },
            alpha_vantage: AlphaVantageConfig {
                api_key: String::new(), // 必须由环境变量或配置文件提供
                base_url: "https://www.alphavantage.co".to_string(),
                timeout_secs: 10,
                window_days: 100,
            },
            log: LogConfig {
                dir: "logs".to_string(),
                level: "info".to_string(),
            },
        }
    }
}
