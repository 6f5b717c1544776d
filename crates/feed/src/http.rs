use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use stockfeed_core::market::error::UpstreamError;
use stockfeed_core::market::port::HttpFetcher;

/// # Summary
/// 基于 `reqwest` 异步客户端的 HTTP 抓取实现。
///
/// # Invariants
/// - 错误文本中剥离请求 URL，避免 API Key 随错误信息外泄。
#[derive(Clone)]
pub struct ReqwestFetcher {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl ReqwestFetcher {
    /// # Summary
    /// 创建一个新的 ReqwestFetcher 实例。
    ///
    /// # Logic
    /// 1. 安装 rustls 的 ring 加密后端 (进程内只生效一次)。
    /// 2. 配置超时与 User-Agent。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `timeout`: 单次请求的总超时。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `UpstreamError::Transport`。
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        install_crypto_provider();

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockfeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

fn install_crypto_provider() {
    // 重复安装会返回 Err，说明已有可用后端
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::trace!("rustls crypto provider already installed");
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    /// # Summary
    /// 发起 GET 请求并读取完整响应体。
    ///
    /// # Logic
    /// 1. 发送请求，连接失败映射为 Transport。
    /// 2. 非 2xx 状态同样视为 Transport。
    /// 3. 读取响应体，失败映射为 BodyRead。
    async fn get(&self, url: &str) -> Result<Vec<u8>, UpstreamError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(UpstreamError::Transport(format!("HTTP {}", resp.status())));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::BodyRead(e.without_url().to_string()))?;

        Ok(body.to_vec())
    }
}
