use std::time::Duration;
use stockfeed_core::market::error::UpstreamError;
use stockfeed_core::market::port::HttpFetcher;
use stockfeed_feed::http::ReqwestFetcher;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 启动一个只应答一次的本地 HTTP 服务，返回其地址
async fn serve_once(status_line: &'static str, body: &'static str) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            socket.read(&mut buf).await.ok();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.ok();
            socket.shutdown().await.ok();
        }
    });

    Ok(format!("http://{addr}/query?function=SYMBOL_SEARCH"))
}

#[tokio::test]
async fn test_success_returns_whole_body() -> anyhow::Result<()> {
    let url = serve_once("200 OK", r#"{"bestMatches":[]}"#).await?;
    let fetcher = ReqwestFetcher::new(Duration::from_secs(5))?;

    let body = fetcher.get(&url).await?;
    assert_eq!(body, br#"{"bestMatches":[]}"#.to_vec());
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() -> anyhow::Result<()> {
    let url = serve_once("503 Service Unavailable", "").await?;
    let fetcher = ReqwestFetcher::new(Duration::from_secs(5))?;

    let err = fetcher.get(&url).await.unwrap_err();
    match err {
        UpstreamError::Transport(msg) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error_without_url() -> anyhow::Result<()> {
    // 绑定后立即释放，得到一个大概率无人监听的端口
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let fetcher = ReqwestFetcher::new(Duration::from_secs(5))?;
    let url = format!("http://{addr}/query?apikey=SECRETKEY");
    let err = fetcher.get(&url).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)));
    assert!(!err.to_string().contains("SECRETKEY"));
    Ok(())
}
