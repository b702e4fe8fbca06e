/// 个人主页客户端
///
/// 封装对公开个人主页的 HTTP 抓取，每行只请求一次，不做重试
use crate::config::Config;
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 抓取个人主页原始 HTML 的能力
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// 基于 reqwest 的个人主页客户端
pub struct ProfileClient {
    http: reqwest::Client,
}

impl ProfileClient {
    /// 创建新的客户端（固定超时和 User-Agent）
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| FetchError::ClientBuildFailed { source })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ProfileFetcher for ProfileClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("正在请求: {}", url);

        let response = self.http.get(url).send().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::RequestFailed {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::BodyReadFailed {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        debug!("响应长度: {} 字节", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        assert!(ProfileClient::new(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn malformed_url_is_a_request_failure() {
        let client = ProfileClient::new(&Config::default()).unwrap();
        let err = client.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed { .. }));
        assert_eq!(err.url(), Some("not a url"));
    }

    #[tokio::test]
    #[ignore] // 需要网络：cargo test -- --ignored
    async fn fetches_public_page() {
        let client = ProfileClient::new(&Config::default()).unwrap();
        let body = client.fetch("https://www.example.com/").await.unwrap();
        assert!(body.contains("Example Domain"));
    }
}
