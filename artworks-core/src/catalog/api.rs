use super::{PageSource, client::ArticClient, models::*};
use crate::error::CatalogError;
use log::info;

impl ArticClient {
    pub async fn get_artworks_page(&self, page: usize) -> Result<ArtworkPage, CatalogError> {
        if page == 0 {
            return Err(CatalogError::InvalidPage(page));
        }

        let url = self.config().artworks_url();
        let query = [
            ("page", page.to_string()),
            ("limit", self.config().page_size.to_string()),
            ("fields", ARTWORK_FIELDS.to_string()),
        ];
        let response = self.call(&url, &query).await?;

        // Read the body first so a malformed payload surfaces as a decode error,
        // not as a transport error
        let body = response.text().await?;
        match serde_json::from_str::<ArtworksAnswer>(&body) {
            Ok(answer) => Ok(ArtworkPage::from_answer(page, answer)),
            Err(e) => {
                info!("Error deserializing artworks page {}: {}", page, e);
                Err(CatalogError::Decode(e))
            }
        }
    }
}

impl PageSource for ArticClient {
    async fn fetch_page(&self, page: usize) -> Result<ArtworkPage, CatalogError> {
        self.get_artworks_page(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::error::ErrorKind;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Answer exactly one HTTP request; the request head is sent back through the channel.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), rx)
    }

    fn local_client(base_url: String) -> ArticClient {
        let config = CatalogConfig {
            cooldown: Duration::ZERO,
            ..CatalogConfig::default().with_base_url(base_url)
        };
        ArticClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let body = include_str!("../../test_data/artworks_page_1.json");
        let (base_url, request_rx) = serve_once("200 OK", body).await;
        let client = local_client(base_url);

        let page = client.fetch_page(2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_count, 129884);
        assert_eq!(page.records.len(), 3);

        let request = request_rx.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /artworks?page=2&limit=12&fields="));
        assert!(request.to_lowercase().contains("user-agent: artworks-core/0.1"));

        let history = client.call_history();
        assert_eq!(history.len(), 1);
        assert!(history[0].success);
        assert_eq!(history[0].status_code, 200);
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let (base_url, _request_rx) =
            serve_once("503 Service Unavailable", r#"{"status":503}"#).await;
        let client = local_client(base_url);

        let err = client.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(!client.call_history()[0].success);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, _request_rx) = serve_once("200 OK", r#"{"data": "nope"}"#).await;
        let client = local_client(base_url);

        let err = client.fetch_page(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{}", addr));
        let err = client.fetch_page(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
        assert_eq!(client.call_history()[0].status_code, 0);
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_without_request() {
        let client = local_client("http://127.0.0.1:9".to_string());
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPage(0)));
        assert!(client.call_history().is_empty());
    }
}
