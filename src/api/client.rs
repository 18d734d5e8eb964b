use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::api::models::{Contact, ParticipantDraft};

const PARTICIPANTS_PATH: &str = "participants";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL {url}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("invalid data format received from API")]
    InvalidData,

    #[error("failed to decode records: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// True when the server answered but the payload was not what we expect.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, ApiError::InvalidData | ApiError::Decode(_))
    }
}

/// Thin gateway over the participants REST resource. No retries, no auth.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(),
            base: Self::base_url(base_url)?,
        })
    }

    fn base_url(raw: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(raw).map_err(|source| ApiError::BaseUrl {
            url: raw.to_string(),
            source,
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    fn endpoint(&self) -> Result<Url, ApiError> {
        self.base
            .join(PARTICIPANTS_PATH)
            .map_err(|source| ApiError::BaseUrl {
                url: self.base.to_string(),
                source,
            })
    }

    /// Fetch every record in one request.
    pub async fn participants(&self) -> Result<Vec<Contact>, ApiError> {
        let endpoint = self.endpoint()?;
        log::debug!("GET {endpoint}");
        let resp = self.http.get(endpoint).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        let json: Value = resp.json().await?;
        let records = parse_records(json)?;
        log::info!("fetched {} records", records.len());
        Ok(records)
    }

    /// Create a contact and return the record as persisted by the server.
    pub async fn create_contact(&self, draft: &Contact) -> Result<Contact, ApiError> {
        let endpoint = self.endpoint()?;
        log::debug!("POST {endpoint}");
        let resp = self.http.post(endpoint).json(draft).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json::<Contact>().await?)
    }

    /// Create a participant. The response body is not read.
    pub async fn create_participant(&self, draft: &ParticipantDraft) -> Result<(), ApiError> {
        let endpoint = self.endpoint()?;
        log::debug!("POST {endpoint}");
        let resp = self.http.post(endpoint).json(draft).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}

/// The list endpoint must answer with a JSON array.
pub fn parse_records(json: Value) -> Result<Vec<Contact>, ApiError> {
    if !json.is_array() {
        return Err(ApiError::InvalidData);
    }
    Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::RecordId;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    #[test]
    fn endpoint_joins_base_without_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "http://localhost:3000/participants"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = ApiClient::new("https://example.org/api").unwrap();
        assert_eq!(
            client.endpoint().unwrap().as_str(),
            "https://example.org/api/participants"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::BaseUrl { .. }));
    }

    #[test]
    fn parse_records_accepts_arrays() {
        let records = parse_records(json!([
            {"id": 1, "name": "Ann Lee", "state": "NSW"},
            {"id": "2", "name": "Bo", "state": "QLD", "ndis": "123456789"}
        ]))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].ndis.as_deref(), Some("123456789"));
    }

    #[test]
    fn parse_records_rejects_non_arrays() {
        let err = parse_records(json!({"data": []})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidData));
        assert!(err.is_invalid_data());
    }

    #[test]
    fn parse_records_reports_non_object_elements_as_invalid_data() {
        let err = parse_records(json!([42])).unwrap_err();
        assert!(err.is_invalid_data());
    }

    #[test]
    fn one_loosely_typed_record_does_not_sink_the_list() {
        let records = parse_records(json!([
            {"id": 1, "name": "Ann Lee", "state": "NSW", "phone": 412345678},
            {"id": 2, "name": null, "state": "VIC"},
            {"id": 3, "name": "Cy", "state": "QLD", "ndis": 123456789},
            {"id": 4.5, "name": "Di", "state": "WA"}
        ]))
        .unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].phone.as_deref(), Some("412345678"));
        assert_eq!(records[1].name, "");
        assert_eq!(records[2].ndis.as_deref(), Some("123456789"));
        assert_eq!(records[3].id.as_ref().unwrap().to_string(), "4.5");
    }

    /// Serves one canned HTTP response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(request);
        });
        (base, rx)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn fetch_decodes_array_body() {
        let (base, request) =
            serve_once("200 OK", r#"[{"id":1,"name":"Ann","state":"NSW","phone":412345678}]"#).await;
        let records = ApiClient::new(&base).unwrap().participants().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].phone.as_deref(), Some("412345678"));
        assert!(request.await.unwrap().starts_with("GET /participants HTTP/1.1"));
    }

    #[tokio::test]
    async fn fetch_maps_error_status() {
        let (base, _request) = serve_once("500 Internal Server Error", "{}").await;
        let err = ApiClient::new(&base).unwrap().participants().await.unwrap_err();
        assert!(matches!(err, ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
    }

    #[tokio::test]
    async fn fetch_rejects_object_body() {
        let (base, _request) = serve_once("200 OK", r#"{"data":[]}"#).await;
        let err = ApiClient::new(&base).unwrap().participants().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidData));
    }

    #[tokio::test]
    async fn create_contact_posts_json_and_returns_server_record() {
        let (base, request) =
            serve_once("201 Created", r#"{"id":5,"name":"Jo","state":"NSW","phone":400111222}"#).await;
        let draft: Contact =
            serde_json::from_value(json!({"name": "Jo", "state": "NSW", "role": "lead"})).unwrap();
        let saved = ApiClient::new(&base)
            .unwrap()
            .create_contact(&draft)
            .await
            .unwrap();
        assert_eq!(saved.id, Some(RecordId::Number(5)));
        assert_eq!(saved.phone.as_deref(), Some("400111222"));

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /participants HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"name":"Jo","state":"NSW","role":"lead"}"#));
    }

    #[tokio::test]
    async fn create_participant_ignores_body_but_not_status() {
        let (base, request) = serve_once("201 Created", "not json").await;
        let client = ApiClient::new(&base).unwrap();
        let draft = ParticipantDraft {
            name: "Kim Park".into(),
            ndis: "987654321".into(),
            state: "QLD".into(),
            status: "Active".into(),
        };
        client.create_participant(&draft).await.unwrap();
        assert!(request.await.unwrap().ends_with(
            r#"{"name":"Kim Park","ndis":"987654321","state":"QLD","status":"Active"}"#
        ));

        let (base, _request) = serve_once("400 Bad Request", "{}").await;
        let err = ApiClient::new(&base)
            .unwrap()
            .create_participant(&draft)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status(StatusCode::BAD_REQUEST)));
    }
}
