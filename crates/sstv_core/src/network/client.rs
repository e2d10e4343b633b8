//! Blocking HTTP client for the SatNOGS network API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info};

use crate::config::ApiSettings;
use crate::models::{Observation, ObservationQuery};

use super::errors::{DownloadError, DownloadResult, NetworkError, NetworkResult};
use super::ObservationApi;

/// `ObservationApi` backed by `reqwest::blocking`.
///
/// One GET per call, no retries. Without `timeout_secs` the transport's
/// default timeout applies.
pub struct SatnogsClient {
    http: Client,
    base_url: String,
}

impl SatnogsClient {
    /// Create a client for the endpoint in `settings`.
    pub fn new(settings: &ApiSettings) -> NetworkResult<Self> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(NetworkError::Client)?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
        })
    }

    /// Observations endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `query`.
    pub fn observations_url(&self, query: &ObservationQuery) -> NetworkResult<Url> {
        Url::parse_with_params(&self.base_url, query.to_query_pairs()).map_err(|e| {
            NetworkError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: e.to_string(),
            }
        })
    }
}

impl ObservationApi for SatnogsClient {
    fn fetch_observations(&self, query: &ObservationQuery) -> NetworkResult<Vec<Observation>> {
        let url = self.observations_url(query)?;
        info!(%url, "Fetching observations");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| NetworkError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| NetworkError::Transport {
            url: url.to_string(),
            source,
        })?;

        let observations = parse_observations(&body).map_err(|source| {
            NetworkError::InvalidResponse {
                url: url.to_string(),
                source,
            }
        })?;

        debug!(count = observations.len(), "Parsed observations");
        Ok(observations)
    }

    fn fetch_payload(&self, url: &str) -> DownloadResult<Vec<u8>> {
        debug!(url, "Downloading payload");

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| DownloadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|source| DownloadError::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}

/// Parse an observations response body, preserving API order.
pub fn parse_observations(body: &[u8]) -> Result<Vec<Observation>, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuerySettings;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer exactly one HTTP request on a loopback port.
    ///
    /// Returns the server's base address and a handle yielding the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(&stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut header = String::new();
            loop {
                header.clear();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            (&stream).write_all(response.as_bytes()).unwrap();
            request_line.trim_end().to_string()
        });

        (format!("http://{}", addr), handle)
    }

    /// Client for a loopback server, bypassing any proxy from the environment.
    fn local_client(base: &str) -> SatnogsClient {
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        SatnogsClient {
            http,
            base_url: format!("{}/api/observations/", base),
        }
    }

    /// Address of a port nothing listens on.
    fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn scenario_query() -> ObservationQuery {
        let settings = QuerySettings {
            start: Some("2024-10-01".to_string()),
            end: Some("2024-10-17".to_string()),
            ..QuerySettings::default()
        };
        ObservationQuery::from_settings(&settings).unwrap()
    }

    #[test]
    fn builds_url_with_query_params() {
        let client = SatnogsClient::new(&ApiSettings::default()).unwrap();
        let url = client.observations_url(&scenario_query()).unwrap();

        assert_eq!(url.host_str(), Some("network.satnogs.org"));
        assert_eq!(url.path(), "/api/observations/");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("norad_cat_id"), Some("25544"));
        assert_eq!(get("ground_station"), Some("2433"));
        assert_eq!(get("status"), Some("good"));
        assert_eq!(get("transmitter_mode"), Some("SSTV"));
        assert_eq!(get("limit"), Some("10"));
        assert_eq!(get("start"), Some("2024-10-01"));
        assert_eq!(get("end"), Some("2024-10-17"));
    }

    #[test]
    fn custom_base_url_is_used() {
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:8080/api/observations/".to_string(),
            timeout_secs: Some(5),
            ..ApiSettings::default()
        };
        let client = SatnogsClient::new(&settings).unwrap();
        let url = client.observations_url(&scenario_query()).unwrap();

        assert_eq!(url.port(), Some(8080));
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/api/observations/");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let settings = ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        };
        let client = SatnogsClient::new(&settings).unwrap();

        assert!(matches!(
            client.observations_url(&scenario_query()),
            Err(NetworkError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn parses_empty_array() {
        assert!(parse_observations(b"[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_body() {
        assert!(parse_observations(br#"{"detail": "Throttled"}"#).is_err());
    }

    #[test]
    fn fetch_empty_list_sends_query() {
        let (base, server) = serve_once("200 OK", "[]");
        let client = local_client(&base);

        let observations = client.fetch_observations(&scenario_query()).unwrap();
        let request_line = server.join().unwrap();

        assert!(observations.is_empty());
        assert!(request_line.starts_with("GET /api/observations/?"));
        assert!(request_line.contains("norad_cat_id=25544"));
        assert!(request_line.contains("start=2024-10-01"));
    }

    #[test]
    fn fetch_parses_observations() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id": 42, "demoddata": [{"payload_demod": "https://db.satnogs.org/media/a.png"}]}]"#,
        );
        let client = local_client(&base);

        let observations = client.fetch_observations(&scenario_query()).unwrap();
        server.join().unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].id, 42);
        assert_eq!(observations[0].demoddata.len(), 1);
    }

    #[test]
    fn fetch_not_found_is_status_error() {
        let (base, server) = serve_once("404 Not Found", r#"{"detail": "Not found."}"#);
        let client = local_client(&base);

        let err = client.fetch_observations(&scenario_query()).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, NetworkError::Status { status: 404, .. }));
        assert!(err.to_string().contains("Status code: 404"));
    }

    #[test]
    fn fetch_object_body_is_invalid_response() {
        let (base, server) = serve_once("200 OK", r#"{"detail": "Throttled"}"#);
        let client = local_client(&base);

        let err = client.fetch_observations(&scenario_query()).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
    }

    #[test]
    fn fetch_refused_connection_is_transport_error() {
        let client = local_client(&closed_port());

        let err = client.fetch_observations(&scenario_query()).unwrap_err();

        assert!(matches!(err, NetworkError::Transport { .. }));
    }

    #[test]
    fn payload_bytes_are_returned() {
        let (base, server) = serve_once("200 OK", "not really a png");
        let client = local_client(&base);

        let bytes = client
            .fetch_payload(&format!("{}/media/data_1.png", base))
            .unwrap();
        let request_line = server.join().unwrap();

        assert_eq!(bytes, b"not really a png");
        assert!(request_line.starts_with("GET /media/data_1.png"));
    }

    #[test]
    fn payload_not_found_is_status_error() {
        let (base, server) = serve_once("404 Not Found", "");
        let client = local_client(&base);

        let err = client
            .fetch_payload(&format!("{}/media/gone.png", base))
            .unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, DownloadError::Status { status: 404, .. }));
    }

    #[test]
    fn payload_refused_connection_is_transport_error() {
        let base = closed_port();
        let client = local_client(&base);

        let err = client
            .fetch_payload(&format!("{}/media/a.png", base))
            .unwrap_err();

        assert!(matches!(err, DownloadError::Transport { .. }));
    }
}
