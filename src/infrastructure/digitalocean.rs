//! DigitalOcean v2 REST implementation of [`ResourceProvider`]
//!
//! Blocking client: every call holds the process until the API answers.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{Droplet, DropletCreateRequest, Image, ResourceId};
use crate::infrastructure::traits::{ProviderError, ProviderResult, ResourceProvider};

/// Public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/v2";

const PAGE_SIZE: u32 = 200;

/// API client authenticated with a personal access token.
pub struct DigitalOceanClient {
    http: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for DigitalOceanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanClient")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish()
    }
}

impl DigitalOceanClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> ProviderResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("docli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> ProviderResult<Response> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response");
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        debug!(%url, "GET");
        let response = self.send(self.http.get(url))?;
        response
            .json::<T>()
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    /// Follow `links.pages.next` until the last page.
    fn collect_pages<P>(&self, first: String) -> ProviderResult<Vec<P::Item>>
    where
        P: Paged + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(url) = next {
            let page: P = self.get_json(&url)?;
            let (mut batch, following) = page.into_parts();
            items.append(&mut batch);
            next = following;
        }
        Ok(items)
    }

    fn post_action(&self, id: ResourceId, action_type: &str) -> ProviderResult<()> {
        let url = self.url(&format!("droplets/{id}/actions"));
        debug!(%url, action_type, "POST");
        self.send(self.http.post(&url).json(&ActionBody { kind: action_type }))?;
        Ok(())
    }

    fn delete(&self, path: &str) -> ProviderResult<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        self.send(self.http.delete(&url))?;
        Ok(())
    }
}

impl ResourceProvider for DigitalOceanClient {
    #[instrument(level = "debug", skip(self))]
    fn list_droplets(&self) -> ProviderResult<Vec<Droplet>> {
        let first = self.url(&format!("droplets?per_page={PAGE_SIZE}"));
        let droplets = self.collect_pages::<DropletPage>(first)?;
        Ok(droplets.into_iter().map(Droplet::from).collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn list_images(&self) -> ProviderResult<Vec<Image>> {
        let first = self.url(&format!("images?private=true&per_page={PAGE_SIZE}"));
        let images = self.collect_pages::<ImagePage>(first)?;
        Ok(images.into_iter().map(Image::from).collect())
    }

    #[instrument(level = "debug", skip(self))]
    fn get_droplet(&self, id: ResourceId) -> ProviderResult<Droplet> {
        let envelope: DropletEnvelope = self.get_json(&self.url(&format!("droplets/{id}")))?;
        Ok(envelope.droplet.into())
    }

    #[instrument(level = "debug", skip(self))]
    fn get_image(&self, id: ResourceId) -> ProviderResult<Image> {
        let envelope: ImageEnvelope = self.get_json(&self.url(&format!("images/{id}")))?;
        Ok(envelope.image.into())
    }

    #[instrument(level = "debug", skip(self), fields(name = %request.name))]
    fn create_droplet(&self, request: &DropletCreateRequest) -> ProviderResult<Droplet> {
        let body = CreateDropletBody {
            name: &request.name,
            region: &request.region,
            size: &request.size,
            image: &request.image,
            ssh_keys: &request.ssh_keys,
        };
        let response = self.send(self.http.post(self.url("droplets")).json(&body))?;
        let envelope: DropletEnvelope = response
            .json()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(envelope.droplet.into())
    }

    fn power_off(&self, id: ResourceId) -> ProviderResult<()> {
        self.post_action(id, "power_off")
    }

    fn power_on(&self, id: ResourceId) -> ProviderResult<()> {
        self.post_action(id, "power_on")
    }

    fn reboot(&self, id: ResourceId) -> ProviderResult<()> {
        self.post_action(id, "reboot")
    }

    fn destroy_droplet(&self, id: ResourceId) -> ProviderResult<()> {
        self.delete(&format!("droplets/{id}"))
    }

    fn destroy_image(&self, id: ResourceId) -> ProviderResult<()> {
        self.delete(&format!("images/{id}"))
    }
}

// ============================================================
// WIRE FORMAT
// ============================================================

trait Paged {
    type Item;
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    pages: Option<Pages>,
}

#[derive(Debug, Default, Deserialize)]
struct Pages {
    #[serde(default)]
    next: Option<String>,
}

impl Links {
    fn next(self) -> Option<String> {
        self.pages.and_then(|p| p.next)
    }
}

#[derive(Debug, Deserialize)]
struct DropletPage {
    droplets: Vec<DropletBody>,
    #[serde(default)]
    links: Links,
}

impl Paged for DropletPage {
    type Item = DropletBody;
    fn into_parts(self) -> (Vec<DropletBody>, Option<String>) {
        (self.droplets, self.links.next())
    }
}

#[derive(Debug, Deserialize)]
struct ImagePage {
    images: Vec<ImageBody>,
    #[serde(default)]
    links: Links,
}

impl Paged for ImagePage {
    type Item = ImageBody;
    fn into_parts(self) -> (Vec<ImageBody>, Option<String>) {
        (self.images, self.links.next())
    }
}

#[derive(Debug, Deserialize)]
struct DropletEnvelope {
    droplet: DropletBody,
}

#[derive(Debug, Deserialize)]
struct ImageEnvelope {
    image: ImageBody,
}

#[derive(Debug, Deserialize)]
struct DropletBody {
    id: ResourceId,
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    networks: Networks,
}

#[derive(Debug, Default, Deserialize)]
struct Networks {
    #[serde(default)]
    v4: Vec<NetworkV4>,
}

#[derive(Debug, Deserialize)]
struct NetworkV4 {
    ip_address: String,
    #[serde(rename = "type")]
    kind: String,
}

impl From<DropletBody> for Droplet {
    fn from(body: DropletBody) -> Self {
        let ip_address = body
            .networks
            .v4
            .into_iter()
            .find(|n| n.kind == "public")
            .map(|n| n.ip_address);
        Droplet {
            id: body.id,
            name: body.name,
            status: body.status,
            ip_address,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageBody {
    id: ResourceId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    size_gigabytes: Option<f64>,
    #[serde(default)]
    regions: Vec<String>,
    #[serde(default)]
    created_at: String,
}

impl From<ImageBody> for Image {
    fn from(body: ImageBody) -> Self {
        Image {
            id: body.id,
            name: body.name,
            size_gigabytes: body.size_gigabytes,
            regions: body.regions,
            created_at: body.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateDropletBody<'a> {
    name: &'a str,
    region: &'a str,
    size: &'a str,
    image: &'a str,
    ssh_keys: &'a [String],
}

#[derive(Debug, Serialize)]
struct ActionBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_droplet_page_when_decoding_then_picks_public_ip_and_next_link() {
        let json = r#"{
            "droplets": [{
                "id": 3164444,
                "name": "example.com",
                "status": "active",
                "size_slug": "s-1vcpu-1gb",
                "networks": {"v4": [
                    {"ip_address": "10.128.192.124", "type": "private"},
                    {"ip_address": "192.241.165.154", "type": "public"}
                ]}
            }],
            "links": {"pages": {"next": "https://api.digitalocean.com/v2/droplets?page=2&per_page=200"}},
            "meta": {"total": 201}
        }"#;

        let page: DropletPage = serde_json::from_str(json).unwrap();
        let (bodies, next) = page.into_parts();
        let droplets: Vec<Droplet> = bodies.into_iter().map(Droplet::from).collect();

        assert_eq!(droplets.len(), 1);
        assert_eq!(droplets[0].id, 3164444);
        assert_eq!(droplets[0].ip_address.as_deref(), Some("192.241.165.154"));
        assert_eq!(
            next.as_deref(),
            Some("https://api.digitalocean.com/v2/droplets?page=2&per_page=200")
        );
    }

    #[test]
    fn given_last_page_when_decoding_then_has_no_next_link() {
        let json = r#"{"droplets": [], "links": {}, "meta": {"total": 0}}"#;
        let page: DropletPage = serde_json::from_str(json).unwrap();
        let (bodies, next) = page.into_parts();
        assert!(bodies.is_empty());
        assert!(next.is_none());
    }

    #[test]
    fn given_new_droplet_without_network_when_decoding_then_ip_is_none() {
        let json = r#"{"droplet": {"id": 1, "name": "web-1", "status": "new", "size_slug": "512mb", "networks": {}}}"#;
        let envelope: DropletEnvelope = serde_json::from_str(json).unwrap();
        let droplet = Droplet::from(envelope.droplet);
        assert_eq!(droplet.status, "new");
        assert!(droplet.ip_address.is_none());
    }

    #[test]
    fn given_image_page_when_decoding_then_maps_fields() {
        let json = r#"{
            "images": [{
                "id": 7555620,
                "name": "nginx-snapshot",
                "distribution": "Ubuntu",
                "regions": ["nyc2", "ams3"],
                "created_at": "2014-11-04T22:23:02Z",
                "size_gigabytes": 2.34
            }]
        }"#;
        let page: ImagePage = serde_json::from_str(json).unwrap();
        let (bodies, next) = page.into_parts();
        let image = Image::from(bodies.into_iter().next().unwrap());

        assert!(next.is_none());
        assert_eq!(image.id, 7555620);
        assert_eq!(image.regions, vec!["nyc2".to_string(), "ams3".to_string()]);
        assert_eq!(image.size_gigabytes, Some(2.34));
        assert_eq!(image.created_at, "2014-11-04T22:23:02Z");
    }

    #[test]
    fn given_create_request_when_serializing_then_sends_fingerprints() {
        let keys = vec!["05:6d:11".to_string()];
        let body = CreateDropletBody {
            name: "web-1",
            region: "ams3",
            size: "512mb",
            image: "ubuntu-16-04-x64",
            ssh_keys: &keys,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["ssh_keys"][0], "05:6d:11");
        assert_eq!(value["size"], "512mb");
    }

    #[test]
    fn given_action_when_serializing_then_uses_type_key() {
        let value = serde_json::to_value(ActionBody { kind: "reboot" }).unwrap();
        assert_eq!(value, serde_json::json!({"type": "reboot"}));
    }

    #[test]
    fn given_trailing_slash_base_url_when_building_urls_then_single_slash() {
        let client = DigitalOceanClient::new("http://localhost:8080/v2/", "t").unwrap();
        assert_eq!(client.url("droplets/1"), "http://localhost:8080/v2/droplets/1");
        assert!(!format!("{client:?}").contains("\"t\""));
    }

    // ------------------------------------------------------------
    // HTTP round trips against a local listener
    // ------------------------------------------------------------

    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// Listener on an ephemeral port plus the API base URL pointing at it.
    fn local_api() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/v2", listener.local_addr().unwrap());
        (listener, base_url)
    }

    /// Answer one connection per canned response; yields the raw requests.
    fn serve(listener: TcpListener, responses: Vec<(u16, String)>) -> JoinHandle<Vec<String>> {
        thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (mut stream, _) = listener.accept().unwrap();
                    let request = read_request(&mut stream);
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).unwrap();
                    request
                })
                .collect()
        })
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= head_end + 4 + content_length {
                    return text;
                }
            }
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                return text;
            }
            data.extend_from_slice(&chunk[..n]);
        }
    }

    fn droplet_json(id: u64, name: &str) -> String {
        format!(r#"{{"id": {id}, "name": "{name}", "status": "active", "networks": {{"v4": []}}}}"#)
    }

    #[test]
    fn given_two_pages_when_listing_droplets_then_follows_next_link() {
        // Arrange
        let (listener, base_url) = local_api();
        let first = format!(
            r#"{{"droplets": [{}], "links": {{"pages": {{"next": "{base_url}/droplets?page=2&per_page=200"}}}}}}"#,
            droplet_json(1, "web-1")
        );
        let second = format!(r#"{{"droplets": [{}], "links": {{}}}}"#, droplet_json(2, "web-2"));
        let server = serve(listener, vec![(200, first), (200, second)]);
        let client = DigitalOceanClient::new(base_url, "secret-token").unwrap();

        // Act
        let droplets = client.list_droplets().unwrap();

        // Assert
        let names: Vec<&str> = droplets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["web-1", "web-2"]);
        let requests = server.join().unwrap();
        assert!(requests[0].starts_with("GET /v2/droplets?per_page=200 "), "{}", requests[0]);
        assert!(
            requests[1].starts_with("GET /v2/droplets?page=2&per_page=200 "),
            "{}",
            requests[1]
        );
        assert!(requests[0]
            .to_lowercase()
            .contains("authorization: bearer secret-token"));
    }

    #[test]
    fn given_private_images_when_listing_then_requests_private_only() {
        // Arrange
        let (listener, base_url) = local_api();
        let server = serve(listener, vec![(200, r#"{"images": []}"#.to_string())]);
        let client = DigitalOceanClient::new(base_url, "t").unwrap();

        // Act
        let images = client.list_images().unwrap();

        // Assert
        assert!(images.is_empty());
        let requests = server.join().unwrap();
        assert!(requests[0].starts_with("GET /v2/images?private=true&per_page=200 "));
    }

    #[test]
    fn given_not_found_with_message_when_fetching_then_api_error_carries_it() {
        // Arrange
        let (listener, base_url) = local_api();
        let body = r#"{"id": "not_found", "message": "The resource you were accessing could not be found."}"#;
        let server = serve(listener, vec![(404, body.to_string())]);
        let client = DigitalOceanClient::new(base_url, "t").unwrap();

        // Act
        let result = client.get_droplet(999);

        // Assert
        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "The resource you were accessing could not be found.");
            }
            other => panic!("expected api error, got {other:?}"),
        }
        assert!(server.join().unwrap()[0].starts_with("GET /v2/droplets/999 "));
    }

    #[test]
    fn given_error_without_json_body_when_calling_then_uses_status_reason() {
        // Arrange
        let (listener, base_url) = local_api();
        let server = serve(listener, vec![(500, "oops".to_string())]);
        let client = DigitalOceanClient::new(base_url, "t").unwrap();

        // Act
        let result = client.destroy_image(9);

        // Assert
        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected api error, got {other:?}"),
        }
        assert!(server.join().unwrap()[0].starts_with("DELETE /v2/images/9 "));
    }

    #[test]
    fn given_action_when_posting_then_sends_type_body() {
        // Arrange
        let (listener, base_url) = local_api();
        let server = serve(listener, vec![(201, r#"{"action": {"id": 1}}"#.to_string())]);
        let client = DigitalOceanClient::new(base_url, "t").unwrap();

        // Act
        client.reboot(7).unwrap();

        // Assert
        let request = &server.join().unwrap()[0];
        assert!(request.starts_with("POST /v2/droplets/7/actions "), "{request}");
        assert!(request.ends_with(r#"{"type":"reboot"}"#), "{request}");
    }
}
