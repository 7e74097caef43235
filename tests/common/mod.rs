//! In-memory fakes for the provider, credentials and reporter
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use docli::application::Reporter;
use docli::domain::{Droplet, DropletCreateRequest, Image, ResourceId};
use docli::infrastructure::di::ServiceContainer;
use docli::infrastructure::traits::{
    CredentialSource, ProviderError, ProviderResult, RealFileSystem, ResourceProvider,
};
use docli::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

pub const ED25519_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8g user@host\n";
pub const ED25519_MD5: &str = "05:6d:11:6f:aa:82:7f:17:e4:a2:92:09:ca:cf:9d:42";

pub fn droplet(id: ResourceId, name: &str) -> Droplet {
    Droplet {
        id,
        name: name.to_string(),
        status: "active".to_string(),
        ip_address: Some(format!("203.0.113.{}", id % 250)),
    }
}

pub fn image(id: ResourceId, name: &str) -> Image {
    Image {
        id,
        name: name.to_string(),
        size_gigabytes: Some(1.5),
        regions: vec!["ams3".to_string()],
        created_at: "2017-03-01T10:00:00Z".to_string(),
    }
}

fn not_found() -> ProviderError {
    ProviderError::Api {
        status: 404,
        message: "The resource you were accessing could not be found.".to_string(),
    }
}

/// Provider backed by fixed lists that records every call.
#[derive(Default)]
pub struct FakeProvider {
    droplets: Vec<Droplet>,
    images: Vec<Image>,
    failing_ids: HashSet<ResourceId>,
    failing_creates: HashSet<usize>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<DropletCreateRequest>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_droplets(mut self, droplets: Vec<Droplet>) -> Self {
        self.droplets = droplets;
        self
    }

    pub fn with_images(mut self, images: Vec<Image>) -> Self {
        self.images = images;
        self
    }

    /// Remote actions on `id` fail with a server error.
    pub fn failing_on(mut self, id: ResourceId) -> Self {
        self.failing_ids.insert(id);
        self
    }

    /// The n-th create call (0-based) fails.
    pub fn failing_create(mut self, index: usize) -> Self {
        self.failing_creates.insert(index);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn created(&self) -> Vec<DropletCreateRequest> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn act(&self, call: &str, id: ResourceId) -> ProviderResult<()> {
        self.record(format!("{call} {id}"));
        if self.failing_ids.contains(&id) {
            return Err(ProviderError::Api {
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        Ok(())
    }
}

impl ResourceProvider for FakeProvider {
    fn list_droplets(&self) -> ProviderResult<Vec<Droplet>> {
        self.record("list_droplets".to_string());
        Ok(self.droplets.clone())
    }

    fn list_images(&self) -> ProviderResult<Vec<Image>> {
        self.record("list_images".to_string());
        Ok(self.images.clone())
    }

    fn get_droplet(&self, id: ResourceId) -> ProviderResult<Droplet> {
        self.record(format!("get_droplet {id}"));
        self.droplets
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn get_image(&self, id: ResourceId) -> ProviderResult<Image> {
        self.record(format!("get_image {id}"));
        self.images
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    fn create_droplet(&self, request: &DropletCreateRequest) -> ProviderResult<Droplet> {
        let index = {
            let mut created = self.created.lock().unwrap();
            created.push(request.clone());
            created.len() - 1
        };
        self.record(format!("create_droplet {}", request.name));
        if self.failing_creates.contains(&index) {
            return Err(ProviderError::Api {
                status: 422,
                message: "You specified an invalid size for Droplet creation.".to_string(),
            });
        }
        Ok(Droplet {
            id: 1000 + index as ResourceId,
            name: request.name.clone(),
            status: "new".to_string(),
            ip_address: None,
        })
    }

    fn power_off(&self, id: ResourceId) -> ProviderResult<()> {
        self.act("power_off", id)
    }

    fn power_on(&self, id: ResourceId) -> ProviderResult<()> {
        self.act("power_on", id)
    }

    fn reboot(&self, id: ResourceId) -> ProviderResult<()> {
        self.act("reboot", id)
    }

    fn destroy_droplet(&self, id: ResourceId) -> ProviderResult<()> {
        self.act("destroy_droplet", id)
    }

    fn destroy_image(&self, id: ResourceId) -> ProviderResult<()> {
        self.act("destroy_image", id)
    }
}

/// One reported line, tagged by channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Listing(String),
    Progress(String),
    Succeeded(String),
    Failed(String),
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<Line>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Failed(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Progress(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, line: Line) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn listing(&self, table: &str) {
        self.push(Line::Listing(table.to_string()));
    }

    fn progress(&self, message: &str) {
        self.push(Line::Progress(message.to_string()));
    }

    fn succeeded(&self, message: &str) {
        self.push(Line::Succeeded(message.to_string()));
    }

    fn failed(&self, message: &str) {
        self.push(Line::Failed(message.to_string()));
    }
}

/// Credentials from a fixed map.
#[derive(Default)]
pub struct FakeCredentials(pub HashMap<String, String>);

impl FakeCredentials {
    pub fn with(name: &str, value: &str) -> Self {
        Self(HashMap::from([(name.to_string(), value.to_string())]))
    }
}

impl CredentialSource for FakeCredentials {
    fn lookup(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

pub fn container(provider: Arc<FakeProvider>) -> ServiceContainer {
    ServiceContainer::with_deps(provider, Arc::new(RealFileSystem))
}

/// Write `content` as a key file inside `dir`.
pub fn key_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("id_test.pub");
    std::fs::write(&path, content).expect("write key file");
    path
}
