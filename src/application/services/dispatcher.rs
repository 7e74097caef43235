//! Command dispatch
//!
//! Maps each [`Invocation`] variant to its handler. Resolution is
//! all-or-nothing: an unknown name aborts before anything is mutated.
//! Execution is best-effort: a failing target is reported and the remaining
//! targets are still attempted, then the command fails as a whole.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::IdentifierResolver;
use crate::application::{
    render, ApplicationError, ApplicationResult, IoResultExt, ProviderResultExt, Reporter,
};
use crate::domain::{
    droplet_name, expand_env_vars, random_slug, CreateParams, DropletAction, DropletCreateRequest,
    Invocation, PublicKey, ResourceId, ResourceKind, Selector,
};
use crate::infrastructure::traits::{FileSystem, ProviderResult, ResourceProvider};

/// Redraws of a colliding slug before accepting a duplicate name.
const MAX_NAME_ATTEMPTS: usize = 16;

/// Service executing invocations against the provider.
pub struct CommandDispatcher {
    provider: Arc<dyn ResourceProvider>,
    fs: Arc<dyn FileSystem>,
    resolver: IdentifierResolver,
    reporter: Arc<dyn Reporter>,
}

impl CommandDispatcher {
    pub fn new(
        provider: Arc<dyn ResourceProvider>,
        fs: Arc<dyn FileSystem>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let resolver = IdentifierResolver::new(Arc::clone(&provider));
        Self {
            provider,
            fs,
            resolver,
            reporter,
        }
    }

    /// Run the handler for `invocation`.
    pub fn dispatch(&self, invocation: &Invocation) -> ApplicationResult<()> {
        debug!(
            kind = %invocation.kind(),
            action = invocation.action_name(),
            "dispatch"
        );
        match invocation {
            Invocation::CreateDroplets(params) => self.create_droplets(params),
            Invocation::ListDroplets => self.list_droplets(),
            Invocation::DropletAction { action, selectors } => {
                self.droplet_action(*action, selectors)
            }
            Invocation::ListImages => self.list_images(),
            Invocation::DestroyImages { selectors } => self.destroy_images(selectors),
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn create_droplets(&self, params: &CreateParams) -> ApplicationResult<()> {
        let key_path = PathBuf::from(expand_env_vars(&params.ssh_key.to_string_lossy()));
        self.reporter.progress(&format!(
            "Create {} {} droplet(s) of size {} in region {} with ssh key {}",
            params.count,
            params.image,
            params.size,
            params.region,
            key_path.display()
        ));
        let fingerprint = self.key_fingerprint(&key_path)?;

        let mut rng = rand::thread_rng();
        let mut used = HashSet::new();
        let mut failed = 0;

        for _ in 0..params.count {
            let mut name = String::new();
            for _ in 0..MAX_NAME_ATTEMPTS {
                name = droplet_name(
                    &params.name_prefix,
                    &params.image,
                    &params.size,
                    &params.region,
                    &random_slug(&mut rng),
                );
                if !used.contains(&name) {
                    break;
                }
            }
            used.insert(name.clone());

            let request = DropletCreateRequest {
                name: name.clone(),
                region: params.region.clone(),
                size: params.size.clone(),
                image: params.image.clone(),
                ssh_keys: vec![fingerprint.clone()],
            };
            match self
                .provider
                .create_droplet(&request)
                .with_remote_context(format!("create droplet {name}"))
            {
                Ok(droplet) => self
                    .reporter
                    .succeeded(&format!("{} created ({})", droplet.name, droplet.id)),
                Err(e) => {
                    debug!(%name, error = %e, "create failed");
                    failed += 1;
                    self.reporter.failed(&e.to_string());
                }
            }
        }

        finish(failed, params.count as usize)
    }

    /// MD5 fingerprint of the public key at `path`.
    fn key_fingerprint(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::KeyFileNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read ssh key", path)?;
        let key = PublicKey::parse(&content)?;
        debug!(
            md5 = %key.md5_fingerprint(),
            sha256 = %key.sha256_fingerprint(),
            "provided ssh key"
        );
        Ok(key.md5_fingerprint())
    }

    fn list_droplets(&self) -> ApplicationResult<()> {
        let droplets = self
            .provider
            .list_droplets()
            .with_remote_context("list droplets")?;
        self.reporter.listing(&render::droplet_table(&droplets));
        Ok(())
    }

    fn list_images(&self) -> ApplicationResult<()> {
        let images = self
            .provider
            .list_images()
            .with_remote_context("list images")?;
        self.reporter.listing(&render::image_table(&images));
        Ok(())
    }

    fn droplet_action(&self, action: DropletAction, selectors: &[Selector]) -> ApplicationResult<()> {
        let provider = &self.provider;
        self.for_each_target(
            ResourceKind::Droplet,
            action.verb(),
            selectors,
            |id| provider.get_droplet(id).map(|d| d.name),
            |id| match action {
                DropletAction::PowerOff => provider.power_off(id),
                DropletAction::PowerOn => provider.power_on(id),
                DropletAction::Reboot => provider.reboot(id),
                DropletAction::Destroy => provider.destroy_droplet(id),
            },
        )
    }

    fn destroy_images(&self, selectors: &[Selector]) -> ApplicationResult<()> {
        let provider = &self.provider;
        self.for_each_target(
            ResourceKind::Image,
            "destroy",
            selectors,
            |id| provider.get_image(id).map(|i| i.name),
            |id| provider.destroy_image(id),
        )
    }

    /// Resolve all selectors, then fetch and act on each ID in order.
    fn for_each_target<F, A>(
        &self,
        kind: ResourceKind,
        verb: &str,
        selectors: &[Selector],
        fetch_name: F,
        act: A,
    ) -> ApplicationResult<()>
    where
        F: Fn(ResourceId) -> ProviderResult<String>,
        A: Fn(ResourceId) -> ProviderResult<()>,
    {
        let ids = self.resolver.resolve(kind, selectors)?;
        debug!(?ids, "resolved targets");

        let mut failed = 0;
        for &id in &ids {
            if let Err(e) = self.run_target(kind, verb, id, &fetch_name, &act) {
                debug!(id, error = %e, "target failed");
                failed += 1;
                self.reporter.failed(&e.to_string());
            }
        }

        finish(failed, ids.len())
    }

    fn run_target<F, A>(
        &self,
        kind: ResourceKind,
        verb: &str,
        id: ResourceId,
        fetch_name: &F,
        act: &A,
    ) -> ApplicationResult<()>
    where
        F: Fn(ResourceId) -> ProviderResult<String>,
        A: Fn(ResourceId) -> ProviderResult<()>,
    {
        let name = fetch_name(id).with_remote_context(format!("{verb} {kind} {id}"))?;
        self.reporter.progress(&format!("{verb} {kind} {name} ({id})"));
        act(id).with_remote_context(format!("{verb} {kind} {name} ({id})"))?;
        self.reporter.succeeded("Ok");
        Ok(())
    }
}

fn finish(failed: usize, total: usize) -> ApplicationResult<()> {
    if failed > 0 {
        return Err(ApplicationError::PartialFailure { failed, total });
    }
    Ok(())
}
