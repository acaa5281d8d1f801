//! Description generator module
//!
//! Attaches a human-readable description to every module and submodule
//! candidate. Two backends implement the same capability: a remote
//! generative text service and a local template generator. The backend is
//! chosen once from configuration; a remote failure for one candidate falls
//! back to a template for that candidate without aborting the run.

mod config;
mod error;
mod remote;
mod template;

pub use config::DescribeConfig;
pub use error::DescribeError;
pub use remote::RemoteGenerator;
pub use template::TemplateGenerator;

use tracing::{info, instrument, warn};

use crate::outline::ModuleCandidate;

/// Description backend, selected from configuration
#[derive(Debug, Clone)]
pub enum Describer {
    /// Remote generative service with template fallback per candidate
    Remote {
        remote: RemoteGenerator,
        fallback: TemplateGenerator,
    },
    /// Local template generation only
    Template(TemplateGenerator),
}

impl Describer {
    /// Select a backend from configuration.
    ///
    /// A configured API key selects the remote service; otherwise the
    /// template generator is used.
    pub fn from_config(config: &DescribeConfig) -> Result<Self, DescribeError> {
        if config.api_key.is_some() {
            let remote = RemoteGenerator::from_config(config)?;
            info!("Using remote description service ({})", config.model);
            Ok(Describer::Remote {
                remote,
                fallback: TemplateGenerator::new(),
            })
        } else {
            info!("No service credential configured, using template descriptions");
            Ok(Describer::Template(TemplateGenerator::new()))
        }
    }

    /// Force the template backend regardless of credentials
    pub fn template() -> Self {
        Describer::Template(TemplateGenerator::new())
    }

    /// Generate a module description; never empty
    pub async fn module_description(&self, title: &str, body: &str) -> String {
        match self {
            Describer::Template(t) => t.module_description(title, body),
            Describer::Remote { remote, fallback } => {
                match remote.describe(title, body).await {
                    Ok(description) => description,
                    Err(e) => {
                        warn!("Remote description failed for '{}': {}", title, e);
                        fallback.module_description(title, body)
                    }
                }
            }
        }
    }

    /// Generate a submodule description; never empty
    pub async fn submodule_description(&self, title: &str, body: &str) -> String {
        match self {
            Describer::Template(t) => t.submodule_description(title, body),
            Describer::Remote { remote, fallback } => {
                match remote.describe(title, body).await {
                    Ok(description) => description,
                    Err(e) => {
                        warn!("Remote description failed for '{}': {}", title, e);
                        fallback.submodule_description(title, body)
                    }
                }
            }
        }
    }

    /// Attach a description to one candidate and all of its submodules
    pub async fn describe_candidate(&self, candidate: &mut ModuleCandidate) {
        candidate.description =
            Some(self.module_description(&candidate.title, &candidate.body).await);
        for submodule in &mut candidate.submodules {
            submodule.description =
                Some(self.submodule_description(&submodule.title, &submodule.body).await);
        }
    }
}

/// Attach descriptions to every candidate in the list
#[instrument(skip(describer, candidates), fields(candidates = candidates.len()))]
pub async fn describe_candidates(describer: &Describer, candidates: &mut [ModuleCandidate]) {
    for candidate in candidates.iter_mut() {
        describer.describe_candidate(candidate).await;
    }
    info!("Described {} module candidates", candidates.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SubmoduleCandidate;
    use mockito::Server;

    fn candidate(title: &str, body: &str, submodules: Vec<(&str, &str)>) -> ModuleCandidate {
        ModuleCandidate {
            title: title.to_string(),
            body: body.to_string(),
            description: None,
            submodules: submodules
                .into_iter()
                .map(|(t, b)| SubmoduleCandidate {
                    title: t.to_string(),
                    body: b.to_string(),
                    description: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_template_backend_fills_all_descriptions() {
        let describer = Describer::template();
        let mut candidates = vec![
            candidate("Billing", "Invoices and payments.", vec![("Invoices", "")]),
            candidate("Widgets", "", vec![]),
        ];

        describe_candidates(&describer, &mut candidates).await;

        for module in &candidates {
            assert!(!module.description.as_deref().unwrap_or("").is_empty());
            for submodule in &module.submodules {
                assert!(!submodule.description.as_deref().unwrap_or("").is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_backend_selection_from_config() {
        let with_key = DescribeConfig::builder().api_key("k").build();
        assert!(matches!(
            Describer::from_config(&with_key).unwrap(),
            Describer::Remote { .. }
        ));

        let without_key = DescribeConfig::default();
        assert!(matches!(
            Describer::from_config(&without_key).unwrap(),
            Describer::Template(_)
        ));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_per_candidate() {
        let mut server = Server::new_async().await;
        // Permanent error: the describer must fall back to templates
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let config = DescribeConfig::builder()
            .api_key("test-key")
            .base_url(server.url())
            .max_retries(0)
            .build();
        let describer = Describer::from_config(&config).unwrap();

        let mut module = candidate("Billing", "Invoices and payments here.", vec![]);
        describer.describe_candidate(&mut module).await;

        let description = module.description.unwrap();
        assert!(!description.is_empty());
        assert!(description.starts_with("Billing and Payments"));
    }
}
