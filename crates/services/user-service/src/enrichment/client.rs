//! `ureq`-backed demographics client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use ureq::{Agent, AgentBuilder};

use domain::NewUser;

use super::error::{EnrichmentError, Lookup};
use super::response::{AgeResponse, GenderResponse, NationalityResponse};
use super::DemographicsProvider;
use crate::config::EnrichmentConfig;

/// Queries agify, genderize and nationalize concurrently.
#[derive(Clone)]
pub struct DemographicsClient {
    agent: Agent,
    config: EnrichmentConfig,
}

impl DemographicsClient {
    pub fn new(config: EnrichmentConfig) -> Self {
        let agent = AgentBuilder::new().timeout(config.timeout()).build();
        Self { agent, config }
    }

    async fn fetch<T>(&self, lookup: Lookup, url: &str, name: &str) -> Result<T, EnrichmentError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = url.to_string();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || fetch_blocking(&agent, lookup, &url, &name))
            .await
            .map_err(|e| EnrichmentError::Task {
                lookup,
                message: e.to_string(),
            })?
    }
}

fn fetch_blocking<T: DeserializeOwned>(
    agent: &Agent,
    lookup: Lookup,
    url: &str,
    name: &str,
) -> Result<T, EnrichmentError> {
    let response = agent
        .get(url)
        .query("name", name)
        .call()
        .map_err(|err| match err {
            ureq::Error::Status(status, _) => EnrichmentError::Status { lookup, status },
            ureq::Error::Transport(transport) => EnrichmentError::Transport {
                lookup,
                message: transport.to_string(),
            },
        })?;

    response
        .into_json::<T>()
        .map_err(|e| EnrichmentError::Decode {
            lookup,
            message: e.to_string(),
        })
}

#[async_trait]
impl DemographicsProvider for DemographicsClient {
    async fn enrich(&self, name: &str) -> Result<NewUser, EnrichmentError> {
        let budget = self.config.timeout();
        tracing::debug!(name, "Querying demographic services");

        let (age, gender, nationality) = tokio::time::timeout(budget, async {
            tokio::try_join!(
                self.fetch::<AgeResponse>(Lookup::Age, &self.config.agify_url, name),
                self.fetch::<GenderResponse>(Lookup::Gender, &self.config.genderize_url, name),
                self.fetch::<NationalityResponse>(
                    Lookup::Nationality,
                    &self.config.nationalize_url,
                    name
                ),
            )
        })
        .await
        .map_err(|_| EnrichmentError::Timeout(budget))??;

        Ok(NewUser {
            name: name.to_string(),
            age: age.into_age()?,
            gender: gender.into_gender()?,
            nation: nationality.into_top_country()?,
        })
    }
}
