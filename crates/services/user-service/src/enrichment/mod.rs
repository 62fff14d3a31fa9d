//! Demographic enrichment.
//!
//! Turns a bare name into a complete [`NewUser`] by asking three inference
//! services for age, gender and nationality. Either all three answer with a
//! prediction or the whole enrichment fails.

mod client;
mod error;
mod response;

use async_trait::async_trait;

use domain::NewUser;

pub use client::DemographicsClient;
pub use error::{EnrichmentError, Lookup};
pub use response::{AgeResponse, CountryPrediction, GenderResponse, NationalityResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of demographic predictions for a name.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DemographicsProvider: Send + Sync {
    async fn enrich(&self, name: &str) -> Result<NewUser, EnrichmentError>;
}
