//! Record enrichment pipeline.
//!
//! Turns a shallow record's detail source into a full [`RecordDetail`]:
//!
//! 1. **Detail**: fetch the detail resource (skipped when already known)
//! 2. **Sprite**: fetch the default form and read its front sprite
//! 3. **Description**: fetch the species resource and pick the entry in the
//!    configured language. A species the catalog does not know (alternate
//!    forms) gives an empty description.
//!
//! Steps 2 and 3 only depend on step 1 and run concurrently. The pipeline
//! never writes to the record itself; the store applies the result in one
//! update.

use crate::record::RecordDetail;
use pokedex_client::{CatalogClient, ClientError, DetailResource};
use pokedex_types::RecordId;
use thiserror::Error;
use tracing::debug;

/// Where step 1 gets the detail resource from.
#[derive(Debug, Clone)]
pub enum EnrichmentSource {
    /// Fetch the detail resource from this locator.
    Locator(String),
    /// The detail resource is already known (e.g. from a name lookup).
    Detail(Box<DetailResource>),
}

/// Errors that leave a record shallow.
#[derive(Debug, Clone, Error)]
pub enum EnrichmentError {
    #[error("detail fetch failed: {0}")]
    Detail(ClientError),

    #[error("form fetch failed: {0}")]
    Form(ClientError),

    #[error("description fetch failed: {0}")]
    Description(ClientError),

    #[error("{0} has no default form")]
    MissingForm(String),
}

/// Output of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enriched {
    /// Catalog id reported by the detail resource.
    pub id: Option<RecordId>,
    pub detail: RecordDetail,
}

/// Runs the pipeline for the record named `name`.
pub async fn enrich(
    client: &dyn CatalogClient,
    name: &str,
    source: EnrichmentSource,
    language: &str,
) -> Result<Enriched, EnrichmentError> {
    let resource = match source {
        EnrichmentSource::Detail(resource) => *resource,
        EnrichmentSource::Locator(locator) => client
            .fetch_detail(&locator)
            .await
            .map_err(EnrichmentError::Detail)?,
    };

    let form_locator = resource
        .default_form_locator()
        .ok_or_else(|| EnrichmentError::MissingForm(name.to_string()))?;

    let (form, description) = tokio::try_join!(
        async {
            client
                .fetch_form(form_locator)
                .await
                .map_err(EnrichmentError::Form)
        },
        async {
            match client.fetch_description(name).await {
                Ok(species) => Ok(species.description_in(language)),
                Err(err) if err.is_not_found() => {
                    debug!("No species entry for {}", name);
                    Ok(None)
                }
                Err(err) => Err(EnrichmentError::Description(err)),
            }
        }
    )?;

    let sprite = form
        .sprites
        .front_default
        .or_else(|| resource.sprites.front_default.clone())
        .unwrap_or_default();

    Ok(Enriched {
        id: resource.record_id(),
        detail: RecordDetail {
            sprite,
            primary_type: resource.primary_type().map(str::to_string),
            secondary_type: resource.secondary_type().map(str::to_string),
            description: description.unwrap_or_default(),
        },
    })
}
