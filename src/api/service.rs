use crate::api::error::ApiError;
use crate::api::traits::{ApiClient, ApiRequest};
use crate::api::types::ListParams;
use crate::catalog::classify::{categorize, Categories};
use crate::catalog::taxonomy::TaxonomyNormalizer;
use crate::models::{PaginatedResult, PropertyType};
use crate::payload::response::{normalize_flat_list, recover_list};
use crate::search::query::build_list_params;
use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

pub const PROPERTY_TYPES_PATH: &str = "property-types/";
pub const PROPERTIES_PATH: &str = "properties/";
pub const CONTACTS_PATH: &str = "contacts/";

fn property_path(id: &str) -> String {
    format!("{}{}/", PROPERTIES_PATH, id)
}

/// Catalog operations over a backend transport.
///
/// Browsing calls degrade to empty or default data on transport failure;
/// only authentication failures are returned as errors. Admin mutations
/// return every error.
pub struct CatalogService<C> {
    client: C,
    taxonomy: TaxonomyNormalizer,
}

impl<C: ApiClient> CatalogService<C> {
    pub fn new(client: C) -> Self {
        Self::with_taxonomy(client, TaxonomyNormalizer::default())
    }

    pub fn with_taxonomy(client: C, taxonomy: TaxonomyNormalizer) -> Self {
        Self { client, taxonomy }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Canonical property types, or the default taxonomy when the backend
    /// has none to offer
    pub async fn property_types(&self) -> Result<Vec<PropertyType>, ApiError> {
        match self.client.send(ApiRequest::get(PROPERTY_TYPES_PATH)).await {
            Ok(raw) => Ok(self
                .taxonomy
                .normalize(&Value::Array(normalize_flat_list(&raw)))),
            Err(err) if err.is_auth_error() => Err(err),
            Err(err) => {
                warn!("Property types unavailable, using defaults: {}", err);
                Ok(self.taxonomy.defaults().to_vec())
            }
        }
    }

    /// Property types grouped into land/residential/commercial/other
    pub async fn categories(&self) -> Result<Categories, ApiError> {
        Ok(categorize(&self.property_types().await?))
    }

    /// One page of listings
    pub async fn list_properties(&self, params: &ListParams) -> Result<PaginatedResult, ApiError> {
        let request = ApiRequest::get(PROPERTIES_PATH).with_query(build_list_params(params));
        let result = recover_list(self.client.send(request).await, params.page, params.page_size)?;
        info!(
            "Fetched {} of {} properties from {}",
            result.results.len(),
            result.count,
            self.client.source_name()
        );
        Ok(result)
    }

    /// A single listing record
    pub async fn property(&self, id: &str) -> Result<Value, ApiError> {
        self.client.send(ApiRequest::get(property_path(id))).await
    }

    /// Contact enquiries, for the admin console
    pub async fn contacts(&self) -> Result<Vec<Value>, ApiError> {
        match self.client.send(ApiRequest::get(CONTACTS_PATH)).await {
            Ok(raw) => Ok(normalize_flat_list(&raw)),
            Err(err) if err.is_auth_error() => Err(err),
            Err(err) => {
                warn!("Contacts unavailable: {}", err);
                Ok(Vec::new())
            }
        }
    }

    pub async fn create_property(&self, listing: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::POST, PROPERTIES_PATH).with_body(listing);
        self.client.send(request).await
    }

    pub async fn update_property(&self, id: &str, changes: Value) -> Result<Value, ApiError> {
        let request = ApiRequest::new(Method::PATCH, property_path(id)).with_body(changes);
        self.client.send(request).await
    }

    pub async fn delete_property(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .send(ApiRequest::new(Method::DELETE, property_path(id)))
            .await?;
        Ok(())
    }
}
