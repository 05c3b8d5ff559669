// crates/snapask-types/src/models.rs
// Model catalog served by /api/available_models and the user's selection

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("model list unavailable: {0}")]
    Server(String),

    #[error("invalid model list: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderModels {
    pub provider: String,
    pub models: Vec<ModelOption>,
}

/// Which model the next message goes to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelSelection {
    pub provider: String,
    pub model_id: String,
}

/// Providers and their models, in the order the backend lists them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    pub providers: Vec<ProviderModels>,
}

impl ModelCatalog {
    /// Parse `{ provider: { model_id: label } }`
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| CatalogError::Invalid(e.to_string()))?;
        let map = value
            .as_object()
            .ok_or_else(|| CatalogError::Invalid("expected a JSON object".to_string()))?;

        if let Some(err) = map.get("error").and_then(Value::as_str) {
            return Err(CatalogError::Server(err.to_string()));
        }

        let mut providers = Vec::with_capacity(map.len());
        for (provider, models) in map {
            let models = models.as_object().ok_or_else(|| {
                CatalogError::Invalid(format!("models for '{}' are not an object", provider))
            })?;
            let models = models
                .iter()
                .map(|(id, label)| ModelOption {
                    id: id.clone(),
                    label: label.as_str().unwrap_or(id).to_string(),
                })
                .collect();
            providers.push(ProviderModels {
                provider: provider.clone(),
                models,
            });
        }
        Ok(Self { providers })
    }

    pub fn is_empty(&self) -> bool {
        self.providers.iter().all(|p| p.models.is_empty())
    }

    pub fn contains(&self, selection: &ModelSelection) -> bool {
        self.providers
            .iter()
            .filter(|p| p.provider == selection.provider)
            .any(|p| p.models.iter().any(|m| m.id == selection.model_id))
    }

    pub fn provider_of(&self, model_id: &str) -> Option<&str> {
        self.providers
            .iter()
            .find(|p| p.models.iter().any(|m| m.id == model_id))
            .map(|p| p.provider.as_str())
    }

    /// Keep the preferred selection if still offered, else fall back to the
    /// first model of the preferred provider, then to the very first model
    pub fn resolve(&self, preferred: Option<&ModelSelection>) -> Option<ModelSelection> {
        if let Some(pref) = preferred {
            if self.contains(pref) {
                return Some(pref.clone());
            }
            if let Some(first) = self.first_of(&pref.provider) {
                return Some(first);
            }
        }
        self.providers
            .iter()
            .find_map(|p| self.first_of(&p.provider))
    }

    fn first_of(&self, provider: &str) -> Option<ModelSelection> {
        self.providers
            .iter()
            .find(|p| p.provider == provider)
            .and_then(|p| p.models.first())
            .map(|m| ModelSelection {
                provider: provider.to_string(),
                model_id: m.id.clone(),
            })
    }
}
