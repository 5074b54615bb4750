use crate::error::Error;
use crate::provider::{Provider, ProviderRegistry};
use crate::types::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;

/// Mock provider for testing
struct MockProvider {
    id: &'static str,
}

#[async_trait]
impl Provider for MockProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, _request: GenerateRequest) -> crate::error::Result<GenerateResponse> {
        Err(Error::Other("mock".to_string()))
    }
}

#[test]
fn test_register_and_get_provider() {
    let registry = ProviderRegistry::new().register("test", MockProvider { id: "test" });

    let provider = registry.get_provider("test");
    assert!(provider.is_ok());
    assert_eq!(provider.unwrap().provider_id(), "test");
}

#[test]
fn test_provider_not_found() {
    let registry = ProviderRegistry::new();
    let result = registry.get_provider("nonexistent");
    assert!(matches!(result, Err(Error::ProviderNotFound(id)) if id == "nonexistent"));
}

#[test]
fn test_list_providers() {
    let registry = ProviderRegistry::new()
        .register("alpha", MockProvider { id: "alpha" })
        .register("beta", MockProvider { id: "beta" });

    let mut ids = registry.list_providers();
    ids.sort();
    assert_eq!(ids, vec!["alpha", "beta"]);
}

#[test]
fn test_defaults_register_builtin_providers() {
    let registry = ProviderRegistry::with_defaults();
    let mut ids = registry.list_providers();
    ids.sort();
    assert_eq!(ids, vec!["gemini", "openai"]);
    assert_eq!(
        registry.get_provider("gemini").unwrap().default_model(),
        "gemini-2.5-flash-lite"
    );
}

#[tokio::test]
async fn test_default_list_models_uses_default_model() {
    let provider = MockProvider { id: "m" };
    assert_eq!(provider.list_models().await.unwrap(), vec!["mock-model"]);
}
