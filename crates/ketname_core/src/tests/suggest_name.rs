use std::path::PathBuf;
use std::sync::Arc;

use super::fakes::{
    FakeCredentials, FakeEditor, FakeKnowledge, FakeUi, Notice, Reply, ScriptedProvider,
};
use crate::client::{PARSE_FAILURE_MESSAGE, SuggestionClient};
use crate::config::KetnameConfig;
use crate::contract::FailureKind;
use crate::orchestrator::{
    CREDENTIAL_MISSING_MESSAGE, CommandOutcome, INTENT_MISSING_MESSAGE, NO_CONTEXT_MESSAGE,
    NO_EDITOR_MESSAGE, NO_PLACEHOLDER_MESSAGE, NO_SUGGESTIONS_MESSAGE, PROGRESS_TITLE,
    SuggestNameCommand,
};

const REPLY: &str = "```json\n{\"suggestions\":[\
{\"name\":\"user\",\"reason\":\"short\",\"confidence\":0.5},\
{\"name\":\"userData\",\"reason\":\"holds the fetched user\",\"confidence\":0.9}]}\n```";

struct Env {
    ui: FakeUi,
    credentials: FakeCredentials,
    knowledge: FakeKnowledge,
    provider: Arc<ScriptedProvider>,
    config: KetnameConfig,
}

impl Env {
    fn new(provider: ScriptedProvider) -> Self {
        Self {
            ui: FakeUi::agreeable(),
            credentials: FakeCredentials::with("stored-key"),
            knowledge: FakeKnowledge::default(),
            provider: Arc::new(provider),
            config: KetnameConfig::new("/ws"),
        }
    }

    async fn run(&self, editor: Option<&FakeEditor>) -> CommandOutcome {
        let client = SuggestionClient::new(self.provider.clone());
        let mut command = SuggestNameCommand::new(
            &self.ui,
            &self.credentials,
            &self.knowledge,
            &client,
            &self.config,
        );
        if let Some(editor) = editor {
            command = command.with_editor(editor);
        }
        command.run().await
    }
}

#[tokio::test]
async fn test_replaces_placeholder_with_chosen_name() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("let KV = getUserData();");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(
        outcome,
        CommandOutcome::Replaced {
            placeholder: "KV".into(),
            name: "userData".into()
        }
    );
    assert_eq!(editor.written().as_deref(), Some("let userData = getUserData();"));
    assert_eq!(
        env.ui.notices().last(),
        Some(&Notice::Info("Replaced 'KV' with 'userData'.".into()))
    );
    assert_eq!(env.provider.calls(), 1);
    assert_eq!(
        env.provider.last_request().unwrap().api_key,
        "stored-key"
    );
}

#[tokio::test]
async fn test_picker_shows_sorted_items() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("let KV = getUserData();");

    env.run(Some(&editor)).await;

    let items = env.ui.picker_items();
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["userData", "user"]);
    assert_eq!(items[0].detail, "holds the fetched user");
    assert_eq!(items[0].description, "Confidence: 90%");
}

#[tokio::test]
async fn test_every_occurrence_replaced() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("const KV = load();\nrender(KV);\nsave(KV);");

    env.run(Some(&editor)).await;

    assert_eq!(
        editor.written().as_deref(),
        Some("const userData = load();\nrender(userData);\nsave(userData);")
    );
}

#[tokio::test]
async fn test_kv_has_priority_over_km() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("function KM() { return KV; }");

    let outcome = env.run(Some(&editor)).await;

    assert!(matches!(outcome, CommandOutcome::Replaced { ref placeholder, .. } if placeholder == "KV"));
    assert_eq!(
        editor.written().as_deref(),
        Some("function KM() { return userData; }")
    );
}

#[tokio::test]
async fn test_km_used_when_no_kv() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("fn KM() {}");

    let outcome = env.run(Some(&editor)).await;

    assert!(matches!(outcome, CommandOutcome::Replaced { ref placeholder, .. } if placeholder == "KM"));
}

#[tokio::test]
async fn test_no_editor() {
    let env = Env::new(ScriptedProvider::text(REPLY));

    let outcome = env.run(None).await;

    assert_eq!(outcome, CommandOutcome::NoEditor);
    assert_eq!(env.ui.notices(), vec![Notice::Info(NO_EDITOR_MESSAGE.into())]);
    assert_eq!(env.provider.calls(), 0);
}

#[tokio::test]
async fn test_empty_document_has_no_context() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("").with_selection("");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::NoContext);
    assert_eq!(env.ui.notices(), vec![Notice::Info(NO_CONTEXT_MESSAGE.into())]);
}

#[tokio::test]
async fn test_selection_is_the_context() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("// header\nlet KV = getUserData();\n// footer")
        .with_selection("let KV = getUserData();");

    env.run(Some(&editor)).await;

    let prompt = env.provider.last_request().unwrap().prompt;
    assert!(prompt.contains("```\nlet KV = getUserData();\n```"));
    assert!(!prompt.contains("// header"));
    // The replacement still covers the full document.
    assert_eq!(
        editor.written().as_deref(),
        Some("// header\nlet userData = getUserData();\n// footer")
    );
}

#[tokio::test]
async fn test_large_context_declined_silently() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.ui.confirm = false;
    let document = format!("let KV = 1;\n{}", "x".repeat(3000));
    let editor = FakeEditor::new(&document);

    let outcome = env.run(Some(&editor)).await;

    let length = document.chars().count();
    assert_eq!(outcome, CommandOutcome::ContextTooLarge { length });
    assert_eq!(*env.ui.confirm_requests.lock().unwrap(), vec![length]);
    assert!(env.ui.notices().is_empty());
    assert_eq!(env.provider.calls(), 0);
}

#[tokio::test]
async fn test_large_context_accepted() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new(&format!("let KV = 1;\n{}", "x".repeat(3000)));

    let outcome = env.run(Some(&editor)).await;

    assert!(outcome.is_replaced());
    assert_eq!(env.ui.confirm_requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_threshold_counts_characters() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    // 3000 characters but far more than 3000 bytes.
    let document = format!("KV{}", "名".repeat(2998));
    let editor = FakeEditor::new(&document);

    let outcome = env.run(Some(&editor)).await;

    assert!(outcome.is_replaced());
    assert!(env.ui.confirm_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_intent() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.ui.intent = Some("   ".into());
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::IntentMissing);
    assert_eq!(env.ui.notices(), vec![Notice::Info(INTENT_MISSING_MESSAGE.into())]);
    assert!(outcome.is_cancelled());
}

#[tokio::test]
async fn test_missing_credential_is_prompted_and_stored() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.credentials = FakeCredentials::default();
    let editor = FakeEditor::new("let KV = getUserData();");

    let outcome = env.run(Some(&editor)).await;

    assert!(outcome.is_replaced());
    assert_eq!(env.ui.errors(), vec![CREDENTIAL_MISSING_MESSAGE.to_string()]);
    assert_eq!(*env.ui.credential_prompts.lock().unwrap(), 1);
    assert_eq!(env.credentials.stored().as_deref(), Some("typed-key"));
    assert_eq!(env.provider.last_request().unwrap().api_key, "typed-key");
}

#[tokio::test]
async fn test_credential_prompt_declined() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.credentials = FakeCredentials::default();
    env.ui.credential = None;
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::CredentialMissing);
    assert_eq!(env.credentials.stored(), None);
    assert_eq!(env.provider.calls(), 0);
}

#[tokio::test]
async fn test_credential_store_failure_still_uses_entered_key() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.credentials = FakeCredentials {
        fail_set: true,
        ..FakeCredentials::default()
    };
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert!(outcome.is_replaced());
    assert!(env.ui.errors().iter().any(|e| e.contains("keyring locked")));
}

#[tokio::test]
async fn test_knowledge_failures_reported_and_skipped() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.knowledge = FakeKnowledge::default().with_file("/ws/B", "c");
    env.config = KetnameConfig::new("/ws")
        .with_domain_knowledge(vec![PathBuf::from("A"), PathBuf::from("B")]);
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert!(outcome.is_replaced());
    let errors = env.ui.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("/ws/A"));
    let prompt = env.provider.last_request().unwrap().prompt;
    assert!(prompt.contains("## Domain knowledge\n```\nc\n\n```"));
}

#[tokio::test]
async fn test_no_placeholder_skips_request() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("let value = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::NoPlaceholder);
    assert_eq!(
        env.ui.notices().last(),
        Some(&Notice::Info(NO_PLACEHOLDER_MESSAGE.into()))
    );
    assert_eq!(env.provider.calls(), 0);
}

#[tokio::test]
async fn test_progress_wraps_the_call() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("let KV = 1;");

    env.run(Some(&editor)).await;

    assert_eq!(
        *env.ui.progress.lock().unwrap(),
        vec![format!("start:{PROGRESS_TITLE}"), "finish".to_string()]
    );
}

#[tokio::test]
async fn test_api_failure_reported() {
    let env = Env::new(ScriptedProvider::new(Reply::ApiError(401, "API key not valid".into())));
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    match outcome {
        CommandOutcome::LlmFailed(failure) => {
            assert_eq!(failure.kind, FailureKind::ApiError);
            assert!(failure.message.contains("API key not valid"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(editor.written(), None);
    let errors = env.ui.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("An error occurred while communicating with the AI"));
}

#[tokio::test]
async fn test_unparseable_reply_reported() {
    let env = Env::new(ScriptedProvider::text("not json"));
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    match outcome {
        CommandOutcome::LlmFailed(failure) => {
            assert_eq!(failure.kind, FailureKind::ParsingError);
            assert_eq!(failure.message, PARSE_FAILURE_MESSAGE);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(editor.written(), None);
}

#[tokio::test]
async fn test_unknown_provider_failure() {
    let env = Env::new(ScriptedProvider::new(Reply::Other("boom".into())));
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert!(matches!(
        outcome,
        CommandOutcome::LlmFailed(ref failure) if failure.kind == FailureKind::UnknownError
    ));
    assert!(outcome.is_error());
}

#[tokio::test]
async fn test_empty_suggestions() {
    let env = Env::new(ScriptedProvider::text(r#"{"suggestions":[]}"#));
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::NoSuggestions);
    assert_eq!(
        env.ui.notices().last(),
        Some(&Notice::Info(NO_SUGGESTIONS_MESSAGE.into()))
    );
    assert!(env.ui.picker_items().is_empty());
}

#[tokio::test]
async fn test_picker_dismissed() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.ui.pick = None;
    let editor = FakeEditor::new("let KV = 1;");

    let outcome = env.run(Some(&editor)).await;

    assert_eq!(outcome, CommandOutcome::SelectionCancelled);
    assert_eq!(editor.written(), None);
}

#[tokio::test]
async fn test_second_choice() {
    let mut env = Env::new(ScriptedProvider::text(REPLY));
    env.ui.pick = Some(1);
    let editor = FakeEditor::new("let KV = 1;");

    env.run(Some(&editor)).await;

    assert_eq!(editor.written().as_deref(), Some("let user = 1;"));
}

#[tokio::test]
async fn test_rejected_edit() {
    let env = Env::new(ScriptedProvider::text(REPLY));
    let editor = FakeEditor::new("let KV = 1;").rejecting();

    let outcome = env.run(Some(&editor)).await;

    assert!(matches!(outcome, CommandOutcome::EditFailed { ref message } if message.contains("read-only")));
    assert!(env.ui.errors()[0].contains("Failed to apply the edit"));
}

#[test]
fn test_outcome_serializes_with_tag() {
    let value = serde_json::to_value(CommandOutcome::Replaced {
        placeholder: "KV".into(),
        name: "userData".into(),
    })
    .unwrap();
    assert_eq!(
        value,
        serde_json::json!({"outcome": "replaced", "placeholder": "KV", "name": "userData"})
    );
}
