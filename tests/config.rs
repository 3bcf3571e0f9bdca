use sqlpilot::config::{normalize_endpoint, Provider};

#[test]
fn test_normalize_endpoint_full_url_unchanged() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1/chat/completions"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn test_normalize_endpoint_v1_suffix() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn test_normalize_endpoint_v1_trailing_slash() {
    assert_eq!(
        normalize_endpoint("https://api.example.com/v1/"),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn test_normalize_endpoint_bare_host() {
    assert_eq!(
        normalize_endpoint("http://localhost:11434"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("http://localhost:11434/"),
        "http://localhost:11434/v1/chat/completions"
    );
}

#[test]
fn test_provider_for_model() {
    assert_eq!(Provider::for_model("gemini-2.5-flash"), Provider::Gemini);
    assert_eq!(Provider::for_model("GEMINI-pro"), Provider::Gemini);
    assert_eq!(Provider::for_model("llama3.2"), Provider::Ollama);
    assert_eq!(Provider::for_model("qwen2.5-coder"), Provider::Ollama);
}
