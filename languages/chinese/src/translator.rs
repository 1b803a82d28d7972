use async_trait::async_trait;
use zimu_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// DeepL client for Chinese captions
#[derive(Clone)]
pub struct ChineseTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl ChineseTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    /// Same as [`ChineseTranslator::new`] with a per-request timeout
    pub fn with_timeout(api_key: String, api_url: String, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build translator client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for ChineseTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        if !self
            .supported_languages()
            .iter()
            .any(|(f, t)| f.eq_ignore_ascii_case(&from) && t.eq_ignore_ascii_case(&to))
        {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let params = [
            ("text", text),
            ("source_lang", &from.to_uppercase()),
            ("target_lang", &to.to_uppercase()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            from,
            to,
            provider: "deepl".to_string(),
            confidence: None,
            alternatives: vec![],
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        ["en", "de", "fr", "es", "ja", "ko", "ru"]
            .into_iter()
            .map(|to| ("zh".to_string(), to.to_string()))
            .collect()
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request with a canned response, returning the full request
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v2/translate", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            let head_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break request.len();
                }
            };
            let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < head_end + content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    async fn translate_against(status: &'static str, body: &'static str) -> (Result<Translation, TranslateError>, String) {
        let (url, server) = serve_once(status, body).await;
        let translator = ChineseTranslator::new("secret".to_string(), url);
        let result = translator
            .translate("你好", "zh".to_string(), "en".to_string())
            .await;
        (result, server.await.unwrap())
    }

    #[tokio::test]
    async fn test_reads_first_translation() {
        let (result, request) = translate_against(
            "200 OK",
            r#"{"translations":[{"detected_source_language":"ZH","text":"Hello"}]}"#,
        )
        .await;

        let translation = result.unwrap();
        assert_eq!(translation.text, "Hello");
        assert_eq!(translation.provider, "deepl");
        assert_eq!(translation.to, "en");

        assert!(request.starts_with("POST /v2/translate"));
        assert!(request.to_lowercase().contains("authorization: deepl-auth-key secret"));
        assert!(request.contains("source_lang=ZH"));
        assert!(request.contains("target_lang=EN"));
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limit() {
        let (result, _) = translate_against("429 Too Many Requests", "{}").await;
        assert!(matches!(result.unwrap_err(), TranslateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_forbidden_is_authentication_error() {
        let (result, _) = translate_against("403 Forbidden", "{}").await;
        assert!(matches!(result.unwrap_err(), TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let (result, _) = translate_against("500 Internal Server Error", "{}").await;
        let err = result.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_api_error() {
        let (result, _) = translate_against("200 OK", "not json").await;
        let err = result.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(ref msg) if msg.starts_with("Failed to parse")));
    }

    #[tokio::test]
    async fn test_missing_translation_is_api_error() {
        let (result, _) = translate_against("200 OK", r#"{"translations":[]}"#).await;
        let err = result.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(ref msg) if msg == "No translation in response"));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let translator = ChineseTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let err = translator
            .translate("你好", "zh".to_string(), "en".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn test_unsupported_pair_is_rejected_locally() {
        let translator = ChineseTranslator::new("key".to_string(), "http://127.0.0.1:9".to_string());
        let err = translator
            .translate("你好", "zh".to_string(), "tlh".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguagePair { .. }));
    }

    #[test]
    fn test_metadata() {
        let translator = ChineseTranslator::new("key".to_string(), String::new());
        assert_eq!(translator.metadata().name, "DeepL");
        assert!(translator.supported_languages().contains(&("zh".to_string(), "en".to_string())));
    }
}
