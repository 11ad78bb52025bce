use std::time::Duration;

use async_trait::async_trait;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// MyMemory translation API (`GET ?q=..&langpair=en|es`)
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
    email: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(api_url: String, email: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_url,
            email,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<Translation, TranslateError> {
        let langpair = format!("{}|{}", from.to_lowercase(), to.to_lowercase());
        let mut params = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = self.email.as_deref() {
            params.push(("de", email));
        }

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        let text = parse_response(&json)?;
        Ok(Translation { text })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
        }
    }
}

/// Pull the translated text out of a MyMemory response body.
///
/// The service reports quota and input errors inside a 200 response, with
/// `responseStatus` set to the real code (sometimes as a string).
fn parse_response(json: &serde_json::Value) -> Result<String, TranslateError> {
    let status = match &json["responseStatus"] {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    };

    match status {
        Some(200) | None => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        Some(code) => {
            let details = json["responseDetails"].as_str().unwrap_or("no details");
            return Err(TranslateError::ApiError(format!("status {code}: {details}")));
        }
    }

    let translated = json["responseData"]["translatedText"]
        .as_str()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TranslateError::MalformedResponse("No translation in response".to_string()))?;

    Ok(translated.to_string())
}
