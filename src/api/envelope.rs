use serde::Deserialize;

use crate::errors::AppError;

/// `{success, data|error, message}` wrapper used by every endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn failure_text(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "Operação não concluída".to_string())
    }

    /// The payload, or the error the server reported.
    pub fn into_data(self) -> Result<T, AppError> {
        if !self.success {
            return Err(AppError::Api(self.failure_text()));
        }
        self.data
            .ok_or_else(|| AppError::Decode("resposta sem dados".to_string()))
    }

    /// Success check for calls whose payload is irrelevant (deletes).
    pub fn into_unit(self) -> Result<(), AppError> {
        if self.success {
            Ok(())
        } else {
            Err(AppError::Api(self.failure_text()))
        }
    }
}

/// Error for a non-2xx answer, preferring the envelope's text when the body
/// carries one.
pub fn http_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.error.or(env.message))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));
    AppError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(env.into_data(), Ok(vec![1, 2]));
    }

    #[test]
    fn failure_prefers_error_then_message() {
        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": false, "error": "Categoria em uso", "message": "x"}"#)
                .unwrap();
        assert_eq!(env.into_data(), Err(AppError::Api("Categoria em uso".into())));

        let env: ApiEnvelope<i32> =
            serde_json::from_str(r#"{"success": false, "message": "Falhou"}"#).unwrap();
        assert_eq!(env.into_unit(), Err(AppError::Api("Falhou".into())));

        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            env.into_unit(),
            Err(AppError::Api("Operação não concluída".into()))
        );
    }

    #[test]
    fn success_without_data_is_only_fine_for_unit() {
        let env: ApiEnvelope<i32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(env.clone().into_unit(), Ok(()));
        assert!(matches!(env.into_data(), Err(AppError::Decode(_))));
    }

    #[test]
    fn http_errors_use_body_text_when_present() {
        assert_eq!(
            http_error(422, r#"{"success": false, "error": "Valor inválido"}"#),
            AppError::Http {
                status: 422,
                message: "Valor inválido".into()
            }
        );
        assert_eq!(
            http_error(502, "<html>bad gateway</html>"),
            AppError::Http {
                status: 502,
                message: "HTTP 502".into()
            }
        );
    }
}
