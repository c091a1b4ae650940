//! Prediction and advice orchestration
//!
//! Every submission produces a prediction and an advice set. Remote failures
//! are logged and replaced by the offline estimator, never surfaced.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use shared::estimator::{generate_offline_advice, generate_offline_prediction};
use shared::models::{
    AdviceRequest, AdviceResponse, FarmerInput, FarmerPayload, PredictionSource, YieldPrediction,
};
use shared::session::{Session, TokenStore};
use shared::{OFFLINE_ADVICE_ADVISORY, OFFLINE_PREDICTION_ADVISORY};

use crate::external::YieldApi;

/// A value tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: PredictionSource,
}

/// Await `remote`; on any error log it under `operation` and use `fallback`
pub async fn with_fallback<T, E, Fut, F>(operation: &str, remote: Fut, fallback: F) -> Sourced<T>
where
    Fut: Future<Output = Result<T, E>>,
    F: FnOnce() -> T,
    E: Display,
{
    match remote.await {
        Ok(value) => Sourced {
            value,
            source: PredictionSource::Remote,
        },
        Err(e) => {
            tracing::warn!(operation, error = %e, "Remote call failed, using offline fallback");
            Sourced {
                value: fallback(),
                source: PredictionSource::Offline,
            }
        }
    }
}

/// Result of one submission
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceOutcome {
    pub prediction: YieldPrediction,
    pub advice: AdviceResponse,
    pub prediction_source: PredictionSource,
    pub advice_source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

/// Workspace service sequencing the prediction and advice calls
#[derive(Clone)]
pub struct WorkspaceService {
    api: Arc<dyn YieldApi>,
}

impl WorkspaceService {
    pub fn new(api: Arc<dyn YieldApi>) -> Self {
        Self { api }
    }

    /// Remote prediction, or the offline estimate if the call fails
    pub async fn predict(
        &self,
        input: &FarmerInput,
        authorization: Option<&str>,
    ) -> Sourced<YieldPrediction> {
        let payload = FarmerPayload::from(input);
        with_fallback(
            "predict",
            self.api.predict(&payload, authorization),
            || generate_offline_prediction(input),
        )
        .await
    }

    /// Advice for `prediction`; the remote service is only consulted when
    /// the prediction itself came from it
    pub async fn advise(
        &self,
        prediction: &Sourced<YieldPrediction>,
        input: &FarmerInput,
        authorization: Option<&str>,
    ) -> Sourced<AdviceResponse> {
        if prediction.source.is_offline() {
            return Sourced {
                value: generate_offline_advice(&prediction.value, input),
                source: PredictionSource::Offline,
            };
        }

        let request = AdviceRequest {
            farmer: FarmerPayload::from(input),
            predicted_yield: prediction.value.predicted_yield,
        };
        with_fallback(
            "advice",
            self.api.advice(&request, authorization),
            || generate_offline_advice(&prediction.value, input),
        )
        .await
    }

    /// Prediction then advice, with the advisory banner for any fallback
    pub async fn run<S: TokenStore>(
        &self,
        input: &FarmerInput,
        session: &Session<S>,
    ) -> WorkspaceOutcome {
        let run_id = uuid::Uuid::new_v4();
        let authorization = session.authorization_header();

        tracing::debug!(%run_id, crop = %input.crop_type, "Running yield prediction");
        let prediction = self.predict(input, authorization.as_deref()).await;
        let advice = self.advise(&prediction, input, authorization.as_deref()).await;

        let advisory = if prediction.source.is_offline() {
            Some(OFFLINE_PREDICTION_ADVISORY)
        } else if advice.source.is_offline() {
            Some(OFFLINE_ADVICE_ADVISORY)
        } else {
            None
        };

        tracing::info!(
            %run_id,
            prediction_source = ?prediction.source,
            advice_source = ?advice.source,
            predicted_yield = prediction.value.predicted_yield,
            "Workspace run complete"
        );

        WorkspaceOutcome {
            prediction: prediction.value,
            advice: advice.value,
            prediction_source: prediction.source,
            advice_source: advice.source,
            advisory: advisory.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::UpstreamError;
    use serde_json::Value;
    use shared::models::{FarmerForm, ReferenceOptions};
    use shared::session::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Stub backend with switchable failures and call counters
    #[derive(Default)]
    struct StubApi {
        fail_predict: bool,
        fail_advice: bool,
        predict_calls: AtomicUsize,
        advice_calls: AtomicUsize,
        last_authorization: Mutex<Option<String>>,
    }

    fn remote_prediction() -> YieldPrediction {
        let input = FarmerInput::try_from(FarmerForm::default()).unwrap();
        YieldPrediction {
            predicted_yield: 5.55,
            confidence: 0.9,
            ..generate_offline_prediction(&input)
        }
    }

    #[axum::async_trait]
    impl YieldApi for StubApi {
        async fn predict(
            &self,
            _payload: &FarmerPayload,
            authorization: Option<&str>,
        ) -> Result<YieldPrediction, UpstreamError> {
            self.predict_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_authorization.lock().unwrap() = authorization.map(str::to_string);
            if self.fail_predict {
                Err(UpstreamError::Status {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(remote_prediction())
            }
        }

        async fn advice(
            &self,
            request: &AdviceRequest,
            _authorization: Option<&str>,
        ) -> Result<AdviceResponse, UpstreamError> {
            self.advice_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.predicted_yield, 5.55);
            if self.fail_advice {
                Err(UpstreamError::Transport("connection refused".to_string()))
            } else {
                Ok(AdviceResponse {
                    knowledge_base: Vec::new(),
                })
            }
        }

        async fn reference_options(&self) -> Result<ReferenceOptions, UpstreamError> {
            Ok(ReferenceOptions::default())
        }

        async fn crop_lifecycle(
            &self,
            _request: &shared::models::LifecycleRequest,
            _authorization: Option<&str>,
        ) -> Result<shared::models::CropLifecycle, UpstreamError> {
            Err(UpstreamError::Transport("not used here".to_string()))
        }

        async fn current_user(&self, _authorization: &str) -> Result<Value, UpstreamError> {
            Ok(Value::Null)
        }
    }

    fn input() -> FarmerInput {
        FarmerInput::try_from(FarmerForm::default()).unwrap()
    }

    #[tokio::test]
    async fn test_with_fallback_passes_through_success() {
        let result = with_fallback("op", async { Ok::<_, String>(7) }, || 0).await;
        assert_eq!(result.value, 7);
        assert_eq!(result.source, PredictionSource::Remote);
    }

    #[tokio::test]
    async fn test_with_fallback_uses_fallback_on_error() {
        let result = with_fallback("op", async { Err::<i32, _>("down") }, || 42).await;
        assert_eq!(result.value, 42);
        assert_eq!(result.source, PredictionSource::Offline);
    }

    #[tokio::test]
    async fn test_all_remote_has_no_advisory() {
        let api = Arc::new(StubApi::default());
        let service = WorkspaceService::new(api.clone());

        let outcome = service.run(&input(), &Session::anonymous()).await;

        assert_eq!(outcome.prediction_source, PredictionSource::Remote);
        assert_eq!(outcome.advice_source, PredictionSource::Remote);
        assert_eq!(outcome.prediction.predicted_yield, 5.55);
        assert!(outcome.advisory.is_none());
        assert_eq!(api.advice_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prediction_failure_skips_remote_advice() {
        let api = Arc::new(StubApi {
            fail_predict: true,
            ..StubApi::default()
        });
        let service = WorkspaceService::new(api.clone());
        let farmer = input();

        let outcome = service.run(&farmer, &Session::anonymous()).await;

        assert_eq!(outcome.prediction_source, PredictionSource::Offline);
        assert_eq!(outcome.advice_source, PredictionSource::Offline);
        assert_eq!(outcome.prediction, generate_offline_prediction(&farmer));
        assert_eq!(outcome.advisory.as_deref(), Some(OFFLINE_PREDICTION_ADVISORY));
        assert_eq!(outcome.advice.knowledge_base.len(), 3);
        assert_eq!(api.advice_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_advice_failure_keeps_remote_prediction() {
        let api = Arc::new(StubApi {
            fail_advice: true,
            ..StubApi::default()
        });
        let service = WorkspaceService::new(api.clone());

        let outcome = service.run(&input(), &Session::anonymous()).await;

        assert_eq!(outcome.prediction_source, PredictionSource::Remote);
        assert_eq!(outcome.advice_source, PredictionSource::Offline);
        assert_eq!(outcome.advisory.as_deref(), Some(OFFLINE_ADVICE_ADVISORY));
        assert!(outcome.advice.knowledge_base[2].summary.contains("5.55 t/ha"));
    }

    #[tokio::test]
    async fn test_session_token_is_forwarded() {
        let api = Arc::new(StubApi::default());
        let service = WorkspaceService::new(api.clone());
        let session = Session::init(MemoryTokenStore::with_token("abc"));

        service.run(&input(), &session).await;

        assert_eq!(
            api.last_authorization.lock().unwrap().as_deref(),
            Some("Bearer abc")
        );
    }
}
