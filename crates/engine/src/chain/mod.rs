//! The degradation chain: real engine → cached example → simulation, with an
//! error stub for requests that cannot be analysed at all.

mod simulation;
mod stub;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;

use agentflow_common::types::{
    AnalysisRequest, RawAgentOutput, ResultRecord, Source, UpstreamErrorCode,
};
use agentflow_common::AgentFlowError;

use crate::cache::ExampleCache;
use crate::circuit_breaker::CircuitBreaker;
use crate::config::EngineConfig;
use crate::normalize::normalize;
use crate::orchestration::{to_raw_output, AnalysisJob, OrchestrationEngine};

pub use simulation::{simulated_swot, synthesize, SIMULATION_METRICS, SIMULATION_NEXT_STEPS};
pub use stub::error_stub;

/// Chain states. Transitions only move forward, and only on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainState {
    AttemptingPrimary,
    AttemptingCache,
    AttemptingSimulation,
    /// Terminal: a stage produced usable output.
    Succeeded(Source),
    /// Terminal: the request could not be analysed.
    ErrorStub,
}

impl ChainState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::ErrorStub)
    }

    /// State entered when the current stage fails.
    pub fn advance(self) -> Self {
        match self {
            Self::AttemptingPrimary => Self::AttemptingCache,
            Self::AttemptingCache => Self::AttemptingSimulation,
            Self::AttemptingSimulation => Self::ErrorStub,
            terminal => terminal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttemptingPrimary => "attempting_primary",
            Self::AttemptingCache => "attempting_cache",
            Self::AttemptingSimulation => "attempting_simulation",
            Self::Succeeded(_) => "succeeded",
            Self::ErrorStub => "error_stub",
        }
    }
}

/// A stage that failed and the reason the chain moved on.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: ChainState,
    pub error: AgentFlowError,
}

/// Result of one chain run plus the path it took.
#[derive(Debug)]
pub struct ChainOutcome {
    pub record: ResultRecord,
    /// Every state visited, ending in a terminal state.
    pub path: Vec<ChainState>,
    pub failures: Vec<StageFailure>,
}

/// Ordered fallback strategies that always yield a [`ResultRecord`].
pub struct DegradationChain {
    engine: Option<Arc<dyn OrchestrationEngine>>,
    cache: Option<ExampleCache>,
    breaker: Arc<CircuitBreaker>,
    timeout: Duration,
}

impl DegradationChain {
    pub fn new(
        engine: Option<Arc<dyn OrchestrationEngine>>,
        cache: Option<ExampleCache>,
        breaker: Arc<CircuitBreaker>,
        timeout: Duration,
    ) -> Self {
        Self {
            engine,
            cache,
            breaker,
            timeout,
        }
    }

    /// Wire the chain from configuration. `engine` is None when no engine
    /// is reachable; the chain then starts degraded.
    pub fn from_config(
        config: &EngineConfig,
        engine: Option<Arc<dyn OrchestrationEngine>>,
    ) -> Self {
        let breaker_name = engine
            .as_ref()
            .map(|e| e.name().to_string())
            .unwrap_or_else(|| "orchestration_engine".to_string());

        Self::new(
            engine,
            ExampleCache::from_config(&config.system.cache),
            Arc::new(CircuitBreaker::from_config(
                &breaker_name,
                &config.system.circuit_breaker,
            )),
            Duration::from_secs(config.system.engine.timeout_seconds),
        )
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn cache(&self) -> Option<&ExampleCache> {
        self.cache.as_ref()
    }

    /// Run the chain. Never fails; check `source` and `success` on the record.
    pub async fn run(&self, request: &AnalysisRequest) -> ResultRecord {
        self.run_traced(request).await.record
    }

    /// Run the chain and report the states it went through.
    pub async fn run_traced(&self, request: &AnalysisRequest) -> ChainOutcome {
        let span = tracing::info_span!(
            "analysis",
            company = %request.company_name(),
            analysis_type = request.analysis_type().key(),
        );
        self.drive(request).instrument(span).await
    }

    async fn drive(&self, request: &AnalysisRequest) -> ChainOutcome {
        let start = Instant::now();
        let mut path = Vec::new();
        let mut failures = Vec::new();

        if let Err(e) = request.validate() {
            tracing::warn!(error = %e, "Rejecting request, returning error stub");
            let record = error_stub(request, &e.to_string());
            failures.push(StageFailure {
                stage: ChainState::ErrorStub,
                error: e,
            });
            path.push(ChainState::ErrorStub);
            return finish(record, path, failures);
        }

        let mut state = ChainState::AttemptingPrimary;

        let record = loop {
            path.push(state);

            let attempt = match state {
                ChainState::AttemptingPrimary => self
                    .attempt_primary(request)
                    .await
                    .map(|output| Some((output, Source::RealEngine))),
                ChainState::AttemptingCache => self
                    .attempt_cache(request)
                    .map(|found| found.map(|output| (output, Source::CachedExample))),
                ChainState::AttemptingSimulation => {
                    break simulate(request, start.elapsed());
                }
                ChainState::Succeeded(_) | ChainState::ErrorStub => {
                    break error_stub(request, "no stage produced output");
                }
            };

            match attempt {
                Ok(Some((output, source))) => {
                    break normalize(output, request, source, start.elapsed());
                }
                Ok(None) => {
                    let next = state.advance();
                    tracing::debug!(
                        from = state.as_str(),
                        to = next.as_str(),
                        "Stage skipped"
                    );
                    state = next;
                }
                Err(error) => {
                    let next = state.advance();
                    tracing::warn!(
                        from = state.as_str(),
                        to = next.as_str(),
                        error = %error,
                        recoverable = error.is_recoverable(),
                        "Stage failed, degrading"
                    );
                    metrics::counter!(
                        "chain.stage.failures",
                        "stage" => state.as_str(),
                        "kind" => error.kind()
                    )
                    .increment(1);
                    failures.push(StageFailure {
                        stage: state,
                        error,
                    });
                    state = next;
                }
            }
        };

        let record = with_diagnostic(record, &failures);
        path.push(if record.success {
            ChainState::Succeeded(record.source)
        } else {
            ChainState::ErrorStub
        });

        finish(record, path, failures)
    }

    async fn attempt_primary(
        &self,
        request: &AnalysisRequest,
    ) -> Result<RawAgentOutput, AgentFlowError> {
        let (output, detail) = self.call_engine(request).await;

        let Some(code) = output.error_code() else {
            self.breaker.record_success();
            tracing::info!(chars = output.text().chars().count(), "Engine analysis received");
            return Ok(output);
        };

        if code.counts_against_engine() {
            self.breaker.record_failure();
        }
        tracing::debug!(code = ?code, "Engine produced no analysis");
        Err(code.into_error(detail))
    }

    /// One bounded engine call, reduced to a [`RawAgentOutput`]. The string
    /// describes the error variant and is unused for text.
    async fn call_engine(&self, request: &AnalysisRequest) -> (RawAgentOutput, String) {
        let Some(engine) = &self.engine else {
            return (
                RawAgentOutput::Error(UpstreamErrorCode::Unavailable),
                "no orchestration engine configured".into(),
            );
        };

        if !self.breaker.allow() {
            return (
                RawAgentOutput::Error(UpstreamErrorCode::Unavailable),
                format!("circuit open for {}", self.breaker.name()),
            );
        }

        let job = AnalysisJob::from_request(request);
        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, engine.execute(&job)).await;
        metrics::histogram!("engine.latency", "engine" => engine.name().to_string())
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(Ok(value)) => (to_raw_output(&value), "engine returned empty output".into()),
            Ok(Err(e)) => (RawAgentOutput::Error(UpstreamErrorCode::Failure), e.to_string()),
            Err(_) => (
                RawAgentOutput::Error(UpstreamErrorCode::Timeout),
                format!("no response within {}s", self.timeout.as_secs()),
            ),
        }
    }

    fn attempt_cache(
        &self,
        request: &AnalysisRequest,
    ) -> Result<Option<RawAgentOutput>, AgentFlowError> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };

        let found = cache.lookup(request.company_name())?;
        Ok(found.map(|example| {
            tracing::info!(path = %example.path.display(), "Using cached example");
            RawAgentOutput::from_text(example.content)
        }))
    }
}

fn simulate(request: &AnalysisRequest, elapsed: Duration) -> ResultRecord {
    let text = synthesize(request);
    let mut record = normalize(
        RawAgentOutput::Text(text),
        request,
        Source::SyntheticSimulation,
        elapsed,
    );
    record.metrics = SIMULATION_METRICS;
    record.next_steps = SIMULATION_NEXT_STEPS.iter().map(|s| s.to_string()).collect();
    record.swot = Some(simulated_swot(request));
    record
}

fn with_diagnostic(mut record: ResultRecord, failures: &[StageFailure]) -> ResultRecord {
    if record.diagnostic.is_none() && !failures.is_empty() {
        let notes: Vec<String> = failures
            .iter()
            .map(|f| format!("{}: {}", f.stage.as_str(), f.error))
            .collect();
        record.diagnostic = Some(notes.join("; "));
    }
    record
}

fn finish(
    record: ResultRecord,
    path: Vec<ChainState>,
    failures: Vec<StageFailure>,
) -> ChainOutcome {
    metrics::counter!("chain.results", "source" => record.source.as_str()).increment(1);
    tracing::info!(
        source = record.source.as_str(),
        success = record.success,
        degraded = !failures.is_empty(),
        "Analysis result ready"
    );

    ChainOutcome {
        record,
        path,
        failures,
    }
}
