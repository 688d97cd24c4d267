//! Fan-out of one generation round across every configured banner format,
//! and the controller that owns the state a front end renders.

use crate::{
    composer::{compose_requests, ProductInput, DEFAULT_PRODUCT_URL},
    error::{BannerError, Result},
    generator::ImageGenerator,
    logger,
    models::{
        Banner, BannerFormat, DesignTemplate, GenerationOutcome, GenerationRequest,
        BANNER_FORMATS,
    },
};
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred while generating banners.";

pub fn partial_failure_message(succeeded: usize, total: usize) -> String {
    format!(
        "Could not generate all banner formats. Only {} of {} were successful.",
        succeeded, total
    )
}

/// Issue every request at once and wait for all of them to settle.
///
/// `formats[i]` must be the format `requests[i]` was composed for. Outcomes come
/// back in that same order no matter which call finishes first. A failed or
/// panicked call only fails its own slot; the round itself fails only when the
/// requests do not line up with the formats.
pub async fn dispatch_round(
    generator: Arc<dyn ImageGenerator>,
    formats: &[BannerFormat],
    requests: Vec<GenerationRequest>,
) -> Result<Vec<GenerationOutcome>> {
    if formats.len() != requests.len() {
        return Err(BannerError::DispatchError(format!(
            "{} requests composed for {} formats",
            requests.len(),
            formats.len()
        )));
    }

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move {
                generator
                    .generate_banner_image(&request.prompt, request.aspect_ratio)
                    .await
            })
        })
        .collect();

    let settled = join_all(handles).await;

    let mut outcomes = Vec::with_capacity(settled.len());
    for (format, joined) in formats.iter().zip(settled) {
        let result = joined.unwrap_or_else(|e| {
            Err(BannerError::RequestError(format!("Request task failed: {}", e)))
        });
        let outcome = match result {
            Ok(image_url) => GenerationOutcome::Success(Banner::from_format(format, image_url)),
            Err(e) => {
                log::warn!(
                    "Failed to generate {} ({}) banner: {}",
                    format.name,
                    format.aspect_ratio,
                    e
                );
                GenerationOutcome::Failure {
                    format: format.name.to_string(),
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub banners: Vec<Banner>,
    pub succeeded: usize,
    pub total: usize,
    pub error: Option<String>,
}

/// Keep the successes in order and describe any shortfall.
pub fn summarize(outcomes: Vec<GenerationOutcome>, total: usize) -> RoundSummary {
    let banners: Vec<Banner> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            GenerationOutcome::Success(banner) => Some(banner),
            GenerationOutcome::Failure { .. } => None,
        })
        .collect();

    let succeeded = banners.len();
    let error = (succeeded < total).then(|| partial_failure_message(succeeded, total));

    RoundSummary {
        banners,
        succeeded,
        total,
        error,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyRunning,
    EmptyDescription,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Nothing happened and no state changed.
    Skipped(SkipReason),
    Completed { succeeded: usize, total: usize },
    Failed(String),
}

#[derive(Debug)]
struct StudioState {
    description: String,
    url: String,
    template: &'static DesignTemplate,
    loading: bool,
    banners: Vec<Banner>,
    error: Option<String>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            description: String::new(),
            url: DEFAULT_PRODUCT_URL.to_string(),
            template: DesignTemplate::default_template(),
            loading: false,
            banners: Vec::new(),
            error: None,
        }
    }
}

/// Clears the loading flag however the round exits.
struct LoadingGuard<'a> {
    state: &'a Mutex<StudioState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}

/// Holds the form inputs and the results of the latest round.
pub struct BannerStudio {
    generator: Arc<dyn ImageGenerator>,
    formats: Vec<BannerFormat>,
    state: Mutex<StudioState>,
}

impl BannerStudio {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self::with_formats(generator, BANNER_FORMATS.to_vec())
    }

    pub fn with_formats(generator: Arc<dyn ImageGenerator>, formats: Vec<BannerFormat>) -> Self {
        Self {
            generator,
            formats,
            state: Mutex::new(StudioState::default()),
        }
    }

    // The lock is never held across an await, so a poisoned lock only means a
    // panic happened mid-assignment; the data is still usable.
    fn state(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn formats(&self) -> &[BannerFormat] {
        &self.formats
    }

    pub fn description(&self) -> String {
        self.state().description.clone()
    }

    pub fn url(&self) -> String {
        self.state().url.clone()
    }

    pub fn selected_template(&self) -> &'static DesignTemplate {
        self.state().template
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.state().banners.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.state().description = description.into();
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.state().url = url.into();
    }

    pub fn select_template(&self, name: &str) -> Result<&'static DesignTemplate> {
        let template = DesignTemplate::find(name)
            .ok_or_else(|| BannerError::ConfigError(format!("Unknown design template: {}", name)))?;
        self.state().template = template;
        Ok(template)
    }

    /// Run one round over every format.
    ///
    /// Ignored while a round is already running or when the description is
    /// blank. Otherwise the previous banners and error are cleared before any
    /// request goes out, and replaced wholesale once every request settles.
    pub async fn generate(&self) -> RoundOutcome {
        let (description, url, template) = {
            let mut state = self.state();
            if state.loading {
                log::debug!("Generation already in progress, ignoring request");
                return RoundOutcome::Skipped(SkipReason::AlreadyRunning);
            }
            if state.description.trim().is_empty() {
                log::debug!("Empty product description, ignoring request");
                return RoundOutcome::Skipped(SkipReason::EmptyDescription);
            }

            state.loading = true;
            state.error = None;
            state.banners.clear();

            let url = if state.url.trim().is_empty() {
                DEFAULT_PRODUCT_URL.to_string()
            } else {
                state.url.clone()
            };
            (state.description.clone(), url, state.template)
        };
        let _loading = LoadingGuard { state: &self.state };

        let _timer = logger::timer("banner round");
        log::info!(
            "Generating {} banners in style '{}'",
            self.formats.len(),
            template.name
        );

        let input = ProductInput {
            description: &description,
            url: &url,
        };
        let requests = compose_requests(input, template, &self.formats);
        let total = self.formats.len();

        match dispatch_round(Arc::clone(&self.generator), &self.formats, requests).await {
            Ok(outcomes) => {
                let summary = summarize(outcomes, total);
                if let Some(error) = &summary.error {
                    log::warn!("{}", error);
                } else {
                    log::info!("All {} banners generated", total);
                }

                let mut state = self.state();
                state.banners = summary.banners;
                state.error = summary.error;
                RoundOutcome::Completed {
                    succeeded: summary.succeeded,
                    total: summary.total,
                }
            }
            Err(e) => {
                log::error!("Banner round failed: {}", e);
                let message = match e.to_string() {
                    message if message.trim().is_empty() => UNKNOWN_ERROR_MESSAGE.to_string(),
                    message => message,
                };
                self.state().error = Some(message.clone());
                RoundOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, DESIGN_TEMPLATES};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::{Barrier, Semaphore};

    /// Echoes the requested ratio back in the URL; fails for the listed ratios.
    struct MockGenerator {
        failing: Vec<AspectRatio>,
        calls: Mutex<Vec<(String, AspectRatio)>>,
    }

    impl MockGenerator {
        fn new(failing: Vec<AspectRatio>) -> Arc<Self> {
            Arc::new(Self {
                failing,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ImageGenerator for MockGenerator {
        async fn generate_banner_image(
            &self,
            prompt: &str,
            aspect_ratio: AspectRatio,
        ) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), aspect_ratio));

            // Wider formats finish last so completion order differs from submission order.
            let position = AspectRatio::ALL
                .iter()
                .position(|r| *r == aspect_ratio)
                .unwrap();
            tokio::time::sleep(Duration::from_millis(5 * (5 - position as u64))).await;

            if self.failing.contains(&aspect_ratio) {
                return Err(BannerError::RequestError(format!("{} rejected", aspect_ratio)));
            }
            Ok(format!("mock://{}", aspect_ratio))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    struct GatedGenerator {
        gate: Arc<Semaphore>,
        failing: Vec<AspectRatio>,
    }

    #[async_trait]
    impl ImageGenerator for GatedGenerator {
        async fn generate_banner_image(
            &self,
            _prompt: &str,
            aspect_ratio: AspectRatio,
        ) -> Result<String> {
            let _permit = self.gate.acquire().await.unwrap();
            if self.failing.contains(&aspect_ratio) {
                return Err(BannerError::RequestError(format!("{} rejected", aspect_ratio)));
            }
            Ok(format!("gated://{}", aspect_ratio))
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    /// Only returns once every format's request is in flight.
    struct RendezvousGenerator {
        barrier: Barrier,
    }

    #[async_trait]
    impl ImageGenerator for RendezvousGenerator {
        async fn generate_banner_image(
            &self,
            _prompt: &str,
            aspect_ratio: AspectRatio,
        ) -> Result<String> {
            self.barrier.wait().await;
            Ok(format!("together://{}", aspect_ratio))
        }

        fn name(&self) -> &str {
            "rendezvous"
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl ImageGenerator for PanickingGenerator {
        async fn generate_banner_image(
            &self,
            _prompt: &str,
            aspect_ratio: AspectRatio,
        ) -> Result<String> {
            if aspect_ratio == AspectRatio::Square {
                panic!("square renderer crashed");
            }
            Ok(format!("ok://{}", aspect_ratio))
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn studio_with(generator: Arc<dyn ImageGenerator>) -> BannerStudio {
        let studio = BannerStudio::new(generator);
        studio.set_description("Noise-cancelling wireless headphones");
        studio
    }

    #[tokio::test]
    async fn test_all_formats_succeed() {
        let studio = studio_with(MockGenerator::new(vec![]));

        let outcome = studio.generate().await;

        assert_eq!(outcome, RoundOutcome::Completed { succeeded: 5, total: 5 });
        assert_eq!(studio.banners().len(), 5);
        assert_eq!(studio.error(), None);
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_partial_failure_reports_counts() {
        let studio = studio_with(MockGenerator::new(vec![
            AspectRatio::Portrait9x16,
            AspectRatio::Square,
        ]));

        studio.generate().await;

        let banners = studio.banners();
        assert_eq!(banners.len(), 3);
        let names: Vec<_> = banners.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Leaderboard / Banner", "Medium Rectangle", "Portrait"]);
        assert_eq!(
            studio.error().as_deref(),
            Some("Could not generate all banner formats. Only 3 of 5 were successful.")
        );
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_total_failure_leaves_no_banners() {
        let studio = studio_with(MockGenerator::new(AspectRatio::ALL.to_vec()));

        let outcome = studio.generate().await;

        assert_eq!(outcome, RoundOutcome::Completed { succeeded: 0, total: 5 });
        assert!(studio.banners().is_empty());
        assert_eq!(
            studio.error().as_deref(),
            Some("Could not generate all banner formats. Only 0 of 5 were successful.")
        );
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_banners_keep_their_own_format() {
        let studio = studio_with(MockGenerator::new(vec![AspectRatio::Landscape4x3]));

        studio.generate().await;

        for banner in studio.banners() {
            assert_eq!(banner.image_url, format!("mock://{}", banner.aspect_ratio));
            let format = BANNER_FORMATS
                .iter()
                .find(|f| f.aspect_ratio == banner.aspect_ratio)
                .unwrap();
            assert_eq!(banner.name, format.name);
        }
    }

    #[tokio::test]
    async fn test_blank_description_changes_nothing() {
        let studio = studio_with(MockGenerator::new(vec![AspectRatio::Square]));
        studio.generate().await;
        let banners_before = studio.banners();
        let error_before = studio.error();
        assert!(error_before.is_some());

        studio.set_description("   \n ");
        let outcome = studio.generate().await;

        assert_eq!(outcome, RoundOutcome::Skipped(SkipReason::EmptyDescription));
        assert_eq!(studio.banners(), banners_before);
        assert_eq!(studio.error(), error_before);
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_second_round_is_ignored_while_running() {
        let gate = Arc::new(Semaphore::new(0));
        let studio = Arc::new(studio_with(Arc::new(GatedGenerator {
            gate: Arc::clone(&gate),
            failing: vec![],
        })));

        let first = tokio::spawn({
            let studio = Arc::clone(&studio);
            async move { studio.generate().await }
        });
        while !studio.is_loading() {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            studio.generate().await,
            RoundOutcome::Skipped(SkipReason::AlreadyRunning)
        );
        assert!(studio.is_loading());

        gate.add_permits(5);
        let outcome = first.await.unwrap();
        assert_eq!(outcome, RoundOutcome::Completed { succeeded: 5, total: 5 });
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_selected_template_reaches_every_prompt() {
        let generator = MockGenerator::new(vec![]);
        let studio = studio_with(generator.clone());
        let template = studio.select_template("Futuristic & Techy").unwrap();

        studio.generate().await;

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        for (prompt, _) in calls.iter() {
            assert!(prompt.contains(template.prompt_fragment));
            assert!(!prompt.contains(DESIGN_TEMPLATES[0].prompt_fragment));
            assert!(prompt.contains("Noise-cancelling wireless headphones"));
        }
    }

    #[tokio::test]
    async fn test_blank_url_falls_back_to_default() {
        let generator = MockGenerator::new(vec![]);
        let studio = studio_with(generator.clone());
        studio.set_url("");

        studio.generate().await;

        let calls = generator.calls.lock().unwrap();
        assert!(calls.iter().all(|(prompt, _)| prompt.contains(DEFAULT_PRODUCT_URL)));
    }

    #[tokio::test]
    async fn test_unknown_template_is_rejected() {
        let studio = studio_with(MockGenerator::new(vec![]));
        assert!(studio.select_template("Retro Wave").is_err());
        assert_eq!(studio.selected_template().name, "Minimalist & Clean");
    }

    #[tokio::test]
    async fn test_new_round_replaces_previous_results() {
        let studio = studio_with(MockGenerator::new(vec![]));
        studio.generate().await;
        assert_eq!(studio.banners().len(), 5);

        let studio = BannerStudio {
            generator: MockGenerator::new(AspectRatio::ALL.to_vec()),
            ..studio
        };
        studio.generate().await;
        assert!(studio.banners().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_request_only_fails_its_format() {
        let studio = studio_with(Arc::new(PanickingGenerator));

        let outcome = studio.generate().await;

        assert_eq!(outcome, RoundOutcome::Completed { succeeded: 4, total: 5 });
        let banners = studio.banners();
        assert_eq!(banners.len(), 4);
        assert!(banners.iter().all(|b| b.aspect_ratio != AspectRatio::Square));
        assert_eq!(
            studio.error().as_deref(),
            Some("Could not generate all banner formats. Only 4 of 5 were successful.")
        );
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_requests_are_all_in_flight_together() {
        let studio = studio_with(Arc::new(RendezvousGenerator {
            barrier: Barrier::new(BANNER_FORMATS.len()),
        }));

        let outcome = tokio::time::timeout(Duration::from_secs(5), studio.generate())
            .await
            .expect("requests were not dispatched concurrently");

        assert_eq!(outcome, RoundOutcome::Completed { succeeded: 5, total: 5 });
    }

    #[tokio::test]
    async fn test_accepted_round_clears_previous_results_up_front() {
        let gate = Arc::new(Semaphore::new(5));
        let studio = Arc::new(studio_with(Arc::new(GatedGenerator {
            gate: Arc::clone(&gate),
            failing: vec![AspectRatio::Square],
        })));

        studio.generate().await;
        assert_eq!(studio.banners().len(), 4);
        assert!(studio.error().is_some());

        gate.acquire_many(5).await.unwrap().forget();
        let second = tokio::spawn({
            let studio = Arc::clone(&studio);
            async move { studio.generate().await }
        });
        while !studio.is_loading() {
            tokio::task::yield_now().await;
        }

        assert!(studio.banners().is_empty());
        assert_eq!(studio.error(), None);

        gate.add_permits(5);
        second.await.unwrap();
        assert_eq!(studio.banners().len(), 4);
        assert!(!studio.is_loading());
    }

    #[tokio::test]
    async fn test_mismatched_requests_fail_the_dispatch() {
        let requests = compose_requests(
            ProductInput {
                description: "Desk lamp",
                url: DEFAULT_PRODUCT_URL,
            },
            DesignTemplate::default_template(),
            &BANNER_FORMATS[..2],
        );

        let result = dispatch_round(MockGenerator::new(vec![]), &BANNER_FORMATS, requests).await;

        assert!(matches!(result, Err(BannerError::DispatchError(_))));
    }

    #[test]
    fn test_summarize_keeps_success_order() {
        let outcomes = vec![
            GenerationOutcome::Success(Banner::from_format(&BANNER_FORMATS[0], "a".into())),
            GenerationOutcome::Failure {
                format: "Medium Rectangle".into(),
                reason: "boom".into(),
            },
            GenerationOutcome::Success(Banner::from_format(&BANNER_FORMATS[2], "c".into())),
        ];

        let summary = summarize(outcomes, 3);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.banners[0].image_url, "a");
        assert_eq!(summary.banners[1].image_url, "c");
        assert_eq!(
            summary.error.as_deref(),
            Some("Could not generate all banner formats. Only 2 of 3 were successful.")
        );
    }
}
