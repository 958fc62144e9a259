//! Orchestrates location lookup, forecast fetch, rendering and overlay.
//!
//! A lookup moves the dashboard from `Idle`/`Displayed`/`Failed` into
//! `Loading`, then into `Displayed` or `Failed`. Session state is owned here
//! and only changed through `&mut self`.
//!
//! Each lookup is issued a [`LookupTicket`]. Only the most recently issued
//! ticket may commit, so a slow response from an earlier search can never
//! overwrite the result of a later one.

use anyhow::Context;
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::LookupError,
    forecast::ForecastFetcher,
    model::{Coordinate, Forecast, OverlayMode, OverlaySample, ResolvedLocation},
    overlay,
    provider::{DeviceLocator, Geocoder, WeatherSource, open_meteo::OpenMeteo},
    resolver::{self, LocationResolver},
    view::{self, RenderSink},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    Loading,
    Displayed,
    Failed,
}

/// Everything the dashboard currently shows.
#[derive(Debug, Clone)]
pub struct Session {
    pub center: Coordinate,
    pub location: Option<ResolvedLocation>,
    pub forecast: Option<Forecast>,
    pub mode: OverlayMode,
    pub samples: Vec<OverlaySample>,
}

/// What a lookup starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    /// Free-text search; geocoded forward.
    Name(String),
    /// Device position; geocoded in reverse, soft-failing to an unnamed location.
    Coordinate(Coordinate),
    /// Already-resolved location; skips geocoding.
    Preset(ResolvedLocation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub location: ResolvedLocation,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer lookup was issued after this one; the result was dropped.
    Discarded,
}

/// The network half of a lookup. Holds no session state, so it can be
/// cloned and driven independently of the dashboard.
#[derive(Debug, Clone)]
pub struct Pipeline {
    resolver: LocationResolver,
    fetcher: ForecastFetcher,
    timeout: Duration,
}

impl Pipeline {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        source: Arc<dyn WeatherSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            fetcher: ForecastFetcher::new(source),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the location, then fetch its forecast. Strictly sequential.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Lookup, LookupError> {
        let location = match request {
            LookupRequest::Name(query) => {
                with_timeout(self.timeout, self.resolver.by_name(query)).await?
            }
            LookupRequest::Coordinate(coordinate) => {
                match tokio::time::timeout(self.timeout, self.resolver.by_coordinate(*coordinate))
                    .await
                {
                    Ok(location) => location,
                    Err(_) => {
                        warn!("reverse geocoding for {coordinate} timed out");
                        resolver::fallback_location(*coordinate)
                    }
                }
            }
            LookupRequest::Preset(location) => location.clone(),
        };

        let forecast = with_timeout(self.timeout, self.fetcher.fetch(location.coordinate)).await?;

        Ok(Lookup { location, forecast })
    }
}

async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    tokio::time::timeout(limit, fut).await.map_err(|_| LookupError::NetworkTimeout)?
}

#[derive(Debug)]
pub struct Dashboard<S: RenderSink> {
    pipeline: Pipeline,
    sink: S,
    session: Session,
    state: DashboardState,
    default_location: ResolvedLocation,
    issued: u64,
    rng: StdRng,
}

impl<S: RenderSink> Dashboard<S> {
    pub fn new(
        pipeline: Pipeline,
        sink: S,
        default_location: ResolvedLocation,
        mode: OverlayMode,
    ) -> Self {
        let session = Session {
            center: default_location.coordinate,
            location: None,
            forecast: None,
            mode,
            samples: Vec::new(),
        };

        Self {
            pipeline,
            sink,
            session,
            state: DashboardState::Idle,
            default_location,
            issued: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Dashboard backed by Open-Meteo, using the configured endpoints and defaults.
    pub fn from_config(config: &Config, sink: S) -> anyhow::Result<Self> {
        let client =
            Arc::new(OpenMeteo::from_config(config).context("Failed to create HTTP client")?);
        let pipeline = Pipeline::new(client.clone(), client, config.timeout());
        let default_location = config.default_location.resolve()?;

        Ok(Self::new(pipeline, sink, default_location, config.default_mode))
    }

    /// Replace the overlay random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// First lookup at startup, using the default location without geocoding.
    pub async fn start(&mut self) -> Result<(), LookupError> {
        let request = LookupRequest::Preset(self.default_location.clone());
        self.run(request).await
    }

    /// Search by city name. Blank input fails before entering `Loading`.
    pub async fn submit(&mut self, query: &str) -> Result<(), LookupError> {
        let query = match resolver::validate_query(query) {
            Ok(q) => q.to_string(),
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };

        self.run(LookupRequest::Name(query)).await
    }

    /// Look up the weather wherever the device reports itself to be.
    pub async fn locate(&mut self, locator: &dyn DeviceLocator) -> Result<(), LookupError> {
        let located = match tokio::time::timeout(self.pipeline.timeout, locator.locate()).await {
            Ok(Ok(coordinate)) => Ok(coordinate),
            Ok(Err(err @ LookupError::GeolocationUnavailable(_))) => Err(err),
            Ok(Err(other)) => Err(LookupError::GeolocationUnavailable(other.to_string())),
            Err(_) => Err(LookupError::GeolocationUnavailable("timed out".to_string())),
        };

        match located {
            Ok(coordinate) => self.run(LookupRequest::Coordinate(coordinate)).await,
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Switch overlay mode. Never refetches; only the samples are redrawn.
    pub fn set_mode(&mut self, mode: OverlayMode) {
        info!("overlay mode {} -> {}", self.session.mode, mode);
        self.session.mode = mode;
        self.regenerate_overlay();

        if self.state == DashboardState::Failed {
            self.state = DashboardState::Displayed;
        }
    }

    /// Enter `Loading` and issue a ticket for a new lookup.
    pub fn begin(&mut self) -> LookupTicket {
        self.issued += 1;
        self.state = DashboardState::Loading;
        self.sink.loading();
        LookupTicket(self.issued)
    }

    /// Apply the result of the lookup identified by `ticket`, unless a newer
    /// lookup has been issued since.
    pub fn finish(
        &mut self,
        ticket: LookupTicket,
        result: Result<Lookup, LookupError>,
    ) -> Result<Commit, LookupError> {
        if ticket.0 != self.issued {
            debug!("discarding stale lookup #{} (latest is #{})", ticket.0, self.issued);
            return Ok(Commit::Discarded);
        }

        match result {
            Ok(lookup) => {
                self.commit(lookup);
                Ok(Commit::Applied)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    async fn run(&mut self, request: LookupRequest) -> Result<(), LookupError> {
        let ticket = self.begin();
        let result = self.pipeline.lookup(&request).await;
        self.finish(ticket, result).map(|_| ())
    }

    fn commit(&mut self, lookup: Lookup) {
        let Lookup { location, forecast } = lookup;
        info!("showing weather for {}", location.display_name());

        self.sink.summary(&view::summary_view(&location, &forecast));
        self.sink.forecast(&view::forecast_cards(&forecast.daily));

        self.session.center = location.coordinate;
        self.session.location = Some(location);
        self.session.forecast = Some(forecast);
        self.state = DashboardState::Displayed;

        self.regenerate_overlay();
    }

    /// Only the summary region shows the error; forecast cards stay as they were.
    fn fail(&mut self, err: &LookupError) {
        error!("weather lookup failed: {err}");
        self.state = DashboardState::Failed;
        self.sink.error(err.user_message());
    }

    fn regenerate_overlay(&mut self) {
        let samples = overlay::sample(&mut self.rng, self.session.center, self.session.mode);
        let view = view::overlay_view(self.session.mode, self.session.center, &samples);
        self.sink.overlay(&view);
        self.session.samples = samples;
    }
}
