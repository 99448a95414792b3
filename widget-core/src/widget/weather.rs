//! Weather widget: city search, location search, default city on open.

use std::cell::RefCell;

use tracing::debug;

use crate::{
    error::{FetchError, GeoError},
    geo::Geolocator,
    input,
    model::{WeatherRecord, WeatherRequest},
    provider::WeatherSource,
    render::{View, render_weather},
    state::{Cycle, CycleStats, Ticket, UiState},
};

/// One weather widget instance. Triggers may overlap; the newest one wins.
#[derive(Debug)]
pub struct WeatherWidget {
    source: Box<dyn WeatherSource>,
    geolocator: Box<dyn Geolocator>,
    cycle: RefCell<Cycle<WeatherRecord>>,
}

impl WeatherWidget {
    pub fn new(source: Box<dyn WeatherSource>, geolocator: Box<dyn Geolocator>) -> Self {
        Self {
            source,
            geolocator,
            cycle: RefCell::new(Cycle::new()),
        }
    }

    /// Initial load when the widget opens with no query.
    pub async fn open(&self, default_city: &str) -> UiState<WeatherRecord> {
        debug!(default_city, "opening weather widget");
        self.search(default_city).await
    }

    /// Search button / Enter key. Blank input never reaches the source.
    pub async fn search(&self, raw: &str) -> UiState<WeatherRecord> {
        match input::city_query(raw) {
            Ok(city) => self.fetch(WeatherRequest::City(city)).await,
            Err(err) => {
                debug!(%err, "rejecting weather search");
                self.cycle.borrow_mut().reject(err);
                self.state()
            }
        }
    }

    /// Location button.
    pub async fn locate(&self) -> UiState<WeatherRecord> {
        if !self.geolocator.is_supported() {
            self.cycle.borrow_mut().reject(GeoError::NotSupported);
            return self.state();
        }

        let ticket = self.cycle.borrow_mut().begin();
        let outcome = match self.geolocator.current_position().await {
            Ok(at) => {
                self.source
                    .get_weather(&WeatherRequest::Coordinates(at))
                    .await
            }
            Err(err) => Err(FetchError::from(err)),
        };
        self.settle(ticket, outcome)
    }

    async fn fetch(&self, request: WeatherRequest) -> UiState<WeatherRecord> {
        let ticket = self.cycle.borrow_mut().begin();
        let outcome = self.source.get_weather(&request).await;
        self.settle(ticket, outcome)
    }

    fn settle(
        &self,
        ticket: Ticket,
        outcome: Result<WeatherRecord, FetchError>,
    ) -> UiState<WeatherRecord> {
        if !self.cycle.borrow_mut().settle(ticket, outcome) {
            debug!(?ticket, "dropping superseded weather response");
        }
        self.state()
    }

    pub fn state(&self) -> UiState<WeatherRecord> {
        self.cycle.borrow().state().clone()
    }

    pub fn stats(&self) -> CycleStats {
        self.cycle.borrow().stats()
    }

    pub fn view(&self) -> View {
        render_weather(self.cycle.borrow().state())
    }
}
