//! Excuse widget: category buttons, random/category excuses, add form.

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::{
    error::{FetchError, ValidationError, WidgetError},
    excuse::ExcuseSource,
    input,
    model::{ExcuseRecord, NewExcuse},
    render::{View, render_categories, render_excuse, render_status},
    state::{Cycle, CycleStats, Ticket, UiState},
    status::StatusReporter,
};

const ADDED: &str = "Excuse added successfully!";
const NOT_ADDED: &str = "Error adding excuse";

#[derive(Debug)]
pub struct ExcuseWidget {
    source: Box<dyn ExcuseSource>,
    status: StatusReporter,
    cycle: RefCell<Cycle<ExcuseRecord>>,
    categories: RefCell<Vec<String>>,
}

impl ExcuseWidget {
    pub fn new(source: Box<dyn ExcuseSource>, status: StatusReporter) -> Self {
        Self {
            source,
            status,
            cycle: RefCell::new(Cycle::new()),
            categories: RefCell::new(Vec::new()),
        }
    }

    /// Refresh the category buttons. A failed refresh keeps the previous list.
    pub async fn load_categories(&self) -> Vec<String> {
        match self.source.categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "loaded excuse categories");
                *self.categories.borrow_mut() = categories;
            }
            Err(err) => warn!(%err, "could not load excuse categories"),
        }
        self.categories()
    }

    pub async fn random(&self) -> UiState<ExcuseRecord> {
        let ticket = self.cycle.borrow_mut().begin();
        let outcome = self.source.random().await;
        self.settle(ticket, outcome)
    }

    /// Category button. Accepts either a key or its display label.
    pub async fn pick(&self, category: &str) -> UiState<ExcuseRecord> {
        let key = input::category_key(category);
        if key.is_empty() {
            self.cycle.borrow_mut().reject(ValidationError::EmptyCategory);
            return self.state();
        }

        let ticket = self.cycle.borrow_mut().begin();
        let outcome = self.source.by_category(&key).await;
        self.settle(ticket, outcome)
    }

    /// Add form. Every outcome is also reported through the status line.
    pub async fn add(&self, category: &str, excuse: &str) -> Result<NewExcuse, WidgetError> {
        let new = input::new_excuse(category, excuse).inspect_err(|err| {
            self.status.error(err.to_string());
        })?;

        match self.source.add(&new).await {
            Ok(reply) if reply.success => {
                self.status.success(ADDED);
                self.load_categories().await;
                Ok(new)
            }
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| NOT_ADDED.to_string());
                self.status.error(message.as_str());
                Err(FetchError::Rejected(message).into())
            }
            Err(err) => {
                self.status.error(err.to_string());
                Err(err.into())
            }
        }
    }

    fn settle(
        &self,
        ticket: Ticket,
        outcome: Result<ExcuseRecord, FetchError>,
    ) -> UiState<ExcuseRecord> {
        if !self.cycle.borrow_mut().settle(ticket, outcome) {
            debug!(?ticket, "dropping superseded excuse response");
        }
        self.state()
    }

    pub fn state(&self) -> UiState<ExcuseRecord> {
        self.cycle.borrow().state().clone()
    }

    pub fn stats(&self) -> CycleStats {
        self.cycle.borrow().stats()
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.borrow().clone()
    }

    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    pub fn view(&self) -> View {
        render_excuse(self.cycle.borrow().state())
    }

    pub fn categories_view(&self) -> View {
        render_categories(&self.categories.borrow())
    }

    pub fn status_view(&self) -> View {
        render_status(self.status.current().as_ref())
    }
}
