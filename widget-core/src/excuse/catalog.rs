//! In-memory excuse catalog, the same data the excuse service starts with.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::{
    error::{FetchError, Subject},
    model::{AddExcuseReply, ExcuseRecord, NewExcuse},
};

use super::ExcuseSource;

const SEED: &[(&str, &[&str])] = &[
    (
        "forgot_event",
        &[
            "My phone calendar glitched and didn't send me any reminders.",
            "I set it in my calendar for next week by accident.",
            "I was preparing a surprise for you and got completely sidetracked.",
            "I had it written down but my notes app crashed and lost it.",
            "The notification came through but I was driving and forgot after.",
        ],
    ),
    (
        "late_home",
        &[
            "Traffic was horrible because of an accident on the highway.",
            "My boss called an emergency meeting right when I was leaving.",
            "I stopped to help someone with a flat tire.",
            "I took a detour to pick something up for us.",
            "My car wouldn't start and I had to wait for help.",
        ],
    ),
    (
        "forgot_chore",
        &[
            "I was in the middle of it when an urgent work email came through.",
            "I started, but then realized we were out of supplies.",
            "I thought we agreed you'd handle that this week.",
            "I did it but must have done it wrong, let me fix it.",
            "I got halfway through and got called away for something urgent.",
        ],
    ),
    (
        "general",
        &[
            "I was planning something special for our anniversary and got distracted.",
            "My phone died so I couldn't let you know.",
            "I thought I told you about this last week.",
            "I've been so stressed about work that it completely slipped my mind.",
            "My alarm didn't go off this morning and threw off my whole day.",
        ],
    ),
];

/// Categories keep insertion order; new categories are appended.
#[derive(Debug, Default)]
pub struct ExcuseCatalog {
    entries: Mutex<Vec<(String, Vec<String>)>>,
}

impl ExcuseCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let entries = SEED
            .iter()
            .map(|(category, excuses)| {
                (
                    category.to_string(),
                    excuses.iter().map(|e| e.to_string()).collect(),
                )
            })
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(String, Vec<String>)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pick_any(&self) -> Option<ExcuseRecord> {
        let entries = self.entries();
        let mut rng = rand::thread_rng();
        let (category, excuses) = entries
            .iter()
            .filter(|(_, excuses)| !excuses.is_empty())
            .collect::<Vec<_>>()
            .choose(&mut rng)
            .copied()?;
        let excuse = excuses.choose(&mut rng)?;
        Some(ExcuseRecord {
            category: category.clone(),
            excuse: excuse.clone(),
        })
    }

    fn pick_from(&self, category: &str) -> Option<ExcuseRecord> {
        let entries = self.entries();
        let (_, excuses) = entries.iter().find(|(name, _)| name == category)?;
        let excuse = excuses.choose(&mut rand::thread_rng())?;
        Some(ExcuseRecord {
            category: category.to_string(),
            excuse: excuse.clone(),
        })
    }

    fn insert(&self, new: &NewExcuse) {
        let mut entries = self.entries();
        match entries.iter_mut().find(|(name, _)| *name == new.category) {
            Some((_, excuses)) => excuses.push(new.excuse.clone()),
            None => entries.push((new.category.clone(), vec![new.excuse.clone()])),
        }
    }
}

#[async_trait]
impl ExcuseSource for ExcuseCatalog {
    async fn categories(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.entries().iter().map(|(name, _)| name.clone()).collect())
    }

    async fn random(&self) -> Result<ExcuseRecord, FetchError> {
        self.pick_any().ok_or(FetchError::Unavailable(Subject::Excuse))
    }

    async fn by_category(&self, category: &str) -> Result<ExcuseRecord, FetchError> {
        self.pick_from(category).ok_or(FetchError::CategoryNotFound)
    }

    async fn add(&self, excuse: &NewExcuse) -> Result<AddExcuseReply, FetchError> {
        if excuse.category.trim().is_empty() || excuse.excuse.trim().is_empty() {
            return Ok(AddExcuseReply {
                success: false,
                message: Some("Missing category or excuse".to_string()),
            });
        }

        debug!(category = %excuse.category, "adding excuse to catalog");
        self.insert(excuse);
        Ok(AddExcuseReply {
            success: true,
            message: Some("Excuse added successfully".to_string()),
        })
    }
}
