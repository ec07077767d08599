use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::{debug, error};

use crate::catalog::SymbolCatalog;
use crate::chart::{render_catalog, RenderReport, RenderTarget, SharedPage};
use crate::error::MissingElementError;
use crate::narrator::{NarrationOutcome, NarratorService};

pub fn welcome_message(name: &str) -> String {
    format!("Welcome, {name}! Enjoy your interactive phonetic chart.")
}

/// Empty or whitespace-only answers count as a cancelled prompt.
pub fn normalize_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|name| !name.is_empty())
}

#[derive(Debug)]
pub enum StartOutcome {
    Started(StartReport),
    AlreadyStarted,
}

#[derive(Debug, Default)]
pub struct StartReport {
    pub welcome: Option<String>,
    pub narration: Option<JoinHandle<NarrationOutcome>>,
    pub render: RenderReport,
    pub missing: Vec<MissingElementError>,
}

/// Runs the start flow: welcome, hide the start control, render the chart.
pub struct SessionBootstrap {
    page: SharedPage,
    catalog: Arc<SymbolCatalog>,
    narrator: NarratorService,
    started: AtomicBool,
}

impl SessionBootstrap {
    pub fn new(page: SharedPage, catalog: Arc<SymbolCatalog>, narrator: NarratorService) -> Self {
        Self {
            page,
            catalog,
            narrator,
            started: AtomicBool::new(false),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// `name` is the prompt answer; `None` means the prompt was cancelled.
    /// Only the first call has any effect.
    pub fn start(&self, name: Option<&str>) -> StartOutcome {
        if self.started.swap(true, Ordering::AcqRel) {
            debug!("session already started; ignoring start request");
            return StartOutcome::AlreadyStarted;
        }
        debug!(name = ?name, "user entered name");

        let mut report = StartReport::default();
        let mut page = self.page.lock();

        if let Some(name) = normalize_name(name) {
            let message = welcome_message(name);
            page.prepend_heading(message.clone());
            debug!(name, "welcome message displayed");
            report.narration = match self.narrator.speak_in_background(message.clone()) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    error!(error = %err, "failed to spawn narration thread");
                    None
                }
            };
            report.welcome = Some(message);
        }

        match page.hide_start_control() {
            Ok(()) => debug!("start button hidden"),
            Err(err) => {
                error!(error = %err, "start button not found");
                report.missing.push(err);
            }
        }

        report.render = render_catalog(&self.catalog, &mut *page);
        report.missing.extend(report.render.missing.iter().cloned());
        StartOutcome::Started(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_treated_as_cancelled() {
        assert_eq!(normalize_name(None), None);
        assert_eq!(normalize_name(Some("   ")), None);
        assert_eq!(normalize_name(Some(" Ada ")), Some("Ada"));
    }

    #[test]
    fn welcome_text() {
        assert_eq!(
            welcome_message("Ada"),
            "Welcome, Ada! Enjoy your interactive phonetic chart."
        );
    }
}
