pub mod components;
pub mod screens;

use std::sync::Arc;

use eframe::NativeOptions;

use crate::audio::RodioPlayer;
use crate::catalog::SymbolCatalog;
use crate::chart::ChartPage;
use crate::config::AppConfig;
use crate::error::UiError;
use crate::narrator::{default_engine, NarratorService};
use crate::sequencer::FollowAlongSequencer;
use crate::session::SessionBootstrap;

use components::alert::AlertQueue;
use screens::chart::ChartApp;

pub const WINDOW_TITLE: &str = "Interactive Phonetic Chart";

pub fn launch_ui(config: &AppConfig, catalog: SymbolCatalog) -> Result<(), UiError> {
    let page = ChartPage::new().into_shared();
    let alerts = Arc::new(AlertQueue::new());
    let player = Arc::new(RodioPlayer::new(&config.assets_root));
    let sequencer = FollowAlongSequencer::new(page.clone(), player, alerts.clone())
        .with_pause(config.pause);
    let narrator = NarratorService::new(default_engine(), config.narrator);
    let bootstrap = SessionBootstrap::new(page.clone(), Arc::new(catalog), narrator);
    let app = ChartApp::new(page, sequencer, bootstrap, alerts);

    eframe::run_native(
        WINDOW_TITLE,
        NativeOptions::default(),
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| UiError(err.to_string()))
}
