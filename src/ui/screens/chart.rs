use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use eframe::egui;
use tracing::{debug, error};

use crate::chart::{ChartElement, ContainerId, ElementId, RenderTarget, SharedPage};
use crate::narrator::NarrationOutcome;
use crate::sequencer::FollowAlongSequencer;
use crate::session::{SessionBootstrap, StartOutcome};
use crate::ui::components::alert::AlertQueue;
use crate::ui::components::follow_along::FollowAlongPanel;
use crate::ui::components::name_prompt::{NamePrompt, PromptAnswer};
use crate::ui::components::symbol_grid::SymbolGrid;

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChartApp {
    page: SharedPage,
    sequencer: FollowAlongSequencer,
    bootstrap: SessionBootstrap,
    alerts: Arc<AlertQueue>,
    prompt: NamePrompt,
    narration: Option<JoinHandle<NarrationOutcome>>,
}

/// Copy of the page taken once per frame so no lock is held while drawing.
#[derive(Default)]
struct PageView {
    headings: Vec<String>,
    start_visible: bool,
    vowels: Option<Vec<ChartElement>>,
    consonants: Option<Vec<ChartElement>>,
    follow_along: Vec<ChartElement>,
}

impl ChartApp {
    pub fn new(
        page: SharedPage,
        sequencer: FollowAlongSequencer,
        bootstrap: SessionBootstrap,
        alerts: Arc<AlertQueue>,
    ) -> Self {
        Self {
            page,
            sequencer,
            bootstrap,
            alerts,
            prompt: NamePrompt::default(),
            narration: None,
        }
    }

    fn snapshot(&self) -> PageView {
        let page = self.page.lock();
        let children = |id: ContainerId| page.children(id).ok().map(<[ChartElement]>::to_vec);
        PageView {
            headings: page.headings().to_vec(),
            start_visible: page.start_visible(),
            vowels: children(ContainerId::Vowels),
            consonants: children(ContainerId::Consonants),
            follow_along: page.follow_along(),
        }
    }

    fn show_header(&mut self, ctx: &egui::Context, view: &PageView) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            for heading in &view.headings {
                ui.heading(heading);
            }
            if view.start_visible && !self.prompt.is_open() && ui.button("Start").clicked() {
                self.prompt.open();
            }
        });
    }

    fn show_follow_along(&mut self, ctx: &egui::Context, view: &PageView) {
        egui::TopBottomPanel::bottom("follow_along").show(ctx, |ui| {
            let output = FollowAlongPanel {
                entries: &view.follow_along,
                is_replaying: self.sequencer.is_replaying(),
            }
            .show(ui);
            if output.clear {
                self.sequencer.clear();
            }
            if output.replay {
                if let Err(err) = self.sequencer.spawn_replay() {
                    error!(error = %err, "failed to spawn replay thread");
                }
            }
        });
    }

    fn show_chart(&mut self, ctx: &egui::Context, view: &PageView) {
        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let groups = [
                ("Vowel Sounds", &view.vowels),
                ("Consonant Sounds", &view.consonants),
            ];
            for (title, elements) in groups {
                if let Some(elements) = elements {
                    clicked = clicked.or(SymbolGrid { title, elements }.show(ui));
                    ui.separator();
                }
            }
        });
        if let Some(id) = clicked {
            self.activate(id);
        }
    }

    fn activate(&self, id: ElementId) {
        if let Err(err) = self.sequencer.spawn_activation(id) {
            error!(error = %err, "failed to spawn playback thread");
        }
    }

    fn handle_prompt(&mut self, ctx: &egui::Context) {
        let name = match self.prompt.show(ctx) {
            Some(PromptAnswer::Submitted(name)) => Some(name),
            Some(PromptAnswer::Cancelled) => None,
            None => return,
        };
        if let StartOutcome::Started(report) = self.bootstrap.start(name.as_deref()) {
            debug!(
                rendered = report.render.rendered,
                missing = report.missing.len(),
                "session started"
            );
            self.narration = report.narration;
        }
    }

    fn poll_narration(&mut self) {
        if self
            .narration
            .as_ref()
            .is_some_and(|handle| handle.is_finished())
        {
            if let Some(handle) = self.narration.take() {
                match handle.join() {
                    Ok(outcome) => debug!(?outcome, "narration finished"),
                    Err(_) => error!("narration thread panicked"),
                }
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_narration();
        let view = self.snapshot();
        self.show_header(ctx, &view);
        self.show_follow_along(ctx, &view);
        self.show_chart(ctx, &view);
        self.handle_prompt(ctx);
        self.alerts.show(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
