//! Reflow engine: the page-load state machine.
//!
//! This is the Rust model of what `fixup.js` does in the browser, and what
//! `--prerender` runs offline.
//!
//! ```text
//!            on_ready                         confirm
//!   Idle ──────────────▶ Gate (slow tier) ──────────────▶ Running ──▶ Done
//!     └──────────────────────────────────────────────────▶┘
//!                       (standard tier)
//! ```
//!
//! Entering Running wraps the body's content into a hidden container and
//! queues two tasks:
//!
//! 1. [`Task::ShowIndicator`] puts the "please wait" overlay on screen;
//! 2. [`Task::Reflow`] detaches the container, runs the pass pipeline on it,
//!    reattaches it and removes the overlay.
//!
//! The host renders between the two, so the overlay is visible while the
//! mutation batch runs. Rewriting a detached subtree is far cheaper than
//! rewriting the live one on slow hosts.

mod scheduler;

pub use scheduler::{Host, NoopHost, Scheduler};

use std::time::Instant;

use tracing::{debug, info};

use crate::config::{ReflowConfig, Tier};
use crate::dom::{ArenaDom, NodeId};
use crate::error::{Error, Result};
use crate::reflow::Pipeline;

/// Id of the container the body's content is wrapped into.
pub const CONTENT_ID: &str = "content";

pub const WAIT_MESSAGE: &str = "Adjusting book styling, please wait ...";

pub const GATE_BUTTON: &str = "Fix layout";

pub const GATE_WARNING: &str = " Warning, it might take about 10-20 seconds to re-render \
    the page in this browser. If possible, use another browser to read this book";

const OVERLAY_STYLE: &str =
    "position:absolute; padding:1em; font-size:2em; font-style:italic; top: 0em; z-index: 999;";

const HIDDEN: &str = "display:none";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// The document is not ready yet.
    Idle,
    /// Waiting for the reader to accept the slow reflow.
    Gate { banner: NodeId },
    /// Tasks are queued or running.
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ShowIndicator,
    Reflow,
}

pub struct Engine {
    tier: Tier,
    pipeline: Pipeline,
    state: EngineState,
    scheduler: Scheduler<Task>,
    container: NodeId,
    overlay: NodeId,
}

impl Engine {
    pub fn new(tier: Tier, pipeline: Pipeline) -> Self {
        Self {
            tier,
            pipeline,
            state: EngineState::Idle,
            scheduler: Scheduler::new(),
            container: NodeId::NONE,
            overlay: NodeId::NONE,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The content container, once Running has been entered.
    pub fn container(&self) -> Option<NodeId> {
        self.container.is_some().then_some(self.container)
    }

    /// Document-ready handler. Only the first call has an effect.
    pub fn on_ready(&mut self, dom: &mut ArenaDom) -> Result<()> {
        if self.state != EngineState::Idle {
            return Ok(());
        }
        match self.tier {
            Tier::Slow => self.show_gate(dom),
            Tier::Standard => self.start_run(dom),
        }
    }

    /// The reader pressed the gate's button.
    pub fn confirm(&mut self, dom: &mut ArenaDom) -> Result<()> {
        let EngineState::Gate { banner } = self.state else {
            return Ok(());
        };
        dom.detach(banner);
        self.start_run(dom)
    }

    /// Run queued tasks until none are left, rendering after each one.
    pub fn run_until_idle(&mut self, dom: &mut ArenaDom, host: &mut dyn Host) -> Result<()> {
        while let Some(task) = self.scheduler.next_task() {
            self.execute(task, dom)?;
            host.render(dom);
        }
        Ok(())
    }

    fn show_gate(&mut self, dom: &mut ArenaDom) -> Result<()> {
        let body = dom.body().ok_or(Error::MissingElement("body"))?;

        let banner = dom.create_html_element("div", &[]);
        let button = dom.create_html_element("input", &[("type", "button"), ("value", GATE_BUTTON)]);
        let label = dom.create_html_element("em", &[]);
        dom.append_text(label, GATE_WARNING);
        dom.append(banner, button);
        dom.append(banner, label);
        dom.prepend(body, banner);
        dom.remove_attr(body, "style");

        debug!("waiting for reader to confirm reflow");
        self.state = EngineState::Gate { banner };
        Ok(())
    }

    fn start_run(&mut self, dom: &mut ArenaDom) -> Result<()> {
        let body = dom.body().ok_or(Error::MissingElement("body"))?;

        let elements: Vec<_> = dom.children(body).filter(|&c| dom.is_element(c)).collect();
        let container =
            dom.create_html_element("div", &[("id", CONTENT_ID), ("style", HIDDEN)]);
        match elements.first() {
            Some(&first) => dom.insert_before(first, container),
            None => dom.append(body, container),
        }
        for element in elements {
            dom.append(container, element);
        }
        dom.remove_attr(body, "style");

        self.container = container;
        self.scheduler.schedule(Task::ShowIndicator);
        self.scheduler.schedule(Task::Reflow);
        self.state = EngineState::Running;
        Ok(())
    }

    fn execute(&mut self, task: Task, dom: &mut ArenaDom) -> Result<()> {
        let body = dom.body().ok_or(Error::MissingElement("body"))?;
        match task {
            Task::ShowIndicator => {
                let overlay = dom.create_html_element("div", &[("style", OVERLAY_STYLE)]);
                dom.append_text(overlay, WAIT_MESSAGE);
                dom.append(body, overlay);
                self.overlay = overlay;
            }
            Task::Reflow => {
                let started = Instant::now();
                let container = self.container;

                dom.detach(container);
                let changed = self.pipeline.run(dom, container);
                dom.append(body, container);

                dom.detach(self.overlay);
                self.overlay = NodeId::NONE;
                dom.remove_attr(container, "style");

                info!(
                    changed,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "reflowed book layout"
                );
                self.state = EngineState::Done;
            }
        }
        Ok(())
    }
}

/// Run the engine to completion on the standard tier, for static output.
pub fn prerender(dom: &mut ArenaDom, config: &ReflowConfig) -> Result<()> {
    let mut engine = Engine::new(Tier::Standard, Pipeline::standard(config)?);
    engine.on_ready(dom)?;
    engine.run_until_idle(dom, &mut NoopHost)
}
