//! The scrolling dashboard page
//!
//! The page is a vertical stack: hero banner, one bordered panel per chart,
//! footer. Each panel owns a [`ScrollTrigger`] and starts animating the first
//! time enough of it scrolls into the viewport. Blocks are drawn into an
//! off-screen buffer and the visible rows copied into the frame, so partially
//! scrolled panels render the same as fully visible ones.

pub mod data;
pub mod hero;

use std::time::Duration;

use complyviz_core::animation::{
    intersection_ratio, Easing, FrameLoop, LayoutRect, ScrollTrigger, Sequencer, StageSpec, VisibilityDetector,
};
use complyviz_core::{AnimationConfig, Result};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use tracing::debug;

use self::data::{Comparison, Milestone, RiskMatrix, Score};
use self::hero::Hero;
use crate::theme::Theme;
use crate::widgets::{
    BeforeAfter, Footer, GaugeRow, HeroBanner, IncidentTimeline, MaturityRadar, RiskHeatmap,
    ScoreBars, FOOTER_HEIGHT,
};

pub const HERO_HEIGHT: u16 = 9;
const PANEL_GAP: u16 = 1;
const HEAT_CELL_DURATION: Duration = Duration::from_millis(120);
const HEAT_CELL_STAGGER: Duration = Duration::from_millis(35);
const MILESTONE_DURATION: Duration = Duration::from_millis(400);
const MILESTONE_GAP: Duration = Duration::from_millis(150);
const BEFORE_DURATION: Duration = Duration::from_millis(1000);
const AFTER_DURATION: Duration = Duration::from_millis(800);
const HANDOFF_GAP: Duration = Duration::from_millis(300);

/// What a panel shows
#[derive(Debug, Clone)]
pub enum PanelKind {
    Frameworks(Vec<Score>),
    Controls(Vec<Score>),
    Risk(RiskMatrix),
    Maturity(Vec<Score>),
    Incident(Vec<Milestone>),
    Response(Comparison),
}

impl PanelKind {
    /// Rows inside the border
    fn content_height(&self) -> u16 {
        match self {
            PanelKind::Frameworks(items) => ScoreBars::height_for(items.len()),
            PanelKind::Controls(_) => 8,
            PanelKind::Risk(matrix) => matrix.rows.len() as u16 + 1,
            PanelKind::Maturity(_) => 16,
            PanelKind::Incident(steps) => (steps.len() as u16 * 2).saturating_sub(1),
            PanelKind::Response(_) => 5,
        }
    }

    fn sequencer(&self, config: &AnimationConfig) -> Result<Sequencer> {
        let scores = |items: &[Score]| items.iter().map(|s| s.value).collect::<Vec<_>>();
        match self {
            PanelKind::Frameworks(items) => Sequencer::single(
                StageSpec::new("scores", scores(items), config.duration())
                    .with_stagger(config.stagger())
                    .with_easing(config.easing),
            ),
            PanelKind::Controls(items) => Sequencer::single(
                StageSpec::new("coverage", scores(items), config.duration())
                    .with_stagger(config.stagger())
                    .with_easing(config.easing),
            ),
            PanelKind::Risk(matrix) => Sequencer::single(
                StageSpec::new("cells", vec![1.0; matrix.cell_count()], HEAT_CELL_DURATION)
                    .with_stagger(HEAT_CELL_STAGGER)
                    .with_easing(Easing::Linear),
            ),
            PanelKind::Maturity(axes) => Sequencer::single(
                StageSpec::new("maturity", scores(axes), config.duration()).with_easing(config.easing),
            ),
            PanelKind::Incident(steps) => Sequencer::new(
                steps
                    .iter()
                    .map(|step| {
                        StageSpec::new(step.title.clone(), vec![1.0], MILESTONE_DURATION)
                            .with_easing(Easing::Linear)
                            .after_gap(MILESTONE_GAP)
                    })
                    .collect(),
            ),
            PanelKind::Response(comparison) => Sequencer::new(vec![
                StageSpec::new("before", vec![comparison.before], BEFORE_DURATION)
                    .with_easing(config.easing),
                StageSpec::new("after", vec![comparison.after], AFTER_DURATION)
                    .with_easing(config.easing)
                    .after_gap(HANDOFF_GAP),
            ]),
        }
    }
}

/// One bordered, scroll-triggered chart
#[derive(Debug)]
pub struct Panel {
    id: &'static str,
    title: String,
    kind: PanelKind,
    trigger: ScrollTrigger,
}

impl Panel {
    pub fn new(
        id: &'static str,
        title: impl Into<String>,
        kind: PanelKind,
        config: &AnimationConfig,
    ) -> Result<Self> {
        let sequencer = kind.sequencer(config)?;
        let detector = VisibilityDetector::from_config(config)?;
        Ok(Self {
            id,
            title: title.into(),
            kind,
            trigger: ScrollTrigger::new(detector, sequencer),
        })
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &PanelKind {
        &self.kind
    }

    /// Total rows including border
    pub fn height(&self) -> u16 {
        self.kind.content_height() + 2
    }

    pub fn trigger(&self) -> &ScrollTrigger {
        &self.trigger
    }

    /// Start from scratch right now, regardless of visibility
    pub fn start(&mut self, now: Duration, frames: &mut FrameLoop) {
        self.trigger.trigger(now, frames);
    }

    /// Restart a panel that has already been seen
    pub fn replay(&mut self, now: Duration, frames: &mut FrameLoop) -> bool {
        if !self.trigger.is_visible() {
            return false;
        }
        self.trigger.trigger(now, frames);
        true
    }

    /// Live values of every stage, flattened in stage order
    pub fn live_values(&self) -> Vec<f64> {
        let sequencer = self.trigger.sequencer();
        (0..sequencer.stage_count())
            .flat_map(|stage| sequencer.values(stage).to_vec())
            .collect()
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let border = if self.trigger.is_animating() {
            theme.accent
        } else {
            theme.grey0
        };
        let block = Block::default()
            .title(Line::from(vec![Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            )]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        block.render(area, buf);

        let inner = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(2), inner.height);
        let sequencer = self.trigger.sequencer();
        match &self.kind {
            PanelKind::Frameworks(items) => {
                ScoreBars::new(items, sequencer.values(0), theme).render(inner, buf)
            }
            PanelKind::Controls(items) => {
                GaugeRow::new(items, sequencer.values(0), theme).render(inner, buf)
            }
            PanelKind::Risk(matrix) => {
                RiskHeatmap::new(matrix, sequencer.values(0), theme).render(inner, buf)
            }
            PanelKind::Maturity(axes) => {
                MaturityRadar::new(axes, sequencer.values(0), theme).render(inner, buf)
            }
            PanelKind::Incident(steps) => {
                let progress: Vec<f64> = (0..steps.len())
                    .map(|stage| sequencer.value(stage, 0).unwrap_or(0.0))
                    .collect();
                IncidentTimeline::new(steps, &progress, theme).render(inner, buf)
            }
            PanelKind::Response(comparison) => {
                let before = sequencer.value(0, 0).unwrap_or(0.0);
                let after = sequencer
                    .stage_started_at(1)
                    .and_then(|_| sequencer.value(1, 0));
                BeforeAfter::new(comparison, before, after, sequencer.is_done(), theme)
                    .render(inner, buf)
            }
        }
    }
}

/// A vertical slice of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Panel(usize),
    Footer,
}

/// Placement of one block in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub section: Section,
    pub y: u16,
    pub height: u16,
}

#[derive(Debug)]
pub struct Dashboard {
    panels: Vec<Panel>,
    hero: Hero,
}

impl Dashboard {
    /// Dashboard filled with the built-in demo data
    pub fn demo(config: &AnimationConfig) -> Result<Self> {
        let panels = vec![
            Panel::new(
                "frameworks",
                "Framework readiness",
                PanelKind::Frameworks(data::framework_scores()),
                config,
            )?,
            Panel::new(
                "controls",
                "Control coverage",
                PanelKind::Controls(data::control_coverage()),
                config,
            )?,
            Panel::new("risk", "Risk heat map", PanelKind::Risk(data::risk_matrix()), config)?,
            Panel::new(
                "maturity",
                "Security maturity",
                PanelKind::Maturity(data::maturity_axes()),
                config,
            )?,
            Panel::new(
                "incident",
                "Incident timeline",
                PanelKind::Incident(data::breach_timeline()),
                config,
            )?,
            Panel::new(
                "response",
                "Reporting time",
                PanelKind::Response(data::incident_response()),
                config,
            )?,
        ];
        Ok(Self {
            panels,
            hero: Hero::new(),
        })
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn panel_ids(&self) -> Vec<&'static str> {
        self.panels.iter().map(|p| p.id).collect()
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    /// Page layout, top to bottom
    pub fn placements(&self) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(self.panels.len() + 2);
        placements.push(Placement {
            section: Section::Hero,
            y: 0,
            height: HERO_HEIGHT,
        });
        let mut y = HERO_HEIGHT + PANEL_GAP;
        for (index, panel) in self.panels.iter().enumerate() {
            placements.push(Placement {
                section: Section::Panel(index),
                y,
                height: panel.height(),
            });
            y += panel.height() + PANEL_GAP;
        }
        placements.push(Placement {
            section: Section::Footer,
            y,
            height: FOOTER_HEIGHT,
        });
        placements
    }

    pub fn page_height(&self) -> u16 {
        self.placements()
            .last()
            .map(|p| p.y + p.height)
            .unwrap_or(0)
    }

    /// Feed the current layout to every panel; returns how many started
    pub fn observe(
        &mut self,
        scroll: u16,
        viewport: (u16, u16),
        now: Duration,
        frames: &mut FrameLoop,
    ) -> usize {
        let (width, height) = viewport;
        let view = LayoutRect::new(0, i32::from(scroll), i32::from(width), i32::from(height));
        let mut started = 0;

        for placement in self.placements() {
            let rect = LayoutRect::new(
                0,
                i32::from(placement.y),
                i32::from(width),
                i32::from(placement.height),
            );
            match placement.section {
                Section::Hero => {
                    let visible = intersection_ratio(&rect, &view) > 0.0;
                    self.hero.sync(visible, frames);
                }
                Section::Panel(index) => {
                    let panel = &mut self.panels[index];
                    if panel.trigger.observe(Some(rect), view, now, frames) {
                        debug!(panel = panel.id, "Panel scrolled into view");
                        started += 1;
                    }
                }
                Section::Footer => {}
            }
        }
        started
    }

    /// Per-frame work outside the frame loop
    pub fn drift(&mut self, now: Duration) {
        self.hero.drift(now);
    }

    /// Replay every panel already revealed; returns how many restarted
    pub fn replay(&mut self, now: Duration, frames: &mut FrameLoop) -> usize {
        self.panels
            .iter_mut()
            .map(|panel| panel.replay(now, frames))
            .filter(|&restarted| restarted)
            .count()
    }

    /// Whether any panel is still running; the hero drift does not count
    pub fn is_animating(&self) -> bool {
        self.panels.iter().any(|p| p.trigger.is_animating())
    }

    /// Unmount everything
    pub fn teardown(&mut self, frames: &mut FrameLoop) {
        for panel in &mut self.panels {
            panel.trigger.teardown(frames);
        }
        self.hero.unmount(frames);
    }

    /// Title of the panel covering the upper third of the viewport
    pub fn section_at(&self, scroll: u16, viewport_height: u16) -> Option<&str> {
        let probe = scroll + viewport_height / 3;
        self.placements().into_iter().find_map(|p| match p.section {
            Section::Panel(index) if probe >= p.y && probe < p.y + p.height + PANEL_GAP => {
                Some(self.panels[index].title.as_str())
            }
            _ => None,
        })
    }

    /// Draw the rows `scroll..scroll + area.height` of the page into `area`
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        scroll: u16,
        completion: Option<f64>,
        theme: &Theme,
    ) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Style::default().bg(theme.bg0));
        let view_end = scroll.saturating_add(area.height);

        for placement in self.placements() {
            let end = placement.y + placement.height;
            if end <= scroll || placement.y >= view_end {
                continue;
            }

            let local = Rect::new(0, 0, area.width, placement.height);
            let mut offscreen = Buffer::empty(local);
            match placement.section {
                Section::Hero => {
                    let particles = self.hero.positions();
                    HeroBanner {
                        particles: &particles,
                        completion,
                        theme,
                    }
                    .render(local, &mut offscreen);
                }
                Section::Panel(index) => self.panels[index].render(local, &mut offscreen, theme),
                Section::Footer => Footer { theme }.render(local, &mut offscreen),
            }

            let first = scroll.max(placement.y);
            let last = view_end.min(end);
            for page_y in first..last {
                let row = page_y - placement.y;
                let screen_y = area.y + (page_y - scroll);
                for x in 0..area.width {
                    if let Some(cell) = buf.cell_mut((area.x + x, screen_y)) {
                        *cell = offscreen[(x, row)].clone();
                    }
                }
            }
        }
    }
}
