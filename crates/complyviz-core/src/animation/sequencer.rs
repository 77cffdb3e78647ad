//! Composite multi-stage sequencer
//!
//! Fans one trigger out into one [`ValueAnimation`] per item. Items of a stage
//! share one start timestamp and are offset by a [`StaggerSchedule`], so their
//! relative order survives frame jitter. Stages run one after another: the
//! runs of stage N+1 are only created once every run of stage N is done and the
//! stage's handoff gap has elapsed.

use std::time::Duration;

use tracing::debug;

use super::easing::Easing;
use super::value::{RunStatus, ValueAnimation};
use crate::{Error, Result};

/// Ordered `(index, delay)` pairs with non-decreasing delays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaggerSchedule {
    delays: Vec<Duration>,
}

impl StaggerSchedule {
    /// `delay = index * step`
    pub fn uniform(count: usize, step: Duration) -> Self {
        let delays = (0..count)
            .map(|index| step * u32::try_from(index).unwrap_or(u32::MAX))
            .collect();
        Self { delays }
    }

    /// Every item starts together
    pub fn simultaneous(count: usize) -> Self {
        Self {
            delays: vec![Duration::ZERO; count],
        }
    }

    /// Explicit per-item offsets; rejected when an offset is smaller than the
    /// one before it
    pub fn from_delays(delays: Vec<Duration>) -> Result<Self> {
        if let Some(index) = delays.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(Error::Animation(format!(
                "stagger delay at index {} is earlier than the one before it",
                index + 1
            )));
        }
        Ok(Self { delays })
    }

    pub fn delay(&self, index: usize) -> Option<Duration> {
        self.delays.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Duration)> + '_ {
        self.delays.iter().copied().enumerate()
    }

    /// Largest offset, i.e. the delay of the last item
    pub fn span(&self) -> Duration {
        self.delays.last().copied().unwrap_or(Duration::ZERO)
    }
}

/// Description of one stage: targets plus shared timing
#[derive(Debug, Clone)]
pub struct StageSpec {
    label: String,
    start: f64,
    targets: Vec<f64>,
    schedule: StaggerSchedule,
    duration: Duration,
    easing: Easing,
    gap: Duration,
}

impl StageSpec {
    /// All items start together from zero
    pub fn new(label: impl Into<String>, targets: Vec<f64>, duration: Duration) -> Self {
        let schedule = StaggerSchedule::simultaneous(targets.len());
        Self {
            label: label.into(),
            start: 0.0,
            targets,
            schedule,
            duration,
            easing: Easing::default(),
            gap: Duration::ZERO,
        }
    }

    /// Offset item `i` by `i * step`
    pub fn with_stagger(mut self, step: Duration) -> Self {
        self.schedule = StaggerSchedule::uniform(self.targets.len(), step);
        self
    }

    pub fn with_schedule(mut self, schedule: StaggerSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Wait this long after the previous stage completes before starting
    pub fn after_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn schedule(&self) -> &StaggerSchedule {
        &self.schedule
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    fn validate(&self) -> Result<()> {
        if self.schedule.len() != self.targets.len() {
            return Err(Error::Animation(format!(
                "stage '{}' has {} targets but {} stagger entries",
                self.label,
                self.targets.len(),
                self.schedule.len()
            )));
        }
        if !self.start.is_finite() || self.targets.iter().any(|t| !t.is_finite()) {
            return Err(Error::Animation(format!(
                "stage '{}' has a non-finite value",
                self.label
            )));
        }
        Ok(())
    }

    fn build_runs(&self, started_at: Duration) -> Vec<ValueAnimation> {
        self.targets
            .iter()
            .zip(self.schedule.iter())
            .map(|(&target, (_, delay))| {
                ValueAnimation::new(self.start, target, self.duration)
                    .with_delay(delay)
                    .with_easing(self.easing)
                    .starting_at(started_at)
            })
            .collect()
    }
}

/// Sequencer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Running { stage: usize },
    /// Stage finished at `completed_at`; the next one is created once its gap
    /// has elapsed
    StageDone { stage: usize, completed_at: Duration },
    Done,
}

/// Drives every stage of one widget from a single trigger
#[derive(Debug, Clone)]
pub struct Sequencer {
    stages: Vec<StageSpec>,
    runs: Vec<ValueAnimation>,
    values: Vec<Vec<f64>>,
    stage_started_at: Vec<Option<Duration>>,
    state: SequencerState,
}

impl Sequencer {
    pub fn new(stages: Vec<StageSpec>) -> Result<Self> {
        for stage in &stages {
            stage.validate()?;
        }
        let values = stages
            .iter()
            .map(|stage| vec![stage.start; stage.targets.len()])
            .collect();
        let stage_started_at = vec![None; stages.len()];
        Ok(Self {
            stages,
            runs: Vec::new(),
            values,
            stage_started_at,
            state: SequencerState::Idle,
        })
    }

    pub fn single(stage: StageSpec) -> Result<Self> {
        Self::new(vec![stage])
    }

    /// Begin the first stage at `now`; returns false when already started
    pub fn start(&mut self, now: Duration) -> bool {
        if self.state != SequencerState::Idle {
            return false;
        }
        if self.stages.is_empty() {
            self.state = SequencerState::Done;
            return true;
        }
        self.enter_stage(0, now);
        true
    }

    fn enter_stage(&mut self, stage: usize, started_at: Duration) {
        debug!(
            stage,
            label = self.stages[stage].label(),
            started_at_ms = started_at.as_millis() as u64,
            "Sequencer stage started"
        );
        self.runs = self.stages[stage].build_runs(started_at);
        self.stage_started_at[stage] = Some(started_at);
        self.state = SequencerState::Running { stage };
    }

    /// Advance to `now` and return the resulting state
    pub fn tick(&mut self, now: Duration) -> SequencerState {
        loop {
            match self.state {
                SequencerState::Idle | SequencerState::Done => return self.state,
                SequencerState::Running { stage } => {
                    let mut all_done = true;
                    for (index, run) in self.runs.iter_mut().enumerate() {
                        let sample = run.tick(now);
                        self.values[stage][index] = sample.value;
                        all_done &= sample.is_done();
                    }
                    if !all_done {
                        return self.state;
                    }
                    debug!(stage, "Sequencer stage completed");
                    self.state = SequencerState::StageDone {
                        stage,
                        completed_at: now,
                    };
                }
                SequencerState::StageDone {
                    stage,
                    completed_at,
                } => {
                    let next = stage + 1;
                    if next >= self.stages.len() {
                        self.runs.clear();
                        self.state = SequencerState::Done;
                        return self.state;
                    }
                    let handoff_at = completed_at + self.stages[next].gap;
                    if now < handoff_at {
                        return self.state;
                    }
                    self.enter_stage(next, handoff_at);
                }
            }
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SequencerState::Done
    }

    /// Whether another frame is needed to make progress
    pub fn needs_frame(&self) -> bool {
        matches!(
            self.state,
            SequencerState::Running { .. } | SequencerState::StageDone { .. }
        )
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage(&self, stage: usize) -> Option<&StageSpec> {
        self.stages.get(stage)
    }

    /// Live values of one stage; start values until the stage begins
    pub fn values(&self, stage: usize) -> &[f64] {
        self.values.get(stage).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn value(&self, stage: usize, index: usize) -> Option<f64> {
        self.values.get(stage)?.get(index).copied()
    }

    /// Timestamp the stage's runs were anchored at, once created
    pub fn stage_started_at(&self, stage: usize) -> Option<Duration> {
        self.stage_started_at.get(stage).copied().flatten()
    }

    /// Status of one item; items of stages not yet reached are pending
    pub fn item_status(&self, stage: usize, index: usize) -> Option<RunStatus> {
        let spec = self.stages.get(stage)?;
        if index >= spec.targets.len() {
            return None;
        }
        let status = match self.state {
            SequencerState::Idle => RunStatus::Pending,
            SequencerState::Done => RunStatus::Done,
            SequencerState::Running { stage: current } if current == stage => {
                self.runs[index].status()
            }
            SequencerState::Running { stage: current }
            | SequencerState::StageDone { stage: current, .. } => {
                if stage <= current {
                    RunStatus::Done
                } else {
                    RunStatus::Pending
                }
            }
        };
        Some(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_schedule_rejects_decreasing_delays() {
        assert!(StaggerSchedule::from_delays(vec![ms(0), ms(100), ms(100)]).is_ok());
        let err = StaggerSchedule::from_delays(vec![ms(0), ms(200), ms(100)]).unwrap_err();
        assert!(matches!(err, Error::Animation(_)));
    }

    #[test]
    fn test_uniform_schedule() {
        let schedule = StaggerSchedule::uniform(4, ms(150));
        let delays: Vec<_> = schedule.iter().collect();
        assert_eq!(delays, vec![(0, ms(0)), (1, ms(150)), (2, ms(300)), (3, ms(450))]);
        assert_eq!(schedule.span(), ms(450));
    }

    #[test]
    fn test_mismatched_schedule_is_rejected() {
        let stage = StageSpec::new("bars", vec![1.0, 2.0], ms(100))
            .with_schedule(StaggerSchedule::uniform(3, ms(10)));
        assert!(Sequencer::single(stage).is_err());
    }

    #[test]
    fn test_non_finite_target_is_rejected() {
        let stage = StageSpec::new("bars", vec![1.0, f64::NAN], ms(100));
        assert!(Sequencer::single(stage).is_err());
    }

    #[test]
    fn test_staggered_bars() {
        let targets = vec![92.0, 78.0, 85.0, 64.0, 71.0];
        let stage = StageSpec::new("bars", targets.clone(), ms(800)).with_stagger(ms(150));
        let mut seq = Sequencer::single(stage).unwrap();
        assert!(seq.start(ms(0)));

        let mut t = 0;
        while t < 600 {
            seq.tick(ms(t));
            assert_eq!(seq.value(0, 4), Some(0.0), "item 4 moved at {}ms", t);
            t += 16;
        }

        seq.tick(ms(1400));
        assert_eq!(seq.values(0), targets.as_slice());
        assert!(seq.is_done());
    }

    #[test]
    fn test_stagger_order_is_preserved() {
        let stage = StageSpec::new("cells", vec![10.0; 6], ms(300)).with_stagger(ms(40));
        let mut seq = Sequencer::single(stage).unwrap();
        seq.start(ms(5));

        let mut reached_at: Vec<Option<u64>> = vec![None; 6];
        for t in (5..800).step_by(11) {
            seq.tick(ms(t));
            for (index, slot) in reached_at.iter_mut().enumerate() {
                if slot.is_none() && seq.item_status(0, index) == Some(RunStatus::Done) {
                    *slot = Some(t);
                }
            }
        }
        for pair in reached_at.windows(2) {
            assert!(pair[0].unwrap() <= pair[1].unwrap());
        }
    }

    #[test]
    fn test_two_stage_handoff() {
        let before = StageSpec::new("before", vec![40.0], ms(1000));
        let after = StageSpec::new("after", vec![4.0], ms(800)).after_gap(ms(300));
        let mut seq = Sequencer::new(vec![before, after]).unwrap();
        assert!(seq.start(ms(0)));

        let mut first_b_advance = None;
        for t in (0..=3000).step_by(16) {
            let state = seq.tick(ms(t));
            if t < 1000 {
                assert_eq!(state, SequencerState::Running { stage: 0 });
            }
            if first_b_advance.is_none() && seq.value(1, 0).is_some_and(|v| v > 0.0) {
                first_b_advance = Some(t);
            }
        }

        let stage_b_start = seq.stage_started_at(1).unwrap();
        assert!(stage_b_start >= ms(1300));
        assert!(first_b_advance.unwrap() >= 1300);
        assert_eq!(seq.values(0), &[40.0]);
        assert_eq!(seq.values(1), &[4.0]);
        assert!(seq.is_done());
    }

    #[test]
    fn test_stage_waits_for_gap() {
        let a = StageSpec::new("a", vec![1.0], ms(100));
        let b = StageSpec::new("b", vec![1.0], ms(100)).after_gap(ms(50));
        let mut seq = Sequencer::new(vec![a, b]).unwrap();
        seq.start(ms(0));

        assert_eq!(
            seq.tick(ms(100)),
            SequencerState::StageDone {
                stage: 0,
                completed_at: ms(100)
            }
        );
        assert!(seq.needs_frame());
        assert_eq!(seq.item_status(1, 0), Some(RunStatus::Pending));
        assert_eq!(seq.tick(ms(149)), SequencerState::StageDone {
            stage: 0,
            completed_at: ms(100)
        });
        assert_eq!(seq.tick(ms(150)), SequencerState::Running { stage: 1 });
        assert_eq!(seq.tick(ms(250)), SequencerState::Done);
        assert!(!seq.needs_frame());
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut seq = Sequencer::single(StageSpec::new("x", vec![1.0], ms(10))).unwrap();
        assert_eq!(seq.tick(ms(50)), SequencerState::Idle);
        assert!(seq.start(ms(0)));
        assert!(!seq.start(ms(5)));
    }

    #[test]
    fn test_empty_sequencer_finishes_immediately() {
        let mut seq = Sequencer::new(Vec::new()).unwrap();
        assert!(seq.start(ms(0)));
        assert!(seq.is_done());
    }
}
