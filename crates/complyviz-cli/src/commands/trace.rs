use std::time::Duration;

use anyhow::{anyhow, Result};

use complyviz_core::animation::{Clock, FrameLoop, ManualClock};
use complyviz_core::AppConfig;
use complyviz_tui::dashboard::Dashboard;

/// Upper bound on traced time for a panel that never settles
const TRACE_LIMIT: Duration = Duration::from_secs(30);

/// Run one panel's animation headless and print its values per frame
pub fn run(config: &AppConfig, widget: &str, step_ms: u64, every: usize) -> Result<()> {
    let mut dashboard = Dashboard::demo(&config.animation)?;
    let ids = dashboard.panel_ids().join(", ");
    let panel = dashboard
        .panel_mut(widget)
        .ok_or_else(|| anyhow!("Unknown widget '{}'. Available: {}", widget, ids))?;

    let step = Duration::from_millis(step_ms.max(1));
    let every = every.max(1);
    let clock = ManualClock::new();
    let mut frames = FrameLoop::new();

    println!("# {} ({}), step {}ms", panel.title(), panel.id(), step.as_millis());
    panel.start(clock.now(), &mut frames);
    print_row(clock.now(), &panel.live_values());

    let mut frame = 0usize;
    while frames.has_pending() && clock.now() < TRACE_LIMIT {
        let now = clock.advance(step);
        frames.run_frame(now);
        frame += 1;
        if frame % every == 0 || !frames.has_pending() {
            print_row(now, &panel.live_values());
        }
    }

    let sequencer = panel.trigger().sequencer();
    println!(
        "# {} frames, {:?}, done: {}",
        frames.frames_run(),
        sequencer.state(),
        sequencer.is_done()
    );
    Ok(())
}

fn print_row(now: Duration, values: &[f64]) {
    let cells: Vec<String> = values.iter().map(|v| format!("{:8.2}", v)).collect();
    println!("{:>6}ms {}", now.as_millis(), cells.join(" "));
}
