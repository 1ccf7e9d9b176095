//! CLI Command Implementations
//!
//! A simulation script is a list of steps run in order against a
//! [`SimulatedHost`]. Timers still pending at the end are drained.

use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use serde::Serialize;

use crate::config::CueConfig;
use crate::error::{CueError, Result};
use crate::facade::{AudioFacade, PlaybackRequest};
use crate::sim::{HostEvent, SimulatedHost};

/// One scripted action
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Load,
    Play(PlaybackRequest),
    /// Advance the clock by this many milliseconds
    Wait(f64),
    Detach,
    Attach,
}

impl FromStr for Step {
    type Err = CueError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let step = match (name, args.as_slice()) {
            ("load", []) => Step::Load,
            ("detach", []) => Step::Detach,
            ("attach", []) => Step::Attach,
            ("play", [position, duration]) => Step::Play(PlaybackRequest::new(
                parse_number(s, "position", position)?,
                parse_number(s, "duration", duration)?,
            )),
            ("wait", [ms]) => Step::Wait(parse_number(s, "wait time", ms)?),
            ("load" | "detach" | "attach", _) => {
                return Err(CueError::invalid_step(s, "takes no arguments"))
            }
            ("play", _) => return Err(CueError::invalid_step(s, "expected play:<position>:<duration>")),
            ("wait", _) => return Err(CueError::invalid_step(s, "expected wait:<ms>")),
            _ => return Err(CueError::invalid_step(s, "unknown step")),
        };
        Ok(step)
    }
}

fn parse_number(step: &str, what: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CueError::invalid_step(step, format!("{} '{}' is not a number", what, raw)))
}

/// Outcome of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub events: Vec<HostEvent>,
    pub phase: String,
    pub position: f64,
    pub playing: bool,
    pub elapsed_ms: f64,
}

impl SimulationReport {
    /// Human-readable timeline, one event per line
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&format!("{:>10.1}ms  {:?}\n", event.at_ms, event.kind));
        }
        out.push_str(&format!(
            "final: phase={} position={:.3}s playing={} elapsed={:.1}ms\n",
            self.phase, self.position, self.playing, self.elapsed_ms
        ));
        out
    }
}

/// Parse every step up front so a bad script runs nothing.
pub fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    raw.iter().map(|s| s.parse()).collect()
}

/// Run `steps` against a fresh simulated page.
pub fn run_simulation(
    steps: &[Step],
    config: CueConfig,
    element_present: bool,
    block_play: bool,
) -> SimulationReport {
    let host = SimulatedHost::with_element_id(&config.element_id);
    if !element_present {
        host.detach();
    }
    host.set_block_play(block_play);

    let facade = AudioFacade::with_config(host, config);
    for step in steps {
        debug!("Step: {:?}", step);
        match step {
            Step::Load => facade.load_audio(),
            Step::Play(request) => facade.play(*request),
            Step::Wait(ms) => facade.host().advance(*ms),
            Step::Detach => facade.host().detach(),
            Step::Attach => facade.host().attach(),
        }
    }
    facade.host().run_until_idle();

    let host = facade.host();
    SimulationReport {
        events: host.events(),
        phase: facade.transport().phase().to_string(),
        position: host.position(),
        playing: host.is_playing(),
        elapsed_ms: host.now_ms(),
    }
}

/// `simulate` command
pub fn simulate(
    raw_steps: &[String],
    absent: bool,
    block_play: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = CueConfig::load_or_default(config_path)?;
    let steps = parse_steps(raw_steps)?;
    info!(
        "Simulating {} step(s) against element '{}'",
        steps.len(),
        config.element_id
    );

    let report = run_simulation(&steps, config, !absent, block_play);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

/// `config` command
pub fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = CueConfig::load_or_default(config_path)?;
    println!("{}", config.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HostEventKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("load", Step::Load ; "load")]
    #[test_case("attach", Step::Attach ; "attach")]
    #[test_case("detach", Step::Detach ; "detach")]
    #[test_case("play:30:5", Step::Play(PlaybackRequest::new(30.0, 5.0)) ; "play")]
    #[test_case("play:1.5:0.25", Step::Play(PlaybackRequest::new(1.5, 0.25)) ; "fractional play")]
    #[test_case("wait:2500", Step::Wait(2500.0) ; "wait")]
    fn test_parse_step(raw: &str, expected: Step) {
        assert_eq!(raw.parse::<Step>().unwrap(), expected);
    }

    #[test_case("stop" ; "unknown")]
    #[test_case("play:30" ; "missing duration")]
    #[test_case("play:a:5" ; "bad position")]
    #[test_case("wait" ; "missing wait time")]
    #[test_case("load:1" ; "extra argument")]
    fn test_parse_step_rejects(raw: &str) {
        let err = raw.parse::<Step>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STEP");
    }

    #[test]
    fn test_parse_steps_fails_on_first_bad_step() {
        let raw = vec!["load".to_string(), "bogus".to_string()];
        assert!(parse_steps(&raw).is_err());
    }

    #[test]
    fn test_run_simulation_scenario() {
        let steps = parse_steps(&["load".to_string(), "play:30:5".to_string()]).unwrap();
        let report = run_simulation(&steps, CueConfig::default(), true, false);

        let kinds: Vec<HostEventKind> = report.events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                HostEventKind::Reset,
                HostEventKind::Seek(30.0),
                HostEventKind::Play,
                HostEventKind::TimerScheduled(5000.0),
                HostEventKind::Pause,
            ]
        );
        assert_eq!(report.phase, "Paused");
        assert!(!report.playing);
        assert_eq!(report.elapsed_ms, 5000.0);
    }

    #[test]
    fn test_run_simulation_absent() {
        let steps = vec![Step::Load, Step::Play(PlaybackRequest::new(1.0, 1.0))];
        let report = run_simulation(&steps, CueConfig::default(), false, false);

        assert!(report.events.is_empty());
        assert_eq!(report.phase, "Idle");
    }

    #[test]
    fn test_render_text_has_final_line() {
        let report = run_simulation(&[Step::Load], CueConfig::default(), true, false);
        let text = report.render_text();
        assert!(text.contains("Reset"));
        assert!(text.ends_with("playing=false elapsed=0.0ms\n"));
    }
}
