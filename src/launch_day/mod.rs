//! Launch-day go/no-go evaluator (§4.11).
//!
//! Composes six independently-scored sub-analyses into one verdict. A
//! `danger` tag from any sub-analysis forces NO-GO; a missing critical
//! checklist item forces HOLD even if nothing else is dangerous.

use crate::flutter::FlutterStatus;
use crate::stability::StabilityClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Safe,
    Caution,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verdict {
    Go,
    Hold,
    NoGo,
}

/// Ground-level weather snapshot relevant to a go/no-go call.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct WeatherSnapshot {
    pub wind_speed: f64,
    pub gusting_to: f64,
    pub ceiling_m: f64,
    pub precipitation: bool,
}

/// A single named checklist item and whether it's been completed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub critical: bool,
    pub complete: bool,
}

/// Raw inputs to the evaluator. `stability`/`flutter` classes and
/// `recovery_validated` are usually computed upstream via
/// `stability::analyze`/`flutter::analyze`/`recovery::RecoveryConfig::validate`.
#[derive(Debug, Clone)]
pub struct LaunchDayInputs<'a> {
    pub weather: WeatherSnapshot,
    pub wind_limit: f64,
    pub stability: StabilityClass,
    pub flutter: FlutterStatus,
    pub recovery_validated: bool,
    pub waiver_required: bool,
    pub waiver_obtained: bool,
    pub checklist: &'a [ChecklistItem],
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LaunchDayResult {
    pub verdict: Verdict,
    pub score: f64,
    pub weather: Severity,
    pub stability: Severity,
    pub flutter: Severity,
    pub recovery: Severity,
    pub waiver: Severity,
    pub checklist: Severity,
    pub missing_critical_items: Vec<String>,
}

fn weather_severity(weather: &WeatherSnapshot, wind_limit: f64) -> Severity {
    if weather.gusting_to > wind_limit * 1.25 || weather.precipitation || weather.ceiling_m < 100.0 {
        Severity::Danger
    } else if weather.wind_speed > wind_limit || weather.gusting_to > wind_limit {
        Severity::Warning
    } else if weather.wind_speed > wind_limit * 0.75 {
        Severity::Caution
    } else {
        Severity::Safe
    }
}

fn stability_severity(class: StabilityClass) -> Severity {
    match class {
        StabilityClass::Unstable => Severity::Danger,
        StabilityClass::MarginallyUnstable => Severity::Warning,
        StabilityClass::MarginallyStable => Severity::Caution,
        StabilityClass::Stable | StabilityClass::VeryStable => Severity::Safe,
        StabilityClass::OverStable => Severity::Caution,
        StabilityClass::SeverelyOverStable => Severity::Warning,
    }
}

fn flutter_severity(status: FlutterStatus) -> Severity {
    match status {
        FlutterStatus::Excellent | FlutterStatus::Good => Severity::Safe,
        FlutterStatus::Adequate => Severity::Caution,
        FlutterStatus::Marginal => Severity::Warning,
        FlutterStatus::Unsafe => Severity::Danger,
    }
}

fn waiver_severity(required: bool, obtained: bool) -> Severity {
    if required && !obtained {
        Severity::Danger
    } else {
        Severity::Safe
    }
}

fn penalty_for(severity: Severity) -> f64 {
    match severity {
        Severity::Safe => 0.0,
        Severity::Caution => 5.0,
        Severity::Warning => 15.0,
        Severity::Danger => 40.0,
    }
}

/// Evaluate the full composition and return a single verdict.
pub fn evaluate(inputs: &LaunchDayInputs) -> LaunchDayResult {
    let weather = weather_severity(&inputs.weather, inputs.wind_limit);
    let stability = stability_severity(inputs.stability);
    let flutter = flutter_severity(inputs.flutter);
    let recovery = if inputs.recovery_validated { Severity::Safe } else { Severity::Danger };
    let waiver = waiver_severity(inputs.waiver_required, inputs.waiver_obtained);

    let missing_critical_items: Vec<String> = inputs
        .checklist
        .iter()
        .filter(|item| item.critical && !item.complete)
        .map(|item| item.name.clone())
        .collect();
    let checklist = if !missing_critical_items.is_empty() {
        Severity::Danger
    } else if inputs.checklist.iter().any(|item| !item.complete) {
        Severity::Caution
    } else {
        Severity::Safe
    };

    let severities = [weather, stability, flutter, recovery, waiver, checklist];
    let score = (100.0 - severities.iter().map(|s| penalty_for(*s)).sum::<f64>()).max(0.0);

    let verdict = if severities.iter().any(|s| *s == Severity::Danger) {
        Verdict::NoGo
    } else if !missing_critical_items.is_empty() {
        Verdict::Hold
    } else if severities.iter().any(|s| *s == Severity::Warning) {
        Verdict::Hold
    } else {
        Verdict::Go
    };

    LaunchDayResult { verdict, score, weather, stability, flutter, recovery, waiver, checklist, missing_critical_items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_weather() -> WeatherSnapshot {
        WeatherSnapshot { wind_speed: 3.0, gusting_to: 5.0, ceiling_m: 2000.0, precipitation: false }
    }

    fn complete_checklist() -> Vec<ChecklistItem> {
        vec![
            ChecklistItem { name: "igniter installed".into(), critical: true, complete: true },
            ChecklistItem { name: "recovery wadding".into(), critical: false, complete: true },
        ]
    }

    #[test]
    fn nominal_conditions_are_go() {
        let checklist = complete_checklist();
        let inputs = LaunchDayInputs {
            weather: calm_weather(),
            wind_limit: 10.0,
            stability: StabilityClass::Stable,
            flutter: FlutterStatus::Excellent,
            recovery_validated: true,
            waiver_required: false,
            waiver_obtained: false,
            checklist: &checklist,
        };
        let result = evaluate(&inputs);
        assert_eq!(result.verdict, Verdict::Go);
        assert!((result.score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_critical_checklist_item_forces_hold() {
        let checklist = vec![ChecklistItem { name: "pad safety check".into(), critical: true, complete: false }];
        let inputs = LaunchDayInputs {
            weather: calm_weather(),
            wind_limit: 10.0,
            stability: StabilityClass::Stable,
            flutter: FlutterStatus::Excellent,
            recovery_validated: true,
            waiver_required: false,
            waiver_obtained: false,
            checklist: &checklist,
        };
        let result = evaluate(&inputs);
        assert_eq!(result.verdict, Verdict::Hold);
        assert_eq!(result.missing_critical_items, vec!["pad safety check".to_string()]);
    }

    #[test]
    fn unstable_rocket_forces_no_go() {
        let checklist = complete_checklist();
        let inputs = LaunchDayInputs {
            weather: calm_weather(),
            wind_limit: 10.0,
            stability: StabilityClass::Unstable,
            flutter: FlutterStatus::Excellent,
            recovery_validated: true,
            waiver_required: false,
            waiver_obtained: false,
            checklist: &checklist,
        };
        let result = evaluate(&inputs);
        assert_eq!(result.verdict, Verdict::NoGo);
    }

    #[test]
    fn required_waiver_not_obtained_forces_no_go() {
        let checklist = complete_checklist();
        let inputs = LaunchDayInputs {
            weather: calm_weather(),
            wind_limit: 10.0,
            stability: StabilityClass::Stable,
            flutter: FlutterStatus::Excellent,
            recovery_validated: true,
            waiver_required: true,
            waiver_obtained: false,
            checklist: &checklist,
        };
        let result = evaluate(&inputs);
        assert_eq!(result.verdict, Verdict::NoGo);
        assert_eq!(result.waiver, Severity::Danger);
    }
}
