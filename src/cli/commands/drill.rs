//! `drill` command handler.
//!
//! Automated analyst session against a live server: start a scenario,
//! poll the event feed, answer every new event, print the final summary.
//! Useful as a smoke test and as a demo of the full API surface.

use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::catalog;
use crate::cli::args::{DrillArgs, OutputFormat};
use crate::engine::event::{DeliveredEvent, EventCategory, Severity};
use crate::engine::session::Response;
use crate::engine::summary::SessionSummary;
use crate::error::SiemulateError;

/// Hard ceiling on any single HTTP request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Action menu for `--random` play. Includes choices the policy never
/// accepts, so random runs produce realistic mistakes.
const RANDOM_ACTIONS: [&str; 6] = [
    "monitor",
    "block_ip",
    "isolate",
    "escalate",
    "shutdown",
    "investigate",
];

// ============================================================================
// Wire Shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct StartResponse {
    session_id: String,
    scenario_name: String,
    total_events: usize,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Vec<DeliveredEvent>,
}

#[derive(Debug, Deserialize)]
struct RespondResponse {
    evaluation: Response,
}

// ============================================================================
// Command
// ============================================================================

/// Run one automated analyst session against `args.server`.
///
/// Polls until every expected event is answered, `max_wait` elapses, or
/// the drill is cancelled; in every case the summary fetched so far is
/// printed and the session deleted.
///
/// # Errors
///
/// Returns an HTTP error if the server is unreachable or an endpoint
/// answers with a non-success status.
pub async fn run(args: &DrillArgs, cancel: CancellationToken) -> Result<(), SiemulateError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let base = args.server.trim_end_matches('/');

    if catalog::find(&args.scenario).is_none() {
        match catalog::suggest(&args.scenario) {
            Some(hit) => warn!(
                scenario = %args.scenario,
                "scenario is not in the catalog (did you mean '{hit}'?), running anyway"
            ),
            None => warn!(scenario = %args.scenario, "scenario is not in the catalog, running anyway"),
        }
    }

    let response = client
        .post(format!("{base}/scenarios/complex/{}/start", args.scenario))
        .send()
        .await?
        .error_for_status()?;
    let start: StartResponse = response.json().await?;

    if args.format == OutputFormat::Human {
        println!(
            "Starting '{}' as session {} ({} events expected)",
            start.scenario_name, start.session_id, start.total_events
        );
    }

    let mut answered: HashSet<String> = HashSet::new();
    let deadline = tokio::time::Instant::now() + args.max_wait;

    while answered.len() < start.total_events {
        if tokio::time::Instant::now() >= deadline {
            warn!("max wait exceeded before every event was answered");
            break;
        }

        let feed: EventsResponse = get_json(
            &client,
            &format!("{base}/scenarios/complex/{}/events", start.session_id),
        )
        .await?;

        for event in &feed.events {
            if !answered.insert(event.id.clone()) {
                continue;
            }

            let (suspicious, action) = if args.random {
                random_answer()
            } else {
                perfect_answer(event)
            };
            let body = serde_json::json!({
                "event_id": event.id,
                "action": action,
                "is_suspicious": suspicious,
            });
            let graded: RespondResponse = post_json(
                &client,
                &format!("{base}/scenarios/complex/{}/respond", start.session_id),
                &body,
            )
            .await?;

            debug!(event_id = %event.id, action, suspicious, score = graded.evaluation.score, "answered");
            if args.format == OutputFormat::Human {
                println!(
                    "  {}  {:<8}  {:<12} +{}",
                    event.id,
                    event.level.as_str(),
                    action,
                    graded.evaluation.score
                );
            }
        }

        if answered.len() >= start.total_events {
            break;
        }

        tokio::select! {
            () = cancel.cancelled() => {
                warn!("interrupted, reporting what was answered so far");
                break;
            }
            () = tokio::time::sleep(args.poll_interval) => {}
        }
    }

    let summary: SessionSummary = get_json(
        &client,
        &format!("{base}/scenarios/complex/{}/summary", start.session_id),
    )
    .await?;

    match args.format {
        OutputFormat::Human => print_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    // Best-effort cleanup; the server reaps idle sessions on its own.
    if let Err(e) = client
        .delete(format!("{base}/scenarios/complex/{}", start.session_id))
        .send()
        .await
    {
        debug!(error = %e, "session cleanup failed");
    }

    Ok(())
}

// ============================================================================
// Answer Policies
// ============================================================================

/// Triage by the book: flag every attack row and match the action to
/// its severity.
fn perfect_answer(event: &DeliveredEvent) -> (bool, &'static str) {
    match (event.category, event.level) {
        (EventCategory::Attack, Severity::Critical) => (true, "isolate"),
        (EventCategory::Attack, _) => (true, "block_ip"),
        (EventCategory::Normal, _) => (false, "monitor"),
    }
}

/// Coin-flip the suspicion call and draw the action from the full menu.
fn random_answer() -> (bool, &'static str) {
    let mut rng = rand::rng();
    (
        rng.random(),
        RANDOM_ACTIONS[rng.random_range(0..RANDOM_ACTIONS.len())],
    )
}

// ============================================================================
// Output
// ============================================================================

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("Scenario: {}", summary.scenario_name);
    println!(
        "Responded: {}/{} events ({} suspicious delivered)",
        summary.events_responded_to, summary.total_events, summary.total_suspicious_events
    );
    println!(
        "Suspicion calls: {} correct ({:.1}%)",
        summary.correct_suspicions, summary.suspicion_accuracy
    );
    println!(
        "Actions:         {} correct ({:.1}%)",
        summary.correct_actions, summary.action_accuracy
    );
    println!(
        "Score: {}/{}",
        summary.total_score, summary.max_possible_score
    );
}

// ============================================================================
// HTTP Helpers
// ============================================================================

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SiemulateError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json().await?)
}

async fn post_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    body: &serde_json::Value,
) -> Result<T, SiemulateError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json().await?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::evaluate;
    use crate::engine::event::SecurityEvent;

    fn delivered(category: EventCategory, level: Severity) -> DeliveredEvent {
        SecurityEvent::template("evt_001", category, level, "msg", "src").to_delivered()
    }

    #[test]
    fn test_perfect_answer_critical_attack() {
        let (suspicious, action) = perfect_answer(&delivered(
            EventCategory::Attack,
            Severity::Critical,
        ));
        assert!(suspicious);
        assert_eq!(action, "isolate");
    }

    #[test]
    fn test_perfect_answer_warning_attack() {
        let (suspicious, action) =
            perfect_answer(&delivered(EventCategory::Attack, Severity::Warning));
        assert!(suspicious);
        assert_eq!(action, "block_ip");
    }

    #[test]
    fn test_perfect_answer_benign() {
        let (suspicious, action) = perfect_answer(&delivered(EventCategory::Normal, Severity::Info));
        assert!(!suspicious);
        assert_eq!(action, "monitor");
    }

    #[test]
    fn test_perfect_answers_score_full_marks() {
        let grid = [
            (EventCategory::Attack, Severity::Critical),
            (EventCategory::Attack, Severity::Warning),
            (EventCategory::Attack, Severity::Info),
            (EventCategory::Normal, Severity::Info),
            (EventCategory::Normal, Severity::Warning),
        ];

        for (category, level) in grid {
            let event = SecurityEvent::template("evt_001", category, level, "msg", "src");
            let (suspicious, action) = perfect_answer(&event.to_delivered());
            let response = evaluate(&event, action, suspicious, false);
            assert_eq!(
                response.score, 50,
                "perfect play dropped points on {category:?}/{level:?}"
            );
        }
    }

    #[test]
    fn test_random_answer_draws_from_menu() {
        for _ in 0..50 {
            let (_, action) = random_answer();
            assert!(RANDOM_ACTIONS.contains(&action), "unknown action {action}");
        }
    }
}
