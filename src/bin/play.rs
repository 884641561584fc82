// Terminal front end for the paper dating game
//
// Talks to a running scoring service (PAPERDATE_SERVER_URL) and renders the
// controller's events as plain text.

use std::io::Write;
use std::sync::Arc;

use paperdate::event::TracingEventHandler;
use paperdate::formatter::{format_date, format_difference, DatePrecision};
use paperdate::{
    ClientConfig, EventBus, GameController, GameEvent, GameStatus, GameSubscription,
    HttpScoringGateway,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(event: &GameEvent, total_rounds: u32) {
    match event {
        GameEvent::ChallengeReady {
            round,
            abstract_text,
            ..
        } => {
            println!("\n=== Round {round} of {total_rounds} ===\n");
            println!("{abstract_text}\n");
        }
        GameEvent::RoundResolved {
            outcome,
            running_total,
            ..
        } => {
            println!(
                "Your guess:  {}",
                format_date(outcome.guessed_date, DatePrecision::Day)
            );
            println!("Actual date: {}", outcome.actual_date.to_long_string());
            println!("Difference:  {}", format_difference(outcome.difference_days));
            println!("Round score: {}", outcome.score);
            println!("Total score: {running_total}");
        }
        GameEvent::GameOver {
            final_total,
            rounds,
            ..
        } => {
            println!("\n=== Game over! Final score: {final_total} ===\n");
            for round in rounds {
                println!("  {}", round.summary());
            }
        }
        GameEvent::ScoreSubmitted { message, .. } => println!("\n{message}"),
        GameEvent::NewHighScore { total, .. } => println!("High score: {total}"),
        GameEvent::Error { message, .. } => println!("! {message}"),
        GameEvent::StatusChanged { .. } => {}
    }
}

fn render_pending(events: &mut broadcast::Receiver<GameEvent>, total_rounds: u32) {
    while let Ok(event) = events.try_recv() {
        render(&event, total_rounds);
    }
}

fn prompt(text: &str) {
    print!("{text} ");
    let _ = std::io::stdout().flush();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperdate=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    let gateway = match HttpScoringGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let event_bus = EventBus::default();
    let _log_task = GameSubscription::new(Arc::new(TracingEventHandler), event_bus.clone()).start();
    let mut events = event_bus.subscribe();

    let mut controller = GameController::builder(Arc::new(gateway))
        .with_event_bus(event_bus)
        .build();
    let total_rounds = controller.total_rounds();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Guess when each paper was published (dates from 2010-01-01 until today).");

    loop {
        let result = match controller.status() {
            GameStatus::Idle => controller.start_game().await,
            GameStatus::AwaitingPaper => {
                prompt("Press Enter to try loading the paper again (q to quit):");
                match input.next_line().await {
                    Ok(Some(line)) if line.trim() != "q" => controller.retry_challenge().await,
                    _ => break,
                }
            }
            GameStatus::AwaitingGuess => {
                prompt("Your guess (YYYY-MM-DD):");
                match input.next_line().await {
                    Ok(Some(line)) => controller.submit_guess(&line).await.map(|_| ()),
                    _ => break,
                }
            }
            GameStatus::RoundResolved => {
                prompt("\nPress Enter to continue:");
                match input.next_line().await {
                    Ok(Some(_)) => controller.advance_round().await.map(|_| ()),
                    _ => break,
                }
            }
            GameStatus::GameOver => {
                controller.wait_for_submission().await;
                render_pending(&mut events, total_rounds);

                prompt("\nPlay again? [y/N]:");
                match input.next_line().await {
                    Ok(Some(line)) if line.trim().eq_ignore_ascii_case("y") => {
                        controller.start_game().await
                    }
                    _ => break,
                }
            }
        };

        if let Err(e) = result {
            debug!(error = %e, "Operation failed");
        }
        render_pending(&mut events, total_rounds);
    }

    println!("Thanks for playing!");
}
