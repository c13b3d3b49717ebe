//! A terminal chat client talking to the configured backend.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use little_chat::Config;
use little_chat::core::{Message, Role, Submission};
use little_chat::input::LineReader;
use little_chat::render::{render_counter, render_message, render_reset_failure};
use owo_colors::OwoColorize;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum ChatEvent {
    Message(Message),
    Idle,
    Cleared,
    ResetFailed(String),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("using backend at {}", config.base_url());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let controller = config
        .controller_builder()
        .on_message({
            let event_tx = event_tx.clone();
            move |message| {
                event_tx.send(ChatEvent::Message(message.clone())).ok();
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(ChatEvent::Idle).ok();
            }
        })
        .on_cleared({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(ChatEvent::Cleared).ok();
            }
        })
        .on_reset_failed(move |reason| {
            event_tx.send(ChatEvent::ResetFailed(reason.to_owned())).ok();
        })
        .build();

    println!(
        "{}",
        format!(
            "Chatting as {}. Type /clear to start over, /quit to leave.",
            controller.session_id()
        )
        .dimmed()
    );

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut input = LineReader::stdin();

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = input.next_line().await else {
            break;
        };
        let spinner_message = match line.trim() {
            "/quit" => break,
            "/clear" => {
                if controller.clear().is_err() {
                    break;
                }
                "🧹 Clearing..."
            }
            text => match controller.submit(text).await {
                Ok(Submission::Started) => "🤔 Thinking...",
                Ok(Submission::Blank) => continue,
                Ok(Submission::Busy) => {
                    println!("{}", "Still waiting for the last answer.".dimmed());
                    continue;
                }
                Err(err) => {
                    error!("{err}");
                    break;
                }
            },
        };

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message(spinner_message);
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = &progress_bar {
                progress_bar.finish_and_clear();
            }
            progress_bar = None;

            match event {
                ChatEvent::Message(message) => {
                    // The user has just typed it.
                    if message.role() != Role::User {
                        println!("{}", render_message(&message));
                    }
                }
                ChatEvent::Idle => {
                    print_counter(&controller).await;
                    break;
                }
                ChatEvent::Cleared => {
                    println!("{}", "Conversation cleared.".dimmed());
                    break;
                }
                ChatEvent::ResetFailed(reason) => {
                    println!("{}", render_reset_failure(&reason));
                    break;
                }
            }
        }
    }

    controller.shutdown();
}

async fn print_counter(controller: &little_chat::core::ConversationController) {
    match controller.snapshot().await {
        Ok(transcript) => println!("{}", render_counter(transcript.len())),
        Err(err) => warn!("failed to read the transcript: {err}"),
    }
}
