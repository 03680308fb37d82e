use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::RwLock;

use readiness_quiz::admin::{AdminClient, AdminCredentials, AdminView, AdminViewer};
use readiness_quiz::config::AppConfig;
use readiness_quiz::evaluation::{
    HttpEvaluator, ProgressProfile, SubmissionCoordinator, SubmissionState,
};
use readiness_quiz::quiz::{QuizRouteState, QuizSession, Transition, quiz_routes};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("reading configuration")?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("admin") => {
            let response_id = args.get(1).cloned().unwrap_or_default();
            run_admin(&config, &response_id, &mut input).await
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: readiness-quiz [admin <response_id>]");
            std::process::exit(2);
        }
        None => run_quiz(&config, &mut input).await,
    }
}

async fn run_quiz(config: &AppConfig, input: &mut Input) -> anyhow::Result<()> {
    let session = Arc::new(RwLock::new(QuizSession::new()));
    let coordinator = SubmissionCoordinator::new(
        Arc::new(HttpEvaluator::from_config(config)),
        ProgressProfile::evaluation(),
        config.request_timeout,
    );

    eprintln!("📋 Business x AI Readiness Quiz v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Evaluate: {}", config.evaluate_url());
    if let Some(port) = config.routes_port {
        let app = quiz_routes(QuizRouteState {
            session: Arc::clone(&session),
            coordinator: Arc::clone(&coordinator),
        });
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("binding quiz routes on port {port}"))?;
        eprintln!("   Status API: http://0.0.0.0:{port}/api/quiz/status");
        tokio::spawn(async move {
            tracing::info!(port, "Quiz routes started");
            axum::serve(listener, app).await.ok();
        });
    }
    eprintln!("   Answer with <option> or <question>.<option>; n = next, b = back, j <screen> = jump, r = reset, q = quit.\n");

    loop {
        print_screen(&*session.read().await);
        eprint!("> ");
        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        let line = line.trim();

        let transition = {
            let mut session = session.write().await;
            match line {
                "" => continue,
                "q" | "quit" => return Ok(()),
                "r" | "reset" => {
                    session.reset();
                    continue;
                }
                "n" | "next" => session.next(),
                "b" | "back" => session.previous(),
                _ if line.starts_with("j ") => match line[2..].trim().parse::<usize>() {
                    Ok(screen) if screen > 0 => session.jump_to(screen - 1),
                    _ => {
                        eprintln!("Usage: j <screen number>");
                        continue;
                    }
                },
                _ => {
                    if let Err(e) = answer(&mut session, line) {
                        eprintln!("{e}");
                    }
                    continue;
                }
            }
        };

        match transition {
            Transition::Blocked => eprintln!("Please answer every question on this screen first."),
            Transition::Rejected { .. } => eprintln!("You can only jump back to screens you have seen."),
            Transition::ExitToLanding => {
                eprintln!("Leaving the quiz.");
                return Ok(());
            }
            Transition::Submit => {
                let payload = match session.read().await.evaluation_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };
                if submit(&coordinator, payload).await {
                    return Ok(());
                }
                eprintln!("Go back (b) to review your answers, or n to try again.");
            }
            Transition::Advanced { .. } | Transition::Retreated { .. } | Transition::Jumped { .. } => {}
        }
    }
}

/// Parse `<option>` or `<question>.<option>` (1-based) against the visible questions.
fn answer(session: &mut QuizSession, line: &str) -> anyhow::Result<()> {
    let (question_no, option_no) = match line.split_once('.') {
        Some((q, o)) => (q.trim().parse::<usize>()?, o.trim().parse::<usize>()?),
        None => (1, line.parse::<usize>()?),
    };
    let (question_id, value) = {
        let visible = session.visible_questions();
        let question = question_no
            .checked_sub(1)
            .and_then(|i| visible.get(i))
            .with_context(|| format!("No question {question_no} on this screen"))?;
        let option = option_no
            .checked_sub(1)
            .and_then(|i| question.options.get(i))
            .with_context(|| format!("No option {option_no} for that question"))?;
        (question.id.clone(), option.value.clone())
    };
    session.select(&question_id, &value)?;
    Ok(())
}

fn print_screen(session: &QuizSession) {
    eprintln!(
        "\n── Screen {}/{} ({:.0}%) ──",
        session.current_index() + 1,
        session.total_screens(),
        session.progress()
    );
    eprintln!("💬 {}\n", session.chat_text());
    for (qi, question) in session.visible_questions().iter().enumerate() {
        eprintln!("{}. {}", qi + 1, question.prompt);
        if let Some(helper) = &question.helper_text {
            eprintln!("   ({helper})");
        }
        let chosen = session.responses().get(&question.id);
        for (oi, option) in question.options.iter().enumerate() {
            let mark = if chosen == Some(option.value.as_str()) { "●" } else { "○" };
            eprintln!("   {mark} {}.{} {}", qi + 1, oi + 1, option.label);
        }
    }
}

/// Run one submission, echoing the loading animation. Returns true on success.
async fn submit(
    coordinator: &Arc<SubmissionCoordinator>,
    payload: readiness_quiz::evaluation::EvaluationPayload,
) -> bool {
    let mut progress_rx = coordinator.subscribe_progress();
    let watcher = {
        let profile = coordinator.profile().clone();
        tokio::spawn(async move {
            let mut shown_step = usize::MAX;
            while progress_rx.changed().await.is_ok() {
                let snapshot = *progress_rx.borrow_and_update();
                if snapshot.step != shown_step {
                    shown_step = snapshot.step;
                    if let Some(step) = snapshot.current_step(&profile) {
                        eprintln!("\n{} {}", step.text, step.subtext);
                    }
                }
                eprint!("\r{:>3}%", snapshot.progress);
            }
        })
    };

    let outcome = coordinator.submit(payload).await;
    watcher.abort();
    eprintln!();

    match (outcome, coordinator.state()) {
        (Ok(result), _) => {
            match result.overall_score() {
                Some(score) => eprintln!("✅ Overall readiness score: {score}"),
                None => eprintln!("✅ Evaluation ready"),
            }
            println!(
                "{}",
                serde_json::to_string_pretty(result.as_value()).unwrap_or_default()
            );
            true
        }
        (Err(_), SubmissionState::Failed(failure)) => {
            eprintln!("❌ {}", failure.message);
            false
        }
        (Err(e), _) => {
            eprintln!("❌ {e}");
            false
        }
    }
}

async fn run_admin(config: &AppConfig, response_id: &str, input: &mut Input) -> anyhow::Result<()> {
    let viewer = AdminViewer::new(AdminClient::from_config(config), response_id);
    eprintln!("🔐 Admin response viewer: {}", config.admin_url());

    let mut from_env = config.admin.as_ref().map(AdminCredentials::from_config);
    loop {
        let credentials = match from_env.take() {
            Some(credentials) => credentials,
            None => {
                eprint!("Username: ");
                let username = input.next_line().await?.unwrap_or_default();
                eprint!("Password: ");
                let password = input.next_line().await?.unwrap_or_default();
                if username.is_empty() && password.is_empty() {
                    return Ok(());
                }
                AdminCredentials::new(username.trim(), password.trim())
            }
        };

        match viewer.sign_in(&credentials).await {
            AdminView::Ready(record) => {
                eprintln!("Background: {}", record.user_input.background);
                for (i, qa) in record.user_input.questions_and_answers.iter().enumerate() {
                    eprintln!("Q{}: {}\n    → {}", i + 1, qa.question, qa.answer);
                }
                println!("{}", serde_json::to_string_pretty(&record.profile_evaluation)?);
                return Ok(());
            }
            AdminView::PromptCredentials { error } => {
                eprintln!("{}", error.unwrap_or_default());
            }
            AdminView::Failed { message } => anyhow::bail!(message),
            AdminView::Loading => {}
        }
    }
}
