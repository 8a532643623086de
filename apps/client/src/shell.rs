//! Interactive terminal shell — the presentation layer.
//!
//! Reads commands, delegates to the session manager and the per-role
//! orchestrators, prints their state. No business rules live here; every
//! decision the shell appears to make is a route-gate or orchestrator call.

use std::io::Write as _;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::models::{JobDraft, RegisterRequest, ReviewDecision, Role};
use crate::routes::{self, Route, RouteDecision};
use crate::session::{LoginOutcome, RegisterOutcome, SessionPhase};
use crate::state::AppState;
use crate::workflows::analytics::AnalyticsView;
use crate::workflows::candidate::{CandidateDashboard, CandidateView};
use crate::workflows::recruiter::{RecruiterDashboard, ResumeHandle};

type Input = Lines<BufReader<Stdin>>;

#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(state: AppState) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("TalentIQ — applicant tracking client");
    println!("Type 'help' for commands.");

    loop {
        // main() restores before we get here; this only covers a future
        // caller that forgets to.
        if state.store.phase() == SessionPhase::Restoring {
            state.session.restore();
        }

        let flow = match state.store.identity() {
            None => lobby(&state, &mut input).await?,
            Some(identity) => {
                let home = routes::home_for(identity.role);
                match routes::resolve(home, &state.store.state()) {
                    RouteDecision::Render => match identity.role {
                        Role::Candidate => candidate_screen(&state, &mut input).await?,
                        Role::Recruiter | Role::Admin => {
                            recruiter_screen(&state, &mut input).await?
                        }
                    },
                    _ => {
                        // A denied home route means the stored session is
                        // unusable; drop it and fall back to the lobby.
                        state.session.logout();
                        Flow::Continue
                    }
                }
            }
        };
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

fn parse_id(token: Option<&str>) -> Option<i64> {
    token?.parse().ok()
}

// ── Lobby ───────────────────────────────────────────────────────────────

async fn lobby(state: &AppState, input: &mut Input) -> Result<Flow> {
    let Some(line) = prompt(input, "talentiq> ").await? else {
        return Ok(Flow::Quit);
    };
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("login") => {
            let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
                println!("usage: login <email> <password>");
                return Ok(Flow::Continue);
            };
            match state.session.login(email, password).await {
                LoginOutcome::Success { role } => println!("Logged in as {role}."),
                LoginOutcome::Failure { message } => println!("{message}"),
            }
        }
        Some("register") => {
            let (Some(name), Some(email), Some(password), Some(role)) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                println!("usage: register <name> <email> <password> <candidate|recruiter>");
                return Ok(Flow::Continue);
            };
            let role: Role = match role.parse() {
                Ok(role) => role,
                Err(e) => {
                    println!("{e}");
                    return Ok(Flow::Continue);
                }
            };
            let request = RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
            };
            match state.session.register(&request).await {
                RegisterOutcome::Success => {
                    println!("Account created successfully! You can now log in.")
                }
                RegisterOutcome::Failure { message } => println!("{message}"),
            }
        }
        Some("quit") | Some("exit") => return Ok(Flow::Quit),
        Some("help") | None => {
            println!("  login <email> <password>");
            println!("  register <name> <email> <password> <candidate|recruiter>");
            println!("  quit");
        }
        Some(other) => println!("Unknown command '{other}'. Type 'help'."),
    }
    Ok(Flow::Continue)
}

// ── Candidate screen ────────────────────────────────────────────────────

async fn candidate_screen(state: &AppState, input: &mut Input) -> Result<Flow> {
    let dashboard = CandidateDashboard::new(state.api.clone());
    dashboard.enter().await;

    println!("Candidate dashboard — jobs, apps, upload <file.pdf>, apply <job>, match <job>, gap <job>, logout, quit");

    loop {
        render_candidate(&dashboard);
        let Some(line) = prompt(input, "candidate> ").await? else {
            return Ok(Flow::Quit);
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("jobs") => dashboard.select_view(CandidateView::Jobs).await,
            Some("apps") => dashboard.select_view(CandidateView::Applications).await,
            Some("upload") => dashboard.upload_resume(parts.next().map(Path::new)).await,
            Some("apply") => match parse_id(parts.next()) {
                Some(job_id) => dashboard.apply(job_id).await,
                None => println!("usage: apply <job-id>"),
            },
            Some("match") => match parse_id(parts.next()) {
                Some(job_id) => dashboard.request_match_score(job_id).await,
                None => println!("usage: match <job-id>"),
            },
            Some("gap") => match parse_id(parts.next()) {
                Some(job_id) => dashboard.request_skill_gap(job_id).await,
                None => println!("usage: gap <job-id>"),
            },
            Some("logout") => {
                state.session.logout();
                return Ok(Flow::Continue);
            }
            Some("quit") | Some("exit") => return Ok(Flow::Quit),
            Some("help") | None => {
                println!("  jobs | apps — switch tab");
                println!("  upload <file.pdf> — upload your resume");
                println!("  apply/match/gap <job-id> — act on a job");
            }
            Some(other) => println!("Unknown command '{other}'."),
        }
        if let Some(message) = dashboard.take_message() {
            println!("· {message}");
        }
    }
}

fn render_candidate(dashboard: &CandidateDashboard) {
    println!();
    match dashboard.view() {
        CandidateView::Jobs => {
            if dashboard.has_resume() {
                println!("Available Jobs (resume on file ✔)");
            } else {
                println!("Available Jobs — upload a resume to enable Apply, Match & Gap");
            }
            for job in dashboard.jobs() {
                print!("  #{:<4} {:<32} [{}]", job.id, job.title, job.required_skills);
                if let Some(score) = dashboard.match_score(job.id) {
                    print!("  match {score}%");
                }
                println!();
                if let Some(gap) = dashboard.skill_gap(job.id) {
                    println!("        matched: {}", gap.matched_skills.join(", "));
                    println!("        missing: {}", gap.missing_skills.join(", "));
                }
            }
        }
        CandidateView::Applications => {
            println!("My Applications");
            let applications = dashboard.applications();
            if applications.is_empty() {
                println!("  No applications yet.");
            }
            for application in applications {
                println!(
                    "  #{:<4} {:<32} {}",
                    application.job_id, application.job_title, application.status
                );
            }
        }
    }
}

// ── Recruiter screen (admins get the same commands) ─────────────────────

async fn recruiter_screen(state: &AppState, input: &mut Input) -> Result<Flow> {
    let dashboard = RecruiterDashboard::new(state.api.clone());
    dashboard.enter().await;

    // Staged resume files live until the screen is left.
    let mut open_resumes: Vec<ResumeHandle> = Vec::new();

    println!("Recruiter dashboard — post <title>|<description>|<skills>, rank <job>, apps <job>, shortlist <job> <user>, reject <job> <user>, view <user>, download <user>, stats [job], logout, quit");

    loop {
        render_recruiter(&dashboard);
        let Some(line) = prompt(input, "recruiter> ").await? else {
            return Ok(Flow::Quit);
        };

        if let Some(rest) = line.strip_prefix("post ") {
            let mut fields = rest.splitn(3, '|').map(str::trim);
            dashboard.set_draft(JobDraft {
                title: fields.next().unwrap_or_default().to_string(),
                description: fields.next().unwrap_or_default().to_string(),
                required_skills: fields.next().unwrap_or_default().to_string(),
            });
            dashboard.create_job().await;
            if let Some(message) = dashboard.take_message() {
                println!("· {message}");
            }
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("rank") => match parse_id(parts.next()) {
                Some(job_id) => dashboard.rank(job_id).await,
                None => println!("usage: rank <job-id>"),
            },
            Some("apps") => match parse_id(parts.next()) {
                Some(job_id) => dashboard.list_applications(job_id).await,
                None => println!("usage: apps <job-id>"),
            },
            Some(command @ ("shortlist" | "reject")) => {
                // Only these two transitions exist; `applied` is not a
                // command, so no other status can ever reach the API.
                let decision = match command {
                    "shortlist" => ReviewDecision::Shortlisted,
                    _ => ReviewDecision::Rejected,
                };
                match (parse_id(parts.next()), parse_id(parts.next())) {
                    (Some(job_id), Some(user_id)) => {
                        dashboard.update_status(job_id, user_id, decision).await
                    }
                    _ => println!("usage: shortlist|reject <job-id> <user-id>"),
                }
            }
            Some("view") => match parse_id(parts.next()) {
                Some(user_id) => match resume_id_for(&dashboard, user_id) {
                    Some(resume_id) => {
                        if let Some(handle) = dashboard.view_resume(resume_id).await {
                            println!(
                                "Resume staged at {} (kept until logout)",
                                handle.path().display()
                            );
                            open_resumes.push(handle);
                        }
                    }
                    None => println!("No such applicant in the current list."),
                },
                None => println!("usage: view <user-id>"),
            },
            Some("download") => match parse_id(parts.next()) {
                Some(user_id) => match resume_id_for(&dashboard, user_id) {
                    Some(resume_id) => {
                        if let Some(path) = dashboard
                            .download_resume(resume_id, &state.config.download_dir)
                            .await
                        {
                            println!("Saved {}", path.display());
                        }
                    }
                    None => println!("No such applicant in the current list."),
                },
                None => println!("usage: download <user-id>"),
            },
            Some("stats") => {
                if routes::resolve(Route::Analytics, &state.store.state())
                    != RouteDecision::Render
                {
                    println!("Analytics is recruiter-only.");
                } else {
                    let analytics = AnalyticsView::new(state.api.clone());
                    match parse_id(parts.next()) {
                        Some(job_id) => match analytics.job(job_id).await {
                            Ok(summary) => {
                                println!("{} — {} applications", summary.job_title, summary.total_applications);
                                println!(
                                    "  applied {} · shortlisted {} · rejected {} · avg score {:.1}%",
                                    summary.applied,
                                    summary.shortlisted,
                                    summary.rejected,
                                    summary.average_score
                                );
                            }
                            Err(_) => println!("Analytics unavailable."),
                        },
                        None => match analytics.dashboard().await {
                            Ok(summary) => {
                                println!(
                                    "{} jobs · {} applications",
                                    summary.total_jobs, summary.total_applications
                                );
                                println!(
                                    "  applied {} · shortlisted {} · rejected {} · avg match {:.1}%",
                                    summary.applied,
                                    summary.shortlisted,
                                    summary.rejected,
                                    summary.average_match_score
                                );
                            }
                            Err(_) => println!("Analytics unavailable."),
                        },
                    }
                }
            }
            Some("post") => println!("usage: post <title> | <description> | <skills>"),
            Some("logout") => {
                state.session.logout();
                return Ok(Flow::Continue);
            }
            Some("quit") | Some("exit") => return Ok(Flow::Quit),
            Some("help") | None => {
                println!("  post <title> | <description> | <skills> — create a job");
                println!("  rank <job-id> — recompute scores, then list applicants");
                println!("  apps <job-id> — list applicants without re-ranking");
                println!("  shortlist|reject <job-id> <user-id>");
                println!("  view|download <user-id> — fetch an applicant's resume");
                println!("  stats [job-id] — analytics");
            }
            Some(other) => println!("Unknown command '{other}'."),
        }
        if let Some(message) = dashboard.take_message() {
            println!("· {message}");
        }
    }
}

fn render_recruiter(dashboard: &RecruiterDashboard) {
    println!();
    println!("My Jobs");
    for job in dashboard.jobs() {
        println!("  #{:<4} {:<32} [{}]", job.id, job.title, job.required_skills);
    }
    if let Some(job_id) = dashboard.selected_job() {
        let applicants = dashboard.applicants();
        println!("Applications for job #{job_id} ({})", applicants.len());
        if applicants.is_empty() {
            println!("  No applicants yet.");
        }
        for applicant in applicants {
            println!(
                "  user #{:<4} {:<20} score {:>5.1}%  {:<12} {}",
                applicant.user_id,
                applicant.user_name,
                applicant.score,
                applicant.status.to_string(),
                if applicant.resume_id.is_some() {
                    "resume ✔"
                } else {
                    "no resume"
                }
            );
        }
    }
}

/// The applicant's resume id, from the currently displayed list. Outer
/// `None` means the user id is not in the list at all; inner `None` means
/// they applied without a resume on file.
fn resume_id_for(dashboard: &RecruiterDashboard, user_id: i64) -> Option<Option<i64>> {
    dashboard
        .applicants()
        .iter()
        .find(|applicant| applicant.user_id == user_id)
        .map(|applicant| applicant.resume_id)
}
