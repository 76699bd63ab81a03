//! Terminal front end for the skills coach API.
//!
//! Commands: `search <job title>`, `pick <n>`, `scenario <n>`, `answer <text>`,
//! `example`, `feedback`, `toggle`, `show`, `help`, `quit`.

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use skills_coach::client::CoachClient;
use skills_coach::session::{Session, Stage, View};

#[derive(Parser)]
#[command(version, about = "Practice workplace scenarios from the terminal", long_about = None)]
struct Cli {
    /// Base URL of a running skills-coach server
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,
}

const HELP: &str = "\
search <job title>   find occupations
pick <n>             generate scenarios for result n
scenario <n>         practice scenario n
answer <text>        submit your answer for feedback
example              show the model answer
feedback             show the feedback again
toggle               switch between feedback and example
show                 redraw the current step
quit                 exit";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CoachClient::new(&cli.server);
    let mut session = Session::new();

    println!("Workplace Skills Coach. Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "show" => render(&session),
            "search" => search(&client, &mut session, rest).await,
            "pick" => match parse_choice(rest) {
                Some(index) => pick(&client, &mut session, index).await,
                None => println!("Usage: pick <n>"),
            },
            "scenario" => match parse_choice(rest) {
                Some(index) => match session.choose_scenario(index) {
                    Ok(()) => render(&session),
                    Err(e) => println!("{e}"),
                },
                None => println!("Usage: scenario <n>"),
            },
            "answer" => answer(&client, &mut session, rest).await,
            "example" => switch_view(&mut session, View::Example),
            "feedback" => switch_view(&mut session, View::Feedback),
            "toggle" => match session.toggle_view() {
                Ok(_) => render(&session),
                Err(e) => println!("{e}"),
            },
            other => println!("Unknown command `{other}`. Type `help`."),
        }
    }

    Ok(())
}

/// Converts a 1-based choice to an index.
fn parse_choice(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
}

async fn search(client: &CoachClient, session: &mut Session, query: &str) {
    let ticket = match session.begin_search(query) {
        Ok(ticket) => ticket,
        Err(e) => return println!("{e}"),
    };
    println!("Searching...");
    let outcome = client.search(query).await.map_err(|e| e.to_string());
    session.finish_search(ticket, outcome);
    render(session);
}

/// Fetches occupation detail then generates scenarios, as one step.
async fn pick(client: &CoachClient, session: &mut Session, index: usize) {
    let ticket = match session.begin_select(index) {
        Ok(ticket) => ticket,
        Err(e) => return println!("{e}"),
    };
    let Some(occupation) = session.loading_occupation().cloned() else {
        return;
    };
    println!("Creating practice scenarios for {}...", occupation.title);

    let outcome = async {
        let detail = client.details(&occupation.code).await?;
        client.generate_scenarios(&detail).await
    }
    .await
    .map_err(|e| e.to_string());

    session.finish_select(ticket, outcome);
    render(session);
}

async fn answer(client: &CoachClient, session: &mut Session, text: &str) {
    if let Err(e) = session.set_response(text) {
        return println!("{e}");
    }
    let ticket = match session.begin_feedback() {
        Ok(ticket) => ticket,
        Err(e) => return println!("{e}"),
    };
    let Some(scenario) = session.active_scenario().cloned() else {
        return;
    };
    println!("Getting feedback...");
    let outcome = client
        .feedback(text, &scenario)
        .await
        .map_err(|e| e.to_string());
    session.finish_feedback(ticket, outcome);
    render(session);
}

fn switch_view(session: &mut Session, view: View) {
    match session.show(view) {
        Ok(()) => render(session),
        Err(e) => println!("{e}"),
    }
}

fn render(session: &Session) {
    if let Some(message) = session.message() {
        println!("! {message}");
    }

    match session.stage() {
        Stage::Idle => println!("Search for a job title to begin."),
        Stage::Searched { results } => {
            for (i, occupation) in results.iter().enumerate() {
                println!("{:>2}. {} ({})", i + 1, occupation.title, occupation.code);
            }
        }
        Stage::OccupationSelected {
            occupation,
            scenarios,
            ..
        } => {
            println!("Practice scenarios for {}:", occupation.title);
            for (i, scenario) in scenarios.iter().enumerate() {
                println!("{:>2}. [{:?}] {}", i + 1, scenario.kind, scenario.title);
            }
        }
        Stage::ScenarioActive {
            scenarios,
            active,
            feedback,
            view,
            ..
        } => {
            let Some(scenario) = scenarios.get(*active) else {
                return;
            };
            println!("== {} ==\n{}\n", scenario.title, scenario.prompt);
            println!("Tips:");
            for tip in &scenario.tips {
                println!("  - {tip}");
            }
            println!("What a good answer includes:");
            for criterion in &scenario.criteria {
                println!("  - {criterion}");
            }
            match (view, feedback) {
                (View::Example, _) => println!("\nExample answer:\n{}", scenario.example),
                (View::Feedback, Some(text)) => println!("\nFeedback:\n{text}"),
                (View::Feedback, None) => println!("\nType `answer <your response>` to get feedback."),
            }
        }
    }
}
