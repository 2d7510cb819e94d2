//! Command-line checks against a running page server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use page_controller::{
    render_payload,
    validation::{field_is_valid, validate_submission},
    DataSource, HttpDataSource,
};
use shared::{
    domain::{ContactField, ContactSubmission},
    protocol::api_data_route,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Exercise the page controller's loader and validator from a terminal")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the API payload and print it the way the page shows it.
    Fetch {
        #[arg(long, default_value = "http://127.0.0.1:5001")]
        server_url: String,
        #[arg(long, default_value_t = api_data_route().to_string())]
        path: String,
    },
    /// Check contact form values with the browser's rules.
    Validate {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    match args.command {
        Command::Fetch { server_url, path } => {
            let source = HttpDataSource::parse(&server_url)?;
            info!(url = %source.endpoint(&path)?, "fetching");
            let payload = source.fetch_json(&path).await?;
            println!("{}", render_payload(&payload)?);
        }
        Command::Validate {
            name,
            email,
            message,
        } => {
            let submission = ContactSubmission {
                name,
                email,
                message,
            };
            if !report(&submission) {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn report(submission: &ContactSubmission) -> bool {
    for field in ContactField::ALL {
        let verdict = if field_is_valid(field, submission.value(field)) {
            "ok".to_string()
        } else {
            format!("invalid ({})", field.requirement())
        };
        println!("{:<8} {verdict}", field.element_id());
    }
    validate_submission(submission).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validate_subcommand() {
        let args = Args::try_parse_from([
            "probe",
            "validate",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
        ])
        .expect("args");
        let Command::Validate { name, message, .. } = args.command else {
            panic!("expected validate");
        };
        assert_eq!(name, "Ada");
        assert_eq!(message, "");
    }

    #[test]
    fn fetch_defaults_to_local_server() {
        let args = Args::try_parse_from(["probe", "fetch"]).expect("args");
        let Command::Fetch { server_url, path } = args.command else {
            panic!("expected fetch");
        };
        assert_eq!(server_url, "http://127.0.0.1:5001");
        assert_eq!(path, "/api/data");
    }

    #[test]
    fn report_reflects_every_rule() {
        assert!(report(&ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello there, friend".into(),
        }));
        assert!(!report(&ContactSubmission::default()));
    }
}
