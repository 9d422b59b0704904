use std::io::Write;

use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::BackendClient;
use crate::api::models::{EmailType, GenerateRequest, Tone};
use crate::cli::ComposeArgs;
use crate::compose::validate::{FormInput, validate_form};
use crate::compose::{ComposeSession, ComposeState};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::text::print_lines;

use super::generate::draft_lines;

const MAX_ERRORS_SHOWN: usize = 3;

const HELP: &str = "\
commands:
  generate <prompt>   ask the assistant for a draft
  tone <tone>         professional | casual | formal | friendly
  type <type>         general | business | marketing | follow-up | invitation
  to <addresses>      add recipients (comma, semicolon separated)
  rm <address>        remove a recipient
  clear               remove all recipients
  show                print the draft, recipients and state
  edit                start or leave editing the draft
  subject <text>      set the subject while editing
  body <text>         set the body while editing (\\n for line breaks)
  save | cancel       finish editing
  send                send the draft to all recipients
  dismiss             acknowledge the last result and return to the draft
  copy                print the draft as plain text
  retry               check the backend again
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Generate(String),
    Tone(Tone),
    Type(EmailType),
    To(String),
    Remove(String),
    Clear,
    Show,
    Edit,
    Subject(String),
    Body(String),
    Save,
    Cancel,
    Send,
    Dismiss,
    Copy,
    Retry,
    Help,
    Quit,
}

#[derive(Debug, Default)]
struct Preferences {
    tone: Tone,
    email_type: EmailType,
}

pub async fn run(ctx: &AppContext, args: ComposeArgs) -> AppResult<()> {
    let backend = ctx.backend()?;
    let mut session = ComposeSession::new(ctx.sender_label(args.sender.as_deref()));
    let mut prefs = Preferences::default();

    session.start(&backend).await;
    announce_health(&backend, &session);
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("[{}] > ", session.state());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }

        if let Err(err) = execute(&backend, &mut session, &mut prefs, command).await {
            println!("error: {err}");
        }
    }

    Ok(())
}

fn announce_health(backend: &BackendClient, session: &ComposeSession) {
    let health = session.health();
    if health.is_available() {
        println!("connected to {}", backend.base_url());
        return;
    }

    println!(
        "{}",
        health
            .last_error()
            .unwrap_or("backend server is not responding")
    );
    println!("compose is disabled until the backend responds; type `retry`");
}

async fn execute(
    backend: &BackendClient,
    session: &mut ComposeSession,
    prefs: &mut Preferences,
    command: ReplCommand,
) -> AppResult<()> {
    match command {
        ReplCommand::Generate(prompt) => {
            let request = GenerateRequest::new(prompt)
                .with_tone(prefs.tone)
                .with_type(prefs.email_type);
            println!("generating...");
            session.generate(backend, request).await?;
            print_lines(&draft_lines(session.draft(), session.recipients()))?;
        }
        ReplCommand::Tone(tone) => {
            prefs.tone = tone;
            println!("tone set to {tone:?}");
        }
        ReplCommand::Type(email_type) => {
            prefs.email_type = email_type;
            println!("email type set to {email_type:?}");
        }
        ReplCommand::To(raw) => {
            let report = session.add_recipient_list(&raw)?;
            if !report.valid.is_empty() {
                println!("{} valid address(es) found", report.valid.len());
            }
            for error in report.errors.iter().take(MAX_ERRORS_SHOWN) {
                println!("  {error}");
            }
            if report.errors.len() > MAX_ERRORS_SHOWN {
                println!("  ... and {} more", report.errors.len() - MAX_ERRORS_SHOWN);
            }
            println!("ready to send to {} recipient(s)", session.recipients().len());
        }
        ReplCommand::Remove(address) => {
            if session.remove_recipient(&address)? {
                println!("removed {address}");
            } else {
                println!("{address} is not a recipient");
            }
        }
        ReplCommand::Clear => {
            session.clear_recipients()?;
            println!("recipients cleared");
        }
        ReplCommand::Show => show(session)?,
        ReplCommand::Edit => {
            session.toggle_edit()?;
            if session.state() == ComposeState::Editing {
                println!("editing; use `subject`, `body`, then `save` or `cancel`");
            } else {
                println!("edit discarded");
            }
        }
        ReplCommand::Subject(subject) => {
            let buffer = session.edit_buffer_mut()?;
            warn_on_field(FormInput {
                subject: Some(&subject),
                ..FormInput::default()
            });
            buffer.subject = subject;
        }
        ReplCommand::Body(body) => {
            let buffer = session.edit_buffer_mut()?;
            let body = body.replace("\\n", "\n");
            warn_on_field(FormInput {
                body: Some(&body),
                ..FormInput::default()
            });
            buffer.body = body;
        }
        ReplCommand::Save => {
            let (subject, body) = session
                .edit_buffer()
                .map(|buffer| (buffer.subject.clone(), buffer.body.clone()))
                .unwrap_or_default();
            session.save(subject, body)?;
            println!("draft updated");
        }
        ReplCommand::Cancel => {
            session.cancel()?;
            println!("edit discarded");
        }
        ReplCommand::Send => {
            println!("sending to {} recipient(s)...", session.recipients().len());
            let outcome = session.send(backend).await?;
            print_lines(&outcome.report_lines())?;
        }
        ReplCommand::Dismiss => {
            let state = session.dismiss()?;
            println!("back to {state}");
        }
        ReplCommand::Copy => match session.draft() {
            Some(draft) => println!("{}", draft.to_clipboard_text()),
            None => println!("no draft yet"),
        },
        ReplCommand::Retry => {
            session.retry_health(backend).await;
            announce_health(backend, session);
        }
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }

    Ok(())
}

fn show(session: &ComposeSession) -> AppResult<()> {
    println!("state: {}", session.state());
    println!("sender: {}", session.sender_label());
    if let Some(buffer) = session.edit_buffer() {
        println!("editing subject: {}", buffer.subject);
        println!("editing body:\n{}", buffer.body);
    }
    print_lines(&draft_lines(session.draft(), session.recipients()))?;
    if let Some(outcome) = session.last_outcome() {
        print_lines(&outcome.report_lines())?;
    } else if let Some(error) = session.last_error() {
        println!("last error: {error}");
    }
    Ok(())
}

/// Non-blocking hints while editing; `save` only insists on non-empty fields.
fn warn_on_field(input: FormInput<'_>) {
    let result = validate_form(&input);
    for errors in result.errors.values() {
        for error in errors {
            println!("warning: {error}");
        }
    }
}

fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let needs_arg = |usage: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("usage: {usage}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "generate" | "gen" => ReplCommand::Generate(needs_arg("generate <prompt>")?),
        "tone" => ReplCommand::Tone(Tone::from_str(&needs_arg("tone <tone>")?, true)?),
        "type" => ReplCommand::Type(EmailType::from_str(&needs_arg("type <type>")?, true)?),
        "to" | "add" => ReplCommand::To(needs_arg("to <addresses>")?),
        "rm" | "remove" => ReplCommand::Remove(needs_arg("rm <address>")?),
        "clear" => ReplCommand::Clear,
        "show" => ReplCommand::Show,
        "edit" => ReplCommand::Edit,
        "subject" => ReplCommand::Subject(rest.to_string()),
        "body" => ReplCommand::Body(rest.to_string()),
        "save" => ReplCommand::Save,
        "cancel" => ReplCommand::Cancel,
        "send" => ReplCommand::Send,
        "dismiss" | "ok" => ReplCommand::Dismiss,
        "copy" => ReplCommand::Copy,
        "retry" => ReplCommand::Retry,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn keeps_the_full_prompt() {
        assert_eq!(
            parse_line("generate  Invite the team to Friday's demo "),
            Ok(Some(ReplCommand::Generate(
                "Invite the team to Friday's demo".to_string()
            )))
        );
    }

    #[test]
    fn parses_tone_and_type_case_insensitively() {
        assert_eq!(
            parse_line("tone Friendly"),
            Ok(Some(ReplCommand::Tone(Tone::Friendly)))
        );
        assert_eq!(
            parse_line("type follow-up"),
            Ok(Some(ReplCommand::Type(EmailType::FollowUp)))
        );
        assert!(parse_line("tone grumpy").is_err());
    }

    #[test]
    fn commands_needing_arguments_report_usage() {
        assert_eq!(parse_line("to"), Err("usage: to <addresses>".to_string()));
        assert_eq!(parse_line("rm"), Err("usage: rm <address>".to_string()));
    }

    #[test]
    fn empty_subject_is_passed_through() {
        assert_eq!(
            parse_line("subject"),
            Ok(Some(ReplCommand::Subject(String::new())))
        );
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert!(parse_line("launch rockets").is_err());
    }
}
