use anyhow::Result;
use painel_assist::{AnsweringClient, Credential, Session, Submission, Transport};
use painel_core::Conversation;
use std::io::{BufRead, Write};

const HELP: &str = "Commands:\n\
- /help\n\
- /history (full transcript)\n\
- /reset (clear the transcript)\n\
- /quit\n\
Anything else is sent as a question about the loaded transactions.";

enum Slash {
    Reply(String),
    Reset,
    Quit,
}

fn handle_slash(input: &str, log: &Conversation) -> Option<Slash> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    let out = match s {
        "/help" => Slash::Reply(HELP.to_string()),
        "/history" => Slash::Reply(render_history(log)),
        "/reset" => Slash::Reset,
        "/quit" | "/exit" => Slash::Quit,
        _ => Slash::Reply("Unknown command. Try /help".to_string()),
    };
    Some(out)
}

pub fn render_history(log: &Conversation) -> String {
    if log.is_empty() {
        return "(no questions yet)".to_string();
    }
    let mut out = String::from("### Conversation history\n");
    for e in log.entries() {
        out.push_str(&format!("\nyou: {}\nassistant: {}\n", e.question, e.answer));
    }
    out
}

/// Line-oriented chat loop over `input`, writing replies to `output`.
pub fn run_chat<T: Transport>(
    session: &mut Session,
    client: &AnsweringClient<T>,
    credential: &Credential,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    writeln!(
        output,
        "Loaded {} transactions. Ask a question, or /help.",
        session.dataset().len()
    )?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(cmd) = handle_slash(line, session.conversation()) {
            match cmd {
                Slash::Reply(text) => writeln!(output, "{text}")?,
                Slash::Reset => {
                    session.reset();
                    writeln!(output, "Transcript cleared.")?;
                }
                Slash::Quit => break,
            }
            continue;
        }

        match session.submit(line, credential, client) {
            Submission::Rejected => {}
            Submission::Answered(result) => writeln!(output, "assistant: {result}")?,
        }
    }

    Ok(())
}
