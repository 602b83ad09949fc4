//! Terminal input and prompt utilities for the client.

use std::io::Write;

use rustyline::{
    Cmd, ConditionalEventHandler, DefaultEditor, Event, EventContext, EventHandler, RepeatCount,
    error::ReadlineError,
};
use tokio::sync::mpsc;

use crate::{
    domain::{AVATAR_CHOICES, DEFAULT_AVATAR, Profile, parse_avatar, validate_name},
    error::ClientError,
};

/// Something the user did at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line submitted with Enter (untrimmed)
    Line(String),
    /// Any key pressed at the compose prompt
    Keystroke,
}

/// Emits [`InputEvent::Keystroke`] for every key press and lets the editor
/// handle the key as usual.
pub struct KeystrokeNotifier {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl KeystrokeNotifier {
    pub fn new(tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self { tx }
    }

    /// Forward one key press as a typing signal.
    ///
    /// Returns `false` when the event carries no key or the session is gone.
    pub fn notify(&self, evt: &Event) -> bool {
        evt.get(0).is_some() && self.tx.send(InputEvent::Keystroke).is_ok()
    }
}

impl ConditionalEventHandler for KeystrokeNotifier {
    fn handle(
        &self,
        evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext,
    ) -> Option<Cmd> {
        self.notify(evt);
        None
    }
}

/// Run the line editor on a dedicated thread.
///
/// The thread ends on Ctrl+C, Ctrl+D, or once the receiving side is dropped;
/// the channel closing tells the session the user is done.
pub fn spawn_input_thread(
    prompt: String,
    tx: mpsc::UnboundedSender<InputEvent>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };
        rl.bind_sequence(
            Event::Any,
            EventHandler::Conditional(Box::new(KeystrokeNotifier::new(tx.clone()))),
        );

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if tx.send(InputEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    })
}

/// Prompt shown while composing
pub fn prompt_for(profile: &Profile) -> String {
    format!("{} {}> ", profile.avatar(), profile.name())
}

/// Redisplay the prompt after printing incoming output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Build the local profile, asking interactively for whatever was not given
/// on the command line. Blocks on terminal input.
pub fn prompt_profile(
    name: Option<String>,
    avatar: Option<String>,
) -> Result<Profile, ClientError> {
    if let (Some(name), Some(avatar)) = (&name, &avatar) {
        return Profile::new(name, avatar);
    }

    let mut rl = DefaultEditor::new().map_err(|e| ClientError::Input(e.to_string()))?;

    let name = match name {
        Some(name) => validate_name(&name)?,
        None => loop {
            let line = read_line(&mut rl, "Your name: ")?;
            match validate_name(&line) {
                Ok(name) => break name,
                Err(e) => println!("{}", e),
            }
        },
    };

    let avatar = match avatar {
        Some(avatar) => parse_avatar(&avatar)?,
        None => {
            println!("{}", avatar_menu());
            loop {
                let line = read_line(&mut rl, "Avatar: ")?;
                match parse_avatar(&line) {
                    Ok(avatar) => break avatar,
                    Err(e) => println!("{}", e),
                }
            }
        }
    };

    Profile::new(&name, avatar)
}

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<String, ClientError> {
    rl.readline(prompt)
        .map_err(|e| ClientError::Input(e.to_string()))
}

/// Numbered list of avatars for the name-entry screen
pub fn avatar_menu() -> String {
    let choices: Vec<String> = AVATAR_CHOICES
        .iter()
        .enumerate()
        .map(|(i, glyph)| format!("{}) {}", i + 1, glyph))
        .collect();
    format!(
        "Pick an avatar: {}  (Enter for {})",
        choices.join("  "),
        DEFAULT_AVATAR
    )
}
