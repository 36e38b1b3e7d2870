//! Run command implementation (console voice session)
//!
//! The console stands in for the platform speech services: a typed line is
//! the final transcript, and spoken feedback is printed. Utterances finish as
//! soon as they are printed.

use anyhow::{Context, Result};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use assistme::Destination;
use assistme::accessibility::{AccessibilitySettings, SettingsStore};
use assistme::config::Config;
use assistme::voice::{
    AssistantSurface, CollaboratorError, Collaborators, EngineEvent, ListenOutcome,
    LogoutHandler, Navigator, RecognitionRequest, ScreenReader, SessionId, SessionManager,
    SpeechError, SpeechHost, SpeechRecognizer, SpeechSynthesizer, StaticCapabilities, Utterance,
    UtteranceId,
};

/// State shared between the console host objects and the run loop
#[derive(Debug)]
struct ConsoleState {
    page: Destination,
    signed_in: bool,
    listening: Option<SessionId>,
    finished_utterances: VecDeque<UtteranceId>,
}

type Shared = Rc<RefCell<ConsoleState>>;

struct ConsoleRecognizer(Shared);

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(&mut self, request: &RecognitionRequest) -> Result<(), SpeechError> {
        debug!("Console recognizer listening ({})", request.language);
        self.0.borrow_mut().listening = Some(request.session);
        Ok(())
    }

    fn abort(&mut self, session: SessionId) {
        let mut state = self.0.borrow_mut();
        if state.listening == Some(session) {
            state.listening = None;
        }
    }
}

struct ConsoleSynthesizer(Shared);

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        println!("  (speaking) {}", utterance.text);
        self.0.borrow_mut().finished_utterances.push_back(utterance.id);
        Ok(())
    }

    fn cancel(&mut self) {
        self.0.borrow_mut().finished_utterances.clear();
    }
}

struct ConsoleNavigator(Shared);

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, destination: Destination) -> Result<(), CollaboratorError> {
        let mut state = self.0.borrow_mut();
        if !state.signed_in {
            return Err(CollaboratorError("signed out".to_string()));
        }
        state.page = destination;
        println!("  -> {}", destination.path());
        Ok(())
    }
}

struct ConsoleLogout(Shared);

impl LogoutHandler for ConsoleLogout {
    fn logout(&mut self) {
        self.0.borrow_mut().signed_in = false;
        println!("  -> signed out");
    }
}

struct ConsoleAssistant(Shared);

impl AssistantSurface for ConsoleAssistant {
    fn is_available(&self) -> bool {
        self.0.borrow().signed_in
    }

    fn open(&mut self) -> Result<(), CollaboratorError> {
        println!("  -> assistant opened");
        Ok(())
    }
}

struct ConsoleScreen(Shared);

impl ScreenReader for ConsoleScreen {
    fn visible_text(&self) -> Option<String> {
        let state = self.0.borrow();
        state
            .signed_in
            .then(|| format!("You are on the {} page.", state.page.spoken_name()))
    }
}

/// Run an interactive session on stdin/stdout
pub async fn run_command(config_path: Option<&Path>) -> Result<()> {
    let mut config = Config::load(config_path)?;
    let save_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);
    let classifier = config.classifier()?;
    let engine_config = config.engine_config()?;
    let listen_timeout = engine_config.listen_timeout;

    let shared: Shared = Rc::new(RefCell::new(ConsoleState {
        page: Destination::Dashboard,
        signed_in: true,
        listening: None,
        finished_utterances: VecDeque::new(),
    }));

    let store = Rc::new(SettingsStore::with_settings(config.accessibility));
    let host = SpeechHost {
        recognizer: Box::new(ConsoleRecognizer(shared.clone())),
        synthesizer: Box::new(ConsoleSynthesizer(shared.clone())),
        capabilities: Box::new(StaticCapabilities::available()),
    };
    let collaborators = Collaborators {
        navigator: Box::new(ConsoleNavigator(shared.clone())),
        logout: Box::new(ConsoleLogout(shared.clone())),
        assistant: Box::new(ConsoleAssistant(shared.clone())),
        screen_reader: Some(Box::new(ConsoleScreen(shared.clone()))),
    };
    let mut manager = SessionManager::new(store, host, collaborators, classifier, engine_config);

    println!("AssistMe console. Type a command as you would say it.");
    println!("  :listen  open the microphone and wait for the next line");
    println!("  :cancel  stop the current session");
    println!("  :status  show session state and settings");
    println!("  :locale <code>  switch language (en, es, fr, de)");
    println!("  :save    keep the current settings in {}", save_path.display());
    println!("  :quit    exit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        settle(&mut manager, &shared);

        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let listening_since = manager
            .session()
            .filter(|s| s.state.is_listening())
            .map(|s| s.started_at);

        let next = match listening_since {
            Some(started_at) => {
                let elapsed = (Utc::now() - started_at).to_std().unwrap_or_default();
                let remaining = listen_timeout.saturating_sub(elapsed);
                match tokio::time::timeout(remaining, lines.next_line()).await {
                    Ok(line) => line,
                    Err(_) => {
                        println!();
                        manager.check_timeout(Utc::now());
                        continue;
                    }
                }
            }
            None => lines.next_line().await,
        };

        let Some(line) = next.context("Failed to read stdin")? else {
            break;
        };
        match line.trim() {
            ":quit" | ":q" => break,
            ":cancel" => {
                if !manager.cancel() {
                    println!("  nothing to cancel");
                }
            }
            ":status" => print_status(&manager),
            ":save" => {
                let settings = manager.settings().snapshot();
                match save_settings(&mut config, settings, &save_path) {
                    Ok(()) => println!("  settings saved"),
                    Err(e) => println!("  {:#}", e),
                }
            }
            ":listen" => {
                if let ListenOutcome::Busy { state, .. } = manager.start_listening() {
                    println!("  busy ({})", state);
                }
            }
            cmd if cmd.starts_with(":locale") => {
                let code = cmd.trim_start_matches(":locale").trim();
                match manager.set_locale(code) {
                    Ok(locale) => println!("  locale set to {}", locale.language_tag()),
                    Err(e) => println!("  {}", e),
                }
            }
            "" if !manager.state().is_listening() => {}
            _ => transcript(&mut manager, &shared, &line),
        }
    }

    manager.cancel();
    settle(&mut manager, &shared);
    Ok(())
}

/// Deliver a typed line as the final transcript, opening a session if needed
fn transcript(manager: &mut SessionManager, shared: &Shared, line: &str) {
    if !manager.state().is_listening() {
        match manager.start_listening() {
            ListenOutcome::Started(_) => {}
            ListenOutcome::Busy { state, .. } => {
                println!("  busy ({})", state);
                return;
            }
            ListenOutcome::Unavailable(_) | ListenOutcome::Failed(_) => return,
        }
    }

    let session = shared.borrow().listening;
    if let Some(session) = session {
        manager.on_result(session, line);
    }
}

/// Complete printed utterances and print the resulting events
fn settle(manager: &mut SessionManager, shared: &Shared) {
    loop {
        let finished = shared.borrow_mut().finished_utterances.pop_front();
        let Some(id) = finished else { break };
        manager.on_utterance_end(id);
    }

    for event in manager.poll_events() {
        match event {
            EngineEvent::Feedback {
                text,
                spoken: false,
                ..
            } => println!("  {}", text),
            EngineEvent::Notice { message } => println!("  note: {}", message),
            EngineEvent::IntentClassified { intent, .. } => debug!("Intent: {}", intent),
            EngineEvent::SessionEnded { session, outcome } => {
                let mut state = shared.borrow_mut();
                if state.listening == Some(session.id) {
                    state.listening = None;
                }
                debug!("Session {} ended: {:?}", session.id, outcome);
            }
            _ => {}
        }
    }
}

fn print_status(manager: &SessionManager) {
    let settings = manager.settings().snapshot();
    println!("  state:          {}", manager.state());
    println!("  font scale:     {}", settings.font_scale.as_str());
    println!("  high contrast:  {}", on_off(settings.high_contrast));
    println!("  voice mode:     {}", on_off(settings.voice_mode_enabled));
    println!("  locale:         {}", settings.locale.language_tag());
    if let Some(error) = &manager.last_error {
        println!("  last error:     {}", error);
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Persist the live accessibility settings, keeping the other sections
fn save_settings(config: &mut Config, settings: AccessibilitySettings, path: &Path) -> Result<()> {
    config.accessibility = settings;
    config.save_to_file(path)?;
    debug!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistme::accessibility::{FontScale, Locale};
    use tempfile::TempDir;

    #[test]
    fn test_save_settings_keeps_rules_and_speech() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [speech]
            rate = 0.9
            listen_timeout_secs = 10

            [[rules.en]]
            name = "bye"
            priority = 1
            intent = "logout"
            keywords = [["bye"]]
            "#,
        )
        .unwrap();
        let mut config = Config::load(Some(&path)).unwrap();

        let store = SettingsStore::with_settings(config.accessibility);
        store.increase_font_scale();
        store.toggle_contrast();
        store.set_locale("de").unwrap();
        save_settings(&mut config, store.snapshot(), &path).unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.accessibility.font_scale, FontScale::Large);
        assert!(reloaded.accessibility.high_contrast);
        assert_eq!(reloaded.accessibility.locale, Locale::De);
        assert_eq!(reloaded.speech.rate, 0.9);
        assert_eq!(reloaded.speech.listen_timeout_secs, 10);
        assert_eq!(reloaded.rules["en"][0].name, "bye");
        assert_eq!(reloaded, config);
    }
}
