use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use livesync::cli::CliArgs;
use livesync::model::SourceBuffer;
use livesync::script::Script;
use livesync::{AppModel, Host, HostEvent, Session, SyncConfig};

/// Host backed by the system clipboard and browser
struct CliHost {
    print_events: bool,
}

impl Host for CliHost {
    fn notify(&mut self, event: &HostEvent) {
        if !self.print_events {
            return;
        }
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Failed to encode host event: {}", e),
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }

    fn open_detached(&mut self, document: &str) -> Result<()> {
        let path = detached_path();
        std::fs::write(&path, document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(())
    }
}

fn detached_path() -> PathBuf {
    std::env::temp_dir().join(format!("livesync-detached-{}.html", std::process::id()))
}

fn main() -> Result<()> {
    livesync::tracing::init();

    let args = CliArgs::parse();
    let config = SyncConfig::load();

    let source = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SourceBuffer::with_text(&text)
        }
        None => SourceBuffer::new(),
    };

    let host = CliHost {
        print_events: args.print_events,
    };
    let mut session = Session::new(AppModel::with_source(source, config), host);
    session.start();
    session.wait();

    if let Some(path) = &args.script {
        let script = Script::load(path)
            .with_context(|| format!("Failed to load script {}", path.display()))?;
        script.run(&mut session)?;
    }

    if let Some(error) = &session.model().last_error {
        tracing::warn!("Last render failed: {}", error);
    }

    let text = session.model().source.text();
    match &args.output {
        Some(path) => std::fs::write(path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None if !args.print_events => std::io::stdout().write_all(text.as_bytes())?,
        None => {}
    }

    Ok(())
}
