use std::io::BufRead;

use kanal::AsyncSender;
use lexis_types::{AppEvent, Theme, UiEvent};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
  <word>              look up a word
  :fav <word>         toggle a favorite
  :favorites          list favorites
  :history            list recent searches
  :clear-history      forget recent searches
  :theme light|dark   switch theme
  :lang <code>        translate into another language (en disables)
  :quit               exit";

/// Read commands from stdin until EOF or cancellation
pub async fn input_loop(
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (line_tx, line_rx) = kanal::unbounded::<String>();
    let line_rx = line_rx.to_async();

    // Plain thread: a pending read on the blocking pool would stall runtime shutdown
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let line = tokio::select! {
            line = line_rx.recv() => line.ok(),
            _ = cancel.cancelled() => {
                tracing::info!("Input reader stopping");
                return Ok(());
            }
        };

        let Some(line) = line else {
            tracing::debug!("stdin closed");
            ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
            return Ok(());
        };

        match parse_command(&line) {
            Ok(Some(event)) => ui_to_app_tx.send(AppEvent::UiEvent(event)).await?,
            Ok(None) => {}
            Err(message) => eprintln!("{message}\n{HELP}"),
        }
    }
}

/// Turn one input line into a UI event; `Ok(None)` for blank lines
pub fn parse_command(line: &str) -> Result<Option<UiEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(UiEvent::SearchText(line.to_string())));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let event = match (name, arg) {
        ("fav", "") => return Err("Usage: :fav <word>".to_string()),
        ("fav", word) => UiEvent::ToggleFavorite(word.to_string()),
        ("favorites", _) => UiEvent::ShowFavorites,
        ("history", _) => UiEvent::ShowHistory,
        ("clear-history", _) => UiEvent::ClearHistory,
        ("theme", value) => {
            let theme = Theme::parse(value).ok_or_else(|| format!("Unknown theme '{value}'"))?;
            UiEvent::SetTheme(theme)
        }
        ("lang", "") => return Err("Usage: :lang <code>".to_string()),
        ("lang", code) => UiEvent::SetLanguage(code.to_string()),
        ("quit" | "q", _) => UiEvent::Close,
        _ => return Err(format!("Unknown command ':{name}'")),
    };

    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_word_searches() {
        match parse_command("  run away ") {
            Ok(Some(UiEvent::SearchText(text))) => assert_eq!(text, "run away"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_ignored() {
        assert!(matches!(parse_command("   "), Ok(None)));
    }

    #[test]
    fn test_commands() {
        assert!(matches!(
            parse_command(":fav run"),
            Ok(Some(UiEvent::ToggleFavorite(w))) if w == "run"
        ));
        assert!(matches!(
            parse_command(":theme DARK"),
            Ok(Some(UiEvent::SetTheme(Theme::Dark)))
        ));
        assert!(matches!(
            parse_command(":lang fr"),
            Ok(Some(UiEvent::SetLanguage(code))) if code == "fr"
        ));
        assert!(matches!(parse_command(":history"), Ok(Some(UiEvent::ShowHistory))));
        assert!(matches!(parse_command(":q"), Ok(Some(UiEvent::Close))));
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_command(":fav").is_err());
        assert!(parse_command(":theme sepia").is_err());
        assert!(parse_command(":launch").is_err());
    }
}
