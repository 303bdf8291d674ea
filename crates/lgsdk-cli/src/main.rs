//! `lgsdk-demo`: counts presses of even-numbered G-keys and mouse buttons on
//! the keyboard LCD.
//!
//! ```text
//! lgsdk-demo --lib-dir "C:\Program Files\Logitech Gaming Software\SDK"
//! ```
//!
//! Press Ctrl+C to quit; the shutdown signal releases both SDKs.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueHint};
use lgsdk_core::{Color, SdkConfig, ShutdownSignal};
use lgsdk_gkey::{GkeyLibrary, GkeySession, KeyEvent, listener};
use lgsdk_lcd::{LcdLibrary, LcdNative, LcdSession, LcdType};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Parser)]
#[command(name = "lgsdk-demo", version, about = "Logitech G SDK demo applet")]
struct Cli {
    /// TOML file with the SDK library locations
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory holding the x86/x64 wrapper folders (overrides the config
    /// file and LGSDK_LIB_DIR)
    #[arg(long, value_hint = ValueHint::DirPath)]
    lib_dir: Option<PathBuf>,

    /// Applet name shown in Logitech Gaming Software
    #[arg(long, default_value = "Example")]
    name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let signal = ShutdownSignal::new();
    let _guard = signal.install_process_hooks()?;

    let lcd_library = LcdLibrary::load(&config).context("loading the LCD library")?;
    let gkey_library = GkeyLibrary::load(&config).context("loading the G-key library")?;

    let mut lcd = LcdSession::new(Arc::new(lcd_library), signal.clone());
    if !lcd.init(&cli.name, LcdType::ANY)? {
        bail!("no LCD available for applet '{}'", cli.name);
    }

    let mut counter = 0u32;
    show_counter(&lcd, counter)?;

    let (presses, received) = mpsc::channel::<KeyEvent>();
    let mut gkeys = GkeySession::new(Arc::new(gkey_library), signal.clone());
    gkeys.add_event_listener(
        "keyDown",
        listener(move |event| {
            // The receiver only goes away while shutting down.
            let _ = presses.send(*event);
        }),
    );
    if !gkeys.init()? {
        bail!("G-key SDK could not be initialized");
    }

    info!("Running, press Ctrl+C to quit");
    while !signal.is_triggered() {
        match received.recv_timeout(POLL_INTERVAL) {
            Ok(event) if is_counted(&event) => {
                counter += 1;
                debug!("Key {} pressed, count is now {}", event.key_index, counter);
                show_counter(&lcd, counter)?;
            }
            Ok(_) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    gkeys.shutdown();
    lcd.shutdown();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SdkConfig> {
    let config = match &cli.config {
        Some(path) => SdkConfig::from_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SdkConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(lib_dir) = &cli.lib_dir {
        config.lib_dir = lib_dir.clone();
    }
    Ok(config)
}

/// Key-downs with an even key index, G-keys and mouse buttons alike.
fn is_counted(event: &KeyEvent) -> bool {
    event.key_down && event.key_index % 2 == 0
}

fn counter_lines(counter: u32) -> [String; 2] {
    [
        "G-Key with even number press-".to_string(),
        format!("ed {counter} times"),
    ]
}

fn show_counter<N: LcdNative + 'static>(lcd: &LcdSession<N>, counter: u32) -> Result<()> {
    lcd.set_lines(&counter_lines(counter), Color::WHITE)?;
    lcd.update()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgsdk_lcd::mock::{LcdCall, MockLcd};
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::gkey(2, 1, true), true)]
    #[case(KeyEvent::gkey(4, 3, true), true)]
    #[case(KeyEvent::gkey(3, 1, true), false)]
    #[case(KeyEvent::gkey(2, 1, false), false)]
    #[case(KeyEvent::mouse_button(6, true), true)]
    #[case(KeyEvent::mouse_button(7, true), false)]
    fn test_is_counted(#[case] event: KeyEvent, #[case] expected: bool) {
        assert_eq!(is_counted(&event), expected);
    }

    #[test]
    fn test_show_counter() {
        let mock = Arc::new(MockLcd::mono());
        let mut lcd = LcdSession::new(Arc::clone(&mock), ShutdownSignal::new());
        assert!(lcd.init("Example", LcdType::ANY).unwrap());
        mock.clear_calls();

        show_counter(&lcd, 3).unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                LcdCall::MonoSetText {
                    line: 0,
                    text: "G-Key with even number press-".to_string(),
                },
                LcdCall::MonoSetText {
                    line: 1,
                    text: "ed 3 times".to_string(),
                },
                LcdCall::Update,
            ]
        );
    }

    #[test]
    fn test_cli_overrides_lib_dir() {
        let cli = Cli::parse_from(["lgsdk-demo", "--lib-dir", "/opt/lgsdk"]);
        assert_eq!(cli.name, "Example");
        let config = load_config(&cli).unwrap();
        assert_eq!(config.lib_dir, PathBuf::from("/opt/lgsdk"));
    }
}
