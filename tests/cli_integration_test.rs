//! CLI integration tests for the replay, validate, size and indicators
//! commands.
//!
//! Tests cover:
//! - Config loading and validation from INI files on disk
//! - Symbol override and normalisation
//! - Argument parsing constraints
//! - Replay against CSV bar files, with and without an open position
//! - Error mapping for missing/short data

mod common;

use clap::Parser;
use common::*;
use scalper::adapters::file_config_adapter::FileConfigAdapter;
use scalper::cli::{self, Cli, Command};
use scalper::domain::error::ScalperError;
use scalper::domain::position::Side;
use std::fs;
use tempfile::TempDir;

const VALID_INI: &str = r#"
[bot]
symbol = jnj
semi_auto_mode = false
is_paper_mode = true

[indicators]
ema_fast_period = 9
ema_slow_period = 21
rsi_period = 14
rsi_oversold = 30
rsi_overbought = 70

[risk]
target_percent = 0.5
stop_percent = 0.3
max_risk_percent = 1.0
daily_loss_limit = 3.0
"#;

fn data_dir_with(symbol: &str, bars: &[OhlcvBar]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(format!("{symbol}.csv")), bars_to_csv(bars)).unwrap();
    dir
}

mod config_loading {
    use super::*;

    #[test]
    fn build_bot_config_normalises_symbol() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_bot_config(&adapter, None).unwrap();
        assert_eq!(config.symbol, "JNJ");
        assert_eq!(config.ema_slow_period, 21);
        assert_eq!(config.stop_percent, 0.3);
    }

    #[test]
    fn symbol_override_wins() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_bot_config(&adapter, Some(" pfe ")).unwrap();
        assert_eq!(config.symbol, "PFE");
    }

    #[test]
    fn invalid_ema_ordering_rejected() {
        let ini = VALID_INI.replace("ema_fast_period = 9", "ema_fast_period = 30");
        let adapter = FileConfigAdapter::from_string(&ini).unwrap();
        let err = cli::build_bot_config(&adapter, None).unwrap_err();
        assert!(matches!(err, ScalperError::ConfigInvalid { .. }));
    }

    #[test]
    fn validate_accepts_file_on_disk() {
        let file = write_temp_ini(VALID_INI);
        assert!(cli::run_validate(file.path()).is_ok());
    }

    #[test]
    fn validate_missing_file_is_parse_error() {
        let err = cli::run_validate(std::path::Path::new("/nonexistent/bot.ini")).unwrap_err();
        assert!(matches!(err, ScalperError::ConfigParse { .. }));
    }

    #[test]
    fn validate_rejects_zero_stop() {
        let file = write_temp_ini(&VALID_INI.replace("stop_percent = 0.3", "stop_percent = 0"));
        let err = cli::run_validate(file.path()).unwrap_err();
        assert!(matches!(err, ScalperError::ConfigInvalid { .. }));
    }
}

mod argument_parsing {
    use super::*;

    #[test]
    fn replay_position_requires_entry() {
        let result = Cli::try_parse_from([
            "scalper", "replay", "--config", "bot.ini", "--data", "bars", "--position", "long",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn replay_accepts_sell_as_short() {
        let cli = Cli::try_parse_from([
            "scalper", "replay", "--config", "bot.ini", "--data", "bars", "--position", "sell",
            "--entry", "101.5",
        ])
        .unwrap();
        match cli.command {
            Command::Replay {
                position, entry, ..
            } => {
                assert_eq!(position, Some(Side::Short));
                assert_eq!(entry, Some(101.5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn size_parses_numbers() {
        let cli = Cli::try_parse_from([
            "scalper", "size", "--config", "bot.ini", "--equity", "10000", "--price", "50",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Size { equity, price, .. } if equity == 10_000.0 && price == 50.0
        ));
    }
}

mod size_command {
    use super::*;

    #[test]
    fn size_runs_with_valid_inputs() {
        let file = write_temp_ini(VALID_INI);
        assert!(cli::run_size(file.path(), 10_000.0, 50.0).is_ok());
    }

    #[test]
    fn size_rejects_non_positive_equity() {
        let file = write_temp_ini(VALID_INI);
        let err = cli::run_size(file.path(), 0.0, 50.0).unwrap_err();
        assert!(matches!(err, ScalperError::ConfigInvalid { ref key, .. } if key == "equity"));
    }
}

mod replay_command {
    use super::*;

    #[test]
    fn replay_writes_signal_csv() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &opening_drop_then_grind_up());
        let out = data.path().join("signals.csv");

        cli::run_replay(config.path(), data.path(), None, Some(out.as_path()), None).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("timestamp,symbol,kind,price,confidence"));
        let rows: Vec<Vec<&str>> = content
            .lines()
            .skip(1)
            .map(|l| l.split(',').collect())
            .collect();
        assert_eq!(rows.len(), 3);

        let expected = [(40, "119.5"), (42, "120.5"), (43, "121")];
        for (row, (index, price)) in rows.iter().zip(expected) {
            let timestamp = make_bar(index, 0.0).timestamp.to_string();
            assert_eq!(&row[..5], &[timestamp.as_str(), "JNJ", "ENTRY_LONG", price, "0.70"]);
        }
    }

    #[test]
    fn replay_flat_file_without_position_writes_header_only() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &generate_bars(40, 100.0, 0.0));
        let out = data.path().join("signals.csv");

        cli::run_replay(config.path(), data.path(), None, Some(out.as_path()), None).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn replay_rejects_non_positive_entry() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &generate_bars(40, 100.0, 0.0));

        for entry in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = cli::run_replay(
                config.path(),
                data.path(),
                None,
                None,
                Some((Side::Short, entry)),
            )
            .unwrap_err();
            assert!(
                matches!(err, ScalperError::ConfigInvalid { ref key, .. } if key == "entry"),
                "entry {entry} gave {err:?}"
            );
        }
    }

    #[test]
    fn replay_with_position_emits_target_exits() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &generate_bars(40, 101.0, 0.0));
        let out = data.path().join("exits.csv");

        cli::run_replay(
            config.path(),
            data.path(),
            None,
            Some(out.as_path()),
            Some((Side::Long, 100.0)),
        )
        .unwrap();

        let content = fs::read_to_string(&out).unwrap();
        let rows: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(rows.len(), 40);
        assert!(rows.iter().all(|r| r.contains(",EXIT_LONG,")));
        assert!(rows.iter().all(|r| r.contains(",1.00,")));
    }

    #[test]
    fn replay_uses_symbol_override_for_file_lookup() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("PFE", &generate_bars(30, 40.0, 0.1));
        let out = data.path().join("pfe.csv");

        cli::run_replay(
            config.path(),
            data.path(),
            Some("pfe"),
            Some(out.as_path()),
            None,
        )
        .unwrap();
        assert!(out.exists());
    }

    #[test]
    fn replay_short_file_is_insufficient_data() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &generate_bars(10, 100.0, 0.1));

        let err = cli::run_replay(config.path(), data.path(), None, None, None).unwrap_err();
        match err {
            ScalperError::InsufficientData {
                symbol,
                bars,
                minimum,
            } => {
                assert_eq!(symbol, "JNJ");
                assert_eq!(bars, 10);
                assert_eq!(minimum, 21);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn replay_missing_file_is_data_source_error() {
        let config = write_temp_ini(VALID_INI);
        let data = TempDir::new().unwrap();

        let err = cli::run_replay(config.path(), data.path(), None, None, None).unwrap_err();
        assert!(matches!(err, ScalperError::DataSource { .. }));
    }
}

mod indicators_command {
    use super::*;

    #[test]
    fn indicators_runs_on_valid_file() {
        let config = write_temp_ini(VALID_INI);
        let data = data_dir_with("JNJ", &generate_bars(50, 100.0, 0.1));
        assert!(cli::run_indicators(config.path(), data.path(), None).is_ok());
    }

    #[test]
    fn indicators_bad_row_is_parse_error() {
        let config = write_temp_ini(VALID_INI);
        let data = TempDir::new().unwrap();
        let mut csv = bars_to_csv(&generate_bars(25, 100.0, 0.1));
        csv.push_str("not-a-time,1,1,1,1,1\n");
        fs::write(data.path().join("JNJ.csv"), csv).unwrap();

        let err = cli::run_indicators(config.path(), data.path(), None).unwrap_err();
        assert!(matches!(err, ScalperError::DataParse { line: 27, .. }));
    }
}
