use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use slidecraft_core::storage::{FileStorage, MemoryStorage, Storage};
use slidecraft_core::{Action, DeckMeta, SlideDocument, import_document};

use crate::config::{AppConfig, DEFAULT_DECK_ID};
use crate::error::{AppError, AppResult};
use crate::session::EditorSession;
use crate::shortcuts::ShortcutRegistry;

#[derive(Debug, Parser)]
#[command(
    name = "slidecraft",
    about = "Validate, edit and export slide decks",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate an exported deck file and print its outline.
    Check(CheckArgs),

    /// Apply a JSON list of editor actions to a deck and export the result.
    Replay(ReplayArgs),

    /// Print the keyboard shortcuts.
    Shortcuts,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Deck file in the export format.
    pub deck: PathBuf,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Deck file in the export format.
    pub deck: PathBuf,

    /// JSON array of actions.
    pub actions: PathBuf,

    /// Write the edited deck here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Key the edit state is persisted under.
    #[arg(long, default_value = DEFAULT_DECK_ID)]
    pub deck_id: String,

    /// Resume and persist edits in this directory.
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Persist edits in the platform data directory.
    #[arg(long, conflicts_with = "storage_dir")]
    pub persist: bool,
}

pub async fn run_from_env() -> AppResult<()> {
    let cli = Cli::parse();
    run(cli).await
}

pub async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Replay(args) => run_replay(args).await,
        Commands::Shortcuts => {
            ShortcutRegistry::print_all();
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> AppResult<Vec<u8>> {
    fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_deck(path: &Path) -> AppResult<DeckMeta> {
    let deck = import_document(&read_file(path)?)?;
    log::info!("Loaded {} slides from {}", deck.slides.len(), path.display());
    Ok(deck)
}

fn run_check(args: CheckArgs) -> AppResult<()> {
    let deck = read_deck(&args.deck)?;
    println!("{} ({} slides)", deck.title, deck.slides.len());
    for (i, slide) in deck.slides.iter().enumerate() {
        println!("  {:>3}  {:<12} {}", i + 1, slide.kind().tag(), slide.title());
    }
    Ok(())
}

async fn run_replay(args: ReplayArgs) -> AppResult<()> {
    let deck = read_deck(&args.deck)?;
    let actions: Vec<Action> =
        serde_json::from_slice(&read_file(&args.actions)?).map_err(AppError::Actions)?;

    let mut config = AppConfig::default().with_deck_id(args.deck_id.clone());
    let bytes = if let Some(dir) = args.storage_dir.clone() {
        config = config.with_storage_dir(dir.clone());
        replay_with(Arc::new(FileStorage::new(dir)?), &config, &deck, actions).await?
    } else if args.persist {
        replay_with(Arc::new(FileStorage::default_location()?), &config, &deck, actions).await?
    } else {
        replay_with(Arc::new(MemoryStorage::new()), &config, &deck, actions).await?
    };

    match &args.out {
        Some(path) => {
            fs::write(path, &bytes).map_err(|source| AppError::Io {
                path: path.clone(),
                source,
            })?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&bytes)),
    }
    Ok(())
}

async fn replay_with<S: Storage>(
    storage: Arc<S>,
    config: &AppConfig,
    deck: &DeckMeta,
    actions: Vec<Action>,
) -> AppResult<Vec<u8>> {
    let slides: Vec<SlideDocument> = deck.slides.clone();
    let mut session = EditorSession::open(slides, storage, config).await;

    let total = actions.len();
    let mut changed = 0;
    for action in actions {
        if session.dispatch(action) {
            changed += 1;
        }
    }
    log::info!("Replayed {total} actions, {changed} changed the deck");

    session.flush().await;
    session.export(&deck.title, &deck.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecraft_core::document::TitleSlide;
    use slidecraft_core::{LayoutBox, export_document};
    use tempfile::tempdir;

    fn write_deck(dir: &Path) -> PathBuf {
        let slides: Vec<Arc<SlideDocument>> = ["A", "B", "C"]
            .into_iter()
            .map(|t| Arc::new(SlideDocument::Title(TitleSlide::new(t))))
            .collect();
        let path = dir.join("deck.json");
        fs::write(&path, export_document("Quarterly", "Q3 review", &slides).unwrap()).unwrap();
        path
    }

    fn write_actions(dir: &Path, actions: &[Action]) -> PathBuf {
        let path = dir.join("actions.json");
        fs::write(&path, serde_json::to_vec(actions).unwrap()).unwrap();
        path
    }

    fn replay(args: ReplayArgs) -> AppResult<()> {
        pollster::block_on(run(Cli {
            command: Commands::Replay(args),
        }))
    }

    fn replay_args(deck: PathBuf, actions: PathBuf, out: PathBuf) -> ReplayArgs {
        ReplayArgs {
            deck,
            actions,
            out: Some(out),
            deck_id: DEFAULT_DECK_ID.to_string(),
            storage_dir: None,
            persist: false,
        }
    }

    #[test]
    fn test_shortcuts_command() {
        let result = pollster::block_on(run(Cli {
            command: Commands::Shortcuts,
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_valid_deck() {
        let dir = tempdir().unwrap();
        let deck = write_deck(dir.path());
        let result = pollster::block_on(run(Cli {
            command: Commands::Check(CheckArgs { deck }),
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_missing_file() {
        let dir = tempdir().unwrap();
        let result = pollster::block_on(run(Cli {
            command: Commands::Check(CheckArgs {
                deck: dir.path().join("nope.json"),
            }),
        }));
        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[test]
    fn test_check_rejects_bad_version() {
        let dir = tempdir().unwrap();
        let deck = dir.path().join("deck.json");
        fs::write(&deck, br#"{"version":2,"title":"x","slides":[]}"#).unwrap();
        let result = pollster::block_on(run(Cli {
            command: Commands::Check(CheckArgs { deck }),
        }));
        assert!(matches!(result, Err(AppError::Import(_))));
    }

    #[test]
    fn test_replay_writes_edited_deck() {
        let dir = tempdir().unwrap();
        let deck = write_deck(dir.path());
        let actions = write_actions(
            dir.path(),
            &[
                Action::InsertSlide {
                    position: 1,
                    document: SlideDocument::Title(TitleSlide::new("D")),
                },
                Action::MoveSlide { from: 3, to: 0 },
            ],
        );
        let out = dir.path().join("out.json");
        replay(replay_args(deck, actions, out.clone())).unwrap();

        let result = import_document(&fs::read(out).unwrap()).unwrap();
        assert_eq!(result.title, "Quarterly");
        assert_eq!(result.description, "Q3 review");
        let titles: Vec<&str> = result.slides.iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["C", "A", "D", "B"]);
    }

    #[test]
    fn test_replay_invalid_actions() {
        let dir = tempdir().unwrap();
        let deck = write_deck(dir.path());
        let actions = dir.path().join("actions.json");
        fs::write(&actions, br#"[{"type":"explode"}]"#).unwrap();
        let result = replay(replay_args(deck, actions, dir.path().join("out.json")));
        assert!(matches!(result, Err(AppError::Actions(_))));
    }

    #[test]
    fn test_replay_resumes_from_storage_dir() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("store");
        let deck = write_deck(dir.path());
        let frame = LayoutBox::new(5.0, 5.0, 40.0, 40.0);

        let first = write_actions(dir.path(), &[Action::SetContentBox { slide: 0, frame }]);
        let mut args = replay_args(deck.clone(), first, dir.path().join("one.json"));
        args.storage_dir = Some(store.clone());
        replay(args).unwrap();

        // Second run starts from the persisted edit state.
        let second = write_actions(dir.path(), &[Action::DeleteSlide { position: 2 }]);
        let mut args = replay_args(deck, second, dir.path().join("two.json"));
        args.storage_dir = Some(store.clone());
        replay(args).unwrap();

        let storage = FileStorage::new(store).unwrap();
        let saved = pollster::block_on(storage.load(DEFAULT_DECK_ID)).unwrap();
        assert_eq!(saved.slide_list.as_ref().map(Vec::len), Some(2));
        assert!(!saved.is_pristine());
    }

    #[test]
    fn test_cli_parses_replay_flags() {
        let cli = Cli::try_parse_from([
            "slidecraft",
            "replay",
            "deck.json",
            "actions.json",
            "--out",
            "out.json",
            "--deck-id",
            "q3",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.deck_id, "q3");
                assert_eq!(args.out, Some(PathBuf::from("out.json")));
                assert!(!args.persist);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_storage() {
        let result = Cli::try_parse_from([
            "slidecraft",
            "replay",
            "deck.json",
            "actions.json",
            "--persist",
            "--storage-dir",
            "/tmp/x",
        ]);
        assert!(result.is_err());
    }
}
