use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use localnotes::config::AppConfig;
use localnotes::persistence::STORAGE_KEY;
use localnotes::storage::FileKvStore;
use localnotes::utils::time::format_timestamp;
use localnotes::view::shell::{DELETE_TITLE, EMPTY_TEXT, EMPTY_TITLE};
use localnotes::view::{delete_confirmation, CardView, ListView, NoteForm};
use localnotes::{CoreError, NotesStore, Toaster};

#[derive(Parser)]
#[command(name = "localnotes")]
#[command(author, version, about = "Simple, fast, local notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the notes slot (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, pinned first, most recent next
    List {
        /// Only notes whose title or content contains this text
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Show a single note
    Show { id: String },

    /// Create a note
    New {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,

        #[arg(long)]
        pin: bool,
    },

    /// Edit a note; omitted fields keep their current value
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long, conflicts_with = "unpin")]
        pin: bool,

        #[arg(long)]
        unpin: bool,
    },

    /// Toggle the pinned flag of a note
    Pin { id: String },

    /// Delete a note
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the storage key and the file backing it
    Path,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(cli.data_dir).context("failed to resolve configuration")?;
    let stdout = std::io::stdout();
    execute(cli.command, &config, &mut stdout.lock())
}

fn execute(command: Commands, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Path => {
            let kv = FileKvStore::new(config.data_dir.clone());
            writeln!(out, "key:  {STORAGE_KEY}")?;
            writeln!(out, "file: {}", kv.slot_path(STORAGE_KEY)?.display())?;
        }
        Commands::List { query } => {
            let store = open_store(config);
            print_list(out, &ListView::build(&store, &query))?;
        }
        Commands::Show { id } => {
            let store = open_store(config);
            let note = store.get(&id).ok_or_else(|| CoreError::NotFound(id.clone()))?;
            writeln!(out, "{}{}", if note.pinned { "★ " } else { "" }, note.title)?;
            writeln!(out, "id:      {}", note.id)?;
            writeln!(out, "created: {}", format_timestamp(&note.created_at))?;
            if let Some(updated) = note.updated_at {
                writeln!(out, "updated: {}", format_timestamp(&updated))?;
            }
            if !note.content.is_empty() {
                writeln!(out)?;
                writeln!(out, "{}", note.content)?;
            }
        }
        Commands::New {
            title,
            content,
            pin,
        } => {
            let mut store = open_store(config);
            let mut form = NoteForm::create();
            form.set_title(title);
            form.set_content(content);
            form.set_pinned(pin);
            if let Some(note) = form.submit_to(&mut store)? {
                writeln!(out, "{}", note.id)?;
            }
            print_toast(out, &store)?;
        }
        Commands::Edit {
            id,
            title,
            content,
            pin,
            unpin,
        } => {
            let mut store = open_store(config);
            let existing = store.get(&id).ok_or_else(|| CoreError::NotFound(id.clone()))?;
            let mut form = NoteForm::edit(existing);
            if let Some(title) = title {
                form.set_title(title);
            }
            if let Some(content) = content {
                form.set_content(content);
            }
            if pin || unpin {
                form.set_pinned(pin);
            }
            form.submit_to(&mut store)?
                .ok_or_else(|| CoreError::NotFound(id.clone()))?;
            print_toast(out, &store)?;
        }
        Commands::Pin { id } => {
            let mut store = open_store(config);
            if store.get(&id).is_none() {
                return Err(CoreError::NotFound(id).into());
            }
            store.toggle_pin(&id);
            print_toast(out, &store)?;
        }
        Commands::Delete { id, yes } => {
            let mut store = open_store(config);
            let Some(note) = store.get(&id) else {
                return Err(CoreError::NotFound(id).into());
            };
            if !yes {
                writeln!(out, "{DELETE_TITLE}")?;
                writeln!(out, "{}", delete_confirmation(Some(note)))?;
                writeln!(out, "Re-run with --yes to delete.")?;
                return Ok(());
            }
            store.delete_note(&id);
            print_toast(out, &store)?;
        }
    }
    Ok(())
}

fn open_store(config: &AppConfig) -> NotesStore {
    let kv = FileKvStore::new(config.data_dir.clone());
    NotesStore::open(Box::new(kv), Toaster::new(config.toast_interval))
}

fn print_list(out: &mut impl Write, list: &ListView) -> std::io::Result<()> {
    match &list.filter_label {
        Some(filter) => writeln!(out, "{}  {filter}", list.count_label)?,
        None => writeln!(out, "{}", list.count_label)?,
    }
    if list.is_empty() {
        writeln!(out)?;
        writeln!(out, "{EMPTY_TITLE}")?;
        writeln!(out, "{EMPTY_TEXT}")?;
        return Ok(());
    }
    for card in &list.cards {
        print_card(out, card)?;
    }
    Ok(())
}

fn print_card(out: &mut impl Write, card: &CardView) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} {}  [{}]",
        if card.pinned { "★" } else { "☆" },
        card.title,
        card.id
    )?;
    writeln!(out, "  {}", card.body)?;
    if !card.subtitle.is_empty() {
        writeln!(out, "  {}", card.subtitle)?;
    }
    Ok(())
}

fn print_toast(out: &mut impl Write, store: &NotesStore) -> std::io::Result<()> {
    if let Some(toast) = store.toasts().current() {
        writeln!(out, "[{}] {}", toast.kind.as_str(), toast.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use localnotes::toast::DEFAULT_DISPLAY_INTERVAL;
    use localnotes::Note;
    use tempfile::tempdir;

    use super::*;

    fn config_for(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_path_buf(),
            toast_interval: DEFAULT_DISPLAY_INTERVAL,
        }
    }

    fn run_cli(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("localnotes").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(cli.command, &config_for(dir), &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn create(dir: &Path, args: &[&str]) -> String {
        let mut full = vec!["new"];
        full.extend_from_slice(args);
        let output = run_cli(dir, &full).expect("new");
        output.lines().next().expect("id line").to_string()
    }

    fn stored(dir: &Path, id: &str) -> Option<Note> {
        open_store(&config_for(dir)).get(id).cloned()
    }

    fn assert_not_found(result: anyhow::Result<String>, id: &str) {
        let error = result.expect_err("unknown id");
        match error.downcast_ref::<CoreError>() {
            Some(CoreError::NotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn new_prints_id_and_toast() {
        let dir = tempdir().expect("tempdir");
        let output = run_cli(
            dir.path(),
            &["new", "--title", "Groceries", "--content", "milk, eggs"],
        )
        .expect("new");
        let mut lines = output.lines();
        let id = lines.next().expect("id line");
        assert_eq!(lines.next(), Some("[success] Note saved."));

        let note = stored(dir.path(), id).expect("note persisted");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert!(!note.pinned);
    }

    #[test]
    fn new_with_blank_title_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let error = run_cli(dir.path(), &["new", "--title", "   "]).expect_err("blank title");
        match error.downcast_ref::<CoreError>() {
            Some(CoreError::InvalidInput(message)) => assert_eq!(message, "Title is required."),
            other => panic!("expected invalid input, got {other:?}"),
        }
        assert!(open_store(&config_for(dir.path())).notes().is_empty());
    }

    #[test]
    fn delete_without_yes_only_asks() {
        let dir = tempdir().expect("tempdir");
        let id = create(dir.path(), &["--title", "Groceries"]);

        let output = run_cli(dir.path(), &["delete", id.as_str()]).expect("delete");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], DELETE_TITLE);
        assert!(lines[1].contains("Groceries"));
        assert_eq!(lines[2], "Re-run with --yes to delete.");
        assert!(stored(dir.path(), &id).is_some());

        let output =
            run_cli(dir.path(), &["delete", id.as_str(), "--yes"]).expect("delete --yes");
        assert_eq!(output.trim_end(), "[info] Note deleted.");
        assert!(stored(dir.path(), &id).is_none());
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let dir = tempdir().expect("tempdir");
        let id = create(dir.path(), &["--title", "Groceries", "--content", "milk", "--pin"]);
        let before = stored(dir.path(), &id).expect("created");

        let output =
            run_cli(dir.path(), &["edit", id.as_str(), "--content", "bread"]).expect("edit");
        assert_eq!(output.trim_end(), "[success] Note updated.");

        let after = stored(dir.path(), &id).expect("still there");
        assert_eq!(after.title, "Groceries");
        assert_eq!(after.content, "bread");
        assert!(after.pinned);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[test]
    fn edit_pin_and_unpin_set_the_flag() {
        let dir = tempdir().expect("tempdir");
        let id = create(dir.path(), &["--title", "Groceries"]);

        run_cli(dir.path(), &["edit", id.as_str(), "--pin"]).expect("pin");
        assert!(stored(dir.path(), &id).expect("note").pinned);

        // setting, not toggling
        run_cli(dir.path(), &["edit", id.as_str(), "--pin"]).expect("pin again");
        assert!(stored(dir.path(), &id).expect("note").pinned);

        run_cli(dir.path(), &["edit", id.as_str(), "--unpin"]).expect("unpin");
        assert!(!stored(dir.path(), &id).expect("note").pinned);

        assert!(run_cli(dir.path(), &["edit", id.as_str(), "--pin", "--unpin"]).is_err());
    }

    #[test]
    fn pin_toggles() {
        let dir = tempdir().expect("tempdir");
        let id = create(dir.path(), &["--title", "Groceries"]);

        let output = run_cli(dir.path(), &["pin", id.as_str()]).expect("pin");
        assert_eq!(output.trim_end(), "[info] Pin updated.");
        assert!(stored(dir.path(), &id).expect("note").pinned);

        run_cli(dir.path(), &["pin", id.as_str()]).expect("pin again");
        assert!(!stored(dir.path(), &id).expect("note").pinned);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let dir = tempdir().expect("tempdir");
        create(dir.path(), &["--title", "Groceries"]);

        assert_not_found(run_cli(dir.path(), &["show", "missing"]), "missing");
        assert_not_found(run_cli(dir.path(), &["pin", "missing"]), "missing");
        assert_not_found(
            run_cli(dir.path(), &["edit", "missing", "--title", "x"]),
            "missing",
        );
        assert_not_found(run_cli(dir.path(), &["delete", "missing", "--yes"]), "missing");
        assert_eq!(open_store(&config_for(dir.path())).notes().len(), 1);
    }

    #[test]
    fn list_filters_and_orders() {
        let dir = tempdir().expect("tempdir");
        let groceries = create(dir.path(), &["--title", "Groceries", "--content", "milk, eggs"]);
        let ideas = create(dir.path(), &["--title", "Ideas", "--pin"]);

        let output = run_cli(dir.path(), &["list"]).expect("list");
        assert!(output.starts_with("2 notes\n"));
        let ideas_at = output.find(&ideas).expect("ideas listed");
        let groceries_at = output.find(&groceries).expect("groceries listed");
        assert!(ideas_at < groceries_at);

        let output = run_cli(dir.path(), &["list", "--query", "EGG"]).expect("filtered");
        assert!(output.starts_with("1 note  Filtering: “EGG”\n"));
        assert!(output.contains(&groceries));
        assert!(!output.contains(&ideas));

        let output = run_cli(dir.path(), &["list", "--query", "zzz"]).expect("no hits");
        assert!(output.contains(EMPTY_TITLE));
        assert!(output.contains(EMPTY_TEXT));
    }

    #[test]
    fn show_prints_note_details() {
        let dir = tempdir().expect("tempdir");
        let id = create(dir.path(), &["--title", "Groceries", "--content", "milk, eggs", "--pin"]);

        let output = run_cli(dir.path(), &["show", id.as_str()]).expect("show");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "★ Groceries");
        assert_eq!(lines[1], format!("id:      {id}"));
        assert!(lines[2].starts_with("created: "));
        assert!(lines[3].starts_with("updated: "));
        assert_eq!(lines.last().copied(), Some("milk, eggs"));
    }

    #[test]
    fn path_reports_slot_file() {
        let dir = tempdir().expect("tempdir");
        let output = run_cli(dir.path(), &["path"]).expect("path");
        assert_eq!(
            output,
            format!(
                "key:  notes.v1\nfile: {}\n",
                dir.path().join("notes.v1.json").display()
            )
        );
    }
}
