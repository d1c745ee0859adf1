use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::StoreLock;
use crate::io::store::FileStore;
use crate::io::theme;
use crate::model::filter::Filter;
use crate::ops::controller::ListController;
use crate::ops::placement;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> HandlerResult {
    let json = cli.json;
    let dir = PathBuf::from(&cli.dir);

    match cli.command {
        None => cmd_list(&dir, ListArgs { filter: Filter::All }, json),
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(&dir, args, json),
            Commands::Edit(args) => cmd_edit(&dir, args),
            Commands::Rm(args) => cmd_rm(&dir, args),
            Commands::Toggle(args) => cmd_toggle(&dir, args),
            Commands::List(args) => cmd_list(&dir, args, json),
            Commands::Reorder(args) => cmd_reorder(&dir, args),
            Commands::Mv(args) => cmd_mv(&dir, args),
            Commands::Clear => cmd_clear(&dir),
            Commands::Theme(args) => cmd_theme(&dir, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the list for a read-only command.
fn open_list(dir: &Path) -> Result<ListController<FileStore>, Box<dyn std::error::Error>> {
    let config = config_io::read_config(dir)?;
    Ok(ListController::open(FileStore::new(dir), config))
}

/// Lock the store, then load the list. The guard must outlive the
/// command's last write so no other `tl` interleaves its own cycle.
fn open_list_locked(
    dir: &Path,
) -> Result<(StoreLock, ListController<FileStore>), Box<dyn std::error::Error>> {
    let store = FileStore::new(dir);
    let lock = store.lock()?;
    let config = config_io::read_config(dir)?;
    Ok((lock, ListController::open(store, config)))
}

fn print_json<T: serde::Serialize>(value: &T) -> HandlerResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let text = args.text.join(" ");
    let id = list
        .add(&text)?
        .ok_or("nothing to add: text is blank")?;
    if json {
        print_json(&AddedJson { id })
    } else {
        println!("added {}", short_id(&id));
        Ok(())
    }
}

fn cmd_edit(dir: &Path, args: EditArgs) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let id = list.resolve(&args.id)?;
    if list.edit(&id, &args.text.join(" "))? {
        println!("edited {}", short_id(&id));
        Ok(())
    } else {
        Err("edit rejected: text is blank".into())
    }
}

fn cmd_rm(dir: &Path, args: IdArgs) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let id = list.resolve(&args.id)?;
    list.delete(&id)?;
    println!("deleted {}", short_id(&id));
    Ok(())
}

fn cmd_toggle(dir: &Path, args: IdArgs) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let id = list.resolve(&args.id)?;
    list.toggle_complete(&id)?;
    let state = match list.get(&id) {
        Some(item) if item.completed => "completed",
        _ => "active",
    };
    println!("{} {}", short_id(&id), state);
    Ok(())
}

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> HandlerResult {
    let mut list = open_list(dir)?;
    list.set_filter(args.filter);
    let visible = list.visible_items();
    if json {
        return print_json(&visible);
    }
    let active_total = list.items().filter(|item| !item.completed).count();
    for line in format_listing(&visible, list.filter(), active_total) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_reorder(dir: &Path, args: ReorderArgs) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let ids = args
        .ids
        .iter()
        .map(|prefix| list.resolve(prefix))
        .collect::<Result<Vec<_>, _>>()?;
    list.reorder(ids.as_slice())?;
    println!("reordered {} items", ids.len());
    Ok(())
}

fn cmd_mv(dir: &Path, args: MvArgs) -> HandlerResult {
    if args.row_height.is_nan() || args.row_height <= 0.0 {
        return Err(format!("row height must be positive, got {}", args.row_height).into());
    }
    let (_lock, mut list) = open_list_locked(dir)?;
    let id = list.resolve(&args.id)?;
    list.set_filter(args.filter);
    let visual: Vec<String> = list
        .visible_items()
        .iter()
        .map(|item| item.id.clone())
        .collect();
    if !visual.contains(&id) {
        return Err(format!("{} is hidden by the {} filter", short_id(&id), args.filter).into());
    }
    let sequence = placement::drag_to(visual.as_slice(), &id, args.y, args.row_height);
    list.reorder_visible(sequence.as_slice())?;
    let position = sequence.iter().position(|s| *s == id).unwrap_or(0);
    println!("moved {} to position {}", short_id(&id), position + 1);
    Ok(())
}

fn cmd_clear(dir: &Path) -> HandlerResult {
    let (_lock, mut list) = open_list_locked(dir)?;
    let removed = list.clear_completed()?;
    println!("cleared {} completed", removed);
    Ok(())
}

fn cmd_theme(dir: &Path, args: ThemeArgs, json: bool) -> HandlerResult {
    let config = config_io::read_config(dir)?;
    let key = &config.storage.theme_key;
    let mut store = FileStore::new(dir);
    let color = if args.reset {
        let _lock = store.lock()?;
        theme::clear_theme(&mut store, key)?;
        None
    } else if let Some(color) = args.color {
        let _lock = store.lock()?;
        theme::save_theme(&mut store, key, &color)?;
        Some(color.trim().to_string())
    } else {
        theme::load_theme(&store, key)
    };
    if json {
        return print_json(&ThemeJson { color });
    }
    match color {
        Some(color) => println!("{}", color),
        None => println!("(no theme color set)"),
    }
    Ok(())
}
