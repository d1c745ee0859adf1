use clap::{Args, Parser, Subcommand};

use crate::model::filter::Filter;

#[derive(Parser)]
#[command(name = "tl", about = concat!("[x] tasklist v", env!("CARGO_PKG_VERSION"), " - a short ordered todo list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the stored list
    #[arg(
        short = 'd',
        long = "dir",
        global = true,
        env = "TASKLIST_DIR",
        default_value = ".tasklist"
    )]
    pub dir: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an item to the end of the list
    Add(AddArgs),
    /// Replace an item's text
    Edit(EditArgs),
    /// Delete an item
    Rm(IdArgs),
    /// Toggle an item between active and completed
    #[command(alias = "done")]
    Toggle(IdArgs),
    /// List items (the default command)
    #[command(alias = "ls")]
    List(ListArgs),
    /// Set the display order from a full list of ids
    Reorder(ReorderArgs),
    /// Drag an item to a vertical position in the visible list
    Mv(MvArgs),
    /// Delete all completed items
    Clear,
    /// Show or set the theme color
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item ID or unique prefix
    pub id: String,
    /// New text (words are joined with spaces)
    #[arg(num_args = 0..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item ID or unique prefix
    pub id: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which items to show: all, active or completed
    #[arg(long, short, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args)]
pub struct ReorderArgs {
    /// Item IDs (or unique prefixes) in their new order
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Item ID or unique prefix to drag
    pub id: String,
    /// Pointer position along the list, in row units of --row-height
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    /// Height of one row
    #[arg(long, default_value = "1.0")]
    pub row_height: f64,
    /// Which items are on screen while dragging
    #[arg(long, short, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New color (#rgb, #rrggbb or a name); omit to show the current one
    pub color: Option<String>,
    /// Forget the saved color
    #[arg(long, conflicts_with = "color")]
    pub reset: bool,
}
