use std::path::PathBuf;

use anyhow::Result;

use crate::palette::Palette;
use crate::sets::{find_sets, load_rows};
use crate::utils::pluralize;

pub fn run(paths: Vec<PathBuf>) -> Result<()> {
    let sets = find_sets(&paths)?;

    println!("{}", Palette::paint(Palette::ACCENT, "Study Sets"));
    if sets.is_empty() {
        println!(
            "{}",
            Palette::dim("No study sets found. Sets are csv files of Term,Definition rows.")
        );
        return Ok(());
    }

    for set in &sets {
        let count = load_rows(&set.path).map(|rows| rows.len()).unwrap_or(0);
        println!(
            "{}  {}  {}",
            Palette::paint(Palette::INFO, format!("{:<16}", set.name)),
            Palette::dim(pluralize("card", count)),
            Palette::dim(set.path.display()),
        );
    }
    println!(
        "{}",
        Palette::dim(format!("{} found", pluralize("study set", sets.len())))
    );
    Ok(())
}
