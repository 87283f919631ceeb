use std::path::{Path, PathBuf};

use bookinfo::pipeline::Summary;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use eyre::{eyre, Context, Result};
use glob::glob;
use log::trace;

const ALL_FILES: &str = "All files...";

/// Asks the user to choose one of the `.txt` files of the current directory, or any other file
/// by entering its path.
///
/// Returns [`None`] when the user cancels the selection.
pub fn select_input_file() -> Result<Option<PathBuf>> {
    let mut files = text_files_in_directory(".")?;
    trace!("Found {} .txt file(s) in the current directory", files.len());

    let mut items: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    items.push(ALL_FILES.to_owned());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose the file of ISBNs")
        .default(0)
        .items(&items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    match selection {
        Some(index) if index < files.len() => Ok(Some(files.swap_remove(index))),
        Some(_) => user_input("Enter the path of the file").map(|path| Some(PathBuf::from(path))),
        None => Ok(None),
    }
}

pub fn show_completion(summary: &Summary) {
    println!("File Processing Complete");
    if !summary.skipped.is_empty() {
        println!(
            "{} of {} row(s) could not be fetched",
            summary.skipped.len(),
            summary.rows
        );
    }
    println!(
        "Book information saved to: {}",
        summary.output.display()
    );
}

fn user_input(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map(|s| s.trim().to_owned())
        .wrap_err_with(|| eyre!("User input cancelled"))
}

fn text_files_in_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let path = dir.as_ref();
    if !path.is_dir() {
        return Err(eyre!("Path entered is not a directory"));
    }

    let pattern = format!("{}/*.txt", path.to_string_lossy());

    glob(&pattern)
        .wrap_err("File pattern should always be valid")?
        .map(|entry| {
            entry.wrap_err("Cannot determine a file path - Do you have the correct permissions?")
        })
        .collect()
}
