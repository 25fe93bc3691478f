use std::{
    fs,
    path::{Path, PathBuf},
};

use _paf::{format_address, format_postcode, is_valid_postcode, to_title_case, Address, PostcodeOptions};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;

use crate::records::FileKind;
use crate::repo::Repository;

mod records;
mod repo;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a folder of mainfile extracts and print each address as
    /// its printable lines
    Format {
        folder: PathBuf,
        /// Convert fields to title case (post town and postcode keep
        /// their uppercase form)
        #[arg(long)]
        title_case: bool,
        /// Canonicalize the postcode spacing
        #[arg(long)]
        postcode: bool,
        /// Emit a JSON array of line arrays instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Validate a single postcode and print its canonical form
    Check {
        postcode: String,
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Format {
            folder,
            title_case,
            postcode,
            json,
        } => run_format(&folder, title_case, postcode, json),
        Command::Check { postcode, strict } => run_check(&postcode, strict),
    }
}

fn run_format(folder: &Path, title_case: bool, postcode: bool, json: bool) -> Result<()> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(folder).with_context(|| format!("failed to read {}", folder.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match text.lines().next().and_then(records::detect_kind) {
            Some(kind) => files.push((kind, text)),
            None => eprintln!("Skipping {} (not a mainfile extract)", path.display()),
        }
    }

    // reference records go in first, the address rows hold the keys
    let mut repo = Repository::default();
    for (kind, text) in &files {
        for line in rows(text) {
            match kind {
                FileKind::Localities => repo.add_locality(records::extract_locality(line)),
                FileKind::Thoroughfares => {
                    repo.add_thoroughfare(records::extract_thoroughfare(line))
                }
                FileKind::ThoroughfareDescriptors => {
                    repo.add_thoroughfare_descriptor(records::extract_thoroughfare_descriptor(line))
                }
                FileKind::BuildingNames => {
                    repo.add_building_name(records::extract_building_name(line))
                }
                FileKind::SubBuildingNames => {
                    repo.add_sub_building_name(records::extract_sub_building_name(line))
                }
                FileKind::Organisations => {
                    repo.add_organisation(records::extract_organisation(line))
                }
                FileKind::Addresses => {}
            }
        }
    }

    let mut addresses = Vec::new();
    for (kind, text) in &files {
        if *kind != FileKind::Addresses {
            continue;
        }

        let rows = rows(text);
        eprintln!("Decoding {} address records...", rows.len());
        let pb = progress_bar(rows.len() as u64);
        for chunk in &rows.iter().chunks(65_535) {
            let chunk: Vec<&str> = chunk.copied().collect();
            let decoded: Vec<_> = chunk
                .par_iter()
                .map(|line| records::extract_address(line))
                .collect();
            pb.inc(decoded.len() as u64);
            addresses.extend(decoded);
        }
    }

    let options = PostcodeOptions::default();
    let mut output = Vec::with_capacity(addresses.len());
    for row in &addresses {
        let mut address = repo.resolve(row);
        if postcode {
            address.postcode = address
                .postcode
                .map(|value| format_postcode(&value, options));
        }
        if title_case {
            apply_title_case(&mut address);
        }
        output.push(format_address(&address));
    }

    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for lines in &output {
            for line in lines {
                println!("{line}");
            }
            println!();
        }
    }

    Ok(())
}

fn run_check(postcode: &str, strict: bool) -> Result<()> {
    let options = PostcodeOptions {
        strict,
        ..PostcodeOptions::default()
    };
    if !is_valid_postcode(postcode, options) {
        bail!("not a valid postcode: {postcode}");
    }

    println!("{}", format_postcode(postcode, options));
    Ok(())
}

/// The records of an extract, without the header and footer records.
fn rows(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() > 2 {
        lines[1..lines.len() - 1].to_vec()
    } else {
        Vec::new()
    }
}

/// Title-cases every field except the post town, which stays uppercase
/// on printed mail, and the postcode.
fn apply_title_case(address: &mut Address) {
    for field in [
        &mut address.organisation_name,
        &mut address.department_name,
        &mut address.sub_building_name,
        &mut address.building_name,
        &mut address.dependent_thoroughfare_name,
        &mut address.dependent_thoroughfare_descriptor,
        &mut address.thoroughfare_name,
        &mut address.thoroughfare_descriptor,
        &mut address.double_dependent_locality,
        &mut address.dependent_locality,
    ] {
        if let Some(value) = field.take() {
            *field = Some(to_title_case(&value));
        }
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    ProgressBar::new(len).with_style(
        ProgressStyle::with_template("[{elapsed_precise}] {human_pos} {percent}% ({per_sec})")
            .expect("hardcoded"),
    )
}
