//! # Interactive Prompt Module
//!
//! Fallback interattivo quando sorgente o directory di output non sono
//! passate da command line. Le domande riproducono quelle storiche del tool:
//! - "Do you want to provide a ZIP file or a folder? [zip/folder]"
//! - path dello zip o della cartella
//! - directory di output
//!
//! Le funzioni `*_with` accettano reader/writer generici per i test.

use crate::error::NormalizeError;
use crate::source::Source;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Ask a question and return the trimmed answer
pub fn ask_with<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(anyhow::anyhow!("No answer given (end of input)"));
    }
    Ok(answer.trim().to_string())
}

/// Ask whether the configs come from a zip or a folder, then for its path
pub fn choose_source_with<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Source> {
    let choice = ask_with(input, output, "Do you want to provide a ZIP file or a folder? [zip/folder]: ")?
        .to_lowercase();

    match choice.as_str() {
        "zip" => {
            let path = ask_with(input, output, "Enter the path to your VPN config zip file: ")?;
            Ok(Source::Archive(PathBuf::from(path)))
        }
        "folder" => {
            let path = ask_with(input, output, "Enter the path to your folder with .ovpn files: ")?;
            Ok(Source::Folder(PathBuf::from(path)))
        }
        other => Err(NormalizeError::InvalidChoice(format!(
            "{:?}, please enter 'zip' or 'folder'",
            other
        ))
        .into()),
    }
}

/// Ask for the output directory
pub fn ask_output_dir_with<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PathBuf> {
    let path = ask_with(input, output, "Enter the output directory for patched configs: ")?;
    if path.is_empty() {
        return Err(anyhow::anyhow!("Output directory must not be empty"));
    }
    Ok(PathBuf::from(path))
}

pub fn choose_source() -> Result<Source> {
    choose_source_with(&mut io::stdin().lock(), &mut io::stdout())
}

pub fn ask_output_dir() -> Result<PathBuf> {
    ask_output_dir_with(&mut io::stdin().lock(), &mut io::stdout())
}
