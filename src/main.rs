// src/main.rs
mod log;
mod logger;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail, ensure};
use clap::{Parser, Subcommand};
use sha2::{Digest, Sha256};

const EXTENSION: &str = "huff";

#[derive(Parser)]
#[command(name = "huff", version = "0.1.0")]
#[command(about = "Huffman compression for whole files.", long_about = None)]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Append a JSON line per command to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into <file>.huff
    Compress {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore a .huff file
    Decompress {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the header, tree and code table of a .huff file
    Inspect { file: PathBuf },
    /// Round-trip a file in memory and compare digests
    Verify { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    let entry = match &cli.command {
        Commands::Compress { file, output } => {
            let output = output.clone().unwrap_or_else(|| compressed_path(file));
            let data = read(file)?;
            let compressed = huff::compress(&data)
                .with_context(|| format!("compressing {}", file.display()))?;
            write(&output, &compressed)?;
            println!(
                "Compressed {} -> {} ({} -> {} bytes)",
                file.display(),
                output.display(),
                data.len(),
                compressed.len()
            );
            log::LogEntry::new("compress", file, Some(output.as_path()), data.len(), compressed.len())
        }
        Commands::Decompress { file, output } => {
            let output = match output {
                Some(path) => path.clone(),
                None => decompressed_path(file)?,
            };
            let data = read(file)?;
            let restored = huff::decompress(&data)
                .with_context(|| format!("decompressing {}", file.display()))?;
            write(&output, &restored)?;
            println!(
                "Decompressed {} -> {} ({} -> {} bytes)",
                file.display(),
                output.display(),
                data.len(),
                restored.len()
            );
            log::LogEntry::new("decompress", file, Some(output.as_path()), data.len(), restored.len())
        }
        Commands::Inspect { file } => {
            let data = read(file)?;
            let archive = huff::inspect(&data)
                .with_context(|| format!("reading header of {}", file.display()))?;
            println!("padding bits: {}", archive.header.padding());
            println!("tree size:    {} bytes", archive.header.tree_size());
            println!("payload:      {} bytes ({} bits)", archive.payload.len(), archive.payload_bits());
            println!("leaves:       {}", archive.tree.leaf_count());
            println!("height:       {}", archive.tree.height());
            for (byte, code) in archive.codes().iter() {
                println!("{byte:#04x} {code}");
            }
            log::LogEntry::new("inspect", file, None, data.len(), 0)
        }
        Commands::Verify { file } => {
            let data = read(file)?;
            let compressed = huff::compress(&data)
                .with_context(|| format!("compressing {}", file.display()))?;
            let restored = huff::decompress(&compressed).context("decompressing in memory")?;
            let before = format!("{:x}", Sha256::digest(&data));
            let after = format!("{:x}", Sha256::digest(&restored));
            println!("original:     {before}");
            println!("round trip:   {after}");
            println!(
                "ratio:        {:.2}%",
                compressed.len() as f64 * 100.0 / data.len() as f64
            );
            ensure!(before == after, "round trip of {} changed its contents", file.display());
            log::LogEntry::new("verify", file, None, data.len(), compressed.len())
        }
    };

    if let Some(log_path) = &cli.log {
        log::log_action(log_path, &entry)?;
    }
    Ok(())
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

/// `notes.txt` -> `notes.txt.huff`
fn compressed_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// `notes.txt.huff` -> `notes.txt`
fn decompressed_path(path: &Path) -> anyhow::Result<PathBuf> {
    if path.extension().is_some_and(|ext| ext == EXTENSION) {
        return Ok(path.with_extension(""));
    }
    bail!(
        "{} does not end in .{EXTENSION}; pass --output to choose a name",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_and_removed() {
        let compressed = compressed_path(Path::new("dir/notes.txt"));
        assert_eq!(compressed, PathBuf::from("dir/notes.txt.huff"));
        assert_eq!(decompressed_path(&compressed).unwrap(), PathBuf::from("dir/notes.txt"));
    }

    #[test]
    fn missing_suffix_needs_an_output() {
        assert!(decompressed_path(Path::new("notes.txt")).is_err());
    }
}
