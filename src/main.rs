mod cli;

use filesweep::convert::{BatchConverter, Direction, Outcome};
use filesweep::{backup, config, obfuscate, organize, tools, usage};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, TargetFormat};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "filesweep=trace".to_string()
        } else {
            "filesweep=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            to,
            trash_dir,
        } => run_convert(cli.config.as_deref(), &input, &output, to, trash_dir),
        Commands::Organize { dir } => run_organize(cli.config.as_deref(), &dir),
        Commands::Backup { source, dest } => run_backup(&source, &dest),
        Commands::Usage { dir } => run_usage(&dir),
        Commands::Obfuscate { file, password } => obfuscate::obfuscate_file(&file, &password),
        Commands::CheckTools => check_tools(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("filesweep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_convert(
    config_path: Option<&Path>,
    input: &Path,
    output: &Path,
    to: TargetFormat,
    trash_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override trash dir from CLI if specified
    if let Some(dir) = trash_dir {
        config.trash_dir = dir.to_string_lossy().into_owned();
    }

    if !input.is_dir() {
        anyhow::bail!("Input directory does not exist: {:?}", input);
    }

    let direction = match to {
        TargetFormat::Wav => Direction::FlacToWav,
        TargetFormat::Flac => Direction::WavToFlac,
    };

    let converter = BatchConverter::new(&config, direction, output)?;

    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(converter.run(input))?;

    for outcome in &summary.outcomes {
        match outcome {
            Outcome::Converted { source, dest, .. } => {
                println!("converted  {} -> {}", source.display(), dest.display());
            }
            Outcome::Skipped { dest, .. } => {
                println!("skipped    {} already exists", dest.display());
            }
            Outcome::Failed { source, reason } => {
                println!("failed     {}: {}", source.display(), reason);
            }
        }
    }

    println!();
    println!(
        "{} converted, {} skipped, {} failed ({} total)",
        summary.converted,
        summary.skipped,
        summary.failed,
        summary.total()
    );

    if summary.failed > 0 {
        anyhow::bail!("{} of {} conversions failed", summary.failed, summary.total());
    }

    Ok(())
}

fn run_organize(config_path: Option<&Path>, dir: &Path) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let summary = organize::organize_dir(dir, &config.organize)?;
    println!(
        "{} file(s) moved, {} left in place",
        summary.moved, summary.skipped
    );
    Ok(())
}

fn run_backup(source: &Path, dest: &Path) -> Result<()> {
    let archive = backup::backup_directory(source, dest)?;
    println!("Backup completed: {}", archive.display());
    Ok(())
}

fn run_usage(dir: &Path) -> Result<()> {
    let report = usage::analyze(dir)?;

    println!("Analyzing disk usage for: {}", report.root.display());
    println!("{}", "=".repeat(50));

    for entry in &report.entries {
        println!("{:>10}  {}", usage::format_size(entry.size), entry.name);
    }

    println!("{}", "=".repeat(50));
    println!("Total size: {}", usage::format_size(report.total));
    Ok(())
}

fn check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = tools::check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "ok"
        } else {
            all_ok = false;
            "missing"
        };

        print!("[{}] {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable conversion.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("Configuration is valid");
            println!("  Trash dir: {}", config.trash_path().display());
            match config.tools.ffmpeg_path {
                Some(ref ffmpeg) => println!("  ffmpeg: {}", ffmpeg.display()),
                None => println!("  ffmpeg: resolved from PATH"),
            }
            println!("  Organize categories: {}", config.organize.categories.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Trash dir: {}", config.trash_path().display());
            println!("  Organize categories: {}", config.organize.categories.len());
        }
    }

    Ok(())
}
