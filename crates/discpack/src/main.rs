mod config;
mod error;
mod pipeline;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use config::DiscpackConfig;
use discpack_structure::{InputFormat, ShulkerColor};
use error::CliError;
use pipeline::Conversion;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert a text file of music disc names into a Minecraft structure file",
    after_help = "The input file holds one disc name per line, such as:\n  13\n  cat\n  blocks\n  chirp\n\n\
                  Examples:\n  discpack input.txt output.nbt\n  discpack my_program.txt -o structures/my_program.nbt"
)]
struct Args {
    /// Text file with one disc name per line
    input_file: PathBuf,

    /// Output structure file (default: <input name>.nbt)
    output_file: Option<PathBuf>,

    /// Output structure file; takes precedence over the positional output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with [layout] and [logging] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Shulker box color, e.g. purple or light_blue
    #[arg(long, value_parser = parse_color)]
    color: Option<ShulkerColor>,

    /// Treat the input as instruction mnemonics (LD, OUT, SKZ, ...) with macros
    #[arg(long)]
    asm: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_color(name: &str) -> Result<ShulkerColor, String> {
    ShulkerColor::from_name(name).ok_or_else(|| format!("unknown shulker box color '{name}'"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(conversion) => {
            for line in summary_lines(&args.input_file, &conversion) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}

/// Everything `main` does short of printing.
fn run(args: &Args) -> Result<Conversion, CliError> {
    if !args.input_file.exists() {
        return Err(CliError::InputNotFound(args.input_file.clone()));
    }

    let mut config = match &args.config {
        Some(path) => DiscpackConfig::load(path)?,
        None => DiscpackConfig::default(),
    };
    if let Some(color) = args.color {
        config.layout.shulker_color = color;
    }
    if args.asm {
        config.layout.input = InputFormat::Mnemonic;
    }

    init_logging(&config.logging.level, args.verbose);
    debug!(?config, "configuration loaded");

    let output = args
        .output
        .clone()
        .or_else(|| args.output_file.clone())
        .unwrap_or_else(|| pipeline::default_output_path(&args.input_file));

    pipeline::convert(&args.input_file, &output, &config.layout)
}

fn diagnostic(error: &CliError) -> String {
    match error {
        CliError::InputNotFound(_) | CliError::Config { .. } => format!("Error: {error}"),
        _ => format!("Error: Failed to convert file - {error}"),
    }
}

fn init_logging(configured: &str, verbose: u8) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A subscriber may already be installed when run more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn summary_lines(input: &Path, conversion: &Conversion) -> Vec<String> {
    let stats = &conversion.stats;
    let output = conversion.output.display();
    let name = conversion
        .output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut lines = vec![
        format!("Loaded {} discs from {}", stats.total_items(), input.display()),
        format!("Split into {} shulker boxes", stats.groups),
    ];
    if stats.dropped_groups > 0 {
        lines.push(format!(
            "Warning: only the first {} shulker boxes fit; {} discs were left out",
            stats.groups - stats.dropped_groups,
            stats.dropped_items
        ));
    }
    lines.push(format!("Structure saved to {output}"));
    lines.push(format!(
        "\n✓ Successfully converted '{}' to '{output}'",
        input.display()
    ));
    lines.push("\nTo use in Minecraft:".into());
    lines.push(format!(
        "1. Place '{output}' in your world's 'generated/minecraft/structures/' folder"
    ));
    lines.push(format!("2. Use: /place template minecraft:{name}"));
    lines.push("3. Or use a structure block to load and place it".into());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use discpack_structure::StructureError;

    #[test]
    fn flag_output_wins_over_positional() {
        let args = Args::parse_from(["discpack", "in.txt", "pos.nbt", "-o", "flag.nbt"]);
        assert_eq!(args.output.or(args.output_file), Some(PathBuf::from("flag.nbt")));
    }

    #[test]
    fn positional_output_optional() {
        let args = Args::parse_from(["discpack", "in.txt"]);
        assert_eq!(args.input_file, PathBuf::from("in.txt"));
        assert!(args.output_file.is_none());
        assert!(args.output.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn color_and_verbosity() {
        let args = Args::parse_from(["discpack", "in.txt", "--color", "light_blue", "-vv"]);
        assert_eq!(args.color, Some(ShulkerColor::LightBlue));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn unknown_color_rejected() {
        assert!(Args::try_parse_from(["discpack", "in.txt", "--color", "mauve"]).is_err());
    }

    #[test]
    fn input_required() {
        assert!(Args::try_parse_from(["discpack"]).is_err());
    }

    fn args_for(input: &Path, output: &Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "discpack".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn run_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.nbt");
        let args = args_for(&dir.path().join("absent.txt"), &output, &[]);

        let err = run(&args).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound(_)));
        assert!(diagnostic(&err).starts_with("Error: Input file '"));
        assert!(diagnostic(&err).ends_with("absent.txt' not found"));
        assert!(!output.exists());
    }

    #[test]
    fn run_reports_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("program.txt");
        std::fs::write(&input, "LD\nJMP\n").unwrap();
        let output = dir.path().join("out.nbt");

        let err = run(&args_for(&input, &output, &["--asm"])).unwrap_err();
        assert!(matches!(err, CliError::Structure(_)));
        assert_eq!(
            diagnostic(&err),
            "Error: Failed to convert file - line 2: unknown instruction 'JMP'"
        );
        assert!(!output.exists());
    }

    #[test]
    fn run_reports_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("discs.txt");
        std::fs::write(&input, "cat\n").unwrap();
        let output = dir.path().join("out.nbt");

        let unparsable = dir.path().join("broken.toml");
        std::fs::write(&unparsable, "[layout]\ngroup_size = \"many\"\n").unwrap();
        let arg = unparsable.display().to_string();
        let err = run(&args_for(&input, &output, &["-c", &arg])).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(diagnostic(&err).starts_with("Error: failed to load config"));

        let invalid = dir.path().join("invalid.toml");
        std::fs::write(&invalid, "[layout]\ngroup_size = 0\n").unwrap();
        let arg = invalid.display().to_string();
        let err = run(&args_for(&input, &output, &["-c", &arg])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Structure(StructureError::InvalidLayout(_))
        ));
        assert!(diagnostic(&err).starts_with("Error: Failed to convert file - invalid layout"));

        assert!(!output.exists());
    }

    #[test]
    fn run_writes_structure_and_usage_hints() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("song.txt");
        std::fs::write(&input, "13\ncat\nblocks\n").unwrap();
        let output = dir.path().join("song.nbt");

        let conversion = run(&args_for(&input, &output, &["--color", "red"])).unwrap();
        assert!(output.exists());
        assert_eq!(conversion.stats.items, 3);

        let root = discpack_nbt::read_gzip_file(&output).unwrap();
        let blocks = root.compound["blocks"].as_list().unwrap();
        let items = blocks[1].as_compound().unwrap()["nbt"].as_compound().unwrap()["Items"]
            .as_list()
            .unwrap();
        assert_eq!(
            items[0].as_compound().unwrap()["id"].as_string(),
            Some("minecraft:red_shulker_box")
        );

        let summary = summary_lines(&input, &conversion).join("\n");
        assert!(summary.contains("Loaded 3 discs"));
        assert!(summary.contains("generated/minecraft/structures/"));
        assert!(summary.contains("/place template minecraft:song"));
        assert!(!summary.contains("Warning"));
    }

    #[test]
    fn asm_flag_assembles_mnemonics() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.asm");
        std::fs::write(&input, "def twice(x)\nx\nx\nend\ntwice(OUT)\n").unwrap();
        let output = dir.path().join("prog.nbt");

        let conversion = run(&args_for(&input, &output, &["--asm"])).unwrap();
        assert_eq!(conversion.stats.items, 27);
        assert!(output.exists());
    }
}
