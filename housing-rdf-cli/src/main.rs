use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use housing_rdf::{Mapping, Processor, Template, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use std::{fs, path::PathBuf};
use tracing::{info, Level};

/// Housing listings to RDF
/// Converts a semicolon-delimited listings extract to Turtle based on a mapping manifest
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output for detailed processing information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Convert the listings extract (the default when no subcommand is given)
#[derive(Args)]
struct ConvertArgs {
    /// Path to the delimited listings file
    #[arg(
        short,
        long,
        env = "INPUT_FILE",
        default_value = DEFAULT_INPUT_FILE,
        value_name = "PATH TO CSV"
    )]
    input: PathBuf,

    /// Path of the Turtle file to write
    #[arg(
        short,
        long,
        env = "OUTPUT_FILE",
        default_value = DEFAULT_OUTPUT_FILE,
        value_name = "OUTPUT PATH"
    )]
    output: PathBuf,

    /// Mapping manifest to use instead of a built-in template
    #[arg(short, long, value_name = "PATH TO MAPPING")]
    mapping: Option<PathBuf>,

    /// Built-in mapping template to use when no manifest is given (standard/basic)
    #[arg(short = 't', long = "template", default_value = "standard")]
    template: String,

    /// Do not add the data set resource to the graph
    #[arg(long)]
    no_dataset: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mapping manifest from a built-in template
    GenerateMapping {
        /// Type of mapping template to generate (standard/basic)
        #[arg(short = 't', long = "type", default_value = "standard")]
        template_type: String,

        /// Output path for the generated mapping
        #[arg(
            short,
            long,
            default_value = "mapping.jsonc",
            value_name = "OUTPUT PATH"
        )]
        output: PathBuf,
    },
    /// Validate a mapping manifest
    Validate {
        /// Path to the mapping manifest to validate
        #[arg(
            short,
            long,
            default_value = "mapping.jsonc",
            value_name = "PATH TO MAPPING"
        )]
        mapping: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with appropriate level
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Housing listings to RDF starting up...");

    match &cli.command {
        Some(Commands::GenerateMapping {
            template_type,
            output,
        }) => generate_mapping_command(template_type, output),
        Some(Commands::Validate { mapping }) => validate_command(mapping),
        None => convert_command(&cli.convert),
    }
}

fn load_mapping(path: &Option<PathBuf>, template: &str) -> Result<Mapping> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Mapping file not found: {}", path.display());
            }
            Mapping::from_file(path)
                .context("Failed to load mapping. See errors for additional details:")
        }
        None => {
            let template: Template = template.parse()?;
            info!("Using built-in {} mapping", template);
            Mapping::from_template(template).context("Failed to load built-in mapping")
        }
    }
}

fn convert_command(args: &ConvertArgs) -> Result<()> {
    // Verify input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mapping = load_mapping(&args.mapping, &args.template)?;

    info!("Validating mapping configuration...");
    mapping.validate().context("Failed to validate mapping")?;

    info!(
        "Mapping '{}' (version {}) loaded and validated successfully",
        mapping.name, mapping.version
    );
    info!("Description: {}", mapping.description);

    let processor = Processor::new(mapping).with_dataset(!args.no_dataset);

    info!("Converting {}...", args.input.display());
    let summary = processor
        .process(&args.input, &args.output)
        .context("Failed to convert listings")?;

    info!(
        "Wrote {} statements from {} rows ({} skipped) to {}",
        summary.statements,
        summary.rows_mapped,
        summary.rows_skipped,
        args.output.display()
    );
    Ok(())
}

fn generate_mapping_command(template_type: &str, output: &PathBuf) -> Result<()> {
    let template: Template = template_type
        .parse()
        .context("Invalid template type. Must be either 'standard' or 'basic'")?;

    info!("Generating {} mapping template...", template);

    // if output is a directory, append the default file name
    let full_file_output_path = if output.is_dir() {
        output.join("mapping.jsonc")
    } else {
        output.into()
    };

    fs::write(&full_file_output_path, template.content())
        .context(format!("Failed to write mapping to: {}", output.display()))?;

    info!(
        "Successfully generated mapping template at: {}",
        full_file_output_path.display()
    );
    Ok(())
}

fn validate_command(mapping_path: &PathBuf) -> Result<()> {
    info!("Validating mapping...");

    // Verify mapping file exists
    if !mapping_path.exists() {
        anyhow::bail!(
            "Mapping file not found: {}. Try using --mapping <PATH TO MAPPING>",
            mapping_path.display()
        );
    }

    let mapping = Mapping::from_file(mapping_path)
        .context("Failed to parse mapping. See errors for additional details:")?;

    mapping.validate().context("Failed to validate mapping")?;

    info!("Mapping validation successful");
    info!("Name: {}", mapping.name);
    info!("Description: {}", mapping.description);
    info!("Version: {}", mapping.version);
    Ok(())
}
