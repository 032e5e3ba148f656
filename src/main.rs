//! carte-ulis CLI - merge ULIS spreadsheet extracts into map data
//!
//! # Main Command
//!
//! ```bash
//! carte-ulis extract --details "Affectation ULIS-ETABLISSEMENTS.csv" \
//!                    --geo "Temporaire_pour_carte_ULIS.csv"
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! carte-ulis parse details.csv             # Just parse CSV to JSON rows
//! carte-ulis inspect details.csv           # List columns, address candidates
//! carte-ulis inspect details.csv -c "Dispositif spécifique"
//! carte-ulis validate data_ulis.js         # Check records against the schema
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use carte_ulis::inspect::{address_candidates, unique_value_counts};
use carte_ulis::{
    artifact_body, extract_files, parse_csv_file, parse_csv_file_auto, validate_records,
    write_artifact, DEFAULT_VAR_NAME,
};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "carte-ulis")]
#[command(about = "Merge ULIS spreadsheet extracts into map-ready JSON data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: details + geo CSV → data_ulis.js
    Extract {
        /// Details table (administrative/program data)
        #[arg(long)]
        details: PathBuf,

        /// Geo table (coordinates, degree, district)
        #[arg(long)]
        geo: PathBuf,

        /// Output artifact
        #[arg(short, long, default_value = "data_ulis.js")]
        output: PathBuf,

        /// JS variable name assigned in the artifact
        #[arg(long, default_value = DEFAULT_VAR_NAME)]
        var_name: String,

        /// Write a bare JSON array instead of the JS wrapper
        #[arg(long)]
        json: bool,
    },

    /// Parse a CSV file and output JSON rows
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect a CSV file's columns and values
    Inspect {
        /// Input CSV file
        input: PathBuf,

        /// Show unique values of this column with occurrence counts
        #[arg(short, long)]
        column: Option<String>,
    },

    /// Validate records (JSON array or generated artifact) against the record schema
    Validate {
        /// Input file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            details,
            geo,
            output,
            var_name,
            json,
        } => cmd_extract(&details, &geo, &output, &var_name, json),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Inspect { input, column } => cmd_inspect(&input, column.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    details: &Path,
    geo: &Path,
    output: &Path,
    var_name: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = extract_files(details, geo)?;

    write_artifact(output, &result.records, var_name, json)?;

    let stats = &result.stats;
    eprintln!("\n📊 Summary:");
    eprintln!("   Total merged: {}", stats.merged);
    eprintln!("   Emitted: {}", stats.emitted);
    eprintln!("   Skipped (zero/inactive): {}", stats.skipped_inactive);
    eprintln!("   Missing coordinates: {}", stats.missing_coords);
    eprintln!("   Invalid coordinates: {}", stats.invalid_coords);
    eprintln!("💾 Output written to: {}", output.display());

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = match delimiter {
        Some(d) => parse_csv_file(input, d)?,
        None => parse_csv_file_auto(input)?,
    };

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} rows", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_inspect(input: &Path, column: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let result = parse_csv_file_auto(input)?;

    eprintln!("--- Inspecting {} ---", input.display());
    eprintln!(
        "Encoding: {}, delimiter: '{}', {} rows",
        result.encoding,
        format_delimiter(result.delimiter),
        result.records.len()
    );

    println!("Columns ({}):", result.headers.len());
    for header in &result.headers {
        println!("  - {}", header);
    }

    let candidates = address_candidates(&result.headers);
    if !candidates.is_empty() {
        println!("\nAddress candidates: {}", candidates.join(", "));
    }

    if let Some(first) = result.records.first() {
        println!("\nStructure check (first row):");
        for key in ["UAI", "Dénomination principale", "Nom"] {
            if let Some(value) = first.get(key).and_then(Value::as_str) {
                println!("  {}: {}", key, value);
            }
        }
    }

    if let Some(column) = column {
        println!("\nUnique values in '{}':", column);
        for (value, count) in unique_value_counts(&result.records, column) {
            let display = if value.is_empty() { "(empty)" } else { value.as_str() };
            println!("  {:>5}  {}", count, display);
        }
    }

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let records: Vec<Value> = serde_json::from_str(artifact_body(&content))?;

    let (valid, invalid, errors) = validate_records(&records);

    for (i, errs) in errors.iter().take(5) {
        eprintln!("\n❌ Record {} invalid:", i);
        for err in errs.iter().take(3) {
            eprintln!("   - {}", err);
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
