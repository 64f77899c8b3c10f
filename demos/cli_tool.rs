//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using xlsxcsv for converting Excel files to CSV.

use std::fs::File;
use std::io::{self, Write};
use std::process;
use xlsxcsv::{ConverterBuilder, ExportProfile, QuotePolicy, SheetSelector, XlsxToCsvError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input.xlsx> <output.csv|-> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --sheet <name>       Select sheet by name (falls back to the active sheet)");
        eprintln!("  --delimiter <c>      Field delimiter (default: ;)");
        eprintln!("  --minimal-quoting    Quote only fields that need it");
        eprintln!("  --no-headers         Do not write the header row");
        eprintln!("  --odoo               Odoo profile (rejoin wrapped rows, drop #VALUE!)");
        eprintln!("\nExamples:");
        eprintln!("  {} produtos.xlsx produtos.csv", args[0]);
        eprintln!("  {} produtos.xlsx - --delimiter , --minimal-quoting", args[0]);
        eprintln!("  {} produtos.xlsx produtos_odoo.csv --odoo", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let use_stdout = output_path == "-";

    // Parse options
    let mut builder = ConverterBuilder::new();
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--sheet" => {
                let name = option_value(&args, i);
                builder = builder.with_sheet_selector(SheetSelector::Name(name.to_string()));
                i += 2;
            }
            "--delimiter" => {
                let value = option_value(&args, i);
                let delimiter = match value.as_bytes() {
                    [byte] => *byte,
                    _ => {
                        eprintln!("Error: Delimiter must be a single character: {}", value);
                        process::exit(1);
                    }
                };
                builder = builder.with_delimiter(delimiter);
                i += 2;
            }
            "--minimal-quoting" => {
                builder = builder.with_quote_policy(QuotePolicy::Minimal);
                i += 1;
            }
            "--no-headers" => {
                builder = builder.keep_headers(false);
                i += 1;
            }
            "--odoo" => {
                builder = builder.with_profile(ExportProfile::Odoo);
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    match convert_excel(builder, input_path, output_path, use_stdout) {
        Ok(_) => {
            if !use_stdout {
                println!("Conversion completed: {} -> {}", input_path, output_path);
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn option_value(args: &[String], i: usize) -> &str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", args[i]);
            process::exit(1);
        }
    }
}

fn convert_excel(
    builder: ConverterBuilder,
    input_path: &str,
    output_path: &str,
    use_stdout: bool,
) -> Result<(), XlsxToCsvError> {
    let converter = builder.build()?;
    let input = File::open(input_path)?;

    if use_stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        converter.convert(input, &mut handle)?;
        handle.flush()?;
    } else {
        let output = File::create(output_path)?;
        converter.convert(input, output)?;
    }

    Ok(())
}

fn handle_error(error: XlsxToCsvError) {
    match error {
        XlsxToCsvError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
        }
        XlsxToCsvError::Validation(msg) => {
            eprintln!("Invalid sheet: {}", msg);
        }
        XlsxToCsvError::Decode(err) => {
            eprintln!("Not a readable XLSX workbook: {}", err);
        }
        XlsxToCsvError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        XlsxToCsvError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
        }
        other => {
            eprintln!("Error: {}", other);
        }
    }
}
