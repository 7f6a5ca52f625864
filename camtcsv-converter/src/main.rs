//! CLI-утилита для конвертации выписок CAMT.053 в pipe-delimited отчет.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use camtcsv_parser::{extract, Camt053Message, ReportWriter};

/// Конвертер выписок CAMT.053 (ISO 20022) в pipe-delimited CSV-отчет.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Входной XML-файл (по умолчанию stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Выходной файл отчета (по умолчанию stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn read_input(args: &Args) -> Result<String, String> {
    let mut content = String::new();

    if let Some(ref path) = args.input {
        let mut file = File::open(path)
            .map_err(|e| format!("Не удалось открыть файл '{}': {}", path.display(), e))?;
        file.read_to_string(&mut content)
            .map_err(|e| format!("Не удалось прочитать файл '{}': {}", path.display(), e))?;
    } else {
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Не удалось прочитать stdin: {}", e))?;
    }

    Ok(content)
}

fn convert_and_write<W: Write>(content: &str, writer: &mut W) -> Result<(), String> {
    let message =
        Camt053Message::parse(content).map_err(|e| format!("Ошибка парсинга CAMT.053: {}", e))?;

    let record = extract(&message).map_err(|e| format!("Ошибка извлечения данных: {}", e))?;

    ReportWriter::write_to(&record, writer).map_err(|e| format!("Ошибка записи: {}", e))
}

fn main() {
    let args = Args::parse();

    let content = match read_input(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            process::exit(1);
        }
    };

    let result = if let Some(ref path) = args.output {
        let mut file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "Ошибка: Не удалось создать файл '{}': {}",
                    path.display(),
                    e
                );
                process::exit(1);
            }
        };
        convert_and_write(&content, &mut file)
    } else {
        let mut stdout = io::stdout();
        convert_and_write(&content, &mut stdout)
    };

    if let Err(e) = result {
        eprintln!("Ошибка: {}", e);
        process::exit(1);
    }
}
