use std::{
    io::{
        self,
        BufRead,
    },
    path::PathBuf,
    process::ExitCode,
};

use bunseki::{
    AnalysisResult,
    Analyzer,
    BunsekiError,
    Settings,
};
use clap::Parser;
use log::{
    error,
    info,
};

#[derive(Parser, Debug)]
#[command(version, about = "Grammar, vocabulary and JLPT level analysis of Japanese sentences", long_about = None)]
struct Args {
    /// Sentence to analyse. Without it every non-empty stdin line is analysed.
    text: Vec<String>,

    /// Only use local data: no Jisho, DeepL or AI explanations
    #[arg(long)]
    no_remote: bool,

    /// Vibrato system.dic (plain or .zst) instead of the downloaded UniDic
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Print the machine translation of each sentence instead of the analysis
    #[arg(long)]
    translate: bool,
}

fn read_stdin_lines() -> Result<Vec<String>, BunsekiError> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_result(result: &AnalysisResult, pretty: bool) -> Result<(), BunsekiError> {
    let json =
        if pretty { serde_json::to_string_pretty(result)? } else { serde_json::to_string(result)? };
    println!("{}", json);
    Ok(())
}

fn run(args: Args) -> Result<bool, BunsekiError> {
    let mut settings = Settings::load();
    if args.no_remote {
        settings = settings.offline();
    }
    if let Some(path) = args.dictionary {
        settings.tokenizer.dictionary_path = Some(path);
    }

    let texts =
        if args.text.is_empty() { read_stdin_lines()? } else { vec![args.text.join(" ")] };
    if texts.is_empty() {
        return Err(BunsekiError::EmptyText);
    }

    let analyzer = Analyzer::from_settings(&settings)?;
    let mut all_ok = true;

    if args.translate {
        for text in &texts {
            match analyzer.translate_sentence(text) {
                Ok(translation) => println!("{}", translation),
                Err(e) => {
                    error!("Could not translate '{}': {}", text, e);
                    all_ok = false;
                }
            }
        }
        return Ok(all_ok);
    }

    let pretty = texts.len() == 1;
    for (text, result) in texts.iter().zip(analyzer.analyze_batch(&texts)) {
        match result {
            Ok(result) => print_result(&result, pretty)?,
            Err(e) => {
                error!("Could not analyse '{}': {}", text, e);
                all_ok = false;
            }
        }
    }
    info!("Processed {} sentences", texts.len());

    Ok(all_ok)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
