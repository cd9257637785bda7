use std::{env, fs, path::PathBuf};

fn scoring_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::arg!(--scorer <SCORER> "Sentiment scorer (lexicon, model)")
            .default_value("lexicon")
            .value_parser(["lexicon", "model"]),
    )
    .arg(
        clap::arg!(--stopwords <MODE> "Stopword filtering (enabled, disabled)")
            .value_parser(["enabled", "disabled"]),
    )
    .arg(
        clap::arg!(--lexicon_dir <DIR> "Directory holding MasterDictionary/ and StopWords/")
            .long("lexicon-dir")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    )
    .arg(
        clap::arg!(--model_dir <DIR> "Directory holding model.onnx and tokenizer.json")
            .long("model-dir")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
    )
    .arg(
        clap::arg!(--max_tokens <NUM> "Maximum model input length in tokens")
            .long("max-tokens")
            .default_value("512"),
    )
    .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
    .arg(
        clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests")
            .long("user-agent")
            .value_name("UA"),
    )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("textmetrics")
        .version(env!("CARGO_PKG_VERSION"))
        .author("textmetrics contributors")
        .about("Sentiment and readability metrics for article text")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(scoring_args(
            clap::Command::new("run")
                .about("Score every URL in a workbook and write the metrics back into it")
                .arg(
                    clap::arg!(<WORKBOOK> "Input workbook (.xlsx) with URL_ID and URL columns")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        ))
        .subcommand(scoring_args(
            clap::Command::new("score")
                .about("Score a single document and print its metrics")
                .arg(clap::arg!(<INPUT> "URL to fetch, local file, or '-' for stdin"))
                .arg(
                    clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                        .default_value("text")
                        .value_parser(["text", "json"]),
                )
                .arg(clap::arg!(--html "Treat file or stdin input as HTML")),
        ))
        .subcommand(
            clap::Command::new("init-lexicon")
                .about("Write the built-in word lists into a lexicon directory")
                .arg(
                    clap::arg!([DIR] "Lexicon directory (default: user data directory)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "textmetrics", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "textmetrics", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "textmetrics", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "textmetrics", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
