use std::io::stdin;
use std::path::PathBuf;

use clap::Parser;
use work_stresscheck::config::AppConfig;
use work_stresscheck::report::{self, ExportFormat};
use work_stresscheck::{telemetry, AppError, ContentProvider, Error, Locale, Session};

#[derive(Parser)]
#[command(name = "wsq", about = "Work Stress Questionnaire (WSQ)", version)]
struct Args {
    /// Display language: en or id
    #[arg(long)]
    lang: Option<String>,
    /// Comma separated answers (1-4) in question order; empty entries stay unanswered
    #[arg(long)]
    answers: Option<String>,
    /// Write the results view to this file
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format: text, json or csv
    #[arg(long)]
    format: Option<ExportFormat>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let locale = match args.lang {
        Some(ref lang) => lang.parse::<Locale>()?,
        None => config.locale,
    };
    let format = args.format.unwrap_or(config.export_format);
    let mut session = Session::new(ContentProvider::builtin()?, locale)?;

    match args.answers {
        Some(ref answers) => fill_answers(&mut session, answers)?,
        None => ask(&mut session)?,
    }

    let progress = session.progress();
    if !progress.is_complete() {
        println!("{}", session.bundle().remaining_text(progress.remaining()));
        return Ok(());
    }

    let results = session.final_results()?;
    println!("{}", session.bundle().text().view_results);
    println!();
    print!("{}", report::render_text(session.bundle(), &results));

    if let Some(path) = args.export {
        if let Err(err) = report::export(&path, format, session.bundle(), &results) {
            tracing::error!(path = %path.display(), error = %err, "export failed");
        }
    }
    Ok(())
}

/// 設問を1問ずつ表示して回答を受け付ける
fn ask(session: &mut Session<'_>) -> Result<(), AppError> {
    let bundle = session.bundle();
    let mut buffer = String::new();

    println!("{}", bundle.text().app_title);
    println!("{}", bundle.text().app_subtitle);
    println!();

    for item in bundle.items() {
        println!("{}. {}", item.id, item.text);
        for (index, label) in bundle.answer_option_labels().iter().enumerate() {
            print!("  {} => {}", index + 1, label);
        }
        loop {
            println!();
            buffer.clear();
            if stdin().read_line(&mut buffer)? == 0 {
                // 入力終了。未回答のまま終える
                return Ok(());
            }
            if store_answer(buffer.trim(), item.id, session).is_ok() {
                break;
            }
            print!("{}", bundle.text().invalid_answer);
        }
        let progress = session.progress();
        println!("{}", bundle.progress_text(progress.answered, progress.total));
        println!();
    }
    Ok(())
}

/// `--answers 3,3,,4` 形式の回答を設問順に格納する
fn fill_answers(session: &mut Session<'_>, answers: &str) -> Result<(), Error> {
    let items = session.bundle().items();
    for (index, value) in answers.split(',').enumerate() {
        let item = items
            .get(index)
            .ok_or(Error::UnknownItem(index as u32 + 1))?;
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        store_answer(value, item.id, session)?;
    }
    Ok(())
}

fn store_answer(value: &str, item_id: u32, session: &mut Session<'_>) -> Result<(), Error> {
    let value = value.parse::<u8>().map_err(|_| Error::InvalidAnswerValue(0))?;
    session.submit_answer(item_id, value)?;
    Ok(())
}
