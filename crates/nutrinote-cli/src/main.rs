use anyhow::{Context, Result};
use nutrinote_config::{Config, load_food_table};
use nutrinote_engine::{
    CalorieAnnotation, Grammar, IssueKind, NutrientKey, NutrientVector, NutritionTotals,
    calculate_totals, extract_inline_calorie_annotations, markup::span::lines_with_offsets,
};
use std::{env, fs, path::PathBuf, process};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let (note_path, foods_path) = match args.len() {
        2 => (PathBuf::from(&args[1]), None),
        3 => (PathBuf::from(&args[1]), Some(PathBuf::from(&args[2]))),
        _ => {
            eprintln!("Usage: {} <note.md> [foods.toml]", args[0]);
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!(
                "No config file at {}, using default tags",
                config_path.display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let foods = match foods_path {
        Some(path) => load_food_table(&path)?,
        None => config.food_table()?,
    };
    log::info!("Loaded {} foods", foods.len());

    let content = fs::read_to_string(&note_path)
        .with_context(|| format!("Failed to read note {}", note_path.display()))?;
    let grammar = Grammar::compile(&config.tags)?;
    let goals = (!config.goals.is_empty()).then_some(&config.goals);

    let Some(totals) = calculate_totals(&content, &grammar, &foods, goals) else {
        println!("No food or workout entries in {}", note_path.display());
        return Ok(());
    };
    let hints = extract_inline_calorie_annotations(&content, 0, &grammar, &foods);

    for line in render_annotated_lines(&content, &hints) {
        println!("{line}");
    }
    println!();
    for line in render_totals(&totals) {
        println!("{line}");
    }

    Ok(())
}

/// Lines carrying calorie hints, with the hints appended.
fn render_annotated_lines(content: &str, hints: &[CalorieAnnotation]) -> Vec<String> {
    lines_with_offsets(content, 0)
        .filter_map(|(line_start, line)| {
            let line_end = line_start + line.len();
            let texts: Vec<&str> = hints
                .iter()
                .filter(|hint| hint.position == line_end)
                .map(|hint| hint.text.as_str())
                .collect();
            (!texts.is_empty()).then(|| format!("{}  → {}", line.trim_end(), texts.join(", ")))
        })
        .collect()
}

fn render_totals(totals: &NutritionTotals) -> Vec<String> {
    let mut lines = vec!["Totals".to_string()];
    lines.extend(render_vector(&totals.clamped));

    if !totals.workout.is_empty() {
        lines.push(String::new());
        lines.push("Burned".to_string());
        lines.extend(render_vector(&totals.workout));
    }

    if let Some(progress) = &totals.goal_progress {
        lines.push(String::new());
        lines.push("Goals".to_string());
        for (key, p) in progress {
            lines.push(format!(
                "  {:<16}{} / {} ({}%, {} left)",
                key.as_str(),
                format_value(*key, p.consumed),
                format_value(*key, p.goal),
                p.percent_consumed,
                format_value(*key, p.remaining.max(0.0)),
            ));
        }
    }

    if !totals.issues.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for issue in &totals.issues {
            let reason = match &issue.kind {
                IssueKind::Missing => "no nutrition data".to_string(),
                IssueKind::Failed(message) => message.clone(),
            };
            lines.push(format!("  {}: {reason}", issue.name));
        }
    }

    lines
}

fn render_vector(values: &NutrientVector) -> Vec<String> {
    NutrientKey::NUTRIENTS
        .iter()
        .filter_map(|key| {
            let value = values.get(*key)?;
            Some(format!("  {:<16}{}", key.as_str(), format_value(*key, value)))
        })
        .collect()
}

/// Calories display as whole numbers, everything else to one decimal.
fn format_value(key: NutrientKey, value: f64) -> String {
    match key {
        NutrientKey::Calories => format!("{}kcal", value.round() as i64),
        NutrientKey::Sodium => format!("{value:.1}mg"),
        _ => format!("{value:.1}g"),
    }
}
