use anyhow::{Context, Result};
use bnbprofiler::{
    clean,
    load::{load_listings, SourceConfig},
    plot,
    profile::{self, ColumnProfile, CorrelationMatrix, NumericSummary},
    report,
};
use prettytable::{format, Cell, Row, Table};
use std::{env, fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configuration ────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let csv_path = PathBuf::from(args.next().unwrap_or_else(|| "listings.csv".to_string()));
    let encoding = args.next().unwrap_or_else(|| "utf-8".to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "plots".to_string()));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    // ─── 3) load ─────────────────────────────────────────────────────
    let config = SourceConfig::new(&csv_path, &encoding);
    let mut table = load_listings(&config).context("loading listings")?;
    println!(
        "Loaded {} rows x {} columns from {}",
        table.height(),
        table.width(),
        csv_path.display()
    );
    println!("Columns: {}", table.headers.join(", "));

    // ─── 4) clean ────────────────────────────────────────────────────
    let dropped = clean::drop_empty_columns(&mut table);
    if dropped.is_empty() {
        println!("\nNo fully-missing columns.");
    } else {
        println!("\nDropped fully-missing columns: {}", dropped.join(", "));
    }

    let missing = clean::missing_counts(&table);
    print_missing_counts(&missing);

    let removed = clean::drop_nonpositive_prices(&mut table);
    println!(
        "Removed {} rows with non-positive prices; {} rows remain.",
        removed,
        table.height()
    );

    // ─── 5) profile ──────────────────────────────────────────────────
    let profiles = profile::profile_columns(&table);
    print_structure(&profiles);

    let numeric = profile::summarize_numeric(&table, &profiles);
    print_numeric_summaries(&numeric);

    let corr = profile::correlation_matrix(&table, &profiles);
    match &corr {
        Some(m) => print_correlations(m),
        None => println!("\nFewer than two numeric columns; no correlation matrix."),
    }

    // ─── 6) persist summary ──────────────────────────────────────────
    profile::write_summary(&out_dir, &profiles, &numeric, corr.as_ref())?;

    // ─── 7) charts ───────────────────────────────────────────────────
    let drawn = [
        plot::price_histogram(&table, &out_dir)?,
        plot::price_by_room_type(&table, &out_dir)?,
        plot::price_vs_minimum_nights(&table, &out_dir)?,
        plot::listing_map(&table, &out_dir)?,
        plot::correlation_heatmap(corr.as_ref(), &out_dir)?,
    ];
    info!(
        drawn = drawn.iter().filter(|d| **d).count(),
        skipped = drawn.iter().filter(|d| !**d).count(),
        "chart rendering finished"
    );

    // ─── 8) narrative ────────────────────────────────────────────────
    report::print_observations();

    info!("all done");
    Ok(())
}

fn print_missing_counts(counts: &[(String, usize)]) {
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);
    out.add_row(Row::new(vec![
        Cell::new("Column").style_spec("bFg"),
        Cell::new("Missing").style_spec("bFg"),
    ]));
    for (name, count) in counts {
        out.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&count.to_string()).style_spec("r"),
        ]));
    }
    println!("\n--- Missing Values ---");
    out.printstd();
}

fn print_structure(profiles: &[ColumnProfile]) {
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);
    out.add_row(Row::new(vec![
        Cell::new("Column").style_spec("bFg"),
        Cell::new("Kind").style_spec("bFg"),
        Cell::new("Present").style_spec("bFg"),
        Cell::new("Missing").style_spec("bFg"),
        Cell::new("Samples").style_spec("bFg"),
    ]));
    for p in profiles {
        out.add_row(Row::new(vec![
            Cell::new(&p.name),
            Cell::new(&format!("{:?}", p.kind)),
            Cell::new(&p.present.to_string()).style_spec("r"),
            Cell::new(&p.missing.to_string()).style_spec("r"),
            Cell::new(&p.samples.join(", ")),
        ]));
    }
    println!("\n--- Column Structure ---");
    out.printstd();
}

fn print_numeric_summaries(summaries: &[NumericSummary]) {
    if summaries.is_empty() {
        println!("\nNo numeric columns to describe.");
        return;
    }
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);
    out.add_row(Row::new(vec![
        Cell::new("Column").style_spec("bFg"),
        Cell::new("Count").style_spec("bFg"),
        Cell::new("Mean").style_spec("bFg"),
        Cell::new("Std").style_spec("bFg"),
        Cell::new("Min").style_spec("bFg"),
        Cell::new("25%").style_spec("bFg"),
        Cell::new("50%").style_spec("bFg"),
        Cell::new("75%").style_spec("bFg"),
        Cell::new("Max").style_spec("bFg"),
    ]));
    for s in summaries {
        out.add_row(Row::new(vec![
            Cell::new(&s.name),
            Cell::new(&s.count.to_string()).style_spec("r"),
            Cell::new(&format!("{:.2}", s.mean)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.std_dev)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.min)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.q1)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.median)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.q3)).style_spec("r"),
            Cell::new(&format!("{:.2}", s.max)).style_spec("r"),
        ]));
    }
    println!("\n--- Descriptive Statistics ---");
    out.printstd();
}

fn print_correlations(matrix: &CorrelationMatrix) {
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut header = vec![Cell::new("")];
    header.extend(matrix.labels.iter().map(|l| Cell::new(l).style_spec("bFg")));
    out.add_row(Row::new(header));

    for (label, row) in matrix.labels.iter().zip(&matrix.values) {
        let mut cells = vec![Cell::new(label).style_spec("bFg")];
        cells.extend(
            row.iter()
                .map(|v| Cell::new(&format!("{:.2}", v)).style_spec("r")),
        );
        out.add_row(Row::new(cells));
    }
    println!("\n--- Correlations (complete numeric rows) ---");
    out.printstd();
}
