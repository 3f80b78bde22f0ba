use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tunescope::dashboard::DEFAULT_TOP_N;
use tunescope::serve::ServeConfig;
use tunescope::{
    AnalysisView, Dashboard, DashboardParams, DashboardReport, DashboardRequest, Generator, Variant,
};

#[derive(Parser, Debug)]
#[command(name = "tunescope")]
#[command(author, version, about = "Synthetic music-chart datasets and dashboards")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Random seed (default: 42 for library, fresh per request for charts)
    #[arg(long, global = true, env = "TUNESCOPE_SEED")]
    seed: Option<u64>,

    /// Reference date for library release dates, YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Year labelling the chart windows
    #[arg(long, global = true, default_value = "2024")]
    chart_year: i32,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive web dashboard
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001", env = "TUNESCOPE_PORT")]
        port: u16,

        /// Dataset used when a request does not choose one
        #[arg(long, default_value = "charts")]
        variant: Variant,

        /// Don't open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Generate a dataset and write it out (.html, .json, .csv; stdout CSV if omitted)
    Generate {
        #[arg(long, default_value = "charts")]
        variant: Variant,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter and aggregate a dataset, print a summary
    Analyze {
        #[command(flatten)]
        filter: FilterArgs,

        /// Also write a report (.html, .json, .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the written report
        #[arg(long)]
        open: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    #[arg(long, default_value = "charts")]
    variant: Variant,

    /// Genre name or "all"
    #[arg(short, long)]
    genre: Option<String>,

    /// Restrict to an artist (repeatable)
    #[arg(short, long = "artist")]
    artists: Vec<String>,

    /// Minimum popularity, 0-100
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    min_popularity: Option<i64>,

    /// Analysis mode: genre, artist, trend
    #[arg(short, long, default_value = "genre")]
    mode: String,

    /// Rows in top-N views
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Column ranking the top tracks (popularity, volume, energy, tempo, ...)
    #[arg(short, long, default_value = "popularity")]
    by: String,
}

impl From<FilterArgs> for DashboardParams {
    fn from(a: FilterArgs) -> Self {
        DashboardParams {
            variant: Some(a.variant.to_string()),
            artists: a.artists,
            genre: a.genre,
            min_popularity: a.min_popularity,
            mode: Some(a.mode),
            seed: None,
            top: Some(a.top),
            by: Some(a.by),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tunescope=debug" } else { "tunescope=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut generator = match Generator::new().with_seed(args.seed).with_chart_year(args.chart_year) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Invalid --chart-year: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(date) = args.date {
        generator = generator.with_reference_date(date);
    }
    let dashboard = Dashboard::new(generator);

    match args.command {
        Command::Serve { port, variant, no_open } => {
            let config = ServeConfig { port, variant, open_browser: !no_open };
            if let Err(e) = tunescope::serve::start(config, dashboard) {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }

        Command::Generate { variant, output } => {
            let request = DashboardRequest { variant, ..Default::default() };
            let report = run(&dashboard, &request);
            match output {
                Some(path) => write_report(&path, &report),
                None => {
                    let stdout = std::io::stdout();
                    let mut lock = stdout.lock();
                    if let Err(e) = tunescope::report::csv::write(&mut lock, &report.tracks, report.variant) {
                        eprintln!("Failed to write CSV: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }

        Command::Analyze { filter, output, open } => {
            let request = match DashboardRequest::try_from(DashboardParams::from(filter)) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Invalid filter: {}", e);
                    std::process::exit(2);
                }
            };
            let report = run(&dashboard, &request);
            print_summary(&report);

            if let Some(path) = output {
                write_report(&path, &report);
                if open {
                    if let Err(e) = open::that(&path) {
                        eprintln!("Failed to open report: {}", e);
                    }
                }
            }
        }
    }
}

fn run(dashboard: &Dashboard, request: &DashboardRequest) -> DashboardReport {
    match dashboard.run(request) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to build dataset: {}", e);
            std::process::exit(if e.is_client_error() { 2 } else { 1 });
        }
    }
}

fn write_report(path: &Path, report: &DashboardReport) {
    if let Err(e) = tunescope::report::generate(path, report) {
        eprintln!("Failed to write report: {}", e);
        std::process::exit(1);
    }
    eprintln!("\x1b[32mReport saved: {}\x1b[0m", path.display());
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| format!("{:.*}", decimals, v)).unwrap_or_else(|| "-".to_string())
}

fn print_summary(report: &DashboardReport) {
    let f = &report.filter;
    let s = &report.summary;

    eprintln!("\x1b[1mTunescope - {} dataset (seed {})\x1b[0m", report.variant, report.seed);
    eprintln!("{}", "─".repeat(70));
    eprintln!(
        "Filter: genre={} artists={} min_popularity={} mode={}",
        f.genre,
        if f.artists.is_empty() { "all".to_string() } else { f.artists.join(",") },
        f.min_popularity.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
        f.mode
    );
    eprintln!(
        "Tracks: {} of {}   avg popularity {}   avg danceability {}   avg energy {}   {} {}",
        s.tracks,
        report.base_rows,
        fmt_opt(s.mean_popularity, 1),
        fmt_opt(s.mean_danceability, 2),
        fmt_opt(s.mean_energy, 2),
        report.volume_label,
        s.total_volume
    );

    if report.is_empty() {
        eprintln!("\n\x1b[90mNo tracks match the selected filters.\x1b[0m");
        return;
    }

    println!();
    match &report.view {
        AnalysisView::Genre(rows) => {
            println!("{:<12} {:>6} {:>8} {:>10} {:>6} {:>6}", "GENRE", "TRACKS", "AVG POP", "VOLUME", "DANCE", "ENERGY");
            for r in rows {
                println!(
                    "{:<12} {:>6} {:>8.1} {:>10} {:>6.2} {:>6.2}",
                    r.genre.name(), r.tracks, r.mean_popularity, r.total_volume, r.mean_danceability, r.mean_energy
                );
            }
        }
        AnalysisView::Artist(rows) => {
            println!("{:<22} {:<11} {:>6} {:>8} {:>10}", "ARTIST", "GENRE", "TRACKS", "AVG POP", "VOLUME");
            for r in rows {
                println!(
                    "{:<22} {:<11} {:>6} {:>8.1} {:>10}",
                    truncate(&r.artist, 22), r.genre.name(), r.tracks, r.mean_popularity, r.total_volume
                );
            }
        }
        AnalysisView::Trend(rows) => {
            println!("{:<12} {:>6} {:>8} {:>10}", "WINDOW", "TRACKS", "AVG POP", "VOLUME");
            for r in rows {
                println!("{:<12} {:>6} {:>8.1} {:>10}", r.window, r.tracks, r.mean_popularity, r.total_volume);
            }
        }
    }

    let by = f.top_by;
    println!("\nTop {} by {}:", report.top_tracks.len(), by);
    for t in &report.top_tracks {
        println!("  {:>8}  {:<26} {}", fmt_opt(Some(by.value(t)), 2), truncate(&t.track_name, 26), t.artist);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
