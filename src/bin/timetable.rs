//! Command-line front end for the timetable pipeline.
//!
//! # Usage
//!
//! Extract a workbook to JSON:
//! ```sh
//! timetable extract timetable.xlsx -o schedule.json
//! ```
//!
//! Load it into SQLite and ask what a group has on a date:
//! ```sh
//! timetable load schedule.json --db schedule.db
//! timetable query --db schedule.db --group ИВТ-21 --date 2024-10-14
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use timetable::calendar::WeekCalendar;
use timetable::config::Config;
use timetable::schedule::{self, LessonType, WeekParity, Weekday};
use timetable::store::{Choice, ScheduleFilter, Store};
use timetable::xlsx::Workbook;

/// Extract and query university timetables
#[derive(Parser, Debug)]
#[command(name = "timetable", version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// More output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every sheet of a workbook into a JSON array
    Extract {
        /// Timetable workbook
        #[arg(value_name = "XLSX")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "OUTPUT", default_value = "schedule.json")]
        output: PathBuf,
    },

    /// Load extracted JSON into a database
    Load {
        /// JSON produced by `extract`
        #[arg(value_name = "JSON")]
        input: PathBuf,

        /// Database file, created if missing
        #[arg(long, value_name = "DB", default_value = "schedule.db")]
        db: PathBuf,
    },

    /// Print stored classes as tab-separated lines
    Query {
        #[arg(long, value_name = "DB", default_value = "schedule.db")]
        db: PathBuf,

        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        teacher: Option<String>,

        #[arg(long)]
        discipline: Option<String>,

        #[arg(long)]
        room: Option<String>,

        /// Lesson type
        #[arg(long = "type", value_enum)]
        lesson_type: Option<LessonTypeArg>,

        /// Weekday, e.g. Понедельник (any case)
        #[arg(long, value_parser = parse_weekday)]
        day: Option<Weekday>,

        #[arg(long, value_enum)]
        week: Option<WeekArg>,

        /// Only classes held on this date (sets day and week)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// First Monday of the term, overrides the configuration
        #[arg(long, value_name = "YYYY-MM-DD")]
        epoch: Option<NaiveDate>,
    },

    /// Print the known values of one filter field
    List {
        #[arg(long, value_name = "DB", default_value = "schedule.db")]
        db: PathBuf,

        #[arg(value_enum)]
        what: ListArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LessonTypeArg {
    Lecture,
    Practice,
    Lab,
}

impl From<LessonTypeArg> for LessonType {
    fn from(arg: LessonTypeArg) -> Self {
        match arg {
            LessonTypeArg::Lecture => LessonType::Lecture,
            LessonTypeArg::Practice => LessonType::Practice,
            LessonTypeArg::Lab => LessonType::Lab,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WeekArg {
    Odd,
    Even,
    Every,
    Unknown,
}

impl From<WeekArg> for WeekParity {
    fn from(arg: WeekArg) -> Self {
        match arg {
            WeekArg::Odd => WeekParity::Odd,
            WeekArg::Even => WeekParity::Even,
            WeekArg::Every => WeekParity::Every,
            WeekArg::Unknown => WeekParity::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListArg {
    Groups,
    Teachers,
    Disciplines,
    Rooms,
}

impl From<ListArg> for Choice {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Groups => Choice::Groups,
            ListArg::Teachers => Choice::Teachers,
            ListArg::Disciplines => Choice::Disciplines,
            ListArg::Rooms => Choice::Rooms,
        }
    }
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    Weekday::from_name(s)
        .or_else(|| Weekday::from_marker(s))
        .ok_or_else(|| format!("unknown weekday: {s}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    timetable::logger::init(timetable::logger::level_for_verbosity(args.verbose))
        .map_err(|e| e.to_string())?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match args.command {
        Command::Extract { input, output } => {
            let workbook = Workbook::open(&input)?;
            let parser = schedule::Parser::new(config.parser);
            let extraction = parser.parse_workbook(&workbook);
            fs::write(&output, schedule::to_json(&extraction.entries)?)?;

            let report = &extraction.report;
            info!(
                "{} entries from {} sheets ({} unreadable) written to {} ({} rows without context, {} unclassified)",
                report.entries,
                report.sheets,
                report.failed_sheets.len(),
                output.display(),
                report.skipped_no_context,
                report.skipped_unclassified
            );
        },
        Command::Load { input, db } => {
            let entries = schedule::from_json(&fs::read_to_string(&input)?)?;
            let mut store = Store::open(&db)?;
            let report = store.load(&entries)?;
            info!("{} entries loaded into {}", report.entries, db.display());
        },
        Command::Query {
            db,
            group,
            teacher,
            discipline,
            room,
            lesson_type,
            day,
            week,
            date,
            epoch,
        } => {
            let calendar = epoch.map_or(config.calendar, WeekCalendar::new);
            let mut filter = ScheduleFilter {
                group,
                teacher,
                discipline,
                room,
                lesson_type: lesson_type.map(Into::into),
                day,
                week: week.map(Into::into),
            };
            if let Some(date) = date {
                filter = filter.on_date(date, &calendar);
            }

            let store = Store::open(&db)?;
            for row in store.query(&filter)? {
                println!("{row}");
            }
        },
        Command::List { db, what } => {
            let store = Store::open(&db)?;
            for value in store.choices(what.into())? {
                println!("{value}");
            }
        },
    }

    Ok(())
}
