use clap::{Args, Parser, Subcommand};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use stride_core::date::{Days, Hours, Millis, Minutes, Months, Seconds, Years};
use stride_core::*;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Stepped ranges of integers, characters and dates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print a JSON document instead of one element per line
    #[arg(long, global = true)]
    json: bool,

    /// Print at most this many elements
    #[arg(long, global = true)]
    limit: Option<NonZeroUsize>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Step and bound options shared by every element type
#[derive(Args)]
struct Shape {
    /// Increment between elements; negative to descend
    #[arg(long)]
    step: Option<i64>,

    /// Exclude the end bound
    #[arg(long, conflicts_with = "inclusive")]
    until: bool,

    /// Include the end bound even when the config excludes it
    #[arg(long)]
    inclusive: bool,

    /// Emit the elements in reverse order
    #[arg(long)]
    reverse: bool,
}

impl Shape {
    fn options(&self, config: &Config) -> ProgressionOptions<i64> {
        let defaults = config.options();
        let inclusive = if self.until {
            false
        } else {
            self.inclusive || defaults.inclusive
        };
        ProgressionOptions {
            step: self.step.unwrap_or(defaults.step),
            inclusive,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Step through 64-bit integers
    #[command(allow_negative_numbers = true)]
    Int {
        start: i64,
        end: i64,

        #[command(flatten)]
        shape: Shape,

        /// Only report whether this value is an element
        #[arg(long)]
        contains: Option<i64>,
    },

    /// Step through Unicode scalar values
    #[command(allow_negative_numbers = true)]
    Char {
        start: char,
        end: char,

        #[command(flatten)]
        shape: Shape,

        /// Only report whether this character is an element
        #[arg(long)]
        contains: Option<char>,
    },

    /// Step through calendar units (year, month, day, hour, minute, second, millisecond)
    #[command(allow_negative_numbers = true)]
    Date {
        unit: DateUnit,
        start: String,
        end: String,

        #[command(flatten)]
        shape: Shape,

        /// Only report whether this instant is an element
        #[arg(long)]
        contains: Option<String>,
    },
}

/// Where and how elements are printed
struct Output {
    json: bool,
    limit: Option<usize>,
    separator: String,
}

/// JSON document written element by element, so that unbounded
/// progressions never have to be collected in memory.
struct Listing<I> {
    progression: String,
    empty: bool,
    limit: usize,
    elements: RefCell<I>,
}

impl<I> Serialize for Listing<I>
where
    I: Iterator,
    I::Item: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut elements = self.elements.borrow_mut();
        let mut state = serializer.serialize_struct("Listing", 4)?;
        state.serialize_field("progression", &self.progression)?;
        state.serialize_field("empty", &self.empty)?;
        state.serialize_field(
            "elements",
            &Shown(RefCell::new(elements.by_ref().take(self.limit))),
        )?;
        state.serialize_field("truncated", &elements.next().is_some())?;
        state.end()
    }
}

struct Shown<I>(RefCell<I>);

impl<I> Serialize for Shown<I>
where
    I: Iterator,
    I::Item: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&mut *self.0.borrow_mut())
    }
}

fn main() -> Result<()> {
    // Initialize logging
    stride_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output = Output {
        json: cli.json,
        limit: cli.limit.map(NonZeroUsize::get).or(config.output.limit),
        separator: config.output.separator.clone(),
    };

    match cli.command {
        Commands::Int {
            start,
            end,
            shape,
            contains,
        } => cmd_int(start, end, &shape, contains, &config, &output),
        Commands::Char {
            start,
            end,
            shape,
            contains,
        } => cmd_char(start, end, &shape, contains, &config, &output),
        Commands::Date {
            unit,
            start,
            end,
            shape,
            contains,
        } => {
            let start = parse_instant(&start)?;
            let end = parse_instant(&end)?;
            let contains = contains.as_deref().map(parse_instant).transpose()?;
            let args = DateArgs {
                start,
                end,
                shape: &shape,
                contains,
                config: &config,
                output: &output,
            };
            match unit {
                DateUnit::Year => cmd_date::<Years>(args),
                DateUnit::Month => cmd_date::<Months>(args),
                DateUnit::Day => cmd_date::<Days>(args),
                DateUnit::Hour => cmd_date::<Hours>(args),
                DateUnit::Minute => cmd_date::<Minutes>(args),
                DateUnit::Second => cmd_date::<Seconds>(args),
                DateUnit::Millisecond => cmd_date::<Millis>(args),
            }
        }
    }
}

fn cmd_int(
    start: i64,
    end: i64,
    shape: &Shape,
    contains: Option<i64>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let progression = Progression::with_options(start, end, shape.options(config))?;
    let progression = if shape.reverse {
        progression.reversed()
    } else {
        progression
    };

    if let Some(value) = contains {
        println!("{}", progression.contains(value));
        return Ok(());
    }
    emit(output, &progression, progression.is_empty(), progression.iter())
}

fn cmd_char(
    start: char,
    end: char,
    shape: &Shape,
    contains: Option<char>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let options = shape.options(config);
    let step = i32::try_from(options.step).map_err(|_| {
        Error::InvalidArgument(format!("Character step {} does not fit in 32 bits", options.step))
    })?;
    let progression = Progression::with_options(
        start,
        end,
        ProgressionOptions {
            step,
            inclusive: options.inclusive,
        },
    )?;
    let progression = if shape.reverse {
        progression.reversed()
    } else {
        progression
    };

    if let Some(value) = contains {
        println!("{}", progression.contains(value));
        return Ok(());
    }
    emit(output, &progression, progression.is_empty(), progression.iter())
}

struct DateArgs<'a> {
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    shape: &'a Shape,
    contains: Option<chrono::NaiveDateTime>,
    config: &'a Config,
    output: &'a Output,
}

fn cmd_date<U: CalendarUnit>(args: DateArgs<'_>) -> Result<()> {
    let progression =
        DateProgression::<U>::with_options(args.start, args.end, args.shape.options(args.config))?;
    let progression = if args.shape.reverse {
        progression.reversed()
    } else {
        progression
    };

    if let Some(instant) = args.contains {
        println!("{}", progression.contains(instant));
        return Ok(());
    }

    let pattern = args.config.date_format(U::UNIT);
    let elements = progression
        .iter()
        .map(|instant| instant.format(pattern).to_string());
    emit(args.output, &progression, progression.is_empty(), elements)
}

fn emit<P, E, I>(output: &Output, progression: &P, empty: bool, elements: I) -> Result<()>
where
    P: Display,
    E: Serialize + Display,
    I: Iterator<Item = E>,
{
    let result = if output.json {
        write_json(output, progression, empty, elements)
    } else {
        write_text(output, elements)
    };

    match result {
        // A reader such as `head` closing stdout ends the listing
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed, stopping output");
            Ok(())
        }
        other => other,
    }
}

fn write_json<P, E, I>(output: &Output, progression: &P, empty: bool, elements: I) -> Result<()>
where
    P: Display,
    E: Serialize,
    I: Iterator<Item = E>,
{
    let listing = Listing {
        progression: progression.to_string(),
        empty,
        limit: output.limit.unwrap_or(usize::MAX),
        elements: RefCell::new(elements),
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut writer, &listing).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Json(e)
        }
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn write_text<E, I>(output: &Output, mut elements: I) -> Result<()>
where
    E: Display,
    I: Iterator<Item = E>,
{
    let limit = output.limit.unwrap_or(usize::MAX);
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut printed = 0usize;
    for element in elements.by_ref().take(limit) {
        if printed > 0 {
            writer.write_all(output.separator.as_bytes())?;
        }
        write!(writer, "{}", element)?;
        printed += 1;
    }
    if printed > 0 {
        writeln!(writer)?;
    }
    writer.flush()?;

    if elements.next().is_some() {
        tracing::warn!("Output truncated after {} elements", limit);
    }
    Ok(())
}
