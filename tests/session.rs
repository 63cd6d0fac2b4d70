use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Weekday};
use parquet::arrow::ArrowWriter;
use rusty_bikeshare::config::Config;
use rusty_bikeshare::data::filter::Selection;
use rusty_bikeshare::data::loader;
use rusty_bikeshare::data::model::Month;
use rusty_bikeshare::data::registry::{City, DataFormat};
use rusty_bikeshare::session::Session;
use rusty_bikeshare::stats::NO_TRIPS;
use rusty_bikeshare::ui::console::Console;

const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 08:05:00,2017-01-02 08:15:00,600,Canal St & Adams St,Clark St & Randolph St,Subscriber,Male,1990.0
1,2017-01-09 08:20:00,2017-01-09 08:40:00,1200,Canal St & Adams St,Clark St & Randolph St,Subscriber,Female,1985.0
2,2017-01-16 17:00:00,2017-01-16 17:05:00,300,Lake St & Wells St,Canal St & Adams St,Customer,,
3,2017-01-03 08:00:00,2017-01-03 09:00:00,3600,Streeter Dr & Grand Ave,Streeter Dr & Grand Ave,Customer,,
4,2017-02-06 12:00:00,2017-02-06 12:30:00,1800,Streeter Dr & Grand Ave,Lake St & Wells St,Subscriber,Male,1970.0
";

const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-03-05 10:00:00,2017-03-05 10:10:00,600.5,Lincoln Memorial,Union Station,Registered
1,2017-03-06 11:00:00,2017-03-06 11:20:00,1200.0,Union Station,Lincoln Memorial,Casual
";

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
    std::fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
    dir
}

fn run_session(dir: &Path, script: &str) -> (anyhow::Result<()>, String) {
    run_session_with(dir, DataFormat::Csv, script)
}

fn run_session_with(dir: &Path, format: DataFormat, script: &str) -> (anyhow::Result<()>, String) {
    let config = Config {
        data_dir: dir.to_path_buf(),
        format,
        max_attempts: 4,
    };
    let console = Console::new(script.as_bytes(), Vec::new());
    let mut session = Session::new(config, console);
    let result = session.run();
    let output = String::from_utf8(session.into_console().into_output()).unwrap();
    (result, output)
}

#[test]
fn chicago_january_mondays() {
    let dir = data_dir();

    let sel = Selection {
        city: City::Chicago,
        month: Some(Month::January),
        day: Some(Weekday::Mon),
    };
    let ds = loader::load(dir.path(), DataFormat::Csv, &sel).unwrap();
    assert_eq!(ds.len(), 3);
    assert!(ds
        .trips
        .iter()
        .all(|t| t.start_time.month() == 1 && t.start_time.weekday() == Weekday::Mon));

    let (result, out) = run_session(dir.path(), "chicago\njanuary\nmonday\nno\n");
    result.unwrap();

    assert!(out.contains("CITY :  Chicago"));
    assert!(out.contains("Month --> JANUARY"));
    assert!(out.contains("Day   --> MONDAY"));
    assert!(out.contains("Hour  --> 8am"));
    assert!(out.contains("Start station --> Canal St & Adams St"));
    assert!(out.contains("Popular Trip  --> Canal St & Adams St TO Clark St & Randolph St."));
    // 600 + 1200 + 300
    assert!(out.contains("Total trip duration --> 0 hours, 35 minutes and 0 seconds."));
    assert!(out.contains("Average trip duration --> 11 minutes and 40 seconds."));
    assert!(out.contains("Earliest Birth Year: 1985"));
    assert!(out.contains("Most Recent Birth Year: 1990"));
    assert!(!out.contains(NO_TRIPS));
    assert!(out.contains("Would you like to restart?"));
}

#[test]
fn washington_has_no_demographics() {
    let dir = data_dir();
    let (result, out) = run_session(dir.path(), "washingtn\nyes\nall\nall\nno\n");
    result.unwrap();

    assert!(out.contains("Did you mean 'Washington' instead?"));
    assert!(out.contains("Registered"));
    assert!(out.contains("Gender data not available for Washington."));
    assert!(out.contains("Birth Year data not available for Washington."));
}

#[test]
fn empty_selection_reports_every_section() {
    let dir = data_dir();
    let (result, out) = run_session(dir.path(), "chicago\njune\nall\nno\n");
    result.unwrap();
    assert_eq!(out.matches(NO_TRIPS).count(), 4);
}

#[test]
fn restart_runs_another_pass() {
    let dir = data_dir();
    let (result, out) = run_session(
        dir.path(),
        "chicago\nfebruary\nall\nYes\nwashington\nall\nsunday\nno\n",
    );
    result.unwrap();
    assert_eq!(out.matches("Displaying analysis for").count(), 2);
    assert!(out.contains("Month --> FEBRUARY"));
    assert!(out.contains("Day   --> SUNDAY"));
}

#[test]
fn end_of_input_at_restart_prompt_ends_quietly() {
    let dir = data_dir();
    let (result, _) = run_session(dir.path(), "chicago\nall\nall\n");
    assert!(result.is_ok());
}

#[test]
fn end_of_input_while_choosing_is_an_error() {
    let dir = data_dir();
    let (result, _) = run_session(dir.path(), "chicago\n");
    assert!(result.is_err());
}

#[test]
fn missing_city_file_is_fatal() {
    let dir = data_dir();
    let (result, _) = run_session(dir.path(), "new york city\nall\nall\nno\n");
    let msg = format!("{:#}", result.unwrap_err());
    assert!(msg.contains("New York City"), "{msg}");
    assert!(msg.contains("new_york_city.csv"), "{msg}");
}

/// Two Washington trips exported to Parquet, without the demographic columns.
fn write_washington_parquet(dir: &Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Start Time", DataType::Utf8, false),
        Field::new("Trip Duration", DataType::Float64, false),
        Field::new("Start Station", DataType::Utf8, true),
        Field::new("End Station", DataType::Utf8, true),
        Field::new("User Type", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec![
                "2017-03-05 10:00:00",
                "2017-03-12 10:30:00",
            ])),
            Arc::new(Float64Array::from(vec![124.0, 125.0])),
            Arc::new(StringArray::from(vec!["Lincoln Memorial", "Lincoln Memorial"])),
            Arc::new(StringArray::from(vec!["Union Station", "Union Station"])),
            Arc::new(StringArray::from(vec!["Registered", "Casual"])),
        ],
    )
    .unwrap();
    let file = std::fs::File::create(dir.join("washington.parquet")).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_format_reads_parquet_exports() {
    let dir = tempfile::tempdir().unwrap();
    write_washington_parquet(dir.path());

    let (result, out) = run_session_with(
        dir.path(),
        DataFormat::Parquet,
        "washington\nmarch\nsunday\nno\n",
    );
    result.unwrap();

    assert!(out.contains("Month --> MARCH"));
    assert!(out.contains("Day   --> SUNDAY"));
    assert!(out.contains("Hour  --> 10am"));
    assert!(out.contains("Popular Trip  --> Lincoln Memorial TO Union Station."));
    // 124 + 125 = 249; mean 124.5 rounds to even
    assert!(out.contains("Total trip duration --> 0 hours, 4 minutes and 9 seconds."));
    assert!(out.contains("Average trip duration --> 2 minutes and 4 seconds."));
    assert!(out.contains("Gender data not available for Washington."));
}

#[test]
fn parquet_format_ignores_csv_files() {
    let dir = data_dir();
    let (result, _) = run_session_with(dir.path(), DataFormat::Parquet, "chicago\nall\nall\nno\n");
    let msg = format!("{:#}", result.unwrap_err());
    assert!(msg.contains("chicago.parquet"), "{msg}");
}
