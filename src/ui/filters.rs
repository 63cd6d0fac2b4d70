use std::io::{BufRead, Write};

use crate::data::filter::Selection;
use crate::data::model::{Month, weekday_from_name, weekday_name};
use crate::data::registry::{City, title_case};
use crate::suggest::suggest;
use crate::ui::console::{Console, PromptError};
use crate::validate::{ALL, Category, candidates, is_valid};

// ---------------------------------------------------------------------------
// Prompt text per category
// ---------------------------------------------------------------------------

struct Prompts {
    intro: &'static [&'static str],
    first: &'static str,
    retry: &'static str,
}

fn prompts(category: Category) -> Prompts {
    match category {
        Category::City => Prompts {
            intro: &["Please select a city 'Chicago/New York City/Washington'"],
            first: "City: ",
            retry: "Please enter a valid city 'chicago/new york city/washington': ",
        },
        Category::Month => Prompts {
            intro: &[
                "\nPlease select a month for analysis january to june",
                "type 'all' if you want to view data for all months",
            ],
            first: "Month: ",
            retry: "Please enter a valid month january to june: ",
        },
        Category::Day => Prompts {
            intro: &[
                "\nPlease select a day for analysis ex: sunday/monday",
                "type 'all' if you want to view data for all days",
            ],
            first: "Day: ",
            retry: "Please enter a valid day: ",
        },
    }
}

// ---------------------------------------------------------------------------
// Filter collection
// ---------------------------------------------------------------------------

/// Ask for city, then month, then day, and print the confirmation banner.
///
/// Each answer is re-asked until valid.  A close misspelling is offered back
/// as "Did you mean ...?"; answering anything but "yes" asks for a fresh
/// entry instead.  At most `max_attempts` answers are accepted per category.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    max_attempts: usize,
) -> Result<Selection, PromptError> {
    let out = console.out();
    writeln!(out, "\n+++++++++++++++++++++++++++++++++++++++++++++")?;
    writeln!(out, "Hello! Let's explore some US bikeshare data!")?;
    writeln!(out, "+++++++++++++++++++++++++++++++++++++++++++++\n")?;

    let city = ask_valid(console, Category::City, max_attempts, City::from_name)?;
    let month = ask_valid(console, Category::Month, max_attempts, parse_month)?;
    let day = ask_valid(console, Category::Day, max_attempts, parse_day)?;

    let selection = Selection { city, month, day };
    print_banner(console.out(), &selection)?;
    log::debug!("Collected {selection:?}");
    Ok(selection)
}

fn parse_month(value: &str) -> Option<Option<Month>> {
    if value == ALL {
        Some(None)
    } else {
        Month::from_name(value).map(Some)
    }
}

fn parse_day(value: &str) -> Option<Option<chrono::Weekday>> {
    if value == ALL {
        Some(None)
    } else {
        weekday_from_name(value).map(Some)
    }
}

/// Prompt until `category` gets a valid answer, then convert it with `parse`.
///
/// `max_attempts` bounds the answers typed by the user; accepting a
/// suggestion does not use one up.
fn ask_valid<R: BufRead, W: Write, T>(
    console: &mut Console<R, W>,
    category: Category,
    max_attempts: usize,
    parse: fn(&str) -> Option<T>,
) -> Result<T, PromptError> {
    let text = prompts(category);
    for line in text.intro {
        writeln!(console.out(), "{line}")?;
    }

    let max_attempts = max_attempts.max(1);
    let mut value = console.ask_normalized(text.first)?;
    let mut attempts = 1;

    loop {
        if is_valid(category, &value) {
            if let Some(parsed) = parse(&value) {
                return Ok(parsed);
            }
        }
        log::debug!("Rejected {category} {value:?}");

        // An accepted suggestion is a registry value, so it is re-checked
        // without counting as a new answer.
        if let Some(guess) = suggest(&value, &candidates(category)) {
            let question = format!("Did you mean '{}' instead? Type yes/no: ", title_case(&guess));
            if console.confirm(&question)? {
                value = guess;
                continue;
            }
        } else {
            writeln!(console.out())?;
        }

        if attempts >= max_attempts {
            log::error!("Giving up on {category} after {attempts} attempts");
            return Err(PromptError::TooManyAttempts { category, attempts });
        }
        attempts += 1;
        value = console.ask_normalized(text.retry)?;
    }
}

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

pub fn month_label(selection: &Selection) -> String {
    selection
        .month
        .map_or_else(|| title_case(ALL), |m| m.to_string())
}

pub fn day_label(selection: &Selection) -> String {
    title_case(selection.day.map_or(ALL, weekday_name))
}

/// Print the "Displaying analysis for" summary of a selection.
pub fn print_banner<W: Write>(out: &mut W, selection: &Selection) -> std::io::Result<()> {
    let rule = "*".repeat(66);
    writeln!(out, "\n")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "                Displaying analysis for")?;
    writeln!(out, "                CITY :  {}", selection.city)?;
    writeln!(out, "                MONTH:  {}", month_label(selection))?;
    writeln!(out, "                DAY  :  {}", day_label(selection))?;
    writeln!(out, "{rule}")
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn run(script: &str, max_attempts: usize) -> (Result<Selection, PromptError>, String) {
        let mut console = Console::new(script.as_bytes(), Vec::new());
        let result = collect_filters(&mut console, max_attempts);
        let output = String::from_utf8(console.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn straight_answers() {
        let (sel, out) = run("Chicago\njanuary\nMONDAY\n", 5);
        assert_eq!(
            sel.unwrap(),
            Selection {
                city: City::Chicago,
                month: Some(Month::January),
                day: Some(Weekday::Mon),
            }
        );
        assert!(out.contains("CITY :  Chicago"));
        assert!(out.contains("MONTH:  January"));
        assert!(out.contains("DAY  :  Monday"));
    }

    #[test]
    fn all_means_no_filter() {
        let (sel, out) = run("washington\nall\nall\n", 5);
        assert_eq!(sel.unwrap(), Selection::all(City::Washington));
        assert!(out.contains("MONTH:  All"));
        assert!(out.contains("DAY  :  All"));
    }

    #[test]
    fn accepting_a_suggestion() {
        let (sel, out) = run("chicgo\nyes\nall\nall\n", 5);
        assert_eq!(sel.unwrap().city, City::Chicago);
        assert!(out.contains("Did you mean 'Chicago' instead?"));
    }

    #[test]
    fn declining_a_suggestion_asks_again() {
        let (sel, out) = run("new york\nno\nwashington\njun\nyes\nall\n", 5);
        let sel = sel.unwrap();
        assert_eq!(sel.city, City::Washington);
        assert_eq!(sel.month, Some(Month::June));
        assert!(out.contains("Did you mean 'New York City' instead?"));
        assert!(out.contains("Please enter a valid city"));
    }

    #[test]
    fn no_suggestion_reprompts_directly() {
        let (sel, out) = run("chicago\nall\nxyz\nfriday\n", 5);
        assert_eq!(sel.unwrap().day, Some(Weekday::Fri));
        assert!(!out.contains("Did you mean"));
        assert!(out.contains("Please enter a valid day: "));
    }

    #[test]
    fn accepted_suggestion_does_not_use_an_attempt() {
        let (sel, out) = run("chicgo\nyes\nall\nall\n", 1);
        assert_eq!(sel.unwrap(), Selection::all(City::Chicago));
        assert!(out.contains("Did you mean 'Chicago' instead?"));
    }

    #[test]
    fn declined_suggestion_at_the_limit_gives_up() {
        let (sel, _) = run("chicgo\nno\nchicago\n", 1);
        assert!(matches!(
            sel,
            Err(PromptError::TooManyAttempts {
                category: Category::City,
                attempts: 1
            })
        ));
    }

    #[test]
    fn retries_are_bounded() {
        let (sel, _) = run("x\ny\nz\n", 3);
        assert!(matches!(
            sel,
            Err(PromptError::TooManyAttempts {
                category: Category::City,
                attempts: 3
            })
        ));
    }

    #[test]
    fn end_of_input_stops_collection() {
        let (sel, _) = run("chicago\n", 5);
        assert!(matches!(sel, Err(PromptError::EndOfInput)));
    }
}
