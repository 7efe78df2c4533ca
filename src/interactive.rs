//! Interactive prompt loop.
//!
//! Asks for coordinates, distance, category and result count, prints the
//! simplified result shape and repeats until the user stops. Reads from
//! any `BufRead` and writes to any `Write`, so the loop can be scripted.

use crate::place::{GeoFinder, SearchOutcome, SearchQuery};
use std::io::{self, BufRead, Write};

const RULE: &str = "------------------------------";

pub struct Session<'a, R, W> {
    finder: &'a GeoFinder,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(finder: &'a GeoFinder, input: R, out: W) -> Self {
        Self { finder, input, out }
    }

    /// Run rounds until the user declines to continue or input ends.
    /// Returns the number of searches performed.
    pub fn run(&mut self) -> io::Result<usize> {
        writeln!(self.out, "\nWelcome to GeoFinder")?;
        writeln!(
            self.out,
            "Use '.' for decimals. Latitude -90 to 90, longitude -180 to 180."
        )?;

        let mut rounds = 0;
        loop {
            if !self.round()? {
                break;
            }
            rounds += 1;
            match self.ask("\nContinue? (y/n): ")? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {}
                _ => break,
            }
        }
        Ok(rounds)
    }

    /// One prompt-and-search round. `false` when input ran out.
    fn round(&mut self) -> io::Result<bool> {
        let Some(lat) = self.ask_in_range("\nLatitude: ", -90.0, 90.0)? else {
            return Ok(false);
        };
        let Some(lon) = self.ask_in_range("Longitude: ", -180.0, 180.0)? else {
            return Ok(false);
        };
        let Some(distance) = self.ask_distance()? else {
            return Ok(false);
        };
        let Some(category) = self.ask_category()? else {
            return Ok(false);
        };
        let Some(limit) = self.ask_limit()? else {
            return Ok(false);
        };

        match SearchQuery::new(lat, lon, distance, category, limit) {
            Ok(query) => self.search(&query.without_bias())?,
            Err(e) => writeln!(self.out, "Invalid search: {}", e)?,
        }
        Ok(true)
    }

    fn search(&mut self, query: &SearchQuery) -> io::Result<()> {
        match self.finder.search_summaries(query) {
            SearchOutcome::Found(places) => {
                for place in &places {
                    writeln!(self.out, "{}", RULE)?;
                    for (label, value) in place.fields() {
                        writeln!(self.out, "{}: {}", label, value)?;
                    }
                }
            }
            SearchOutcome::Empty => writeln!(self.out, "No places found.")?,
            SearchOutcome::Failed(e) => writeln!(self.out, "Warning: search failed: {}", e)?,
        }
        Ok(())
    }

    // ─── Prompts ─────────────────────────────────────────────────

    /// Print a prompt and read one line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_in_range(&mut self, prompt: &str, min: f64, max: f64) -> io::Result<Option<f64>> {
        loop {
            let Some(text) = self.ask(prompt)? else {
                return Ok(None);
            };
            match text.parse::<f64>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(Some(v)),
                Ok(_) => writeln!(self.out, "Value out of range ({} to {})", min, max)?,
                Err(_) => writeln!(self.out, "Invalid input. Enter a number.")?,
            }
        }
    }

    fn ask_distance(&mut self) -> io::Result<Option<f64>> {
        loop {
            let Some(text) = self.ask("\nDistance in metres: ")? else {
                return Ok(None);
            };
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => return Ok(Some(v.abs())),
                _ => writeln!(self.out, "Enter a valid number.")?,
            }
        }
    }

    fn ask_limit(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(text) = self.ask("How many suggestions? ")? else {
                return Ok(None);
            };
            match text.parse::<u32>() {
                Ok(n) if n >= 1 => return Ok(Some(n)),
                _ => writeln!(self.out, "Enter a whole number of at least 1.")?,
            }
        }
    }

    /// Two-level selection: a parent, then optionally one of its children.
    fn ask_category(&mut self) -> io::Result<Option<String>> {
        let finder = self.finder;
        let catalog = finder.catalog();
        writeln!(self.out, "{}", catalog.parents().join(", "))?;

        let Some(parent) = self.ask("\nMain category (e.g. accommodation): ")? else {
            return Ok(None);
        };
        let parent = parent.to_lowercase();
        if parent.is_empty() {
            return Ok(Some(catalog.default_category().to_string()));
        }
        if !catalog.contains_parent(&parent) {
            return Ok(Some(parent));
        }

        writeln!(self.out, "\nAvailable subcategories:")?;
        for child in catalog.children(&parent) {
            writeln!(self.out, "  {}", child)?;
        }
        let Some(child) = self.ask("Full subcategory, or Enter for all: ")? else {
            return Ok(None);
        };
        Ok(Some(catalog.select(&parent, Some(&child))))
    }
}
