use std::io::{self, BufRead, Write};

use skysense_core::{ForecastProvider, ForecastStore, Slot, report};
use thiserror::Error;

const MENU: &str = "\
Menu:
1. Fetch weather data for City 1
2. Fetch weather data for City 2
3. Display previously fetched weather data for City 1
4. Display previously fetched weather data for City 2
5. Compare weather data between two cities
6. Exit";

/// One menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch(Slot),
    Show(Slot),
    Compare,
    Exit,
}

impl Command {
    /// Parse a menu line. Anything but an integer from 1 to 6 is an invalid choice.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let choice: i64 = input.trim().parse().map_err(|_| InputError::InvalidChoice)?;

        match choice {
            1 => Ok(Command::Fetch(Slot::City1)),
            2 => Ok(Command::Fetch(Slot::City2)),
            3 => Ok(Command::Show(Slot::City1)),
            4 => Ok(Command::Show(Slot::City2)),
            5 => Ok(Command::Compare),
            6 => Ok(Command::Exit),
            _ => Err(InputError::InvalidChoice),
        }
    }
}

/// Problems with what the user typed or asked for. Reported, never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid choice. Please enter a valid option.")]
    InvalidChoice,

    #[error("City name cannot be empty.")]
    EmptyCity,

    #[error("No previously fetched weather data available for {0}.")]
    NoData(Slot),

    #[error(
        "Insufficient weather data available for comparison. Please fetch data for both cities."
    )]
    InsufficientData,
}

enum Flow {
    Continue,
    Exit,
}

/// The interactive loop: owns the provider and both forecast slots.
pub struct Menu {
    provider: Box<dyn ForecastProvider>,
    store: ForecastStore,
}

impl Menu {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider, store: ForecastStore::new() }
    }

    #[cfg(test)]
    pub fn store(&self) -> &ForecastStore {
        &self.store
    }

    /// Runs until the exit command or end of input.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> anyhow::Result<()> {
        loop {
            writeln!(output, "\nWELCOME TO SKYSENSE")?;
            writeln!(output, "\n{MENU}")?;
            write!(output, "Enter your choice: ")?;
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                tracing::debug!("end of input, leaving menu");
                self.exit(&mut output)?;
                return Ok(());
            };

            let flow = match Command::parse(&line) {
                Ok(command) => self.dispatch(command, &mut input, &mut output).await?,
                Err(err) => {
                    tracing::debug!(input = %line.trim(), "rejected menu input");
                    writeln!(output, "{err}")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    async fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<Flow> {
        match command {
            Command::Fetch(slot) => self.fetch(slot, input, output).await?,
            Command::Show(slot) => match self.store.get(slot) {
                Some(series) => {
                    writeln!(output, "Weather data for {}:", series.city)?;
                    write!(output, "{}", report::render(series))?;
                }
                None => writeln!(output, "{}", InputError::NoData(slot))?,
            },
            Command::Compare => match self.store.pair() {
                Some((a, b)) => write!(output, "{}", report::render_comparison(a, b))?,
                None => writeln!(output, "{}", InputError::InsufficientData)?,
            },
            Command::Exit => {
                self.exit(output)?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    async fn fetch<R: BufRead, W: Write>(
        &mut self,
        slot: Slot,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        write!(output, "Enter the city name for {slot}: ")?;
        output.flush()?;

        let city = read_line(input)?.map(|l| l.trim().to_string()).unwrap_or_default();
        if city.is_empty() {
            writeln!(output, "{}", InputError::EmptyCity)?;
            return Ok(());
        }

        match self.provider.fetch_forecast(&city).await {
            Ok(series) => {
                writeln!(output, "Fetched {} days of weather data for {}.", series.len(), city)?;
                self.store.set(slot, series);
            }
            Err(err) => {
                tracing::warn!(%city, %slot, error = %err, "forecast fetch failed");
                writeln!(output, "{err}")?;
            }
        }

        Ok(())
    }

    fn exit<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        self.store.clear();
        writeln!(output, "Exiting the program.")?;
        output.flush()
    }
}

/// Next line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use skysense_core::{ForecastDay, ForecastError, ForecastSeries};
    use std::{
        collections::HashMap,
        io::Cursor,
        sync::{Arc, Mutex},
    };

    #[derive(Debug, Default)]
    struct FakeProvider {
        temps: HashMap<&'static str, Vec<f64>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeProvider {
        fn with(mut self, city: &'static str, temps: &[f64]) -> Self {
            self.temps.insert(city, temps.to_vec());
            self
        }
    }

    #[async_trait]
    impl ForecastProvider for FakeProvider {
        async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, ForecastError> {
            self.calls.lock().unwrap().push(city.to_string());

            let temps = self
                .temps
                .get(city)
                .ok_or_else(|| ForecastError::Empty { city: city.to_string() })?;

            let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
            let days = start
                .iter_days()
                .zip(temps)
                .map(|(date, &t)| ForecastDay {
                    city: city.to_string(),
                    date,
                    description: "Clear sky".into(),
                    temperature_c: t,
                    humidity_pct: 40.0,
                    wind_speed_mps: 3.0,
                    pressure_mb: 1013.0,
                })
                .collect();

            Ok(ForecastSeries::new(city, days))
        }
    }

    fn menu(provider: FakeProvider) -> Menu {
        Menu::new(Box::new(provider))
    }

    async fn drive(menu: &mut Menu, script: &str) -> String {
        let mut out = Vec::new();
        menu.run(Cursor::new(script.as_bytes()), &mut out).await.expect("menu runs");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn parses_menu_choices() {
        assert_eq!(Command::parse("1"), Ok(Command::Fetch(Slot::City1)));
        assert_eq!(Command::parse(" 4 \n"), Ok(Command::Show(Slot::City2)));
        assert_eq!(Command::parse("5"), Ok(Command::Compare));
        assert_eq!(Command::parse("6"), Ok(Command::Exit));
    }

    #[test]
    fn rejects_out_of_range_and_non_numeric_choices() {
        for input in ["0", "7", "-1", "abc", "", "1.5", "99999999999999999999"] {
            assert_eq!(Command::parse(input), Err(InputError::InvalidChoice), "input: {input:?}");
        }
    }

    #[tokio::test]
    async fn exit_ends_loop_with_empty_slots() {
        let mut m = menu(FakeProvider::default());
        let out = drive(&mut m, "6\n").await;

        assert!(out.contains("WELCOME TO SKYSENSE"));
        assert!(out.ends_with("Exiting the program.\n"));
    }

    #[tokio::test]
    async fn exit_releases_stored_forecasts() {
        let mut m = menu(FakeProvider::default().with("Oslo", &[1.0]));
        let out = drive(&mut m, "1\nOslo\n6\n4\n").await;

        assert!(out.ends_with("Exiting the program.\n"));
        assert!(m.store().is_empty());
        // Nothing after the exit command is read.
        assert!(!out.contains("No previously fetched weather data available for City 2."));
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let mut m = menu(FakeProvider::default());
        let out = drive(&mut m, "").await;
        assert!(out.ends_with("Exiting the program.\n"));
    }

    #[tokio::test]
    async fn invalid_input_reprompts() {
        let mut m = menu(FakeProvider::default());
        let out = drive(&mut m, "hello\n9\n6\n").await;

        assert_eq!(out.matches("Invalid choice. Please enter a valid option.").count(), 2);
        assert_eq!(out.matches("Enter your choice: ").count(), 3);
        assert_eq!(out.matches("WELCOME TO SKYSENSE").count(), 3);
    }

    #[tokio::test]
    async fn show_empty_slot_reports_no_data() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = FakeProvider { calls: calls.clone(), ..FakeProvider::default() };
        let mut m = menu(provider);

        let out = drive(&mut m, "3\n6\n").await;

        assert!(out.contains("No previously fetched weather data available for City 1."));
        assert!(!out.contains("Weather data for"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_then_show_renders_the_table() {
        let mut m = menu(FakeProvider::default().with("Oslo", &[5.0, 6.5]));
        let out = drive(&mut m, "1\nOslo\n3\n6\n").await;

        assert!(out.contains("Enter the city name for City 1: "));
        assert!(out.contains("Fetched 2 days of weather data for Oslo."));
        assert!(out.contains("Weather data for Oslo:"));
        assert!(out.contains("2024-07-01  Clear sky                5.00"));
        assert!(out.contains("2024-07-02  Clear sky                6.50"));
    }

    #[tokio::test]
    async fn city_names_keep_inner_spaces() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = FakeProvider { calls: calls.clone(), ..FakeProvider::default() }
            .with("New York", &[20.0]);
        let mut m = menu(provider);

        drive(&mut m, "2\n  New York \n6\n").await;

        assert_eq!(*calls.lock().unwrap(), ["New York"]);
    }

    #[tokio::test]
    async fn empty_city_name_is_rejected_without_fetching() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = FakeProvider { calls: calls.clone(), ..FakeProvider::default() };
        let mut m = menu(provider);

        let out = drive(&mut m, "1\n   \n6\n").await;

        assert!(out.contains("City name cannot be empty."));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_slot_contents() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = FakeProvider { calls: calls.clone(), ..FakeProvider::default() }
            .with("Oslo", &[1.0, 2.0]);
        let mut m = menu(provider);

        let out = drive(&mut m, "1\nOslo\n1\nAtlantis\n3\n6\n").await;

        assert!(out.contains("No weather data found for Atlantis."));
        assert!(out.contains("Weather data for Oslo:"));
        assert_eq!(*calls.lock().unwrap(), ["Oslo", "Atlantis"]);
    }

    #[tokio::test]
    async fn refetch_overwrites_slot() {
        let provider = FakeProvider::default().with("Oslo", &[1.0]).with("Rome", &[25.0, 26.0]);
        let mut m = menu(provider);

        let out = drive(&mut m, "1\nOslo\n1\nRome\n3\n6\n").await;

        let shown = out.rsplit("Weather data for ").next().unwrap();
        assert!(shown.starts_with("Rome:"));
        assert!(!out.contains("Weather data for Oslo:"));
    }

    #[tokio::test]
    async fn compare_requires_both_slots() {
        let mut m = menu(FakeProvider::default().with("Oslo", &[1.0]));
        let out = drive(&mut m, "5\n1\nOslo\n5\n6\n").await;

        let refusal =
            "Insufficient weather data available for comparison. Please fetch data for both cities.";
        assert_eq!(out.matches(refusal).count(), 2);
    }

    #[tokio::test]
    async fn compare_reports_hotter_city() {
        let provider = FakeProvider::default()
            .with("A", &[10.0, 20.0, 30.0])
            .with("B", &[15.0, 15.0, 15.0]);
        let mut m = menu(provider);

        let out = drive(&mut m, "1\nA\n2\nB\n5\n6\n").await;

        assert!(out.contains("Comparing weather data between A and B:"));
        assert!(out.contains("Average Temperature for A: 20.00°C"));
        assert!(out.contains("Average Temperature for B: 15.00°C"));
        assert!(out.contains("A is hotter on average."));
    }

    #[tokio::test]
    async fn compare_averages_only_paired_days() {
        let provider = FakeProvider::default()
            .with("Long", &[10.0, 10.0, 10.0, 50.0, 50.0, 50.0, 50.0])
            .with("Short", &[10.0, 10.0, 10.0]);
        let mut m = menu(provider);

        let out = drive(&mut m, "1\nLong\n2\nShort\n5\n6\n").await;

        assert!(out.contains("Average Temperature for Long: 10.00°C"));
        assert!(out.contains("Average temperatures are the same for both cities."));
    }
}
